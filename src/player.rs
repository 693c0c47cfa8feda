//! The two roles of the game and the players that fill them.
//!
//! [`ComputerPlayer`] plays either role without any I/O: as guesser it drives a
//! [`WordFilter`], as referee it holds a secret word drawn from its dictionary.
//! [`HumanPlayer`] asks a [`Prompter`] for everything and re-asks until the
//! answer makes sense.

use crate::error::HangmanError;
use crate::game_state::Board;
use crate::solver::{LetterSet, Positions, WordFilter, fallback_letter};
use crate::wordbank::normalize_dictionary;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

pub trait Guesser {
    fn name(&self) -> &str;
    fn register_length(&mut self, length: usize) -> Result<(), HangmanError>;
    fn guess(&mut self, board: &Board) -> Result<char, HangmanError>;
    fn handle_feedback(&mut self, letter: char, positions: &Positions) -> Result<(), HangmanError>;
}

pub trait Referee {
    fn name(&self) -> &str;
    /// Commits to a secret word and returns its length.
    fn pick_secret_word(&mut self) -> Result<usize, HangmanError>;
    fn check_guess(&mut self, letter: char, board: &Board) -> Result<Positions, HangmanError>;
    fn reveal_secret_word(&mut self, board: &Board) -> Result<Option<String>, HangmanError>;
}

/// Line-oriented input used by human players.
pub trait Prompter {
    /// Shows `message` and waits for one line of input. Returns `None` once
    /// the input is closed.
    fn ask(&mut self, message: &str) -> io::Result<Option<String>>;
    fn warn(&mut self, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for Rc<RefCell<P>> {
    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        self.borrow_mut().ask(message)
    }

    fn warn(&mut self, message: &str) {
        self.borrow_mut().warn(message);
    }
}

pub struct ComputerPlayer {
    dictionary: Vec<String>,
    rng: StdRng,
    secret_word: Option<String>,
    filter: Option<WordFilter>,
    guessed: LetterSet,
}

impl ComputerPlayer {
    pub fn new(dictionary: Vec<String>) -> Self {
        Self::with_rng(dictionary, StdRng::from_os_rng())
    }

    /// Same secret word for the same seed and dictionary.
    pub fn with_seed(dictionary: Vec<String>, seed: u64) -> Self {
        Self::with_rng(dictionary, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dictionary: Vec<String>, rng: StdRng) -> Self {
        Self {
            dictionary: normalize_dictionary(dictionary),
            rng,
            secret_word: None,
            filter: None,
            guessed: LetterSet::new(),
        }
    }

    pub fn secret_word(&self) -> Option<&str> {
        self.secret_word.as_deref()
    }

    /// Words still consistent with the feedback, once a length is registered.
    pub fn candidates(&self) -> Option<&[String]> {
        self.filter.as_ref().map(WordFilter::candidates)
    }

    pub fn guessed_letters(&self) -> &LetterSet {
        &self.guessed
    }
}

impl Guesser for ComputerPlayer {
    fn name(&self) -> &str {
        "Computer"
    }

    fn register_length(&mut self, length: usize) -> Result<(), HangmanError> {
        self.filter = Some(WordFilter::new(&self.dictionary, length));
        self.guessed.clear();
        Ok(())
    }

    fn guess(&mut self, board: &Board) -> Result<char, HangmanError> {
        let filter = self
            .filter
            .as_ref()
            .ok_or(HangmanError::LengthNotRegistered)?;

        let mut ignored = board.revealed_letters();
        ignored.extend(self.guessed.iter().copied());

        let letter = match filter.recommend(&ignored) {
            Some(letter) => letter,
            None => {
                debug_log!("ComputerPlayer::guess() - no recommendation, using alphabet fallback");
                fallback_letter(&ignored).ok_or(HangmanError::NoLettersLeft)?
            }
        };
        self.guessed.insert(letter);
        Ok(letter)
    }

    fn handle_feedback(&mut self, letter: char, positions: &Positions) -> Result<(), HangmanError> {
        let filter = self
            .filter
            .as_mut()
            .ok_or(HangmanError::LengthNotRegistered)?;
        filter.apply_feedback(letter, positions);
        Ok(())
    }
}

impl Referee for ComputerPlayer {
    fn name(&self) -> &str {
        "Computer"
    }

    fn pick_secret_word(&mut self) -> Result<usize, HangmanError> {
        let word = self
            .dictionary
            .choose(&mut self.rng)
            .ok_or(HangmanError::EmptyDictionary)?
            .clone();
        let length = word.chars().count();
        info_log!("ComputerPlayer::pick_secret_word() - picked a {}-letter word", length);
        self.secret_word = Some(word);
        Ok(length)
    }

    fn check_guess(&mut self, letter: char, _board: &Board) -> Result<Positions, HangmanError> {
        let secret = self
            .secret_word
            .as_deref()
            .ok_or(HangmanError::NoSecretWord)?;
        Ok(letter_positions(secret, letter))
    }

    fn reveal_secret_word(&mut self, _board: &Board) -> Result<Option<String>, HangmanError> {
        Ok(self.secret_word.clone())
    }
}

/// Zero-based indices of `letter` in `word`.
pub fn letter_positions(word: &str, letter: char) -> Positions {
    word.chars()
        .enumerate()
        .filter(|&(_, c)| c == letter)
        .map(|(i, _)| i)
        .collect()
}

pub struct HumanPlayer<P> {
    prompter: P,
    length: usize,
    guessed: LetterSet,
}

impl<P: Prompter> HumanPlayer<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            length: 0,
            guessed: LetterSet::new(),
        }
    }

    pub fn registered_length(&self) -> usize {
        self.length
    }

    fn ask(&mut self, message: &str) -> Result<String, HangmanError> {
        self.prompter
            .ask(message)?
            .ok_or(HangmanError::InputClosed)
    }

    /// Asks until `parse` accepts the answer, warning about each rejection.
    fn ask_until<T>(
        &mut self,
        message: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> Result<T, HangmanError> {
        loop {
            let answer = self.ask(message)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(problem) => self.prompter.warn(&problem),
            }
        }
    }
}

impl<P: Prompter> Guesser for HumanPlayer<P> {
    fn name(&self) -> &str {
        "Human"
    }

    fn register_length(&mut self, length: usize) -> Result<(), HangmanError> {
        self.length = length;
        self.guessed.clear();
        Ok(())
    }

    fn guess(&mut self, _board: &Board) -> Result<char, HangmanError> {
        if ('a'..='z').all(|c| self.guessed.contains(&c)) {
            return Err(HangmanError::NoLettersLeft);
        }
        let guessed = self.guessed.clone();
        let letter = self.ask_until("Guess a letter:", |answer| parse_letter(answer, &guessed))?;
        self.guessed.insert(letter);
        Ok(letter)
    }

    fn handle_feedback(&mut self, letter: char, positions: &Positions) -> Result<(), HangmanError> {
        debug_log!("HumanPlayer::handle_feedback('{}', {:?})", letter, positions);
        Ok(())
    }
}

impl<P: Prompter> Referee for HumanPlayer<P> {
    fn name(&self) -> &str {
        "Human"
    }

    fn pick_secret_word(&mut self) -> Result<usize, HangmanError> {
        let length = self.ask_until(
            "Think of a secret word. How many letters does it contain?",
            parse_length,
        )?;
        self.length = length;
        Ok(length)
    }

    fn check_guess(&mut self, letter: char, board: &Board) -> Result<Positions, HangmanError> {
        let message = format!(
            "Give the positions of '{letter}' in your word (0-based, e.g. 0,2). Press Enter if none:"
        );
        self.ask_until(&message, |answer| parse_positions(answer, board))
    }

    fn reveal_secret_word(&mut self, board: &Board) -> Result<Option<String>, HangmanError> {
        if let Some(word) = board.word() {
            return Ok(Some(word));
        }
        let answer = self.ask("What was the secret word?")?;
        let word = answer.trim().to_lowercase();
        Ok((!word.is_empty()).then_some(word))
    }
}

/// Accepts exactly one ASCII letter that has not been guessed yet.
pub fn parse_letter(input: &str, guessed: &LetterSet) -> Result<char, String> {
    let mut chars = input.trim().chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err("Enter exactly one letter.".to_string());
    };
    if !c.is_ascii_alphabetic() {
        return Err(format!("'{c}' is not a letter."));
    }
    let letter = c.to_ascii_lowercase();
    if guessed.contains(&letter) {
        return Err(format!("You already guessed '{letter}'."));
    }
    Ok(letter)
}

pub fn parse_length(input: &str) -> Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(0) => Err("The word needs at least one letter.".to_string()),
        Ok(length) => Ok(length),
        Err(_) => Err(format!("'{}' is not a whole number.", input.trim())),
    }
}

/// Parses comma-separated zero-based positions. Each one must be on the board
/// and not yet revealed; an empty answer means the letter is absent.
pub fn parse_positions(input: &str, board: &Board) -> Result<Positions, String> {
    let mut positions = Positions::new();
    let input = input.trim();
    if input.is_empty() {
        return Ok(positions);
    }
    for token in input.split(',').map(str::trim) {
        let position: usize = token
            .parse()
            .map_err(|_| format!("'{token}' is not a position."))?;
        if position >= board.len() {
            return Err(format!(
                "Position {position} is out of range (0 to {}).",
                board.len().saturating_sub(1)
            ));
        }
        if let Some(letter) = board.slot(position) {
            return Err(format!("Position {position} is already taken by '{letter}'."));
        }
        positions.insert(position);
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn positions(list: &[usize]) -> Positions {
        list.iter().copied().collect()
    }

    /// Replays canned answers and remembers every warning.
    #[derive(Default)]
    struct ScriptedPrompter {
        answers: VecDeque<String>,
        questions: Vec<String>,
        warnings: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
            self.questions.push(message.to_string());
            Ok(self.answers.pop_front())
        }

        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    #[test]
    fn test_computer_guess_requires_registered_length() {
        let mut player = ComputerPlayer::new(words(&["dog"]));
        let err = player.guess(&Board::new(3)).unwrap_err();
        assert!(matches!(err, HangmanError::LengthNotRegistered));
    }

    #[test]
    fn test_computer_guess_records_history() {
        let mut player = ComputerPlayer::new(words(&["bat", "cat", "car", "can"]));
        player.register_length(3).unwrap();
        let board = Board::new(3);

        let first = player.guess(&board).unwrap();
        let second = player.guess(&board).unwrap();
        assert_eq!(first, 'a');
        assert_ne!(first, second);
        assert!(player.guessed_letters().contains(&first));
        assert!(player.guessed_letters().contains(&second));
    }

    #[test]
    fn test_computer_guess_falls_back_to_alphabet() {
        let mut player = ComputerPlayer::new(words(&["bat", "cat"]));
        player.register_length(9).unwrap();
        let board = Board::new(9);

        assert_eq!(player.candidates(), Some(&[][..]));
        assert_eq!(player.guess(&board).unwrap(), 'a');
        assert_eq!(player.guess(&board).unwrap(), 'b');
        assert_eq!(player.guess(&board).unwrap(), 'c');
    }

    #[test]
    fn test_computer_guess_runs_out_of_letters() {
        let mut player = ComputerPlayer::new(Vec::new());
        player.register_length(2).unwrap();
        let board = Board::new(2);
        for _ in 0..26 {
            player.guess(&board).unwrap();
        }
        assert!(matches!(
            player.guess(&board),
            Err(HangmanError::NoLettersLeft)
        ));
    }

    #[test]
    fn test_computer_referee_normalizes_dictionary() {
        for seed in 0..20 {
            let mut referee = ComputerPlayer::with_seed(words(&["DOG", "", "dog"]), seed);
            assert_eq!(referee.pick_secret_word().unwrap(), 3);
            assert_eq!(referee.secret_word(), Some("dog"));
            assert_eq!(
                referee.check_guess('d', &Board::new(3)).unwrap(),
                positions(&[0])
            );
        }
    }

    #[test]
    fn test_computer_guesser_normalizes_dictionary() {
        let mut player = ComputerPlayer::new(words(&["CAT", "cat", "Cow"]));
        player.register_length(3).unwrap();
        assert_eq!(player.candidates().unwrap(), &["cat", "cow"]);
    }

    #[test]
    fn test_computer_feedback_narrows_candidates() {
        let mut player = ComputerPlayer::new(words(&["bat", "cat", "car", "can"]));
        player.register_length(3).unwrap();
        player.handle_feedback('t', &Positions::new()).unwrap();
        assert_eq!(player.candidates().unwrap(), &["car", "can"]);
        player.handle_feedback('r', &positions(&[2])).unwrap();
        assert_eq!(player.candidates().unwrap(), &["car"]);
    }

    #[test]
    fn test_computer_referee_checks_guesses() {
        let mut referee = ComputerPlayer::with_seed(words(&["banana"]), 42);
        assert_eq!(referee.pick_secret_word().unwrap(), 6);
        assert_eq!(referee.secret_word(), Some("banana"));

        let board = Board::new(6);
        assert_eq!(referee.check_guess('a', &board).unwrap(), positions(&[1, 3, 5]));
        assert_eq!(referee.check_guess('z', &board).unwrap(), Positions::new());
        assert_eq!(
            referee.reveal_secret_word(&board).unwrap(),
            Some("banana".to_string())
        );
    }

    #[test]
    fn test_computer_referee_seed_is_reproducible() {
        let dictionary = words(&["otter", "heron", "badger", "lynx", "moose", "stoat"]);
        let mut first = ComputerPlayer::with_seed(dictionary.clone(), 99);
        let mut second = ComputerPlayer::with_seed(dictionary.clone(), 99);
        first.pick_secret_word().unwrap();
        second.pick_secret_word().unwrap();
        assert_eq!(first.secret_word(), second.secret_word());
        assert!(dictionary.iter().any(|w| Some(w.as_str()) == first.secret_word()));
    }

    #[test]
    fn test_computer_referee_needs_words() {
        let mut referee = ComputerPlayer::new(Vec::new());
        assert!(matches!(
            referee.pick_secret_word(),
            Err(HangmanError::EmptyDictionary)
        ));
        assert!(matches!(
            referee.check_guess('a', &Board::new(1)),
            Err(HangmanError::NoSecretWord)
        ));
    }

    #[test]
    fn test_letter_positions() {
        assert_eq!(letter_positions("level", 'e'), positions(&[1, 3]));
        assert!(letter_positions("level", 'x').is_empty());
    }

    #[test]
    fn test_parse_letter() {
        let guessed: LetterSet = ['e'].into_iter().collect();
        assert_eq!(parse_letter("A", &guessed), Ok('a'));
        assert_eq!(parse_letter("  q \n", &guessed), Ok('q'));
        assert!(parse_letter("e", &guessed).is_err());
        assert!(parse_letter("E", &guessed).is_err());
        assert!(parse_letter("ab", &guessed).is_err());
        assert!(parse_letter("", &guessed).is_err());
        assert!(parse_letter("7", &guessed).is_err());
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("5"), Ok(5));
        assert_eq!(parse_length(" 12 "), Ok(12));
        assert!(parse_length("0").is_err());
        assert!(parse_length("five").is_err());
        assert!(parse_length("-3").is_err());
    }

    #[test]
    fn test_parse_positions() {
        let mut board = Board::new(5);
        board.reveal('x', &positions(&[4])).unwrap();

        assert_eq!(parse_positions("", &board), Ok(Positions::new()));
        assert_eq!(parse_positions("0, 2", &board), Ok(positions(&[0, 2])));
        assert_eq!(parse_positions("3,3", &board), Ok(positions(&[3])));
        assert!(parse_positions("5", &board).is_err());
        assert!(parse_positions("4", &board).is_err());
        assert!(parse_positions("1,x", &board).is_err());
        assert!(parse_positions("1,", &board).is_err());
    }

    #[test]
    fn test_human_guesser_reprompts_until_valid() {
        let mut human = HumanPlayer::new(ScriptedPrompter::new(&["", "12", "?", "R", "r", "s"]));
        human.register_length(4).unwrap();
        let board = Board::new(4);

        assert_eq!(human.guess(&board).unwrap(), 'r');
        assert_eq!(human.guess(&board).unwrap(), 's');
        assert_eq!(human.prompter.warnings.len(), 4);
    }

    #[test]
    fn test_human_guesser_runs_out_of_letters() {
        let alphabet: Vec<String> = ('a'..='z').map(String::from).collect();
        let mut answers: Vec<&str> = alphabet.iter().map(String::as_str).collect();
        answers.push("a");
        let mut human = HumanPlayer::new(ScriptedPrompter::new(&answers));
        human.register_length(2).unwrap();
        let board = Board::new(2);

        for _ in 0..26 {
            human.guess(&board).unwrap();
        }
        assert!(matches!(
            human.guess(&board),
            Err(HangmanError::NoLettersLeft)
        ));
        assert_eq!(human.prompter.questions.len(), 26);
    }

    #[test]
    fn test_human_referee_reprompts_for_length() {
        let mut human = HumanPlayer::new(ScriptedPrompter::new(&["seven", "0", "7"]));
        assert_eq!(human.pick_secret_word().unwrap(), 7);
        assert_eq!(human.registered_length(), 7);
        assert_eq!(human.prompter.warnings.len(), 2);
    }

    #[test]
    fn test_human_referee_rejects_taken_positions() {
        let mut human = HumanPlayer::new(ScriptedPrompter::new(&["1", "9", "0,2"]));
        let mut board = Board::new(3);
        board.reveal('o', &positions(&[1])).unwrap();

        assert_eq!(human.check_guess('a', &board).unwrap(), positions(&[0, 2]));
        assert_eq!(human.prompter.warnings.len(), 2);
        assert!(human.prompter.questions[0].contains("'a'"));
    }

    #[test]
    fn test_human_referee_reveals_word() {
        let mut human = HumanPlayer::new(ScriptedPrompter::new(&["  Otter "]));
        assert_eq!(
            human.reveal_secret_word(&Board::new(5)).unwrap(),
            Some("otter".to_string())
        );

        let mut board = Board::new(2);
        board.reveal('o', &positions(&[0])).unwrap();
        board.reveal('x', &positions(&[1])).unwrap();
        assert_eq!(human.reveal_secret_word(&board).unwrap(), Some("ox".to_string()));
        assert_eq!(human.prompter.questions.len(), 1);
    }

    #[test]
    fn test_human_input_closed() {
        let mut human = HumanPlayer::new(ScriptedPrompter::new(&[]));
        assert!(matches!(
            human.pick_secret_word(),
            Err(HangmanError::InputClosed)
        ));
    }

    #[test]
    fn test_shared_prompter_serves_both_players() {
        let shared = Rc::new(RefCell::new(ScriptedPrompter::new(&["3", "k"])));
        let mut referee = HumanPlayer::new(Rc::clone(&shared));
        let mut guesser = HumanPlayer::new(Rc::clone(&shared));

        assert_eq!(referee.pick_secret_word().unwrap(), 3);
        guesser.register_length(3).unwrap();
        assert_eq!(guesser.guess(&Board::new(3)).unwrap(), 'k');
        assert_eq!(shared.borrow().questions.len(), 2);
    }
}

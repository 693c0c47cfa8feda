use crate::game_state::{DEFAULT_MAX_TURNS, GameInterface, GameOutcome, Role, TurnStatus};
use crate::player::{ComputerPlayer, Guesser, HumanPlayer, Prompter, Referee};
use crate::solver::{LetterSet, Positions};
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::rc::Rc;

/// Hangman: guess the hidden word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited dictionary file
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary_path: Option<PathBuf>,

    /// Who guesses the word (asked interactively when omitted)
    #[arg(short = 'g', long, value_enum)]
    pub guesser: Option<PlayerKind>,

    /// Who picks the word and answers guesses (asked interactively when omitted)
    #[arg(short = 'r', long, value_enum)]
    pub referee: Option<PlayerKind>,

    /// Wrong guesses allowed before the referee wins
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TURNS, value_parser = parse_turns)]
    pub turns: usize,

    /// Seed for the computer referee's word choice
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Keep previous turns on screen instead of clearing it
    #[arg(long)]
    pub no_clear: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_turns(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("at least one turn is required".to_string()),
        Ok(turns) => Ok(turns),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Asks `"<role> : Computer? y/n"` until the answer is yes or no.
pub fn ask_player_kind<P: Prompter + ?Sized>(
    prompter: &mut P,
    role: Role,
) -> io::Result<Option<PlayerKind>> {
    loop {
        let Some(answer) = prompter.ask(&format!("{role} : Computer? y/n"))? else {
            return Ok(None);
        };
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(PlayerKind::Computer)),
            "n" | "no" => return Ok(Some(PlayerKind::Human)),
            _ => prompter.warn("Please answer y or n."),
        }
    }
}

pub fn build_guesser(
    kind: PlayerKind,
    dictionary: &[String],
    prompter: Rc<RefCell<dyn Prompter>>,
) -> Box<dyn Guesser> {
    match kind {
        PlayerKind::Human => Box::new(HumanPlayer::new(prompter)),
        PlayerKind::Computer => Box::new(ComputerPlayer::new(dictionary.to_vec())),
    }
}

pub fn build_referee(
    kind: PlayerKind,
    dictionary: &[String],
    seed: Option<u64>,
    prompter: Rc<RefCell<dyn Prompter>>,
) -> Box<dyn Referee> {
    match kind {
        PlayerKind::Human => Box::new(HumanPlayer::new(prompter)),
        PlayerKind::Computer => match seed {
            Some(seed) => Box::new(ComputerPlayer::with_seed(dictionary.to_vec(), seed)),
            None => Box::new(ComputerPlayer::new(dictionary.to_vec())),
        },
    }
}

pub fn format_guessed(guessed: &LetterSet) -> String {
    guessed
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_turn(letter: char, positions: &Positions) -> String {
    if positions.is_empty() {
        format!("'{letter}' is not in the word.")
    } else {
        let list = positions
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("'{letter}' found at position(s) {list}.")
    }
}

pub fn format_outcome(outcome: &GameOutcome) -> Vec<String> {
    let mut lines = vec![match outcome.winner {
        Role::Guesser => format!(
            "Guesser ({}) won in {} turns!",
            outcome.guesser, outcome.turns_taken
        ),
        Role::Referee => format!(
            "Game over. Referee ({}) won after {} turns.",
            outcome.referee, outcome.turns_taken
        ),
    }];
    if let Some(word) = &outcome.secret_word {
        lines.push(format!("The secret word was {word}"));
    }
    lines
}

/// Line prompts over any buffered reader.
pub struct CliPrompter<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliPrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Prompter for CliPrompter<R> {
    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        println!("{message}");
        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    fn warn(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Plain-text rendering on stdout.
pub struct CliInterface {
    clear_screen: bool,
    last_turn: Option<String>,
}

impl CliInterface {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            clear_screen,
            last_turn: None,
        }
    }

    fn clear(&self) {
        if self.clear_screen {
            let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
        }
    }
}

impl GameInterface for CliInterface {
    fn display_status(&mut self, status: &TurnStatus) {
        self.clear();
        // the previous turn's result would otherwise be wiped by the clear
        if let Some(turn) = self.last_turn.take()
            && self.clear_screen
        {
            println!("{turn}");
        }
        println!("{}", status.board);
        println!("Remaining turns : {}", status.remaining_turns);
        if !status.guessed.is_empty() {
            println!("Guessed letters : {}", format_guessed(status.guessed));
        }
    }

    fn display_turn(&mut self, letter: char, positions: &Positions) {
        let turn = format_turn(letter, positions);
        println!("{turn}");
        self.last_turn = Some(turn);
    }

    fn display_outcome(&mut self, outcome: &GameOutcome) {
        for line in format_outcome(outcome) {
            println!("{line}");
        }
    }

    fn display_message(&mut self, message: &str) {
        println!("{message}");
    }
}

use crate::error::HangmanError;
use crate::info_log;
use crate::player::{Guesser, Referee};
use crate::solver::{LetterSet, Positions};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Wrong guesses allowed before the referee wins.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Rendered in place of a letter that has not been revealed yet.
pub const UNREVEALED: char = '_';

/// The partially revealed word both players can see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    slots: Vec<Option<char>>,
}

impl Board {
    pub fn new(length: usize) -> Self {
        Self {
            slots: vec![None; length],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn unrevealed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn revealed_letters(&self) -> LetterSet {
        self.slots.iter().flatten().copied().collect()
    }

    /// The whole word, once every slot is revealed.
    pub fn word(&self) -> Option<String> {
        self.slots.iter().copied().collect()
    }

    /// Writes `letter` into every slot in `positions`.
    ///
    /// Either every position is applied or none is. Re-revealing a slot with
    /// the letter it already holds is fine; anything else means the referee
    /// contradicted itself.
    pub fn reveal(&mut self, letter: char, positions: &Positions) -> Result<(), HangmanError> {
        for &position in positions {
            match self.slots.get(position) {
                None => {
                    return Err(HangmanError::PositionOutOfRange {
                        position,
                        length: self.slots.len(),
                    });
                }
                Some(Some(revealed)) if *revealed != letter => {
                    return Err(HangmanError::ConflictingFeedback {
                        position,
                        revealed: *revealed,
                        reported: letter,
                    });
                }
                Some(_) => {}
            }
        }
        for &position in positions {
            self.slots[position] = Some(letter);
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", slot.unwrap_or(UNREVEALED))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guesser,
    Referee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guesser => write!(f, "Guesser"),
            Self::Referee => write!(f, "Referee"),
        }
    }
}

/// Snapshot handed to the interface before each turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnStatus<'a> {
    pub board: &'a Board,
    pub remaining_turns: usize,
    pub max_turns: usize,
    pub guessed: &'a LetterSet,
    pub guesser: &'a str,
    pub referee: &'a str,
}

impl TurnStatus<'_> {
    pub fn wrong_guesses(&self) -> usize {
        self.max_turns.saturating_sub(self.remaining_turns)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Role,
    pub guesser: String,
    pub referee: String,
    pub turns_taken: usize,
    pub wrong_guesses: usize,
    pub secret_word: Option<String>,
    pub board: Board,
}

/// Where the game loop sends everything the players should see.
pub trait GameInterface {
    fn display_status(&mut self, status: &TurnStatus);
    fn display_turn(&mut self, letter: char, positions: &Positions);
    fn display_outcome(&mut self, outcome: &GameOutcome);
    fn display_message(&mut self, message: &str);
}

impl<T: GameInterface + ?Sized> GameInterface for Rc<RefCell<T>> {
    fn display_status(&mut self, status: &TurnStatus) {
        self.borrow_mut().display_status(status);
    }

    fn display_turn(&mut self, letter: char, positions: &Positions) {
        self.borrow_mut().display_turn(letter, positions);
    }

    fn display_outcome(&mut self, outcome: &GameOutcome) {
        self.borrow_mut().display_outcome(outcome);
    }

    fn display_message(&mut self, message: &str) {
        self.borrow_mut().display_message(message);
    }
}

/// One game between a guesser and a referee.
pub struct Hangman<'a> {
    guesser: &'a mut dyn Guesser,
    referee: &'a mut dyn Referee,
    board: Board,
    guessed: LetterSet,
    max_turns: usize,
    remaining_turns: usize,
    turns_taken: usize,
}

impl<'a> Hangman<'a> {
    pub fn new(guesser: &'a mut dyn Guesser, referee: &'a mut dyn Referee, max_turns: usize) -> Self {
        Self {
            guesser,
            referee,
            board: Board::default(),
            guessed: LetterSet::new(),
            max_turns,
            remaining_turns: max_turns,
            turns_taken: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn remaining_turns(&self) -> usize {
        self.remaining_turns
    }

    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    pub fn setup(&mut self) -> Result<(), HangmanError> {
        let length = self.referee.pick_secret_word()?;
        if length == 0 {
            return Err(HangmanError::InvalidLength(length));
        }
        self.guesser.register_length(length)?;
        self.board = Board::new(length);
        self.guessed.clear();
        self.remaining_turns = self.max_turns;
        self.turns_taken = 0;
        info_log!(
            "Hangman::setup() - {} guesses a {}-letter word from {}",
            self.guesser.name(),
            length,
            self.referee.name()
        );
        Ok(())
    }

    /// Plays one round trip of the turn protocol and returns the guessed
    /// letter with the positions the referee reported.
    pub fn take_turn(&mut self) -> Result<(char, Positions), HangmanError> {
        let letter = self.guesser.guess(&self.board)?;
        let positions = self.referee.check_guess(letter, &self.board)?;
        self.board.reveal(letter, &positions)?;
        self.guessed.insert(letter);
        self.turns_taken += 1;
        if positions.is_empty() {
            self.remaining_turns = self.remaining_turns.saturating_sub(1);
        }
        self.guesser.handle_feedback(letter, &positions)?;
        Ok((letter, positions))
    }

    pub fn is_over(&self) -> bool {
        self.board.is_complete() || self.remaining_turns == 0
    }

    pub fn winner(&self) -> Role {
        if self.board.is_complete() {
            Role::Guesser
        } else {
            Role::Referee
        }
    }

    pub fn status(&self) -> TurnStatus<'_> {
        TurnStatus {
            board: &self.board,
            remaining_turns: self.remaining_turns,
            max_turns: self.max_turns,
            guessed: &self.guessed,
            guesser: self.guesser.name(),
            referee: self.referee.name(),
        }
    }

    pub fn play(&mut self, interface: &mut dyn GameInterface) -> Result<GameOutcome, HangmanError> {
        self.setup()?;
        while !self.is_over() {
            interface.display_status(&self.status());
            let (letter, positions) = self.take_turn()?;
            interface.display_turn(letter, &positions);
        }
        interface.display_status(&self.status());

        let outcome = GameOutcome {
            winner: self.winner(),
            guesser: self.guesser.name().to_string(),
            referee: self.referee.name().to_string(),
            turns_taken: self.turns_taken,
            wrong_guesses: self.max_turns - self.remaining_turns,
            secret_word: self.referee.reveal_secret_word(&self.board)?,
            board: self.board.clone(),
        };
        info_log!(
            "Hangman::play() - {} won after {} turns",
            outcome.winner,
            outcome.turns_taken
        );
        interface.display_outcome(&outcome);
        Ok(outcome)
    }
}

pub fn game_loop(
    guesser: &mut dyn Guesser,
    referee: &mut dyn Referee,
    max_turns: usize,
    interface: &mut dyn GameInterface,
) -> Result<GameOutcome, HangmanError> {
    Hangman::new(guesser, referee, max_turns).play(interface)
}

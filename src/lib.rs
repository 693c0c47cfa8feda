// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod player;
pub mod solver;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::HangmanError;
pub use game_state::{Board, GameInterface, GameOutcome, Hangman, Role, TurnStatus, game_loop};
pub use player::{ComputerPlayer, Guesser, HumanPlayer, Prompter, Referee};
pub use solver::{LetterSet, Positions, WordFilter, fallback_letter};
pub use wordbank::{load_dictionary_from_file, load_dictionary_from_str, resolve_dictionary};

use std::fmt;
use std::io;

/// Errors raised while setting up or playing a game.
///
/// Malformed human input never shows up here: prompts re-ask until they get
/// something usable. What does show up is either an I/O failure, closed input,
/// or a referee that broke the turn protocol.
#[derive(Debug)]
pub enum HangmanError {
    Io(io::Error),
    /// The input stream ended (EOF, or Esc in the terminal UI).
    InputClosed,
    EmptyDictionary,
    NoSecretWord,
    LengthNotRegistered,
    InvalidLength(usize),
    NoLettersLeft,
    PositionOutOfRange {
        position: usize,
        length: usize,
    },
    ConflictingFeedback {
        position: usize,
        revealed: char,
        reported: char,
    },
}

impl fmt::Display for HangmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InputClosed => write!(f, "input closed before the game finished"),
            Self::EmptyDictionary => write!(f, "the dictionary contains no words"),
            Self::NoSecretWord => write!(f, "no secret word has been picked"),
            Self::LengthNotRegistered => write!(f, "the secret word length was never registered"),
            Self::InvalidLength(len) => write!(f, "invalid secret word length {len}"),
            Self::NoLettersLeft => write!(f, "every letter of the alphabet has been guessed"),
            Self::PositionOutOfRange { position, length } => write!(
                f,
                "referee reported position {position} for a word of length {length}"
            ),
            Self::ConflictingFeedback {
                position,
                revealed,
                reported,
            } => write!(
                f,
                "referee reported '{reported}' at position {position}, already revealed as '{revealed}'"
            ),
        }
    }
}

impl std::error::Error for HangmanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HangmanError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_feedback_message() {
        let err = HangmanError::ConflictingFeedback {
            position: 2,
            revealed: 'a',
            reported: 'o',
        };
        assert_eq!(
            err.to_string(),
            "referee reported 'o' at position 2, already revealed as 'a'"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err = HangmanError::from(io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(HangmanError::InputClosed.source().is_none());
    }
}

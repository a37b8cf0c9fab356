// src/error.rs
// Error types for card construction, calls, draw history, rules and game sessions.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::defs::{Letter, Number};

/// Reasons a card is rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("a card holds exactly {expected} numbers, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("number {number} appears more than once on the card")]
    DuplicateNumber { number: Number },

    #[error(
        "number {actual} does not belong in column {column} (expected {}-{})",
        .expected.start(),
        .expected.end()
    )]
    OutOfRangeForColumn {
        column: Letter,
        expected: RangeInclusive<Number>,
        actual: u32,
    },

    #[error("card entry {index} is not a number: '{text}'")]
    NotANumber { index: usize, text: String },
}

/// Reasons a call such as `B-12` cannot be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("unknown letter '{0}'")]
    UnknownLetter(String),

    #[error("malformed call '{0}'")]
    Malformed(String),

    #[error("number {number} is not in the range of letter {letter}")]
    NumberOutOfRange { letter: Letter, number: Number },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("{letter}-{number} has already been drawn")]
    AlreadyDrawn { letter: Letter, number: Number },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),

    #[error("unknown line type '{0}'")]
    UnknownLineType(String),

    #[error("invalid lines target '{0}'")]
    InvalidLinesTarget(String),

    #[error("pattern '{pattern}' is not available in the {category} category")]
    PatternNotInCategory { category: String, pattern: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no card registered with id {0}")]
    UnknownCard(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_error_messages() {
        let err = CardError::OutOfRangeForColumn {
            column: Letter::B,
            expected: 1..=15,
            actual: 20,
        };
        assert_eq!(
            err.to_string(),
            "number 20 does not belong in column B (expected 1-15)"
        );

        let err = CardError::WrongCount { expected: 24, found: 23 };
        assert_eq!(err.to_string(), "a card holds exactly 24 numbers, found 23");

        let err = CardError::OutOfRangeForColumn {
            column: Letter::O,
            expected: 61..=75,
            actual: 300,
        };
        assert_eq!(
            err.to_string(),
            "number 300 does not belong in column O (expected 61-75)"
        );
    }

    #[test]
    fn test_game_error_wraps_board_error() {
        let err: GameError = BoardError::AlreadyDrawn { letter: Letter::N, number: 33 }.into();
        assert_eq!(err.to_string(), "N-33 has already been drawn");
    }
}

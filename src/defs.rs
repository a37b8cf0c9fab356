// src/defs.rs
// Shared constants and the B-I-N-G-O letter table.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CallError;

pub type Number = u8;

pub const FIRSTNUMBER: Number = 1;
pub const LASTNUMBER: Number = 75;
pub const NUMBERSPERLETTER: Number = 15;

pub const GRID_SIZE: usize = 5;
pub const CENTER: usize = GRID_SIZE / 2;
pub const NUMBERSPERCARD: usize = GRID_SIZE * GRID_SIZE - 1;

/// A 5x5 grid indexed as `grid[row][col]`.
pub type Grid<T> = [[T; GRID_SIZE]; GRID_SIZE];

/// A cell coordinate as `(row, col)`.
pub type Cell = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    B,
    I,
    N,
    G,
    O,
}

impl Letter {
    /// Letters in column order.
    pub const ALL: [Letter; GRID_SIZE] = [Letter::B, Letter::I, Letter::N, Letter::G, Letter::O];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Letter> {
        Self::ALL.get(index).copied()
    }

    /// The letter whose range contains `number`, if any.
    pub fn for_number(number: Number) -> Option<Letter> {
        if !(FIRSTNUMBER..=LASTNUMBER).contains(&number) {
            return None;
        }
        Self::from_index(((number - FIRSTNUMBER) / NUMBERSPERLETTER) as usize)
    }

    pub fn range(self) -> RangeInclusive<Number> {
        let start = FIRSTNUMBER + self.index() as Number * NUMBERSPERLETTER;
        start..=start + NUMBERSPERLETTER - 1
    }

    pub fn contains(self, number: Number) -> bool {
        self.range().contains(&number)
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::B => 'B',
            Letter::I => 'I',
            Letter::N => 'N',
            Letter::G => 'G',
            Letter::O => 'O',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Letter {
    type Err = CallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B" => Ok(Letter::B),
            "I" => Ok(Letter::I),
            "N" => Ok(Letter::N),
            "G" => Ok(Letter::G),
            "O" => Ok(Letter::O),
            other => Err(CallError::UnknownLetter(other.to_string())),
        }
    }
}

/// All 75 `(letter, number)` pairs in ascending order.
pub fn all_calls() -> impl Iterator<Item = (Letter, Number)> {
    Letter::ALL
        .into_iter()
        .flat_map(|letter| letter.range().map(move |number| (letter, number)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_ranges() {
        assert_eq!(Letter::B.range(), 1..=15);
        assert_eq!(Letter::I.range(), 16..=30);
        assert_eq!(Letter::N.range(), 31..=45);
        assert_eq!(Letter::G.range(), 46..=60);
        assert_eq!(Letter::O.range(), 61..=75);
    }

    #[test]
    fn test_ranges_partition_all_numbers() {
        for number in FIRSTNUMBER..=LASTNUMBER {
            let owners: Vec<Letter> = Letter::ALL
                .into_iter()
                .filter(|letter| letter.contains(number))
                .collect();
            assert_eq!(owners.len(), 1, "number {number} owned by {owners:?}");
            assert_eq!(Letter::for_number(number), Some(owners[0]));
        }
        assert_eq!(Letter::for_number(0), None);
        assert_eq!(Letter::for_number(76), None);
        assert_eq!(all_calls().count(), LASTNUMBER as usize);
    }

    #[test]
    fn test_letter_parse() {
        assert_eq!("g".parse::<Letter>(), Ok(Letter::G));
        assert_eq!(" O ".parse::<Letter>(), Ok(Letter::O));
        assert!("X".parse::<Letter>().is_err());
        assert_eq!(Letter::from_index(2), Some(Letter::N));
        assert_eq!(Letter::from_index(5), None);
    }
}

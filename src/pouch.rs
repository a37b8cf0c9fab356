// src/pouch.rs
// The number pouch: draws without replacement from the 75 calls, given the draw history.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::defs::{all_calls, Letter, Number};
use crate::error::CallError;

/// One number called during a game. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawnNumber {
    letter: Letter,
    number: Number,
    timestamp: DateTime<Utc>,
}

impl DrawnNumber {
    pub fn new(letter: Letter, number: Number) -> Result<Self, CallError> {
        Self::at(letter, number, Utc::now())
    }

    pub fn at(letter: Letter, number: Number, timestamp: DateTime<Utc>) -> Result<Self, CallError> {
        if !letter.contains(number) {
            return Err(CallError::NumberOutOfRange { letter, number });
        }
        Ok(DrawnNumber { letter, number, timestamp })
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn number(&self) -> Number {
        self.number
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn call(&self) -> (Letter, Number) {
        (self.letter, self.number)
    }
}

impl fmt::Display for DrawnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.letter, self.number)
    }
}

/// Parses `B-12`, `B12` or a bare `12` (letter inferred from the range).
impl FromStr for DrawnNumber {
    type Err = CallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let malformed = || CallError::Malformed(text.to_string());

        let digits_at = text.find(|c: char| c.is_ascii_digit()).ok_or_else(malformed)?;
        let (prefix, digits) = text.split_at(digits_at);
        let number: Number = digits.parse().map_err(|_| malformed())?;

        let prefix = prefix.trim().trim_end_matches('-').trim();
        let letter = if prefix.is_empty() {
            Letter::for_number(number).ok_or_else(malformed)?
        } else {
            prefix.parse()?
        };
        DrawnNumber::new(letter, number)
    }
}

/// Result of asking the pouch for the next number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    Drawn(DrawnNumber),
    Exhausted,
}

impl Draw {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Draw::Exhausted)
    }

    pub fn drawn(self) -> Option<DrawnNumber> {
        match self {
            Draw::Drawn(drawn) => Some(drawn),
            Draw::Exhausted => None,
        }
    }
}

/// Calls not yet present in `history`, in ascending order.
pub fn available(history: &[DrawnNumber]) -> Vec<(Letter, Number)> {
    let drawn: HashSet<(Letter, Number)> = history.iter().map(DrawnNumber::call).collect();
    all_calls().filter(|call| !drawn.contains(call)).collect()
}

pub fn draw<R: Rng + ?Sized>(history: &[DrawnNumber], rng: &mut R) -> Draw {
    draw_at(history, rng, Utc::now())
}

/// Picks one undrawn call uniformly at random. The history is left untouched;
/// appending the result is the caller's job.
pub fn draw_at<R: Rng + ?Sized>(history: &[DrawnNumber], rng: &mut R, timestamp: DateTime<Utc>) -> Draw {
    let pool = available(history);
    if pool.is_empty() {
        return Draw::Exhausted;
    }
    let random_index = rng.random_range(0..pool.len());
    let (letter, number) = pool[random_index];
    Draw::Drawn(DrawnNumber { letter, number, timestamp })
}

/// Owns the random source used for extractions.
pub struct Pouch<R = StdRng> {
    rng: R,
}

impl Pouch<StdRng> {
    pub fn new() -> Self {
        Pouch { rng: StdRng::from_os_rng() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Pouch { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for Pouch<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Pouch<R> {
    pub fn with_rng(rng: R) -> Self {
        Pouch { rng }
    }

    pub fn extract(&mut self, history: &[DrawnNumber]) -> Draw {
        draw(history, &mut self.rng)
    }
}

// src/board.rs
// The board: the append-only history of numbers called in one game.

use std::collections::HashSet;

use serde::Serialize;

use crate::defs::{Letter, Number};
use crate::error::BoardError;
use crate::pouch::DrawnNumber;

// Single writer: only the game loop pushes, between draws.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    entries: Vec<DrawnNumber>,
    #[serde(skip)]
    called: HashSet<(Letter, Number)>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, drawn: DrawnNumber) -> Result<(), BoardError> {
        let (letter, number) = drawn.call();
        if !self.called.insert((letter, number)) {
            return Err(BoardError::AlreadyDrawn { letter, number });
        }
        self.entries.push(drawn);
        Ok(())
    }

    pub fn entries(&self) -> &[DrawnNumber] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, letter: Letter, number: Number) -> bool {
        self.called.contains(&(letter, number))
    }

    pub fn last(&self) -> Option<&DrawnNumber> {
        self.entries.last()
    }

    /// Up to `n` calls before the latest one, newest first.
    pub fn get_last_numbers(&self, n: usize) -> Vec<&DrawnNumber> {
        if self.entries.len() <= 1 {
            return Vec::new();
        }

        let available_previous = self.entries.len() - 1;
        let numbers_to_show = std::cmp::min(n, available_previous);
        let start_index = self.entries.len() - numbers_to_show - 1;
        let end_index = self.entries.len() - 1;

        self.entries[start_index..end_index].iter().rev().collect()
    }

    pub fn get_sorted_numbers(&self) -> Vec<Number> {
        let mut sorted: Vec<Number> = self.entries.iter().map(DrawnNumber::number).collect();
        sorted.sort_unstable();
        sorted
    }
}

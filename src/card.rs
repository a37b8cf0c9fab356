// src/card.rs
// Cartela validation, flat-to-grid mapping, matched grids and random card generation.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::Hasher;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::defs::{Cell, Grid, Letter, Number, CENTER, GRID_SIZE, NUMBERSPERCARD};
use crate::error::CardError;
use crate::pouch::DrawnNumber;

/// Grid cell for flat card position `index`, filling row-major and skipping the center.
pub fn position_of(index: usize) -> Cell {
    let center_index = CENTER * GRID_SIZE + CENTER;
    let linear = if index < center_index { index } else { index + 1 };
    (linear / GRID_SIZE, linear % GRID_SIZE)
}

/// Validates a flat card and lays it out on the grid, `None` at the free center.
pub fn to_grid(numbers: &[Number]) -> Result<Grid<Option<Number>>, CardError> {
    let values: Vec<u32> = numbers.iter().map(|&number| u32::from(number)).collect();
    layout(&values)
}

// Values arrive wider than `Number` so text input such as 300 is still
// reported against the column it was meant for.
fn layout(values: &[u32]) -> Result<Grid<Option<Number>>, CardError> {
    if values.len() != NUMBERSPERCARD {
        return Err(CardError::WrongCount {
            expected: NUMBERSPERCARD,
            found: values.len(),
        });
    }

    let mut grid = [[None; GRID_SIZE]; GRID_SIZE];
    let mut seen = HashSet::new();
    for (index, &value) in values.iter().enumerate() {
        let (row, col) = position_of(index);
        let column = Letter::ALL[col];
        let number = Number::try_from(value)
            .ok()
            .filter(|&number| column.contains(number))
            .ok_or(CardError::OutOfRangeForColumn {
                column,
                expected: column.range(),
                actual: value,
            })?;
        if !seen.insert(number) {
            return Err(CardError::DuplicateNumber { number });
        }
        grid[row][col] = Some(number);
    }
    Ok(grid)
}

/// Reads a grid back into flat card order.
pub fn flatten(grid: &Grid<Option<Number>>) -> Vec<Number> {
    (0..NUMBERSPERCARD)
        .filter_map(|index| {
            let (row, col) = position_of(index);
            grid[row][col]
        })
        .collect()
}

/// Matched cells for a card grid. A cell matches only when its column letter
/// and number were drawn together; the center is always matched.
pub fn to_matched_grid(grid: &Grid<Option<Number>>, history: &[DrawnNumber]) -> Grid<bool> {
    let drawn: HashSet<(Letter, Number)> = history.iter().map(DrawnNumber::call).collect();
    let mut matched = [[false; GRID_SIZE]; GRID_SIZE];
    for (row, cells) in grid.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            matched[row][col] = match cell {
                Some(number) => drawn.contains(&(Letter::ALL[col], *number)),
                None => false,
            };
        }
    }
    matched[CENTER][CENTER] = true;
    matched
}

/// A validated 24-number card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Number>", into = "Vec<Number>")]
pub struct Card {
    numbers: Vec<Number>,
    grid: Grid<Option<Number>>,
}

impl Card {
    pub fn new(numbers: &[Number]) -> Result<Self, CardError> {
        let grid = to_grid(numbers)?;
        Ok(Card {
            numbers: numbers.to_vec(),
            grid,
        })
    }

    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    pub fn grid(&self) -> &Grid<Option<Number>> {
        &self.grid
    }

    pub fn matched_grid(&self, history: &[DrawnNumber]) -> Grid<bool> {
        to_matched_grid(&self.grid, history)
    }

    /// Deterministic id over the card content, shown as 16 hex digits.
    pub fn id(&self) -> String {
        let mut hasher = DefaultHasher::new();
        for &number in &self.numbers {
            hasher.write_u8(number);
        }
        format!("{:016X}", hasher.finish())
    }
}

impl TryFrom<Vec<Number>> for Card {
    type Error = CardError;

    fn try_from(numbers: Vec<Number>) -> Result<Self, Self::Error> {
        Card::new(&numbers)
    }
}

/// Parses 24 comma-separated numbers in flat card order.
impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(index, text)| {
                text.parse::<u32>().map_err(|_| CardError::NotANumber {
                    index,
                    text: text.to_string(),
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;
        let grid = layout(&values)?;
        Ok(Card {
            numbers: flatten(&grid),
            grid,
        })
    }
}

impl From<Card> for Vec<Number> {
    fn from(card: Card) -> Self {
        card.numbers
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardGenerator;

impl CardGenerator {
    pub fn new() -> Self {
        Self
    }

    /// A random valid card; each column is sorted top to bottom.
    pub fn generate_card<R: Rng + ?Sized>(&self, rng: &mut R) -> Card {
        let mut grid: Grid<Option<Number>> = [[None; GRID_SIZE]; GRID_SIZE];

        for (col, letter) in Letter::ALL.into_iter().enumerate() {
            let rows: Vec<usize> = (0..GRID_SIZE)
                .filter(|&row| !(row == CENTER && col == CENTER))
                .collect();

            let mut column_numbers: Vec<Number> = letter.range().collect();
            column_numbers.shuffle(rng);
            column_numbers.truncate(rows.len());
            column_numbers.sort();

            for (row, number) in rows.into_iter().zip(column_numbers) {
                grid[row][col] = Some(number);
            }
        }

        let numbers = flatten(&grid);
        Card { numbers, grid }
    }

    /// `count` cards with pairwise distinct ids.
    pub fn generate_cards<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Card> {
        let mut ids = HashSet::new();
        let mut cards = Vec::with_capacity(count);
        while cards.len() < count {
            let card = self.generate_card(rng);
            if ids.insert(card.id()) {
                cards.push(card);
            }
        }
        cards
    }
}

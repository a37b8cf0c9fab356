// src/terminal.rs
// Plain-text output for the caller: card grids with matched and winning cells, and recent calls.

use crate::board::Board;
use crate::card::Card;
use crate::defs::{Grid, Letter, CENTER};
use crate::pattern::WinResult;

const FREE_CELL: &str = "**";

/// Render a card as a 5x5 table. With `colored`, winning cells are bold yellow
/// and other matched cells bold green; without it they get `[..]` and `(..)`.
pub fn format_card(card: &Card, matched: &Grid<bool>, result: &WinResult, colored: bool) -> String {
    let mut out = String::new();
    for letter in Letter::ALL {
        out.push_str(&format!("  {letter}  "));
    }
    out.push('\n');

    for (row, cells) in card.grid().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let text = match cell {
                Some(number) => format!("{number:2}"),
                None if row == CENTER && col == CENTER => FREE_CELL.to_string(),
                None => "  ".to_string(),
            };
            let highlighted = result.highlight_mask[row][col];
            let is_matched = matched[row][col];
            let decorated = match (colored, highlighted, is_matched) {
                (true, true, _) => format!(" \x1b[1;33m{text}\x1b[0m "),
                (true, false, true) => format!(" \x1b[1;32m{text}\x1b[0m "),
                (false, true, _) => format!("[{text}]"),
                (false, false, true) => format!("({text})"),
                (_, false, false) => format!(" {text} "),
            };
            out.push_str(&decorated);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

pub fn format_calls(board: &Board, previous: usize) -> String {
    match board.last() {
        None => "No numbers called yet".to_string(),
        Some(last) => {
            let previous: Vec<String> = board
                .get_last_numbers(previous)
                .iter()
                .map(|drawn| drawn.to_string())
                .collect();
            format!("Last number: {last}  Previous numbers: [{}]", previous.join(", "))
        }
    }
}

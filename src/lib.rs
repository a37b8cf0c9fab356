// lib.rs
// Library modules for the Bingo-75 caller

pub mod defs;
pub mod error;
pub mod logging;
pub mod pouch;
pub mod board;
pub mod card;
pub mod rules;
pub mod config;
pub mod pattern;
pub mod game;
pub mod terminal;

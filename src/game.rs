// src/game.rs
// A single game session: the rules snapshot, the draw history, the pouch and the
// cards being played, with coordinated draw and check operations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;

use crate::board::Board;
use crate::card::Card;
use crate::error::GameError;
use crate::logging::{log_debug, log_info};
use crate::pattern::{evaluate, WinResult};
use crate::pouch::{available, Draw, DrawnNumber, Pouch};
use crate::rules::RuleConfig;

pub struct Game<R = StdRng> {
    id: String,
    created_at: DateTime<Utc>,
    rules: RuleConfig,
    board: Board,
    pouch: Pouch<R>,
    cards: BTreeMap<String, Card>,
}

impl Game<StdRng> {
    /// Create a new game with an entropy-seeded pouch
    pub fn new(rules: RuleConfig) -> Self {
        Self::with_pouch(rules, Pouch::new())
    }

    /// Create a game whose draws are reproducible
    pub fn with_seed(rules: RuleConfig, seed: u64) -> Self {
        Self::with_pouch(rules, Pouch::with_seed(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_pouch(rules: RuleConfig, pouch: Pouch<R>) -> Self {
        let game_id = format!("game_{:08x}", rand::rng().random::<u32>());
        Self {
            id: game_id,
            created_at: Utc::now(),
            rules,
            board: Board::new(),
            pouch,
            cards: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn created_at_string(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[DrawnNumber] {
        self.board.entries()
    }

    /// Register a card for this game and return its id
    pub fn register_card(&mut self, card: Card) -> String {
        let card_id = card.id();
        log_debug(&format!("Registered card {card_id} in {}", self.id));
        self.cards.insert(card_id.clone(), card);
        card_id
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.get(card_id)
    }

    pub fn cards(&self) -> impl Iterator<Item = (&String, &Card)> {
        self.cards.iter()
    }

    /// Draw the next number and append it to the board
    pub fn extract_number(&mut self) -> Result<Draw, GameError> {
        match self.pouch.extract(self.board.entries()) {
            Draw::Drawn(drawn) => {
                self.board.push(drawn.clone())?;
                log_debug(&format!("{}: called {} ({} left)", self.id, drawn, self.remaining()));
                Ok(Draw::Drawn(drawn))
            }
            Draw::Exhausted => {
                log_info(&format!("{}: the pouch is empty", self.id));
                Ok(Draw::Exhausted)
            }
        }
    }

    /// Evaluate one registered card against the current history
    pub fn check_card(&self, card_id: &str) -> Result<WinResult, GameError> {
        let card = self
            .cards
            .get(card_id)
            .ok_or_else(|| GameError::UnknownCard(card_id.to_string()))?;
        Ok(evaluate(&card.matched_grid(self.board.entries()), &self.rules))
    }

    /// Every registered card that currently wins, ordered by card id
    pub fn winners(&self) -> Vec<(String, WinResult)> {
        self.cards
            .iter()
            .map(|(card_id, card)| {
                let result = evaluate(&card.matched_grid(self.board.entries()), &self.rules);
                (card_id.clone(), result)
            })
            .filter(|(_, result)| result.won)
            .collect()
    }

    /// Keep drawing until at least one card wins or the pouch runs out.
    /// Returns the winners, empty if the pouch was exhausted first.
    pub fn draw_until_winner(&mut self) -> Result<Vec<(String, WinResult)>, GameError> {
        self.draw_until_winner_with(|_| {})
    }

    /// Same as `draw_until_winner`, calling `on_draw` with the board after each call.
    pub fn draw_until_winner_with<F>(&mut self, mut on_draw: F) -> Result<Vec<(String, WinResult)>, GameError>
    where
        F: FnMut(&Board),
    {
        loop {
            let winners = self.winners();
            if !winners.is_empty() {
                log_info(&format!(
                    "{}: {} winning card(s) after {} calls",
                    self.id,
                    winners.len(),
                    self.board.len()
                ));
                return Ok(winners);
            }
            if self.extract_number()?.is_exhausted() {
                return Ok(Vec::new());
            }
            on_draw(&self.board);
        }
    }

    pub fn remaining(&self) -> usize {
        available(self.board.entries()).len()
    }

    pub fn is_pouch_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn has_game_started(&self) -> bool {
        !self.board.is_empty()
    }

    pub fn game_info(&self) -> String {
        format!(
            "Game[id={}, created={}, rules={}, board_len={}, pouch_len={}, cards={}, started={}]",
            self.id,
            self.created_at_string(),
            self.rules.describe(),
            self.board.len(),
            self.remaining(),
            self.cards.len(),
            self.has_game_started()
        )
    }
}

// src/bingo_caller.rs
// Command-line caller for Bingo-75 games.
//
// Subcommands:
// - play: generate cards, call numbers until a card wins or the pouch is empty
// - check: verify one card against a list of calls

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use bingo75::card::{Card, CardGenerator};
use bingo75::defs::Number;
use bingo75::game::Game;
use bingo75::logging::{log_error, log_info};
use bingo75::pattern::{evaluate, WinResult};
use bingo75::pouch::DrawnNumber;
use bingo75::rules::RuleConfig;
use bingo75::terminal;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo-75 caller - draw numbers and check cartelas against win patterns")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CommonArgs {
    /// Rules file (key = value); defaults to conf/rules.conf
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game with generated cards until someone wins
    Play {
        /// Number of cards in play
        #[arg(long, default_value_t = 4)]
        cards: usize,

        /// Seed for reproducible cards and draws
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Check one card against a list of calls
    Check {
        /// 24 comma-separated numbers, row by row, skipping the free center
        #[arg(long)]
        card: String,

        /// Comma-separated calls such as B-1,I-16,45
        #[arg(long, default_value = "")]
        draws: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Serialize)]
struct CardReport<'a> {
    card_id: String,
    numbers: &'a [Number],
    result: WinResult,
}

#[derive(Serialize)]
struct GameReport<'a> {
    game_id: &'a str,
    rules: &'a RuleConfig,
    calls: &'a [DrawnNumber],
    winners: Vec<CardReport<'a>>,
}

fn main() {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = match cli.command {
        Command::Play { cards, seed, common } => run_play(&mut out, cards, seed, &common),
        Command::Check { card, draws, common } => run_check(&mut out, &card, &draws, &common),
    };
    if let Err(e) = outcome {
        log_error(&e.to_string());
        std::process::exit(1);
    }
}

fn load_rules(common: &CommonArgs) -> Result<RuleConfig, Box<dyn Error>> {
    match &common.config {
        Some(path) => Ok(RuleConfig::from_file(path)?),
        None => Ok(RuleConfig::load_or_default(None)),
    }
}

fn run_play<W: Write>(
    out: &mut W,
    card_count: usize,
    seed: Option<u64>,
    common: &CommonArgs,
) -> Result<(), Box<dyn Error>> {
    let rules = load_rules(common)?;

    let (mut game, mut card_rng) = match seed {
        Some(seed) => (
            Game::with_seed(rules, seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (Game::new(rules), StdRng::from_os_rng()),
    };
    log_info(&format!("Created new game instance: {}", game.game_info()));

    for card in CardGenerator::new().generate_cards(&mut card_rng, card_count) {
        game.register_card(card);
    }

    let mut progress = Vec::new();
    let winners = game.draw_until_winner_with(|board| {
        if !common.json {
            progress.push(terminal::format_calls(board, 3));
        }
    })?;
    for line in &progress {
        writeln!(out, "{line}")?;
    }

    if common.json {
        let winners = winners
            .iter()
            .filter_map(|(card_id, result)| {
                game.card(card_id).map(|card| CardReport {
                    card_id: card_id.clone(),
                    numbers: card.numbers(),
                    result: *result,
                })
            })
            .collect();
        let report = GameReport {
            game_id: game.id(),
            rules: game.rules(),
            calls: game.history(),
            winners,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    if winners.is_empty() {
        writeln!(out, "\nThe pouch is empty and no card has won.")?;
        return Ok(());
    }

    writeln!(out, "\n\x1b[1;33mBINGO!\x1b[0m after {} calls", game.board().len())?;
    for (card_id, result) in &winners {
        if let Some(card) = game.card(card_id) {
            writeln!(out, "\nCard {card_id}:")?;
            let matched = card.matched_grid(game.history());
            write!(out, "{}", terminal::format_card(card, &matched, result, true))?;
        }
    }
    Ok(())
}

fn run_check<W: Write>(
    out: &mut W,
    card_text: &str,
    draws_text: &str,
    common: &CommonArgs,
) -> Result<(), Box<dyn Error>> {
    let rules = load_rules(common)?;
    let card: Card = card_text.parse()?;

    let history = draws_text
        .split(',')
        .map(str::trim)
        .filter(|call| !call.is_empty())
        .map(str::parse::<DrawnNumber>)
        .collect::<Result<Vec<DrawnNumber>, _>>()?;

    let matched = card.matched_grid(&history);
    let result = evaluate(&matched, &rules);

    if common.json {
        let report = CardReport {
            card_id: card.id(),
            numbers: card.numbers(),
            result,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", terminal::format_card(&card, &matched, &result, true))?;
        writeln!(
            out,
            "\n{} ({})",
            if result.won { "WINNER" } else { "No win yet" },
            rules.describe()
        )?;
    }
    Ok(())
}

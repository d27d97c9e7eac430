// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sidebet simulator CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use sidebet_sim::{
    BlackjackGame, Game, HoldemGame, Report, SimConfig, StatsAggregator, TrialEvent, Trials,
    payout,
};

pub mod report;

#[derive(Debug, Parser)]
struct Cli {
    /// The side bet game to simulate.
    #[clap(long, short, value_enum, default_value_t = GameKind::Poker)]
    game: GameKind,
    /// Number of hands to simulate.
    #[clap(long, default_value_t = 10_000_000, value_parser = clap::value_parser!(u64).range(1..))]
    hands: u64,
    /// Number of hands per chunk.
    #[clap(long, default_value_t = 100_000, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: u64,
    /// Seed for the simulation RNG.
    #[clap(long, short, default_value_t = 0)]
    seed: u64,
    /// Number of decks in the blackjack shoe.
    #[clap(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=8))]
    decks: u8,
    /// Write the CSV report to this file.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameKind {
    /// Ultimate Texas Hold'em progressive.
    Poker,
    /// Blackjack A/J progressive.
    Blackjack,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = SimConfig::new(cli.hands, cli.chunk_size, cli.seed)?;

    match cli.game {
        GameKind::Poker => {
            let report = run(HoldemGame::new(), &config)?;
            print_frequencies(&report);

            let fixed = payout::fixed_payouts(&report, payout::HOLDEM_PAY_TABLE);
            let total_bet = report.total_hands as f64 * payout::BET_AMOUNT;
            info!("Total bet: {total_bet:.2}");
            info!("Fixed payouts: {fixed:.2}");
            match payout::holdem_fair_progressive(&report) {
                Some(fair) => info!("Fair progressive value: {fair:.2}"),
                None => info!("Fair progressive value: n/a, no royal flush hit"),
            }

            if let Some(path) = &cli.output {
                report::write_csv(path, &report, payout::HOLDEM_PAY_TABLE)?;
                info!("Report saved to {}", path.display());
            }
        }
        GameKind::Blackjack => {
            let game = BlackjackGame::with_decks(cli.decks as usize);
            let report = run(game, &config)?;
            print_frequencies(&report);

            let fixed = payout::fixed_payouts(&report, payout::BLACKJACK_PAY_TABLE);
            let total_bet = report.total_hands as f64 * payout::BET_AMOUNT;
            info!("Total bet: {total_bet:.2}");
            info!("Fixed payouts: {fixed:.2}");
            match payout::blackjack_fair_progressives(&report) {
                Some((major, minor)) => {
                    info!("Fair major progressive: {major:.2}");
                    info!("Fair minor progressive: {minor:.2}");
                }
                None => info!("Fair progressives: n/a, a jackpot tier never hit"),
            }

            if let Some(path) = &cli.output {
                report::write_csv(path, &report, payout::BLACKJACK_PAY_TABLE)?;
                info!("Report saved to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Drives the trial runner, logging progress at chunk boundaries.
fn run<G: Game>(game: G, config: &SimConfig) -> Result<Report> {
    let num_chunks = config.num_chunks();
    info!(
        "{}: simulating {} hands in {num_chunks} chunks, seed {}",
        game.name(),
        config.total_hands,
        config.seed
    );

    let mut agg = StatsAggregator::<G::Outcome>::new();
    for event in Trials::new(game, config)? {
        let event = event?;
        agg.observe(&event);

        if let TrialEvent::ChunkEnd {
            chunk_index,
            last_hand,
            ..
        } = event
        {
            info!("Chunk {chunk_index}/{num_chunks}: {last_hand} hands");

            if chunk_index % 10 == 0 {
                for (label, count) in agg.hit_counts() {
                    info!("  {label}: {count} hits");
                }
            }
        }
    }

    Ok(agg.finish())
}

fn print_frequencies(report: &Report) {
    info!("Total hands: {}", report.total_hands);

    for cat in &report.categories {
        match cat.one_in(report.total_hands) {
            Some(one_in) => info!("{}: {} hits (1 in {one_in:.0})", cat.label, cat.hits),
            None => info!("{}: no hits", cat.label),
        }
    }
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sidebet progressive jackpot Monte Carlo simulator.
//!
//! This crate estimates, by repeated random trial, how often the rare
//! outcomes of two casino side bets occur, and derives the hit rate,
//! wait time, and drought statistics needed to judge whether a fixed
//! side bet price is fair relative to a progressive jackpot.
//!
//! Two games are modeled, an Ultimate Texas Hold'em progressive
//! ([HoldemGame]) and a blackjack A/J progressive ([BlackjackGame]),
//! both driven by the same [Trials] runner and [StatsAggregator]:
//!
//! ```
//! # use sidebet_sim::*;
//! let config = SimConfig::new(100_000, 10_000, 42).unwrap();
//! let report = simulate(HoldemGame::new(), &config).unwrap();
//!
//! // Full houses show up about once every 39 hands.
//! let fh = report.category("Full House").unwrap();
//! assert!(fh.hits > 0);
//! ```
//!
//! The **`parallel`** feature adds [par_simulate] which distributes whole
//! chunks over worker threads and produces the same [Report] as the
//! sequential driver for a given configuration.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod blackjack;
pub mod config;
pub mod error;
pub mod game;
pub mod holdem;
pub mod payout;
pub mod runner;
pub mod stats;

pub use blackjack::{BlackjackGame, BlackjackHand, BlackjackOutcome};
pub use config::SimConfig;
pub use error::{ContractViolation, SimError};
pub use game::{Game, Outcome};
pub use holdem::{HoldemGame, HoldemHand, PokerOutcome};
#[cfg(feature = "parallel")]
pub use runner::par_simulate;
pub use runner::{TrialEvent, Trials, simulate};
pub use stats::{
    CategoryStats, ChunkSummary, Drought, Percentiles, Report, StatsAggregator, WaitStats,
};

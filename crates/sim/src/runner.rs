// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Trial runner driving independent hands in fixed size chunks.
//!
//! [Trials] is a lazy, finite, non restartable sequence of per hand
//! classification results with chunk boundary markers. The RNG stream is
//! reseeded from the run seed at every chunk start, so a configuration
//! always produces the identical event sequence whichever driver walks
//! the chunks.
use log::debug;
use rand::prelude::*;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::game::Game;
use crate::stats::{Report, StatsAggregator};

#[cfg(feature = "parallel")]
mod parallel;
#[cfg(feature = "parallel")]
pub use parallel::par_simulate;

/// One event of the trial sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialEvent<O> {
    /// A classified hand.
    Hand {
        /// Monotonic 1-based hand counter, never reused.
        hand_index: u64,
        /// The 1-based chunk this hand belongs to.
        chunk_index: u64,
        /// The classification result.
        outcome: O,
    },
    /// Marks a completed chunk, yielded after its last hand.
    ChunkEnd {
        /// The completed 1-based chunk.
        chunk_index: u64,
        /// First hand of the chunk.
        first_hand: u64,
        /// Last hand of the chunk, earlier than the chunk capacity only
        /// for the final partial chunk.
        last_hand: u64,
    },
}

/// The lazy sequence of trial events for a run.
pub struct Trials<G: Game> {
    game: G,
    config: SimConfig,
    rng: SmallRng,
    next_hand: u64,
    chunk_end: Option<TrialEvent<G::Outcome>>,
    failed: bool,
}

impl<G: Game> Trials<G> {
    /// Creates the runner for a validated configuration.
    pub fn new(game: G, config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            game,
            config: *config,
            rng: SmallRng::seed_from_u64(chunk_seed(config.seed, 1)),
            next_hand: 1,
            chunk_end: None,
            failed: false,
        })
    }
}

impl<G: Game> Iterator for Trials<G> {
    type Item = Result<TrialEvent<G::Outcome>, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(end) = self.chunk_end.take() {
            return Some(Ok(end));
        }

        if self.next_hand > self.config.total_hands {
            return None;
        }

        let hand_index = self.next_hand;
        self.next_hand += 1;

        let chunk_index = (hand_index - 1) / self.config.chunk_size + 1;
        let (first_hand, last_hand) = self.config.chunk_bounds(chunk_index);

        // The constructor seeded chunk 1.
        if hand_index == first_hand && chunk_index > 1 {
            self.rng = SmallRng::seed_from_u64(chunk_seed(self.config.seed, chunk_index));
        }

        let hand = match self.game.deal(&mut self.rng) {
            Ok(hand) => hand,
            Err(source) => {
                self.failed = true;
                return Some(Err(SimError::ExhaustedDeck { hand_index, source }));
            }
        };

        let outcome = match self.game.classify(&hand) {
            Ok(outcome) => outcome,
            Err(violation) => {
                self.failed = true;
                return Some(Err(SimError::ClassifierContract {
                    hand_index,
                    violation,
                }));
            }
        };

        if hand_index == last_hand {
            self.chunk_end = Some(TrialEvent::ChunkEnd {
                chunk_index,
                first_hand,
                last_hand,
            });
        }

        Some(Ok(TrialEvent::Hand {
            hand_index,
            chunk_index,
            outcome,
        }))
    }
}

/// Runs the full simulation and returns the final report.
pub fn simulate<G: Game>(game: G, config: &SimConfig) -> Result<Report, SimError> {
    let mut agg = StatsAggregator::<G::Outcome>::new();
    for event in Trials::new(game, config)? {
        let event = event?;
        if let TrialEvent::ChunkEnd {
            chunk_index,
            last_hand,
            ..
        } = &event
        {
            debug!("chunk {chunk_index} complete at hand {last_hand}");
        }

        agg.observe(&event);
    }

    Ok(agg.finish())
}

/// Derives the RNG seed of a chunk, SplitMix64 over the run seed.
fn chunk_seed(seed: u64, chunk_index: u64) -> u64 {
    let mut z = seed.wrapping_add(chunk_index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel simulation driver.
//!
//! Chunks are independently seeded, so workers can simulate whole chunks
//! concurrently and the merged, chunk ordered event stream is identical
//! to the sequential one. The aggregator itself still consumes a single
//! ordered stream.
//!
//! Workers buffer only the hits of their chunks, each chunk marker covers
//! the misses through its hand range, so the memory held until the merge
//! is proportional to the number of hits rather than the number of hands.
use rand::prelude::*;
use std::thread;

use super::{TrialEvent, chunk_seed};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::game::{Game, Outcome};
use crate::stats::{Report, StatsAggregator};

/// Runs the full simulation over `num_tasks` worker threads.
///
/// Produces the same report as [simulate](super::simulate) for a given
/// configuration.
pub fn par_simulate<G>(game: &G, config: &SimConfig, num_tasks: usize) -> Result<Report, SimError>
where
    G: Game + Clone + Sync,
{
    assert!(num_tasks > 0);
    config.validate()?;

    let num_chunks = config.num_chunks();
    let mut chunk_events = Vec::with_capacity(num_chunks as usize);

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(num_tasks);
        for task_id in 0..num_tasks {
            handles.push(s.spawn(move || {
                // Worker task_id simulates chunks task_id + 1, task_id + 1 + n, ...
                let mut worker = Vec::new();
                let mut game = game.clone();
                for chunk_index in (task_id as u64 + 1..=num_chunks).step_by(num_tasks) {
                    let events = run_chunk(&mut game, config, chunk_index)?;
                    worker.push((chunk_index, events));
                }

                Ok::<_, SimError>(worker)
            }));
        }

        for handle in handles {
            let worker = handle.join().expect("simulation worker panicked")?;
            chunk_events.extend(worker);
        }

        Ok::<_, SimError>(())
    })?;

    // Restore the total order before feeding the aggregator.
    chunk_events.sort_unstable_by_key(|(chunk_index, _)| *chunk_index);

    let mut agg = StatsAggregator::<G::Outcome>::new();
    for (_, events) in &chunk_events {
        for event in events {
            agg.observe(event);
        }
    }

    Ok(agg.finish())
}

/// Simulates one chunk and returns its hit events and chunk marker.
fn run_chunk<G: Game>(
    game: &mut G,
    config: &SimConfig,
    chunk_index: u64,
) -> Result<Vec<TrialEvent<G::Outcome>>, SimError> {
    let (first_hand, last_hand) = config.chunk_bounds(chunk_index);
    let mut rng = SmallRng::seed_from_u64(chunk_seed(config.seed, chunk_index));

    let mut events = Vec::new();
    for hand_index in first_hand..=last_hand {
        let hand = game
            .deal(&mut rng)
            .map_err(|source| SimError::ExhaustedDeck { hand_index, source })?;

        let outcome = game
            .classify(&hand)
            .map_err(|violation| SimError::ClassifierContract {
                hand_index,
                violation,
            })?;

        if outcome.is_hit() {
            events.push(TrialEvent::Hand {
                hand_index,
                chunk_index,
                outcome,
            });
        }
    }

    events.push(TrialEvent::ChunkEnd {
        chunk_index,
        first_hand,
        last_hand,
    });

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::BlackjackGame;
    use crate::holdem::HoldemGame;
    use crate::runner::simulate;

    #[test]
    fn matches_sequential_driver() {
        let config = SimConfig::new(5_000, 750, 17).unwrap();

        let seq = simulate(HoldemGame::new(), &config).unwrap();
        let par = par_simulate(&HoldemGame::new(), &config, 4).unwrap();
        assert_eq!(seq, par);

        let seq = simulate(BlackjackGame::new(), &config).unwrap();
        let par = par_simulate(&BlackjackGame::new(), &config, 3).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn chunks_buffer_only_hits() {
        let config = SimConfig::new(2_000, 2_000, 9).unwrap();
        let mut game = HoldemGame::new();
        let events = run_chunk(&mut game, &config, 1).unwrap();

        // The marker closes the chunk and the misses are never buffered,
        // so ~1 in 39 full houses dominates the buffer size.
        assert!(matches!(
            events.last(),
            Some(TrialEvent::ChunkEnd {
                chunk_index: 1,
                first_hand: 1,
                last_hand: 2_000,
            })
        ));
        for event in &events[..events.len() - 1] {
            match event {
                TrialEvent::Hand { outcome, .. } => assert!(outcome.is_hit()),
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert!(events.len() < 200);
    }

    #[test]
    fn more_tasks_than_chunks() {
        let config = SimConfig::new(100, 100, 3).unwrap();

        let seq = simulate(HoldemGame::new(), &config).unwrap();
        let par = par_simulate(&HoldemGame::new(), &config, 8).unwrap();
        assert_eq!(seq, par);
    }
}

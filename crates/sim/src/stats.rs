// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Streaming statistics over the trial event sequence.
//!
//! [StatsAggregator] consumes the runner's events exactly once, in hand
//! order, keeping per category running counts, wait times, and drought
//! tracking in bounded state, and turns them into an immutable [Report]
//! at the end of the stream.
//!
//! Wait time percentiles are exact: every wait sample is retained (one
//! `u64` per hit) and order statistics are interpolated once at
//! [StatsAggregator::finish]. At the target scale of 10^8 hands the most
//! frequent tracked category stays in the tens of megabytes, so no
//! streaming approximation is used.
use serde::Serialize;
use std::marker::PhantomData;

use crate::game::Outcome;
use crate::runner::TrialEvent;

/// The final, immutable result of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Hands processed, equals the configured total unless the run was
    /// stopped early.
    pub total_hands: u64,
    /// Per category statistics in reporting order.
    pub categories: Vec<CategoryStats>,
    /// Per chunk hit counts in chunk order.
    pub chunks: Vec<ChunkSummary>,
}

impl Report {
    /// Looks up a category by label.
    pub fn category(&self, label: &str) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| c.label == label)
    }
}

/// Statistics for one outcome category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    /// The category label.
    pub label: String,
    /// Total number of hits.
    pub hits: u64,
    /// Hands elapsed before each hit, in hit order. The first wait counts
    /// from the start of the run.
    pub wait_times: Vec<u64>,
    /// Derived wait time statistics, absent when the category never hit.
    pub waits: Option<WaitStats>,
    /// The longest wait, open ended when the category never hit.
    pub drought: Drought,
}

impl CategoryStats {
    /// Hands per hit, `None` when the category never hit.
    pub fn one_in(&self, total_hands: u64) -> Option<f64> {
        (self.hits > 0).then(|| total_hands as f64 / self.hits as f64)
    }
}

/// Derived wait time statistics for a category with at least one hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaitStats {
    /// Shortest wait.
    pub min: u64,
    /// Longest wait.
    pub max: u64,
    /// Mean wait.
    pub mean: f64,
    /// Sample standard deviation of the waits, zero for a single hit.
    pub std_dev: f64,
    /// Wait time percentiles.
    pub percentiles: Percentiles,
}

/// Wait time percentiles, linearly interpolated between order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentiles {
    /// 25th percentile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// 75th percentile.
    pub p75: f64,
    /// 90th percentile.
    pub p90: f64,
    /// 95th percentile.
    pub p95: f64,
    /// 99th percentile.
    pub p99: f64,
}

/// The longest observed gap between hits of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Drought {
    /// Longest completed wait between hits.
    Longest(u64),
    /// The category never hit over this many elapsed hands.
    Open(u64),
}

/// Hit counts for one completed chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    /// The 1-based chunk.
    pub chunk_index: u64,
    /// First hand of the chunk.
    pub first_hand: u64,
    /// Last hand of the chunk.
    pub last_hand: u64,
    /// Hits per category within the chunk, in reporting order.
    pub hits: Vec<u64>,
}

/// Running state for one category.
#[derive(Debug, Default)]
struct CategoryAcc {
    count: u64,
    last_hit: u64,
    max_wait: u64,
    waits: Vec<u64>,
    // Welford running mean and squared distance.
    mean: f64,
    m2: f64,
}

impl CategoryAcc {
    fn record(&mut self, hand_index: u64) {
        let wait = hand_index - self.last_hit;
        self.count += 1;
        self.last_hit = hand_index;
        self.max_wait = self.max_wait.max(wait);
        self.waits.push(wait);

        let delta = wait as f64 - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (wait as f64 - self.mean);
    }
}

/// Consumes the trial event sequence and produces the [Report].
///
/// Assumes a single ordered producer; feed events strictly in the order
/// the runner yields them.
pub struct StatsAggregator<O: Outcome> {
    cats: Vec<CategoryAcc>,
    chunks: Vec<ChunkSummary>,
    // Per category counts at the previous chunk boundary.
    chunk_base: Vec<u64>,
    hands_seen: u64,
    _outcome: PhantomData<O>,
}

impl<O: Outcome> StatsAggregator<O> {
    /// Creates an empty aggregator for the outcome categories of a game.
    pub fn new() -> Self {
        let num_cats = O::CATEGORIES.len();
        Self {
            cats: (0..num_cats).map(|_| CategoryAcc::default()).collect(),
            chunks: Vec::new(),
            chunk_base: vec![0; num_cats],
            hands_seen: 0,
            _outcome: PhantomData,
        }
    }

    /// Folds one event into the running statistics.
    pub fn observe(&mut self, event: &TrialEvent<O>) {
        match event {
            TrialEvent::Hand {
                hand_index,
                outcome,
                ..
            } => {
                self.hands_seen = *hand_index;
                if let Some(idx) = outcome.category() {
                    self.cats[idx].record(*hand_index);
                }
            }
            TrialEvent::ChunkEnd {
                chunk_index,
                first_hand,
                last_hand,
            } => {
                // A marker covers every hand of its chunk, so a stream
                // carrying only hits still accounts for the misses.
                self.hands_seen = *last_hand;

                let hits = self
                    .cats
                    .iter()
                    .zip(&self.chunk_base)
                    .map(|(cat, base)| cat.count - base)
                    .collect::<Vec<_>>();

                for (base, cat) in self.chunk_base.iter_mut().zip(&self.cats) {
                    *base = cat.count;
                }

                self.chunks.push(ChunkSummary {
                    chunk_index: *chunk_index,
                    first_hand: *first_hand,
                    last_hand: *last_hand,
                    hits,
                });
            }
        }
    }

    /// Running hit counts by category label.
    pub fn hit_counts(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        O::CATEGORIES
            .iter()
            .zip(&self.cats)
            .map(|(&label, cat)| (label, cat.count))
    }

    /// Completes the stream and emits the report.
    ///
    /// Valid after any prefix of the event sequence, so a cancelled run
    /// still reports exactly the hands processed so far.
    pub fn finish(self) -> Report {
        let categories = O::CATEGORIES
            .iter()
            .zip(self.cats)
            .map(|(&label, mut cat)| {
                let (waits, drought) = if cat.count == 0 {
                    (None, Drought::Open(self.hands_seen))
                } else {
                    let mut sorted = cat.waits.clone();
                    sorted.sort_unstable();

                    let std_dev = if cat.count > 1 {
                        (cat.m2 / (cat.count - 1) as f64).sqrt()
                    } else {
                        0.0
                    };

                    let stats = WaitStats {
                        min: sorted[0],
                        max: sorted[sorted.len() - 1],
                        mean: cat.mean,
                        std_dev,
                        percentiles: Percentiles {
                            p25: percentile(&sorted, 25.0),
                            p50: percentile(&sorted, 50.0),
                            p75: percentile(&sorted, 75.0),
                            p90: percentile(&sorted, 90.0),
                            p95: percentile(&sorted, 95.0),
                            p99: percentile(&sorted, 99.0),
                        },
                    };

                    (Some(stats), Drought::Longest(cat.max_wait))
                };

                CategoryStats {
                    label: label.to_string(),
                    hits: cat.count,
                    wait_times: std::mem::take(&mut cat.waits),
                    waits,
                    drought,
                }
            })
            .collect();

        Report {
            total_hands: self.hands_seen,
            categories,
            chunks: self.chunks,
        }
    }
}

impl<O: Outcome> Default for StatsAggregator<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpolates the q-th percentile between order statistics.
fn percentile(sorted: &[u64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    sorted[lo] as f64 + (sorted[hi] - sorted[lo]) as f64 * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A two category outcome for scripting aggregator streams.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scripted {
        A,
        B,
        Miss,
    }

    impl Outcome for Scripted {
        const CATEGORIES: &'static [&'static str] = &["A", "B"];

        fn category(&self) -> Option<usize> {
            match self {
                Scripted::A => Some(0),
                Scripted::B => Some(1),
                Scripted::Miss => None,
            }
        }
    }

    /// Streams `total` hands hitting category A at the given indices,
    /// with chunk markers every `chunk_size` hands.
    fn run_scripted(total: u64, chunk_size: u64, hits_a: &[u64]) -> Report {
        let mut agg = StatsAggregator::<Scripted>::new();

        for hand_index in 1..=total {
            let outcome = if hits_a.contains(&hand_index) {
                Scripted::A
            } else {
                Scripted::Miss
            };

            let chunk_index = (hand_index - 1) / chunk_size + 1;
            agg.observe(&TrialEvent::Hand {
                hand_index,
                chunk_index,
                outcome,
            });

            if hand_index % chunk_size == 0 || hand_index == total {
                agg.observe(&TrialEvent::ChunkEnd {
                    chunk_index,
                    first_hand: (chunk_index - 1) * chunk_size + 1,
                    last_hand: hand_index,
                });
            }
        }

        agg.finish()
    }

    #[test]
    fn wait_times_and_drought() {
        let report = run_scripted(20, 5, &[3, 5, 10, 18]);
        let a = report.category("A").unwrap();

        assert_eq!(a.hits, 4);
        assert_eq!(a.wait_times, vec![3, 2, 5, 8]);
        assert_eq!(a.drought, Drought::Longest(8));

        // The waits sum to the last hit index.
        assert_eq!(a.wait_times.iter().sum::<u64>(), 18);

        let waits = a.waits.unwrap();
        assert_eq!(waits.min, 2);
        assert_eq!(waits.max, 8);
        assert!((waits.mean - 4.5).abs() < 1e-12);

        // Sample std dev of [3, 2, 5, 8].
        assert!((waits.std_dev - 2.645_751_311_064_590_7).abs() < 1e-9);
    }

    #[test]
    fn zero_hit_category_is_absent_not_zero() {
        let report = run_scripted(20, 5, &[3]);
        let b = report.category("B").unwrap();

        assert_eq!(b.hits, 0);
        assert!(b.waits.is_none());
        assert!(b.wait_times.is_empty());
        assert_eq!(b.drought, Drought::Open(20));
    }

    #[test]
    fn chunk_deltas_sum_to_totals() {
        let report = run_scripted(23, 5, &[1, 4, 5, 11, 21, 23]);

        assert_eq!(report.chunks.len(), 5);
        assert_eq!(report.chunks[4].first_hand, 21);
        assert_eq!(report.chunks[4].last_hand, 23);

        let per_chunk_a = report.chunks.iter().map(|c| c.hits[0]).collect::<Vec<_>>();
        assert_eq!(per_chunk_a, vec![3, 0, 1, 1, 2]);

        let a = report.category("A").unwrap();
        assert_eq!(per_chunk_a.iter().sum::<u64>(), a.hits);
    }

    #[test]
    fn percentile_interpolation() {
        let sorted = vec![1, 2, 3, 4];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
        assert_eq!(percentile(&sorted, 25.0), 1.75);

        // A single sample pins every percentile.
        let single = vec![10];
        assert_eq!(percentile(&single, 25.0), 10.0);
        assert_eq!(percentile(&single, 99.0), 10.0);
    }

    #[test]
    fn percentiles_are_monotonic() {
        let report = run_scripted(100, 10, &[2, 3, 9, 20, 21, 40, 77, 90]);
        let p = report.category("A").unwrap().waits.unwrap().percentiles;

        assert!(p.p25 <= p.p50);
        assert!(p.p50 <= p.p75);
        assert!(p.p75 <= p.p90);
        assert!(p.p90 <= p.p95);
        assert!(p.p95 <= p.p99);
    }

    #[test]
    fn chunk_marker_advances_hands_seen() {
        // A stream of hits and chunk markers with the misses elided, as
        // produced by the parallel driver.
        let mut agg = StatsAggregator::<Scripted>::new();
        agg.observe(&TrialEvent::Hand {
            hand_index: 3,
            chunk_index: 1,
            outcome: Scripted::A,
        });
        agg.observe(&TrialEvent::ChunkEnd {
            chunk_index: 1,
            first_hand: 1,
            last_hand: 50,
        });

        let report = agg.finish();
        assert_eq!(report.total_hands, 50);
        assert_eq!(report.category("A").unwrap().hits, 1);
        assert_eq!(report.category("B").unwrap().drought, Drought::Open(50));
    }

    #[test]
    fn partial_stream_reports_hands_seen() {
        let mut agg = StatsAggregator::<Scripted>::new();
        for hand_index in 1..=7 {
            agg.observe(&TrialEvent::Hand {
                hand_index,
                chunk_index: 1,
                outcome: Scripted::Miss,
            });
        }

        let report = agg.finish();
        assert_eq!(report.total_hands, 7);
        assert_eq!(report.category("A").unwrap().drought, Drought::Open(7));
        assert!(report.chunks.is_empty());
    }
}

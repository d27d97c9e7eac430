// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Simulation run configuration.
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Total number of hands to simulate.
    pub total_hands: u64,
    /// Number of hands per chunk.
    pub chunk_size: u64,
    /// Seed for the simulation RNG streams.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a validated configuration.
    pub fn new(total_hands: u64, chunk_size: u64, seed: u64) -> Result<Self, SimError> {
        let config = Self {
            total_hands,
            chunk_size,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration bounds.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.total_hands == 0 {
            Err(SimError::InvalidConfig(
                "total_hands must be positive".to_string(),
            ))
        } else if self.chunk_size == 0 {
            Err(SimError::InvalidConfig(
                "chunk_size must be positive".to_string(),
            ))
        } else if self.chunk_size > self.total_hands {
            Err(SimError::InvalidConfig(format!(
                "chunk_size {} exceeds total_hands {}",
                self.chunk_size, self.total_hands
            )))
        } else {
            Ok(())
        }
    }

    /// Number of chunks in the run, the last one may be partial.
    pub fn num_chunks(&self) -> u64 {
        self.total_hands.div_ceil(self.chunk_size)
    }

    /// Inclusive hand range of a 1-based chunk.
    pub(crate) fn chunk_bounds(&self, chunk_index: u64) -> (u64, u64) {
        let first = (chunk_index - 1) * self.chunk_size + 1;
        let last = (chunk_index * self.chunk_size).min(self.total_hands);
        (first, last)
    }
}

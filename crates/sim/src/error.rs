// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Simulation errors.
//!
//! All of these are programming defects rather than transient conditions,
//! a run that hits one aborts and reports the offending hand.
use thiserror::Error;

use sidebet_cards::ExhaustedDeck;

/// A fatal simulation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The run configuration was rejected before any hand was dealt.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A dealing rule asked for more cards than the deck holds.
    #[error("deck exhausted at hand {hand_index}: {source}")]
    ExhaustedDeck {
        /// The hand being dealt when the deck ran out.
        hand_index: u64,
        /// The failed deal.
        source: ExhaustedDeck,
    },
    /// A classifier produced an inconsistent set of category matches.
    #[error("classifier contract violated at hand {hand_index}: {violation}")]
    ClassifierContract {
        /// The hand being classified.
        hand_index: u64,
        /// The broken invariant.
        violation: ContractViolation,
    },
}

/// A broken internal invariant reported by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ContractViolation(pub &'static str);

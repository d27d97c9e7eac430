// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game and outcome capabilities shared by the simulated side bets.
use rand::Rng;
use std::fmt;

use sidebet_cards::ExhaustedDeck;

use crate::error::ContractViolation;

/// A closed, ordered set of mutually exclusive outcome categories.
///
/// Categories are listed by `CATEGORIES` in reporting order, one index per
/// paying category; the no-hit outcome maps to `None`.
pub trait Outcome: Copy + Eq + fmt::Debug + Send + 'static {
    /// Labels of the paying categories.
    const CATEGORIES: &'static [&'static str];

    /// Index of this outcome into [Self::CATEGORIES], `None` for no hit.
    fn category(&self) -> Option<usize>;

    /// Checks if this outcome pays.
    fn is_hit(&self) -> bool {
        self.category().is_some()
    }
}

/// A side bet game: a dealing rule plus a hand classifier.
///
/// A game owns its deck exclusively, each deal reshuffles it in full so
/// hands are independent. The hand type only lives for the classification
/// of a single trial.
pub trait Game {
    /// The cards relevant to one trial classification.
    type Hand;
    /// The game outcome categories.
    type Outcome: Outcome;

    /// The game display name.
    fn name(&self) -> &'static str;

    /// Reshuffles and deals the cards for one hand.
    fn deal<R: Rng>(&mut self, rng: &mut R) -> Result<Self::Hand, ExhaustedDeck>;

    /// Returns the single highest precedence category the hand achieves.
    ///
    /// Deterministic: identical cards always yield the identical category.
    /// Fails only when an internal exclusivity invariant is broken.
    fn classify(&self, hand: &Self::Hand) -> Result<Self::Outcome, ContractViolation>;
}

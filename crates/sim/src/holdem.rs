// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Ultimate Texas Hold'em progressive side bet.
//!
//! Each trial deals two hole cards and five community cards from a fresh
//! 52 cards deck and classifies the best outcome over all seven cards.
//! The community royal is a separate, higher paying tier than a royal
//! flush that uses hole cards, and triggers only when the five community
//! cards alone form the royal.
use rand::Rng;

use sidebet_cards::{Card, Deck, ExhaustedDeck, Rank};

use crate::error::ContractViolation;
use crate::game::{Game, Outcome};

/// Rank bits for {T, J, Q, K, A}, bit position is the rank value.
const ROYAL_MASK: u16 = 0b11111 << Rank::Ten as usize;

/// Outcome categories of the hold'em side bet, highest payout first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PokerOutcome {
    /// Royal flush using at least one hole card, pays the progressive.
    RoyalFlush,
    /// Royal flush entirely on the community cards.
    CommunityRoyal,
    /// Straight flush.
    StraightFlush,
    /// Four of a kind.
    FourOfAKind,
    /// Full house.
    FullHouse,
    /// No paying hand.
    NoHit,
}

impl Outcome for PokerOutcome {
    const CATEGORIES: &'static [&'static str] = &[
        "Royal Flush",
        "Community Royal",
        "Straight Flush",
        "Four of a Kind",
        "Full House",
    ];

    fn category(&self) -> Option<usize> {
        match self {
            PokerOutcome::RoyalFlush => Some(0),
            PokerOutcome::CommunityRoyal => Some(1),
            PokerOutcome::StraightFlush => Some(2),
            PokerOutcome::FourOfAKind => Some(3),
            PokerOutcome::FullHouse => Some(4),
            PokerOutcome::NoHit => None,
        }
    }
}

/// One dealt hold'em trial.
#[derive(Debug, Clone, Copy)]
pub struct HoldemHand {
    /// The player hole cards.
    pub hole: [Card; 2],
    /// The shared community cards.
    pub community: [Card; 5],
}

impl HoldemHand {
    /// Creates a hand from dealt cards.
    pub fn new(hole: [Card; 2], community: [Card; 5]) -> Self {
        Self { hole, community }
    }

    fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.hole.iter().chain(self.community.iter()).copied()
    }
}

/// The hold'em progressive side bet game.
#[derive(Debug, Clone)]
pub struct HoldemGame {
    deck: Deck,
}

impl HoldemGame {
    /// Creates the game with its own deck.
    pub fn new() -> Self {
        Self { deck: Deck::new() }
    }
}

impl Default for HoldemGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for HoldemGame {
    type Hand = HoldemHand;
    type Outcome = PokerOutcome;

    fn name(&self) -> &'static str {
        "Ultimate Texas Hold'em progressive"
    }

    fn deal<R: Rng>(&mut self, rng: &mut R) -> Result<HoldemHand, ExhaustedDeck> {
        self.deck.shuffle(rng);

        let hole = [self.deck.deal()?, self.deck.deal()?];
        let mut community = [hole[0]; 5];
        for card in community.iter_mut() {
            *card = self.deck.deal()?;
        }

        Ok(HoldemHand { hole, community })
    }

    fn classify(&self, hand: &HoldemHand) -> Result<PokerOutcome, ContractViolation> {
        // Rank multiplicities and per suit rank bitmasks over all 7 cards,
        // bit position is the rank value 2..=14.
        let mut rank_counts = [0u8; 15];
        let mut suit_masks = [0u16; 4];
        for card in hand.cards() {
            rank_counts[card.rank().value() as usize] += 1;
            suit_masks[card.suit() as usize] |= 1 << card.rank().value();
        }

        let community_royal = is_community_royal(&hand.community);
        let royal = suit_masks.iter().any(|&m| m & ROYAL_MASK == ROYAL_MASK);
        let straight_flush = suit_masks.iter().any(|&m| has_straight(m));

        // A community royal is a royal over the 7 cards, and any royal is a
        // straight flush; a miss means the detectors disagree.
        if community_royal && !royal {
            return Err(ContractViolation("community royal with no 7 card royal"));
        } else if royal && !straight_flush {
            return Err(ContractViolation("royal flush with no straight flush"));
        }

        // Two highest rank multiplicities.
        let (mut first, mut second) = (0u8, 0u8);
        for &n in rank_counts.iter().filter(|&&n| n > 0) {
            if n >= first {
                (first, second) = (n, first);
            } else if n > second {
                second = n;
            }
        }
        let quads = first >= 4;
        let full_house = first >= 3 && second >= 2;

        let outcome = if community_royal {
            PokerOutcome::CommunityRoyal
        } else if royal {
            PokerOutcome::RoyalFlush
        } else if straight_flush {
            PokerOutcome::StraightFlush
        } else if quads {
            PokerOutcome::FourOfAKind
        } else if full_house {
            PokerOutcome::FullHouse
        } else {
            PokerOutcome::NoHit
        };

        Ok(outcome)
    }
}

/// Checks if the five community cards alone are a royal flush.
fn is_community_royal(community: &[Card; 5]) -> bool {
    let suit = community[0].suit();
    if community.iter().any(|c| c.suit() != suit) {
        return false;
    }

    let mask = community
        .iter()
        .fold(0u16, |m, c| m | 1 << c.rank().value());
    mask == ROYAL_MASK
}

/// Checks a suit rank mask for five consecutive ranks, ace high or low.
fn has_straight(mask: u16) -> bool {
    // The ace also plays low in the A-2-3-4-5 wheel.
    let mask = mask | (mask >> (Rank::Ace as usize) << 1);
    (1..=Rank::Ten as usize).any(|lo| mask & (0b11111 << lo) == 0b11111 << lo)
}

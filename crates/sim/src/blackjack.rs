// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Blackjack A/J progressive side bet.
//!
//! Each trial shuffles a multi deck shoe and deals two cards each to the
//! player and the dealer, alternating player first. Only these first two
//! cards matter: the side bet pays on the player holding an Ace and a
//! Jack, with the progressive tiers comparing the player pair against the
//! dealer pair, and a consolation tier for any other two card 21.
use rand::Rng;

use sidebet_cards::{Card, ExhaustedDeck, Rank, Shoe};

use crate::error::ContractViolation;
use crate::game::{Game, Outcome};

/// Outcome categories of the blackjack side bet, highest payout first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackjackOutcome {
    /// Player and dealer both hold a suited A/J.
    MajorJackpot,
    /// Player holds a suited A/J, dealer an unsuited A/J.
    MinorJackpot,
    /// Player holds an A/J of one suit.
    SuitedAJ,
    /// Player holds an A/J of different suits in the same color.
    SameColorAJ,
    /// Player holds an A/J of mixed colors.
    AnyAJ,
    /// Player holds any other two card 21.
    Blackjack,
    /// No paying hand.
    NoHit,
}

impl Outcome for BlackjackOutcome {
    const CATEGORIES: &'static [&'static str] = &[
        "Major Progressive",
        "Minor Progressive",
        "Suited A/J",
        "Same Color A/J",
        "Any A/J",
        "Blackjack",
    ];

    fn category(&self) -> Option<usize> {
        match self {
            BlackjackOutcome::MajorJackpot => Some(0),
            BlackjackOutcome::MinorJackpot => Some(1),
            BlackjackOutcome::SuitedAJ => Some(2),
            BlackjackOutcome::SameColorAJ => Some(3),
            BlackjackOutcome::AnyAJ => Some(4),
            BlackjackOutcome::Blackjack => Some(5),
            BlackjackOutcome::NoHit => None,
        }
    }
}

/// The first two cards of each participant.
#[derive(Debug, Clone, Copy)]
pub struct BlackjackHand {
    /// The player cards.
    pub player: [Card; 2],
    /// The dealer cards.
    pub dealer: [Card; 2],
}

impl BlackjackHand {
    /// Creates a hand from dealt cards.
    pub fn new(player: [Card; 2], dealer: [Card; 2]) -> Self {
        Self { player, dealer }
    }
}

/// The blackjack progressive side bet game.
#[derive(Debug, Clone)]
pub struct BlackjackGame {
    shoe: Shoe,
}

impl BlackjackGame {
    /// Number of decks in the shoe as dealt at the tables.
    pub const DEFAULT_DECKS: usize = 6;

    /// Creates the game with the default six decks shoe.
    pub fn new() -> Self {
        Self::with_decks(Self::DEFAULT_DECKS)
    }

    /// Creates the game with a custom shoe size.
    pub fn with_decks(num_decks: usize) -> Self {
        Self {
            shoe: Shoe::new(num_decks),
        }
    }
}

impl Default for BlackjackGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BlackjackGame {
    type Hand = BlackjackHand;
    type Outcome = BlackjackOutcome;

    fn name(&self) -> &'static str {
        "Blackjack A/J progressive"
    }

    fn deal<R: Rng>(&mut self, rng: &mut R) -> Result<BlackjackHand, ExhaustedDeck> {
        self.shoe.shuffle(rng);

        // Player and dealer receive alternating cards, player first.
        let p1 = self.shoe.deal()?;
        let d1 = self.shoe.deal()?;
        let p2 = self.shoe.deal()?;
        let d2 = self.shoe.deal()?;

        Ok(BlackjackHand {
            player: [p1, p2],
            dealer: [d1, d2],
        })
    }

    fn classify(&self, hand: &BlackjackHand) -> Result<BlackjackOutcome, ContractViolation> {
        let player_aj = is_ace_jack(&hand.player);
        let player_suited_aj = player_aj && is_suited(&hand.player);
        let dealer_aj = is_ace_jack(&hand.dealer);
        let dealer_suited_aj = dealer_aj && is_suited(&hand.dealer);

        let outcome = if player_suited_aj && dealer_suited_aj {
            BlackjackOutcome::MajorJackpot
        } else if player_suited_aj && dealer_aj {
            BlackjackOutcome::MinorJackpot
        } else if player_suited_aj {
            BlackjackOutcome::SuitedAJ
        } else if player_aj && is_same_color(&hand.player) {
            BlackjackOutcome::SameColorAJ
        } else if player_aj {
            BlackjackOutcome::AnyAJ
        } else if is_blackjack(&hand.player) {
            BlackjackOutcome::Blackjack
        } else {
            BlackjackOutcome::NoHit
        };

        // Every paying tier implies a player two card 21, and the jackpot
        // tiers imply one for the dealer as well.
        if outcome.is_hit() && !is_blackjack(&hand.player) {
            return Err(ContractViolation("paying tier without a player 21"));
        }

        let jackpot = matches!(
            outcome,
            BlackjackOutcome::MajorJackpot | BlackjackOutcome::MinorJackpot
        );
        if jackpot && !is_blackjack(&hand.dealer) {
            return Err(ContractViolation("jackpot tier without a dealer 21"));
        }

        Ok(outcome)
    }
}

/// Checks for one Ace and one Jack.
fn is_ace_jack(pair: &[Card; 2]) -> bool {
    let ranks = [pair[0].rank(), pair[1].rank()];
    ranks.contains(&Rank::Ace) && ranks.contains(&Rank::Jack)
}

/// Checks for an Ace with any ten valued card.
fn is_blackjack(pair: &[Card; 2]) -> bool {
    (pair[0].rank() == Rank::Ace && pair[1].is_ten_value())
        || (pair[1].rank() == Rank::Ace && pair[0].is_ten_value())
}

fn is_suited(pair: &[Card; 2]) -> bool {
    pair[0].suit() == pair[1].suit()
}

/// Different suits of the same color family.
fn is_same_color(pair: &[Card; 2]) -> bool {
    !is_suited(pair) && pair[0].color() == pair[1].color()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use sidebet_cards::Suit;

    fn classify(player: [Card; 2], dealer: [Card; 2]) -> BlackjackOutcome {
        BlackjackGame::new()
            .classify(&BlackjackHand::new(player, dealer))
            .unwrap()
    }

    fn aj(suit_a: Suit, suit_j: Suit) -> [Card; 2] {
        [Card::new(Rank::Ace, suit_a), Card::new(Rank::Jack, suit_j)]
    }

    fn off_pair() -> [Card; 2] {
        [
            Card::new(Rank::Nine, Suit::Clubs),
            Card::new(Rank::Four, Suit::Hearts),
        ]
    }

    #[test]
    fn major_jackpot_both_suited() {
        use Suit::*;
        let outcome = classify(aj(Spades, Spades), aj(Hearts, Hearts));
        assert_eq!(outcome, BlackjackOutcome::MajorJackpot);
    }

    #[test]
    fn minor_jackpot_suited_vs_unsuited() {
        use Suit::*;

        // Dealer A/J of different suits, even same color, is the minor.
        let outcome = classify(aj(Spades, Spades), aj(Hearts, Diamonds));
        assert_eq!(outcome, BlackjackOutcome::MinorJackpot);

        let outcome = classify(aj(Spades, Spades), aj(Hearts, Clubs));
        assert_eq!(outcome, BlackjackOutcome::MinorJackpot);
    }

    #[test]
    fn suited_aj_without_dealer_pair() {
        use Suit::*;

        let outcome = classify(aj(Spades, Spades), off_pair());
        assert_eq!(outcome, BlackjackOutcome::SuitedAJ);

        // A dealer 21 that is not an A/J does not demote the player tier.
        let dealer = [
            Card::new(Rank::Ace, Hearts),
            Card::new(Rank::King, Hearts),
        ];
        let outcome = classify(aj(Spades, Spades), dealer);
        assert_eq!(outcome, BlackjackOutcome::SuitedAJ);
    }

    #[test]
    fn same_color_and_mixed_aj() {
        use Suit::*;

        let outcome = classify(aj(Hearts, Diamonds), off_pair());
        assert_eq!(outcome, BlackjackOutcome::SameColorAJ);

        let outcome = classify(aj(Clubs, Spades), off_pair());
        assert_eq!(outcome, BlackjackOutcome::SameColorAJ);

        let outcome = classify(aj(Spades, Hearts), off_pair());
        assert_eq!(outcome, BlackjackOutcome::AnyAJ);
    }

    #[test]
    fn blackjack_without_jack() {
        use Suit::*;

        for rank in [Rank::Ten, Rank::Queen, Rank::King] {
            let player = [Card::new(rank, Spades), Card::new(Rank::Ace, Spades)];
            assert_eq!(classify(player, off_pair()), BlackjackOutcome::Blackjack);
        }

        // Dealer blackjack alone pays nothing.
        let outcome = classify(off_pair(), aj(Spades, Spades));
        assert_eq!(outcome, BlackjackOutcome::NoHit);

        // Two aces is 12, not 21.
        let player = [Card::new(Rank::Ace, Spades), Card::new(Rank::Ace, Hearts)];
        assert_eq!(classify(player, off_pair()), BlackjackOutcome::NoHit);
    }

    #[test]
    fn deal_takes_four_cards_from_the_shoe() {
        let mut rng = SmallRng::seed_from_u64(11);

        let mut game = BlackjackGame::new();
        let _ = game.deal(&mut rng).unwrap();
        assert_eq!(game.shoe.remaining(), 6 * 52 - 4);

        let mut game = BlackjackGame::with_decks(1);
        let _ = game.deal(&mut rng).unwrap();
        assert_eq!(game.shoe.remaining(), 48);
    }
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards, decks and shoes.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A playing card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card rank.
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the card suit.
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card color.
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// Checks if this card counts ten towards a blackjack total.
    pub const fn is_ten_value(&self) -> bool {
        matches!(self.rank, Rank::Ten | Rank::Jack | Rank::Queen | Rank::King)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks in ascending order.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank numeric value, 2 for deuce up to 14 for the ace.
    pub const fn value(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// Returns the suit color family.
    pub const fn color(&self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// Suit color family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Hearts and diamonds.
    Red,
    /// Clubs and spades.
    Black,
}

/// Error dealing more cards than remain in a deck or shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustedDeck {
    /// Cards requested by the failed deal.
    pub requested: usize,
    /// Cards left when the deal failed.
    pub remaining: usize,
}

impl fmt::Display for ExhaustedDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deal of {} cards with {} remaining",
            self.requested, self.remaining
        )
    }
}

impl std::error::Error for ExhaustedDeck {}

/// A 52 cards deck.
///
/// Cards are dealt from the front of the last shuffle order, a shuffle
/// returns all dealt cards to the deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a deck with the 52 unique cards in canonical order.
    pub fn new() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards, next: 0 }
    }

    /// Shuffles the full deck into a uniformly random permutation.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    /// Deals the next card.
    pub fn deal(&mut self) -> Result<Card, ExhaustedDeck> {
        match self.cards.get(self.next) {
            Some(&card) => {
                self.next += 1;
                Ok(card)
            }
            None => Err(ExhaustedDeck {
                requested: 1,
                remaining: 0,
            }),
        }
    }

    /// Deals the next `n` cards.
    pub fn deal_n(&mut self, n: usize) -> Result<&[Card], ExhaustedDeck> {
        if n > self.remaining() {
            return Err(ExhaustedDeck {
                requested: n,
                remaining: self.remaining(),
            });
        }

        let dealt = &self.cards[self.next..self.next + n];
        self.next += n;
        Ok(dealt)
    }

    /// Number of cards left to deal.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// A shoe of one or more 52 cards decks shuffled together.
///
/// Unlike [Deck] a shoe with more than one deck contains duplicate
/// (rank, suit) cards, one per constituent deck.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    next: usize,
}

impl Shoe {
    /// Creates a shoe with the given number of decks.
    ///
    /// Panics if `num_decks` is zero.
    pub fn new(num_decks: usize) -> Self {
        assert!(num_decks > 0, "a shoe needs at least one deck");

        let cards = (0..num_decks)
            .flat_map(|_| Suit::suits().flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s))))
            .collect::<Vec<_>>();
        Self { cards, next: 0 }
    }

    /// Shuffles the full shoe into a uniformly random permutation.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    /// Deals the next card.
    pub fn deal(&mut self) -> Result<Card, ExhaustedDeck> {
        match self.cards.get(self.next) {
            Some(&card) => {
                self.next += 1;
                Ok(card)
            }
            None => Err(ExhaustedDeck {
                requested: 1,
                remaining: 0,
            }),
        }
    }

    /// Number of cards left to deal.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn deck_has_unique_cards() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);

        let mut cards = HashSet::default();
        while deck.remaining() > 0 {
            cards.insert(deck.deal().unwrap());
        }

        assert_eq!(cards.len(), Deck::SIZE);
    }

    #[test]
    fn deck_deal_exhausted() {
        let mut deck = Deck::new();
        assert!(deck.deal_n(50).is_ok());

        let err = deck.deal_n(3).unwrap_err();
        assert_eq!(err.requested, 3);
        assert_eq!(err.remaining, 2);

        assert!(deck.deal().is_ok());
        assert!(deck.deal().is_ok());
        assert!(deck.deal().is_err());
    }

    #[test]
    fn deck_shuffle_restores_cards() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::new();

        deck.shuffle(&mut rng);
        let _ = deck.deal_n(7).unwrap();
        assert_eq!(deck.remaining(), 45);

        deck.shuffle(&mut rng);
        assert_eq!(deck.remaining(), Deck::SIZE);
    }

    #[test]
    fn shoe_duplicates_per_deck() {
        let mut shoe = Shoe::new(6);
        assert_eq!(shoe.remaining(), 6 * Deck::SIZE);

        let mut counts = ahash::HashMap::default();
        while shoe.remaining() > 0 {
            *counts.entry(shoe.deal().unwrap()).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), Deck::SIZE);
        assert!(counts.values().all(|&n| n == 6));
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Clubs);
        assert_eq!(c.to_string(), "AC");
    }

    #[test]
    fn suit_colors() {
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
    }

    #[test]
    fn ten_values() {
        for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert!(Card::new(rank, Suit::Hearts).is_ten_value());
        }

        for rank in [Rank::Deuce, Rank::Nine, Rank::Ace] {
            assert!(!Card::new(rank, Suit::Hearts).is_ten_value());
        }
    }
}

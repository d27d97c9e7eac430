// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sidebet simulator cards types.
//!
//! This crate defines types to create cards:
//!
//! ```
//! # use sidebet_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = Card::new(Rank::King, Suit::Diamonds);
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! a [Deck] type for shuffling and dealing a single 52 cards deck:
//!
//! ```
//! # use rand::prelude::*;
//! # use sidebet_cards::{Card, Deck, Rank, Suit};
//! let mut rng = SmallRng::seed_from_u64(42);
//! let mut deck = Deck::new();
//! deck.shuffle(&mut rng);
//!
//! let hole = deck.deal_n(2).unwrap();
//! assert_eq!(hole.len(), 2);
//! assert_eq!(deck.remaining(), 50);
//! ```
//!
//! and a [Shoe] type that shuffles multiple decks together for games dealt
//! from a multi-deck shoe:
//!
//! ```
//! # use rand::prelude::*;
//! # use sidebet_cards::Shoe;
//! let mut rng = SmallRng::seed_from_u64(42);
//! let mut shoe = Shoe::new(6);
//! shoe.shuffle(&mut rng);
//! assert_eq!(shoe.remaining(), 312);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Color, Deck, ExhaustedDeck, Rank, Shoe, Suit};

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fair progressive payout analysis.
//!
//! Pure functions over a [Report]: given the fixed pay table of a side
//! bet and the simulated hit counts, compute the progressive jackpot
//! value at which the bet price exactly covers all payouts.
use crate::stats::Report;

/// The side bet price in currency units.
pub const BET_AMOUNT: f64 = 5.0;

/// Fixed payouts of the hold'em side bet, the royal flush itself pays
/// the progressive.
pub const HOLDEM_PAY_TABLE: &[(&str, f64)] = &[
    ("Community Royal", 5000.0),
    ("Straight Flush", 1500.0),
    ("Four of a Kind", 500.0),
    ("Full House", 50.0),
];

/// Fixed payouts of the blackjack side bet, the major and minor
/// jackpots pay the progressives.
pub const BLACKJACK_PAY_TABLE: &[(&str, f64)] = &[
    ("Suited A/J", 350.0),
    ("Same Color A/J", 250.0),
    ("Any A/J", 100.0),
    ("Blackjack", 25.0),
];

/// Total fixed payouts for a run under the given pay table.
pub fn fixed_payouts(report: &Report, pay_table: &[(&str, f64)]) -> f64 {
    pay_table
        .iter()
        .map(|(label, payout)| {
            let hits = report.category(label).map(|c| c.hits).unwrap_or(0);
            hits as f64 * payout
        })
        .sum()
}

/// Fair progressive value for the hold'em royal flush.
///
/// The amount left of the total bet after fixed payouts, spread over the
/// royal flush hits. `None` when no royal ever hit.
pub fn holdem_fair_progressive(report: &Report) -> Option<f64> {
    let royal_hits = report.category("Royal Flush")?.hits;
    if royal_hits == 0 {
        return None;
    }

    let total_bet = report.total_hands as f64 * BET_AMOUNT;
    let remaining = total_bet - fixed_payouts(report, HOLDEM_PAY_TABLE);
    Some(remaining / royal_hits as f64)
}

/// Fair (major, minor) progressive values for the blackjack jackpots.
///
/// The remaining pot is split so payouts are inversely proportional to
/// hit frequency: major/minor = minor_hits/major_hits. `None` when
/// either jackpot never hit.
pub fn blackjack_fair_progressives(report: &Report) -> Option<(f64, f64)> {
    let major_hits = report.category("Major Progressive")?.hits;
    let minor_hits = report.category("Minor Progressive")?.hits;
    if major_hits == 0 || minor_hits == 0 {
        return None;
    }

    let total_bet = report.total_hands as f64 * BET_AMOUNT;
    let remaining = total_bet - fixed_payouts(report, BLACKJACK_PAY_TABLE);

    let ratio = minor_hits as f64 / major_hits as f64;
    let minor = remaining / (ratio * major_hits as f64 + minor_hits as f64);
    let major = minor * ratio;

    Some((major, minor))
}

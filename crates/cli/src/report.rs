// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! CSV report emission.
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sidebet_sim::{Drought, Report, payout};

/// Writes the full run report as CSV sections.
pub fn write_csv(path: &Path, report: &Report, pay_table: &[(&str, f64)]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    writeln!(w, "Summary Statistics")?;
    writeln!(w, "Total Hands,{}", report.total_hands)?;
    writeln!(
        w,
        "Total Bet,{:.2}",
        report.total_hands as f64 * payout::BET_AMOUNT
    )?;
    writeln!(w)?;

    writeln!(
        w,
        "Category,Hits,Frequency,1 in X hands,Mean Wait,Std Dev,Min Wait,P50,P95,P99,Drought"
    )?;
    for cat in &report.categories {
        let freq = cat.hits as f64 / report.total_hands as f64 * 100.0;
        let one_in = match cat.one_in(report.total_hands) {
            Some(v) => format!("1 in {v:.0}"),
            None => "never".to_string(),
        };
        let drought = match cat.drought {
            Drought::Longest(v) => format!("{v}"),
            Drought::Open(v) => format!("open after {v}"),
        };

        match &cat.waits {
            Some(s) => writeln!(
                w,
                "{},{},{freq:.6}%,{one_in},{:.1},{:.1},{},{:.1},{:.1},{:.1},{drought}",
                cat.label,
                cat.hits,
                s.mean,
                s.std_dev,
                s.min,
                s.percentiles.p50,
                s.percentiles.p95,
                s.percentiles.p99,
            )?,
            None => writeln!(
                w,
                "{},{},{freq:.6}%,{one_in},,,,,,,{drought}",
                cat.label, cat.hits
            )?,
        }
    }
    writeln!(w)?;

    writeln!(w, "Payout Information")?;
    for (label, pay) in pay_table {
        let hits = report.category(label).map(|c| c.hits).unwrap_or(0);
        writeln!(w, "{label} ({pay:.0}),{:.2}", hits as f64 * pay)?;
    }
    writeln!(
        w,
        "Total Fixed Payouts,{:.2}",
        payout::fixed_payouts(report, pay_table)
    )?;
    writeln!(w)?;

    writeln!(w, "Chunk Results")?;
    let labels = report
        .categories
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>();
    writeln!(w, "Chunk,First Hand,Last Hand,{}", labels.join(","))?;
    for chunk in &report.chunks {
        let hits = chunk
            .hits
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();
        writeln!(
            w,
            "{},{},{},{}",
            chunk.chunk_index,
            chunk.first_hand,
            chunk.last_hand,
            hits.join(",")
        )?;
    }

    w.flush()?;
    Ok(())
}

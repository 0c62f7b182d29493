// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use gala_core::Money;
use jiff::civil::Date;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Formats an optional date, empty when unset.
pub fn format_date(date: Option<Date>) -> String {
    date.map(|d| d.strftime("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Formats an amount with a currency sign.
pub fn format_money(amount: Money) -> String {
    if amount.is_negative() {
        format!("-${}", Money::ZERO - amount)
    } else {
        format!("${amount}")
    }
}

/// Formats a ratio in `[0, 1]` as a whole percentage.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Renders a ratio as a fixed-width progress bar.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Renders a rating as stars, rounded to the nearest whole star.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rating(rating: f64) -> String {
    let full = (rating.clamp(0.0, 5.0).round()) as usize;
    format!("{}{} {rating:.1}", "★".repeat(full), "☆".repeat(5 - full))
}

//! Plain-text tables for terminal front-ends.

use std::io::{self, Write};

use crate::record::{CardRecord, WishlistRecord};
use crate::rules::{total_points, total_wishlist_points, Summary};

const RULE_WIDTH: usize = 84;

fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Write held cards as a numbered table, with a totals line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn card_table(out: &mut impl Write, cards: &[CardRecord]) -> io::Result<()> {
    if cards.is_empty() {
        return writeln!(out, "\n📋 No cards tracked yet.\n");
    }

    writeln!(out)?;
    rule(out)?;
    writeln!(
        out,
        "{:>3}  {:<32} {:<18} {:>10}  {:<12}",
        "#", "Card Name", "Issuer", "Points", "Opened"
    )?;
    rule(out)?;
    for (row, card) in cards.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<32} {:<18} {:>10}  {:<12}",
            row + 1,
            card.card_name,
            card.issuer,
            card.welcome_points,
            card.opened_date
        )?;
        if let Some(benefits) = &card.benefits {
            writeln!(out, "     └ {benefits}")?;
        }
    }
    rule(out)?;
    writeln!(
        out,
        "Total: {} card(s), {} points\n",
        cards.len(),
        total_points(cards)
    )
}

/// Write wishlist entries as a numbered table, with a totals line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn wishlist_table(out: &mut impl Write, wishlist: &[WishlistRecord]) -> io::Result<()> {
    if wishlist.is_empty() {
        return writeln!(out, "\n📋 Wishlist is empty.\n");
    }

    writeln!(out)?;
    rule(out)?;
    writeln!(
        out,
        "{:>3}  {:<32} {:<18} {:>10}  {}",
        "#", "Card Name", "Issuer", "Target", "Notes"
    )?;
    rule(out)?;
    for (row, entry) in wishlist.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<32} {:<18} {:>10}  {}",
            row + 1,
            entry.card_name,
            entry.issuer,
            entry.target_points,
            entry.notes.as_deref().unwrap_or("")
        )?;
    }
    rule(out)?;
    writeln!(
        out,
        "Total: {} card(s), {} potential points\n",
        wishlist.len(),
        total_wishlist_points(wishlist)
    )
}

/// Write the status indicators.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Status as of {}", summary.as_of)?;
    writeln!(out, "----------------------")?;
    writeln!(
        out,
        "Total points:       {} ({} card(s))",
        summary.total_points, summary.card_count
    )?;
    writeln!(
        out,
        "Wishlist potential: {} ({} card(s))",
        summary.wishlist_points, summary.wishlist_count
    )?;
    writeln!(out, "5/24 count:         {}/5", summary.five_24.count)?;
    writeln!(
        out,
        "Next eligible:      {}",
        summary.five_24.next_eligible_label()
    )?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Document;
    use crate::rules::FiveTwentyFourRule;
    use chrono::NaiveDate;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_card_table() {
        let text = render(|out| card_table(out, &[]));
        assert!(text.contains("No cards tracked yet"));
    }

    #[test]
    fn test_card_table_rows_and_totals() {
        let cards = vec![
            CardRecord::new("Sapphire Preferred", 60_000, ymd(2025, 1, 2)).with_issuer("Chase"),
            CardRecord::new("Gold", 90_000, ymd(2025, 3, 4)).with_benefits("4x dining"),
        ];
        let text = render(|out| card_table(out, &cards));

        assert!(text.contains("  1  Sapphire Preferred"));
        assert!(text.contains("  2  Gold"));
        assert!(text.contains("Chase"));
        assert!(text.contains("2025-03-04"));
        assert!(text.contains("└ 4x dining"));
        assert!(text.contains("Total: 2 card(s), 150000 points"));
    }

    #[test]
    fn test_wishlist_table() {
        let wishlist = vec![WishlistRecord::new("Venture X", 75_000).with_notes("Q3")];
        let text = render(|out| wishlist_table(out, &wishlist));
        assert!(text.contains("Venture X"));
        assert!(text.contains("Q3"));
        assert!(text.contains("75000 potential points"));

        let text = render(|out| wishlist_table(out, &[]));
        assert!(text.contains("Wishlist is empty"));
    }

    #[test]
    fn test_summary_without_chase_cards() {
        let s = Summary::compute(&Document::new(), &FiveTwentyFourRule::default(), ymd(2025, 6, 1));
        let text = render(|out| summary(out, &s));
        assert!(text.contains("Status as of 2025-06-01"));
        assert!(text.contains("5/24 count:         0/5"));
        assert!(text.contains("Next eligible:      not applicable"));
    }
}

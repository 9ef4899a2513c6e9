//! Derived figures: point totals and the 5/24 count.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::record::{CardRecord, Document, WishlistRecord};

/// Issuer substring that marks a card as counting toward 5/24.
pub const DEFAULT_ISSUER_KEYWORD: &str = "chase";

/// Length of the look-back window: 24 months, counted as days.
pub const DEFAULT_WINDOW_DAYS: u32 = 730;

/// Text shown when no card counts toward the rule.
pub const NOT_APPLICABLE: &str = "not applicable";

/// Parameters of the 5/24 heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiveTwentyFourRule {
    /// Case-insensitive substring matched against each card's issuer.
    pub issuer_keyword: String,
    /// A card counts while it is younger than this many days.
    pub window_days: u32,
}

impl Default for FiveTwentyFourRule {
    fn default() -> Self {
        Self {
            issuer_keyword: DEFAULT_ISSUER_KEYWORD.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Outcome of evaluating the 5/24 rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FiveTwentyFour {
    /// Number of qualifying cards opened inside the window.
    pub count: usize,
    /// When the oldest qualifying card leaves the window.
    pub next_eligible: Option<NaiveDate>,
}

impl FiveTwentyFour {
    /// The next eligible date, or [`NOT_APPLICABLE`].
    #[must_use]
    pub fn next_eligible_label(&self) -> String {
        self.next_eligible
            .map_or_else(|| NOT_APPLICABLE.to_string(), |date| date.to_string())
    }
}

impl FiveTwentyFourRule {
    /// Count qualifying cards as of `now`.
    ///
    /// A card qualifies when its issuer contains the keyword and its opened
    /// date satisfies `now - window < opened <= now`. Cards whose date does
    /// not parse are skipped.
    #[must_use]
    pub fn evaluate(&self, cards: &[CardRecord], now: NaiveDate) -> FiveTwentyFour {
        let window = Days::new(u64::from(self.window_days));
        let cutoff = now.checked_sub_days(window);

        let qualifying: Vec<NaiveDate> = cards
            .iter()
            .filter(|card| card.issuer_contains(&self.issuer_keyword))
            .filter_map(CardRecord::opened_on)
            .filter(|opened| *opened <= now && cutoff.map_or(true, |cutoff| *opened > cutoff))
            .collect();

        let next_eligible = qualifying
            .iter()
            .min()
            .and_then(|oldest| oldest.checked_add_days(window));

        FiveTwentyFour {
            count: qualifying.len(),
            next_eligible,
        }
    }
}

/// Evaluate the 5/24 rule with the default keyword and window.
#[must_use]
pub fn compute_5_24(cards: &[CardRecord], now: NaiveDate) -> FiveTwentyFour {
    FiveTwentyFourRule::default().evaluate(cards, now)
}

/// Sum of welcome points over held cards.
#[must_use]
pub fn total_points(cards: &[CardRecord]) -> u64 {
    cards
        .iter()
        .fold(0, |sum, card| sum.saturating_add(card.welcome_points))
}

/// Sum of target points over the wishlist.
#[must_use]
pub fn total_wishlist_points(wishlist: &[WishlistRecord]) -> u64 {
    wishlist
        .iter()
        .fold(0, |sum, entry| sum.saturating_add(entry.target_points))
}

/// Every status indicator for one document at one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Date the figures were computed for.
    pub as_of: NaiveDate,
    /// Number of held cards.
    pub card_count: usize,
    /// Welcome points earned across held cards.
    pub total_points: u64,
    /// Number of wishlist entries.
    pub wishlist_count: usize,
    /// Points available if every wishlist card is opened.
    pub wishlist_points: u64,
    /// 5/24 status.
    pub five_24: FiveTwentyFour,
}

impl Summary {
    /// Compute all indicators.
    #[must_use]
    pub fn compute(document: &Document, rule: &FiveTwentyFourRule, now: NaiveDate) -> Self {
        Self {
            as_of: now,
            card_count: document.current.len(),
            total_points: total_points(&document.current),
            wishlist_count: document.wishlist.len(),
            wishlist_points: total_wishlist_points(&document.wishlist),
            five_24: rule.evaluate(&document.current, now),
        }
    }
}

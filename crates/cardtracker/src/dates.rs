//! Date parsing for opened dates.
//!
//! New records are stored as ISO `YYYY-MM-DD`, but older data files carry
//! dates in a handful of other layouts. Every date read from a record goes
//! through [`parse_date`], which tries each accepted layout in turn.

use chrono::NaiveDate;

/// The canonical layout written for new records.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Layouts accepted when reading a date, tried in order.
pub const ACCEPTED_FORMATS: [&str; 4] = [ISO_FORMAT, "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];

/// Parse a date in any accepted layout.
///
/// Surrounding whitespace is ignored. The year must be written with four
/// digits and no sign, month and day with one or two. Returns `None` if no
/// layout yields a real calendar date.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    ACCEPTED_FORMATS
        .iter()
        .filter(|format| has_layout_shape(input, format))
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

/// Whether `input` has the digit groups of `format` before chrono sees it.
///
/// chrono's `%Y` takes any number of digits and an optional sign, which
/// would read `01/15/25` as the year 25.
fn has_layout_shape(input: &str, format: &str) -> bool {
    let Some(separator) = format.chars().nth(2) else {
        return false;
    };
    let year_slot = if format.starts_with("%Y") { 0 } else { 2 };

    let groups: Vec<&str> = input.split(separator).collect();
    groups.len() == 3
        && groups.iter().enumerate().all(|(slot, group)| {
            let width_ok = if slot == year_slot {
                group.len() == 4 && !group.starts_with('0')
            } else {
                (1..=2).contains(&group.len())
            };
            width_ok && group.bytes().all(|b| b.is_ascii_digit())
        })
}

/// Format a date in the canonical ISO layout.
#[must_use]
pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

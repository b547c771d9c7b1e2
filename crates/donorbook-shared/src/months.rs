//! Russian month names.
//!
//! Each month is accepted in the nominative (`январь`) and the genitive
//! (`января`) form, since both read naturally in a payment note. Output always
//! uses the capitalized nominative form.

use std::borrow::Cow;

/// Accepted spellings, lowercase.
const MONTH_TOKENS: [(&str, u32); 24] = [
    ("январь", 1),
    ("января", 1),
    ("февраль", 2),
    ("февраля", 2),
    ("март", 3),
    ("марта", 3),
    ("апрель", 4),
    ("апреля", 4),
    ("май", 5),
    ("мая", 5),
    ("июнь", 6),
    ("июня", 6),
    ("июль", 7),
    ("июля", 7),
    ("август", 8),
    ("августа", 8),
    ("сентябрь", 9),
    ("сентября", 9),
    ("октябрь", 10),
    ("октября", 10),
    ("ноябрь", 11),
    ("ноября", 11),
    ("декабрь", 12),
    ("декабря", 12),
];

/// Display names indexed by `month - 1`.
const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Parse a month name into its number (1–12).
///
/// Matching is exact after trimming and lowercasing; anything else yields
/// `None`.
pub fn parse_month(text: &str) -> Option<u32> {
    let needle = text.trim().to_lowercase();
    MONTH_TOKENS
        .iter()
        .find(|(token, _)| *token == needle)
        .map(|(_, month)| *month)
}

/// Display name for a month number, or the number itself when out of range.
pub fn month_name(month: u32) -> Cow<'static, str> {
    match month {
        1..=12 => Cow::Borrowed(MONTH_NAMES[(month - 1) as usize]),
        other => Cow::Owned(other.to_string()),
    }
}

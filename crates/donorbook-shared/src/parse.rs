//! Inbound message classification.
//!
//! A chat message is one of:
//! - a **command** (`/paid март 2024`), routed by name in the bot crate
//! - a **payment record**, exactly two non-empty lines:
//!   ```text
//!   Иванов
//!   март 2024
//!   ```
//!   where the year is optional and defaults to the current one
//! - anything else, which is ignored without a reply so ordinary chat in a
//!   group does not trigger the bot
//!
//! Once a message has the two-line shape, month and year problems are
//! reported back instead of being ignored.

use chrono::Datelike;

use crate::constants::{BOT_MENTION_SEPARATOR, COMMAND_PREFIX, PAYMENT_RECORD_LINES};
use crate::error::ParseError;
use crate::months::parse_month;
use crate::types::Period;

/// Result of classifying one inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// `/name[@bot] [args]`
    Command {
        name: String,
        /// Bot username the command was addressed to, if any.
        mention: Option<String>,
        /// Everything after the command token, trimmed; `None` when blank.
        args: Option<String>,
    },
    /// A well-formed two-line payment record.
    Payment(PaymentEntry),
    /// Two-line shape with a bad month or year.
    Invalid(ParseError),
    /// Not addressed to the bot.
    Ignored,
}

/// Surname plus billing period extracted from a payment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEntry {
    /// Taken verbatim from the first line (no case folding).
    pub last_name: String,
    pub period: Period,
}

/// Classify a raw message text.
///
/// `current_year` fills in the year when the record omits it.
pub fn classify(text: &str, current_year: u32) -> Inbound {
    if text.starts_with(COMMAND_PREFIX) {
        return parse_command(text);
    }

    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != PAYMENT_RECORD_LINES {
        return Inbound::Ignored;
    }

    match parse_month_year(Some(lines[1]), current_year) {
        Ok(period) => Inbound::Payment(PaymentEntry {
            last_name: lines[0].to_string(),
            period,
        }),
        Err(e) => Inbound::Invalid(e),
    }
}

/// Parse `<month> [year]` from a command argument string.
///
/// Shared by the free-text path and every command that takes a period, so
/// the error wording is identical everywhere. Tokens after the year are
/// ignored.
pub fn parse_month_year(args: Option<&str>, current_year: u32) -> Result<Period, ParseError> {
    let mut parts = args.unwrap_or_default().split_whitespace();

    let month_token = parts.next().ok_or(ParseError::MissingMonth)?;
    let month = parse_month(month_token)
        .ok_or_else(|| ParseError::UnknownMonth(month_token.to_string()))?;

    let year = match parts.next() {
        Some(token) => token
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidYear(token.to_string()))?,
        None => current_year,
    };

    Ok(Period::new(month, year))
}

/// Calendar year on the local clock.
pub fn current_year() -> u32 {
    chrono::Local::now().year().max(0) as u32
}

fn parse_command(text: &str) -> Inbound {
    let (head, rest) = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest),
        None => (text, ""),
    };

    let token = head.strip_prefix(COMMAND_PREFIX).unwrap_or(head);
    let (name, mention) = match token.split_once(BOT_MENTION_SEPARATOR) {
        Some((name, mention)) => (name, Some(mention.to_string())),
        None => (token, None),
    };

    let rest = rest.trim();
    Inbound::Command {
        name: name.to_string(),
        mention,
        args: (!rest.is_empty()).then(|| rest.to_string()),
    }
}

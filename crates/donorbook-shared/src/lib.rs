//! # donorbook-shared
//!
//! Pure text handling shared by the store and the bot: the Russian month
//! vocabulary, the classifier that tells commands, payment records and chat
//! noise apart, and the small id / period types that flow between crates.
//!
//! Nothing here touches I/O.

pub mod constants;
pub mod error;
pub mod months;
pub mod parse;
pub mod types;

pub use error::ParseError;
pub use parse::{classify, current_year, parse_month_year, Inbound, PaymentEntry};
pub use types::{ActorId, Period};

//! Chat command handlers.
//!
//! Every handler validates its argument text before touching the store and
//! returns the reply to send. Store faults propagate with `?`; a missing donor
//! or a duplicate row is an ordinary reply.

pub mod admins;
pub mod donors;
pub mod payments;
pub mod reports;

use donorbook_store::Donor;

/// Commands understood by the bot, by their chat name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    AddDonor,
    AddMany,
    RemoveDonor,
    Donors,
    Paid,
    Unpaid,
    History,
    Delete,
    AddAdmin,
}

impl Command {
    /// Exact, case-sensitive name match; `None` for unknown commands.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "start" => Self::Start,
            "help" => Self::Help,
            "add_donor" => Self::AddDonor,
            "add_many" => Self::AddMany,
            "remove_donor" => Self::RemoveDonor,
            "donors" => Self::Donors,
            "paid" => Self::Paid,
            "unpaid" => Self::Unpaid,
            "history" => Self::History,
            "delete" => Self::Delete,
            "add_admin" => Self::AddAdmin,
            _ => return None,
        };
        Some(command)
    }
}

pub(crate) fn donor_not_found(last_name: &str) -> String {
    format!("Донор {last_name} не найден.")
}

/// `header` followed by `1. Surname` lines.
pub(crate) fn numbered_list(header: String, donors: &[Donor]) -> String {
    let mut lines = vec![header];
    lines.extend(
        donors
            .iter()
            .enumerate()
            .map(|(i, donor)| format!("{}. {}", i + 1, donor.last_name)),
    );
    lines.join("\n")
}

//! Domain model structs persisted in the SQLite database.

use chrono::{DateTime, Utc};
use donorbook_shared::{ActorId, Period};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Donor
// ---------------------------------------------------------------------------

/// A tracked contributor.  The surname is unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Donor {
    /// Surrogate key.
    pub id: i64,
    /// Surname exactly as it was added.
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// One recorded contribution for one donor and one billing month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub donor_id: i64,
    pub period: Period,
    pub recorded_at: DateTime<Utc>,
    /// Admin who recorded the payment.
    pub recorded_by: ActorId,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// An admin granted through the bot rather than through `ADMIN_IDS`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Admin {
    pub telegram_id: ActorId,
    pub added_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Batch insert outcome
// ---------------------------------------------------------------------------

/// Result of adding several donors at once.  Each surname appears in at most
/// one list, in the order it was first given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub added: Vec<String>,
    pub existed: Vec<String>,
}

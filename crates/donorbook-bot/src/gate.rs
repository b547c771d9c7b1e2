//! Admin check that runs before anything else for every inbound message.

use std::collections::HashSet;

use donorbook_shared::ActorId;
use donorbook_store::{Pool, Result};
use tracing::{debug, warn};

use crate::dispatch::Flow;

pub const REJECTION: &str = "У вас нет доступа к этому боту.";

/// Allows a sender that is in the configured allowlist or in the `admins`
/// table.
pub struct AccessGate {
    allowlist: HashSet<ActorId>,
}

impl AccessGate {
    pub fn new(allowlist: impl IntoIterator<Item = ActorId>) -> Self {
        Self {
            allowlist: allowlist.into_iter().collect(),
        }
    }

    /// Messages without a sender are dropped without a reply.  The store is
    /// only queried when the allowlist misses.
    pub async fn check(&self, sender: Option<ActorId>, pool: &Pool) -> Result<Flow<ActorId>> {
        let Some(actor) = sender else {
            debug!("dropping message without sender");
            return Ok(Flow::Done(None));
        };

        if self.allowlist.contains(&actor) {
            return Ok(Flow::Continue(actor));
        }

        if pool.run(move |db| db.is_admin(actor)).await? {
            return Ok(Flow::Continue(actor));
        }

        warn!(actor = %actor, "rejected message from non-admin");
        Ok(Flow::Done(Some(REJECTION.to_string())))
    }
}

//! Inbound message pipeline: gate → classify → handle.
//!
//! Each stage either continues with its output or finishes the request with
//! an optional reply ([`Flow`]). A message produces at most one reply.

use std::sync::Arc;

use donorbook_shared::{classify, current_year, ActorId, Inbound, PaymentEntry};
use donorbook_store::{Pool, Result};
use tracing::{debug, error};

use crate::gate::AccessGate;
use crate::handlers::{admins, donors, payments, reports, Command};

/// Reply for requests that failed on a store fault.
pub const GENERIC_FAILURE: &str = "Произошла ошибка, попробуйте позже.";

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    Continue(T),
    /// Stop here, sending the reply if there is one.
    Done(Option<String>),
}

/// Transport-independent view of an inbound chat message.
#[derive(Debug, Clone, Default)]
pub struct Incoming {
    pub sender: Option<ActorId>,
    /// `None` for stickers, photos and other non-text messages.
    pub text: Option<String>,
}

#[derive(Debug)]
enum Route {
    Command(Command, Option<String>),
    Payment(PaymentEntry),
}

pub struct Dispatcher {
    pool: Arc<Pool>,
    gate: AccessGate,
    /// Commands addressed to another bot (`/paid@other_bot`) are ignored.
    bot_username: Option<String>,
}

impl Dispatcher {
    pub fn new(pool: Arc<Pool>, gate: AccessGate, bot_username: Option<String>) -> Self {
        Self {
            pool,
            gate,
            bot_username,
        }
    }

    /// Run the pipeline for one message and return the reply to send.
    pub async fn dispatch(&self, incoming: &Incoming) -> Option<String> {
        match self.process(incoming, current_year()).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, sender = ?incoming.sender, "request failed");
                Some(GENERIC_FAILURE.to_string())
            }
        }
    }

    async fn process(&self, incoming: &Incoming, current_year: u32) -> Result<Option<String>> {
        let actor = match self.gate.check(incoming.sender, &self.pool).await? {
            Flow::Continue(actor) => actor,
            Flow::Done(reply) => return Ok(reply),
        };

        let route = match self.route(incoming.text.as_deref(), current_year) {
            Flow::Continue(route) => route,
            Flow::Done(reply) => return Ok(reply),
        };

        self.handle(route, actor, current_year).await.map(Some)
    }

    fn route(&self, text: Option<&str>, current_year: u32) -> Flow<Route> {
        let Some(text) = text else {
            return Flow::Done(None);
        };

        match classify(text, current_year) {
            Inbound::Command {
                name,
                mention,
                args,
            } => {
                if !self.is_addressed_to_me(mention.as_deref()) {
                    return Flow::Done(None);
                }
                match Command::from_name(&name) {
                    Some(command) => Flow::Continue(Route::Command(command, args)),
                    None => {
                        debug!(command = %name, "ignoring unknown command");
                        Flow::Done(None)
                    }
                }
            }
            Inbound::Payment(entry) => Flow::Continue(Route::Payment(entry)),
            Inbound::Invalid(e) => Flow::Done(Some(e.to_string())),
            Inbound::Ignored => Flow::Done(None),
        }
    }

    async fn handle(&self, route: Route, actor: ActorId, current_year: u32) -> Result<String> {
        let pool = &self.pool;

        let (command, args) = match route {
            Route::Payment(entry) => return payments::record(pool, &entry, actor).await,
            Route::Command(command, args) => (command, args),
        };
        let args = args.as_deref();

        debug!(?command, actor = %actor, "handling command");

        match command {
            Command::Start => Ok(reports::start()),
            Command::Help => Ok(reports::help()),
            Command::AddDonor => donors::add_donor(pool, args).await,
            Command::AddMany => donors::add_many(pool, args).await,
            Command::RemoveDonor => donors::remove_donor(pool, args).await,
            Command::Donors => donors::list_donors(pool).await,
            Command::Paid => reports::paid(pool, args, current_year).await,
            Command::Unpaid => reports::unpaid(pool, args, current_year).await,
            Command::History => reports::history(pool, args).await,
            Command::Delete => payments::delete(pool, args, current_year).await,
            Command::AddAdmin => admins::add_admin(pool, args, actor).await,
        }
    }

    fn is_addressed_to_me(&self, mention: Option<&str>) -> bool {
        match (mention, self.bot_username.as_deref()) {
            (Some(mention), Some(me)) => mention.eq_ignore_ascii_case(me),
            _ => true,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use donorbook_shared::Period;

    use super::*;
    use crate::gate::REJECTION;

    const ADMIN: ActorId = ActorId(100);
    const STRANGER: ActorId = ActorId(666);
    const YEAR: u32 = 2025;

    pub(crate) fn test_pool() -> (Pool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Pool::open(&dir.path().join("bot.db"), 2).unwrap();
        (pool, dir)
    }

    fn test_dispatcher() -> (Dispatcher, Arc<Pool>, tempfile::TempDir) {
        let (pool, dir) = test_pool();
        let pool = Arc::new(pool);
        let dispatcher = Dispatcher::new(
            pool.clone(),
            AccessGate::new([ADMIN]),
            Some("donor_bot".to_string()),
        );
        (dispatcher, pool, dir)
    }

    fn text(sender: ActorId, text: &str) -> Incoming {
        Incoming {
            sender: Some(sender),
            text: Some(text.to_string()),
        }
    }

    async fn send(dispatcher: &Dispatcher, incoming: Incoming) -> Option<String> {
        dispatcher.process(&incoming, YEAR).await.unwrap()
    }

    #[tokio::test]
    async fn test_stranger_gets_one_rejection_and_changes_nothing() {
        let (dispatcher, pool, _dir) = test_dispatcher();

        for message in ["/add_donor Smith", "/add_admin 666", "Smith\nмарт", "hello"] {
            assert_eq!(
                send(&dispatcher, text(STRANGER, message)).await.as_deref(),
                Some(REJECTION)
            );
        }

        assert!(pool.run(|db| db.list_donors()).await.unwrap().is_empty());
        assert!(pool.run(|db| db.list_admins()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_message_without_sender_is_dropped() {
        let (dispatcher, _pool, _dir) = test_dispatcher();
        let incoming = Incoming {
            sender: None,
            text: Some("/donors".into()),
        };
        assert_eq!(send(&dispatcher, incoming).await, None);
    }

    #[tokio::test]
    async fn test_free_text_payment_flow() {
        let (dispatcher, pool, _dir) = test_dispatcher();
        send(&dispatcher, text(ADMIN, "/add_donor Smith")).await;

        assert_eq!(
            send(&dispatcher, text(ADMIN, "Smith\nЯнварь 2024")).await.as_deref(),
            Some("Оплата записана: Smith, Январь 2024")
        );
        assert_eq!(
            send(&dispatcher, text(ADMIN, "Smith\nянваря")).await.as_deref(),
            Some("Оплата записана: Smith, Январь 2025")
        );
        assert_eq!(
            send(&dispatcher, text(ADMIN, "Smith\nNotAMonth")).await.as_deref(),
            Some("Неизвестный месяц: NotAMonth")
        );

        let history = pool
            .run(|db| {
                let id = db.get_donor("Smith")?.unwrap().id;
                db.get_history(id)
            })
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].period, Period::new(1, 2025));
        assert_eq!(history[0].recorded_by, ADMIN);
    }

    #[tokio::test]
    async fn test_noise_is_ignored() {
        let (dispatcher, _pool, _dir) = test_dispatcher();

        assert_eq!(send(&dispatcher, text(ADMIN, "hi all")).await, None);
        assert_eq!(send(&dispatcher, text(ADMIN, "a\nb\nc")).await, None);
        assert_eq!(send(&dispatcher, text(ADMIN, "/frobnicate")).await, None);
        assert_eq!(send(&dispatcher, text(ADMIN, "//donors")).await, None);
        let sticker = Incoming {
            sender: Some(ADMIN),
            text: None,
        };
        assert_eq!(send(&dispatcher, sticker).await, None);
    }

    #[tokio::test]
    async fn test_mentions() {
        let (dispatcher, _pool, _dir) = test_dispatcher();

        assert_eq!(
            send(&dispatcher, text(ADMIN, "/donors@Donor_Bot")).await.as_deref(),
            Some("Список доноров пуст.")
        );
        assert_eq!(send(&dispatcher, text(ADMIN, "/donors@other_bot")).await, None);
    }

    #[tokio::test]
    async fn test_persisted_admin_passes_gate() {
        let (dispatcher, _pool, _dir) = test_dispatcher();

        send(&dispatcher, text(ADMIN, "/add_admin 666")).await;
        assert_eq!(
            send(&dispatcher, text(STRANGER, "/donors")).await.as_deref(),
            Some("Список доноров пуст.")
        );
    }

    #[tokio::test]
    async fn test_add_many_and_history_via_commands() {
        let (dispatcher, _pool, _dir) = test_dispatcher();
        send(&dispatcher, text(ADMIN, "/add_donor Jones")).await;

        assert_eq!(
            send(&dispatcher, text(ADMIN, "/add_many Smith Jones Smith")).await.as_deref(),
            Some("Добавлены: Smith\nУже существуют: Jones")
        );

        send(&dispatcher, text(ADMIN, "Smith\nмарт 2023")).await;
        send(&dispatcher, text(ADMIN, "Smith\nянварь 2024")).await;
        assert_eq!(
            send(&dispatcher, text(ADMIN, "/history Smith")).await.as_deref(),
            Some("История оплат Smith:\n• Январь 2024\n• Март 2023")
        );
    }

    #[tokio::test]
    async fn test_store_fault_becomes_generic_reply() {
        let (dispatcher, pool, _dir) = test_dispatcher();
        pool.close();

        assert_eq!(
            dispatcher.dispatch(&text(ADMIN, "/donors")).await.as_deref(),
            Some(GENERIC_FAILURE)
        );
    }
}

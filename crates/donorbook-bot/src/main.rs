//! # donorbook-bot
//!
//! Telegram bot for tracking monthly donations.
//!
//! This binary provides:
//! - **Donor roster** commands (`/add_donor`, `/add_many`, `/remove_donor`,
//!   `/donors`)
//! - **Payment recording** from two-line chat messages (`Фамилия` /
//!   `Месяц [Год]`) and `/delete`
//! - **Reports** (`/paid`, `/unpaid`, `/history`)
//! - **Access control**: only ids in `ADMIN_IDS` or the `admins` table get
//!   an answer
//! - An optional `/health` HTTP endpoint

mod config;
mod dispatch;
mod error;
mod gate;
mod handlers;
mod health;
mod poller;
mod shutdown;
mod telegram;

use std::sync::Arc;

use donorbook_shared::constants::APP_NAME;
use donorbook_store::Pool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::BotConfig;
use crate::dispatch::Dispatcher;
use crate::gate::AccessGate;
use crate::shutdown::ShutdownSignals;
use crate::telegram::TelegramClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,donorbook_bot=debug,donorbook_store=info")
        }))
        .init();

    info!("Starting {} bot v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = BotConfig::from_env()?;
    info!(?config, "Loaded configuration");

    let mut signals = ShutdownSignals::install()?;

    // -----------------------------------------------------------------------
    // 3. Open the database pool; it is closed on every exit path below
    // -----------------------------------------------------------------------
    let pool = Arc::new(Pool::open(&config.db_path, config.db_pool_size)?);

    let result = run(&config, pool.clone(), &mut signals).await;

    info!("Shutting down");
    pool.close();
    result
}

async fn run(
    config: &BotConfig,
    pool: Arc<Pool>,
    signals: &mut ShutdownSignals,
) -> anyhow::Result<()> {
    let persisted_admins = pool.run(|db| db.list_admins()).await?.len();
    info!(
        configured = config.admin_ids.len(),
        persisted = persisted_admins,
        "Admin allowlist loaded"
    );

    // -----------------------------------------------------------------------
    // 4. Connect to Telegram
    // -----------------------------------------------------------------------
    let client = Arc::new(TelegramClient::new(
        &config.api_url,
        &config.bot_token,
        config.poll_timeout_secs,
    )?);
    let me = client.get_me().await?;
    info!(bot_id = me.id, username = ?me.username, "Authorized with Telegram");

    let dispatcher = Arc::new(Dispatcher::new(
        pool,
        AccessGate::new(config.admin_ids.iter().copied()),
        me.username,
    ));

    // -----------------------------------------------------------------------
    // 5. Optional health endpoint (background task)
    // -----------------------------------------------------------------------
    if let Some(addr) = config.http_addr {
        tokio::spawn(async move {
            if let Err(e) = health::serve(addr).await {
                tracing::error!(error = %e, "Health endpoint failed");
            }
        });
    }

    // -----------------------------------------------------------------------
    // 6. Poll until SIGTERM or Ctrl+C
    // -----------------------------------------------------------------------
    tokio::select! {
        _ = poller::run(client, dispatcher, config.poll_timeout_secs) => {}
        signal = signals.recv() => {
            info!(signal, "Received shutdown signal");
        }
    }

    Ok(())
}

/// Application name
pub const APP_NAME: &str = "donorbook";

/// Prefix that marks a chat message as a bot command
pub const COMMAND_PREFIX: char = '/';

/// Separator between a command name and the bot username (`/paid@donor_bot`)
pub const BOT_MENTION_SEPARATOR: char = '@';

/// Number of non-empty lines in a free-text payment record
pub const PAYMENT_RECORD_LINES: usize = 2;

/// Default number of pooled database connections
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Default Telegram long-poll timeout in seconds
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

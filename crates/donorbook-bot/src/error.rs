use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid admin id in ADMIN_IDS: {0:?}")]
    InvalidAdminId(String),
}

#[derive(Debug, Error)]
pub enum TelegramError {
    /// Transport failure.  The URL is stripped since it embeds the token.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Bot API call {method} failed: {description}")]
    Api {
        method: &'static str,
        description: String,
    },

    #[error("Bot API call {0} returned no result")]
    MissingResult(&'static str),
}

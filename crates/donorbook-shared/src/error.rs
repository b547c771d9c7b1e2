use thiserror::Error;

/// Month / year argument errors.
///
/// The display text is sent to the chat as-is, so every caller that parses a
/// period reports the same wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Укажите месяц.")]
    MissingMonth,

    #[error("Неизвестный месяц: {0}")]
    UnknownMonth(String),

    #[error("Неверный формат года: {0}")]
    InvalidYear(String),
}

use serde::{Deserialize, Serialize};

use crate::months::month_name;

// Actor identity = Telegram user id
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ActorId(pub i64);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ActorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// A billing month.  Parsed periods have `month` in `1..=12`; the store
/// rejects anything else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Period {
    pub month: u32,
    pub year: u32,
}

impl Period {
    pub fn new(month: u32, year: u32) -> Self {
        Self { month, year }
    }
}

/// Renders as `Январь 2024`.
impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

//! Chart timeframe identifiers.
//!
//! A [`Timeframe`] pairs a non-zero amount with a [`TimeframeUnit`]. It renders and parses
//! in the trading-terminal spelling used by the downstream chart robot (`M5`, `H1`, `D1`,
//! `W1`, `MN1`) and is serialized as that string, so the identifier in a published result is
//! stable across runs.
//!
//! ```
//! use smc_engine::models::timeframe::{Timeframe, TimeframeUnit};
//!
//! let tf: Timeframe = "H4".parse().unwrap();
//! assert_eq!(tf.amount().get(), 4);
//! assert_eq!(tf.unit(), TimeframeUnit::Hour);
//! assert_eq!(tf.to_string(), "H4");
//! ```

use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeframeError {
    #[error("empty timeframe")]
    Empty,

    #[error("unknown timeframe unit in {0:?}")]
    UnknownUnit(String),

    #[error("invalid timeframe amount in {0:?}")]
    InvalidAmount(String),
}

/// Timeframe granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeframeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeframeUnit {
    fn prefix(self) -> &'static str {
        match self {
            TimeframeUnit::Minute => "M",
            TimeframeUnit::Hour => "H",
            TimeframeUnit::Day => "D",
            TimeframeUnit::Week => "W",
            TimeframeUnit::Month => "MN",
        }
    }
}

/// A timeframe = amount × unit (e.g., 5-Minute, 4-Hour, 1-Day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timeframe {
    amount: NonZeroU32,
    unit: TimeframeUnit,
}

const fn amount(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(v) => v,
        None => NonZeroU32::MIN,
    }
}

impl Timeframe {
    pub const M1: Timeframe = Timeframe::new(amount(1), TimeframeUnit::Minute);
    pub const M5: Timeframe = Timeframe::new(amount(5), TimeframeUnit::Minute);
    pub const M15: Timeframe = Timeframe::new(amount(15), TimeframeUnit::Minute);
    pub const M30: Timeframe = Timeframe::new(amount(30), TimeframeUnit::Minute);
    pub const H1: Timeframe = Timeframe::new(amount(1), TimeframeUnit::Hour);
    pub const H4: Timeframe = Timeframe::new(amount(4), TimeframeUnit::Hour);
    pub const D1: Timeframe = Timeframe::new(amount(1), TimeframeUnit::Day);
    pub const W1: Timeframe = Timeframe::new(amount(1), TimeframeUnit::Week);
    pub const MN1: Timeframe = Timeframe::new(amount(1), TimeframeUnit::Month);

    pub const fn new(amount: NonZeroU32, unit: TimeframeUnit) -> Self {
        Self { amount, unit }
    }
    pub const fn amount(&self) -> NonZeroU32 {
        self.amount
    }
    pub const fn unit(&self) -> TimeframeUnit {
        self.unit
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.unit.prefix(), self.amount.get())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeframeError::Empty);
        }
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| TimeframeError::InvalidAmount(s.to_string()))?;
        let (prefix, digits) = s.split_at(split);
        // "MN" has to be checked before "M"
        let unit = match prefix.to_ascii_uppercase().as_str() {
            "MN" => TimeframeUnit::Month,
            "M" => TimeframeUnit::Minute,
            "H" => TimeframeUnit::Hour,
            "D" => TimeframeUnit::Day,
            "W" => TimeframeUnit::Week,
            _ => return Err(TimeframeError::UnknownUnit(s.to_string())),
        };
        let amount = digits
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| TimeframeError::InvalidAmount(s.to_string()))?;
        Ok(Timeframe::new(amount, unit))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = TimeframeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.to_string()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::structure::{BreakCategory, Direction};

/// The opposite-colour candle that preceded a structure break.
///
/// A bullish block is the last bearish candle before a bullish break and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    /// Mirrors the direction of the originating break.
    pub direction: Direction,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub time: DateTime<Utc>,
    pub bar_index: usize,
    /// Category of the break this block was found for.
    pub source_category: BreakCategory,
}

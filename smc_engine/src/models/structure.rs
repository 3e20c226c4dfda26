//! Structure-break types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a break continued or reversed the prevailing trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BreakCategory {
    /// Break of structure: continuation.
    BOS,
    /// Change of character: reversal.
    CHoCH,
}

impl std::fmt::Display for BreakCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakCategory::BOS => write!(f, "BOS"),
            BreakCategory::CHoCH => write!(f, "CHoCH"),
        }
    }
}

/// Direction of a break or of the zone it originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bull,
    Bear,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Bull => write!(f, "bull"),
            Direction::Bear => write!(f, "bear"),
        }
    }
}

/// A confirmed close beyond a swing level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureBreak {
    pub category: BreakCategory,
    pub direction: Direction,
    /// Price of the swing that was broken.
    pub level: f64,
    /// Time of the swing that defined `level`.
    pub start_time: DateTime<Utc>,
    pub start_bar_index: usize,
    /// Time of the first bar whose close went beyond `level`.
    pub break_time: DateTime<Utc>,
    pub break_bar_index: usize,
}

/// Identity used to suppress duplicate breaks. The level is compared bit-for-bit.
pub(crate) type BreakKey = (BreakCategory, Direction, u64);

impl StructureBreak {
    pub(crate) fn key(&self) -> BreakKey {
        (self.category, self.direction, self.level.to_bits())
    }
}

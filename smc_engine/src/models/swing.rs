//! Swing point types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which extremum a swing marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingKind {
    High,
    Low,
}

/// Classification of a swing against the previous swing of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingLabel {
    /// First swing of its kind in the window; nothing to compare against.
    #[serde(rename = "unclassified")]
    Unclassified,
    /// Higher high.
    HH,
    /// Lower (or equal) high.
    LH,
    /// Higher low.
    HL,
    /// Lower (or equal) low.
    LL,
}

impl SwingLabel {
    #[inline]
    pub fn is_classified(self) -> bool {
        self != SwingLabel::Unclassified
    }
}

impl std::fmt::Display for SwingLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwingLabel::Unclassified => write!(f, "unclassified"),
            SwingLabel::HH => write!(f, "HH"),
            SwingLabel::LH => write!(f, "LH"),
            SwingLabel::HL => write!(f, "HL"),
            SwingLabel::LL => write!(f, "LL"),
        }
    }
}

/// A local extremum confirmed by `strength` less-extreme bars on each side.
///
/// One bar may carry both a high and a low swing when both windows qualify it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub kind: SwingKind,
    pub label: SwingLabel,
    /// The bar's `high` for a high swing, its `low` for a low swing.
    pub price: f64,
    pub time: DateTime<Utc>,
    pub bar_index: usize,
}

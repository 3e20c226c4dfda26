//! Tunable parameters of an analysis run.

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Parameters for [`analyze`](crate::analysis::analyze).
///
/// Deserializes from a TOML/JSON table where every key is optional; missing keys take the
/// defaults below and unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisParams {
    /// Bars required on each side of a fractal swing.
    pub strength: usize,
    /// Bars scanned backwards from a break to find its order block.
    pub lookback: usize,
    /// Upper bound on emitted order blocks; the oldest are dropped first.
    pub max_order_blocks: usize,
    /// Fail with `InsufficientData` instead of returning a result without classified swings.
    pub require_classified_swing: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            strength: 5,
            lookback: 10,
            max_order_blocks: 20,
            require_classified_swing: false,
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.strength < 1 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "strength must be >= 1, got {}",
                self.strength
            )));
        }
        if self.lookback < 1 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "lookback must be >= 1, got {}",
                self.lookback
            )));
        }
        Ok(())
    }

    /// Smallest window that can hold a single swing: `2 * strength + 1`.
    pub fn min_bars_for_swing(&self) -> usize {
        self.strength.saturating_mul(2).saturating_add(1)
    }
}

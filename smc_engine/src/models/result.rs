//! The exportable artifact of one analysis run.
//!
//! Field names and enum spellings are what downstream chart robots parse, so they are part
//! of the compatibility surface: renaming anything here is a breaking change for consumers
//! that diff successive runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    order_block::OrderBlock, structure::StructureBreak, swing::SwingPoint, timeframe::Timeframe,
};

/// Colours and line styles for the renderer.
///
/// The engine never reads these values; they ride along so the renderer gets everything it
/// needs from a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderHints {
    pub bos_color: String,
    pub choch_color: String,
    pub ob_bull_color: String,
    pub ob_bear_color: String,
    pub line_style: String,
    pub extend_lines: bool,
}

impl Default for RenderHints {
    fn default() -> Self {
        Self {
            bos_color: "clrDodgerBlue".to_string(),
            choch_color: "clrMagenta".to_string(),
            ob_bull_color: "clrDodgerBlue".to_string(),
            ob_bear_color: "clrCrimson".to_string(),
            line_style: "STYLE_SOLID".to_string(),
            extend_lines: true,
        }
    }
}

/// Swings, breaks and order blocks for one instrument/timeframe window.
///
/// Built once by [`assemble`](crate::assembler::assemble) and never mutated afterwards;
/// ownership passes to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub generated_at: DateTime<Utc>,
    /// Every detected swing, ordered by bar index.
    pub swings: Vec<SwingPoint>,
    /// Continuation breaks, ordered by break bar index.
    pub bos: Vec<StructureBreak>,
    /// Reversal breaks, ordered by break bar index.
    pub choch: Vec<StructureBreak>,
    /// Most recent first.
    pub order_blocks: Vec<OrderBlock>,
    /// Rendering hints, passed through untouched.
    pub config: RenderHints,
}

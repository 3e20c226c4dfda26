//! Packages stage outputs into an [`AnalysisResult`].

use chrono::{DateTime, Utc};

use crate::{
    models::{
        order_block::OrderBlock,
        result::{AnalysisResult, RenderHints},
        swing::SwingPoint,
        timeframe::Timeframe,
    },
    structure::StructureBreaks,
};

/// Pure aggregation: nothing is recomputed, filtered or reordered.
pub fn assemble(
    symbol: impl Into<String>,
    timeframe: Timeframe,
    generated_at: DateTime<Utc>,
    swings: Vec<SwingPoint>,
    breaks: StructureBreaks,
    order_blocks: Vec<OrderBlock>,
    config: RenderHints,
) -> AnalysisResult {
    AnalysisResult {
        symbol: symbol.into(),
        timeframe,
        generated_at,
        swings,
        bos: breaks.bos,
        choch: breaks.choch,
        order_blocks,
        config,
    }
}

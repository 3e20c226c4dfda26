//! Order-block extraction.
//!
//! For every structure break, the bars before the breaking candle are scanned newest to
//! oldest, at most `lookback` of them, for the first candle of the opposite colour: a bearish
//! candle (`close < open`) for a bullish break, a bullish one (`close > open`) for a bearish
//! break. Dojis never qualify. A break with no such candle in range gets no block.
//!
//! Breaks are visited in `break_bar_index` order with `BOS` before `CHoCH` on ties; when two
//! breaks land on the same candle the first visited keeps it. The list is returned most
//! recent first and cut to `max_count`, dropping the oldest blocks.

use std::collections::BTreeMap;

use crate::{
    models::{
        bar::PriceBar,
        order_block::OrderBlock,
        structure::{Direction, StructureBreak},
    },
    structure::StructureBreaks,
};

/// Locates the originating candle of a single break.
pub fn find_order_block(
    brk: &StructureBreak,
    bars: &[PriceBar],
    lookback: usize,
) -> Option<OrderBlock> {
    let end = brk.break_bar_index.min(bars.len());
    let start = end.saturating_sub(lookback);

    bars[start..end]
        .iter()
        .rev()
        .find(|bar| match brk.direction {
            Direction::Bull => bar.is_bearish(),
            Direction::Bear => bar.is_bullish(),
        })
        .map(|bar| OrderBlock {
            direction: brk.direction,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            time: bar.time,
            bar_index: bar.index,
            source_category: brk.category,
        })
}

/// Collects the order blocks of every break, deduplicated by bar and newest first.
pub fn extract_order_blocks(
    breaks: &StructureBreaks,
    bars: &[PriceBar],
    lookback: usize,
    max_count: usize,
) -> Vec<OrderBlock> {
    let mut by_bar: BTreeMap<usize, OrderBlock> = BTreeMap::new();
    for brk in breaks.chronological() {
        if let Some(block) = find_order_block(&brk, bars, lookback) {
            by_bar.entry(block.bar_index).or_insert(block);
        }
    }
    by_bar.into_values().rev().take(max_count).collect()
}

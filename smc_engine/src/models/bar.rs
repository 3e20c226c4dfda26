//! Price bars as consumed by the analysis engine.
//!
//! The price feed supplies [`FeedBar`] records, oldest first. [`BarSeries::from_feed`]
//! stamps each one with its position in the window and groups the window with its
//! instrument and [`Timeframe`], which is what every analysis stage reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AnalysisError, BarDefect},
    models::timeframe::Timeframe,
};

/// One OHLC interval as delivered by the price feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedBar {
    /// Interval open time (UTC).
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single bar inside an analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Position in the window; 0 is the oldest bar.
    pub index: usize,

    /// Interval open time (UTC).
    pub time: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the interval.
    pub high: f64,

    /// Lowest price during the interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,
}

impl PriceBar {
    pub fn new(index: usize, bar: FeedBar) -> Self {
        Self {
            index,
            time: bar.time,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        }
    }

    /// `close < open`.
    #[inline]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// `close > open`.
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    fn defect(&self) -> Option<BarDefect> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Some(BarDefect::NonFinite { field, value });
            }
        }
        if self.high < self.low {
            return Some(BarDefect::HighBelowLow {
                high: self.high,
                low: self.low,
            });
        }
        None
    }
}

/// A window of bars for one instrument and one timeframe.
///
/// The series owns its bars; every analysis run works over its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Instrument identifier (e.g., "EURUSD", "XAUUSD").
    pub symbol: String,
    /// The interval each bar covers.
    pub timeframe: Timeframe,
    /// Bars in ascending chronological order.
    pub bars: Vec<PriceBar>,
}

impl BarSeries {
    /// Builds a series from already-indexed bars. Indices are checked by [`BarSeries::validate`].
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            bars,
        }
    }

    /// Builds a series from feed records, assigning `index` by position.
    pub fn from_feed(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        feed: impl IntoIterator<Item = FeedBar>,
    ) -> Self {
        let bars = feed
            .into_iter()
            .enumerate()
            .map(|(i, bar)| PriceBar::new(i, bar))
            .collect();
        Self::new(symbol, timeframe, bars)
    }

    /// Returns a copy holding only the most recent `count` bars, re-indexed from 0.
    pub fn latest(&self, count: usize) -> Self {
        let skip = self.bars.len().saturating_sub(count);
        let bars = self.bars[skip..]
            .iter()
            .enumerate()
            .map(|(i, bar)| PriceBar { index: i, ..*bar })
            .collect();
        Self::new(self.symbol.clone(), self.timeframe, bars)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Rejects the window if any bar is corrupt.
    ///
    /// A bar is rejected when a price is non-finite, `high < low`, its index does not match
    /// its position, or its time precedes the previous bar's. Gaps in time are fine.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let mut previous: Option<DateTime<Utc>> = None;
        for (position, bar) in self.bars.iter().enumerate() {
            let defect = if bar.index != position {
                Some(BarDefect::IndexMismatch {
                    expected: position,
                    found: bar.index,
                })
            } else if previous.is_some_and(|prev| bar.time < prev) {
                Some(BarDefect::OutOfOrder)
            } else {
                bar.defect()
            };
            if let Some(defect) = defect {
                return Err(AnalysisError::MalformedBar {
                    index: position,
                    defect,
                });
            }
            previous = Some(bar.time);
        }
        Ok(())
    }
}

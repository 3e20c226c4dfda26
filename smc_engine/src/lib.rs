//! Smart Money Concepts market-structure analysis.
//!
//! The engine scans a window of price bars and derives, in order:
//!
//! 1. swing points (fractal highs/lows) labelled `HH`/`LH`/`HL`/`LL` ([`swing`]),
//! 2. structure breaks, split into `BOS` (continuation) and `CHoCH` (reversal) ([`structure`]),
//! 3. order blocks, the opposite-colour candle that preceded each break ([`order_block`]),
//! 4. one immutable [`AnalysisResult`](models::result::AnalysisResult) ([`assembler`]).
//!
//! Every call recomputes from scratch; nothing is cached between invocations and no stage
//! performs I/O. Fetching bars and publishing results belong to the host.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use smc_engine::{analyze, AnalysisParams, BarSeries, FeedBar, RenderHints, Timeframe};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let highs = [1.0, 2.0, 5.0, 2.0, 1.0];
//! let feed = highs.iter().enumerate().map(|(i, h)| FeedBar {
//!     time: start + chrono::Duration::hours(i as i64),
//!     open: h - 0.5,
//!     high: *h,
//!     low: h - 1.0,
//!     close: h - 0.25,
//! });
//! let series = BarSeries::from_feed("EURUSD", Timeframe::H1, feed);
//! let params = AnalysisParams { strength: 2, ..AnalysisParams::default() };
//!
//! let result = analyze(&series, &params, RenderHints::default(), start).unwrap();
//! assert_eq!(result.swings.len(), 1);
//! ```

pub mod analysis;
pub mod assembler;
pub mod errors;
pub mod models;
pub mod order_block;
pub mod params;
pub mod structure;
pub mod swing;

pub use analysis::analyze;
pub use errors::{AnalysisError, BarDefect};
pub use models::{
    bar::{BarSeries, FeedBar, PriceBar},
    order_block::OrderBlock,
    result::{AnalysisResult, RenderHints},
    structure::{BreakCategory, Direction, StructureBreak},
    swing::{SwingKind, SwingLabel, SwingPoint},
    timeframe::{Timeframe, TimeframeError, TimeframeUnit},
};
pub use params::AnalysisParams;
pub use structure::{StructureBreaks, Trend};

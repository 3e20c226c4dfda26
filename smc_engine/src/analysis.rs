//! The analysis pipeline: bars → swings → breaks → order blocks → result.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::{
    assembler::assemble,
    errors::AnalysisError,
    models::{
        bar::BarSeries,
        result::{AnalysisResult, RenderHints},
    },
    order_block::extract_order_blocks,
    params::AnalysisParams,
    structure::analyze_structure,
    swing::{classify_swings, detect_swings},
};

/// Runs a full analysis over `series`.
///
/// Deterministic: the same series, parameters, hints and `generated_at` always produce an
/// identical result. The run either succeeds as a whole or fails with the first error raised;
/// there are no partial results.
///
/// # Errors
/// - [`AnalysisError::InvalidConfiguration`] when `params` fails validation.
/// - [`AnalysisError::MalformedBar`] when any bar is corrupt.
/// - [`AnalysisError::InsufficientData`] when `params.require_classified_swing` is set and
///   the window produced no classified swing.
#[instrument(skip_all, fields(symbol = %series.symbol, timeframe = %series.timeframe, bars = series.len()))]
pub fn analyze(
    series: &BarSeries,
    params: &AnalysisParams,
    hints: RenderHints,
    generated_at: DateTime<Utc>,
) -> Result<AnalysisResult, AnalysisError> {
    params.validate()?;
    series.validate()?;

    let bars = series.bars.as_slice();
    let swings = classify_swings(detect_swings(bars, params.strength));
    debug!(swings = swings.len(), strength = params.strength, "swings detected");

    if params.require_classified_swing && !swings.iter().any(|s| s.label.is_classified()) {
        return Err(AnalysisError::InsufficientData {
            bars: bars.len(),
            // two same-kind swings are needed, the second one `strength + 1` bars later at best
            required: params.min_bars_for_swing() + params.strength + 1,
        });
    }

    let breaks = analyze_structure(&swings, bars);
    debug!(bos = breaks.bos.len(), choch = breaks.choch.len(), trend = ?breaks.trend, "structure analysed");

    let order_blocks = extract_order_blocks(&breaks, bars, params.lookback, params.max_order_blocks);
    debug!(order_blocks = order_blocks.len(), lookback = params.lookback, "order blocks extracted");

    info!(
        swings = swings.len(),
        bos = breaks.bos.len(),
        choch = breaks.choch.len(),
        order_blocks = order_blocks.len(),
        "analysis complete"
    );

    Ok(assemble(
        series.symbol.clone(),
        series.timeframe,
        generated_at,
        swings,
        breaks,
        order_blocks,
        hints,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::models::{bar::FeedBar, timeframe::Timeframe};

    fn zigzag(len: usize) -> BarSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let feed = (0..len).map(|i| {
            let mid = 1.0 + ((i as f64) * 0.7).sin() * 0.1 + i as f64 * 0.002;
            FeedBar {
                time: start + Duration::hours(i as i64),
                open: mid - 0.01,
                high: mid + 0.02,
                low: mid - 0.02,
                close: mid + if i % 3 == 0 { -0.015 } else { 0.01 },
            }
        });
        BarSeries::from_feed("EURUSD", Timeframe::H1, feed)
    }

    #[test]
    fn invalid_params_fail_before_bars_are_inspected() {
        let mut series = zigzag(20);
        series.bars[3].high = f64::INFINITY;
        let params = AnalysisParams { strength: 0, ..AnalysisParams::default() };
        let err = analyze(&series, &params, RenderHints::default(), Utc::now()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfiguration(_)));
    }

    #[test]
    fn malformed_bar_rejects_whole_window() {
        let mut series = zigzag(40);
        series.bars[12].low = series.bars[12].high + 1.0;
        let err = analyze(&series, &AnalysisParams::default(), RenderHints::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedBar { index: 12, .. }));
    }

    #[test]
    fn short_window_is_empty_unless_classification_required() {
        let series = zigzag(6);
        let params = AnalysisParams { strength: 3, ..AnalysisParams::default() };
        let result = analyze(&series, &params, RenderHints::default(), Utc::now()).unwrap();
        assert!(result.swings.is_empty());
        assert!(result.order_blocks.is_empty());

        let strict = AnalysisParams { require_classified_swing: true, ..params };
        let err = analyze(&series, &strict, RenderHints::default(), Utc::now()).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { bars: 6, .. }));
    }

    #[test]
    fn long_trending_window_without_classified_swing_is_insufficient() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let feed = (0..100).map(|i| {
            let mid = 1.0 + i as f64 * 0.01;
            FeedBar {
                time: start + Duration::hours(i as i64),
                open: mid,
                high: mid + 0.005,
                low: mid - 0.005,
                close: mid + 0.002,
            }
        });
        let series = BarSeries::from_feed("EURUSD", Timeframe::H1, feed);
        let params = AnalysisParams { require_classified_swing: true, ..AnalysisParams::default() };

        let err = analyze(&series, &params, RenderHints::default(), Utc::now()).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { bars: 100, required: 17 });
        let message = err.to_string();
        assert!(message.contains("no classified swing in 100 bars"), "{message}");
        assert!(!message.contains("needed"));
    }

    #[test]
    fn result_carries_identifiers_and_hints() {
        let series = zigzag(120);
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let hints = RenderHints { line_style: "STYLE_DOT".into(), ..RenderHints::default() };
        let params = AnalysisParams { strength: 2, ..AnalysisParams::default() };
        let result = analyze(&series, &params, hints.clone(), at).unwrap();
        assert_eq!(result.symbol, "EURUSD");
        assert_eq!(result.timeframe, Timeframe::H1);
        assert_eq!(result.generated_at, at);
        assert_eq!(result.config, hints);
        assert!(!result.swings.is_empty());
    }
}

//! Fractal swing detection and HH/LH/HL/LL classification.
//!
//! A bar is a swing high when its `high` is strictly above the highs of the `strength` bars
//! on either side; swing lows mirror this on `low`. Ties never qualify. The same bar may be
//! both a swing high and a swing low, and both are kept.
//!
//! Classification walks the swings in bar order, tracking the last price of each kind
//! separately. The first swing of each kind stays [`SwingLabel::Unclassified`].

use crate::models::{
    bar::PriceBar,
    swing::{SwingKind, SwingLabel, SwingPoint},
};

/// Finds every fractal swing in `bars`, ordered by bar index (high before low on a shared bar).
///
/// Windows shorter than `2 * strength + 1` yield no swings. `strength` is expected to be at
/// least 1; callers validate it through [`AnalysisParams`](crate::params::AnalysisParams).
pub fn detect_swings(bars: &[PriceBar], strength: usize) -> Vec<SwingPoint> {
    let n = bars.len();
    if strength == 0 || n < 2 * strength + 1 {
        return Vec::new();
    }

    let mut swings = Vec::new();
    for i in strength..n - strength {
        let bar = &bars[i];
        let neighbours = || bars[i - strength..i].iter().chain(&bars[i + 1..=i + strength]);

        if neighbours().all(|other| bar.high > other.high) {
            swings.push(candidate(bar, SwingKind::High));
        }
        if neighbours().all(|other| bar.low < other.low) {
            swings.push(candidate(bar, SwingKind::Low));
        }
    }
    swings
}

fn candidate(bar: &PriceBar, kind: SwingKind) -> SwingPoint {
    let price = match kind {
        SwingKind::High => bar.high,
        SwingKind::Low => bar.low,
    };
    SwingPoint {
        kind,
        label: SwingLabel::Unclassified,
        price,
        time: bar.time,
        bar_index: bar.index,
    }
}

/// Labels each swing against the previous swing of the same kind.
///
/// Highs: `HH` when strictly above the previous high, otherwise `LH`.
/// Lows: `HL` when strictly above the previous low, otherwise `LL`.
pub fn classify_swings(swings: Vec<SwingPoint>) -> Vec<SwingPoint> {
    let mut prev_high: Option<f64> = None;
    let mut prev_low: Option<f64> = None;

    swings
        .into_iter()
        .map(|swing| {
            let prev = match swing.kind {
                SwingKind::High => prev_high.replace(swing.price),
                SwingKind::Low => prev_low.replace(swing.price),
            };
            let label = match (swing.kind, prev) {
                (_, None) => SwingLabel::Unclassified,
                (SwingKind::High, Some(p)) if swing.price > p => SwingLabel::HH,
                (SwingKind::High, Some(_)) => SwingLabel::LH,
                (SwingKind::Low, Some(p)) if swing.price > p => SwingLabel::HL,
                (SwingKind::Low, Some(_)) => SwingLabel::LL,
            };
            SwingPoint { label, ..swing }
        })
        .collect()
}

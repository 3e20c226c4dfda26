#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use smc_engine::{BarSeries, FeedBar, PriceBar, SwingKind, SwingLabel, SwingPoint, Timeframe};

pub fn ts(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(i as i64)
}

/// Flat candles (open == close) with the given highs; lows sit half a point below.
pub fn series_from_highs(highs: &[f64]) -> BarSeries {
    let feed = highs.iter().enumerate().map(|(i, &high)| FeedBar {
        time: ts(i),
        open: high - 0.25,
        high,
        low: high - 0.5,
        close: high - 0.25,
    });
    BarSeries::from_feed("EURUSD", Timeframe::H1, feed)
}

/// Bars whose only meaningful field is `close`.
pub fn bars_with_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            index: i,
            time: ts(i),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
        })
        .collect()
}

pub fn swing(label: SwingLabel, price: f64, bar_index: usize) -> SwingPoint {
    let kind = match label {
        SwingLabel::HH | SwingLabel::LH => SwingKind::High,
        _ => SwingKind::Low,
    };
    SwingPoint {
        kind,
        label,
        price,
        time: ts(bar_index),
        bar_index,
    }
}

/// Random-walk candles on a 0.25 grid so that equal highs/lows (ties) show up often.
pub fn arb_series(max_len: usize) -> impl Strategy<Value = BarSeries> {
    prop::collection::vec((-4i32..=4, -3i32..=3, 0i32..=3, 0i32..=3), 0..max_len).prop_map(
        |steps| {
            let mut mid = 400i32;
            let feed: Vec<FeedBar> = steps
                .iter()
                .enumerate()
                .map(|(i, &(drift, body, wick_up, wick_down))| {
                    mid = (mid + drift).max(20);
                    let open = mid;
                    let close = mid + body;
                    let high = open.max(close) + wick_up;
                    let low = open.min(close) - wick_down;
                    let q = |v: i32| f64::from(v) * 0.25;
                    FeedBar {
                        time: ts(i),
                        open: q(open),
                        high: q(high),
                        low: q(low),
                        close: q(close),
                    }
                })
                .collect();
            BarSeries::from_feed("EURUSD", Timeframe::H1, feed)
        },
    )
}

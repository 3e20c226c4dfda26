use thiserror::Error;

/// The unified error type for the `smc_engine` crate.
///
/// Every variant is fatal to the single invocation that raised it. No stage catches an
/// error from an earlier stage, so what the caller sees is exactly what was raised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A parameter is outside its legal range (e.g. `strength < 1`).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The caller asked for classified swings but the window produced none.
    ///
    /// `required` is the smallest window that could hold one; a longer window without any
    /// (a steady trend, say) fails the same way.
    #[error(
        "Insufficient data: no classified swing in {bars} bars (the minimum window for one is {required} bars)"
    )]
    InsufficientData { bars: usize, required: usize },

    /// A bar failed validation; the whole window is rejected.
    #[error("Malformed bar at index {index}: {defect}")]
    MalformedBar { index: usize, defect: BarDefect },
}

/// What exactly is wrong with a rejected bar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarDefect {
    #[error("{field} is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("high {high} is below low {low}")]
    HighBelowLow { high: f64, low: f64 },

    #[error("bar carries index {found}, expected {expected}")]
    IndexMismatch { expected: usize, found: usize },

    #[error("timestamp precedes the previous bar")]
    OutOfOrder,
}

//! Break-of-structure / change-of-character detection.
//!
//! The analyzer threads a small [`StructureState`] (trend flag plus the last swing seen for
//! each of the four labels) through the classified swings in bar order:
//!
//! - an `HH` swing that clears its reference high is confirmed by the first later bar that
//!   closes above that high and yields a bullish break;
//! - an `LL` swing does the same below its reference low for a bearish break;
//! - `LH`/`HL` swings only update the tracked levels.
//!
//! Confirmation never reaches back past the last emitted break, so breaks come out in candle
//! order and the trend flips in the same order a reader of the chart sees them.
//!
//! The reference for an `HH` is the most recent `LH`, unless the trend is already bullish, in
//! which case it is the most recent classified high of either label (so successive higher highs
//! produce continuation breaks). `LL` mirrors this. A bullish break is a `CHoCH` unless the
//! trend was already bullish, in which case it is a `BOS`; the trend starts out as
//! [`Trend::None`], so the first break of a window is always a `CHoCH`.
//!
//! Unclassified swings never take part. Missing references or unconfirmed swings simply
//! produce nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::{
    bar::PriceBar,
    structure::{BreakCategory, BreakKey, Direction, StructureBreak},
    swing::{SwingLabel, SwingPoint},
};

/// Prevailing market direction as established by the last emitted break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[default]
    None,
    Bull,
    Bear,
}

impl From<Direction> for Trend {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Bull => Trend::Bull,
            Direction::Bear => Trend::Bear,
        }
    }
}

/// Trend plus the last swing of each label seen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StructureState {
    pub trend: Trend,
    /// Bar index of the last emitted break.
    pub last_break: Option<usize>,
    pub last_hh: Option<SwingPoint>,
    pub last_lh: Option<SwingPoint>,
    pub last_hl: Option<SwingPoint>,
    pub last_ll: Option<SwingPoint>,
}

impl StructureState {
    /// Evaluates `swing` against the current state.
    ///
    /// Returns the state with `swing` recorded in its label slot (trend untouched) and the
    /// break the swing confirms, if any.
    pub fn advance(self, swing: &SwingPoint, bars: &[PriceBar]) -> (Self, Option<StructureBreak>) {
        let candidate = match swing.label {
            SwingLabel::HH => self
                .reference(Direction::Bull)
                .filter(|reference| swing.price > reference.price)
                .and_then(|reference| self.confirm(&reference, Direction::Bull, bars)),
            SwingLabel::LL => self
                .reference(Direction::Bear)
                .filter(|reference| swing.price < reference.price)
                .and_then(|reference| self.confirm(&reference, Direction::Bear, bars)),
            SwingLabel::LH | SwingLabel::HL | SwingLabel::Unclassified => None,
        };
        (self.record(swing), candidate)
    }

    /// Level a swing in `direction` has to break.
    fn reference(&self, direction: Direction) -> Option<SwingPoint> {
        match (direction, self.trend) {
            (Direction::Bull, Trend::Bull) => most_recent(self.last_hh, self.last_lh),
            (Direction::Bull, _) => self.last_lh,
            (Direction::Bear, Trend::Bear) => most_recent(self.last_ll, self.last_hl),
            (Direction::Bear, _) => self.last_hl,
        }
    }

    fn record(self, swing: &SwingPoint) -> Self {
        let slot = Some(*swing);
        match swing.label {
            SwingLabel::HH => Self { last_hh: slot, ..self },
            SwingLabel::LH => Self { last_lh: slot, ..self },
            SwingLabel::HL => Self { last_hl: slot, ..self },
            SwingLabel::LL => Self { last_ll: slot, ..self },
            SwingLabel::Unclassified => self,
        }
    }

    /// State after `brk` was emitted: trend follows its direction.
    fn after_break(self, brk: &StructureBreak) -> Self {
        Self {
            trend: brk.direction.into(),
            last_break: Some(brk.break_bar_index),
            ..self
        }
    }

    /// Scans forward for the first close beyond `reference`, starting after both the
    /// reference bar and the last emitted break.
    fn confirm(
        &self,
        reference: &SwingPoint,
        direction: Direction,
        bars: &[PriceBar],
    ) -> Option<StructureBreak> {
        let level = reference.price;
        let from = self
            .last_break
            .map_or(reference.bar_index, |last| last.max(reference.bar_index))
            + 1;
        let breaker = bars.iter().skip(from).find(|bar| match direction {
            Direction::Bull => bar.close > level,
            Direction::Bear => bar.close < level,
        })?;

        let category = if self.trend == Trend::from(direction) {
            BreakCategory::BOS
        } else {
            BreakCategory::CHoCH
        };
        Some(StructureBreak {
            category,
            direction,
            level,
            start_time: reference.time,
            start_bar_index: reference.bar_index,
            break_time: breaker.time,
            break_bar_index: breaker.index,
        })
    }
}

fn most_recent(a: Option<SwingPoint>, b: Option<SwingPoint>) -> Option<SwingPoint> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.bar_index > a.bar_index { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// Output of [`analyze_structure`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureBreaks {
    /// Continuation breaks ordered by `break_bar_index`.
    pub bos: Vec<StructureBreak>,
    /// Reversal breaks ordered by `break_bar_index`.
    pub choch: Vec<StructureBreak>,
    /// Trend after the last swing.
    pub trend: Trend,
}

impl StructureBreaks {
    /// Both collections merged in `break_bar_index` order, `BOS` first on ties.
    pub fn chronological(&self) -> Vec<StructureBreak> {
        let mut all: Vec<StructureBreak> = self.bos.iter().chain(&self.choch).copied().collect();
        all.sort_by_key(|brk| brk.break_bar_index);
        all
    }

    pub fn len(&self) -> usize {
        self.bos.len() + self.choch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bos.is_empty() && self.choch.is_empty()
    }
}

/// Runs the trend state machine over classified `swings`.
///
/// A candidate whose `(category, direction, level)` was already emitted is dropped and
/// leaves the trend where it was.
pub fn analyze_structure(swings: &[SwingPoint], bars: &[PriceBar]) -> StructureBreaks {
    let mut seen: HashSet<BreakKey> = HashSet::new();
    let mut emitted: Vec<StructureBreak> = Vec::new();

    let state = swings
        .iter()
        .filter(|swing| swing.label.is_classified())
        .fold(StructureState::default(), |state, swing| {
            match state.advance(swing, bars) {
                (next, Some(brk)) if seen.insert(brk.key()) => {
                    trace!(
                        category = %brk.category,
                        direction = %brk.direction,
                        level = brk.level,
                        break_bar = brk.break_bar_index,
                        "structure break"
                    );
                    emitted.push(brk);
                    next.after_break(&brk)
                }
                (next, _) => next,
            }
        });

    let (mut bos, mut choch): (Vec<_>, Vec<_>) = emitted
        .into_iter()
        .partition(|brk| brk.category == BreakCategory::BOS);
    bos.sort_by_key(|brk| brk.break_bar_index);
    choch.sort_by_key(|brk| brk.break_bar_index);

    StructureBreaks {
        bos,
        choch,
        trend: state.trend,
    }
}

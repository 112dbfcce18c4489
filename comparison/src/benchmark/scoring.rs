//! Scoring engine: folds distance and wall time into one efficiency score.
//!
//! Works over the completed subset of a [`ResultMap`]:
//! - Distance and time are min-max normalized across that subset
//!   (lower is better for both).
//! - Distance carries 70% of the score, time 30%.
//! - Best/worst flags mark exact equality with the extremes; ties are not
//!   broken, every tied entry is flagged.

use super::types::{CompletedResult, PerformanceRating, ResultMap};

/// Weight of the distance component in the efficiency score.
pub const DISTANCE_WEIGHT: f64 = 70.0;
/// Weight of the time component in the efficiency score.
pub const TIME_WEIGHT: f64 = 30.0;

/// Extremes of one metric over the completed subset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Range { min: v, max: v }),
            Some(r) => Some(Range {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Weighted, normalized standing of `value` (max → 0, min → `weight`).
    ///
    /// A zero span carries no distinguishing information: every entry gets
    /// the full weight.
    pub fn component(&self, value: f64, weight: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            return weight;
        }
        (self.max - value) / span * weight
    }
}

/// Distance and time extremes over the completed subset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    pub distance: Range,
    pub time: Range,
}

impl MetricBounds {
    /// Bounds over completed entries; `None` when there are none.
    pub fn from_results(results: &ResultMap) -> Option<Self> {
        let completed = || results.values().filter_map(|e| e.as_completed());
        Some(Self {
            distance: Range::of(completed().map(|r| r.total_distance))?,
            time: Range::of(completed().map(|r| r.execution_time))?,
        })
    }

    /// Integer efficiency score in `0..=100`.
    pub fn efficiency_score(&self, result: &CompletedResult) -> u8 {
        let distance_score = self.distance.component(result.total_distance, DISTANCE_WEIGHT);
        let time_score = self.time.component(result.execution_time, TIME_WEIGHT);
        (distance_score + time_score).round().clamp(0.0, 100.0) as u8
    }
}

/// Annotate every completed entry in place with score, rating and flags.
///
/// With no completed entries this is a no-op and existing data is left
/// untouched. Failed entries are never modified.
pub fn annotate(results: &mut ResultMap) {
    let Some(bounds) = MetricBounds::from_results(results) else {
        return;
    };

    for result in results.values_mut().filter_map(|e| e.as_completed_mut()) {
        let score = bounds.efficiency_score(result);
        result.efficiency_score = Some(score);
        result.performance_rating = Some(PerformanceRating::from_score(score));
        result.is_best_distance = result.total_distance == bounds.distance.min;
        result.is_worst_distance = result.total_distance == bounds.distance.max;
        result.is_best_time = result.execution_time == bounds.time.min;
        result.is_worst_time = result.execution_time == bounds.time.max;
    }

    tracing::debug!(
        min_distance = bounds.distance.min,
        max_distance = bounds.distance.max,
        min_time = bounds.time.min,
        max_time = bounds.time.max,
        "Annotated completed results"
    );
}

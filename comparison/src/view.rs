//! View models
//!
//! Pure transforms from annotated results to what a render surface paints.
//! Nothing here computes business values; rows and bars only format fields
//! the scoring engine already set.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::benchmark::{CompletedResult, ResultEntry, RunStatus};
use crate::points::Point;
use crate::registry::AlgorithmDescriptor;

/// Error text shown when a failed entry carries none
pub const DEFAULT_FAILURE_TEXT: &str = "Failed to run algorithm";

pub const BEST_COLOR: &str = "#4CAF50";
pub const WORST_COLOR: &str = "#F44336";
pub const DISTANCE_COLOR: &str = "#2196F3";
pub const TIME_COLOR: &str = "#FF9800";

pub const CHART_MAX_WIDTH_PX: u32 = 1000;
pub const CHART_HEIGHT_PX: u32 = 300;

/// Cells of one table row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowCells {
    Running,
    Completed {
        distance: String,
        time: String,
        efficiency: String,
        rating: String,
    },
    /// Error text spans the metric columns
    Failed { error: String },
}

/// One table row, keyed by algorithm id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub algorithm_id: String,
    pub name: String,
    pub status: RunStatus,
    pub cells: RowCells,
}

impl RowView {
    pub fn running(algorithm: &AlgorithmDescriptor) -> Self {
        Self {
            algorithm_id: algorithm.id.clone(),
            name: algorithm.name.clone(),
            status: RunStatus::Running,
            cells: RowCells::Running,
        }
    }

    pub fn from_entry(algorithm_id: &str, entry: &ResultEntry) -> Self {
        let cells = match entry {
            ResultEntry::Completed(r) => RowCells::Completed {
                distance: format!("{:.2}", r.total_distance),
                time: format!("{:.4}", r.execution_time),
                efficiency: r
                    .efficiency_score
                    .map(|s| format!("{s}%"))
                    .unwrap_or_default(),
                rating: r
                    .performance_rating
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "N/A".into()),
            },
            ResultEntry::Failed(r) => RowCells::Failed {
                error: if r.error.trim().is_empty() {
                    DEFAULT_FAILURE_TEXT.to_string()
                } else {
                    r.error.clone()
                },
            },
        };

        Self {
            algorithm_id: algorithm_id.to_string(),
            name: entry.name().to_string(),
            status: entry.status(),
            cells,
        }
    }

    /// Status badge text
    pub fn badge(&self) -> &'static str {
        self.status.label()
    }
}

/// Which of the two comparison charts a spec targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Distance,
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

/// Everything needed to draw one bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub slot: ChartSlot,
    pub title: &'static str,
    pub dataset_label: &'static str,
    pub y_axis_title: &'static str,
    pub begin_at_zero: bool,
    pub max_width_px: u32,
    pub height_px: u32,
    pub bars: Vec<Bar>,
}

impl ChartSpec {
    /// Distance chart over completed results, in the given order
    pub fn distance(completed: &[(&AlgorithmDescriptor, &CompletedResult)]) -> Self {
        Self::build(
            ChartSlot::Distance,
            "Total Distance Comparison",
            "Total Distance",
            "Distance Units",
            completed
                .iter()
                .map(|(_, r)| {
                    let color = bar_color(r.is_best_distance, r.is_worst_distance, DISTANCE_COLOR);
                    (r.name.clone(), r.total_distance, color)
                })
                .collect(),
        )
    }

    /// Execution time chart over completed results, in the given order
    pub fn time(completed: &[(&AlgorithmDescriptor, &CompletedResult)]) -> Self {
        Self::build(
            ChartSlot::Time,
            "Execution Time Comparison",
            "Execution Time",
            "Time (seconds)",
            completed
                .iter()
                .map(|(_, r)| {
                    let color = bar_color(r.is_best_time, r.is_worst_time, TIME_COLOR);
                    (r.name.clone(), r.execution_time, color)
                })
                .collect(),
        )
    }

    fn build(
        slot: ChartSlot,
        title: &'static str,
        dataset_label: &'static str,
        y_axis_title: &'static str,
        bars: Vec<(String, f64, &'static str)>,
    ) -> Self {
        Self {
            slot,
            title,
            dataset_label,
            y_axis_title,
            begin_at_zero: true,
            max_width_px: CHART_MAX_WIDTH_PX,
            height_px: CHART_HEIGHT_PX,
            bars: bars
                .into_iter()
                .map(|(label, value, color)| Bar {
                    label,
                    value,
                    color,
                })
                .collect(),
        }
    }
}

/// Best wins over worst when one entry is both (single result or full tie).
fn bar_color(is_best: bool, is_worst: bool, neutral: &'static str) -> &'static str {
    if is_best {
        BEST_COLOR
    } else if is_worst {
        WORST_COLOR
    } else {
        neutral
    }
}

/// Progress bar state during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub percent: u8,
    pub text: String,
}

impl ProgressView {
    /// `index` algorithms done out of `total`; `index == total` means finished.
    pub fn new(index: usize, total: usize) -> Self {
        if total == 0 || index >= total {
            return Self {
                percent: if total == 0 { 0 } else { 100 },
                text: "Completed!".to_string(),
            };
        }
        let percent = (index as f64 / total as f64 * 100.0).round() as u8;
        Self {
            percent,
            text: format!("Running {} of {}...", index + 1, total),
        }
    }
}

/// Point set summary shown next to the results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsView {
    pub count: usize,
    pub points: Vec<Point>,
}

impl PointsView {
    pub fn new(points: &[Point]) -> Self {
        Self {
            count: points.len(),
            points: points.to_vec(),
        }
    }

    pub fn summary(&self) -> String {
        match self.count {
            0 => "No points loaded".to_string(),
            1 => "1 point loaded".to_string(),
            n => format!("{n} points loaded"),
        }
    }
}

/// Last-updated stamp text
pub fn last_updated_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

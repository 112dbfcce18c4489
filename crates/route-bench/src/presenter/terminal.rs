//! Text render surface
//!
//! Keeps whatever was painted and renders it as plain text: a results
//! table followed by one horizontal bar chart per live chart.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use comparison::view::{BEST_COLOR, WORST_COLOR};
use comparison::{ChartSpec, PointsView, ProgressView, RowCells, RowView};

use super::{ChartHandle, RenderSurface};

const BAR_WIDTH: usize = 40;

/// Render surface that paints to a string
#[derive(Debug)]
pub struct TerminalSurface {
    rows: Vec<RowView>,
    charts: BTreeMap<ChartHandle, ChartSpec>,
    next_handle: u64,
    progress: Option<ProgressView>,
    loading: bool,
    trigger_enabled: bool,
    points: Option<PointsView>,
    last_updated: Option<String>,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            charts: BTreeMap::new(),
            next_handle: 1,
            progress: None,
            loading: false,
            trigger_enabled: true,
            points: None,
            last_updated: None,
        }
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn row(&self, algorithm_id: &str) -> Option<&RowView> {
        self.rows.iter().find(|r| r.algorithm_id == algorithm_id)
    }

    pub fn live_chart_count(&self) -> usize {
        self.charts.len()
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.charts.values()
    }

    pub fn progress(&self) -> Option<&ProgressView> {
        self.progress.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn points(&self) -> Option<&PointsView> {
        self.points.as_ref()
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    /// Render the painted state as text
    pub fn paint(&self) -> String {
        let mut out = String::new();

        if let Some(points) = &self.points {
            let _ = writeln!(out, "{}", points.summary());
        }
        if let Some(progress) = &self.progress {
            let _ = writeln!(out, "[{:>3}%] {}", progress.percent, progress.text);
        }

        if self.rows.is_empty() {
            out.push_str("No results yet\n");
        } else {
            let _ = writeln!(
                out,
                "{:<26} {:>12} {:>10} {:>10} {:>10}  {}",
                "Algorithm", "Distance", "Time (s)", "Efficiency", "Rating", "Status"
            );
            for row in &self.rows {
                paint_row(&mut out, row);
            }
        }

        for chart in self.charts.values() {
            out.push('\n');
            paint_chart(&mut out, chart);
        }

        if let Some(stamp) = &self.last_updated {
            let _ = writeln!(out, "\nLast updated: {stamp}");
        }
        out
    }
}

fn paint_row(out: &mut String, row: &RowView) {
    let badge = row.badge();
    let _ = match &row.cells {
        RowCells::Running => writeln!(out, "{:<26} {:<45}  {badge}", row.name, "Running..."),
        RowCells::Completed {
            distance,
            time,
            efficiency,
            rating,
        } => writeln!(
            out,
            "{:<26} {distance:>12} {time:>10} {efficiency:>10} {rating:>10}  {badge}",
            row.name
        ),
        RowCells::Failed { error } => writeln!(out, "{:<26} {:<45}  {badge}", row.name, error),
    };
}

fn paint_chart(out: &mut String, chart: &ChartSpec) {
    let _ = writeln!(out, "{} ({})", chart.title, chart.y_axis_title);

    let max = chart
        .bars
        .iter()
        .map(|b| b.value)
        .fold(0.0_f64, f64::max);
    for bar in &chart.bars {
        let len = if max > 0.0 {
            ((bar.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let marker = match bar.color {
            BEST_COLOR => " (best)",
            WORST_COLOR => " (worst)",
            _ => "",
        };
        let _ = writeln!(
            out,
            "{:<26} {:<width$} {}{marker}",
            bar.label,
            "█".repeat(len),
            bar.value,
            width = BAR_WIDTH
        );
    }
}

impl RenderSurface for TerminalSurface {
    fn upsert_row(&mut self, row: &RowView) {
        match self
            .rows
            .iter_mut()
            .find(|r| r.algorithm_id == row.algorithm_id)
        {
            Some(existing) => *existing = row.clone(),
            None => self.rows.push(row.clone()),
        }
    }

    fn remove_rows(&mut self) {
        self.rows.clear();
    }

    fn draw_chart(&mut self, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_handle);
        self.next_handle += 1;
        self.charts.insert(handle, spec.clone());
        handle
    }

    fn destroy_chart(&mut self, handle: ChartHandle) {
        self.charts.remove(&handle);
    }

    fn set_progress(&mut self, progress: &ProgressView) {
        self.progress = Some(progress.clone());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }

    fn show_points(&mut self, points: &PointsView) {
        self.points = Some(points.clone());
    }

    fn set_last_updated(&mut self, label: &str) {
        self.last_updated = Some(label.to_string());
    }
}

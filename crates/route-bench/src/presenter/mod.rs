//! Presenter
//!
//! Turns annotated results into view models and pushes them to a
//! [`RenderSurface`]. Every render is idempotent: rows are keyed by
//! algorithm id and charts are destroyed before they are redrawn.

pub mod terminal;

use std::collections::HashMap;

use comparison::view::last_updated_label;
use comparison::{
    completed_in_order, AlgorithmDescriptor, AlgorithmRegistry, ChartSlot, ChartSpec, Point,
    PointsView, ProgressView, ResultMap, RowView,
};

use crate::orchestrator::RunObserver;

pub use terminal::TerminalSurface;

/// Opaque handle to a drawn chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(pub u64);

/// Narrow drawing contract implemented by a concrete display
pub trait RenderSurface {
    /// Create the row for `row.algorithm_id`, or overwrite it entirely.
    fn upsert_row(&mut self, row: &RowView);

    fn remove_rows(&mut self);

    fn draw_chart(&mut self, spec: &ChartSpec) -> ChartHandle;

    fn destroy_chart(&mut self, handle: ChartHandle);

    fn set_progress(&mut self, progress: &ProgressView);

    fn set_loading(&mut self, loading: bool);

    /// Enable or disable the control that starts a run
    fn set_trigger_enabled(&mut self, enabled: bool);

    fn show_points(&mut self, points: &PointsView);

    fn set_last_updated(&mut self, label: &str);
}

/// Renders results onto a surface, tracking the charts it drew
pub struct Presenter<S: RenderSurface> {
    surface: S,
    charts: HashMap<ChartSlot, ChartHandle>,
}

impl<S: RenderSurface> Presenter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            charts: HashMap::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn render_row(&mut self, row: &RowView) {
        self.surface.upsert_row(row);
    }

    /// Render every entry of `results`, in registry order.
    pub fn render_results(&mut self, results: &ResultMap, registry: &AlgorithmRegistry) {
        for algorithm in registry.algorithms() {
            if let Some(entry) = results.get(&algorithm.id) {
                self.surface
                    .upsert_row(&RowView::from_entry(&algorithm.id, entry));
            }
        }
    }

    /// Redraw both comparison charts from the completed results.
    ///
    /// With nothing completed the current charts stay as they are.
    pub fn render_charts(&mut self, results: &ResultMap, registry: &AlgorithmRegistry) {
        let completed = completed_in_order(results, registry.algorithms());
        if completed.is_empty() {
            return;
        }

        self.destroy_charts();
        for spec in [ChartSpec::distance(&completed), ChartSpec::time(&completed)] {
            let handle = self.surface.draw_chart(&spec);
            self.charts.insert(spec.slot, handle);
        }

        self.surface
            .set_last_updated(&last_updated_label(&chrono::Local::now()));
    }

    pub fn set_progress(&mut self, index: usize, total: usize) {
        self.surface.set_progress(&ProgressView::new(index, total));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.surface.set_loading(loading);
    }

    pub fn set_trigger_enabled(&mut self, enabled: bool) {
        self.surface.set_trigger_enabled(enabled);
    }

    pub fn show_points(&mut self, points: &[Point]) {
        self.surface.show_points(&PointsView::new(points));
    }

    /// Remove every row and chart
    pub fn clear(&mut self) {
        self.surface.remove_rows();
        self.destroy_charts();
    }

    /// Handles of the charts currently drawn
    pub fn chart_handles(&self) -> Vec<ChartHandle> {
        let mut handles: Vec<_> = self.charts.values().copied().collect();
        handles.sort();
        handles
    }

    fn destroy_charts(&mut self) {
        for (_, handle) in self.charts.drain() {
            self.surface.destroy_chart(handle);
        }
    }
}

impl<S: RenderSurface> RunObserver for Presenter<S> {
    fn on_progress(&mut self, index: usize, total: usize) {
        self.set_progress(index, total);
    }

    fn on_running(&mut self, algorithm: &AlgorithmDescriptor) {
        self.surface.upsert_row(&RowView::running(algorithm));
    }
}

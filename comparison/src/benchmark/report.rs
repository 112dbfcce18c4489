//! Markdown report for a comparison session.

use super::types::{completed_in_order, ResultEntry};
use crate::registry::AlgorithmRegistry;
use crate::session::ComparisonSession;

/// Format a session as a human-readable comparison report.
///
/// Rows follow registry order; algorithms without an entry are listed as
/// not run.
pub fn format_report(session: &ComparisonSession, registry: &AlgorithmRegistry) -> String {
    let mut report = String::new();

    report.push_str("# Route Heuristic Comparison\n\n");
    report.push_str(&format!("Points: {}\n\n", session.points.len()));

    report.push_str("| Algorithm | Distance | Time (s) | Efficiency | Rating | Status |\n");
    report.push_str("|-----------|----------|----------|------------|--------|--------|\n");

    for algorithm in registry.algorithms() {
        match session.results.get(&algorithm.id) {
            Some(ResultEntry::Completed(r)) => {
                report.push_str(&format!(
                    "| {} | {:.2} | {:.4} | {} | {} | Completed |\n",
                    r.name,
                    r.total_distance,
                    r.execution_time,
                    r.efficiency_score
                        .map(|s| format!("{s}%"))
                        .unwrap_or_else(|| "-".into()),
                    r.performance_rating
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "N/A".into()),
                ));
            }
            Some(ResultEntry::Failed(r)) => {
                report.push_str(&format!(
                    "| {} | - | - | - | - | Failed: {} |\n",
                    r.name, r.error
                ));
            }
            None => {
                report.push_str(&format!(
                    "| {} | - | - | - | - | Not run |\n",
                    algorithm.name
                ));
            }
        }
    }

    let completed = completed_in_order(&session.results, registry.algorithms());
    let best_distance: Vec<&str> = completed
        .iter()
        .filter(|(_, r)| r.is_best_distance)
        .map(|(_, r)| r.name.as_str())
        .collect();
    let best_time: Vec<&str> = completed
        .iter()
        .filter(|(_, r)| r.is_best_time)
        .map(|(_, r)| r.name.as_str())
        .collect();

    if !completed.is_empty() {
        report.push('\n');
        report.push_str(&format!("Shortest route: {}\n", best_distance.join(", ")));
        report.push_str(&format!("Fastest solver: {}\n", best_time.join(", ")));
    }

    report
}

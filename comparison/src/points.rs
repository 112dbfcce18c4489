//! Points store: the ordered point set a comparison runs against
//!
//! The point editor is a separate tool; this store only accepts a finished
//! list, offers the sample and random sets, and validates input for a run.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};

/// Minimum number of points a run accepts
pub const MIN_POINTS: usize = 2;

/// Bounds applied to a requested random point count
pub const RANDOM_COUNT_RANGE: std::ops::RangeInclusive<usize> = 3..=20;

/// Random point count used when none is requested
pub const DEFAULT_RANDOM_COUNT: usize = 8;

/// A point on the warehouse floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `[x, y]` pair as carried by the solve request and response
    pub fn to_pair(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Serde adapter storing a `Vec<Point>` as `[[x, y], ...]`.
pub mod pairs {
    use super::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        let pairs: Vec<[f64; 2]> = points.iter().map(|p| p.to_pair()).collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let pairs = Vec::<[f64; 2]>::deserialize(deserializer)?;
        Ok(pairs.into_iter().map(Point::from).collect())
    }
}

/// Either point notation an editor export may use
#[derive(Deserialize)]
#[serde(untagged)]
enum PointInput {
    Object(Point),
    Pair([f64; 2]),
}

impl From<PointInput> for Point {
    fn from(input: PointInput) -> Self {
        match input {
            PointInput::Object(p) => p,
            PointInput::Pair(pair) => Point::from(pair),
        }
    }
}

/// Parse a JSON point list of `{x, y}` objects or `[x, y]` pairs.
pub fn parse_points(json: &str) -> BenchResult<Vec<Point>> {
    let inputs: Vec<PointInput> = serde_json::from_str(json)
        .map_err(|e| BenchError::invalid_points(format!("expected a JSON array of points: {e}")))?;

    let points: Vec<Point> = inputs.into_iter().map(Point::from).collect();
    if let Some(bad) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(BenchError::invalid_points(format!(
            "non-finite coordinate in {bad}"
        )));
    }
    Ok(points)
}

/// The fixed sample layout
pub fn sample_points() -> Vec<Point> {
    [
        (150.0, 100.0),
        (300.0, 150.0),
        (500.0, 120.0),
        (650.0, 200.0),
        (400.0, 300.0),
        (200.0, 350.0),
        (600.0, 400.0),
        (350.0, 450.0),
    ]
    .into_iter()
    .map(|(x, y)| Point::new(x, y))
    .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Holds the current ordered point set
#[derive(Debug, Clone, Default)]
pub struct PointsStore {
    points: Vec<Point>,
}

impl PointsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace the whole point set
    pub fn replace(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replace the point set with the sample layout
    pub fn load_sample(&mut self) {
        self.points = sample_points();
    }

    /// Load a point list written by the point editor
    pub fn load_file(&mut self, path: &Path) -> BenchResult<usize> {
        let json = std::fs::read_to_string(path)?;
        self.points = parse_points(&json)?;
        Ok(self.points.len())
    }

    /// Replace the point set with `count` random points.
    ///
    /// `count` is clamped to [`RANDOM_COUNT_RANGE`]; coordinates fall in
    /// `x ∈ [100, 700)`, `y ∈ [100, 400)` rounded to one decimal.
    /// Returns the number of points generated.
    pub fn generate_random<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let count = count.clamp(*RANDOM_COUNT_RANGE.start(), *RANDOM_COUNT_RANGE.end());
        self.points = (0..count)
            .map(|_| {
                Point::new(
                    round_tenth(100.0 + rng.gen::<f64>() * 600.0),
                    round_tenth(100.0 + rng.gen::<f64>() * 300.0),
                )
            })
            .collect();
        count
    }

    /// Check the run precondition and hand back the points to submit.
    pub fn validate_for_run(&self) -> BenchResult<&[Point]> {
        if self.points.len() < MIN_POINTS {
            return Err(BenchError::insufficient_points(self.points.len()));
        }
        Ok(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_validate_requires_two_points() {
        let store = PointsStore::from_points(vec![Point::new(1.0, 1.0)]);
        assert!(matches!(
            store.validate_for_run(),
            Err(BenchError::InsufficientPoints {
                count: 1,
                required: 2
            })
        ));

        let store = PointsStore::from_points(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
        assert_eq!(store.validate_for_run().unwrap().len(), 2);
    }

    #[test]
    fn test_sample_layout() {
        let mut store = PointsStore::new();
        store.load_sample();
        assert_eq!(store.len(), 8);
        assert_eq!(store.points()[0], Point::new(150.0, 100.0));
        assert_eq!(store.points()[7], Point::new(350.0, 450.0));
    }

    #[test]
    fn test_random_count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = PointsStore::new();

        assert_eq!(store.generate_random(1, &mut rng), 3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.generate_random(50, &mut rng), 20);
        assert_eq!(store.len(), 20);
    }

    #[test]
    fn test_random_points_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut store = PointsStore::new();
        store.generate_random(DEFAULT_RANDOM_COUNT, &mut rng);

        for p in store.points() {
            assert!((100.0..=700.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((100.0..=400.0).contains(&p.y), "y out of range: {}", p.y);
            assert_eq!(round_tenth(p.x), p.x);
        }
    }

    #[test]
    fn test_parse_points_accepts_both_notations() {
        let points = parse_points(r#"[{"x": 1.5, "y": 2}, [3, 4.25]]"#).unwrap();
        assert_eq!(points, vec![Point::new(1.5, 2.0), Point::new(3.0, 4.25)]);
    }

    #[test]
    fn test_parse_points_rejects_garbage() {
        assert!(parse_points(r#"{"points": []}"#).is_err());
        assert!(parse_points(r#"[{"x": 1}]"#).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.json");
        std::fs::write(&path, "[[10, 20], [30, 40], [50, 60]]").unwrap();

        let mut store = PointsStore::new();
        assert_eq!(store.load_file(&path).unwrap(), 3);
        assert_eq!(store.points()[2], Point::new(50.0, 60.0));
    }
}

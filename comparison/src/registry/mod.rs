//! Algorithm Registry: the fixed, ordered set of heuristics under comparison
//!
//! Declaration order is run order. Every other component joins on
//! [`AlgorithmDescriptor::id`].

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};

/// Static pairing of a stable algorithm identifier and its display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlgorithmDescriptor {
    /// Identifier sent to the solving service
    pub id: String,
    /// Human-readable name shown in rows and charts
    pub name: String,
}

impl AlgorithmDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for AlgorithmDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Ordered list of algorithm descriptors, defined once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmRegistry {
    algorithms: Vec<AlgorithmDescriptor>,
}

impl AlgorithmRegistry {
    /// Build a registry from descriptors, rejecting duplicate ids.
    pub fn new(algorithms: Vec<AlgorithmDescriptor>) -> BenchResult<Self> {
        for (i, algorithm) in algorithms.iter().enumerate() {
            if algorithms[..i].iter().any(|a| a.id == algorithm.id) {
                return Err(BenchError::DuplicateAlgorithm(algorithm.id.clone()));
            }
        }
        Ok(Self { algorithms })
    }

    /// The five heuristics offered by the solving service, in run order.
    pub fn standard() -> Self {
        Self {
            algorithms: vec![
                AlgorithmDescriptor::new("nearest_neighbor", "Nearest Neighbor"),
                AlgorithmDescriptor::new("greedy", "Greedy Algorithm"),
                AlgorithmDescriptor::new("genetic", "Genetic Algorithm"),
                AlgorithmDescriptor::new("dynamic", "Dynamic Programming"),
                AlgorithmDescriptor::new("aco", "Ant Colony Optimization"),
            ],
        }
    }

    /// All descriptors in declared order
    pub fn algorithms(&self) -> &[AlgorithmDescriptor] {
        &self.algorithms
    }

    /// Look up a descriptor by id
    pub fn get(&self, id: &str) -> Option<&AlgorithmDescriptor> {
        self.algorithms.iter().find(|a| a.id == id)
    }

    /// Whether `id` belongs to the registry
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Position of `id` in run order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.algorithms.iter().position(|a| a.id == id)
    }

    /// Display name for `id`, falling back to the id itself
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|a| a.name.as_str()).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let registry = AlgorithmRegistry::standard();
        let ids: Vec<&str> = registry.algorithms().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["nearest_neighbor", "greedy", "genetic", "dynamic", "aco"]
        );
    }

    #[test]
    fn test_lookup_and_position() {
        let registry = AlgorithmRegistry::standard();
        assert_eq!(registry.get("aco").unwrap().name, "Ant Colony Optimization");
        assert_eq!(registry.position("genetic"), Some(2));
        assert!(!registry.contains("astar"));
        assert_eq!(registry.display_name("astar"), "astar");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = AlgorithmRegistry::new(vec![
            AlgorithmDescriptor::new("greedy", "Greedy"),
            AlgorithmDescriptor::new("greedy", "Greedy Again"),
        ]);
        assert!(matches!(result, Err(BenchError::DuplicateAlgorithm(id)) if id == "greedy"));
    }
}

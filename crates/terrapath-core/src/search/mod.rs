//! Least-cost routing over a classified terrain grid.
pub mod astar;
pub(crate) mod open_set;

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::cost::is_passable;
use crate::grid::Cell;
use crate::terrain::TerrainGrid;

pub use astar::find_path;

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathFailure {
    /// An endpoint lies outside the grid.
    OutOfBounds,
    /// An endpoint sits on impassable terrain.
    Impassable,
    /// Every reachable cell was expanded without meeting the goal.
    NoPathExists,
}

/// Outcome of one search. Failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Cells from start to goal inclusive; empty on failure.
    pub path: Vec<Cell>,
    /// Total traversal cost; 0 for a trivial or failed search.
    pub distance: f64,
    pub success: bool,
    pub failure: Option<PathFailure>,
    /// Cells expanded before the search ended.
    pub nodes_expanded: usize,
    /// Wall-clock time, filled in by the host (the core has no clock on wasm).
    pub elapsed_ms: Option<f64>,
}

impl PathResult {
    pub(crate) fn found(path: Vec<Cell>, distance: f64, nodes_expanded: usize) -> Self {
        Self { path, distance, success: true, failure: None, nodes_expanded, elapsed_ms: None }
    }

    pub(crate) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            distance: 0.0,
            success: false,
            failure: Some(reason),
            nodes_expanded,
            elapsed_ms: None,
        }
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Traversal cost of an arbitrary path under the search's cost rule.
///
/// Returns `None` if the path leaves the grid, enters impassable terrain or
/// contains a move that is not a single orthogonal or diagonal step.
pub fn path_cost(path: &[Cell], grid: &TerrainGrid) -> Option<f64> {
    if let Some(first) = path.first() {
        if !is_passable(grid.cost_at(*first)?) {
            return None;
        }
    }
    let mut total = 0.0;
    for w in path.windows(2) {
        let (dx, dy) = (w[1].x.abs_diff(w[0].x), w[1].y.abs_diff(w[0].y));
        let step = match (dx, dy) {
            (0, 1) | (1, 0) => 1.0,
            (1, 1) => SQRT_2,
            _ => return None,
        };
        let cost = grid.cost_at(w[1])?;
        if !is_passable(cost) {
            return None;
        }
        total += cost * step;
    }
    Some(total)
}

/// Run independent searches over one shared grid in parallel.
#[cfg(feature = "threading")]
pub fn find_paths_parallel(grid: &TerrainGrid, queries: &[(Cell, Cell)]) -> Vec<PathResult> {
    use rayon::prelude::*;
    queries.par_iter().map(|&(start, goal)| find_path(grid, start, goal)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainCategory::*;

    #[test]
    fn path_cost_weights_diagonals() {
        let grid = TerrainGrid::filled(3, 3, Hills).unwrap();
        let path = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 1)];
        let cost = path_cost(&path, &grid).unwrap();
        assert!((cost - (2.0 * SQRT_2 + 2.0)).abs() < 1e-12);
    }

    #[test]
    fn path_cost_rejects_jumps_and_water() {
        let mut grid = TerrainGrid::filled(4, 1, Land).unwrap();
        assert_eq!(path_cost(&[Cell::new(0, 0), Cell::new(2, 0)], &grid), None);
        assert_eq!(path_cost(&[Cell::new(0, 0), Cell::new(0, 0)], &grid), None);
        grid.set(1, 0, Water);
        assert_eq!(path_cost(&[Cell::new(0, 0), Cell::new(1, 0)], &grid), None);
        assert_eq!(path_cost(&[Cell::new(3, 0), Cell::new(4, 0)], &grid), None);
    }

    #[test]
    fn path_cost_rejects_far_off_cells_without_overflow() {
        let grid = TerrainGrid::filled(4, 4, Land).unwrap();
        assert_eq!(path_cost(&[Cell::new(1, 0), Cell::new(i32::MIN, 0)], &grid), None);
        assert_eq!(path_cost(&[Cell::new(0, 3), Cell::new(0, i32::MAX)], &grid), None);
        assert_eq!(path_cost(&[Cell::new(i32::MIN, i32::MIN)], &grid), None);
    }

    #[test]
    fn empty_and_single_paths_cost_nothing() {
        let grid = TerrainGrid::filled(2, 2, Land).unwrap();
        assert_eq!(path_cost(&[], &grid), Some(0.0));
        assert_eq!(path_cost(&[Cell::new(1, 1)], &grid), Some(0.0));
    }

    #[test]
    fn failed_results_serialize_reason() {
        let json = serde_json::to_value(PathResult::failed(PathFailure::NoPathExists, 12)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["failure"], "no_path_exists");
        assert_eq!(json["path"].as_array().map(Vec::len), Some(0));
    }

    #[cfg(feature = "threading")]
    #[test]
    fn parallel_searches_match_sequential() {
        let grid = TerrainGrid::filled(32, 32, Land).unwrap();
        let queries: Vec<(Cell, Cell)> = (0..16)
            .map(|i| (Cell::new(i, 0), Cell::new(31 - i, 31)))
            .collect();
        let parallel = find_paths_parallel(&grid, &queries);
        for (&(s, g), r) in queries.iter().zip(&parallel) {
            assert_eq!(r, &find_path(&grid, s, g));
        }
    }
}

//! A* over the 8-connected terrain grid.
//!
//! Entering a cell costs that cell's terrain cost, times √2 for a diagonal
//! step. The heuristic is straight-line distance to the goal, which never
//! overestimates because every passable cost is at least 1.
use std::f64::consts::SQRT_2;

use tracing::debug;

use crate::cost::is_passable;
use crate::grid::Cell;
use crate::terrain::TerrainGrid;

use super::open_set::OpenSet;
use super::{PathFailure, PathResult};

/// Neighbour offsets: orthogonal first, then diagonal.
const NEIGHBOURS: [(i32, i32, f64); 8] = [
    (0, -1, 1.0),
    (0, 1, 1.0),
    (-1, 0, 1.0),
    (1, 0, 1.0),
    (-1, -1, SQRT_2),
    (1, -1, SQRT_2),
    (-1, 1, SQRT_2),
    (1, 1, SQRT_2),
];

/// Per-cell search record, stored in an arena indexed by cell.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: f64,
    parent: Option<usize>,
    closed: bool,
}

impl SearchNode {
    const UNSEEN: SearchNode = SearchNode { g: f64::INFINITY, parent: None, closed: false };
}

/// Find the cheapest 8-connected path from `start` to `goal`.
///
/// Never panics and never errors: off-grid or impassable endpoints and
/// unreachable goals come back as a failed [`PathResult`].
pub fn find_path(grid: &TerrainGrid, start: Cell, goal: Cell) -> PathResult {
    if let Some(failure) = precheck(grid, start, goal) {
        debug!(target: "terrapath::search", ?start, ?goal, ?failure, "rejected before search");
        return PathResult::failed(failure, 0);
    }
    if start == goal {
        return PathResult::found(vec![start], 0.0, 0);
    }

    let width = grid.width;
    let index = |c: Cell| c.y as usize * width + c.x as usize;
    let cell_at = |i: usize| Cell::new((i % width) as i32, (i / width) as i32);

    let start_idx = index(start);
    let goal_idx = index(goal);

    let mut nodes = vec![SearchNode::UNSEEN; grid.width * grid.height];
    let mut open = OpenSet::new(nodes.len());
    let mut expanded = 0usize;

    let h0 = start.distance(&goal);
    nodes[start_idx].g = 0.0;
    open.push_or_decrease(start_idx, h0, h0);

    while let Some(entry) = open.pop() {
        let current = entry.node;
        if nodes[current].closed {
            continue;
        }
        nodes[current].closed = true;

        if current == goal_idx {
            let path = reconstruct(&nodes, goal_idx, &cell_at);
            let distance = nodes[goal_idx].g;
            debug!(
                target: "terrapath::search",
                ?start,
                ?goal,
                distance,
                steps = path.len() - 1,
                expanded,
                "path found"
            );
            return PathResult::found(path, distance, expanded);
        }
        expanded += 1;

        let here = cell_at(current);
        let g_here = nodes[current].g;
        for &(dx, dy, step) in &NEIGHBOURS {
            let next = Cell::new(here.x + dx, here.y + dy);
            let Some(cost) = grid.cost_at(next) else { continue };
            if !is_passable(cost) {
                continue;
            }
            let ni = index(next);
            if nodes[ni].closed {
                continue;
            }
            let tentative = g_here + cost * step;
            if tentative < nodes[ni].g {
                nodes[ni].g = tentative;
                nodes[ni].parent = Some(current);
                let h = next.distance(&goal);
                open.push_or_decrease(ni, tentative + h, h);
            }
        }
    }

    debug!(target: "terrapath::search", ?start, ?goal, expanded, "open set exhausted");
    PathResult::failed(PathFailure::NoPathExists, expanded)
}

/// Endpoint checks made before any search state is allocated.
fn precheck(grid: &TerrainGrid, start: Cell, goal: Cell) -> Option<PathFailure> {
    let (Some(start_cost), Some(goal_cost)) = (grid.cost_at(start), grid.cost_at(goal)) else {
        return Some(PathFailure::OutOfBounds);
    };
    if !is_passable(start_cost) || !is_passable(goal_cost) {
        return Some(PathFailure::Impassable);
    }
    None
}

/// Walk parent links back from `goal` and return the path start-first.
fn reconstruct(nodes: &[SearchNode], goal: usize, cell_at: impl Fn(usize) -> Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(i) = cursor {
        path.push(cell_at(i));
        cursor = nodes[i].parent;
    }
    path.reverse();
    path
}

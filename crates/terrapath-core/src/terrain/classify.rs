//! Elevation → terrain category assignment.
//!
//! With every category visible a cell simply takes its natural category (see
//! [`TerrainTable::natural_category`]). When some categories are hidden the
//! classifier keeps natural categories that are still visible and moves the
//! rest to the visible category whose elevation band is centred closest, so
//! disabling a category blends its cells into their neighbours instead of
//! dumping them into one fallback. Land cells on a coastline become beach
//! Sand when Water or Land is hidden.
use crate::grid::ElevationField;

use super::{TerrainCategory, TerrainGrid, TerrainTable, Visibility, CATEGORY_COUNT};

/// Cells within this Euclidean distance of water count as coastline.
pub const BEACH_RADIUS: i32 = 1;

/// Classify with the shipped table. `None` means every category is visible.
pub fn classify(field: &ElevationField, visibility: Option<&Visibility>) -> TerrainGrid {
    classify_with(field, visibility, &TerrainTable::default())
}

/// Classify against an explicit table.
pub fn classify_with(
    field: &ElevationField,
    visibility: Option<&Visibility>,
    table: &TerrainTable,
) -> TerrainGrid {
    let cells = match visibility {
        None => field.data.iter().map(|&e| table.natural_category(e)).collect(),
        Some(v) => classify_filtered(field, v, table),
    };
    TerrainGrid::from_parts(field.width, field.height, cells, table.costs())
}

fn classify_filtered(field: &ElevationField, visibility: &Visibility, table: &TerrainTable) -> Vec<TerrainCategory> {
    let n = field.data.len();
    let active: Vec<TerrainCategory> = visibility.active().collect();
    match active.as_slice() {
        [] => return vec![TerrainCategory::Land; n],
        [only] => return vec![*only; n],
        _ => {}
    }

    let mut midpoints = [0.0f32; CATEGORY_COUNT];
    for &c in &active {
        midpoints[c.index()] = table.midpoint(c);
    }

    let beaches = visibility.is_visible(TerrainCategory::Sand)
        && !(visibility.is_visible(TerrainCategory::Water) && visibility.is_visible(TerrainCategory::Land));
    let water_line = table.boundary(TerrainCategory::Water);

    let mut out = Vec::with_capacity(n);
    for y in 0..field.height {
        for x in 0..field.width {
            let elevation = field.get(x, y);
            let natural = table.natural_category(elevation);

            let category = if beaches && natural == TerrainCategory::Land && near_water(field, x, y, water_line) {
                TerrainCategory::Sand
            } else if visibility.is_visible(natural) {
                natural
            } else {
                nearest_by_midpoint(elevation, &active, &midpoints)
            };
            out.push(category);
        }
    }
    out
}

/// True when some cell within [`BEACH_RADIUS`] lies below the water line.
fn near_water(field: &ElevationField, x: usize, y: usize, water_line: f32) -> bool {
    let r = BEACH_RADIUS;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 || nx >= field.width as i64 || ny >= field.height as i64 {
                continue;
            }
            if field.get(nx as usize, ny as usize) < water_line {
                return true;
            }
        }
    }
    false
}

/// Visible category whose band midpoint is closest to `elevation`.
/// Ties go to the earliest entry of `active`.
fn nearest_by_midpoint(
    elevation: f32,
    active: &[TerrainCategory],
    midpoints: &[f32; CATEGORY_COUNT],
) -> TerrainCategory {
    let mut best = active[0];
    let mut best_diff = (elevation - midpoints[best.index()]).abs();
    for &c in &active[1..] {
        let diff = (elevation - midpoints[c.index()]).abs();
        if diff < best_diff {
            best = c;
            best_diff = diff;
        }
    }
    best
}

//! Terrain categories, the definition table, visibility filtering and the
//! elevation → category classifier.
pub mod classify;
pub mod table;
pub mod visibility;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::{check_dimensions, Cell};

pub use classify::{classify, classify_with};
pub use table::{TerrainDefinition, TerrainTable};
pub use visibility::Visibility;

/// Number of terrain categories.
pub const CATEGORY_COUNT: usize = 6;

/// Discrete traversal class of a cell, ordered by elevation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainCategory {
    Water,
    Sand,
    Land,
    Hills,
    Mountain,
    Snow,
}

impl TerrainCategory {
    /// All categories in ascending elevation order.
    pub const ALL: [TerrainCategory; CATEGORY_COUNT] = [
        TerrainCategory::Water,
        TerrainCategory::Sand,
        TerrainCategory::Land,
        TerrainCategory::Hills,
        TerrainCategory::Mountain,
        TerrainCategory::Snow,
    ];

    /// Position in [`TerrainCategory::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainCategory::Water    => "water",
            TerrainCategory::Sand     => "sand",
            TerrainCategory::Land     => "land",
            TerrainCategory::Hills    => "hills",
            TerrainCategory::Mountain => "mountain",
            TerrainCategory::Snow     => "snow",
        }
    }
}

impl fmt::Display for TerrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerrainCategory {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        TerrainCategory::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| TerrainError::UnknownCategory(s.to_string()))
    }
}

/// Classified map: one category per cell, row-major, plus the movement cost
/// of each category as defined by the table it was classified with.
///
/// Only the categories are serialized. Infinite costs do not survive JSON,
/// so a deserialized grid always carries the shipped costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTerrainGrid")]
pub struct TerrainGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<TerrainCategory>,
    #[serde(skip)]
    costs: [f64; CATEGORY_COUNT],
}

#[derive(Deserialize)]
struct RawTerrainGrid {
    width: usize,
    height: usize,
    cells: Vec<TerrainCategory>,
}

impl TryFrom<RawTerrainGrid> for TerrainGrid {
    type Error = TerrainError;

    fn try_from(raw: RawTerrainGrid) -> Result<Self> {
        TerrainGrid::from_categories(raw.width, raw.height, raw.cells)
    }
}

impl TerrainGrid {
    /// Build a grid from row-major categories using the shipped cost table.
    pub fn from_categories(width: usize, height: usize, cells: Vec<TerrainCategory>) -> Result<Self> {
        check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        Ok(Self::from_parts(width, height, cells, TerrainTable::default_costs()))
    }

    /// Fill every cell with one category.
    pub fn filled(width: usize, height: usize, category: TerrainCategory) -> Result<Self> {
        Self::from_categories(width, height, vec![category; width * height])
    }

    /// Caller guarantees `cells.len() == width * height`.
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        cells: Vec<TerrainCategory>,
        costs: [f64; CATEGORY_COUNT],
    ) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells, costs }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> TerrainCategory {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, category: TerrainCategory) {
        self.cells[y * self.width + x] = category;
    }

    /// Category at `cell`, or `None` when the cell is off the grid.
    pub fn category_at(&self, cell: Cell) -> Option<TerrainCategory> {
        self.contains(cell).then(|| self.get(cell.x as usize, cell.y as usize))
    }

    /// Movement cost of entering `cell`; `None` when off the grid.
    pub fn cost_at(&self, cell: Cell) -> Option<f64> {
        self.category_at(cell).map(|c| self.cost_of(c))
    }

    #[inline]
    pub fn cost_of(&self, category: TerrainCategory) -> f64 {
        self.costs[category.index()]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Row-major category slice.
    pub fn cells(&self) -> &[TerrainCategory] {
        &self.cells
    }

    /// Number of cells per category, indexed like [`TerrainCategory::ALL`].
    pub fn category_counts(&self) -> [usize; CATEGORY_COUNT] {
        let mut counts = [0usize; CATEGORY_COUNT];
        for c in &self.cells {
            counts[c.index()] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_parse_case_insensitively() {
        assert_eq!("Mountain".parse::<TerrainCategory>(), Ok(TerrainCategory::Mountain));
        assert_eq!(" snow ".parse::<TerrainCategory>(), Ok(TerrainCategory::Snow));
        assert_eq!(
            "lava".parse::<TerrainCategory>(),
            Err(TerrainError::UnknownCategory("lava".into()))
        );
        for c in TerrainCategory::ALL {
            assert_eq!(c.name().parse::<TerrainCategory>(), Ok(c));
        }
    }

    #[test]
    fn categories_serialize_as_lowercase_names() {
        let json = serde_json::to_string(&TerrainCategory::Hills).unwrap();
        assert_eq!(json, "\"hills\"");
    }

    #[test]
    fn counts_cover_every_cell() {
        let mut grid = TerrainGrid::filled(4, 3, TerrainCategory::Land).unwrap();
        grid.set(0, 0, TerrainCategory::Water);
        grid.set(3, 2, TerrainCategory::Snow);
        let counts = grid.category_counts();
        assert_eq!(counts.iter().sum::<usize>(), 12);
        assert_eq!(counts[TerrainCategory::Water.index()], 1);
        assert_eq!(counts[TerrainCategory::Land.index()], 10);
    }

    #[test]
    fn cost_lookup_is_bounds_checked() {
        let grid = TerrainGrid::filled(2, 2, TerrainCategory::Hills).unwrap();
        assert_eq!(grid.cost_at(Cell::new(1, 1)), Some(TerrainCategory::Hills.cost()));
        assert_eq!(grid.cost_at(Cell::new(2, 0)), None);
        assert_eq!(grid.category_at(Cell::new(0, -1)), None);
    }

    #[test]
    fn contains_rejects_negative_and_overflowing_cells() {
        let grid = TerrainGrid::filled(4, 3, TerrainCategory::Land).unwrap();
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(3, 2)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(4, 0)));
        assert!(!grid.contains(Cell::new(0, 3)));
        assert!(!grid.contains(Cell::new(i32::MIN, i32::MAX)));
    }

    #[test]
    fn deserialized_grid_recovers_shipped_costs() {
        let grid = TerrainGrid::filled(2, 1, TerrainCategory::Water).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: TerrainGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(1, 0), TerrainCategory::Water);
        assert!(back.cost_of(TerrainCategory::Water).is_infinite());
    }

    #[test]
    fn deserialization_rejects_mismatched_cell_count() {
        let short = r#"{"width":4,"height":4,"cells":["land","land"]}"#;
        let err = serde_json::from_str::<TerrainGrid>(short).unwrap_err();
        assert!(err.to_string().contains("4x4"), "{err}");

        let empty = r#"{"width":0,"height":3,"cells":[]}"#;
        assert!(serde_json::from_str::<TerrainGrid>(empty).is_err());
    }
}

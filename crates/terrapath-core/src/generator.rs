//! Generation orchestrator: seed → elevation field → classified terrain grid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::grid::ElevationField;
use crate::noise::generate_elevation;
use crate::terrain::{classify_with, TerrainCategory, TerrainGrid, TerrainTable, Visibility};

/// Default map size used by hosts that do not specify one.
pub const DEFAULT_WIDTH: usize = 200;
pub const DEFAULT_HEIGHT: usize = 150;

/// User-facing generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub width: usize,
    pub height: usize,
    /// Fixed seed for reproducible maps; `None` draws a fresh one per call.
    pub seed: Option<u32>,
    /// Category name → visible. `None` classifies with every category.
    pub visibility: Option<BTreeMap<String, bool>>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT, seed: None, visibility: None }
    }
}

impl GenerationParams {
    /// Resolved visibility filter, if any.
    pub fn visibility_filter(&self) -> Option<Visibility> {
        self.visibility.as_ref().map(|m| Visibility::from_names(m.iter().map(|(k, &v)| (k.as_str(), v))))
    }
}

/// Everything one generation call produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTerrain {
    /// Seed actually used, so the map can be regenerated.
    pub seed: u32,
    pub elevation: ElevationField,
    pub grid: TerrainGrid,
}

/// Runs generation against a fixed definition table.
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator {
    table: TerrainTable,
}

impl TerrainGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify against a custom table. The returned grid carries that
    /// table's costs, but a serialized grid only keeps its categories and
    /// comes back with the shipped costs.
    pub fn with_table(table: TerrainTable) -> Self {
        Self { table }
    }

    /// Generate elevation and classify it.
    ///
    /// # Errors
    /// [`crate::TerrainError::InvalidDimensions`] for a zero width or height.
    pub fn generate(&self, params: &GenerationParams) -> Result<GeneratedTerrain> {
        let seed = params.seed.unwrap_or_else(rand::random);
        let elevation = generate_elevation(params.width, params.height, seed)?;
        let visibility = params.visibility_filter();
        let grid = classify_with(&elevation, visibility.as_ref(), &self.table);

        let counts = grid.category_counts();
        debug!(
            target: "terrapath::generator",
            seed,
            width = params.width,
            height = params.height,
            filtered = visibility.is_some(),
            water = counts[TerrainCategory::Water.index()],
            sand = counts[TerrainCategory::Sand.index()],
            land = counts[TerrainCategory::Land.index()],
            hills = counts[TerrainCategory::Hills.index()],
            mountain = counts[TerrainCategory::Mountain.index()],
            snow = counts[TerrainCategory::Snow.index()],
            "terrain generated"
        );

        Ok(GeneratedTerrain { seed, elevation, grid })
    }
}

/// Generate with the shipped table.
pub fn generate_terrain(params: &GenerationParams) -> Result<GeneratedTerrain> {
    TerrainGenerator::new().generate(params)
}

//! Procedural terrain generation and least-cost routing on the result.
//!
//! [`generator`] turns a seed into a normalized elevation field and a grid of
//! [`TerrainCategory`] labels; [`search`] finds the cheapest 8-connected path
//! between two cells of such a grid.
pub mod cost;
pub mod error;
pub mod generator;
pub mod grid;
pub mod noise;
pub mod search;
pub mod terrain;

pub use cost::{cost_by_name, IMPASSABLE};
pub use error::{Result, TerrainError};
pub use generator::{generate_terrain, GeneratedTerrain, GenerationParams, TerrainGenerator};
pub use grid::{Cell, ElevationField};
pub use search::{find_path, path_cost, PathFailure, PathResult};
pub use terrain::{
    classify, classify_with, TerrainCategory, TerrainDefinition, TerrainGrid, TerrainTable, Visibility,
};

#[cfg(feature = "threading")]
pub use search::find_paths_parallel;

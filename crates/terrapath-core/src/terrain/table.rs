//! Per-category boundaries, movement costs and display colors.
//!
//! A boundary is the elevation at which its category stops applying: a cell
//! takes the first category, in ascending order, whose boundary lies strictly
//! above the cell's elevation. Boundaries must strictly increase from Water to
//! Snow; everything at or above the last boundary is Snow.
use std::cmp::Ordering;

use crate::cost::IMPASSABLE;
use crate::error::{Result, TerrainError};

use super::{TerrainCategory, CATEGORY_COUNT};

/// Definition of one terrain category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainDefinition {
    pub category: TerrainCategory,
    /// Upper elevation cutoff (exclusive).
    pub boundary: f32,
    /// Cost of entering a cell; [`IMPASSABLE`] for never-enter terrain.
    pub cost: f64,
    /// RGB display color. Not used by the engines.
    pub color: [u8; 3],
}

impl TerrainDefinition {
    pub const fn new(category: TerrainCategory, boundary: f32, cost: f64, color: [u8; 3]) -> Self {
        Self { category, boundary, cost, color }
    }
}

const SHIPPED: [TerrainDefinition; CATEGORY_COUNT] = [
    TerrainDefinition::new(TerrainCategory::Water,    0.30, IMPASSABLE, [ 64, 110, 200]),
    TerrainDefinition::new(TerrainCategory::Sand,     0.35, 1.0,        [222, 205, 150]),
    TerrainDefinition::new(TerrainCategory::Land,     0.60, 1.0,        [ 96, 168,  72]),
    TerrainDefinition::new(TerrainCategory::Hills,    0.75, 2.0,        [130, 140,  70]),
    TerrainDefinition::new(TerrainCategory::Mountain, 0.90, 3.0,        [128, 120, 112]),
    TerrainDefinition::new(TerrainCategory::Snow,     1.00, 4.0,        [245, 245, 250]),
];

impl TerrainCategory {
    /// Display color from the shipped table.
    pub fn color(self) -> [u8; 3] {
        SHIPPED[self.index()].color
    }
}

/// Validated set of six definitions, stored in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainTable {
    definitions: [TerrainDefinition; CATEGORY_COUNT],
}

impl Default for TerrainTable {
    fn default() -> Self {
        Self { definitions: SHIPPED }
    }
}

impl TerrainTable {
    /// Build a table from one definition per category, in any order.
    pub fn new(definitions: &[TerrainDefinition]) -> Result<Self> {
        let mut slots: [Option<TerrainDefinition>; CATEGORY_COUNT] = [None; CATEGORY_COUNT];
        for def in definitions {
            let slot = &mut slots[def.category.index()];
            if slot.is_some() {
                return Err(TerrainError::IncompleteTable(def.category.to_string()));
            }
            *slot = Some(*def);
        }

        let mut ordered = SHIPPED;
        for (i, slot) in slots.into_iter().enumerate() {
            ordered[i] = slot
                .ok_or_else(|| TerrainError::IncompleteTable(TerrainCategory::ALL[i].to_string()))?;
        }

        let table = Self { definitions: ordered };
        table.validate()?;
        Ok(table)
    }

    /// Check boundary ordering and cost sanity.
    pub fn validate(&self) -> Result<()> {
        for pair in self.definitions.windows(2) {
            if pair[0].boundary.partial_cmp(&pair[1].boundary) != Some(Ordering::Less) {
                return Err(TerrainError::MalformedBoundaries {
                    lower: pair[0].category.to_string(),
                    upper: pair[1].category.to_string(),
                });
            }
        }
        for def in &self.definitions {
            if def.cost.is_nan() || def.cost < 1.0 {
                return Err(TerrainError::InvalidCost {
                    category: def.category.to_string(),
                    cost: def.cost,
                });
            }
        }
        Ok(())
    }

    pub fn definitions(&self) -> &[TerrainDefinition; CATEGORY_COUNT] {
        &self.definitions
    }

    #[inline]
    pub fn definition(&self, category: TerrainCategory) -> &TerrainDefinition {
        &self.definitions[category.index()]
    }

    #[inline]
    pub fn boundary(&self, category: TerrainCategory) -> f32 {
        self.definition(category).boundary
    }

    /// Boundary of the category below, or 0.0 for Water.
    pub fn lower_bound(&self, category: TerrainCategory) -> f32 {
        match category.index() {
            0 => 0.0,
            i => self.definitions[i - 1].boundary,
        }
    }

    /// Center of the elevation band a category occupies.
    pub fn midpoint(&self, category: TerrainCategory) -> f32 {
        (self.lower_bound(category) + self.boundary(category)) / 2.0
    }

    /// Category an elevation falls into with every category enabled.
    pub fn natural_category(&self, elevation: f32) -> TerrainCategory {
        self.definitions
            .iter()
            .find(|d| elevation < d.boundary)
            .map_or(TerrainCategory::Snow, |d| d.category)
    }

    pub fn costs(&self) -> [f64; CATEGORY_COUNT] {
        self.definitions.map(|d| d.cost)
    }

    pub(crate) fn default_costs() -> [f64; CATEGORY_COUNT] {
        SHIPPED.map(|d| d.cost)
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// A grid cell address. Signed so callers can pass positions that fall off
/// the map; bounds are checked by whoever consumes the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other` in cell units.
    pub fn distance(&self, other: &Cell) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Reject zero-sized grids before anything is allocated.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// A 2D elevation grid, row-major, values normalized to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElevationField")]
pub struct ElevationField {
    /// Row-major elevation values.
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

#[derive(Deserialize)]
struct RawElevationField {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl TryFrom<RawElevationField> for ElevationField {
    type Error = TerrainError;

    fn try_from(raw: RawElevationField) -> Result<Self> {
        ElevationField::from_data(raw.width, raw.height, raw.data)
    }
}

impl ElevationField {
    /// Create a field filled with the given value.
    pub fn new(width: usize, height: usize, fill: f32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self { data: vec![fill; width * height], width, height })
    }

    /// Wrap existing row-major data. `data.len()` must equal `width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height)?;
        if data.len() != width * height {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        Ok(Self { data, width, height })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: f32) {
        self.data[y * self.width + x] = val;
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Stretch the field so the lowest cell becomes 0.0 and the highest 1.0.
    /// A constant field has no range to stretch and collapses to 0.0.
    pub fn normalize(&mut self) {
        let min_v = self.min_value();
        let range = self.max_value() - min_v;
        if range > 0.0 {
            for v in &mut self.data {
                *v = (*v - min_v) / range;
            }
        } else {
            self.data.iter_mut().for_each(|v| *v = 0.0);
        }
    }
}

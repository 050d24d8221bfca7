//! Browser bindings. A host UI calls `generateTerrain` once per map and then
//! `findPath` on the returned handle as the user moves the endpoints.
use anyhow::Context;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use terrapath_core::{
    find_path, Cell, GeneratedTerrain, GenerationParams, TerrainCategory, TerrainGenerator,
};

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

fn parse_params(params_json: &str) -> anyhow::Result<GenerationParams> {
    if params_json.trim().is_empty() {
        return Ok(GenerationParams::default());
    }
    serde_json::from_str(params_json).context("invalid generation params")
}

/// A generated map held on the wasm side so searches need not re-send it.
#[wasm_bindgen]
pub struct TerrainMap {
    inner: GeneratedTerrain,
}

/// Generate a map from a `GenerationParams` JSON string (empty for defaults).
#[wasm_bindgen(js_name = generateTerrain)]
pub async fn generate_terrain(params_json: String) -> Result<TerrainMap, JsValue> {
    let params = parse_params(&params_json).map_err(to_js_error)?;
    let inner = TerrainGenerator::new()
        .generate(&params)
        .context("terrain generation failed")
        .map_err(to_js_error)?;
    Ok(TerrainMap { inner })
}

#[derive(Serialize)]
struct LegendEntry {
    name: &'static str,
    /// `None` for impassable terrain.
    cost: Option<f64>,
    color: [u8; 3],
}

#[wasm_bindgen]
impl TerrainMap {
    #[wasm_bindgen(getter)]
    pub fn seed(&self) -> u32 {
        self.inner.seed
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.inner.grid.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.grid.height
    }

    /// Row-major category indices (0 = water … 5 = snow) as a `Uint8Array`.
    pub fn categories(&self) -> Vec<u8> {
        self.inner.grid.cells().iter().map(|c| c.index() as u8).collect()
    }

    /// Row-major normalized elevation as a `Float32Array`.
    pub fn elevation(&self) -> Vec<f32> {
        self.inner.elevation.data.clone()
    }

    /// Category names, costs and colors, in index order.
    pub fn legend(&self) -> Result<JsValue, JsValue> {
        let entries: Vec<LegendEntry> = TerrainCategory::ALL
            .iter()
            .map(|&c| {
                let cost = self.inner.grid.cost_of(c);
                LegendEntry {
                    name: c.name(),
                    cost: cost.is_finite().then_some(cost),
                    color: c.color(),
                }
            })
            .collect();
        serde_wasm_bindgen::to_value(&entries).map_err(JsValue::from)
    }

    /// Route between two cells. Always resolves to a `PathResult` object;
    /// check its `success` flag.
    #[wasm_bindgen(js_name = findPath)]
    pub fn find_path(&self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Result<JsValue, JsValue> {
        let t0 = js_sys::Date::now();
        let mut result = find_path(&self.inner.grid, Cell::new(start_x, start_y), Cell::new(end_x, end_y));
        result.elapsed_ms = Some(js_sys::Date::now() - t0);
        serde_wasm_bindgen::to_value(&result).map_err(JsValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_use_defaults() {
        assert_eq!(parse_params("  ").unwrap(), GenerationParams::default());
    }

    #[test]
    fn malformed_params_carry_context() {
        let err = parse_params("{width: }").unwrap_err();
        assert!(format!("{err:#}").starts_with("invalid generation params"));
    }
}

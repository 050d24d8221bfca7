#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use terrapath_core::PathResult;
use terrapath_wasm::generate_terrain;

#[wasm_bindgen_test]
async fn generated_map_routes_between_cells() {
    let map = generate_terrain(r#"{"width": 40, "height": 30, "seed": 42}"#.to_string())
        .await
        .expect("generation succeeds");
    assert_eq!(map.seed(), 42);
    assert_eq!(map.categories().len(), 40 * 30);

    let value: JsValue = map.find_path(3, 3, 3, 3).expect("serializable result");
    let result: PathResult = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(result.success, result.failure.is_none());
    assert!(result.elapsed_ms.is_some());
}

#[wasm_bindgen_test]
async fn zero_width_is_rejected() {
    assert!(generate_terrain(r#"{"width": 0}"#.to_string()).await.is_err());
}

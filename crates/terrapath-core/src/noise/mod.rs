pub mod fbm;

use crate::error::Result;
use crate::grid::{check_dimensions, ElevationField};
use fbm::Fbm;

/// Octaves summed per sample.
pub const OCTAVES: u32 = 4;

/// Cell coordinates are divided by this before sampling; sets feature size.
pub const ZOOM: f64 = 50.0;

/// Generate a normalized elevation field from `seed`.
///
/// Pipeline:
///   1. 4-octave fBm at `(x / ZOOM, y / ZOOM)`, amplitude-normalized and
///      remapped to [0, 1].
///   2. Global min/max stretch so the realized range is exactly [0, 1] and
///      every category boundary is reachable whatever the seed.
///
/// # Errors
/// [`crate::TerrainError::InvalidDimensions`] when either dimension is zero.
pub fn generate_elevation(width: usize, height: usize, seed: u32) -> Result<ElevationField> {
    check_dimensions(width, height)?;

    let fbm = Fbm::new(seed, OCTAVES);
    let mut data = vec![0.0f32; width * height];

    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill_row(&fbm, y, row));
    }
    #[cfg(not(feature = "threading"))]
    for (y, row) in data.chunks_mut(width).enumerate() {
        fill_row(&fbm, y, row);
    }

    let mut field = ElevationField::from_data(width, height, data)?;
    field.normalize();
    Ok(field)
}

fn fill_row(fbm: &Fbm, y: usize, row: &mut [f32]) {
    let ny = y as f64 / ZOOM;
    for (x, v) in row.iter_mut().enumerate() {
        *v = fbm.sample_unit(x as f64 / ZOOM, ny) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;

    #[test]
    fn realized_range_is_exactly_unit() {
        for seed in 1..=4 {
            for (w, h) in [(2, 2), (3, 5), (16, 16), (64, 32)] {
                let field = generate_elevation(w, h, seed).unwrap();
                assert_eq!(field.min_value(), 0.0, "seed {seed} {w}x{h}");
                assert_eq!(field.max_value(), 1.0, "seed {seed} {w}x{h}");
                assert_eq!(field.data.len(), w * h);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_field() {
        let a = generate_elevation(32, 24, 99).unwrap();
        let b = generate_elevation(32, 24, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_elevation(32, 32, 1).unwrap();
        let b = generate_elevation(32, 32, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            generate_elevation(0, 10, 1),
            Err(TerrainError::InvalidDimensions { width: 0, height: 10 })
        );
        assert!(generate_elevation(10, 0, 1).is_err());
    }

    #[test]
    fn single_cell_is_flat() {
        let field = generate_elevation(1, 1, 5).unwrap();
        assert_eq!(field.data, vec![0.0]);
    }

    #[test]
    fn neighbouring_cells_are_correlated() {
        // Zoomed noise varies slowly: adjacent cells differ far less than the
        // full range on average.
        let field = generate_elevation(128, 128, 3).unwrap();
        let mut total = 0.0f32;
        for y in 0..128 {
            for x in 1..128 {
                total += (field.get(x, y) - field.get(x - 1, y)).abs();
            }
        }
        let mean_step = total / (128.0 * 127.0);
        assert!(mean_step < 0.05, "mean horizontal step {mean_step:.4}");
    }

    /// Performance: 512×512 field in under 100 ms (release only).
    #[cfg(not(debug_assertions))]
    #[test]
    fn field_512x512_within_100ms() {
        let t = std::time::Instant::now();
        let _ = generate_elevation(512, 512, 42).unwrap();
        let ms = t.elapsed().as_millis();
        assert!(ms < 100, "512×512 elevation took {ms}ms, budget is 100ms");
    }
}

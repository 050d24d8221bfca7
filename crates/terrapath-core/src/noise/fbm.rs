//! Fractional Brownian motion over Perlin noise.
//!
//! Octave i contributes `persistence^i * noise(x * lacunarity^i, y * lacunarity^i)`.
//! The sum is divided by the total amplitude so the result stays in the
//! primitive's native [-1, 1] range.
use noise::{NoiseFn, Perlin};

pub struct Fbm {
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    noise: Perlin,
}

impl Fbm {
    /// Construct an fBm with the given seed and octave count; persistence 0.5
    /// and lacunarity 2.0.
    pub fn new(seed: u32, octaves: u32) -> Self {
        Self { octaves, persistence: 0.5, lacunarity: 2.0, noise: Perlin::new(seed) }
    }

    /// Sum of all octave amplitudes, used to normalize [`Fbm::sample`].
    fn amplitude_sum(&self) -> f64 {
        let mut total = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.octaves {
            total += amp;
            amp *= self.persistence;
        }
        total
    }

    /// Evaluate fBm at `(x, y)` in noise space, normalized by the amplitude sum.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0f64;
        let mut amp = 1.0f64;
        let mut freq = 1.0f64;
        for _ in 0..self.octaves {
            value += amp * self.noise.get([x * freq, y * freq]);
            amp *= self.persistence;
            freq *= self.lacunarity;
        }
        match self.amplitude_sum() {
            total if total > 0.0 => value / total,
            _ => 0.0,
        }
    }

    /// [`Fbm::sample`] remapped from [-1, 1] to [0, 1].
    pub fn sample_unit(&self, x: f64, y: f64) -> f64 {
        ((self.sample(x, y) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitudes_halve_each_octave() {
        let fbm = Fbm::new(1, 4);
        assert!((fbm.amplitude_sum() - 1.875).abs() < 1e-12);
    }

    #[test]
    fn samples_stay_in_range() {
        let fbm = Fbm::new(42, 4);
        for i in 0..500 {
            let x = i as f64 * 0.137;
            let y = i as f64 * 0.071;
            let u = fbm.sample_unit(x, y);
            assert!((0.0..=1.0).contains(&u), "sample_unit({x}, {y}) = {u}");
        }
    }

    #[test]
    fn same_seed_same_values() {
        let a = Fbm::new(7, 4);
        let b = Fbm::new(7, 4);
        assert_eq!(a.sample(3.3, 1.7), b.sample(3.3, 1.7));
    }

    #[test]
    fn fbm_produces_non_constant_output() {
        let fbm = Fbm::new(42, 4);
        let values: Vec<f64> = (0..64).map(|i| fbm.sample(i as f64 * 0.21, 0.37)).collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.01);
    }
}

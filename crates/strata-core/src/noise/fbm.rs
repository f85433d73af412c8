//! Normalized fractal Perlin noise.
//!
//! Octave `i` has amplitude `persistence^i` and frequency `lacunarity^i`;
//! the sum is divided by the total amplitude so the result stays in [-1, 1].
use noise::{NoiseFn, Perlin};

pub struct Fbm {
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    noise: Perlin,
    /// Sum of octave amplitudes, cached for normalization.
    total_amplitude: f64,
}

impl Fbm {
    /// The seed selects the Perlin permutation, so distinct seeds address
    /// unrelated regions of noise space.
    pub fn new(seed: u32, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        let mut total_amplitude = 0.0;
        let mut amp = 1.0;
        for _ in 0..octaves {
            total_amplitude += amp;
            amp *= persistence;
        }
        Self { octaves, persistence, lacunarity, noise: Perlin::new(seed), total_amplitude }
    }

    /// Evaluate at lattice coordinates `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0f64;
        let mut amp = 1.0f64;
        let mut freq = 1.0f64;
        for _ in 0..self.octaves {
            value += amp * self.noise.get([x * freq, y * freq]);
            amp *= self.persistence;
            freq *= self.lacunarity;
        }
        if self.total_amplitude > 0.0 {
            (value / self.total_amplitude).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lattice_origin_is_zero() {
        for seed in [1, 7, 99] {
            let fbm = Fbm::new(seed, 6, 0.55, 2.0);
            assert_abs_diff_eq!(fbm.sample(0.0, 0.0), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn output_stays_normalized() {
        let fbm = Fbm::new(42, 8, 0.9, 2.3);
        for i in 0..64 {
            for j in 0..64 {
                let v = fbm.sample(i as f64 * 0.137, j as f64 * 0.211);
                assert!((-1.0..=1.0).contains(&v), "fbm({i},{j}) = {v} outside [-1, 1]");
            }
        }
    }

    #[test]
    fn single_octave_matches_raw_perlin() {
        let fbm = Fbm::new(5, 1, 0.55, 2.0);
        let perlin = Perlin::new(5);
        for &(x, y) in &[(0.3, 0.7), (1.25, 4.5), (9.9, 0.01)] {
            assert_abs_diff_eq!(fbm.sample(x, y), perlin.get([x, y]).clamp(-1.0, 1.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_persistence_keeps_only_first_octave() {
        let flat = Fbm::new(5, 1, 0.0, 2.0);
        let many = Fbm::new(5, 8, 0.0, 2.0);
        assert_abs_diff_eq!(flat.sample(0.4, 2.2), many.sample(0.4, 2.2), epsilon = 1e-12);
    }

    #[test]
    fn neighbouring_points_are_coherent() {
        let fbm = Fbm::new(13, 4, 0.5, 2.0);
        let a = fbm.sample(3.10, 2.40);
        let b = fbm.sample(3.11, 2.40);
        assert!((a - b).abs() < 0.1, "adjacent samples jumped from {a} to {b}");
    }
}

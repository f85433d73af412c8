use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Default sea level, in quantized altitude units.
pub const DEFAULT_SEA_LEVEL: i32 = 120;

/// Octave ceiling. Each octave is a full Perlin evaluation per cell.
pub const MAX_OCTAVES: u32 = 32;

/// Largest lattice coordinate the top octave may reach; Perlin floors
/// coordinates to `isize`, and past 2^52 `f64` has no fractional bits left.
const MAX_LATTICE_COORD: f64 = (1u64 << 52) as f64;

/// Fractal sampling parameters for one generation call.
///
/// Values normally come from bounded UI widgets; use
/// [`GenerationParameters::from_widgets`] to apply the widget scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Noise feature size as a percentage of grid width (1-100).
    pub scale: u32,
    pub height: usize,
    pub width: usize,
    pub octaves: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Explicit seed, or `<= 0` to draw one per call.
    pub seed: i64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            scale: 45,
            height: 500,
            width: 500,
            octaves: 6,
            persistence: 0.55,
            lacunarity: 2.0,
            seed: 0,
        }
    }
}

impl GenerationParameters {
    /// Build parameters from integer widget values: persistence in hundredths,
    /// lacunarity in tenths.
    pub fn from_widgets(
        scale: u32,
        height: usize,
        width: usize,
        octaves: u32,
        persistence_pct: u32,
        lacunarity_tenths: u32,
        seed: i64,
    ) -> Self {
        Self {
            scale,
            height,
            width,
            octaves,
            persistence: f64::from(persistence_pct) / 100.0,
            lacunarity: f64::from(lacunarity_tenths) / 10.0,
            seed,
        }
    }

    /// Explicit seed, if one was supplied and fits in 32 bits.
    pub fn explicit_seed(&self) -> Option<u32> {
        u32::try_from(self.seed).ok().filter(|&seed| seed > 0)
    }

    /// Lattice divisor `width * scale / 100`.
    pub fn divisor(&self) -> f64 {
        self.width as f64 * (f64::from(self.scale) / 100.0)
    }

    /// Reject parameter sets the sampler cannot handle.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.scale == 0 || self.scale > 100 {
            return Err(ParamError::Scale(self.scale));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ParamError::EmptyGrid { width: self.width, height: self.height });
        }
        let too_large = ParamError::GridTooLarge { width: self.width, height: self.height };
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(too_large)?;
        if self.octaves == 0 {
            return Err(ParamError::NoOctaves);
        }
        if self.octaves > MAX_OCTAVES {
            return Err(ParamError::TooManyOctaves(self.octaves));
        }
        if !self.persistence.is_finite() || self.persistence < 0.0 {
            return Err(ParamError::Persistence(self.persistence));
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(ParamError::Lacunarity(self.lacunarity));
        }
        let extent = self.width.max(self.height) as f64 / self.divisor();
        let top_frequency = self.lacunarity.max(1.0).powi(self.octaves as i32 - 1);
        if extent * top_frequency >= MAX_LATTICE_COORD {
            return Err(ParamError::FrequencyTooHigh {
                octaves: self.octaves,
                lacunarity: self.lacunarity,
            });
        }
        if self.seed > i64::from(u32::MAX) {
            return Err(ParamError::SeedOutOfRange(self.seed));
        }
        Ok(())
    }
}

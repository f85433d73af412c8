//! Heightmap sampling: fractal Perlin noise over a grid, quantized to bytes.

pub mod fbm;

use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::{GenerationError, Result};
use crate::grid::ScalarGrid;
use crate::params::GenerationParameters;
use crate::seed::SeedSource;
use fbm::Fbm;

/// A sampled heightmap together with the seed that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledField {
    pub grid: ScalarGrid,
    pub seed: u32,
}

/// Map a noise value in [-1, 1] to a byte via `floor((v + 1) * 128)`.
///
/// `v = 1.0` lands on 256; it saturates to 255 rather than wrapping to 0,
/// so the highest peaks stay the highest band. Out-of-range input saturates
/// the same way.
#[inline]
pub fn quantize(v: f64) -> u8 {
    ((v + 1.0) * 128.0).floor().clamp(0.0, 255.0) as u8
}

/// The explicit seed if one was given, otherwise a single draw from `seeds`.
pub fn resolve_seed<S: SeedSource + ?Sized>(params: &GenerationParameters, seeds: &mut S) -> u32 {
    params.explicit_seed().unwrap_or_else(|| seeds.draw_seed())
}

/// Sample a heightmap for `params`.
pub fn sample<S: SeedSource + ?Sized>(
    params: &GenerationParameters,
    seeds: &mut S,
) -> Result<SampledField> {
    sample_cancellable(params, seeds, &CancelToken::new())
}

/// [`sample`], polling `cancel` once per row.
///
/// The seed is resolved before any row is filled, so every row (and every
/// worker thread) sees the same field.
pub fn sample_cancellable<S: SeedSource + ?Sized>(
    params: &GenerationParameters,
    seeds: &mut S,
    cancel: &CancelToken,
) -> Result<SampledField> {
    params.validate()?;
    let seed = resolve_seed(params, seeds);
    let grid = sample_with_seed(params, seed, cancel)?;
    Ok(SampledField { grid, seed })
}

/// Fill a grid for an already-resolved seed. Parameters must be valid.
pub fn sample_with_seed(
    params: &GenerationParameters,
    seed: u32,
    cancel: &CancelToken,
) -> Result<ScalarGrid> {
    let fbm = Fbm::new(seed, params.octaves, params.persistence, params.lacunarity);
    let divisor = params.divisor();
    debug!(
        target: "strata::noise",
        seed,
        width = params.width,
        height = params.height,
        divisor,
        octaves = params.octaves,
        "sampling heightmap"
    );

    let mut grid = ScalarGrid::new(params.width, params.height, 0);
    grid.try_fill_rows(|i, row| {
        if cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }
        let x = i as f64 / divisor;
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = quantize(fbm.sample(x, j as f64 / divisor));
        }
        Ok(())
    })?;
    Ok(grid)
}

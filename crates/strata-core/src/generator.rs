//! Pipeline orchestrator: sample → classify → assemble.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::classify::classify_cancellable;
use crate::error::Result;
use crate::grid::ScalarGrid;
use crate::layers::LayerTable;
use crate::noise::sample_cancellable;
use crate::params::{GenerationParameters, DEFAULT_SEA_LEVEL};
use crate::raster::{assemble, Raster};
use crate::seed::SeedSource;

/// Wall-clock time spent in each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StageTimings {
    pub sample: Duration,
    pub classify: Duration,
    pub assemble: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.sample + self.classify + self.assemble
    }
}

/// Output of one generation call.
#[derive(Debug)]
pub struct Terrain {
    pub raster: Raster,
    /// Heightmap the raster was classified from.
    pub heights: ScalarGrid,
    /// Seed actually used, auto-selected or explicit.
    pub seed: u32,
    pub timings: StageTimings,
}

/// Runs the generation pipeline against a fixed layer table and sea level.
///
/// Holds no per-call state; every call allocates fresh buffers, so an
/// abandoned call can simply be dropped.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    layers: LayerTable,
    sea_level: i32,
}

impl TerrainGenerator {
    pub fn new(layers: LayerTable, sea_level: i32) -> Self {
        Self { layers, sea_level }
    }

    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }

    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    pub fn set_sea_level(&mut self, sea_level: i32) {
        self.sea_level = sea_level;
    }

    /// Generate a raster for `params`, drawing from `seeds` only if no
    /// explicit seed is set.
    pub fn generate<S: SeedSource + ?Sized>(
        &self,
        params: &GenerationParameters,
        seeds: &mut S,
    ) -> Result<Terrain> {
        self.generate_cancellable(params, seeds, &CancelToken::new())
    }

    /// [`generate`](Self::generate), abandoning work as soon as `cancel` is set.
    pub fn generate_cancellable<S: SeedSource + ?Sized>(
        &self,
        params: &GenerationParameters,
        seeds: &mut S,
        cancel: &CancelToken,
    ) -> Result<Terrain> {
        let t = Instant::now();
        let field = sample_cancellable(params, seeds, cancel)?;
        let sample = t.elapsed();
        debug!(target: "strata::generator", seed = field.seed, ms = sample.as_secs_f64() * 1e3, "sampled");

        let t = Instant::now();
        let colors = classify_cancellable(&field.grid, &self.layers, self.sea_level, cancel)?;
        let classify = t.elapsed();
        debug!(target: "strata::generator", sea_level = self.sea_level, ms = classify.as_secs_f64() * 1e3, "classified");

        let t = Instant::now();
        let raster = assemble(&colors);
        let assemble = t.elapsed();
        debug!(target: "strata::generator", bytes = raster.as_bytes().len(), ms = assemble.as_secs_f64() * 1e3, "assembled");

        let timings = StageTimings { sample, classify, assemble };
        info!(
            target: "strata::generator",
            seed = field.seed,
            width = params.width,
            height = params.height,
            total_ms = timings.total().as_secs_f64() * 1e3,
            "terrain generated"
        );

        Ok(Terrain { raster, heights: field.grid, seed: field.seed, timings })
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(LayerTable::standard(), DEFAULT_SEA_LEVEL)
    }
}

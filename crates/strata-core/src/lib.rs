//! Banded terrain rasters from fractal noise.
//!
//! The pipeline is three pure stages run by [`generator::TerrainGenerator`]:
//! [`noise::sample`] builds a quantized heightmap, [`classify::classify`]
//! maps each cell to an altitude layer color, and [`raster::assemble`] packs
//! the colors into row-major RGB bytes.

pub mod cancel;
pub mod classify;
pub mod error;
pub mod generator;
pub mod grid;
pub mod layers;
pub mod noise;
pub mod params;
pub mod raster;
pub mod seed;
pub mod settings;

pub use cancel::CancelToken;
pub use error::{GenerationError, LayerError, ParamError, SettingsError};
pub use generator::{Terrain, TerrainGenerator};
pub use grid::{ColorGrid, Grid, Rgb, ScalarGrid};
pub use layers::{LayerSpec, LayerTable};
pub use params::{GenerationParameters, DEFAULT_SEA_LEVEL, MAX_OCTAVES};
pub use raster::Raster;
pub use seed::{SeedSource, ThreadSeedSource};
pub use settings::Settings;

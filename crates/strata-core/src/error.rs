//! Error types for the generation pipeline.
//!
//! Every failure is surfaced before any output is produced; a repeated call
//! with the same inputs yields the same error.

use thiserror::Error;

/// Precondition violations in [`GenerationParameters`](crate::params::GenerationParameters).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("scale must be between 1 and 100 percent, got {0}")]
    Scale(u32),
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("a {width}x{height} grid does not fit in a raster buffer")]
    GridTooLarge { width: usize, height: usize },
    #[error("octave count must be at least 1")]
    NoOctaves,
    #[error("octave count must be at most {max}, got {0}", max = crate::params::MAX_OCTAVES)]
    TooManyOctaves(u32),
    #[error("{octaves} octaves at lacunarity {lacunarity} exceed the noise lattice precision")]
    FrequencyTooHigh { octaves: u32, lacunarity: f64 },
    #[error("persistence must be finite and non-negative, got {0}")]
    Persistence(f64),
    #[error("lacunarity must be finite and positive, got {0}")]
    Lacunarity(f64),
    #[error("seed {0} does not fit in 32 bits")]
    SeedOutOfRange(i64),
}

/// Problems with a layer table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    #[error("layer table is empty")]
    Empty,
    #[error("layer `{name}` has base altitude {base}, below the preceding {previous}")]
    NonMonotonic { name: String, base: i32, previous: i32 },
}

/// Failure to load a layer table from JSON.
#[derive(Debug, Error)]
pub enum LayerTableLoadError {
    #[error("malformed layer JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] LayerError),
}

/// Malformed grid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
    #[error("{len} cells cannot fill a {width}x{height} grid")]
    ShapeMismatch { width: usize, height: usize, len: usize },
}

/// Failure to load a [`Settings`](crate::settings::Settings) document.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("malformed settings {path}: {source}")]
    Json { path: String, source: serde_json::Error },
}

/// Top-level error returned by [`TerrainGenerator`](crate::generator::TerrainGenerator).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamError),
    #[error("invalid layer table: {0}")]
    Layers(#[from] LayerError),
    #[error("generation cancelled")]
    Cancelled,
}

pub type Result<T, E = GenerationError> = std::result::Result<T, E>;

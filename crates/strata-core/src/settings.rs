//! On-disk settings document: generation parameters, sea level, and an
//! optional custom layer table.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayerError, SettingsError};
use crate::generator::TerrainGenerator;
use crate::layers::{LayerSpec, LayerTable};
use crate::params::{GenerationParameters, DEFAULT_SEA_LEVEL};

/// Everything a caller needs to run one generation, all fields optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationParameters,
    pub sea_level: i32,
    /// Custom bands; `None` means the built-in table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<LayerSpec>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { generation: GenerationParameters::default(), sea_level: DEFAULT_SEA_LEVEL, layers: None }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)
            .map_err(|source| SettingsError::Io { path: path.display().to_string(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| SettingsError::Json { path: path.display().to_string(), source })
    }

    /// The validated layer table these settings select.
    pub fn layer_table(&self) -> Result<LayerTable, LayerError> {
        match &self.layers {
            Some(layers) => LayerTable::new(layers.clone()),
            None => Ok(LayerTable::standard()),
        }
    }

    pub fn generator(&self) -> Result<TerrainGenerator, LayerError> {
        Ok(TerrainGenerator::new(self.layer_table()?, self.sea_level))
    }
}

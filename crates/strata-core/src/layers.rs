//! Altitude layers: the ordered band table used by classification.

use serde::{Deserialize, Serialize};

use crate::error::{LayerError, LayerTableLoadError};
use crate::grid::Rgb;

/// One altitude band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub color: Rgb,
    /// Upper bound of the band before the sea-level offset is applied.
    pub base_altitude: i32,
}

impl LayerSpec {
    pub fn new(name: impl Into<String>, color: Rgb, base_altitude: i32) -> Self {
        Self { name: name.into(), color, base_altitude }
    }
}

/// Built-in bands: three water shades, beach, four greens, two rock
/// shades, snow.
const STANDARD: [(&str, Rgb, i32); 11] = [
    ("blue1",  [ 22, 156, 233], -10),
    ("blue2",  [ 45, 166, 235],  -5),
    ("blue3",  [ 68, 176, 238],   0),
    ("beach",  [244, 218, 138],   3),
    ("green0", [181, 202, 116],   6),
    ("green1", [116, 186,  94],  25),
    ("green2", [ 80, 143,  61],  35),
    ("green3", [ 50,  89,  38],  42),
    ("grey1",  [ 58,  29,  19],  46),
    ("grey2",  [ 92,  61,  61],  52),
    ("snow",   [245, 240, 240], 255),
];

/// Non-empty sequence of layers with non-decreasing base altitudes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayerTable {
    layers: Vec<LayerSpec>,
}

impl LayerTable {
    /// Validate and wrap `layers`.
    pub fn new(layers: Vec<LayerSpec>) -> Result<Self, LayerError> {
        if layers.is_empty() {
            return Err(LayerError::Empty);
        }
        for pair in layers.windows(2) {
            if pair[1].base_altitude < pair[0].base_altitude {
                return Err(LayerError::NonMonotonic {
                    name: pair[1].name.clone(),
                    base: pair[1].base_altitude,
                    previous: pair[0].base_altitude,
                });
            }
        }
        Ok(Self { layers })
    }

    /// The built-in 11-band terrain table.
    pub fn standard() -> Self {
        let layers = STANDARD
            .iter()
            .map(|&(name, color, base)| LayerSpec::new(name, color, base))
            .collect();
        Self { layers }
    }

    /// Parse a JSON array of layers and validate it.
    pub fn from_json(json: &str) -> Result<Self, LayerTableLoadError> {
        let layers: Vec<LayerSpec> = serde_json::from_str(json)?;
        Ok(Self::new(layers)?)
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn last(&self) -> &LayerSpec {
        // Non-empty by construction.
        &self.layers[self.layers.len() - 1]
    }
}

impl Default for LayerTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for LayerTable {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let layers = Vec::<LayerSpec>::deserialize(d)?;
        Self::new(layers).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_valid_and_ordered() {
        let t = LayerTable::standard();
        assert_eq!(t.len(), 11);
        assert_eq!(LayerTable::new(t.layers().to_vec()), Ok(t.clone()));
        assert_eq!(t.layers()[0].base_altitude, -10);
        assert_eq!(t.last().name, "snow");
        assert_eq!(t.last().base_altitude, 255);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(LayerTable::new(Vec::new()), Err(LayerError::Empty));
    }

    #[test]
    fn decreasing_threshold_is_rejected() {
        let layers = vec![
            LayerSpec::new("low", [0, 0, 0], 10),
            LayerSpec::new("dip", [1, 1, 1], 5),
        ];
        assert_eq!(
            LayerTable::new(layers),
            Err(LayerError::NonMonotonic { name: "dip".into(), base: 5, previous: 10 })
        );
    }

    #[test]
    fn equal_thresholds_are_allowed() {
        let layers = vec![LayerSpec::new("a", [0, 0, 0], 3), LayerSpec::new("b", [9, 9, 9], 3)];
        assert!(LayerTable::new(layers).is_ok());
    }

    #[test]
    fn json_round_trip_validates() {
        let json = serde_json::to_string(&LayerTable::standard()).unwrap();
        assert_eq!(LayerTable::from_json(&json).unwrap(), LayerTable::standard());

        let bad = r#"[{"name":"hi","color":[0,0,0],"base_altitude":9},
                      {"name":"lo","color":[0,0,0],"base_altitude":1}]"#;
        assert!(matches!(LayerTable::from_json(bad), Err(LayerTableLoadError::Invalid(_))));
        assert!(serde_json::from_str::<LayerTable>(bad).is_err());
        assert!(matches!(LayerTable::from_json("{"), Err(LayerTableLoadError::Json(_))));
    }
}

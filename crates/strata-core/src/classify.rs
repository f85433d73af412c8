//! Altitude classification: scalar samples → layer colors.
//!
//! Thresholds are `base_altitude + sea_level`, in table order. A value falls
//! into the first layer whose threshold it is strictly below; values at or
//! above every threshold belong to the last layer.

use serde::Serialize;

use crate::cancel::CancelToken;
use crate::error::{GenerationError, Result};
use crate::grid::{ColorGrid, Grid, Rgb, ScalarGrid};
use crate::layers::LayerTable;

/// Effective thresholds for `sea_level`, in table order.
pub fn thresholds(layers: &LayerTable, sea_level: i32) -> Vec<i32> {
    layers
        .layers()
        .iter()
        .map(|l| l.base_altitude.saturating_add(sea_level))
        .collect()
}

/// Index of the smallest threshold strictly greater than `value`, clamped to
/// the last layer. `thresholds` must be non-decreasing.
#[inline]
pub fn bucket_index(value: u8, thresholds: &[i32]) -> usize {
    let k = thresholds.partition_point(|&t| t <= i32::from(value));
    k.min(thresholds.len().saturating_sub(1))
}

/// Band index for every possible byte, built once per classification.
struct BandLut {
    bands: [usize; 256],
}

impl BandLut {
    fn new(layers: &LayerTable, sea_level: i32) -> Self {
        let thresholds = thresholds(layers, sea_level);
        let mut bands = [0usize; 256];
        for (value, band) in bands.iter_mut().enumerate() {
            *band = bucket_index(value as u8, &thresholds);
        }
        Self { bands }
    }

    #[inline]
    fn band(&self, value: u8) -> usize {
        self.bands[usize::from(value)]
    }

    fn colors(&self, layers: &LayerTable) -> [Rgb; 256] {
        let specs = layers.layers();
        let mut lut = [[0u8; 3]; 256];
        for (value, color) in lut.iter_mut().enumerate() {
            *color = specs[self.bands[value]].color;
        }
        lut
    }
}

/// Layer index per cell.
pub fn band_indices(grid: &ScalarGrid, layers: &LayerTable, sea_level: i32) -> Grid<usize> {
    let lut = BandLut::new(layers, sea_level);
    grid.map(|&v| lut.band(v))
}

/// Color every cell by its altitude band.
pub fn classify(grid: &ScalarGrid, layers: &LayerTable, sea_level: i32) -> ColorGrid {
    let lut = BandLut::new(layers, sea_level).colors(layers);
    grid.map(|&v| lut[usize::from(v)])
}

/// [`classify`], polling `cancel` once per row.
pub fn classify_cancellable(
    grid: &ScalarGrid,
    layers: &LayerTable,
    sea_level: i32,
    cancel: &CancelToken,
) -> Result<ColorGrid> {
    let lut = BandLut::new(layers, sea_level).colors(layers);
    let mut colors = ColorGrid::new(grid.width(), grid.height(), [0; 3]);
    colors.try_fill_rows(|r, row| {
        if cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }
        for (out, &v) in row.iter_mut().zip(grid.row(r)) {
            *out = lut[usize::from(v)];
        }
        Ok(())
    })?;
    Ok(colors)
}

/// How much of the grid a layer covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerCoverage {
    pub name: String,
    pub color: Rgb,
    pub cells: usize,
    /// Share of all cells, 0-1.
    pub fraction: f64,
}

/// Per-layer cell counts, in table order.
pub fn coverage(grid: &ScalarGrid, layers: &LayerTable, sea_level: i32) -> Vec<LayerCoverage> {
    let lut = BandLut::new(layers, sea_level);
    let mut counts = vec![0usize; layers.len()];
    for &v in grid.data() {
        counts[lut.band(v)] += 1;
    }
    let total = grid.len().max(1) as f64;
    layers
        .layers()
        .iter()
        .zip(counts)
        .map(|(layer, cells)| LayerCoverage {
            name: layer.name.clone(),
            color: layer.color,
            cells,
            fraction: cells as f64 / total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerSpec;
    use crate::params::DEFAULT_SEA_LEVEL;

    fn color_of(name: &str) -> Rgb {
        LayerTable::standard()
            .layers()
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.color)
            .unwrap()
    }

    fn single(value: u8) -> ScalarGrid {
        Grid::new(1, 1, value)
    }

    #[test]
    fn thresholds_add_sea_level() {
        let t = thresholds(&LayerTable::standard(), DEFAULT_SEA_LEVEL);
        assert_eq!(t, vec![110, 115, 120, 123, 126, 145, 155, 162, 166, 172, 375]);
    }

    #[test]
    fn bucket_is_first_threshold_strictly_above() {
        let t = [10, 20, 30];
        assert_eq!(bucket_index(0, &t), 0);
        assert_eq!(bucket_index(9, &t), 0);
        assert_eq!(bucket_index(10, &t), 1);
        assert_eq!(bucket_index(29, &t), 2);
    }

    #[test]
    fn bucket_past_every_threshold_clamps_to_last() {
        let t = [10, 20, 30];
        assert_eq!(bucket_index(30, &t), 2);
        assert_eq!(bucket_index(255, &t), 2);
    }

    #[test]
    fn standard_bands_at_default_sea_level() {
        let layers = LayerTable::standard();
        let cases = [
            (0, "blue1"),
            (109, "blue1"),
            (110, "blue2"),
            (119, "blue3"),
            (120, "beach"),
            (130, "green1"),
            (160, "green3"),
            (165, "grey1"),
            (171, "grey2"),
            (172, "snow"),
            (255, "snow"),
        ];
        for (value, name) in cases {
            let colors = classify(&single(value), &layers, DEFAULT_SEA_LEVEL);
            assert_eq!(*colors.get(0, 0), color_of(name), "value {value} should be {name}");
        }
    }

    #[test]
    fn value_above_top_threshold_takes_last_layer_color() {
        // Drop snow so the top threshold is grey2's 52.
        let mut specs = LayerTable::standard().layers().to_vec();
        specs.pop();
        let layers = LayerTable::new(specs).unwrap();
        let colors = classify(&single(255), &layers, 0);
        assert_eq!(*colors.get(0, 0), color_of("grey2"));
        assert_eq!(*band_indices(&single(255), &layers, 0).get(0, 0), layers.len() - 1);
    }

    #[test]
    fn low_sea_level_pushes_snow_below_255() {
        let layers = LayerTable::standard();
        let colors = classify(&single(255), &layers, -200);
        assert_eq!(*colors.get(0, 0), color_of("snow"));
    }

    #[test]
    fn every_band_index_is_in_range() {
        let layers = LayerTable::standard();
        let all: Vec<u8> = (0..=255).collect();
        let grid = Grid::from_vec(all, 16, 16).unwrap();
        for sea in [-400, -200, 0, 1, 120, 200, 400] {
            let bands = band_indices(&grid, &layers, sea);
            assert!(bands.data().iter().all(|&b| b < layers.len()), "sea level {sea}");
        }
    }

    #[test]
    fn increasing_thresholds_give_monotonic_bands() {
        let specs = (0..12)
            .map(|k| LayerSpec::new(format!("l{k}"), [k as u8, 0, 0], k * 20 + 5))
            .collect();
        let layers = LayerTable::new(specs).unwrap();
        let grid = Grid::from_vec((0..=255).collect(), 256, 1).unwrap();
        let bands = band_indices(&grid, &layers, 0);
        assert!(bands.data().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(bands.data()[0], 0);
        assert_eq!(bands.data()[255], layers.len() - 1);
    }

    #[test]
    fn color_grid_keeps_shape() {
        let grid = Grid::new(7, 3, 140u8);
        let colors = classify(&grid, &LayerTable::standard(), DEFAULT_SEA_LEVEL);
        assert_eq!((colors.width(), colors.height()), (7, 3));
        assert!(colors.data().iter().all(|&c| c == color_of("green1")));
    }

    #[test]
    fn cancellable_matches_plain_and_honours_cancel() {
        let grid = Grid::from_vec((0..=255).collect(), 32, 8).unwrap();
        let layers = LayerTable::standard();
        let plain = classify(&grid, &layers, 90);
        let token = CancelToken::new();
        assert_eq!(classify_cancellable(&grid, &layers, 90, &token).unwrap(), plain);
        token.cancel();
        assert_eq!(
            classify_cancellable(&grid, &layers, 90, &token).unwrap_err(),
            GenerationError::Cancelled
        );
    }

    #[test]
    fn coverage_counts_every_cell_once() {
        let grid = Grid::from_rows(&[vec![0u8, 0, 121], vec![200, 255, 130]]).unwrap();
        let cov = coverage(&grid, &LayerTable::standard(), DEFAULT_SEA_LEVEL);
        assert_eq!(cov.len(), 11);
        assert_eq!(cov.iter().map(|c| c.cells).sum::<usize>(), 6);
        assert_eq!(cov[0].cells, 2);
        assert_eq!(cov[3].name, "beach");
        assert_eq!(cov[3].cells, 1);
        assert_eq!(cov[10].cells, 2);
        assert!((cov[0].fraction - 2.0 / 6.0).abs() < 1e-12);
    }
}

//! Diagnostic visualizer: writes debug PNGs to data/debug/.
//! Not part of the main pipeline; no tests, no clippy target.

use std::fs;
use std::path::Path;

use strata_core::classify::classify;
use strata_core::noise::sample;
use strata_core::raster::assemble;
use strata_core::{GenerationParameters, LayerTable, ScalarGrid, ThreadSeedSource};

const SEA_LEVELS: [i32; 3] = [60, 120, 180];
const LEGEND_SWATCH: u32 = 24;

/// Quantized height → grayscale image.
fn gray_image(grid: &ScalarGrid) -> image::RgbImage {
    let mut img = image::RgbImage::new(grid.width() as u32, grid.height() as u32);
    for r in 0..grid.height() {
        for c in 0..grid.width() {
            let v = *grid.get(r, c);
            img.put_pixel(c as u32, r as u32, image::Rgb([v, v, v]));
        }
    }
    img
}

/// One swatch per layer, left to right in table order.
fn legend_image(layers: &LayerTable) -> image::RgbImage {
    let n = layers.len() as u32;
    let mut img = image::RgbImage::new(n * LEGEND_SWATCH, LEGEND_SWATCH);
    for (k, layer) in layers.layers().iter().enumerate() {
        for dx in 0..LEGEND_SWATCH {
            for y in 0..LEGEND_SWATCH {
                img.put_pixel(k as u32 * LEGEND_SWATCH + dx, y, image::Rgb(layer.color));
            }
        }
    }
    img
}

fn main() {
    let params = GenerationParameters { width: 512, height: 512, seed: 42, ..Default::default() };
    let layers = LayerTable::standard();

    println!("Sampling heightmap ({}×{})…", params.width, params.height);
    let field = sample(&params, &mut ThreadSeedSource).expect("invalid parameters");

    let out_dir = Path::new("data/debug");
    fs::create_dir_all(out_dir).expect("cannot create data/debug/");

    // ── 1. heightmap.png ─────────────────────────────────────────────────────
    {
        let path = out_dir.join("heightmap.png");
        gray_image(&field.grid).save(&path).expect("failed to save heightmap.png");
        println!("Wrote {}", path.display());
    }

    // ── 2. bands_sea_<level>.png ─────────────────────────────────────────────
    for sea in SEA_LEVELS {
        let raster = assemble(&classify(&field.grid, &layers, sea));
        let img = image::RgbImage::from_raw(
            raster.width as u32,
            raster.height as u32,
            raster.into_bytes(),
        )
        .expect("raster size mismatch");
        let path = out_dir.join(format!("bands_sea_{sea}.png"));
        img.save(&path).expect("failed to save band raster");
        println!("Wrote {}", path.display());
    }

    // ── 3. legend.png ────────────────────────────────────────────────────────
    {
        let path = out_dir.join("legend.png");
        legend_image(&layers).save(&path).expect("failed to save legend.png");
        println!("Wrote {}", path.display());
    }

    println!("Done.");
}

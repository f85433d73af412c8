//! Command-line front end: generate one banded terrain raster and save it
//! as PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use strata_core::classify::coverage;
use strata_core::{LayerTable, Raster, Settings, TerrainGenerator, ThreadSeedSource};
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Generate a banded terrain raster from fractal noise")]
struct Args {
    /// Settings JSON; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layer table JSON (array of {name, color, base_altitude}).
    #[arg(long)]
    layers: Option<PathBuf>,

    /// Feature size as a percentage of width (1-100).
    #[arg(long)]
    scale: Option<u32>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    octaves: Option<u32>,

    /// Persistence in hundredths (55 = 0.55).
    #[arg(long)]
    persistence: Option<u32>,

    /// Lacunarity in tenths (20 = 2.0).
    #[arg(long)]
    lacunarity: Option<u32>,

    /// Seed; 0 or negative picks one at random.
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Offset added to every layer threshold.
    #[arg(long, allow_negative_numbers = true)]
    sea_level: Option<i32>,

    /// Output PNG path.
    #[arg(short, long, default_value = "terrain.png")]
    output: PathBuf,

    /// Print the quantized heightmap as JSON rows to stdout.
    #[arg(long)]
    print_grid: bool,

    /// Print per-layer coverage.
    #[arg(long)]
    summary: bool,
}

impl Args {
    /// Fold flag overrides into the loaded settings.
    fn apply(&self, settings: &mut Settings) {
        let g = &mut settings.generation;
        if let Some(v) = self.scale { g.scale = v; }
        if let Some(v) = self.width { g.width = v; }
        if let Some(v) = self.height { g.height = v; }
        if let Some(v) = self.octaves { g.octaves = v; }
        if let Some(v) = self.persistence { g.persistence = f64::from(v) / 100.0; }
        if let Some(v) = self.lacunarity { g.lacunarity = f64::from(v) / 10.0; }
        if let Some(v) = self.seed { g.seed = v; }
        if let Some(v) = self.sea_level { settings.sea_level = v; }
    }
}

fn save_png(raster: &Raster, path: &Path) -> Result<()> {
    let width = u32::try_from(raster.width).context("raster too wide for PNG")?;
    let height = u32::try_from(raster.height).context("raster too tall for PNG")?;
    let img = image::RgbImage::from_raw(width, height, raster.as_bytes().to_vec())
        .context("raster buffer does not match its dimensions")?;
    img.save(path).with_context(|| format!("failed to save {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    args.apply(&mut settings);

    let layers = match &args.layers {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            LayerTable::from_json(&json).with_context(|| format!("bad layer table {}", path.display()))?
        }
        None => settings.layer_table()?,
    };

    let generator = TerrainGenerator::new(layers, settings.sea_level);
    let p = &settings.generation;
    eprintln!(
        "Generating {}x{} terrain (scale {}%, {} octaves, persistence {:.2}, lacunarity {:.1}) ...",
        p.width, p.height, p.scale, p.octaves, p.persistence, p.lacunarity
    );
    let terrain = generator.generate(p, &mut ThreadSeedSource)?;

    let t = &terrain.timings;
    eprintln!(
        "Seed {}: sample {:.1} ms, classify {:.1} ms, assemble {:.1} ms",
        terrain.seed,
        t.sample.as_secs_f64() * 1e3,
        t.classify.as_secs_f64() * 1e3,
        t.assemble.as_secs_f64() * 1e3,
    );

    if args.print_grid {
        println!("{}", serde_json::to_string(&terrain.heights.to_rows())?);
    }

    if args.summary {
        eprintln!("\n{:<12} {:>15} {:>9} {:>7}", "Layer", "Color", "Cells", "Share");
        eprintln!("{}", "-".repeat(46));
        for c in coverage(&terrain.heights, generator.layers(), generator.sea_level()) {
            let [r, g, b] = c.color;
            eprintln!(
                "{:<12} {:>15} {:>9} {:>6.1}%",
                c.name,
                format!("({r},{g},{b})"),
                c.cells,
                c.fraction * 100.0
            );
        }
    }

    save_png(&terrain.raster, &args.output)?;
    eprintln!("Wrote {}", args.output.display());
    Ok(())
}

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use ascii_art_filter::{Raster, downscale, greyscale, render};
use clap::Parser;
use image::ImageReader;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path
    input: PathBuf,

    /// Downscale factor; 1.0 keeps the original size
    #[arg(short, long, default_value_t = 1.0, value_parser = parse_scale)]
    scale: f64,

    /// Keep colors instead of greyscaling before rendering
    #[arg(long)]
    no_greyscale: bool,

    /// Also save the transformed image to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't print the ASCII art
    #[arg(short, long)]
    quiet: bool,
}

fn parse_scale(s: &str) -> Result<f64, String> {
    let scale: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if scale.is_nan() || scale <= 0.0 {
        return Err(format!("Scale must be greater than 0, got {}", scale));
    }
    Ok(scale)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let decoded = ImageReader::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?
        .decode()
        .with_context(|| format!("failed to decode {}", args.input.display()))?;
    info!("Loaded image: {}x{}", decoded.width(), decoded.height());

    let mut source = Raster::from_dynamic(decoded);
    if args.scale < 1.0 {
        // Block averaging reads 8-bit straight-alpha buffers only.
        source = source.into_straight();
    }
    let mut raster = downscale(source, args.scale)?;
    if !args.no_greyscale {
        raster = raster.into_premultiplied();
        greyscale(&mut raster)?;
    }

    if !args.quiet {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        render(&raster, &mut out)?;
        out.flush()?;
    }

    if let Some(path) = &args.output {
        raster
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        info!("Saved result to {}", path.display());
    }

    Ok(())
}

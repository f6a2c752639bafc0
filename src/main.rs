//! Command-line crop tool
//!
//! Thin shell over the engine: decode a file, crop either an explicit
//! rectangle or the centered default selection, and write the encoded
//! output.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use cropkit::config::{CropConfig, OutputFormat};
use cropkit::domain::{AspectRatio, PixelRect, Size};
use cropkit::loader::{LoadLimits, decode_image};
use cropkit::render::{RasterOptions, rasterize};
use cropkit::session::CropSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

/// Parse an aspect ratio given as `W:H` (e.g. `16:9`)
fn parse_aspect(s: &str) -> Result<AspectRatio, String> {
    let (w, h) = s
        .split_once(':')
        .ok_or_else(|| format!("expected W:H, got {s:?}"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width in {s:?}"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height in {s:?}"))?;
    if w == 0 || h == 0 {
        return Err("aspect parts must be positive".to_string());
    }
    Ok(AspectRatio::of(w, h))
}

#[derive(Parser, Debug)]
#[command(version, about = "Crop a region out of an image and re-encode it")]
struct Args {
    /// Source image file
    input: PathBuf,
    /// Destination file for the encoded crop
    output: PathBuf,
    /// Explicit crop rectangle in source pixels; defaults to a centered
    /// selection when omitted
    #[arg(long, value_names = ["X", "Y", "W", "H"], num_args = 4)]
    crop: Option<Vec<u32>>,
    /// Aspect constraint for the default selection, as W:H
    #[arg(long, value_parser = parse_aspect)]
    aspect: Option<AspectRatio>,
    /// Output width in pixels (requires --height)
    #[arg(long, requires = "height")]
    width: Option<u32>,
    /// Output height in pixels (requires --width)
    #[arg(long, requires = "width")]
    height: Option<u32>,
    /// Encoding quality for JPEG, 0.0-1.0
    #[arg(long, default_value_t = 0.85)]
    quality: f32,
    /// Output format
    #[arg(long, value_enum, default_value = "jpeg")]
    format: FormatArg,
    /// Clip the output to a centered circle
    #[arg(long)]
    circle: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let bytes = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let source = decode_image(&bytes, &LoadLimits::default())?;

    let crop = match &args.crop {
        Some(parts) => PixelRect {
            x: parts[0],
            y: parts[1],
            width: parts[2],
            height: parts[3],
        },
        None => {
            // No explicit rectangle: take the centered default selection a
            // session would offer, at a 1:1 rendered scale
            let natural = Size::new(source.width() as f32, source.height() as f32);
            let config = CropConfig {
                aspect: args.aspect.unwrap_or_default(),
                ..Default::default()
            };
            let session = CropSession::new(natural, natural, config)?;
            let (crop, _event) = session.commit()?;
            crop
        }
    };

    let format: OutputFormat = args.format.into();
    let written_ext = args.output.extension().and_then(|e| e.to_str());
    if let Some(ext) = written_ext
        && !ext.eq_ignore_ascii_case(format.extension())
        && !(format == OutputFormat::Jpeg && ext.eq_ignore_ascii_case("jpeg"))
    {
        log::warn!("output extension .{ext} does not match {} encoding", format.extension());
    }

    let options = RasterOptions {
        output_size: args.width.zip(args.height),
        format,
        quality: args.quality,
        circular_mask: args.circle,
    };
    let output = rasterize(&source, crop, &options)?;

    fs::write(&args.output, &output.bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!(
        "wrote {}x{} crop to {} ({} bytes)",
        output.output_size.0,
        output.output_size.1,
        args.output.display(),
        output.bytes.len()
    );
    Ok(())
}

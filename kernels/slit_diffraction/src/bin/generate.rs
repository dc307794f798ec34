// Slit Diffraction Asset Generator CLI
//
// Precomputes the wavelet field and one rendered frame for static
// embeds (pages without wasm) and for eyeballing solver output during
// development. Writes the field magnitudes as little-endian f32, the
// frame as raw RGBA8, and a JSON manifest describing both.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use slit_diffraction::*;

/// CLI arguments for the asset generator
#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(about = "Generate slit-diffraction field data and a rendered frame", long_about = None)]
struct Args {
    /// Barrier mode: "single" or "double"
    #[arg(short, long, default_value = "single")]
    mode: String,

    /// Slit width in wavelengths (0.5 - 10)
    #[arg(short, long, default_value_t = 2.0)]
    width: f64,

    /// Center-to-center slit separation in wavelengths (0.5 - 25)
    #[arg(short, long, default_value_t = 6.0)]
    separation: f64,

    /// Wavelength scale in pixels per wavelength (8 - 40)
    #[arg(long, default_value_t = 16.0)]
    scale: f64,

    /// Full-resolution field grid (stride 1 instead of 2)
    #[arg(long, default_value_t = false)]
    high_quality: bool,

    /// Render mode: "intensity", "wavefronts", or "wavelets"
    #[arg(short, long, default_value = "intensity")]
    render_mode: String,

    /// Clock phase of the rendered frame, in radians
    #[arg(short, long, default_value_t = 0.0)]
    phase: f64,

    /// Output directory for generated assets
    #[arg(short, long, default_value = "public/slits")]
    output: PathBuf,
}

/// Metadata describing the generated buffers
#[derive(Debug, Serialize)]
struct Manifest {
    mode: String,
    width_wl: f64,
    separation_wl: f64,
    wavelength_px: f64,
    canvas_width: usize,
    canvas_height: usize,
    grid_width: usize,
    grid_height: usize,
    stride: usize,
    sources_per_aperture: usize,
    max_amplitude: f64,
    render_mode: String,
    phase: f64,
}

fn parse_mode(mode: &str) -> Result<SlitMode, String> {
    match mode {
        "single" => Ok(SlitMode::Single),
        "double" => Ok(SlitMode::Double),
        _ => Err(format!("Invalid mode: '{mode}'. Must be single or double")),
    }
}

fn parse_render_mode(mode: &str) -> Result<RenderMode, String> {
    match mode {
        "intensity" => Ok(RenderMode::Intensity),
        "wavefronts" => Ok(RenderMode::Wavefronts),
        "wavelets" => Ok(RenderMode::Wavelets),
        _ => Err(format!(
            "Invalid render mode: '{mode}'. Must be one of: intensity, wavefronts, wavelets"
        )),
    }
}

/// Write a f64 slice to a file as little-endian f32
fn write_binary(path: &PathBuf, data: impl Iterator<Item = f64>) -> std::io::Result<()> {
    let byte_data: Vec<u8> = data
        .flat_map(|v| (v as f32).to_le_bytes())
        .collect();
    fs::write(path, byte_data)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let slit_mode = parse_mode(&args.mode).map_err(|e| e.to_string())?;
    let render_mode = parse_render_mode(&args.render_mode).map_err(|e| e.to_string())?;
    let quality = if args.high_quality {
        Quality::High
    } else {
        Quality::Fast
    };

    let mut geometry = SlitGeometry::default();
    geometry.set_mode(slit_mode);
    geometry.set_width_wl(args.width);
    geometry.set_separation_wl(args.separation);
    geometry.set_wavelength_px(args.scale);

    println!("\nSlit Diffraction Asset Generator");
    println!("=======================================");
    println!("  Mode: {}", args.mode);
    println!("  Slit width: {:.2} wavelengths", geometry.width_wl);
    if slit_mode == SlitMode::Double {
        println!("  Separation: {:.2} wavelengths", geometry.separation_wl);
    }
    println!("  Scale: {:.1} px/wavelength", geometry.wavelength_px);
    println!("  Sources per aperture: {}", geometry.sources_per_aperture());
    println!("  Quality: {}", if args.high_quality { "high" } else { "fast" });
    println!("=======================================\n");

    let stride = quality.stride();
    let grid_rows = (BARRIER_Y + stride - 1) / stride;
    let pb = ProgressBar::new(grid_rows as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows")?,
    );

    println!("Summing wavelets...");
    let field = compute_field(&geometry, quality, |_| pb.inc(1));
    pb.finish_with_message("field complete");

    fs::create_dir_all(&args.output)?;

    let field_path = args.output.join("field_r32f.bin");
    write_binary(&field_path, field.cells.iter().map(|c| c.mag))?;
    println!(
        "  Wrote field magnitudes: {} ({:.2} MB)",
        field_path.display(),
        (field.cells.len() * 4) as f64 / 1_000_000.0
    );

    let frame = render_frame(&geometry, &field, render_mode, args.phase);
    let frame_path = args.output.join("frame_rgba8.bin");
    fs::write(&frame_path, &frame)?;
    println!(
        "  Wrote rendered frame: {} ({:.2} MB)",
        frame_path.display(),
        frame.len() as f64 / 1_000_000.0
    );

    let manifest = Manifest {
        mode: args.mode.clone(),
        width_wl: geometry.width_wl,
        separation_wl: geometry.separation_wl,
        wavelength_px: geometry.wavelength_px,
        canvas_width: CANVAS_WIDTH,
        canvas_height: CANVAS_HEIGHT,
        grid_width: field.grid_width,
        grid_height: field.grid_height,
        stride: field.stride,
        sources_per_aperture: geometry.sources_per_aperture(),
        max_amplitude: field.max_mag,
        render_mode: args.render_mode.clone(),
        phase: args.phase,
    };
    let manifest_path = args.output.join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    println!("  Wrote manifest: {}", manifest_path.display());

    println!("\nGeneration complete: {}\n", args.output.display());

    Ok(())
}

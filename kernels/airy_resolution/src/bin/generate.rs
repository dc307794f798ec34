// Airy Resolution Asset Generator CLI
//
// Precomputes chart data for static embeds: either a single profile set
// for the given parameters, or a distance sweep (one frame per step of
// the separation) for pre-rendered play-mode animations.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use airy_resolution::*;

/// CLI arguments for the asset generator
#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(about = "Generate Airy two-point profile data and resolution criteria", long_about = None)]
struct Args {
    /// Numerical aperture of the objective (0.1 - 1.4)
    #[arg(short, long, default_value_t = 1.0)]
    na: f64,

    /// Wavelength in nanometers (400 - 700)
    #[arg(short, long, default_value_t = 550.0)]
    wavelength: f64,

    /// Source separation in micrometers (0 - 2)
    #[arg(short, long, default_value_t = 0.5)]
    distance: f64,

    /// Camera pixel size in micrometers (0 = continuous, no camera)
    #[arg(short, long, default_value_t = 0.0)]
    pixel_size: f64,

    /// Pixel grid offset in micrometers (0 - pixelSize/2)
    #[arg(long, default_value_t = 0.0)]
    offset: f64,

    /// RMS read noise added per pixel
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Noise RNG seed (reproducible output)
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of sweep frames over the full separation domain
    /// (1 = single static profile at --distance)
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Output file
    #[arg(short, long, default_value = "profiles.json")]
    output: PathBuf,
}

/// One precomputed frame: parameters plus all chart series
#[derive(Debug, Serialize)]
struct Frame {
    distance_um: f64,
    source1: Vec<IntensitySample>,
    source2: Vec<IntensitySample>,
    sum: Vec<IntensitySample>,
    discretized: Vec<IntensitySample>,
}

/// Top-level output document
#[derive(Debug, Serialize)]
struct Document {
    numerical_aperture: f64,
    wavelength_nm: f64,
    pixel_size_um: f64,
    offset_um: f64,
    noise_rms: f64,
    rayleigh_um: f64,
    abbe_um: f64,
    sparrow_um: f64,
    sampling_rate: String,
    frames: Vec<Frame>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut optics = OpticalParameters::default();
    optics.set_numerical_aperture(args.na);
    optics.set_wavelength_nm(args.wavelength);
    optics.set_distance_um(args.distance);

    let mut sampling = SamplingParameters::default();
    sampling.set_pixel_size_um(args.pixel_size);
    sampling.set_offset_um(args.offset);
    sampling.set_noise_rms(args.noise);

    let mut rng = SmallRng::seed_from_u64(args.seed);

    println!("\nAiry Resolution Asset Generator");
    println!("=======================================");
    println!("  NA: {:.2}", optics.numerical_aperture);
    println!("  Wavelength: {:.0} nm", optics.wavelength_nm);
    println!("  Pixel size: {:.3} um", sampling.pixel_size_um);
    println!("  Frames: {}", args.frames);
    println!("=======================================\n");

    let pb = ProgressBar::new(args.frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames")?,
    );

    let mut frames = Vec::with_capacity(args.frames as usize);
    for i in 0..args.frames {
        // Multiple frames sweep the separation across its whole domain;
        // a single frame keeps the requested distance
        if args.frames > 1 {
            let t = i as f64 / (args.frames - 1) as f64;
            optics.set_distance_um(DISTANCE_RANGE_UM.0 + t * (DISTANCE_RANGE_UM.1 - DISTANCE_RANGE_UM.0));
        }

        let profile = generate_airy_data(&optics);
        let discretized = discretize_data(&profile.sum, &sampling, &mut rng);
        frames.push(Frame {
            distance_um: optics.distance_um,
            source1: profile.source1,
            source2: profile.source2,
            sum: profile.sum,
            discretized,
        });
        pb.inc(1);
    }
    pb.finish_with_message("profiles computed");

    let document = Document {
        numerical_aperture: optics.numerical_aperture,
        wavelength_nm: optics.wavelength_nm,
        pixel_size_um: sampling.pixel_size_um,
        offset_um: sampling.offset_um,
        noise_rms: sampling.noise_rms,
        rayleigh_um: rayleigh_criterion_um(optics.wavelength_nm, optics.numerical_aperture),
        abbe_um: abbe_criterion_um(optics.wavelength_nm, optics.numerical_aperture),
        sparrow_um: sparrow_criterion_um(optics.wavelength_nm, optics.numerical_aperture),
        sampling_rate: sampling_rate(
            optics.wavelength_nm,
            optics.numerical_aperture,
            sampling.pixel_size_um,
        )
        .to_string(),
        frames,
    };

    fs::write(&args.output, serde_json::to_string_pretty(&document)?)?;
    println!("\nWrote {} ({} frames)", args.output.display(), args.frames);

    Ok(())
}

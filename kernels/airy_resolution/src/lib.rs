// Airy Resolution Kernel
//
// Physics core for the "can the microscope resolve two points?"
// interactive. Two point sources are imaged as Airy diffraction
// patterns; the engine produces their continuous intensity profiles,
// a pixel-discretized (camera) version with optional read noise, the
// classic resolution criteria, and a Nyquist sampling readout.
//
// The wasm surface below is the full contract with the page: sliders
// clamp through the setters, charts pull `Vec<f64>` series, labels pull
// scalars. Everything recomputes synchronously on change — the profile
// is 300 PSF evaluations per series, far below frame budget.

pub mod bessel;
pub mod criteria;
pub mod discretize;
pub mod profile;
pub mod psf;

pub use bessel::bessel_j1;
pub use criteria::{
    abbe_criterion_um, near_criterion, nyquist_pixel_size_um, rayleigh_criterion_um,
    sampling_rate, sparrow_criterion_um, SamplingRate,
};
pub use discretize::{discretize_data, gaussian_draw, SamplingParameters};
pub use profile::{
    generate_airy_data, ContinuousProfile, IntensitySample, OpticalParameters,
    DISTANCE_RANGE_UM, PROFILE_SAMPLES,
};
pub use psf::airy_disk;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

// Distance increment per play-mode tick. The host fires 15 ticks/s, so
// a full 0..2µm sweep takes ~6.7s before wrapping.
const PLAY_STEP_UM: f64 = 0.02;

// ============================================================================
// WASM COMPONENT
// ============================================================================

/// Engine instance owned by the page. Owns its profile buffers
/// exclusively; each parameter change replaces them wholesale.
#[wasm_bindgen]
pub struct AiryEngine {
    optics: OpticalParameters,
    sampling: SamplingParameters,
    profile: ContinuousProfile,
    discretized: Vec<IntensitySample>,
    rng: SmallRng,
}

impl Default for AiryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl AiryEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let optics = OpticalParameters::default();
        let sampling = SamplingParameters::default();
        let profile = generate_airy_data(&optics);
        let mut engine = Self {
            optics,
            sampling,
            profile,
            discretized: Vec::new(),
            rng: SmallRng::seed_from_u64(0x41525953),
        };
        engine.recompute();
        engine
    }

    // ------------------------------------------------------------------
    // Parameter setters (clamping, each triggers a synchronous recompute)
    // ------------------------------------------------------------------

    pub fn set_numerical_aperture(&mut self, na: f64) {
        self.optics.set_numerical_aperture(na);
        self.recompute();
    }

    pub fn set_wavelength_nm(&mut self, wavelength: f64) {
        self.optics.set_wavelength_nm(wavelength);
        self.recompute();
    }

    pub fn set_distance_um(&mut self, distance: f64) {
        self.optics.set_distance_um(distance);
        self.recompute();
    }

    pub fn set_pixel_size_um(&mut self, pixel_size: f64) {
        self.sampling.set_pixel_size_um(pixel_size);
        self.recompute();
    }

    pub fn set_offset_um(&mut self, offset: f64) {
        self.sampling.set_offset_um(offset);
        self.recompute();
    }

    pub fn set_noise_rms(&mut self, noise: f64) {
        self.sampling.set_noise_rms(noise);
        self.recompute();
    }

    /// Reseed the noise source (lets the page reproduce a noise pattern).
    pub fn set_noise_seed(&mut self, seed: u32) {
        self.rng = SmallRng::seed_from_u64(seed as u64);
        self.recompute();
    }

    /// Preset: pixel size at the Nyquist limit for the current optics.
    pub fn apply_nyquist_sampling(&mut self) {
        let pixel = nyquist_pixel_size_um(self.optics.wavelength_nm, self.optics.numerical_aperture);
        self.sampling.set_pixel_size_um(pixel);
        self.recompute();
    }

    /// Preset: jump the separation onto a criterion ("rayleigh", "abbe",
    /// "sparrow"). Unknown names are ignored.
    pub fn apply_criterion_preset(&mut self, name: &str) {
        let (wl, na) = (self.optics.wavelength_nm, self.optics.numerical_aperture);
        let distance = match name {
            "rayleigh" => rayleigh_criterion_um(wl, na),
            "abbe" => abbe_criterion_um(wl, na),
            "sparrow" => sparrow_criterion_um(wl, na),
            _ => return,
        };
        self.optics.set_distance_um(distance);
        self.recompute();
    }

    /// One play-mode step: advance the separation sweep and wrap at the
    /// end of its domain. The host calls this from its 15Hz timer.
    pub fn step_play(&mut self) {
        let mut next = self.optics.distance_um + PLAY_STEP_UM;
        if next > DISTANCE_RANGE_UM.1 {
            next = DISTANCE_RANGE_UM.0;
        }
        self.optics.set_distance_um(next);
        self.recompute();
    }

    // ------------------------------------------------------------------
    // Chart data
    // ------------------------------------------------------------------

    /// Shared x grid of the three continuous series (µm).
    pub fn positions(&self) -> Vec<f64> {
        self.profile.source1.iter().map(|s| s.x).collect()
    }

    pub fn source1_intensity(&self) -> Vec<f64> {
        self.profile.source1.iter().map(|s| s.y).collect()
    }

    pub fn source2_intensity(&self) -> Vec<f64> {
        self.profile.source2.iter().map(|s| s.y).collect()
    }

    pub fn sum_intensity(&self) -> Vec<f64> {
        self.profile.sum.iter().map(|s| s.y).collect()
    }

    /// Discretized step series as interleaved x,y pairs. Empty in
    /// continuous mode (pixel size 0).
    pub fn discretized_xy(&self) -> Vec<f64> {
        self.discretized
            .iter()
            .flat_map(|s| [s.x, s.y])
            .collect()
    }

    // ------------------------------------------------------------------
    // Readouts
    // ------------------------------------------------------------------

    pub fn distance_um(&self) -> f64 {
        self.optics.distance_um
    }

    pub fn rayleigh_um(&self) -> f64 {
        rayleigh_criterion_um(self.optics.wavelength_nm, self.optics.numerical_aperture)
    }

    pub fn abbe_um(&self) -> f64 {
        abbe_criterion_um(self.optics.wavelength_nm, self.optics.numerical_aperture)
    }

    pub fn sparrow_um(&self) -> f64 {
        sparrow_criterion_um(self.optics.wavelength_nm, self.optics.numerical_aperture)
    }

    pub fn near_rayleigh(&self) -> bool {
        near_criterion(self.optics.distance_um, self.rayleigh_um())
    }

    pub fn near_abbe(&self) -> bool {
        near_criterion(self.optics.distance_um, self.abbe_um())
    }

    pub fn near_sparrow(&self) -> bool {
        near_criterion(self.optics.distance_um, self.sparrow_um())
    }

    /// Sampling-rate readout for the UI: pixels per Airy radius, or the
    /// literal "continuous" when discretization is off.
    pub fn sampling_rate_label(&self) -> String {
        sampling_rate(
            self.optics.wavelength_nm,
            self.optics.numerical_aperture,
            self.sampling.pixel_size_um,
        )
        .to_string()
    }
}

impl AiryEngine {
    // Replace both buffers from the current parameters. Synchronous and
    // cheap; runs on every setter.
    fn recompute(&mut self) {
        self.profile = generate_airy_data(&self.optics);
        self.discretized = discretize_data(&self.profile.sum, &self.sampling, &mut self.rng);
    }
}

// Two-source intensity profile generation
//
// The simulated specimen is two point sources a given distance apart.
// Each is imaged as an Airy pattern; the camera sees their incoherent
// sum. Sampling both patterns (and the sum) on a shared x grid gives
// the chart-ready "ground truth" continuous image that the pixel
// discretizer and the resolution-criteria display both feed on.

use crate::psf::airy_disk;
use serde::Serialize;

// ============================================================================
// PARAMETER DOMAINS
// ============================================================================

// Slider domains from the UI contract. Setters clamp rather than reject:
// an out-of-range update pins to the nearest bound — the engine never
// errors on parameters.
pub const NA_RANGE: (f64, f64) = (0.1, 1.4);
pub const WAVELENGTH_RANGE_NM: (f64, f64) = (400.0, 700.0);
pub const DISTANCE_RANGE_UM: (f64, f64) = (0.0, 2.0);

// Profile domain and sampling
pub const PROFILE_MIN_UM: f64 = -2.0;
pub const PROFILE_MAX_UM: f64 = 2.0;
pub const PROFILE_SAMPLES: usize = 300;

// Optical configuration for the two-source image
#[derive(Debug, Clone, Copy)]
pub struct OpticalParameters {
    // Numerical aperture of the objective, NA ∈ [0.1, 1.4]
    pub numerical_aperture: f64,

    // Illumination wavelength in nanometers, λ ∈ [400, 700]
    pub wavelength_nm: f64,

    // Center-to-center separation of the two sources in micrometers
    pub distance_um: f64,
}

impl Default for OpticalParameters {
    fn default() -> Self {
        Self {
            numerical_aperture: 1.0,
            wavelength_nm: 550.0,
            distance_um: 0.5,
        }
    }
}

impl OpticalParameters {
    pub fn set_numerical_aperture(&mut self, na: f64) {
        self.numerical_aperture = na.clamp(NA_RANGE.0, NA_RANGE.1);
    }

    pub fn set_wavelength_nm(&mut self, wavelength: f64) {
        self.wavelength_nm = wavelength.clamp(WAVELENGTH_RANGE_NM.0, WAVELENGTH_RANGE_NM.1);
    }

    pub fn set_distance_um(&mut self, distance: f64) {
        self.distance_um = distance.clamp(DISTANCE_RANGE_UM.0, DISTANCE_RANGE_UM.1);
    }
}

// ============================================================================
// PROFILE DATA
// ============================================================================

/// One chart point: position in micrometers, peak-normalized intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensitySample {
    pub x: f64,
    pub y: f64,
}

/// The continuous (pre-camera) image: each source alone plus their sum,
/// sampled on one shared 300-point grid over [-2, +2] µm.
#[derive(Debug, Clone, Serialize)]
pub struct ContinuousProfile {
    pub source1: Vec<IntensitySample>,
    pub source2: Vec<IntensitySample>,
    pub sum: Vec<IntensitySample>,
}

/// Sample both Airy patterns and their pointwise sum.
///
/// The two sources sit at ±distance/2 so the pair stays centered as the
/// separation slider moves.
pub fn generate_airy_data(params: &OpticalParameters) -> ContinuousProfile {
    let n = PROFILE_SAMPLES;
    let span = PROFILE_MAX_UM - PROFILE_MIN_UM;
    let center1 = -params.distance_um / 2.0;
    let center2 = params.distance_um / 2.0;

    let mut source1 = Vec::with_capacity(n);
    let mut source2 = Vec::with_capacity(n);
    let mut sum = Vec::with_capacity(n);

    for i in 0..n {
        // Endpoints included: x runs exactly from -2.0 to +2.0
        let x = PROFILE_MIN_UM + span * i as f64 / (n - 1) as f64;
        let y1 = airy_disk(x, params.wavelength_nm, params.numerical_aperture, center1);
        let y2 = airy_disk(x, params.wavelength_nm, params.numerical_aperture, center2);
        source1.push(IntensitySample { x, y: y1 });
        source2.push(IntensitySample { x, y: y2 });
        sum.push(IntensitySample { x, y: y1 + y2 });
    }

    ContinuousProfile { source1, source2, sum }
}

// Pixel-grid discretization of the continuous profile
//
// A real camera integrates the continuous image over finite pixels and
// adds read noise. We model that by partitioning [-2, 2] µm into pixels
// of the chosen width, averaging the continuous samples that fall inside
// each pixel, and perturbing each pixel once with a zero-mean Gaussian
// draw. The output is a step function (two samples per pixel, one at
// each edge) so the chart renders flat horizontal segments.
//
// Pixel size 0 means "continuous mode": no discretization overlay at
// all, expressed as an empty sequence rather than an error.

use crate::profile::{IntensitySample, PROFILE_MAX_UM, PROFILE_MIN_UM};
use rand::Rng;
use std::f64::consts::PI;

/// Camera model: pixel width, grid phase, and read-noise RMS.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParameters {
    // Pixel width in micrometers; 0 disables discretization
    pub pixel_size_um: f64,

    // Grid phase: a pixel boundary is anchored at -offset,
    // 0 ≤ offset ≤ pixelSize/2
    pub offset_um: f64,

    // RMS of the per-pixel Gaussian noise; 0 disables noise
    pub noise_rms: f64,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            pixel_size_um: 0.0,
            offset_um: 0.0,
            noise_rms: 0.0,
        }
    }
}

impl SamplingParameters {
    pub fn set_pixel_size_um(&mut self, pixel_size: f64) {
        self.pixel_size_um = pixel_size.max(0.0);
        // The offset domain shrinks with the pixel, keep it valid
        self.offset_um = self.offset_um.clamp(0.0, self.pixel_size_um / 2.0);
    }

    pub fn set_offset_um(&mut self, offset: f64) {
        self.offset_um = offset.clamp(0.0, self.pixel_size_um / 2.0);
    }

    pub fn set_noise_rms(&mut self, noise: f64) {
        self.noise_rms = noise.max(0.0);
    }
}

/// One standard-normal draw via the Box–Muller transform.
///
/// Two uniforms on (0, 1] map to a Gaussian pair; we keep only the
/// cosine branch — one independent draw per call is all the pixel noise
/// model needs.
pub fn gaussian_draw(rng: &mut impl Rng) -> f64 {
    // 1 - gen::<f64>() lies in (0, 1], keeping the log finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Pixel-average the continuous profile into step segments.
///
/// The grid is anchored so a pixel boundary falls at `-offset` and is
/// extended left until the first pixel starts at or before the domain,
/// so coverage is complete for any offset. Empty pixels (no continuous
/// sample inside) emit nothing.
pub fn discretize_data(
    continuous: &[IntensitySample],
    sampling: &SamplingParameters,
    rng: &mut impl Rng,
) -> Vec<IntensitySample> {
    let p = sampling.pixel_size_um;
    if p <= 0.0 {
        // Continuous mode: no overlay
        return Vec::new();
    }

    // Boundaries sit at -offset + n·p for integer n; start from the
    // boundary at or below the left edge of the domain
    let first_index = ((PROFILE_MIN_UM + sampling.offset_um) / p).floor();
    let mut start = -sampling.offset_um + first_index * p;

    let mut out = Vec::new();
    while start < PROFILE_MAX_UM {
        let end = start + p;

        // Mean of the continuous samples landing in [start, end)
        let mut acc = 0.0;
        let mut count = 0usize;
        for sample in continuous {
            if sample.x >= start && sample.x < end {
                acc += sample.y;
                count += 1;
            }
        }

        if count > 0 {
            let mut value = acc / count as f64;
            if sampling.noise_rms > 0.0 {
                // One draw per pixel, not per sample
                value += sampling.noise_rms * gaussian_draw(rng);
            }
            out.push(IntensitySample { x: start, y: value });
            out.push(IntensitySample { x: end, y: value });
        }

        start = end;
    }

    out
}

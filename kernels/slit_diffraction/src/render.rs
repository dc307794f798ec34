// Animated renderer: precomputed field → grayscale RGBA frame
//
// Per frame the canvas splits into three vertical zones:
//
//   rows 0..BARRIER_Y          diffracted field (precomputed phasors)
//   the barrier band           opaque metal, or a slit opening
//   rows below the band        the undisturbed incoming plane wave
//
// Animation never touches the solver output: the stored phasor (re, im)
// is oscillated by the clock phase, `re·cos(ωt) + im·sin(ωt)`, and the
// plane-wave zones use the closed form `cos(k·d + ωt)`. Three shading
// modes map the instantaneous value (and, where needed, the local
// amplitude) to gray levels; the wavelets mode additionally rasterizes
// expanding circular arcs around a subset of the Huygens sources.

use crate::field::{ComplexField, NEAR_FIELD_GUARD_PX};
use crate::geometry::{
    SlitGeometry, BARRIER_THICKNESS, BARRIER_Y, CANVAS_HEIGHT, CANVAS_WIDTH, PROFILE_BAND_HEIGHT,
};
use std::f64::consts::PI;

/// Visual mode selected by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Intensity,
    Wavefronts,
    Wavelets,
}

// Wavefront-crest shading
const CREST_THRESHOLD: f64 = 0.6;
const AMPLITUDE_FLOOR: f64 = 0.005;
const CREST_FADE_GAIN: f64 = 3.0;

// Wavelet-arc overlay
const WAVELET_SOURCES_PER_APERTURE: usize = 5;
const WAVELET_BACKGROUND_DIM: u8 = 4; // background gray divided by this
const ARC_GRAY: u8 = 235;

// Barrier drawing
const BARRIER_GRAY: u8 = 160;
const EDGE_GRAY: u8 = 255;

// Profile overlay
const PROFILE_GRAY: u8 = 220;

#[inline]
fn put_gray(out: &mut [u8], x: usize, y: usize, gray: u8) {
    let idx = (y * CANVAS_WIDTH + x) * 4;
    out[idx] = gray;
    out[idx + 1] = gray;
    out[idx + 2] = gray;
    out[idx + 3] = 255;
}

#[inline]
fn gray_at(out: &[u8], x: usize, y: usize) -> u8 {
    out[(y * CANVAS_WIDTH + x) * 4]
}

// Instantaneous field value and local amplitude at one pixel.
// Returns (value, amplitude), both already normalized to [-1, 1]/[0, 1].
fn field_value_at(
    geometry: &SlitGeometry,
    field: &ComplexField,
    x: usize,
    y: usize,
    phase: f64,
) -> (f64, f64) {
    let k = geometry.wave_number();

    if y < BARRIER_Y {
        let dy = BARRIER_Y - y;
        if dy >= NEAR_FIELD_GUARD_PX && field.max_mag > 0.0 {
            let cell = field.cell_at(x, y);
            let value = (cell.re * phase.cos() + cell.im * phase.sin()) / field.max_mag;
            let amplitude = cell.mag / field.max_mag;
            return (value, amplitude);
        }
        // Near-field guard band: plane-wave continuation
        return ((k * dy as f64 + phase).cos(), 1.0);
    }

    // Inside the barrier band the boundary distance is zero; below it,
    // measure from the underside of the band
    let d = y.saturating_sub(BARRIER_Y + BARRIER_THICKNESS) as f64;
    ((k * d + phase).cos(), 1.0)
}

// Map the field value of one pixel to a gray level for the given mode.
fn shade(mode: RenderMode, value: f64, amplitude: f64) -> u8 {
    match mode {
        RenderMode::Intensity => {
            // Linear [-1, 1] → [1, 254]
            let v = value.clamp(-1.0, 1.0);
            (1.0 + (v + 1.0) / 2.0 * 253.0) as u8
        }
        RenderMode::Wavefronts => {
            // Thin bright arcs at crests, black elsewhere. Normalizing
            // by local amplitude keeps crest width uniform across the
            // pattern; the floor avoids noise where the field vanishes.
            if amplitude < AMPLITUDE_FLOOR {
                return 0;
            }
            if value / amplitude > CREST_THRESHOLD {
                let fade = (amplitude * CREST_FADE_GAIN).min(1.0);
                (fade * 255.0) as u8
            } else {
                0
            }
        }
        RenderMode::Wavelets => {
            // Dimmed intensity background; arcs come in a second pass
            let v = value.clamp(-1.0, 1.0);
            let gray = (1.0 + (v + 1.0) / 2.0 * 253.0) as u8;
            gray / WAVELET_BACKGROUND_DIM
        }
    }
}

// Rasterize the expanding wavelet arcs for a subset of sources.
//
// Arc radii are (n + phase fraction)·λ for integer n, out to the canvas
// diagonal, so successive frames show the arcs emanating outward. The
// per-aperture subsampling uses a float step, so indices may repeat
// when the subset size approaches the source count; that only affects
// visual density.
fn draw_wavelet_arcs(out: &mut [u8], geometry: &SlitGeometry, phase: f64) {
    let lambda = geometry.wavelength_px;
    let diagonal =
        ((CANVAS_WIDTH * CANVAS_WIDTH + CANVAS_HEIGHT * CANVAS_HEIGHT) as f64).sqrt();
    let max_arcs = (diagonal / lambda) as usize;
    let fraction = (phase / (2.0 * PI)).rem_euclid(1.0);

    for in_slit in geometry.source_points() {
        let n = WAVELET_SOURCES_PER_APERTURE.min(in_slit.len());
        let step = in_slit.len() as f64 / n as f64;

        for i in 0..n {
            let sx = in_slit[(i as f64 * step) as usize];

            for arc in 0..max_arcs {
                let radius = (arc as f64 + fraction) * lambda;
                if radius <= 0.0 {
                    continue;
                }
                // Upper semicircle only: the wave exists above the barrier
                let steps = (PI * radius).ceil() as usize;
                if steps == 0 {
                    continue;
                }
                for s in 0..=steps {
                    let theta = PI * s as f64 / steps as f64;
                    let x = sx + radius * theta.cos();
                    let y = BARRIER_Y as f64 - radius * theta.sin();
                    if x >= 0.0 && x < CANVAS_WIDTH as f64 && y >= 0.0 && y < BARRIER_Y as f64 {
                        put_gray(out, x as usize, y as usize, ARC_GRAY);
                    }
                }
            }
        }
    }
}

// Opaque barrier segments wherever no aperture covers the column, plus
// a one-pixel edge outline on each side of every opening.
fn draw_barrier(out: &mut [u8], geometry: &SlitGeometry) {
    let apertures = geometry.apertures();

    for y in BARRIER_Y..(BARRIER_Y + BARRIER_THICKNESS).min(CANVAS_HEIGHT) {
        for x in 0..CANVAS_WIDTH {
            if !apertures.iter().any(|a| a.contains(x as f64)) {
                put_gray(out, x, y, BARRIER_GRAY);
            }
        }
    }

    for aperture in &apertures {
        for edge in [aperture.start_px, aperture.end_px] {
            let x = edge.round() as isize;
            if x >= 0 && (x as usize) < CANVAS_WIDTH {
                for y in BARRIER_Y..(BARRIER_Y + BARRIER_THICKNESS).min(CANVAS_HEIGHT) {
                    put_gray(out, x as usize, y, EDGE_GRAY);
                }
            }
        }
    }
}

/// Squared amplitude along the field row nearest the barrier,
/// normalized by its own maximum. This is the live screen profile.
pub fn screen_intensity_profile(field: &ComplexField) -> Vec<f64> {
    let y = BARRIER_Y - NEAR_FIELD_GUARD_PX;
    let mut intensity: Vec<f64> = (0..CANVAS_WIDTH)
        .map(|x| {
            let mag = field.cell_at(x, y).mag;
            mag * mag
        })
        .collect();

    let row_max = intensity.iter().cloned().fold(0.0f64, f64::max);
    if row_max > 0.0 {
        for v in &mut intensity {
            *v /= row_max;
        }
    }
    intensity
}

// Filled intensity chart across the top band, over a semi-transparent
// backdrop (existing pixels halved so the wave stays visible behind it).
fn draw_profile_overlay(out: &mut [u8], field: &ComplexField) {
    for y in 0..PROFILE_BAND_HEIGHT {
        for x in 0..CANVAS_WIDTH {
            let dimmed = gray_at(out, x, y) / 2;
            put_gray(out, x, y, dimmed);
        }
    }

    let profile = screen_intensity_profile(field);
    let chart_height = (PROFILE_BAND_HEIGHT - 4) as f64;
    for (x, &v) in profile.iter().enumerate() {
        let bar = (v * chart_height) as usize;
        for y in (PROFILE_BAND_HEIGHT - bar)..PROFILE_BAND_HEIGHT {
            put_gray(out, x, y, PROFILE_GRAY);
        }
    }
}

/// Render one full frame at the given clock phase (ωt, radians).
pub fn render_frame(
    geometry: &SlitGeometry,
    field: &ComplexField,
    mode: RenderMode,
    phase: f64,
) -> Vec<u8> {
    let mut out = vec![0u8; CANVAS_WIDTH * CANVAS_HEIGHT * 4];

    for y in 0..CANVAS_HEIGHT {
        for x in 0..CANVAS_WIDTH {
            let (value, amplitude) = field_value_at(geometry, field, x, y, phase);
            put_gray(&mut out, x, y, shade(mode, value, amplitude));
        }
    }

    if mode == RenderMode::Wavelets {
        draw_wavelet_arcs(&mut out, geometry, phase);
    }

    draw_barrier(&mut out, geometry);
    draw_profile_overlay(&mut out, field);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{compute_field, Quality};
    use crate::geometry::SlitMode;

    fn setup() -> (SlitGeometry, ComplexField) {
        let mut geometry = SlitGeometry::default();
        geometry.set_mode(SlitMode::Single);
        geometry.set_width_wl(2.0);
        let field = compute_field(&geometry, Quality::Fast, |_| {});
        (geometry, field)
    }

    #[test]
    fn intensity_mapping_endpoints() {
        assert_eq!(shade(RenderMode::Intensity, -1.0, 1.0), 1);
        assert_eq!(shade(RenderMode::Intensity, 1.0, 1.0), 254);
        // Out-of-range values clamp rather than wrap
        assert_eq!(shade(RenderMode::Intensity, -5.0, 1.0), 1);
        assert_eq!(shade(RenderMode::Intensity, 5.0, 1.0), 254);
    }

    #[test]
    fn wavefront_mode_is_dark_off_crest_and_where_field_dies() {
        // Below the amplitude floor: always black
        assert_eq!(shade(RenderMode::Wavefronts, 0.004, 0.004), 0);
        // On a crest with strong amplitude: bright
        assert!(shade(RenderMode::Wavefronts, 0.9, 1.0) > 200);
        // Trough: black
        assert_eq!(shade(RenderMode::Wavefronts, -0.9, 1.0), 0);
        // Crest of a weak wave: faded, not full bright
        let faint = shade(RenderMode::Wavefronts, 0.09, 0.1);
        assert!(faint > 0 && faint < 100, "got {faint}");
    }

    #[test]
    fn frame_has_canvas_dimensions_and_opaque_alpha() {
        let (geometry, field) = setup();
        let frame = render_frame(&geometry, &field, RenderMode::Intensity, 0.0);
        assert_eq!(frame.len(), CANVAS_WIDTH * CANVAS_HEIGHT * 4);
        for px in frame.chunks_exact(4) {
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn barrier_is_opaque_outside_the_aperture() {
        let (geometry, field) = setup();
        let frame = render_frame(&geometry, &field, RenderMode::Intensity, 0.0);
        let y = BARRIER_Y + 1;
        // Far left is metal
        assert_eq!(frame[(y * CANVAS_WIDTH + 10) * 4], BARRIER_GRAY);
        // Center of the slit is not painted as metal
        let mid = CANVAS_WIDTH / 2;
        assert_ne!(frame[(y * CANVAS_WIDTH + mid) * 4], BARRIER_GRAY);
    }

    #[test]
    fn plane_wave_zone_oscillates_with_the_clock() {
        let (geometry, field) = setup();
        let x = 100;
        let y = CANVAS_HEIGHT - 10; // below the barrier
        let (v0, a0) = field_value_at(&geometry, &field, x, y, 0.0);
        let (v1, _) = field_value_at(&geometry, &field, x, y, PI);
        assert_eq!(a0, 1.0);
        assert!((v0 + v1).abs() < 1e-12, "π phase shift must flip the value");
    }

    #[test]
    fn precomputed_zone_uses_the_stored_phasor() {
        let (geometry, field) = setup();
        let x = CANVAS_WIDTH / 2;
        let y = 150;
        let cell = field.cell_at(x, y);
        let (v, a) = field_value_at(&geometry, &field, x, y, 0.0);
        assert!((v - cell.re / field.max_mag).abs() < 1e-12);
        assert!((a - cell.mag / field.max_mag).abs() < 1e-12);
    }

    #[test]
    fn screen_profile_is_normalized_and_canvas_wide() {
        let (_, field) = setup();
        let profile = screen_intensity_profile(&field);
        assert_eq!(profile.len(), CANVAS_WIDTH);
        let max = profile.iter().cloned().fold(0.0f64, f64::max);
        assert!((max - 1.0).abs() < 1e-12);
        assert!(profile.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn wavelets_mode_paints_arcs_over_the_dim_background() {
        let (geometry, field) = setup();
        let frame = render_frame(&geometry, &field, RenderMode::Wavelets, 0.5);
        // Some pixel above the barrier must carry the arc gray, which the
        // dimmed background (≤ 254/4) can never reach
        let has_arc = (PROFILE_BAND_HEIGHT..BARRIER_Y).any(|y| {
            (0..CANVAS_WIDTH).any(|x| frame[(y * CANVAS_WIDTH + x) * 4] == ARC_GRAY)
        });
        assert!(has_arc, "no wavelet arcs rendered");
    }

    #[test]
    fn profile_band_backdrop_is_dimmed() {
        let (geometry, field) = setup();
        // Intensity mode floor is gray 1, so an untouched band pixel
        // would be ≥ 1; the halved backdrop takes empty columns to 0
        let frame = render_frame(&geometry, &field, RenderMode::Intensity, 0.0);
        let corner = frame[(2 * CANVAS_WIDTH) * 4]; // x=0, y=2, inside the band
        assert!(corner < 128, "band backdrop not dimmed: {corner}");
    }
}

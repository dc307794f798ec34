// Huygens–Fresnel wavelet field solver
//
// Every aperture is replaced by a line of point sources, each radiating
// a cylindrical wavelet. The complex amplitude at a grid cell is the
// coherent sum over all sources
//
//   dy / r^1.5 · exp(i·k·r),   r = √(dx² + dy²)
//
// scaled by the per-source spacing so the sum approximates the
// continuous aperture integral. The dy/r factor is the obliquity
// (forward-lobed emission), the remaining 1/√r the cylindrical-wave
// amplitude falloff.
//
// Storing the complex amplitude (not an instantaneous value) is what
// makes animation cheap: the renderer oscillates the stored phasor by
// the clock phase without ever touching this O(cells × sources) loop.

use crate::geometry::{SlitGeometry, BARRIER_Y, CANVAS_WIDTH};

// Cells closer than this to the barrier are left at zero: r → 0 blows
// up the 1/√r amplitude and the renderer substitutes the plane wave
pub const NEAR_FIELD_GUARD_PX: usize = 2;

/// Grid reduction: full resolution or every other pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    High,
    Fast,
}

impl Quality {
    /// Pixels per grid cell along each axis.
    pub fn stride(&self) -> usize {
        match self {
            Quality::High => 1,
            Quality::Fast => 2,
        }
    }
}

/// One grid cell of the precomputed field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldCell {
    pub re: f64,
    pub im: f64,
    pub mag: f64,
}

/// Precomputed complex field over the region above the barrier, at
/// reduced resolution. Replaced wholesale on every recompute.
#[derive(Debug, Clone)]
pub struct ComplexField {
    pub grid_width: usize,
    pub grid_height: usize,
    pub stride: usize,
    pub cells: Vec<FieldCell>,
    /// Global maximum magnitude, the renderer's normalization scale.
    pub max_mag: f64,
}

impl ComplexField {
    /// Cell covering canvas pixel (x, y); nearest by integer division.
    #[inline]
    pub fn cell_at(&self, x_px: usize, y_px: usize) -> &FieldCell {
        let gx = (x_px / self.stride).min(self.grid_width - 1);
        let gy = (y_px / self.stride).min(self.grid_height - 1);
        &self.cells[gy * self.grid_width + gx]
    }
}

/// Sum the wavelets from every source into every grid cell above the
/// barrier. `on_row` reports progress (row index) for the CLI; the wasm
/// path passes a no-op.
pub fn compute_field(
    geometry: &SlitGeometry,
    quality: Quality,
    mut on_row: impl FnMut(usize),
) -> ComplexField {
    let stride = quality.stride();
    let grid_width = (CANVAS_WIDTH + stride - 1) / stride;
    let grid_height = (BARRIER_Y + stride - 1) / stride;

    let k = geometry.wave_number();
    let spacing = geometry.source_spacing_px();
    let sources: Vec<f64> = geometry.source_points().into_iter().flatten().collect();

    let mut cells = vec![FieldCell::default(); grid_width * grid_height];
    let mut max_mag = 0.0f64;

    for gy in 0..grid_height {
        let py = gy * stride;
        let dy = (BARRIER_Y - py) as f64;
        if (BARRIER_Y - py) < NEAR_FIELD_GUARD_PX {
            // Near-field guard: renderer falls back to the plane wave here
            on_row(gy);
            continue;
        }

        for gx in 0..grid_width {
            let px = (gx * stride) as f64;

            let mut re = 0.0;
            let mut im = 0.0;
            for &sx in &sources {
                let dx = px - sx;
                let r = (dx * dx + dy * dy).sqrt();
                // dy/r^1.5 = (dy/r)·(1/√r): obliquity × cylindrical falloff
                let amp = dy / (r * r.sqrt());
                let phase = k * r;
                re += amp * phase.cos();
                im += amp * phase.sin();
            }
            re *= spacing;
            im *= spacing;

            let mag = (re * re + im * im).sqrt();
            if mag > max_mag {
                max_mag = mag;
            }
            cells[gy * grid_width + gx] = FieldCell { re, im, mag };
        }
        on_row(gy);
    }

    ComplexField {
        grid_width,
        grid_height,
        stride,
        cells,
        max_mag,
    }
}

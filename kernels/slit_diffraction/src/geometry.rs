// Barrier geometry and Huygens source discretization
//
// The barrier holds one or two apertures. All lengths arrive from the
// UI in wavelength multiples and are converted to canvas pixels with
// the wavelength scale (px per λ), so changing the wavelength slider
// rescales the whole geometry on screen.

// Logical canvas and barrier placement shared by solver and renderer
pub const CANVAS_WIDTH: usize = 800;
pub const CANVAS_HEIGHT: usize = 384;
pub const BARRIER_Y: usize = 300;
pub const BARRIER_THICKNESS: usize = 4;
pub const PROFILE_BAND_HEIGHT: usize = 55;

// Slider domains from the UI contract
pub const SLIT_WIDTH_RANGE_WL: (f64, f64) = (0.5, 10.0);
pub const SEPARATION_RANGE_WL: (f64, f64) = (0.5, 25.0);
pub const WAVELENGTH_SCALE_RANGE_PX: (f64, f64) = (8.0, 40.0);

// Huygens discretization density: ~12 point sources per wavelength of
// aperture width, never fewer than 10
const SOURCES_PER_WAVELENGTH: f64 = 12.0;
const MIN_SOURCES: usize = 10;

/// Single- or double-slit barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlitMode {
    Single,
    Double,
}

/// One aperture as a pixel-space x interval on the barrier line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aperture {
    pub start_px: f64,
    pub end_px: f64,
}

impl Aperture {
    pub fn width_px(&self) -> f64 {
        self.end_px - self.start_px
    }

    pub fn contains(&self, x_px: f64) -> bool {
        x_px >= self.start_px && x_px < self.end_px
    }
}

/// Barrier description in wavelength units plus the px/λ scale.
///
/// Invariant: separation ≥ width. Enforced by clamping on every update
/// so the component never rejects a slider value: raising the width
/// pushes the separation up with it, lowering the separation stops at
/// the width.
#[derive(Debug, Clone, Copy)]
pub struct SlitGeometry {
    pub mode: SlitMode,
    pub width_wl: f64,
    pub separation_wl: f64,
    pub wavelength_px: f64,
}

impl Default for SlitGeometry {
    fn default() -> Self {
        Self {
            mode: SlitMode::Single,
            width_wl: 2.0,
            separation_wl: 6.0,
            wavelength_px: 16.0,
        }
    }
}

impl SlitGeometry {
    pub fn set_mode(&mut self, mode: SlitMode) {
        self.mode = mode;
    }

    pub fn set_width_wl(&mut self, width: f64) {
        self.width_wl = width.clamp(SLIT_WIDTH_RANGE_WL.0, SLIT_WIDTH_RANGE_WL.1);
        // Keep separation ≥ width
        if self.separation_wl < self.width_wl {
            self.separation_wl = self.width_wl;
        }
    }

    pub fn set_separation_wl(&mut self, separation: f64) {
        let clamped = separation.clamp(SEPARATION_RANGE_WL.0, SEPARATION_RANGE_WL.1);
        self.separation_wl = clamped.max(self.width_wl);
    }

    pub fn set_wavelength_px(&mut self, scale: f64) {
        self.wavelength_px = scale.clamp(WAVELENGTH_SCALE_RANGE_PX.0, WAVELENGTH_SCALE_RANGE_PX.1);
    }

    pub fn width_px(&self) -> f64 {
        self.width_wl * self.wavelength_px
    }

    pub fn separation_px(&self) -> f64 {
        self.separation_wl * self.wavelength_px
    }

    /// Wave number in canvas units: k = 2π / λ_px.
    pub fn wave_number(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.wavelength_px
    }

    /// Aperture intervals on the barrier line, centered on the canvas
    /// midline (Double: aperture centers at midline ± separation/2).
    pub fn apertures(&self) -> Vec<Aperture> {
        let center = CANVAS_WIDTH as f64 / 2.0;
        let half_width = self.width_px() / 2.0;
        match self.mode {
            SlitMode::Single => vec![Aperture {
                start_px: center - half_width,
                end_px: center + half_width,
            }],
            SlitMode::Double => {
                let half_sep = self.separation_px() / 2.0;
                vec![
                    Aperture {
                        start_px: center - half_sep - half_width,
                        end_px: center - half_sep + half_width,
                    },
                    Aperture {
                        start_px: center + half_sep - half_width,
                        end_px: center + half_sep + half_width,
                    },
                ]
            }
        }
    }

    /// Point sources per aperture: N = max(10, round(width_λ · 12)).
    pub fn sources_per_aperture(&self) -> usize {
        let scaled = (self.width_wl * SOURCES_PER_WAVELENGTH).round() as usize;
        scaled.max(MIN_SOURCES)
    }

    /// Per-source spacing in pixels, the dx of the Huygens integral.
    pub fn source_spacing_px(&self) -> f64 {
        self.width_px() / self.sources_per_aperture() as f64
    }

    /// All Huygens source x positions, grouped per aperture. Sources are
    /// placed at interval midpoints so a centered aperture yields a
    /// source set symmetric about the midline.
    pub fn source_points(&self) -> Vec<Vec<f64>> {
        let n = self.sources_per_aperture();
        self.apertures()
            .iter()
            .map(|aperture| {
                let spacing = aperture.width_px() / n as f64;
                (0..n)
                    .map(|i| aperture.start_px + (i as f64 + 0.5) * spacing)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_wavelength_slit_gets_twelve_sources() {
        let mut geometry = SlitGeometry::default();
        geometry.set_width_wl(1.0);
        assert_eq!(geometry.sources_per_aperture(), 12);
    }

    #[test]
    fn narrow_slit_keeps_source_floor() {
        let mut geometry = SlitGeometry::default();
        geometry.set_width_wl(0.5);
        // round(0.5 * 12) = 6, floored to 10
        assert_eq!(geometry.sources_per_aperture(), 10);
    }

    #[test]
    fn separation_clamps_up_to_width() {
        let mut geometry = SlitGeometry::default();
        geometry.set_mode(SlitMode::Double);
        geometry.set_width_wl(4.0);
        geometry.set_separation_wl(2.0);
        assert_eq!(geometry.separation_wl, 4.0, "separation must not undercut width");
    }

    #[test]
    fn widening_past_separation_drags_it_along() {
        let mut geometry = SlitGeometry::default();
        geometry.set_mode(SlitMode::Double);
        geometry.set_separation_wl(3.0);
        geometry.set_width_wl(5.0);
        assert!(geometry.separation_wl >= geometry.width_wl);
    }

    #[test]
    fn single_aperture_is_centered() {
        let mut geometry = SlitGeometry::default();
        geometry.set_width_wl(2.0);
        let apertures = geometry.apertures();
        assert_eq!(apertures.len(), 1);
        let center = (apertures[0].start_px + apertures[0].end_px) / 2.0;
        assert!((center - CANVAS_WIDTH as f64 / 2.0).abs() < 1e-12);
        assert!((apertures[0].width_px() - geometry.width_px()).abs() < 1e-12);
    }

    #[test]
    fn double_apertures_sit_at_half_separation() {
        let mut geometry = SlitGeometry::default();
        geometry.set_mode(SlitMode::Double);
        geometry.set_width_wl(1.0);
        geometry.set_separation_wl(8.0);
        let apertures = geometry.apertures();
        assert_eq!(apertures.len(), 2);
        let midline = CANVAS_WIDTH as f64 / 2.0;
        let c0 = (apertures[0].start_px + apertures[0].end_px) / 2.0;
        let c1 = (apertures[1].start_px + apertures[1].end_px) / 2.0;
        assert!((midline - c0 - geometry.separation_px() / 2.0).abs() < 1e-9);
        assert!((c1 - midline - geometry.separation_px() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn sources_are_symmetric_for_a_centered_slit() {
        let geometry = SlitGeometry::default();
        let sources = geometry.source_points();
        assert_eq!(sources.len(), 1);
        let midline = CANVAS_WIDTH as f64 / 2.0;
        let n = sources[0].len();
        for i in 0..n / 2 {
            let left = midline - sources[0][i];
            let right = sources[0][n - 1 - i] - midline;
            assert!((left - right).abs() < 1e-9);
        }
    }

    #[test]
    fn both_apertures_share_the_source_count() {
        let mut geometry = SlitGeometry::default();
        geometry.set_mode(SlitMode::Double);
        geometry.set_width_wl(3.0);
        geometry.set_separation_wl(10.0);
        let sources = geometry.source_points();
        assert_eq!(sources[0].len(), sources[1].len());
        assert_eq!(sources[0].len(), geometry.sources_per_aperture());
    }
}

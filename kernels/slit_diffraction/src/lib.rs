// Slit Diffraction Kernel
//
// Physics core for the single/double-slit interactive: a plane wave
// hits a barrier, Huygens point sources across each aperture radiate
// cylindrical wavelets, and their coherent sum fills the region above
// the barrier with an interference pattern rendered in real time.
//
// The expensive spatial solve (field.rs) runs only when geometry,
// wavelength scale, or quality changes, coalesced by a debounce; the
// per-frame work is just oscillating the stored phasors by the clock
// phase (render.rs). The component below wires those to the host page:
// it is driven entirely by `tick`/`render_rgba` calls from the page's
// animation callback, owns its buffers exclusively, and replaces them
// wholesale on every recompute.

pub mod field;
pub mod geometry;
pub mod render;
pub mod schedule;

pub use field::{compute_field, ComplexField, FieldCell, Quality, NEAR_FIELD_GUARD_PX};
pub use geometry::{
    Aperture, SlitGeometry, SlitMode, BARRIER_THICKNESS, BARRIER_Y, CANVAS_HEIGHT, CANVAS_WIDTH,
    PROFILE_BAND_HEIGHT,
};
pub use render::{render_frame, screen_intensity_profile, RenderMode};
pub use schedule::{AnimationClock, Debounce, RECOMPUTE_DEBOUNCE_MS};

use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;

// Component lifecycle. Computing covers the window from the first
// qualifying parameter change until the debounced recompute lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnginePhase {
    Idle,
    Computing,
    Ready,
}

impl EnginePhase {
    fn name(&self) -> &'static str {
        match self {
            EnginePhase::Idle => "idle",
            EnginePhase::Computing => "computing",
            EnginePhase::Ready => "ready",
        }
    }
}

/// The slit-diffraction component owned by the page.
#[wasm_bindgen]
pub struct SlitComponent {
    geometry: SlitGeometry,
    quality: Quality,
    mode: RenderMode,
    attached: bool,
    field: Option<ComplexField>,
    debounce: Debounce,
    clock: AnimationClock,
    phase: EnginePhase,
    playing: bool,
    // A parameter changed since the last tick; arms the debounce
    pending_change: bool,
    // A recompute landed while paused; one manual render is still owed
    needs_render: bool,
}

impl Default for SlitComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl SlitComponent {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            geometry: SlitGeometry::default(),
            quality: Quality::Fast,
            mode: RenderMode::Intensity,
            attached: false,
            field: None,
            debounce: Debounce::new(),
            clock: AnimationClock::new(),
            phase: EnginePhase::Idle,
            playing: false,
            pending_change: false,
            needs_render: false,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// The canvas exists now; compute the initial field synchronously so
    /// the first frame is complete.
    pub fn attach(&mut self) {
        self.attached = true;
        self.recompute();
        self.needs_render = true;
    }

    /// Scoped teardown: drop buffers, cancel the pending recompute, stop
    /// animating. Further recompute/render calls are no-ops until the
    /// next attach.
    pub fn detach(&mut self) {
        self.attached = false;
        self.field = None;
        self.debounce.cancel();
        self.playing = false;
        self.pending_change = false;
        self.needs_render = false;
        self.phase = EnginePhase::Idle;
    }

    pub fn canvas_width(&self) -> u32 {
        CANVAS_WIDTH as u32
    }

    pub fn canvas_height(&self) -> u32 {
        CANVAS_HEIGHT as u32
    }

    /// Lifecycle phase for the UI: "idle", "computing", or "ready".
    pub fn state(&self) -> String {
        self.phase.name().to_string()
    }

    // ------------------------------------------------------------------
    // Parameters. Every qualifying change re-arms the debounce on the
    // next tick; nothing recomputes mid-drag.
    // ------------------------------------------------------------------

    /// "single" or "double"; anything else is ignored.
    pub fn set_mode(&mut self, mode: &str) {
        let parsed = match mode {
            "single" => SlitMode::Single,
            "double" => SlitMode::Double,
            _ => return,
        };
        self.geometry.set_mode(parsed);
        self.mark_changed();
    }

    pub fn set_slit_width(&mut self, width_wl: f64) {
        self.geometry.set_width_wl(width_wl);
        self.mark_changed();
    }

    pub fn set_separation(&mut self, separation_wl: f64) {
        self.geometry.set_separation_wl(separation_wl);
        self.mark_changed();
    }

    pub fn set_wavelength_scale(&mut self, px_per_wavelength: f64) {
        self.geometry.set_wavelength_px(px_per_wavelength);
        self.mark_changed();
    }

    /// Quality toggle — the only backpressure mechanism: high quality is
    /// full resolution, fast halves the grid in both axes.
    pub fn set_high_quality(&mut self, high: bool) {
        self.quality = if high { Quality::High } else { Quality::Fast };
        self.mark_changed();
    }

    /// "intensity", "wavefronts", or "wavelets". A mode switch is pure
    /// rendering — no recompute, just a fresh frame.
    pub fn set_render_mode(&mut self, mode: &str) {
        self.mode = match mode {
            "intensity" => RenderMode::Intensity,
            "wavefronts" => RenderMode::Wavefronts,
            "wavelets" => RenderMode::Wavelets,
            _ => return,
        };
        self.needs_render = true;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.clock.set_speed(speed);
    }

    // Clamped echoes so sliders can display what the engine actually
    // uses (separation may have been pulled up to the width)
    pub fn slit_width(&self) -> f64 {
        self.geometry.width_wl
    }

    pub fn separation(&self) -> f64 {
        self.geometry.separation_wl
    }

    // ------------------------------------------------------------------
    // Animation control
    // ------------------------------------------------------------------

    pub fn play(&mut self) {
        self.playing = true;
        // Skip the paused span instead of integrating it all at once
        self.clock.resume();
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    // ------------------------------------------------------------------
    // Frame driving
    // ------------------------------------------------------------------

    /// Called once per display-refresh callback. Advances the debounce,
    /// runs a due recompute, and reports whether the host should render
    /// this frame (always while playing; once after a recompute or mode
    /// switch while paused).
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.attached {
            return false;
        }

        if self.pending_change {
            self.debounce.request(now_ms);
            self.pending_change = false;
            self.phase = EnginePhase::Computing;
        }

        if self.debounce.fire(now_ms) {
            self.recompute();
            self.needs_render = true;
        }

        let should_render = self.playing || self.needs_render;
        self.needs_render = false;
        should_render
    }

    /// Render the current frame. The clock only advances while playing,
    /// so a paused render redraws at the frozen phase. Detached or
    /// not-yet-computed components yield an empty buffer (no-op).
    pub fn render_rgba(&mut self, now_ms: f64) -> Clamped<Vec<u8>> {
        if !self.attached {
            return Clamped(Vec::new());
        }
        let Some(field) = &self.field else {
            return Clamped(Vec::new());
        };

        let phase = if self.playing {
            self.clock.advance(now_ms)
        } else {
            self.clock.phase()
        };

        Clamped(render_frame(&self.geometry, field, self.mode, phase))
    }

    /// The live screen profile as plain numbers, for hosts that chart it
    /// outside the canvas. Empty until the first field is computed.
    pub fn screen_profile(&self) -> Vec<f64> {
        self.field
            .as_ref()
            .map(screen_intensity_profile)
            .unwrap_or_default()
    }
}

impl SlitComponent {
    fn mark_changed(&mut self) {
        if self.attached {
            self.pending_change = true;
        }
    }

    // Synchronous field solve; replaces the buffer wholesale
    fn recompute(&mut self) {
        if !self.attached {
            return;
        }
        self.phase = EnginePhase::Computing;
        self.field = Some(compute_field(&self.geometry, self.quality, |_| {}));
        self.phase = EnginePhase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_component_is_inert() {
        let mut component = SlitComponent::new();
        assert_eq!(component.state(), "idle");
        // No surface: everything is a no-op, nothing panics
        component.set_slit_width(4.0);
        assert!(!component.tick(0.0));
        assert!(component.render_rgba(16.0).0.is_empty());
        assert!(component.screen_profile().is_empty());
    }

    #[test]
    fn attach_computes_and_owes_one_render() {
        let mut component = SlitComponent::new();
        component.attach();
        assert_eq!(component.state(), "ready");
        // Paused, but the initial frame must still be drawn once
        assert!(component.tick(0.0));
        assert!(!component.tick(16.0), "render owed only once");
        assert!(!component.render_rgba(16.0).0.is_empty());
    }

    #[test]
    fn parameter_changes_coalesce_into_one_recompute() {
        let mut component = SlitComponent::new();
        component.attach();
        component.tick(0.0);

        // A slider drag: changes across several frames
        let mut renders = 0;
        for frame in 0..6 {
            component.set_slit_width(2.0 + frame as f64);
            if component.tick(frame as f64 * 16.0) {
                renders += 1;
            }
        }
        assert_eq!(renders, 0, "nothing fires during the drag");
        assert_eq!(component.state(), "computing");

        // Quiet period elapses: exactly one recompute, one owed render
        assert!(component.tick(80.0 + RECOMPUTE_DEBOUNCE_MS));
        assert_eq!(component.state(), "ready");
        assert!(!component.tick(96.0 + RECOMPUTE_DEBOUNCE_MS));
    }

    #[test]
    fn playing_renders_every_tick() {
        let mut component = SlitComponent::new();
        component.attach();
        component.play();
        assert!(component.is_playing());
        for frame in 0..5 {
            assert!(component.tick(frame as f64 * 16.0));
        }
        component.pause();
        component.tick(100.0); // absorbs the attach render if still owed
        assert!(!component.tick(116.0));
    }

    #[test]
    fn mode_switch_redraws_without_recompute() {
        let mut component = SlitComponent::new();
        component.attach();
        component.tick(0.0);
        component.set_render_mode("wavefronts");
        // One render owed immediately; no debounce involved
        assert!(component.tick(1.0));
        assert_eq!(component.state(), "ready");
    }

    #[test]
    fn separation_clamp_is_visible_through_the_echo() {
        let mut component = SlitComponent::new();
        component.set_mode("double");
        component.set_slit_width(6.0);
        component.set_separation(2.0);
        assert_eq!(component.separation(), 6.0);
    }

    #[test]
    fn paused_render_freezes_the_phase() {
        let mut component = SlitComponent::new();
        component.attach();
        component.play();
        component.tick(0.0);
        let first = component.render_rgba(0.0); // phase 0
        let moving = component.render_rgba(400.0); // clock advanced
        assert_ne!(first.0, moving.0, "playing frames differ over time");
        component.pause();
        let frozen_a = component.render_rgba(800.0);
        let frozen_b = component.render_rgba(1200.0);
        assert_eq!(frozen_a.0, frozen_b.0, "paused frames must be identical");
        assert_eq!(moving.0, frozen_a.0, "pause freezes at the last phase");
    }

    #[test]
    fn detach_cancels_the_pending_recompute() {
        let mut component = SlitComponent::new();
        component.attach();
        component.tick(0.0);
        component.set_slit_width(8.0);
        component.tick(16.0); // arms the debounce
        component.detach();
        // Long after the deadline, nothing fires and nothing renders
        assert!(!component.tick(16.0 + 10.0 * RECOMPUTE_DEBOUNCE_MS));
        assert_eq!(component.state(), "idle");
    }
}

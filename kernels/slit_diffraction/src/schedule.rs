// Host-driven timing primitives
//
// The component runs on a single cooperative queue: the page calls
// `tick(now)` from its display-refresh callback and everything here is
// plain bookkeeping over those monotonic timestamps. No timers, no
// threads — cancellation is just clearing state, which is what makes
// teardown safe (a detached component simply stops being ticked).

// Quiet period before a pending recompute fires. Tunable: long enough
// to coalesce a slider drag, short enough to feel immediate.
pub const RECOMPUTE_DEBOUNCE_MS: f64 = 60.0;

// Phase advance per millisecond at speed 1.0 (radians). One full cycle
// every two seconds of wall clock.
const PHASE_RATE_PER_MS: f64 = std::f64::consts::PI / 1000.0;

/// Coalesces bursts of parameter changes into one recompute.
///
/// Every `request` re-arms the deadline; `fire` reports true exactly
/// once, after a full quiet period has elapsed since the last request.
#[derive(Debug, Default)]
pub struct Debounce {
    deadline_ms: Option<f64>,
}

impl Debounce {
    pub fn new() -> Self {
        Self { deadline_ms: None }
    }

    /// Arm (or re-arm) the deadline relative to `now_ms`.
    pub fn request(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + RECOMPUTE_DEBOUNCE_MS);
    }

    /// True once the quiet period has passed; disarms on fire.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Drop any pending request (component teardown).
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }
}

/// Accumulated animation phase from host timestamps.
///
/// Phase is integrated incrementally so a speed change only alters the
/// rate going forward — the wave never jumps. Timestamps are assumed
/// monotonic; a stale timestamp contributes nothing.
#[derive(Debug)]
pub struct AnimationClock {
    phase: f64,
    speed: f64,
    last_ms: Option<f64>,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            speed: 1.0,
            last_ms: None,
        }
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }

    /// Integrate elapsed time into the phase and return it (radians).
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        if let Some(last) = self.last_ms {
            let dt = (now_ms - last).max(0.0);
            self.phase += dt * self.speed * PHASE_RATE_PER_MS;
        }
        self.last_ms = Some(now_ms);
        self.phase
    }

    /// Current phase without advancing (paused renders).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Forget the last timestamp so the next `advance` starts a fresh
    /// interval — used when resuming from pause, otherwise the whole
    /// paused span would be integrated at once.
    pub fn resume(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_fires_once_after_quiet_period() {
        let mut debounce = Debounce::new();
        debounce.request(0.0);
        assert!(!debounce.fire(10.0));
        assert!(!debounce.fire(59.9));
        assert!(debounce.fire(60.0));
        // Disarmed after firing
        assert!(!debounce.fire(120.0));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn repeated_requests_coalesce() {
        let mut debounce = Debounce::new();
        // A slider drag: a request every 16ms keeps pushing the deadline
        for i in 0..10 {
            debounce.request(i as f64 * 16.0);
            assert!(!debounce.fire(i as f64 * 16.0 + 1.0));
        }
        // Last request at t=144, quiet until 204
        assert!(!debounce.fire(200.0));
        assert!(debounce.fire(204.0));
    }

    #[test]
    fn cancel_drops_the_pending_request() {
        let mut debounce = Debounce::new();
        debounce.request(0.0);
        debounce.cancel();
        assert!(!debounce.fire(1000.0));
    }

    #[test]
    fn clock_integrates_speed() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0);
        let at_one_second = clock.advance(1000.0);
        assert!((at_one_second - std::f64::consts::PI).abs() < 1e-12);

        clock.set_speed(2.0);
        let later = clock.advance(1500.0);
        assert!((later - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn speed_change_never_jumps_the_phase() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0);
        clock.advance(500.0);
        let before = clock.phase();
        clock.set_speed(10.0);
        // Phase is unchanged until time actually passes
        assert_eq!(clock.phase(), before);
        let after = clock.advance(500.0);
        assert_eq!(after, before, "zero elapsed time, zero phase change");
    }

    #[test]
    fn resume_skips_the_paused_span() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0);
        clock.advance(100.0);
        let paused_at = clock.phase();
        // Host pauses for 10 seconds, then resumes
        clock.resume();
        let resumed = clock.advance(10_100.0);
        assert_eq!(resumed, paused_at, "paused time must not advance the wave");
    }

    #[test]
    fn stale_timestamp_is_ignored() {
        let mut clock = AnimationClock::new();
        clock.advance(100.0);
        let phase = clock.advance(200.0);
        assert!(clock.advance(150.0) >= phase, "phase must stay monotonic");
    }
}

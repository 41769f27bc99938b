//! Frame pacing for a loop that polls much faster than it needs to draw.

/// Decides when the game loop should redraw.
///
/// A frame is drawn as soon as the snapshot fingerprint changes, but no more
/// often than `min_interval_ms`. An unchanged picture is still redrawn every
/// `idle_interval_ms` so terminal resizes show up.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_interval_ms: u64,
    idle_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_interval_ms: u64, idle_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            idle_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_render_ms);
        let due = !self.has_rendered
            || (fingerprint != self.last_fingerprint && elapsed >= self.min_interval_ms)
            || elapsed >= self.idle_interval_ms;
        if due {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }

    /// Make the next call render regardless of timing.
    pub fn force(&mut self) {
        self.has_rendered = false;
    }
}

impl Default for RenderThrottle {
    /// ~60 fps while things change, 4 fps when idle
    fn default() -> Self {
        Self::new(16, 250)
    }
}

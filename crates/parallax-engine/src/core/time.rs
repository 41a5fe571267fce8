/// Frame clock fed by the host's frame timestamps.
/// Keeps the latest time and a frame counter; time never runs backwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    /// Latest frame timestamp in milliseconds.
    now_ms: f64,
    /// Number of frames seen.
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp. Returns the time used for this frame.
    ///
    /// Timestamps earlier than the last one (or non-finite) are ignored, so
    /// elapsed fractions computed from the clock are monotonic.
    pub fn advance_to(&mut self, timestamp_ms: f64) -> f64 {
        if timestamp_ms.is_finite() && timestamp_ms > self.now_ms {
            self.now_ms = timestamp_ms;
        }
        self.frames += 1;
        self.now_ms
    }

    /// Latest frame time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Frames seen so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

use std::time::Instant;

/// Source of wall-clock time in seconds
pub trait TimeSource {
    /// Seconds since some fixed origin
    fn now(&self) -> f64;
}

/// Monotonic time source backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct InstantSource {
    origin: Instant,
}

impl InstantSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for InstantSource {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Frame clock - tracks delta and elapsed time
/// The first tick after construction or reset yields a zero delta
#[derive(Debug)]
pub struct Clock<T: TimeSource = InstantSource> {
    source: T,
    last_tick: Option<f64>,
    elapsed: f64,
    max_delta: Option<f32>,
}

impl Clock<InstantSource> {
    /// Create new clock on the system monotonic timer
    pub fn new() -> Self {
        Self::with_source(InstantSource::new())
    }
}

impl Default for Clock<InstantSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Clock<T> {
    pub fn with_source(source: T) -> Self {
        Self {
            source,
            last_tick: None,
            elapsed: 0.0,
            max_delta: None,
        }
    }

    /// Cap every delta to `max` seconds, bounding the step after a stall
    pub fn with_max_delta(mut self, max: Option<f32>) -> Self {
        self.max_delta = max;
        self
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds, never negative
    pub fn tick(&mut self) -> f32 {
        let now = self.source.now();
        let raw = match self.last_tick {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        // A backwards step still re-anchors, so the next delta starts from `now`.
        self.last_tick = Some(now);

        let mut delta = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
        if let Some(max) = self.max_delta {
            delta = delta.min(max);
        }
        self.elapsed += delta as f64;
        delta
    }

    /// Total integrated seconds since construction
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Forget the previous tick, the next delta will be zero
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

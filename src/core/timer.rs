/// Self-contained timers - accumulate delta time and decide when to fire

/// Throttled timer - minimum interval between fires
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    /// Create throttled timer with minimum interval
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: min_interval, // Allow immediate first tick
        }
    }

    /// Attempt to fire, returns true if enough time has passed
    pub fn try_tick(&mut self, delta: f32) -> bool {
        self.time_since_last += delta;

        if self.time_since_last >= self.min_interval {
            self.time_since_last = 0.0;
            true
        } else {
            false
        }
    }
}

/// Frame rate meter - averages over a reporting window
#[derive(Debug, Clone, Copy)]
pub struct FpsMeter {
    interval: f32,
    frames: u32,
    accumulated: f32,
    fps: f32,
}

impl FpsMeter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            frames: 0,
            accumulated: 0.0,
            fps: 0.0,
        }
    }

    /// Count a frame; returns the new average when a window completes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.accumulated += delta;

        if self.accumulated >= self.interval {
            self.fps = self.frames as f32 / self.accumulated;
            self.frames = 0;
            self.accumulated = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Last completed average
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

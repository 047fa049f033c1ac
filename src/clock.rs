/// Fixed-rate frame limiter.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    frame_start: Instant,
    frame: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Self::period_for(fps),
            frame_start: Instant::now(),
            frame: 0,
        }
    }

    pub fn period_for(fps: u32) -> Duration {
        Duration::from_secs(1) / fps.max(1)
    }

    #[cfg(test)]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Sleep out whatever is left of the current frame, then start the next.
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.period {
            std::thread::sleep(self.period - elapsed);
        }
        self.frame_start = Instant::now();
        self.frame += 1;
    }
}

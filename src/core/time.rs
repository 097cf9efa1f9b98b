//=========================================================================
// Frame Time
//=========================================================================
//
// Timing values delivered to objects and screens once per tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== FrameTime ===========================================================

/// Elapsed time for the current tick plus the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Monotonic frame counter, starting at 1 for the first tick.
    pub frame: u64,
    pub elapsed: Duration,
    pub total: Duration,
}

impl FrameTime {
    pub fn new(frame: u64, elapsed: Duration, total: Duration) -> Self {
        Self {
            frame,
            elapsed,
            total,
        }
    }

    /// Elapsed milliseconds of this tick as a float.
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed.as_secs_f32() * 1000.0
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_ms_keeps_fractions() {
        let time = FrameTime::new(1, Duration::from_micros(16_500), Duration::ZERO);
        assert!((time.elapsed_ms() - 16.5).abs() < 1e-4);
    }
}

//! Frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps out the rest of each frame budget
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
    paced: bool,
}

impl FramePacer {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            budget: Duration::from_secs_f64(frame_ms.max(0.0) / 1000.0),
            paced: true,
        }
    }

    /// Never sleeps (tests, headless demo runs)
    pub fn unpaced(frame_ms: f64) -> Self {
        Self {
            paced: false,
            ..Self::new(frame_ms)
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn is_paced(&self) -> bool {
        self.paced
    }

    /// Mark the start of a frame
    pub fn begin(&self) -> Instant {
        Instant::now()
    }

    /// Sleep whatever is left of the frame started at `start`
    ///
    /// Returns the time slept.
    pub fn finish(&self, start: Instant) -> Duration {
        if !self.paced {
            return Duration::ZERO;
        }
        let remaining = self.budget.saturating_sub(start.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaced_never_sleeps() {
        let pacer = FramePacer::unpaced(1000.0);
        let start = pacer.begin();
        assert_eq!(pacer.finish(start), Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_paced_fills_budget() {
        let pacer = FramePacer::new(20.0);
        assert!((pacer.budget().as_secs_f64() - 0.020).abs() < 1e-6);
        let start = pacer.begin();
        pacer.finish(start);
        assert!(start.elapsed() >= pacer.budget());
    }

    #[test]
    fn test_overrun_frame_does_not_sleep() {
        let pacer = FramePacer::new(1.0);
        let start = pacer.begin();
        thread::sleep(Duration::from_millis(5));
        assert_eq!(pacer.finish(start), Duration::ZERO);
    }
}

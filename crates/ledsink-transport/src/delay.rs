//! Precise short delays for line timing.
//!
//! DMX512 needs a break of at least 92 us and a mark-after-break of at least
//! 12 us. `std::thread::sleep` is only as precise as the OS scheduler allows
//! (about 1 ms on Windows), so the default is a spin wait. Coarse delays
//! stretch the reset sequence; they never fail it.

use std::time::{Duration, Instant};

/// A capability that blocks the calling thread for at least `duration`.
pub trait PreciseDelay: Send {
    fn delay(&mut self, duration: Duration);
}

/// Busy-waits on a monotonic clock. Accurate to a few microseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinDelay;

impl PreciseDelay for SpinDelay {
    fn delay(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}

/// Yields to the scheduler with `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepDelay;

impl PreciseDelay for SleepDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<D: PreciseDelay + ?Sized> PreciseDelay for Box<D> {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_delay_waits_at_least_duration() {
        let start = Instant::now();
        SpinDelay.delay(Duration::from_micros(176));
        assert!(start.elapsed() >= Duration::from_micros(176));
    }

    #[test]
    fn sleep_delay_waits_at_least_duration() {
        let start = Instant::now();
        SleepDelay.delay(Duration::from_micros(12));
        assert!(start.elapsed() >= Duration::from_micros(12));
    }

    #[test]
    fn zero_delay_returns_immediately() {
        let start = Instant::now();
        SpinDelay.delay(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn boxed_delay_forwards() {
        let mut boxed: Box<dyn PreciseDelay> = Box::new(SpinDelay);
        let start = Instant::now();
        boxed.delay(Duration::from_micros(50));
        assert!(start.elapsed() >= Duration::from_micros(50));
    }
}

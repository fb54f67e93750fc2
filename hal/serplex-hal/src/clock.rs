//! Monotonic microsecond clock
//!
//! Both state machines only ever compare elapsed differences, so the
//! counter is allowed to wrap (u32 microseconds wraps after ~71 minutes).

/// Microsecond timestamp from a wrapping counter
pub type Micros = u32;

/// Monotonic microsecond counter
pub trait Clock {
    /// Current counter value in microseconds
    fn now_us(&self) -> Micros;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> Micros {
        (**self).now_us()
    }
}

/// Microseconds elapsed from `since` to `now`, correct across wrap-around
#[inline]
pub fn elapsed_us(since: Micros, now: Micros) -> Micros {
    now.wrapping_sub(since)
}

/// Clock backed by `embassy_time::Instant`
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl Clock for EmbassyClock {
    fn now_us(&self) -> Micros {
        // Truncation is the wrap
        embassy_time::Instant::now().as_micros() as Micros
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(Micros);

    impl Clock for FixedClock {
        fn now_us(&self) -> Micros {
            self.0
        }
    }

    #[test]
    fn test_elapsed_simple() {
        assert_eq!(elapsed_us(100, 350), 250);
        assert_eq!(elapsed_us(5, 5), 0);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let since = u32::MAX - 9;
        assert_eq!(elapsed_us(since, 10), 20);
    }

    #[test]
    fn test_clock_by_reference() {
        let clock = FixedClock(42);
        fn read<C: Clock>(c: C) -> Micros {
            c.now_us()
        }
        assert_eq!(read(&clock), 42);
    }
}

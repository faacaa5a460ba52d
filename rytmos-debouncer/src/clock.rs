use core::cell::Cell;

use crate::error::ConfigError;

/// Timestamp on a wrapping 32 bit millisecond counter
pub type Instant = fugit::TimerInstantU32<1_000>;
pub type Duration = fugit::MillisDurationU32;

const TICKS_PER_SEC: f32 = 1_000.0;

/// Monotonic millisecond time source. The counter is allowed to wrap around,
/// all differences are taken with [`elapsed`].
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Time passed from `earlier` to `later`, modulo the counter width.
pub fn elapsed(later: Instant, earlier: Instant) -> Duration {
    Duration::from_ticks(later.ticks().wrapping_sub(earlier.ticks()))
}

pub fn as_secs_f32(duration: Duration) -> f32 {
    duration.ticks() as f32 / TICKS_PER_SEC
}

/// Rounds to the nearest millisecond.
pub fn duration_from_secs(secs: f32) -> Result<Duration, ConfigError> {
    if !secs.is_finite() {
        return Err(ConfigError::NonFiniteDuration);
    }

    if secs < 0.0 {
        return Err(ConfigError::NegativeDuration);
    }

    let ticks = libm::roundf(secs * TICKS_PER_SEC);
    if ticks > u32::MAX as f32 {
        return Err(ConfigError::DurationOverflow);
    }

    Ok(Duration::from_ticks(ticks as u32))
}

/// A clock that only moves when told to. Shared by reference between the
/// debouncers it drives.
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: Cell<u32>,
}

impl ManualClock {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(ticks: u32) -> Self {
        Self {
            ticks: Cell::new(ticks),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.ticks.set(self.ticks.get().wrapping_add(by.ticks()));
    }

    pub fn advance_ms(&self, ms: u32) {
        self.advance(Duration::from_ticks(ms));
    }

    pub fn set(&self, at: Instant) {
        self.ticks.set(at.ticks());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.ticks.get())
    }
}

/// Milliseconds since construction, truncated to the wrapping counter.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.origin.elapsed().as_millis() as u32)
    }
}

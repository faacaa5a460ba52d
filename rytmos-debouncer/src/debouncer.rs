use derivative::Derivative;
use log::{debug, trace};

use crate::{
    clock::{self, Clock, Duration, Instant},
    error::ConfigError,
};

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncerSettings {
    /// How long a raw value has to hold before it is accepted
    #[derivative(Default(value = "Duration::millis(10)"))]
    pub interval: Duration,
}

impl DebouncerSettings {
    pub fn from_secs(interval_secs: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            interval: clock::duration_from_secs(interval_secs)?,
        })
    }
}

/// Debounces a sampler: anything callable without arguments that returns the raw
/// boolean reading, typically a closure around an input pin.
///
/// Any raw change restarts the bounce timer. Once the raw value has held for at least
/// the interval and differs from the debounced value, the debounced value flips.
/// At most one flip happens per [`update`](Debouncer::update).
pub struct Debouncer<S, C> {
    sampler: S,
    clock: C,
    settings: DebouncerSettings,
    debounced: bool,
    unstable: bool,
    changed: bool,
    last_bounce: Instant,
    state_changed: Instant,
    last_duration: Duration,
}

impl<S, C> Debouncer<S, C>
where
    S: FnMut() -> bool,
    C: Clock,
{
    /// Samples once to seed the debounced value.
    pub fn new(mut sampler: S, clock: C, settings: DebouncerSettings) -> Self {
        let initial = sampler();

        Self {
            sampler,
            clock,
            settings,
            debounced: initial,
            unstable: initial,
            changed: false,
            last_bounce: Instant::from_ticks(0),
            state_changed: Instant::from_ticks(0),
            last_duration: Duration::from_ticks(0),
        }
    }

    pub fn with_interval_secs(
        sampler: S,
        clock: C,
        interval_secs: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(sampler, clock, DebouncerSettings::from_secs(interval_secs)?))
    }

    /// Reads the sampler and advances the state machine. Must be called frequently.
    pub fn update(&mut self) {
        let raw = (self.sampler)();
        self.step(raw);
    }

    /// Like [`update`](Debouncer::update), but uses `raw` instead of calling the sampler.
    pub fn update_with(&mut self, raw: bool) {
        self.step(raw);
    }

    fn step(&mut self, raw: bool) {
        let now = self.clock.now();
        self.changed = false;

        if raw != self.unstable {
            trace!("Raw input bounced to {}", raw);
            self.last_bounce = now;
            self.unstable = raw;
            return;
        }

        if raw != self.debounced
            && clock::elapsed(now, self.last_bounce) >= self.settings.interval
        {
            self.last_bounce = now;
            self.debounced = raw;
            self.changed = true;
            self.last_duration = clock::elapsed(now, self.state_changed);
            self.state_changed = now;

            debug!(
                "Debounced to {} after {} ms stable",
                raw,
                self.last_duration.ticks()
            );
        }
    }

    pub fn value(&self) -> bool {
        self.debounced
    }

    /// Went from low to high in the most recent update
    pub fn rose(&self) -> bool {
        self.debounced && self.changed
    }

    /// Went from high to low in the most recent update
    pub fn fell(&self) -> bool {
        !self.debounced && self.changed
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// How long the value was stable before the most recent transition.
    pub fn last_duration(&self) -> Duration {
        self.last_duration
    }

    /// Time since the most recent transition, read from the clock on every call.
    pub fn current_duration(&self) -> Duration {
        clock::elapsed(self.clock.now(), self.state_changed)
    }

    pub fn interval(&self) -> Duration {
        self.settings.interval
    }

    /// Takes effect on the next update, measured against the bounce timer that is
    /// already running. Raising it mid-bounce delays a pending transition.
    pub fn set_interval(&mut self, interval: Duration) {
        debug!(
            "Debounce interval {} ms -> {} ms",
            self.settings.interval.ticks(),
            interval.ticks()
        );
        self.settings.interval = interval;
    }

    pub fn interval_secs(&self) -> f32 {
        clock::as_secs_f32(self.settings.interval)
    }

    pub fn set_interval_secs(&mut self, interval_secs: f32) -> Result<(), ConfigError> {
        let interval = clock::duration_from_secs(interval_secs)?;
        self.set_interval(interval);
        Ok(())
    }

    pub fn settings(&self) -> DebouncerSettings {
        self.settings
    }

    /// Swaps the sampler, returning the previous one. The debounced state is kept,
    /// the new sampler is first read on the next update.
    pub fn set_sampler(&mut self, sampler: S) -> S {
        core::mem::replace(&mut self.sampler, sampler)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

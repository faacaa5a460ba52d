use derivative::Derivative;
use log::debug;

use crate::{
    clock::{self, Clock, Duration, Instant},
    debouncer::{Debouncer, DebouncerSettings},
};

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSettings {
    /// Idle time in the released state after which a burst of clicks is reported
    #[derivative(Default(value = "Duration::millis(200)"))]
    pub short_window: Duration,
    /// Hold time after which a press counts as a long press
    #[derivative(Default(value = "Duration::millis(500)"))]
    pub long_window: Duration,
    /// Sampled value while the button is held down. `false` for pull-up wiring.
    pub value_when_pressed: bool,
    pub debouncer: DebouncerSettings,
}

impl ButtonSettings {
    pub fn with_windows_ms(short_ms: u32, long_ms: u32) -> Self {
        Self {
            short_window: Duration::from_ticks(short_ms),
            long_window: Duration::from_ticks(long_ms),
            ..Default::default()
        }
    }
}

/// A debounced push button that counts short clicks (double click, triple click, ...)
/// and detects long presses.
///
/// Clicks accumulate until the button has rested released for longer than the short
/// window, then the whole burst is reported at once. A hold longer than the long window
/// is reported as a long press, together with any clicks that came before it in the
/// same burst. The press that turned into the long press is not counted as a click.
///
/// [`short_count`](Button::short_count) and [`long_press`](Button::long_press) only hold
/// for the update in which they were recognised.
pub struct Button<S, C> {
    debouncer: Debouncer<S, C>,
    settings: ButtonSettings,
    last_change: Instant,
    short_presses: u32,
    short_to_report: u32,
    long_active: bool,
    long_to_report: bool,
}

impl<S, C> Button<S, C>
where
    S: FnMut() -> bool,
    C: Clock,
{
    pub fn new(sampler: S, clock: C, settings: ButtonSettings) -> Self {
        let debouncer = Debouncer::new(sampler, clock, settings.debouncer);
        let last_change = debouncer.clock().now();

        Self {
            debouncer,
            settings,
            last_change,
            short_presses: 0,
            short_to_report: 0,
            long_active: false,
            long_to_report: false,
        }
    }

    pub fn update(&mut self) {
        self.debouncer.update();
        self.classify();
    }

    pub fn update_with(&mut self, raw: bool) {
        self.debouncer.update_with(raw);
        self.classify();
    }

    fn classify(&mut self) {
        let now = self.debouncer.clock().now();

        if self.pressed() {
            self.last_change = now;
            self.short_presses = self.short_presses.saturating_add(1);
            debug!("Pressed, {} in burst", self.short_presses);
            return;
        }

        if self.released() {
            self.last_change = now;
            self.long_active = false;
            debug!("Released");
            return;
        }

        let dwell = clock::elapsed(now, self.last_change);

        if !self.long_active && self.is_pressed() && dwell > self.settings.long_window {
            self.long_active = true;
            self.long_to_report = true;
            // The press being held is the long press, not a click.
            self.short_to_report = self.short_presses.saturating_sub(1);
            self.short_presses = 0;
            debug!("Long press after {} clicks", self.short_to_report);
        } else if self.short_presses > 0
            && !self.is_pressed()
            && dwell > self.settings.short_window
        {
            self.short_to_report = self.short_presses;
            self.short_presses = 0;
            debug!("Click burst settled: {}", self.short_to_report);
        } else {
            self.long_to_report = false;
            self.short_to_report = 0;
        }
    }

    /// Became pressed in the most recent update
    pub fn pressed(&self) -> bool {
        if self.settings.value_when_pressed {
            self.debouncer.rose()
        } else {
            self.debouncer.fell()
        }
    }

    /// Became released in the most recent update
    pub fn released(&self) -> bool {
        if self.settings.value_when_pressed {
            self.debouncer.fell()
        } else {
            self.debouncer.rose()
        }
    }

    /// The debounced button is currently held down.
    pub fn is_pressed(&self) -> bool {
        self.debouncer.value() == self.settings.value_when_pressed
    }

    /// Number of short clicks if a burst ended in the most recent update, otherwise 0.
    pub fn short_count(&self) -> u32 {
        self.short_to_report
    }

    /// Whether a long press was recognised in the most recent update.
    pub fn long_press(&self) -> bool {
        self.long_to_report
    }

    pub fn value(&self) -> bool {
        self.debouncer.value()
    }

    pub fn current_duration(&self) -> Duration {
        self.debouncer.current_duration()
    }

    pub fn last_duration(&self) -> Duration {
        self.debouncer.last_duration()
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.settings.debouncer.interval = interval;
        self.debouncer.set_interval(interval);
    }

    pub fn settings(&self) -> ButtonSettings {
        self.settings
    }

    pub fn debouncer(&self) -> &Debouncer<S, C> {
        &self.debouncer
    }
}

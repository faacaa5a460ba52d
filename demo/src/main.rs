use std::cell::Cell;

use env_logger::{Builder, Env};
use log::{info, LevelFilter};
use rytmos_debouncer::{Button, ButtonSettings, Clock, ManualClock};

/// A stretch of the raw input: the level it settles on, how long it is held and how
/// many milliseconds the contacts chatter before settling.
struct Segment {
    level: bool,
    hold_ms: u32,
    chatter_ms: u32,
}

const fn segment(level: bool, hold_ms: u32, chatter_ms: u32) -> Segment {
    Segment {
        level,
        hold_ms,
        chatter_ms,
    }
}

// Pull-up wiring: the pin reads low while the button is held
const DOWN: bool = false;
const UP: bool = true;

#[rustfmt::skip]
const SCRIPT: [Segment; 12] = [
    // single click
    segment(DOWN, 60, 4),  segment(UP, 400, 3),
    // double click
    segment(DOWN, 50, 5),  segment(UP, 80, 2),
    segment(DOWN, 50, 3),  segment(UP, 400, 4),
    // click then hold
    segment(DOWN, 40, 2),  segment(UP, 90, 3),
    segment(DOWN, 900, 6), segment(UP, 400, 5),
    // long press on its own
    segment(DOWN, 700, 3), segment(UP, 300, 2),
];

fn main() {
    Builder::from_env(Env::default().default_filter_or(LevelFilter::Info.to_string())).init();

    let clock = ManualClock::new();
    let pin = Cell::new(UP);
    let mut button = Button::new(|| pin.get(), &clock, ButtonSettings::default());

    for step in SCRIPT.iter() {
        for ms in 0..step.hold_ms {
            let level = if ms < step.chatter_ms {
                // Alternate around the target level while the contacts settle
                (ms % 2 == 0) == step.level
            } else {
                step.level
            };
            pin.set(level);

            clock.advance_ms(1);
            button.update();

            if button.long_press() {
                info!("{} ms: long", clock.now().ticks());
            }

            let count = button.short_count();
            if count != 0 {
                info!("{} ms: count={}", clock.now().ticks(), count);
            }
        }
    }
}

use std::sync::Once;

use rytmos_debouncer::{Button, ButtonSettings, DebouncerSettings, Duration, ManualClock};

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

// Active low, like a button to ground with a pull-up
const DOWN: bool = false;
const UP: bool = true;

/// Holds `raw` for `ms` milliseconds, polling every millisecond. Returns every update
/// that reported something as (short_count, long_press).
fn hold<S>(
    button: &mut Button<S, &ManualClock>,
    clock: &ManualClock,
    raw: bool,
    ms: u32,
) -> Vec<(u32, bool)>
where
    S: FnMut() -> bool,
{
    let mut reports = Vec::new();

    for _ in 0..ms {
        clock.advance_ms(1);
        button.update_with(raw);

        if button.short_count() != 0 || button.long_press() {
            reports.push((button.short_count(), button.long_press()));
        }
    }

    reports
}

fn click<S>(button: &mut Button<S, &ManualClock>, clock: &ManualClock) -> Vec<(u32, bool)>
where
    S: FnMut() -> bool,
{
    let mut reports = hold(button, clock, DOWN, 40);
    reports.extend(hold(button, clock, UP, 40));
    reports
}

#[test]
fn test_double_click() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| UP, &clock, ButtonSettings::default());

    // Two full clicks inside the 200 ms short window
    assert!(click(&mut button, &clock).is_empty());
    assert!(click(&mut button, &clock).is_empty());

    assert_eq!(hold(&mut button, &clock, UP, 250), vec![(2, false)]);
    assert_eq!(button.short_count(), 0);
}

#[test]
fn test_click_counts() {
    init_logger();

    for clicks in 1..=5 {
        let clock = ManualClock::new();
        let mut button = Button::new(|| UP, &clock, ButtonSettings::default());

        for _ in 0..clicks {
            assert!(click(&mut button, &clock).is_empty());
        }

        assert_eq!(hold(&mut button, &clock, UP, 300), vec![(clicks, false)]);
    }
}

#[test]
fn test_separate_bursts() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| UP, &clock, ButtonSettings::default());

    click(&mut button, &clock);
    assert_eq!(hold(&mut button, &clock, UP, 250), vec![(1, false)]);

    click(&mut button, &clock);
    click(&mut button, &clock);
    click(&mut button, &clock);
    assert_eq!(hold(&mut button, &clock, UP, 250), vec![(3, false)]);
}

#[test]
fn test_long_press() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| UP, &clock, ButtonSettings::default());

    // The held press is not counted as a click
    assert_eq!(hold(&mut button, &clock, DOWN, 600), vec![(0, true)]);
    assert!(hold(&mut button, &clock, DOWN, 1000).is_empty());
    assert!(hold(&mut button, &clock, UP, 300).is_empty());
}

#[test]
fn test_long_press_after_clicks() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| UP, &clock, ButtonSettings::default());

    click(&mut button, &clock);
    click(&mut button, &clock);

    // Both clicks come out in the same update as the long press
    assert_eq!(hold(&mut button, &clock, DOWN, 600), vec![(2, true)]);
    assert!(hold(&mut button, &clock, UP, 300).is_empty());
}

#[test]
fn test_long_press_timing() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| UP, &clock, ButtonSettings::default());

    // Bounce starts at 1 ms, the press is accepted at 11 ms
    assert!(hold(&mut button, &clock, DOWN, 511).is_empty());
    assert!(!button.long_press());

    clock.advance_ms(1);
    button.update_with(DOWN);
    assert!(button.long_press());

    clock.advance_ms(1);
    button.update_with(DOWN);
    assert!(!button.long_press());
}

#[test]
fn test_pressed_and_released_edges() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| UP, &clock, ButtonSettings::default());
    assert!(!button.is_pressed());

    let mut presses = 0;
    let mut releases = 0;
    for (raw, ms) in [(DOWN, 30), (UP, 30)] {
        for _ in 0..ms {
            clock.advance_ms(1);
            button.update_with(raw);
            presses += button.pressed() as u32;
            releases += button.released() as u32;
            assert!(!(button.pressed() && button.released()));
        }
        assert_eq!(button.is_pressed(), raw == DOWN);
    }

    assert_eq!(presses, 1);
    assert_eq!(releases, 1);
}

#[test]
fn test_bouncy_click() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| UP, &clock, ButtonSettings::default());

    // Contacts chatter for a few ms on both edges
    for raw in [DOWN, UP, DOWN, UP, DOWN] {
        hold(&mut button, &clock, raw, 2);
    }
    hold(&mut button, &clock, DOWN, 60);
    for raw in [UP, DOWN, UP, DOWN, UP] {
        hold(&mut button, &clock, raw, 2);
    }

    assert_eq!(hold(&mut button, &clock, UP, 250), vec![(1, false)]);
}

#[test]
fn test_active_high() {
    init_logger();

    let clock = ManualClock::new();
    let settings = ButtonSettings {
        value_when_pressed: true,
        ..Default::default()
    };
    let mut button = Button::new(|| false, &clock, settings);

    hold(&mut button, &clock, true, 40);
    assert!(button.is_pressed());
    hold(&mut button, &clock, false, 40);
    assert!(!button.is_pressed());

    assert_eq!(hold(&mut button, &clock, false, 250), vec![(1, false)]);
    assert_eq!(hold(&mut button, &clock, true, 600), vec![(0, true)]);
}

#[test]
fn test_held_since_start() {
    init_logger();

    let clock = ManualClock::new();
    let mut button = Button::new(|| DOWN, &clock, ButtonSettings::default());
    assert!(button.is_pressed());

    // No press edge was ever seen, so there is no click to discount
    assert_eq!(hold(&mut button, &clock, DOWN, 600), vec![(0, true)]);
}

#[test]
fn test_custom_windows() {
    init_logger();

    let clock = ManualClock::new();
    let settings = ButtonSettings {
        debouncer: DebouncerSettings {
            interval: Duration::from_ticks(5),
        },
        ..ButtonSettings::with_windows_ms(100, 300)
    };
    let mut button = Button::new(|| UP, &clock, settings);

    click(&mut button, &clock);
    assert_eq!(hold(&mut button, &clock, UP, 70), vec![(1, false)]);

    assert_eq!(hold(&mut button, &clock, DOWN, 320), vec![(0, true)]);
}

#[test]
fn test_sampler_driven() {
    init_logger();

    let clock = ManualClock::new();
    let level = std::cell::Cell::new(UP);
    let mut button = Button::new(|| level.get(), &clock, ButtonSettings::default());

    let mut counts = Vec::new();
    for t in 0..600u32 {
        // Two 40 ms presses, 40 ms apart
        level.set(!matches!(t, 0..=39 | 80..=119));
        clock.advance_ms(1);
        button.update();

        if button.short_count() != 0 {
            counts.push(button.short_count());
        }
    }

    assert_eq!(counts, vec![2]);
}

#[test]
fn test_defaults() {
    let settings = ButtonSettings::default();

    assert_eq!(settings.short_window, Duration::from_ticks(200));
    assert_eq!(settings.long_window, Duration::from_ticks(500));
    assert!(!settings.value_when_pressed);
    assert_eq!(settings.debouncer.interval, Duration::from_ticks(10));
}

//! Integration tests: FeederService → scheduler / feeder / menu → hardware.

use std::sync::Arc;

use petfeeder::app::events::AppEvent;
use petfeeder::app::service::FeederService;
use petfeeder::config::FeederConfig;
use petfeeder::events::{Button, InputShared};
use petfeeder::feeder::FeedTrigger;
use petfeeder::scheduler::AlarmSlotId;
use petfeeder::time_of_day::TimeOfDay;
use petfeeder::ui::PAW_GLYPHS;

use crate::mock_hw::{HwCall, MockHardware, RecordingSink};

fn t(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

/// Build and start a service on mock hardware.
fn boot(config: FeederConfig, clock: TimeOfDay) -> (FeederService, MockHardware, RecordingSink) {
    let input = Arc::new(InputShared::new());
    let mut svc = FeederService::new(config, input.clone());
    let mut hw = MockHardware::new(input, clock);
    let mut sink = RecordingSink::new();
    svc.start(&mut hw, &mut sink);
    (svc, hw, sink)
}

fn first_alarm_enabled() -> FeederConfig {
    FeederConfig {
        alarms_enabled: [true, false],
        ..FeederConfig::default()
    }
}

#[test]
fn boot_loads_glyphs_and_mirrors_alarm_flags() {
    let (_svc, hw, sink) = boot(first_alarm_enabled(), t(9, 0));
    assert_eq!(hw.leds(), [Some(true), Some(false)]);
    for (slot, bitmap) in PAW_GLYPHS.iter().enumerate() {
        assert_eq!(hw.lcd.glyph(slot as u8), Some(bitmap));
    }
    assert!(matches!(
        sink.events[0],
        AppEvent::Started(ref s) if s.alarms_enabled == [true, false]
    ));
}

#[test]
fn disabled_default_alarms_never_feed() {
    let (mut svc, mut hw, mut sink) = boot(FeederConfig::default(), t(10, 30));
    for _ in 0..120 {
        svc.run_pass(&mut hw, &mut sink);
    }
    assert_eq!(hw.activations(), 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Fed { .. })), 0);
}

#[test]
fn enabled_alarm_feeds_once_through_its_minute() {
    let (mut svc, mut hw, mut sink) = boot(first_alarm_enabled(), t(10, 30));
    for _ in 0..55 {
        svc.run_pass(&mut hw, &mut sink);
    }
    assert_eq!(hw.activations(), 1);
    assert_eq!(
        hw.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Activate { .. } | HwCall::Deactivate { .. }))
            .cloned()
            .collect::<Vec<_>>(),
        vec![
            HwCall::Activate { at_ms: 0 },
            HwCall::Deactivate { at_ms: 5_000 }
        ]
    );
    assert!(sink.contains(&AppEvent::Fed {
        trigger: FeedTrigger::Alarm(AlarmSlotId::First)
    }));
}

#[test]
fn menu_feed_runs_the_actuator() {
    let (mut svc, mut hw, mut sink) = boot(FeederConfig::default(), t(12, 0));
    hw.press(Button::Center);
    hw.press_at(100, Button::Center);
    svc.run_pass(&mut hw, &mut sink);

    assert_eq!(hw.activations(), 1);
    assert!(hw.calls.contains(&HwCall::Activate { at_ms: 100 }));
    assert!(hw.calls.contains(&HwCall::Deactivate { at_ms: 5_100 }));
    assert!(sink.contains(&AppEvent::Fed {
        trigger: FeedTrigger::Manual
    }));
    assert!(sink.contains(&AppEvent::MenuOpened));
    assert!(sink.contains(&AppEvent::MenuClosed));
    assert!(!svc.menu().is_active());
    assert_eq!(hw.lcd.row_text(0).trim(), "", "panel cleared after the menu");
}

#[test]
fn manual_feed_right_after_alarm_feed_is_suppressed() {
    let (mut svc, mut hw, mut sink) = boot(first_alarm_enabled(), t(10, 30));
    svc.run_pass(&mut hw, &mut sink);
    assert_eq!(hw.activations(), 1);
    assert_eq!(hw.now_ms, 6_000);

    hw.press(Button::Center);
    hw.press_at(6_100, Button::Center);
    svc.run_pass(&mut hw, &mut sink);

    assert_eq!(hw.activations(), 1);
    assert!(sink.contains(&AppEvent::FeedSuppressed {
        trigger: FeedTrigger::Manual,
        remaining_ms: 59_900
    }));
    assert!(sink.contains(&AppEvent::FeedSuppressed {
        trigger: FeedTrigger::Alarm(AlarmSlotId::First),
        remaining_ms: 60_000
    }));
}

#[test]
fn clock_edit_writes_hour_and_minute() {
    let (mut svc, mut hw, mut sink) = boot(FeederConfig::default(), t(8, 45));
    hw.press(Button::Center);
    hw.press_sequence(
        50,
        &[
            Button::Right,  // Adjust clock
            Button::Center, // Hour: 08
            Button::Right,
            Button::Right,  // Hour: 10
            Button::Center, // Min.: 45
            Button::Left,   // Min.: 44
            Button::Center,
        ],
    );
    svc.run_pass(&mut hw, &mut sink);

    assert!(hw.script_done());
    assert_eq!(hw.clock, t(10, 44));
    assert!(hw.calls.contains(&HwCall::ClockWrite(t(10, 44))));
    assert!(sink.contains(&AppEvent::ClockSet(t(10, 44))));
    assert!(!svc.menu().is_active());
}

#[test]
fn side_buttons_toggle_slots_and_leds() {
    let (mut svc, mut hw, mut sink) = boot(FeederConfig::default(), t(9, 0));
    hw.press(Button::Right);
    svc.run_pass(&mut hw, &mut sink);
    assert!(svc.scheduler().slot(AlarmSlotId::Second).enabled);
    assert_eq!(hw.leds(), [Some(false), Some(true)]);

    hw.press(Button::Right);
    hw.press(Button::Left);
    svc.run_pass(&mut hw, &mut sink);
    assert_eq!(hw.leds(), [Some(true), Some(false)]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::AlarmToggled { .. })),
        3
    );
}

#[test]
fn press_during_feed_hold_is_handled_after_the_feed() {
    let (mut svc, mut hw, mut sink) = boot(first_alarm_enabled(), t(10, 30));
    hw.press_at(2_000, Button::Right);
    let open_menu = svc.idle_pass(&mut hw, &mut sink);

    assert!(!open_menu);
    assert_eq!(hw.activations(), 1);
    assert!(svc.scheduler().slot(AlarmSlotId::Second).enabled);
    let feed_done = hw
        .calls
        .iter()
        .position(|c| matches!(c, HwCall::Deactivate { .. }))
        .unwrap();
    let toggled = hw
        .calls
        .iter()
        .rposition(|c| {
            *c == HwCall::Indicator {
                slot: AlarmSlotId::Second,
                on: true,
            }
        })
        .unwrap();
    assert!(toggled > feed_done);
}

#[test]
fn idle_screen_is_redrawn_after_the_menu_closes() {
    let (mut svc, mut hw, mut sink) = boot(FeederConfig::default(), t(18, 7));
    hw.press(Button::Center);
    hw.press_at(40, Button::Left);
    svc.run_pass(&mut hw, &mut sink);
    assert_eq!(hw.lcd.row_text(1).trim(), "");

    svc.run_pass(&mut hw, &mut sink);
    assert!(hw.lcd.row_text(0).contains("18:07"));
    assert!(hw.lcd.row_text(1).contains("10:30"));
    assert!(hw.lcd.row_text(1).contains("20:30"));
}

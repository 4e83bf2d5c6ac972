//! Integration tests: menu navigation and edit flows, both through the
//! full service and against the bare controller.

use std::sync::Arc;

use petfeeder::adapters::log_display::LogDisplay;
use petfeeder::app::events::AppEvent;
use petfeeder::app::ports::MenuHost;
use petfeeder::app::service::FeederService;
use petfeeder::config::FeederConfig;
use petfeeder::events::{Button, InputShared};
use petfeeder::menu::{EditField, EditTarget, MenuController, MenuScreen, MenuState};
use petfeeder::scheduler::AlarmSlotId;
use petfeeder::time_of_day::TimeOfDay;

use crate::mock_hw::{MockHardware, RecordingSink};

fn t(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

// ── Bare controller host ──────────────────────────────────────

/// Host that records the state after every event.
struct PanelHost {
    lcd: LogDisplay,
    clock: TimeOfDay,
    alarms: [TimeOfDay; 2],
    feeds: u32,
    commits: Vec<(EditTarget, TimeOfDay)>,
}

impl PanelHost {
    fn new(clock: TimeOfDay) -> Self {
        Self {
            lcd: LogDisplay::new(),
            clock,
            alarms: [t(10, 30), t(20, 30)],
            feeds: 0,
            commits: Vec::new(),
        }
    }
}

impl MenuHost for PanelHost {
    type Display = LogDisplay;

    fn display(&mut self) -> &mut LogDisplay {
        &mut self.lcd
    }

    fn feed_now(&mut self) {
        self.feeds += 1;
    }

    fn clock_time(&mut self) -> TimeOfDay {
        self.clock
    }

    fn alarm_time(&self, slot: AlarmSlotId) -> TimeOfDay {
        self.alarms[slot.index()]
    }

    fn commit_edit(&mut self, target: EditTarget, time: TimeOfDay) {
        self.commits.push((target, time));
    }
}

fn trace(menu: &mut MenuController, host: &mut PanelHost, events: &[Button]) -> Vec<MenuState> {
    events.iter().map(|e| menu.handle(*e, host)).collect()
}

#[test]
fn center_then_four_rights_returns_to_idle_without_editing() {
    let mut host = PanelHost::new(t(12, 0));
    let mut menu = MenuController::new(&FeederConfig::default());
    let states = trace(
        &mut menu,
        &mut host,
        &[
            Button::Center,
            Button::Right,
            Button::Right,
            Button::Right,
            Button::Right,
        ],
    );
    assert_eq!(
        states,
        vec![
            MenuState::Menu(MenuScreen::Feed),
            MenuState::Menu(MenuScreen::AdjustClock),
            MenuState::Menu(MenuScreen::AdjustFirstFeed),
            MenuState::Menu(MenuScreen::AdjustSecondFeed),
            MenuState::Idle,
        ]
    );
    assert!(host.commits.is_empty());
    assert_eq!(host.feeds, 0);
}

#[test]
fn hour_field_wraps_between_24_and_0() {
    let mut host = PanelHost::new(t(0, 10));
    let mut menu = MenuController::new(&FeederConfig::default());
    trace(&mut menu, &mut host, &[Button::Center, Button::Right, Button::Center]);

    menu.handle(Button::Left, &mut host);
    assert!(matches!(
        menu.state(),
        MenuState::Editing(s) if s.field == EditField::Hour && s.hour == 24
    ));
    assert_eq!(host.lcd.row_text(0).trim_end(), "Hour: 24");

    menu.handle(Button::Right, &mut host);
    assert!(matches!(menu.state(), MenuState::Editing(s) if s.hour == 0));
    assert_eq!(host.lcd.row_text(0).trim_end(), "Hour: 00");
}

#[test]
fn minute_field_wraps_within_sixty() {
    let mut host = PanelHost::new(t(5, 59));
    let mut menu = MenuController::new(&FeederConfig::default());
    trace(
        &mut menu,
        &mut host,
        &[Button::Center, Button::Right, Button::Center, Button::Center],
    );
    menu.handle(Button::Right, &mut host);
    assert_eq!(host.lcd.row_text(0).trim_end(), "Min.: 00");
    menu.handle(Button::Left, &mut host);
    assert_eq!(host.lcd.row_text(0).trim_end(), "Min.: 59");
}

#[test]
fn hour_limit_of_23_skips_the_extra_position() {
    let config = FeederConfig {
        hour_edit_max: 23,
        ..FeederConfig::default()
    };
    let mut host = PanelHost::new(t(23, 0));
    let mut menu = MenuController::new(&config);
    trace(
        &mut menu,
        &mut host,
        &[Button::Center, Button::Right, Button::Center, Button::Right],
    );
    assert_eq!(host.lcd.row_text(0).trim_end(), "Hour: 00");
}

// ── Through the service ───────────────────────────────────────

fn boot(clock: TimeOfDay) -> (FeederService, MockHardware, RecordingSink) {
    let input = Arc::new(InputShared::new());
    let mut svc = FeederService::new(FeederConfig::default(), input.clone());
    let mut hw = MockHardware::new(input, clock);
    let mut sink = RecordingSink::new();
    svc.start(&mut hw, &mut sink);
    (svc, hw, sink)
}

#[test]
fn first_alarm_set_to_0715_through_the_panel_then_fires() {
    let (mut svc, mut hw, mut sink) = boot(t(6, 0));

    let mut buttons = vec![Button::Right, Button::Right, Button::Center];
    buttons.extend([Button::Left; 3]); // 10 → 7
    buttons.push(Button::Center);
    buttons.extend([Button::Left; 15]); // 30 → 15
    buttons.push(Button::Center);

    hw.press(Button::Center);
    hw.press_sequence(50, &buttons);
    svc.run_pass(&mut hw, &mut sink);

    assert!(hw.script_done());
    assert!(sink.contains(&AppEvent::AlarmSet {
        slot: AlarmSlotId::First,
        time: t(7, 15)
    }));
    assert!(!svc.scheduler().is_feed_time(t(7, 15)), "still disabled");

    hw.press(Button::Left);
    svc.run_pass(&mut hw, &mut sink);
    assert!(svc.scheduler().is_feed_time(t(7, 15)));
    assert_eq!(hw.activations(), 0);

    hw.clock = t(7, 15);
    svc.run_pass(&mut hw, &mut sink);
    assert_eq!(hw.activations(), 1);
}

#[test]
fn simultaneous_presses_resolve_to_one_event() {
    let (mut svc, mut hw, mut sink) = boot(t(12, 0));
    hw.press(Button::Center);
    // Left and Center land in the same poll; Left wins and leaves the menu.
    hw.press_at(100, Button::Center);
    hw.press_at(100, Button::Left);
    svc.run_pass(&mut hw, &mut sink);

    assert_eq!(hw.activations(), 0);
    assert!(!svc.menu().is_active());
    assert_eq!(sink.count(|e| *e == AppEvent::MenuClosed), 1);
}

#[test]
fn leaving_the_menu_without_action_changes_nothing() {
    let (mut svc, mut hw, mut sink) = boot(t(12, 0));
    hw.press(Button::Center);
    hw.press_sequence(30, &[Button::Right; 4]);
    svc.run_pass(&mut hw, &mut sink);

    assert_eq!(hw.activations(), 0);
    assert_eq!(hw.clock, t(12, 0));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ClockSet(_) | AppEvent::AlarmSet { .. })),
        0
    );
    assert!(!svc.menu().is_active());
}

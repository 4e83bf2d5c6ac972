//! Fuzz target: `MenuController::handle` over arbitrary button streams
//!
//! The first two bytes pick the starting clock; every following byte is
//! one decoded button event (`byte % 3`).
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Edited hours never exceed `hour_edit_max`, minutes never exceed 59
//! - Every committed time is a valid time of day
//!
//! cargo fuzz run fuzz_menu_inputs

#![no_main]

use libfuzzer_sys::fuzz_target;
use petfeeder::adapters::log_display::LogDisplay;
use petfeeder::app::ports::MenuHost;
use petfeeder::config::FeederConfig;
use petfeeder::events::Button;
use petfeeder::menu::{EditTarget, MenuController, MenuState};
use petfeeder::scheduler::AlarmSlotId;
use petfeeder::time_of_day::TimeOfDay;

struct Host {
    lcd: LogDisplay,
    clock: TimeOfDay,
    alarms: [TimeOfDay; 2],
}

impl MenuHost for Host {
    type Display = LogDisplay;

    fn display(&mut self) -> &mut LogDisplay {
        &mut self.lcd
    }

    fn feed_now(&mut self) {}

    fn clock_time(&mut self) -> TimeOfDay {
        self.clock
    }

    fn alarm_time(&self, slot: AlarmSlotId) -> TimeOfDay {
        self.alarms[slot.index()]
    }

    fn commit_edit(&mut self, target: EditTarget, time: TimeOfDay) {
        assert!(time.hour() < 24 && time.minute() < 60, "invalid commit {time}");
        match target {
            EditTarget::Clock => self.clock = time,
            EditTarget::Alarm(slot) => self.alarms[slot.index()] = time,
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let [h, m, rest @ ..] = data else {
        return;
    };

    let config = FeederConfig::default();
    let clock = TimeOfDay::new(h % 24, m % 60).unwrap_or(TimeOfDay::MIDNIGHT);
    let mut host = Host {
        lcd: LogDisplay::new(),
        clock,
        alarms: config.alarm_times,
    };
    let mut menu = MenuController::new(&config);

    for byte in rest {
        let event = Button::ALL[usize::from(byte % 3)];
        if let MenuState::Editing(s) = menu.handle(event, &mut host) {
            assert!(s.hour <= config.hour_edit_max);
            assert!(s.minute < 60);
        }
    }
});

//! Mock hardware adapter for integration tests.
//!
//! Records every actuator and LED call, keeps the panel in a
//! [`LogDisplay`] framebuffer, and runs on simulated time: each delay
//! advances `now_ms` and releases any scripted button presses that have
//! come due into the shared press flags, as the debounce sampler would.

use std::collections::VecDeque;
use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use petfeeder::adapters::log_display::LogDisplay;
use petfeeder::app::events::AppEvent;
use petfeeder::app::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, IndicatorPort, TimePort,
};
use petfeeder::events::{Button, InputShared};
use petfeeder::scheduler::AlarmSlotId;
use petfeeder::time_of_day::TimeOfDay;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Activate { at_ms: u64 },
    Deactivate { at_ms: u64 },
    Indicator { slot: AlarmSlotId, on: bool },
    ClockWrite(TimeOfDay),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub lcd: LogDisplay,
    pub clock: TimeOfDay,
    pub now_ms: u64,
    input: Arc<InputShared>,
    /// (due time, button), sorted by due time.
    script: VecDeque<(u64, Button)>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(input: Arc<InputShared>, clock: TimeOfDay) -> Self {
        Self {
            calls: Vec::new(),
            lcd: LogDisplay::new(),
            clock,
            now_ms: 0,
            input,
            script: VecDeque::new(),
        }
    }

    /// Register a validated press right now.
    pub fn press(&self, button: Button) {
        self.input.presses().set(button);
    }

    /// Release `button` once simulated time reaches `at_ms`.
    pub fn press_at(&mut self, at_ms: u64, button: Button) {
        let pos = self.script.partition_point(|(t, _)| *t <= at_ms);
        self.script.insert(pos, (at_ms, button));
    }

    /// Release `buttons` one after another, `gap_ms` apart, starting
    /// `gap_ms` from now.
    pub fn press_sequence(&mut self, gap_ms: u64, buttons: &[Button]) {
        let mut at = self.now_ms;
        for b in buttons {
            at += gap_ms;
            self.press_at(at, *b);
        }
    }

    pub fn script_done(&self) -> bool {
        self.script.is_empty()
    }

    pub fn activations(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Activate { .. }))
            .count()
    }

    /// Last commanded level of each alarm LED.
    pub fn leds(&self) -> [Option<bool>; 2] {
        let mut leds = [None, None];
        for call in &self.calls {
            if let HwCall::Indicator { slot, on } = call {
                leds[slot.index()] = Some(*on);
            }
        }
        leds
    }

    fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        while let Some((at, button)) = self.script.front().copied() {
            if at > self.now_ms {
                break;
            }
            self.script.pop_front();
            self.input.presses().set(button);
        }
    }
}

impl ClockPort for MockHardware {
    fn read_time(&mut self) -> TimeOfDay {
        self.clock
    }

    fn write_time(&mut self, time: TimeOfDay) {
        self.clock = time;
        self.calls.push(HwCall::ClockWrite(time));
    }
}

impl DisplayPort for MockHardware {
    fn clear(&mut self) {
        self.lcd.clear();
    }

    fn move_cursor(&mut self, col: u8, row: u8) {
        self.lcd.move_cursor(col, row);
    }

    fn put_text(&mut self, text: &str) {
        self.lcd.put_text(text);
    }

    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) {
        self.lcd.define_glyph(slot, bitmap);
    }
}

impl ActuatorPort for MockHardware {
    fn activate(&mut self) {
        self.calls.push(HwCall::Activate {
            at_ms: self.now_ms,
        });
    }

    fn deactivate(&mut self) {
        self.calls.push(HwCall::Deactivate {
            at_ms: self.now_ms,
        });
    }
}

impl IndicatorPort for MockHardware {
    fn set_indicator(&mut self, slot: AlarmSlotId, on: bool) {
        self.calls.push(HwCall::Indicator { slot, on });
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns) / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }
}

impl TimePort for MockHardware {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Collects every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

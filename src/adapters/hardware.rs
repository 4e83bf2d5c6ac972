//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the clock, the display, the feed motor and both alarm LEDs,
//! exposing them through [`ClockPort`], [`DisplayPort`], [`ActuatorPort`],
//! [`IndicatorPort`] and [`TimePort`].  Pins are any `embedded-hal` 1.0
//! digital outputs, so the same adapter runs over ESP-IDF `PinDriver`s on
//! the board and over recording pins on the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{
    ActuatorPort, ButtonSource, ClockPort, DisplayPort, IndicatorPort, TimePort,
};
use crate::drivers::alarm_led::AlarmLed;
use crate::drivers::feed_motor::FeedMotor;
use crate::scheduler::AlarmSlotId;
use crate::time_of_day::TimeOfDay;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<C, D, M, L> {
    clock: C,
    display: D,
    motor: FeedMotor<M>,
    /// Indexed by [`AlarmSlotId::index`].
    leds: [AlarmLed<L>; 2],
}

impl<C, D, M: OutputPin, L: OutputPin> HardwareAdapter<C, D, M, L> {
    /// `leds` are slot 0 (left) then slot 1 (right).  All outputs start low.
    pub fn new(clock: C, display: D, motor_pin: M, leds: [L; 2]) -> Self {
        let [first, second] = leds;
        Self {
            clock,
            display,
            motor: FeedMotor::new(motor_pin),
            leds: [AlarmLed::new(first), AlarmLed::new(second)],
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn motor(&self) -> &FeedMotor<M> {
        &self.motor
    }

    pub fn led(&self, slot: AlarmSlotId) -> &AlarmLed<L> {
        &self.leds[slot.index()]
    }
}

// ── ClockPort ─────────────────────────────────────────────────

impl<C: ClockPort, D, M, L> ClockPort for HardwareAdapter<C, D, M, L> {
    fn read_time(&mut self) -> TimeOfDay {
        self.clock.read_time()
    }

    fn write_time(&mut self, time: TimeOfDay) {
        self.clock.write_time(time);
    }
}

// ── DisplayPort ───────────────────────────────────────────────

impl<C, D: DisplayPort, M, L> DisplayPort for HardwareAdapter<C, D, M, L> {
    fn clear(&mut self) {
        self.display.clear();
    }

    fn move_cursor(&mut self, col: u8, row: u8) {
        self.display.move_cursor(col, row);
    }

    fn put_text(&mut self, text: &str) {
        self.display.put_text(text);
    }

    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) {
        self.display.define_glyph(slot, bitmap);
    }
}

// ── ActuatorPort / IndicatorPort ──────────────────────────────

impl<C, D, M: OutputPin, L> ActuatorPort for HardwareAdapter<C, D, M, L> {
    fn activate(&mut self) {
        self.motor.activate();
    }

    fn deactivate(&mut self) {
        self.motor.deactivate();
    }
}

impl<C, D, M, L: OutputPin> IndicatorPort for HardwareAdapter<C, D, M, L> {
    fn set_indicator(&mut self, slot: AlarmSlotId, on: bool) {
        self.leds[slot.index()].set(on);
    }
}

// ── TimePort ──────────────────────────────────────────────────

impl<C: DelayNs, D, M, L> DelayNs for HardwareAdapter<C, D, M, L> {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}

impl<C: TimePort, D, M, L> TimePort for HardwareAdapter<C, D, M, L> {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

// ── Buttons ───────────────────────────────────────────────────

/// [`ButtonSource`] over any `embedded-hal` input pin, active high.
pub struct HalButton<P> {
    pin: P,
    rearm: Option<fn(&mut P)>,
}

impl<P: InputPin> HalButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, rearm: None }
    }

    /// Button whose edge interrupt must be re-enabled by `rearm` after
    /// each edge is taken.
    pub fn with_rearm(pin: P, rearm: fn(&mut P)) -> Self {
        Self {
            pin,
            rearm: Some(rearm),
        }
    }
}

impl<P: InputPin> ButtonSource for HalButton<P> {
    /// A read error counts as released.
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or_else(|e| {
            warn!("Button: pin read failed: {:?}", e);
            false
        })
    }

    fn rearm(&mut self) {
        if let Some(rearm) = self.rearm {
            rearm(&mut self.pin);
        }
    }
}

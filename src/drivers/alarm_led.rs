//! Alarm indicator LED driver.
//!
//! One discrete LED per alarm slot, lit while the slot is enabled.  The
//! driver remembers the commanded level itself instead of reading the pin
//! back, so `toggle` works on output-only pins too.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

pub struct AlarmLed<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> AlarmLed<P> {
    pub fn new(pin: P) -> Self {
        let mut led = Self { pin, on: false };
        led.set(false);
        led
    }

    pub fn set(&mut self, on: bool) {
        if let Err(e) = self.pin.set_state(PinState::from(on)) {
            warn!("Alarm LED: pin write failed: {:?}", e);
        }
        self.on = on;
    }

    pub fn toggle(&mut self) {
        self.set(!self.on);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

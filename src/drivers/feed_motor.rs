//! Feed actuator driver.
//!
//! One digital output switches the dispensing motor (through a MOSFET or
//! relay board).  HIGH = dispensing.
//!
//! ## Fault model
//!
//! The mechanism has no feedback line, so there is nothing to report.  A
//! failed pin write is logged and otherwise ignored; the driver's own
//! state tracks what was *commanded*.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

pub struct FeedMotor<P> {
    pin: P,
    active: bool,
    activations: u32,
}

impl<P: OutputPin> FeedMotor<P> {
    /// Take the pin and drive it low.
    pub fn new(pin: P) -> Self {
        let mut motor = Self {
            pin,
            active: false,
            activations: 0,
        };
        motor.write(PinState::Low);
        motor
    }

    pub fn activate(&mut self) {
        self.write(PinState::High);
        self.active = true;
        self.activations = self.activations.wrapping_add(1);
    }

    pub fn deactivate(&mut self) {
        self.write(PinState::Low);
        self.active = false;
    }

    fn write(&mut self, state: PinState) {
        if let Err(e) = self.pin.set_state(state) {
            warn!("Feed motor: pin write {:?} failed: {:?}", state, e);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activations since boot.
    pub fn activations(&self) -> u32 {
        self.activations
    }
}

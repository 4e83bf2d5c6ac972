//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control loop of the feeder: alarm polling,
//! side-button toggles and the menu session.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;

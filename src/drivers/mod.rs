//! Button debouncing and its sampling timer, actuator and LED drivers.

pub mod alarm_led;
pub mod button;
pub mod feed_motor;
pub mod sample_timer;

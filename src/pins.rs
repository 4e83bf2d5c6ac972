//! GPIO / peripheral pin assignments for the feeder front panel.
//!
//! Single source of truth: `main` references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Character LCD (HD44780 behind a PCF8574 I²C backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 0;
pub const I2C_SCL_GPIO: i32 = 1;
pub const I2C_FREQ_HZ: u32 = 400_000;
pub const LCD_I2C_ADDR: u8 = 0x27;
pub const LCD_ROWS: u8 = 2;
pub const LCD_COLS: u8 = 16;

// ---------------------------------------------------------------------------
// Alarm indicator LEDs (active HIGH)
// ---------------------------------------------------------------------------

/// Slot 0, next to the left button.
pub const LED_LEFT_GPIO: i32 = 13;
/// Slot 1, next to the right button.
pub const LED_RIGHT_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Feed actuator
// ---------------------------------------------------------------------------

/// Digital output: HIGH = dispensing.
pub const FEEDER_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Buttons (to 3V3, internal pull-down, rising-edge interrupt)
// ---------------------------------------------------------------------------

pub const BUTTON_LEFT_GPIO: i32 = 14;
pub const BUTTON_RIGHT_GPIO: i32 = 15;
pub const BUTTON_CENTER_GPIO: i32 = 16;


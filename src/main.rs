//! PetFeeder firmware entry point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      LogEventSink   SystemClock   HalButton×3 │
//! │  (Clock+Display+      (EventSink)    (Clock+Time)  (ButtonSrc) │
//! │   Actuator+LEDs)                                               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            FeederService (pure logic)                  │    │
//! │  │  AlarmScheduler · FeedCoordinator · MenuController     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │ GPIO ISRs ──edge──▶ InputDebouncer (1 ms timer) ──press─▶ loop │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, InterruptType, Output, PinDriver, Pull};
use log::{info, warn};

use petfeeder::adapters::hardware::{HalButton, HardwareAdapter};
use petfeeder::adapters::log_display::LogDisplay;
use petfeeder::adapters::log_sink::LogEventSink;
use petfeeder::adapters::time::SystemClock;
use petfeeder::app::service::FeederService;
use petfeeder::config::FeederConfig;
use petfeeder::drivers::button::InputDebouncer;
use petfeeder::drivers::sample_timer::PeriodicTimer;
use petfeeder::events::{Button, InputShared};
use petfeeder::{Error, pins};

type ButtonPin = PinDriver<'static, AnyIOPin, Input>;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PetFeeder v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (build-time override or defaults) ────
    let config = FeederConfig::from_override(option_env!("PETFEEDER_CONFIG"));

    // ── 3. Buttons + debounce sampling timer ──────────────────
    let input = Arc::new(InputShared::new());
    let buttons = [
        edge_button(pins::BUTTON_LEFT_GPIO, Button::Left, &input)?,
        edge_button(pins::BUTTON_RIGHT_GPIO, Button::Right, &input)?,
        edge_button(pins::BUTTON_CENTER_GPIO, Button::Center, &input)?,
    ];

    let clock = SystemClock::new();
    let mut debouncer = InputDebouncer::new(input.clone(), buttons, &config);
    let sample_clock = clock.clone();
    // Must outlive the control loop: dropping it stops sampling.
    let _sampler = PeriodicTimer::start("debounce\0", debouncer.sample_ms(), move || {
        debouncer.poll(sample_clock.uptime_ms() as u32);
    })?;

    // ── 4. Outputs ────────────────────────────────────────────
    let motor = output_pin(pins::FEEDER_GPIO)?;
    let led_left = output_pin(pins::LED_LEFT_GPIO)?;
    let led_right = output_pin(pins::LED_RIGHT_GPIO)?;

    info!(
        "Panel: {}x{} LCD @0x{:02x} (SDA {}, SCL {}, {} kHz) mirrored to console",
        pins::LCD_COLS,
        pins::LCD_ROWS,
        pins::LCD_I2C_ADDR,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        pins::I2C_FREQ_HZ / 1000
    );
    let mut hw = HardwareAdapter::new(clock, LogDisplay::new(), motor, [led_left, led_right]);
    let mut log_sink = LogEventSink::new();

    // ── 5. App service ────────────────────────────────────────
    let mut app = FeederService::new(config, input);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");
    app.run(&mut hw, &mut log_sink)
}

/// Pull-down input with a rising-edge interrupt that latches the edge time
/// into `input`.
fn edge_button(
    gpio: i32,
    button: Button,
    input: &Arc<InputShared>,
) -> petfeeder::Result<HalButton<ButtonPin>> {
    let setup = || -> Result<ButtonPin, esp_idf_hal::sys::EspError> {
        // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
        let mut driver = PinDriver::input(unsafe { AnyIOPin::new(gpio) })?;
        driver.set_pull(Pull::Down)?;
        driver.set_interrupt_type(InterruptType::PosEdge)?;

        let shared = Arc::clone(input);
        let on_edge = move || {
            // SAFETY: plain read of the high-resolution timer, ISR-safe.
            let now_ms = (unsafe { esp_idf_svc::sys::esp_timer_get_time() } / 1_000) as u32;
            shared.record_edge(button, now_ms);
        };
        // SAFETY: the callback only reads the timer and does a lock-free
        // atomic store.
        unsafe { driver.subscribe(on_edge)? };
        driver.enable_interrupt()?;
        Ok(driver)
    };

    let driver = setup().map_err(|e| {
        warn!("GPIO{} ({:?}) setup failed: {}", gpio, button, e);
        Error::Init("button GPIO")
    })?;
    info!("GPIO{}: {:?} button armed", gpio, button);

    // The HAL disables a GPIO interrupt once it fires.
    Ok(HalButton::with_rearm(driver, |pin| {
        if let Err(e) = pin.enable_interrupt() {
            warn!("Button: re-arm failed: {}", e);
        }
    }))
}

fn output_pin(gpio: i32) -> petfeeder::Result<PinDriver<'static, AnyOutputPin, Output>> {
    // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
    PinDriver::output(unsafe { AnyOutputPin::new(gpio) }).map_err(|e| {
        warn!("GPIO{} output setup failed: {}", gpio, e);
        Error::Init("output GPIO")
    })
}

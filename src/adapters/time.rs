//! ESP32 time adapter.
//!
//! [`SystemClock`] is both the wall clock ([`ClockPort`]) and the monotonic
//! time source ([`TimePort`]) for the feeder.
//!
//! - **`target_os = "espidf"`**: wall time from `gettimeofday()` /
//!   `settimeofday()` (the RTC domain keeps it across light sleep), monotonic
//!   time from `esp_timer_get_time()`.
//! - **`not(target_os = "espidf")`**: a simulated wall clock running off
//!   `std::time::Instant`, for host-side testing and simulation.
//!
//! No time zone is configured: the system clock holds local time directly,
//! so hour and minute are read straight off the epoch seconds.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::app::ports::{ClockPort, TimePort};
use crate::time_of_day::TimeOfDay;

const SECS_PER_DAY: i64 = 86_400;

/// Replace hour and minute in `epoch_secs`, keeping the day and the
/// seconds within the minute.
pub fn with_hour_minute(epoch_secs: i64, time: TimeOfDay) -> i64 {
    let day_start = epoch_secs - epoch_secs.rem_euclid(SECS_PER_DAY);
    let seconds = epoch_secs.rem_euclid(60);
    day_start + i64::from(time.seconds_of_day()) + seconds
}

/// Hour and minute of `epoch_secs`.
pub fn time_of_day(epoch_secs: i64) -> TimeOfDay {
    TimeOfDay::from_seconds_of_day(epoch_secs.rem_euclid(SECS_PER_DAY) as u32)
}

/// Wall clock plus monotonic milliseconds.
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
    /// Simulated epoch seconds at `start`.
    #[cfg(not(target_os = "espidf"))]
    epoch_at_start: i64,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Self {
        Self {}
    }

    /// Simulated clock starting at midnight, day 0.
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Simulated clock starting at `epoch_secs`.
    #[cfg(not(target_os = "espidf"))]
    pub fn starting_at(epoch_secs: i64) -> Self {
        Self {
            start: std::time::Instant::now(),
            epoch_at_start: epoch_secs,
        }
    }

    /// Current wall time, seconds since the epoch.
    #[cfg(target_os = "espidf")]
    pub fn epoch_secs(&self) -> i64 {
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: `tv` is a valid out-pointer; the timezone argument may be null.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            log::warn!("Clock: gettimeofday failed");
            return 0;
        }
        tv.tv_sec as i64
    }

    /// Current wall time, seconds since the epoch.
    #[cfg(not(target_os = "espidf"))]
    pub fn epoch_secs(&self) -> i64 {
        self.epoch_at_start + self.start.elapsed().as_secs() as i64
    }

    #[cfg(target_os = "espidf")]
    fn set_epoch_secs(&mut self, epoch_secs: i64) {
        let tv = esp_idf_svc::sys::timeval {
            tv_sec: epoch_secs as esp_idf_svc::sys::time_t,
            tv_usec: 0,
        };
        // SAFETY: `tv` is fully initialised; the timezone argument may be null.
        if unsafe { esp_idf_svc::sys::settimeofday(&tv, core::ptr::null()) } != 0 {
            log::warn!("Clock: settimeofday failed");
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_epoch_secs(&mut self, epoch_secs: i64) {
        self.epoch_at_start = epoch_secs - self.start.elapsed().as_secs() as i64;
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_ms(&self) -> u64 {
        // SAFETY: plain read of the high-resolution timer.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since the clock was created (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl ClockPort for SystemClock {
    fn read_time(&mut self) -> TimeOfDay {
        time_of_day(self.epoch_secs())
    }

    fn write_time(&mut self, time: TimeOfDay) {
        let updated = with_hour_minute(self.epoch_secs(), time);
        self.set_epoch_secs(updated);
        log::info!("Clock: set to {}", time);
    }
}

impl DelayNs for SystemClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl TimePort for SystemClock {
    fn now_ms(&self) -> u64 {
        self.uptime_ms()
    }
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{debug, info};

use crate::app::events::{AppEvent, FeederStatus};
use crate::app::ports::EventSink;
use crate::feeder::FeedTrigger;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(status) => info!("START | {}", StatusLine(status)),
            AppEvent::Status(status) => info!("STATUS | {}", StatusLine(status)),
            AppEvent::Fed { trigger } => info!("FEED | done, trigger={:?}", trigger),
            // An alarm keeps matching for its whole minute; only the first
            // poll feeds, the rest land here.
            AppEvent::FeedSuppressed {
                trigger: FeedTrigger::Alarm(slot),
                remaining_ms,
            } => debug!("FEED | alarm {:?} suppressed, {} ms left", slot, remaining_ms),
            AppEvent::FeedSuppressed {
                trigger,
                remaining_ms,
            } => info!("FEED | {:?} suppressed, {} ms left", trigger, remaining_ms),
            AppEvent::AlarmToggled { slot, enabled } => {
                info!(
                    "ALARM | {:?} {}",
                    slot,
                    if *enabled { "enabled" } else { "disabled" }
                );
            }
            AppEvent::AlarmSet { slot, time } => info!("ALARM | {:?} set to {}", slot, time),
            AppEvent::ClockSet(time) => info!("CLOCK | set to {}", time),
            AppEvent::MenuOpened => info!("MENU | opened"),
            AppEvent::MenuClosed => info!("MENU | closed"),
        }
    }
}

struct StatusLine<'a>(&'a FeederStatus);

impl core::fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = self.0;
        let flag = |on: bool| if on { "on" } else { "off" };
        write!(
            f,
            "time={} | alarm1={} ({}) alarm2={} ({}) | feeds={} | up={}s",
            s.time,
            s.alarm_times[0],
            flag(s.alarms_enabled[0]),
            s.alarm_times[1],
            flag(s.alarms_enabled[1]),
            s.feed_count,
            s.uptime_secs,
        )
    }
}

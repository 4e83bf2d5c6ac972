//! Outbound application events.
//!
//! The [`FeederService`](super::service::FeederService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the firmware logs them.

use crate::feeder::FeedTrigger;
use crate::menu::EditTarget;
use crate::scheduler::AlarmSlotId;
use crate::time_of_day::TimeOfDay;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the initial status).
    Started(FeederStatus),

    /// The actuator ran a full feed cycle.
    Fed { trigger: FeedTrigger },

    /// A feed was asked for inside the refractory window.
    FeedSuppressed { trigger: FeedTrigger, remaining_ms: u64 },

    /// A side button flipped an alarm slot.
    AlarmToggled { slot: AlarmSlotId, enabled: bool },

    MenuOpened,
    MenuClosed,

    /// The clock editor committed a new time.
    ClockSet(TimeOfDay),

    /// An alarm editor committed a new time.
    AlarmSet { slot: AlarmSlotId, time: TimeOfDay },

    /// Periodic heartbeat.
    Status(FeederStatus),
}

impl AppEvent {
    /// Event for a finished menu edit.
    pub fn edit_committed(target: EditTarget, time: TimeOfDay) -> Self {
        match target {
            EditTarget::Clock => Self::ClockSet(time),
            EditTarget::Alarm(slot) => Self::AlarmSet { slot, time },
        }
    }
}

/// A point-in-time snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeederStatus {
    pub time: TimeOfDay,
    pub alarm_times: [TimeOfDay; 2],
    pub alarms_enabled: [bool; 2],
    /// Successful feeds since boot.
    pub feed_count: u32,
    pub uptime_secs: u64,
}

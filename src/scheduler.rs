//! Alarm scheduler: two fixed feeding slots matched against the wall clock.
//!
//! ```text
//!   ClockPort ──▶ TimeOfDay ──▶ AlarmScheduler::is_feed_time ──▶ FeedCoordinator
//!                                   │
//!                     ┌─────────────┴─────────────┐
//!                     │ slot 0  10:30  [enabled?] │
//!                     │ slot 1  20:30  [enabled?] │
//!                     └───────────────────────────┘
//! ```
//!
//! Matching is exact to the minute.  The scheduler does not remember that a
//! slot already fired; the control loop polls about once a second, so a
//! matching minute is seen many times and the feed coordinator's refractory
//! window is what keeps it to one feed.

use log::info;

use crate::config::FeederConfig;
use crate::time_of_day::TimeOfDay;

// ═══════════════════════════════════════════════════════════════
//  Slot types
// ═══════════════════════════════════════════════════════════════

/// Index of one of the two alarm slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlarmSlotId {
    First = 0,
    Second = 1,
}

impl AlarmSlotId {
    pub const ALL: [AlarmSlotId; 2] = [AlarmSlotId::First, AlarmSlotId::Second];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }
}

/// A configurable feeding trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmSlot {
    pub time: TimeOfDay,
    pub enabled: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct AlarmScheduler {
    slots: [AlarmSlot; 2],
}

impl AlarmScheduler {
    pub fn new(slots: [AlarmSlot; 2]) -> Self {
        Self { slots }
    }

    pub fn from_config(config: &FeederConfig) -> Self {
        Self::new([
            AlarmSlot {
                time: config.alarm_times[0],
                enabled: config.alarms_enabled[0],
            },
            AlarmSlot {
                time: config.alarm_times[1],
                enabled: config.alarms_enabled[1],
            },
        ])
    }

    /// `true` iff an enabled slot is set to exactly `current`.
    pub fn is_feed_time(&self, current: TimeOfDay) -> bool {
        self.matching_slot(current).is_some()
    }

    /// The first enabled slot set to exactly `current`.
    pub fn matching_slot(&self, current: TimeOfDay) -> Option<AlarmSlotId> {
        AlarmSlotId::ALL.into_iter().find(|id| {
            let slot = &self.slots[id.index()];
            slot.enabled && slot.time == current
        })
    }

    pub fn set_slot_time(&mut self, id: AlarmSlotId, time: TimeOfDay) {
        self.slots[id.index()].time = time;
        info!("Scheduler: slot {} set to {}", id.index(), time);
    }

    /// Flip a slot's enabled flag and return the new value.
    pub fn toggle_enabled(&mut self, id: AlarmSlotId) -> bool {
        let slot = &mut self.slots[id.index()];
        slot.enabled = !slot.enabled;
        info!(
            "Scheduler: slot {} {}",
            id.index(),
            if slot.enabled { "enabled" } else { "disabled" }
        );
        slot.enabled
    }

    pub fn slot(&self, id: AlarmSlotId) -> AlarmSlot {
        self.slots[id.index()]
    }

    pub fn slots(&self) -> &[AlarmSlot; 2] {
        &self.slots
    }

    /// Number of enabled slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.enabled).count()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

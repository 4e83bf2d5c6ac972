//! Feed coordinator: one dispensing cycle, guarded by a refractory window.
//!
//! ```text
//!  feed() ──[< refractory since last feed]──▶ Suppressed (no-op)
//!     │
//!     └──▶ "Feeding dog!" ─▶ activate ─▶ hold ─▶ deactivate ─▶ clear ─▶ record
//! ```
//!
//! Both the manual menu action and the alarm path call [`FeedCoordinator::feed`].
//! The alarm stays true for every ~1 s poll of its matching minute, so the
//! window must be longer than a minute; the default is 61 s.

use log::info;

use crate::app::ports::{ActuatorPort, DisplayPort, TimePort};
use crate::config::FeederConfig;
use crate::scheduler::AlarmSlotId;
use crate::ui;

/// What asked for the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTrigger {
    /// "Feed the dog!" confirmed in the menu.
    Manual,
    /// An enabled alarm slot matched the clock.
    Alarm(AlarmSlotId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The actuator ran a full cycle.
    Fed,
    /// Inside the refractory window; nothing happened.
    Suppressed { remaining_ms: u64 },
}

pub struct FeedCoordinator {
    /// Completion time of the last successful feed, `None` before the first.
    last_feed_ms: Option<u64>,
    refractory_ms: u64,
    hold_ms: u32,
    feed_count: u32,
}

impl FeedCoordinator {
    pub fn new(config: &FeederConfig) -> Self {
        Self {
            last_feed_ms: None,
            refractory_ms: u64::from(config.feed_refractory_ms),
            hold_ms: config.feed_hold_ms,
            feed_count: 0,
        }
    }

    /// Run one feed cycle unless the last one finished less than the
    /// refractory window ago.  Blocks for the hold time when it feeds.
    pub fn feed(&mut self, hw: &mut (impl ActuatorPort + DisplayPort + TimePort)) -> FeedOutcome {
        if let Some(remaining_ms) = self.remaining_refractory_ms(hw.now_ms()) {
            return FeedOutcome::Suppressed { remaining_ms };
        }

        info!("Feeder: dispensing for {} ms", self.hold_ms);
        hw.clear();
        hw.move_cursor(0, 0);
        hw.put_text(ui::FEEDING_TEXT);

        hw.activate();
        hw.delay_ms(self.hold_ms);
        hw.deactivate();

        hw.clear();
        self.last_feed_ms = Some(hw.now_ms());
        self.feed_count = self.feed_count.wrapping_add(1);
        info!("Feeder: done (feed #{})", self.feed_count);
        FeedOutcome::Fed
    }

    /// Time left in the refractory window at `now_ms`, `None` if a feed
    /// would go ahead.
    pub fn remaining_refractory_ms(&self, now_ms: u64) -> Option<u64> {
        let last = self.last_feed_ms?;
        let elapsed = now_ms.saturating_sub(last);
        (elapsed < self.refractory_ms).then(|| self.refractory_ms - elapsed)
    }

    pub fn last_feed_ms(&self) -> Option<u64> {
        self.last_feed_ms
    }

    /// Successful feeds since boot.
    pub fn feed_count(&self) -> u32 {
        self.feed_count
    }
}

//! Wall-clock hour and minute, the only resolution the feeder cares about.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;

/// Hour (0–23) and minute (0–59).
///
/// Fields are private so every value in circulation is in range; build one
/// with [`TimeOfDay::new`] or [`TimeOfDay::from_seconds_of_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    pub const fn new(hour: u8, minute: u8) -> Result<Self, TimeError> {
        if hour >= HOURS_PER_DAY {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute >= MINUTES_PER_HOUR {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Truncate a seconds-since-midnight count (any value, taken modulo one
    /// day) to hour and minute.
    pub const fn from_seconds_of_day(secs: u32) -> Self {
        let secs = secs % 86_400;
        Self {
            hour: (secs / 3600) as u8,
            minute: ((secs % 3600) / 60) as u8,
        }
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Seconds from midnight to the start of this minute.
    pub const fn seconds_of_day(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60
    }

    /// `HH:MM`, zero padded, as shown on the front panel.
    pub fn to_hhmm(self) -> heapless::String<5> {
        let mut s = heapless::String::new();
        // Five bytes always fit "HH:MM".
        let _ = fmt::Write::write_fmt(&mut s, format_args!("{self}"));
        s
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<(u8, u8)> for TimeOfDay {
    type Error = TimeError;

    fn try_from((hour, minute): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(hour, minute)
    }
}

impl From<TimeOfDay> for (u8, u8) {
    fn from(t: TimeOfDay) -> Self {
        (t.hour, t.minute)
    }
}

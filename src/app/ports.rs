//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FeederService (domain)
//! ```
//!
//! Driven adapters (clock, display, feed motor, LEDs, buttons, event sinks)
//! implement these traits.  The [`FeederService`](super::service::FeederService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! None of the output ports return errors: actuator and display faults are
//! not modelled, adapters log and carry on.

use embedded_hal::delay::DelayNs;

use crate::menu::EditTarget;
use crate::scheduler::AlarmSlotId;
use crate::time_of_day::TimeOfDay;

// ───────────────────────────────────────────────────────────────
// Clock port (real-time clock ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock access.  Only hour and minute cross this boundary.
pub trait ClockPort {
    /// Current hour and minute.
    fn read_time(&mut self) -> TimeOfDay;

    /// Set hour and minute, keeping the stored date and seconds.
    fn write_time(&mut self, time: TimeOfDay);
}

// ───────────────────────────────────────────────────────────────
// Display port (domain → character LCD)
// ───────────────────────────────────────────────────────────────

/// A 16×2 character display with four user-definable glyphs.
pub trait DisplayPort {
    fn clear(&mut self);

    /// Place the cursor at `col` (0–15), `row` (0–1).
    fn move_cursor(&mut self, col: u8, row: u8);

    /// Write text at the cursor, advancing it.  Bytes 0–3 print the
    /// user-defined glyphs.
    fn put_text(&mut self, text: &str);

    /// Load an 8-row, 5-bit-wide bitmap into glyph `slot` (0–3).
    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → feed mechanism)
// ───────────────────────────────────────────────────────────────

/// Binary feed actuator.  Hold duration is owned by the caller.
pub trait ActuatorPort {
    fn activate(&mut self);
    fn deactivate(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → alarm LEDs)
// ───────────────────────────────────────────────────────────────

/// One LED per alarm slot, mirroring its enabled flag.
pub trait IndicatorPort {
    fn set_indicator(&mut self, slot: AlarmSlotId, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Time port (monotonic clock + blocking delay)
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds plus blocking delays.
///
/// Test doubles advance their notion of `now_ms` inside the delay calls,
/// which keeps the feed hold and the poll sleeps deterministic.
pub trait TimePort: DelayNs {
    /// Milliseconds since boot.  Never goes backwards.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Button source (raw GPIO → debounce sampler)
// ───────────────────────────────────────────────────────────────

/// Raw level of one edge-triggered button input.
pub trait ButtonSource {
    /// `true` while the contact is closed (pin high with pull-down).
    fn is_high(&mut self) -> bool;

    /// Re-enable the edge interrupt after its edge has been taken.  Needed
    /// on platforms that disarm a GPIO interrupt once it fires.
    fn rearm(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Menu delegate (decouples the menu state machine from its effects)
// ───────────────────────────────────────────────────────────────

/// Callbacks the [`MenuController`](crate::menu::MenuController) uses to
/// act on the rest of the system.
///
/// The controller knows nothing about feeders, clocks or the scheduler;
/// the service implements this trait over its own parts for the duration
/// of one menu step.
pub trait MenuHost {
    type Display: DisplayPort;

    /// Display the menu redraws into.
    fn display(&mut self) -> &mut Self::Display;

    /// "Feed now" was confirmed.
    fn feed_now(&mut self);

    /// Starting value when the clock editor opens.
    fn clock_time(&mut self) -> TimeOfDay;

    /// Starting value when an alarm editor opens.
    fn alarm_time(&self, slot: AlarmSlotId) -> TimeOfDay;

    /// An edit finished; write `time` to `target`.
    fn commit_edit(&mut self, target: EditTarget, time: TimeOfDay);
}

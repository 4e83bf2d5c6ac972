//! Front-panel layout for the 16×2 character display.
//!
//! ```text
//!  col 0         6              14
//!      ┌────────────────────────────┐
//!  r0  │P P   HH:MM           P P   │   P = paw glyphs 0,1 / 2,3
//!  r1  │P P A1:A1  A2:A2      P P   │
//!      └────────────────────────────┘
//! ```

use core::fmt::Write;

use heapless::String;

use crate::app::ports::DisplayPort;
use crate::menu::EditField;
use crate::scheduler::AlarmSlot;
use crate::time_of_day::TimeOfDay;

/// Paw icon, split into four 5×8 glyphs: top-left, top-right,
/// bottom-left, bottom-right.
pub const PAW_GLYPHS: [[u8; 8]; 4] = [
    [0x00, 0x00, 0x03, 0x03, 0x0C, 0x0D, 0x03, 0x07],
    [0x00, 0x00, 0x18, 0x18, 0x06, 0x16, 0x18, 0x1C],
    [0x07, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x1C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
];

/// Shown while the actuator is held.
pub const FEEDING_TEXT: &str = "Feeding dog!";

const PAW_TOP: &str = "\u{0}\u{1}";
const PAW_BOTTOM: &str = "\u{2}\u{3}";
const PAW_COLUMNS: [u8; 2] = [0, 14];

const CLOCK_POS: (u8, u8) = (6, 0);
const ALARM_POS: [(u8, u8); 2] = [(2, 1), (9, 1)];

/// Load the paw glyphs.  Run once at startup.
pub fn define_glyphs(display: &mut impl DisplayPort) {
    for (slot, bitmap) in (0u8..).zip(PAW_GLYPHS.iter()) {
        display.define_glyph(slot, bitmap);
    }
}

/// Draw the idle screen over whatever is there.  Every cell it owns is
/// rewritten, so no clear is needed between passes.
pub fn render_idle(display: &mut impl DisplayPort, now: TimeOfDay, alarms: &[AlarmSlot; 2]) {
    for col in PAW_COLUMNS {
        display.move_cursor(col, 0);
        display.put_text(PAW_TOP);
        display.move_cursor(col, 1);
        display.put_text(PAW_BOTTOM);
    }

    draw_time_at(display, CLOCK_POS, now);
    for (pos, slot) in ALARM_POS.iter().zip(alarms) {
        draw_time_at(display, *pos, slot.time);
    }
}

fn draw_time_at(display: &mut impl DisplayPort, (col, row): (u8, u8), time: TimeOfDay) {
    display.move_cursor(col, row);
    display.put_text(&time.to_hhmm());
}

/// `"Hour: HH"` or `"Min.: MM"`.
pub fn field_text(field: EditField, value: u8) -> String<16> {
    let mut text = String::new();
    let prefix = match field {
        EditField::Hour => "Hour",
        EditField::Minute => "Min.",
    };
    // 8 chars always fit.
    let _ = write!(text, "{prefix}: {value:02}");
    text
}

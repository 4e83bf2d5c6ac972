//! Per-state transition handlers.
//!
//! Each handler takes the current payload and one event and returns the
//! next state.  Side effects (feeding, committing an edit, reading the
//! clock) go through the [`MenuHost`]; drawing is left to the controller.

use log::warn;

use super::{EditField, EditSession, EditTarget, MenuScreen, MenuState};
use crate::app::ports::MenuHost;
use crate::events::{Button, ButtonEvent};
use crate::time_of_day::{HOURS_PER_DAY, MINUTES_PER_HOUR, TimeOfDay};

/// Dispatch `event` to the handler for `state`.
pub fn transition(
    state: MenuState,
    event: ButtonEvent,
    hour_max: u8,
    host: &mut impl MenuHost,
) -> MenuState {
    match state {
        MenuState::Idle => idle_on(event),
        MenuState::Menu(screen) => menu_on(screen, event, host),
        MenuState::Editing(session) => editing_on(session, event, hour_max, host),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_on(event: ButtonEvent) -> MenuState {
    match event {
        Button::Center => MenuState::Menu(MenuScreen::Feed),
        // Side buttons toggle alarms on the idle screen; not a menu concern.
        Button::Left | Button::Right => MenuState::Idle,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  MENU: screen navigation
// ═══════════════════════════════════════════════════════════════════════════

fn menu_on(screen: MenuScreen, event: ButtonEvent, host: &mut impl MenuHost) -> MenuState {
    match event {
        Button::Right => screen.next().map_or(MenuState::Idle, MenuState::Menu),
        Button::Left => screen.prev().map_or(MenuState::Idle, MenuState::Menu),
        Button::Center => match screen.edit_target() {
            None => {
                host.feed_now();
                MenuState::Idle
            }
            Some(target) => {
                let start = match target {
                    EditTarget::Clock => host.clock_time(),
                    EditTarget::Alarm(slot) => host.alarm_time(slot),
                };
                MenuState::Editing(EditSession {
                    target,
                    field: EditField::Hour,
                    hour: start.hour(),
                    minute: start.minute(),
                })
            }
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  EDITING: hour, then minute
// ═══════════════════════════════════════════════════════════════════════════

fn editing_on(
    mut session: EditSession,
    event: ButtonEvent,
    hour_max: u8,
    host: &mut impl MenuHost,
) -> MenuState {
    let step: i8 = match event {
        Button::Left => -1,
        Button::Right => 1,
        Button::Center => return confirm_field(session, host),
    };

    match session.field {
        EditField::Hour => session.hour = step_wrapping(session.hour, step, hour_max),
        EditField::Minute => {
            session.minute = step_wrapping(session.minute, step, MINUTES_PER_HOUR - 1);
        }
    }
    MenuState::Editing(session)
}

fn confirm_field(session: EditSession, host: &mut impl MenuHost) -> MenuState {
    match session.field {
        EditField::Hour => MenuState::Editing(EditSession {
            field: EditField::Minute,
            ..session
        }),
        EditField::Minute => {
            host.commit_edit(session.target, finished_time(session));
            MenuState::Idle
        }
    }
}

/// The edited value as a valid time.  An hour past 23 (the editor's extra
/// "24" position) wraps to midnight.
fn finished_time(session: EditSession) -> TimeOfDay {
    let hour = if session.hour >= HOURS_PER_DAY {
        warn!("Menu: hour {} committed as 00", session.hour);
        0
    } else {
        session.hour
    };
    TimeOfDay::new(hour, session.minute).unwrap_or(TimeOfDay::MIDNIGHT)
}

/// `value + step` over the inclusive range `0..=max`, wrapping at both ends.
pub fn step_wrapping(value: u8, step: i8, max: u8) -> u8 {
    let next = i16::from(value) + i16::from(step);
    if next < 0 {
        max
    } else if next > i16::from(max) {
        0
    } else {
        next as u8
    }
}

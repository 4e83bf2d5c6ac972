//! Menu navigation and time-field editing.
//!
//! ```text
//!  Idle ──C──▶ Menu(Feed) ◀─L/R─▶ Menu(AdjustClock) ◀─L/R─▶ Menu(1st) ◀─L/R─▶ Menu(2nd)
//!   ▲            │  ▲ L past first / R past last: exit        │
//!   │            C  └──────────────────────────────────────────┘
//!   │            ▼                                 C (screens 1–3)
//!   ├──────── feed_now                                  ▼
//!   │                                   Editing(Hour) ──C──▶ Editing(Minute)
//!   │                                     L/R: -1/+1          L/R: -1/+1
//!   └──────────────── commit_edit ◀──────────────C───────────────┘
//! ```
//!
//! The controller holds only [`MenuState`]; everything it does to the rest
//! of the system goes through a [`MenuHost`].  Transition logic lives in
//! [`states`], redraws here.

pub mod states;

use log::info;

use crate::app::ports::{DisplayPort, MenuHost};
use crate::config::FeederConfig;
use crate::events::ButtonEvent;
use crate::scheduler::AlarmSlotId;
use crate::ui;

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// The four top-level menu screens, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MenuScreen {
    Feed = 0,
    AdjustClock = 1,
    AdjustFirstFeed = 2,
    AdjustSecondFeed = 3,
}

impl MenuScreen {
    pub const COUNT: usize = 4;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Feed),
            1 => Some(Self::AdjustClock),
            2 => Some(Self::AdjustFirstFeed),
            3 => Some(Self::AdjustSecondFeed),
            _ => None,
        }
    }

    /// Screen to the right, `None` past the last one.
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Screen to the left, `None` before the first one.
    pub const fn prev(self) -> Option<Self> {
        match self.index().checked_sub(1) {
            Some(i) => Self::from_index(i),
            None => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Feed => "Feed the dog!",
            Self::AdjustClock => "Adjust clock",
            Self::AdjustFirstFeed => "Adjust 1st feed",
            Self::AdjustSecondFeed => "Adjust 2nd feed",
        }
    }

    /// What Center edits on this screen; `None` for the feed screen.
    pub const fn edit_target(self) -> Option<EditTarget> {
        match self {
            Self::Feed => None,
            Self::AdjustClock => Some(EditTarget::Clock),
            Self::AdjustFirstFeed => Some(EditTarget::Alarm(AlarmSlotId::First)),
            Self::AdjustSecondFeed => Some(EditTarget::Alarm(AlarmSlotId::Second)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    Hour,
    Minute,
}

/// Where a finished edit is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Clock,
    Alarm(AlarmSlotId),
}

/// An in-progress two-field time edit.
///
/// `hour` runs over `0..=hour_max` (25 values by default); a committed 24
/// becomes midnight.  `minute` stays in `0..60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSession {
    pub target: EditTarget,
    pub field: EditField,
    pub hour: u8,
    pub minute: u8,
}

impl EditSession {
    /// Value of the field being edited.
    pub fn active_value(&self) -> u8 {
        match self.field {
            EditField::Hour => self.hour,
            EditField::Minute => self.minute,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Idle,
    Menu(MenuScreen),
    Editing(EditSession),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives [`MenuState`] one button event at a time.
pub struct MenuController {
    state: MenuState,
    hour_max: u8,
}

impl MenuController {
    pub fn new(config: &FeederConfig) -> Self {
        Self {
            state: MenuState::Idle,
            hour_max: config.hour_edit_max,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// `true` until the menu has returned to [`MenuState::Idle`].
    pub fn is_active(&self) -> bool {
        self.state != MenuState::Idle
    }

    /// Open the menu on its first screen.  No-op if already open.
    pub fn open(&mut self, host: &mut impl MenuHost) {
        if !self.is_active() {
            self.handle(ButtonEvent::Center, host);
        }
    }

    /// Apply one decoded button event and redraw what changed.
    pub fn handle(&mut self, event: ButtonEvent, host: &mut impl MenuHost) -> MenuState {
        let prev = self.state;
        let next = states::transition(prev, event, self.hour_max, host);
        if prev != next {
            log_transition(prev, next);
            redraw(prev, next, host.display());
        }
        self.state = next;
        next
    }
}

fn log_transition(prev: MenuState, next: MenuState) {
    match (prev, next) {
        (MenuState::Idle, _) => info!("Menu: opened"),
        (_, MenuState::Idle) => info!("Menu: closed"),
        (MenuState::Menu(_), MenuState::Menu(s)) => info!("Menu: {}", s.label()),
        (MenuState::Menu(_), MenuState::Editing(e)) => info!("Menu: editing {:?}", e.target),
        _ => {}
    }
}

/// Screen changes clear the panel first; value changes inside one edit
/// overwrite in place.
fn redraw(prev: MenuState, next: MenuState, display: &mut impl DisplayPort) {
    match next {
        MenuState::Idle => display.clear(),
        MenuState::Menu(screen) => {
            display.clear();
            display.move_cursor(0, 0);
            display.put_text(screen.label());
        }
        MenuState::Editing(session) => {
            if !matches!(prev, MenuState::Editing(_)) {
                display.clear();
            }
            display.move_cursor(0, 0);
            display.put_text(&ui::field_text(session.field, session.active_value()));
        }
    }
}

//! Application service, the hexagonal core.
//!
//! [`FeederService`] owns the alarm scheduler, the feed coordinator and the
//! menu controller, plus the shared input cell the debounce sampler writes.
//! All I/O flows through port traits injected at call sites, making the
//! whole control loop testable with mock adapters.
//!
//! ```text
//!  InputShared ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  ClockPort  ◀──▶ │      FeederService       │
//!  DisplayPort ◀── │ Scheduler · Feed · Menu  │ ──▶ ActuatorPort
//!                  └──────────────────────────┘ ──▶ IndicatorPort
//! ```
//!
//! One idle pass: read clock → draw idle screen → feed if an alarm matches
//! → take presses (Left/Right toggle alarms) → Center opens the menu,
//! which is then polled at `menu_poll_ms` until it closes; otherwise sleep
//! `idle_poll_ms`.

use std::sync::Arc;

use log::{debug, info};

use crate::config::FeederConfig;
use crate::events::{Button, InputShared, PressSet};
use crate::feeder::{FeedCoordinator, FeedOutcome, FeedTrigger};
use crate::menu::{EditTarget, MenuController};
use crate::scheduler::{AlarmScheduler, AlarmSlotId};
use crate::time_of_day::TimeOfDay;
use crate::ui;

use super::events::{AppEvent, FeederStatus};
use super::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, IndicatorPort, MenuHost, TimePort,
};

/// Everything the control loop drives, as one value.
///
/// A single `hw` satisfying all five ports avoids juggling several mutable
/// borrows while keeping the port boundary explicit.
pub trait FeederHardware: ClockPort + DisplayPort + ActuatorPort + IndicatorPort + TimePort {}

impl<T> FeederHardware for T where
    T: ClockPort + DisplayPort + ActuatorPort + IndicatorPort + TimePort
{
}

// ───────────────────────────────────────────────────────────────
// FeederService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct FeederService {
    config: FeederConfig,
    input: Arc<InputShared>,
    scheduler: AlarmScheduler,
    feeder: FeedCoordinator,
    menu: MenuController,
    last_status_ms: u64,
    pass_count: u64,
}

impl FeederService {
    /// Construct the service.  Call [`start`](Self::start) next.
    pub fn new(config: FeederConfig, input: Arc<InputShared>) -> Self {
        Self {
            scheduler: AlarmScheduler::from_config(&config),
            feeder: FeedCoordinator::new(&config),
            menu: MenuController::new(&config),
            config,
            input,
            last_status_ms: 0,
            pass_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Load the paw glyphs, sync the LEDs to the slots and drop any presses
    /// that arrived during boot.
    pub fn start(&mut self, hw: &mut impl FeederHardware, sink: &mut impl EventSink) {
        ui::define_glyphs(hw);
        hw.clear();
        for slot in AlarmSlotId::ALL {
            hw.set_indicator(slot, self.scheduler.slot(slot).enabled);
        }
        self.input.presses().reset_all();
        self.last_status_ms = hw.now_ms();

        let status = self.status(hw);
        info!(
            "FeederService started at {} (alarms {} / {})",
            status.time, status.alarm_times[0], status.alarm_times[1]
        );
        sink.emit(&AppEvent::Started(status));
    }

    /// Run forever.
    pub fn run(&mut self, hw: &mut impl FeederHardware, sink: &mut impl EventSink) -> ! {
        loop {
            self.run_pass(hw, sink);
        }
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// One idle pass followed by either the menu session or the idle sleep.
    pub fn run_pass(&mut self, hw: &mut impl FeederHardware, sink: &mut impl EventSink) {
        let open_menu = self.idle_pass(hw, sink);
        self.maybe_emit_status(hw, sink);

        if open_menu {
            self.run_menu(hw, sink);
        } else {
            hw.delay_ms(self.config.idle_poll_ms);
        }
    }

    /// Draw the idle screen, fire a due alarm and apply side-button toggles.
    /// Returns `true` when Center was pressed.
    pub fn idle_pass(&mut self, hw: &mut impl FeederHardware, sink: &mut impl EventSink) -> bool {
        self.pass_count += 1;
        let now = hw.read_time();
        ui::render_idle(hw, now, self.scheduler.slots());

        if let Some(slot) = self.scheduler.matching_slot(now) {
            feed_and_report(&mut self.feeder, hw, FeedTrigger::Alarm(slot), sink);
        }

        let presses = self.input.presses().take_all();
        self.apply_toggles(presses, hw, sink);
        presses.contains(Button::Center)
    }

    /// Open the menu and poll it until it returns to idle, then clear.
    pub fn run_menu(&mut self, hw: &mut impl FeederHardware, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::MenuOpened);
        let mut host = MenuBridge::new(hw, sink, &mut self.scheduler, &mut self.feeder);
        self.menu.open(&mut host);

        while self.menu.is_active() {
            hw.delay_ms(self.config.menu_poll_ms);
            self.menu_step(hw, sink);
        }

        hw.clear();
        sink.emit(&AppEvent::MenuClosed);
    }

    /// Take the pending presses and feed one decoded event to the menu.
    /// Returns `true` while the menu stays open.
    pub fn menu_step(&mut self, hw: &mut impl FeederHardware, sink: &mut impl EventSink) -> bool {
        if let Some(event) = self.input.presses().take_all().first_event() {
            debug!("Menu event: {:?}", event);
            let mut host = MenuBridge::new(hw, sink, &mut self.scheduler, &mut self.feeder);
            self.menu.handle(event, &mut host);
        }
        self.menu.is_active()
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot.
    pub fn status(&self, hw: &mut impl FeederHardware) -> FeederStatus {
        let slots = self.scheduler.slots();
        FeederStatus {
            time: hw.read_time(),
            alarm_times: [slots[0].time, slots[1].time],
            alarms_enabled: [slots[0].enabled, slots[1].enabled],
            feed_count: self.feeder.feed_count(),
            uptime_secs: hw.now_ms() / 1000,
        }
    }

    pub fn scheduler(&self) -> &AlarmScheduler {
        &self.scheduler
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn feeder(&self) -> &FeedCoordinator {
        &self.feeder
    }

    /// Idle passes executed since startup.
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_toggles(
        &mut self,
        presses: PressSet,
        hw: &mut impl FeederHardware,
        sink: &mut impl EventSink,
    ) {
        for (button, slot) in [
            (Button::Left, AlarmSlotId::First),
            (Button::Right, AlarmSlotId::Second),
        ] {
            if presses.contains(button) {
                let enabled = self.scheduler.toggle_enabled(slot);
                hw.set_indicator(slot, enabled);
                sink.emit(&AppEvent::AlarmToggled { slot, enabled });
            }
        }
    }

    fn maybe_emit_status(&mut self, hw: &mut impl FeederHardware, sink: &mut impl EventSink) {
        let interval_ms = u64::from(self.config.status_interval_secs) * 1000;
        if interval_ms == 0 {
            return;
        }
        let now_ms = hw.now_ms();
        if now_ms.saturating_sub(self.last_status_ms) >= interval_ms {
            self.last_status_ms = now_ms;
            let status = self.status(hw);
            sink.emit(&AppEvent::Status(status));
        }
    }
}

/// Run a feed and report the outcome on `sink`.
fn feed_and_report(
    feeder: &mut FeedCoordinator,
    hw: &mut impl FeederHardware,
    trigger: FeedTrigger,
    sink: &mut impl EventSink,
) -> FeedOutcome {
    let outcome = feeder.feed(hw);
    match outcome {
        FeedOutcome::Fed => sink.emit(&AppEvent::Fed { trigger }),
        FeedOutcome::Suppressed { remaining_ms } => {
            sink.emit(&AppEvent::FeedSuppressed {
                trigger,
                remaining_ms,
            });
        }
    }
    outcome
}

// ───────────────────────────────────────────────────────────────
// MenuHost bridge
// ───────────────────────────────────────────────────────────────

/// Lends the service's parts to the menu for one step.
struct MenuBridge<'a, H, S> {
    hw: &'a mut H,
    sink: &'a mut S,
    scheduler: &'a mut AlarmScheduler,
    feeder: &'a mut FeedCoordinator,
}

impl<'a, H, S> MenuBridge<'a, H, S> {
    fn new(
        hw: &'a mut H,
        sink: &'a mut S,
        scheduler: &'a mut AlarmScheduler,
        feeder: &'a mut FeedCoordinator,
    ) -> Self {
        Self {
            hw,
            sink,
            scheduler,
            feeder,
        }
    }
}

impl<H: FeederHardware, S: EventSink> MenuHost for MenuBridge<'_, H, S> {
    type Display = H;

    fn display(&mut self) -> &mut H {
        &mut *self.hw
    }

    fn feed_now(&mut self) {
        feed_and_report(&mut *self.feeder, &mut *self.hw, FeedTrigger::Manual, &mut *self.sink);
    }

    fn clock_time(&mut self) -> TimeOfDay {
        self.hw.read_time()
    }

    fn alarm_time(&self, slot: AlarmSlotId) -> TimeOfDay {
        self.scheduler.slot(slot).time
    }

    fn commit_edit(&mut self, target: EditTarget, time: TimeOfDay) {
        match target {
            EditTarget::Clock => self.hw.write_time(time),
            EditTarget::Alarm(slot) => self.scheduler.set_slot_time(slot, time),
        }
        info!("Set {:?} to {}", target, time);
        self.sink.emit(&AppEvent::edit_committed(target, time));
    }
}

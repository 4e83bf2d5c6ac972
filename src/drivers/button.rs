//! Edge-latched button debouncer.
//!
//! ## Hardware
//!
//! Three momentary switches to 3V3 with internal pull-downs.  Each GPIO
//! fires on the rising edge; the ISR only records the raw timestamp into the
//! button's [`EdgeLatch`](crate::events::EdgeLatch).  [`InputDebouncer::poll`]
//! is called from a [`PeriodicTimer`](super::sample_timer::PeriodicTimer) at
//! the sample period (1 ms) and does the actual stability check, so no
//! interrupt handler ever blocks.
//!
//! ## Per-button state machine
//!
//! | State        | On sample                                  | Next          |
//! |--------------|--------------------------------------------|---------------|
//! | `Idle`       | edge latched                               | `Confirming`  |
//! | `Confirming` | low → discard                              | `Idle`        |
//! |              | high for the whole window → set press bit  | `Held`        |
//! | `Held`       | low (released)                             | `Idle`        |
//!
//! Edges latched while `Confirming` or `Held` are contact bounce of the
//! press already being tracked; they are drained and dropped.

use std::sync::Arc;

use log::{debug, trace};

use crate::app::ports::ButtonSource;
use crate::config::FeederConfig;
use crate::events::{Button, InputShared};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Confirming { edge_ms: u32, stable_samples: u32 },
    Held,
}

/// Debounce state for one button.
struct ButtonDebouncer<S> {
    button: Button,
    source: S,
    state: DebounceState,
}

impl<S: ButtonSource> ButtonDebouncer<S> {
    fn new(button: Button, source: S) -> Self {
        Self {
            button,
            source,
            state: DebounceState::Idle,
        }
    }

    fn poll(&mut self, shared: &InputShared, now_ms: u32, required_samples: u32) {
        let edge = shared.edge(self.button).take();
        if edge.is_some() {
            self.source.rearm();
        }

        match (self.state, edge) {
            (DebounceState::Idle, None) => return,
            (DebounceState::Idle, Some(edge_ms)) => {
                self.state = DebounceState::Confirming {
                    edge_ms,
                    stable_samples: 0,
                };
            }
            (_, Some(_)) => trace!("{:?}: bounce edge ignored", self.button),
            (_, None) => {}
        }

        let high = self.source.is_high();
        self.state = match self.state {
            DebounceState::Idle => DebounceState::Idle,
            DebounceState::Confirming {
                edge_ms,
                stable_samples,
            } => {
                if !high {
                    trace!(
                        "{:?}: rejected after {} stable samples",
                        self.button, stable_samples
                    );
                    DebounceState::Idle
                } else if stable_samples + 1 >= required_samples {
                    shared.presses().set(self.button);
                    debug!(
                        "{:?}: press confirmed ({} ms after edge)",
                        self.button,
                        now_ms.wrapping_sub(edge_ms)
                    );
                    DebounceState::Held
                } else {
                    DebounceState::Confirming {
                        edge_ms,
                        stable_samples: stable_samples + 1,
                    }
                }
            }
            DebounceState::Held if high => DebounceState::Held,
            DebounceState::Held => DebounceState::Idle,
        };
    }
}

/// Turns latched edges on the three front-panel buttons into validated
/// presses in the shared [`PressFlags`](crate::events::PressFlags).
pub struct InputDebouncer<S> {
    shared: Arc<InputShared>,
    buttons: [ButtonDebouncer<S>; 3],
    required_samples: u32,
    sample_ms: u32,
}

impl<S: ButtonSource> InputDebouncer<S> {
    /// `sources` are ordered left, right, center.
    pub fn new(shared: Arc<InputShared>, sources: [S; 3], config: &FeederConfig) -> Self {
        let [left, right, center] = sources;
        Self {
            shared,
            buttons: [
                ButtonDebouncer::new(Button::Left, left),
                ButtonDebouncer::new(Button::Right, right),
                ButtonDebouncer::new(Button::Center, center),
            ],
            required_samples: config.debounce_samples().max(1),
            sample_ms: config.debounce_sample_ms.max(1),
        }
    }

    /// Take one sample of every button.  Call once per sample period.
    pub fn poll(&mut self, now_ms: u32) {
        for button in &mut self.buttons {
            button.poll(&self.shared, now_ms, self.required_samples);
        }
    }

    /// Period at which [`poll`](Self::poll) must be called.
    pub fn sample_ms(&self) -> u32 {
        self.sample_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Pin whose level the test drives through a shared cell.
    #[derive(Clone)]
    struct FakePin {
        level: Rc<Cell<bool>>,
        rearms: Rc<Cell<u32>>,
    }

    impl FakePin {
        fn new() -> Self {
            Self {
                level: Rc::new(Cell::new(false)),
                rearms: Rc::new(Cell::new(0)),
            }
        }
    }

    impl ButtonSource for FakePin {
        fn is_high(&mut self) -> bool {
            self.level.get()
        }

        fn rearm(&mut self) {
            self.rearms.set(self.rearms.get() + 1);
        }
    }

    fn setup() -> (Arc<InputShared>, [FakePin; 3], InputDebouncer<FakePin>) {
        let shared = Arc::new(InputShared::new());
        let pins = [FakePin::new(), FakePin::new(), FakePin::new()];
        let deb = InputDebouncer::new(shared.clone(), pins.clone(), &FeederConfig::default());
        (shared, pins, deb)
    }

    /// Rising edge at `start`, high for `high_ms` samples, then low.
    fn pulse(
        shared: &InputShared,
        pin: &FakePin,
        deb: &mut InputDebouncer<FakePin>,
        button: Button,
        start: u32,
        high_ms: u32,
    ) -> u32 {
        pin.level.set(true);
        shared.record_edge(button, start);
        let mut now = start;
        for _ in 0..high_ms {
            deb.poll(now);
            now += 1;
        }
        pin.level.set(false);
        deb.poll(now);
        now + 1
    }

    #[test]
    fn no_presses_without_edges() {
        let (shared, pins, mut deb) = setup();
        pins[0].level.set(true); // level alone is not an edge
        for now in 0..50 {
            deb.poll(now);
        }
        assert!(shared.presses().take_all().is_empty());
    }

    #[test]
    fn stable_press_is_registered_once() {
        let (shared, pins, mut deb) = setup();
        pulse(&shared, &pins[2], &mut deb, Button::Center, 100, 40);
        let set = shared.presses().take_all();
        assert!(set.contains(Button::Center));
        assert!(!set.contains(Button::Left));
        assert!(shared.presses().take_all().is_empty());
        assert_eq!(pins[2].rearms.get(), 1);
    }

    #[test]
    fn short_glitch_is_discarded() {
        let (shared, pins, mut deb) = setup();
        pulse(&shared, &pins[0], &mut deb, Button::Left, 10, 19);
        assert!(shared.presses().take_all().is_empty());
    }

    #[test]
    fn window_is_exactly_twenty_samples() {
        let (shared, pins, mut deb) = setup();
        pulse(&shared, &pins[1], &mut deb, Button::Right, 10, 20);
        assert!(shared.presses().is_pending(Button::Right));
    }

    #[test]
    fn bounce_while_held_does_not_double_count() {
        let (shared, pins, mut deb) = setup();
        pins[1].level.set(true);
        shared.record_edge(Button::Right, 1);
        for now in 1..30 {
            deb.poll(now);
        }
        assert!(shared.presses().take_all().contains(Button::Right));

        // Contact chatter while still held down.
        for now in 30..80 {
            shared.record_edge(Button::Right, now);
            deb.poll(now);
        }
        assert!(shared.presses().take_all().is_empty());

        // Release, then a clean second press counts again.
        pins[1].level.set(false);
        deb.poll(80);
        pulse(&shared, &pins[1], &mut deb, Button::Right, 100, 25);
        assert!(shared.presses().take_all().contains(Button::Right));
    }

    #[test]
    fn release_bounce_is_rejected() {
        let (shared, pins, mut deb) = setup();
        let now = pulse(&shared, &pins[0], &mut deb, Button::Left, 1, 30);
        shared.presses().reset_all();
        // A 3 ms spike as the contact opens.
        pulse(&shared, &pins[0], &mut deb, Button::Left, now, 3);
        assert!(shared.presses().take_all().is_empty());
    }

    #[test]
    fn buttons_debounce_independently() {
        let (shared, pins, mut deb) = setup();
        pins[0].level.set(true);
        pins[2].level.set(true);
        shared.record_edge(Button::Left, 5);
        for now in 5..15 {
            deb.poll(now);
        }
        shared.record_edge(Button::Center, 15);
        for now in 15..40 {
            deb.poll(now);
        }
        let set = shared.presses().take_all();
        assert!(set.contains(Button::Left));
        assert!(set.contains(Button::Center));
    }
}

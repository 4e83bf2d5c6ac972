//! Interrupt-to-main-loop input cell.
//!
//! Two kinds of state cross from interrupt context into the control loop:
//!
//! - a raw **edge latch** per button, written by the GPIO ISR with the
//!   timestamp of the rising edge and drained by the debounce sampler;
//! - the **press set**, one bit per button, set by the debounce sampler once a
//!   press is confirmed and swapped out atomically by the control loop.
//!
//! ```text
//! ┌───────────┐  edge ts  ┌─────────────────┐  press bit  ┌─────────────┐
//! │ GPIO ISR  │──────────▶│ debounce sampler│────────────▶│  main loop  │
//! │ (x3 pins) │  (latch)  │  (1 ms samples) │ (press set) │ take_all()  │
//! └───────────┘           └─────────────────┘             └─────────────┘
//! ```
//!
//! Both live in one [`InputShared`] that is created once at boot and handed
//! to every party by `Arc`.  Nothing here blocks, so every method is safe to
//! call from an ISR.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

/// Front-panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    Left = 0,
    Right = 1,
    Center = 2,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Left, Button::Right, Button::Center];

    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// A single validated press, as consumed by the menu.
pub type ButtonEvent = Button;

// ── Press set ─────────────────────────────────────────────────

/// Snapshot of pending presses taken by [`PressFlags::take_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressSet(u8);

impl PressSet {
    pub const EMPTY: Self = Self(0);

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn with(self, button: Button) -> Self {
        Self(self.0 | button.mask())
    }

    /// Reduce the set to the one event a menu transition acts on.
    ///
    /// Right wins over Left, Left over Center.
    pub fn first_event(self) -> Option<ButtonEvent> {
        [Button::Right, Button::Left, Button::Center]
            .into_iter()
            .find(|b| self.contains(*b))
    }
}

/// Single-slot pending-press flags, one bit per button.
#[derive(Debug, Default)]
pub struct PressFlags {
    bits: AtomicU8,
}

impl PressFlags {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Record a validated press.  Idempotent while the bit is still pending.
    pub fn set(&self, button: Button) {
        self.bits.fetch_or(button.mask(), Ordering::AcqRel);
    }

    pub fn is_pending(&self, button: Button) -> bool {
        self.bits.load(Ordering::Acquire) & button.mask() != 0
    }

    /// Atomically read and clear every pending press.
    pub fn take_all(&self) -> PressSet {
        PressSet(self.bits.swap(0, Ordering::AcqRel))
    }

    /// Drop every pending press.
    pub fn reset_all(&self) {
        self.bits.store(0, Ordering::Release);
    }
}

// ── Edge latch ────────────────────────────────────────────────

/// Raw rising-edge timestamp (milliseconds since boot, truncated to `u32`).
/// Zero means "no edge pending".
#[derive(Debug, Default)]
pub struct EdgeLatch {
    timestamp_ms: AtomicU32,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            timestamp_ms: AtomicU32::new(0),
        }
    }

    /// ISR side: remember the latest edge.  A timestamp of 0 is nudged to 1
    /// so it can't be mistaken for "empty".
    pub fn record(&self, now_ms: u32) {
        self.timestamp_ms.store(now_ms.max(1), Ordering::Release);
    }

    /// Task side: take the pending edge, if any.
    pub fn take(&self) -> Option<u32> {
        match self.timestamp_ms.swap(0, Ordering::AcqRel) {
            0 => None,
            ts => Some(ts),
        }
    }
}

// ── Shared cell ───────────────────────────────────────────────

/// Everything the ISRs, the debounce sampler and the control loop share.
#[derive(Debug, Default)]
pub struct InputShared {
    edges: [EdgeLatch; 3],
    presses: PressFlags,
}

impl InputShared {
    pub const fn new() -> Self {
        Self {
            edges: [EdgeLatch::new(), EdgeLatch::new(), EdgeLatch::new()],
            presses: PressFlags::new(),
        }
    }

    /// ISR handler body: register on the button's rising edge.
    /// Safe to call from interrupt context (lock-free atomic store).
    pub fn record_edge(&self, button: Button, now_ms: u32) {
        self.edges[button as usize].record(now_ms);
    }

    pub fn edge(&self, button: Button) -> &EdgeLatch {
        &self.edges[button as usize]
    }

    pub fn presses(&self) -> &PressFlags {
        &self.presses
    }
}

//! Flags shared between radio-link callbacks and the main loop
//!
//! Both wrappers are written from callback (interrupt) context and read from
//! the application loop. They only expose `set`/`store` and
//! take-and-clear, so a consumer can never observe a half-updated value.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::protocol::RadioPayload;

/// One-word event flag with consume-once reads
pub struct EventFlag {
    raised: AtomicBool,
}

impl EventFlag {
    /// Create a cleared flag
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Raise the flag
    pub fn set(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Read the flag and clear it
    ///
    /// Returns `true` at most once per `set`.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }
}

impl Default for EventFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-slot mailbox for the last received radio payload
///
/// The producer writes the buffer before raising the ready flag; the
/// consumer only reads the buffer after observing the flag.
pub struct PayloadSlot {
    payload: Mutex<CriticalSectionRawMutex, Cell<RadioPayload>>,
    ready: AtomicBool,
}

impl PayloadSlot {
    /// Create an empty slot
    #[must_use]
    pub const fn new() -> Self {
        Self {
            payload: Mutex::new(Cell::new(RadioPayload::new([0; crate::config::RADIO_PAYLOAD_LEN]))),
            ready: AtomicBool::new(false),
        }
    }

    /// Store a payload and mark it ready; an unread payload is overwritten
    pub fn store(&self, payload: RadioPayload) {
        self.payload.lock(|cell| cell.set(payload));
        self.ready.store(true, Ordering::Release);
    }

    /// Take the pending payload, if any
    pub fn take(&self) -> Option<RadioPayload> {
        if self.ready.swap(false, Ordering::AcqRel) {
            Some(self.payload.lock(Cell::get))
        } else {
            None
        }
    }
}

impl Default for PayloadSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_starts_clear() {
        let flag = EventFlag::new();
        assert!(!flag.take());
    }

    #[test]
    fn flag_is_consumed_once() {
        let flag = EventFlag::new();
        flag.set();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn repeated_sets_collapse() {
        let flag = EventFlag::new();
        flag.set();
        flag.set();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn slot_empty_until_stored() {
        let slot = PayloadSlot::new();
        assert!(slot.take().is_none());
    }

    #[test]
    fn slot_hands_out_payload_once() {
        let slot = PayloadSlot::new();
        let payload = RadioPayload::new([1, 2, 3, 4, 5, 6]);
        slot.store(payload);
        assert_eq!(slot.take(), Some(payload));
        assert!(slot.take().is_none());
    }

    #[test]
    fn slot_keeps_latest_payload() {
        let slot = PayloadSlot::new();
        slot.store(RadioPayload::new([1; 6]));
        slot.store(RadioPayload::new([2; 6]));
        assert_eq!(slot.take(), Some(RadioPayload::new([2; 6])));
    }
}

//! In-memory switch driver
//!
//! Used by `relayd --mock` to run without relay hardware, and by tests. A
//! [`MockProbe`] observes the driver after it has been boxed and moved into
//! a registry.

use crate::switch_driver::SwitchDriver;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct MockState {
    on: AtomicBool,
    released: AtomicBool,
    writes: AtomicUsize,
    releases: AtomicUsize,
}

/// Switch driver that keeps its state in memory
#[derive(Debug)]
pub struct MockSwitch {
    pin: u8,
    state: Arc<MockState>,
}

impl MockSwitch {
    /// Create a mock driver for `pin`, initially off
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            state: Arc::new(MockState::default()),
        }
    }

    /// Handle observing this driver's state from outside
    pub fn probe(&self) -> MockProbe {
        MockProbe {
            state: Arc::clone(&self.state),
        }
    }

    fn write(&mut self, on: bool) {
        if self.state.released.load(Ordering::SeqCst) {
            return;
        }
        self.state.writes.fetch_add(1, Ordering::SeqCst);
        self.state.on.store(on, Ordering::SeqCst);
        debug!("Mock GPIO {} -> {}", self.pin, if on { "on" } else { "off" });
    }
}

impl SwitchDriver for MockSwitch {
    fn pin(&self) -> u8 {
        self.pin
    }

    fn turn_on(&mut self) {
        self.write(true);
    }

    fn turn_off(&mut self) {
        self.write(false);
    }

    fn toggle(&mut self) {
        let on = self.state.on.load(Ordering::SeqCst);
        self.write(!on);
    }

    fn is_on(&self) -> bool {
        self.state.on.load(Ordering::SeqCst)
    }

    fn release(&mut self) {
        self.state.releases.fetch_add(1, Ordering::SeqCst);
        if self.state.released.swap(true, Ordering::SeqCst) {
            return;
        }
        self.state.on.store(false, Ordering::SeqCst);
    }
}

/// Read-only view of a [`MockSwitch`]
#[derive(Debug, Clone)]
pub struct MockProbe {
    state: Arc<MockState>,
}

impl MockProbe {
    /// Current state of the mock relay
    pub fn is_on(&self) -> bool {
        self.state.on.load(Ordering::SeqCst)
    }

    /// Number of on/off/toggle writes that reached the driver
    pub fn writes(&self) -> usize {
        self.state.writes.load(Ordering::SeqCst)
    }

    /// Number of times `release` was called
    pub fn releases(&self) -> usize {
        self.state.releases.load(Ordering::SeqCst)
    }

    /// Whether the driver has been released
    pub fn is_released(&self) -> bool {
        self.state.released.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_off() {
        let switch = MockSwitch::new(6);
        assert!(!switch.is_on());
        assert_eq!(switch.pin(), 6);
        assert_eq!(switch.probe().writes(), 0);
    }

    #[test]
    fn test_on_off_idempotent() {
        let mut switch = MockSwitch::new(6);
        let probe = switch.probe();

        switch.turn_on();
        switch.turn_on();
        assert!(probe.is_on());

        switch.turn_off();
        switch.turn_off();
        assert!(!probe.is_on());

        // Every call reaches the driver, even when the state is unchanged
        assert_eq!(probe.writes(), 4);
    }

    #[test]
    fn test_toggle_is_own_inverse() {
        let mut switch = MockSwitch::new(13);

        switch.toggle();
        assert!(switch.is_on());
        switch.toggle();
        assert!(!switch.is_on());
    }

    #[test]
    fn test_release_turns_off_and_ignores_later_writes() {
        let mut switch = MockSwitch::new(19);
        let probe = switch.probe();

        switch.turn_on();
        switch.release();
        assert!(!probe.is_on());
        assert!(probe.is_released());

        switch.turn_on();
        assert!(!probe.is_on());
        assert_eq!(probe.writes(), 1);
    }

    #[test]
    fn test_release_counts_calls() {
        let mut switch = MockSwitch::new(26);
        let probe = switch.probe();

        switch.release();
        switch.release();
        assert_eq!(probe.releases(), 2);
    }
}

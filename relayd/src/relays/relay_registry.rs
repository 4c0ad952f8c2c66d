//! Relay registry
//!
//! Fixed, ordered collection of relays built once at startup. Relays are
//! addressed externally by 1-based [`RelayId`]; each relay's driver sits
//! behind its own lock so concurrent requests on one relay serialize.

use std::sync::atomic::{AtomicBool, Ordering};

use relayswitch_core::{RelayId, RelaySwitchError, Result};
use relayswitch_hardware::SwitchDriver;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A single relay entry in the registry
pub struct Relay {
    id: RelayId,
    pin: u8,
    driver: Mutex<Box<dyn SwitchDriver>>,
}

impl Relay {
    fn new(id: RelayId, driver: Box<dyn SwitchDriver>) -> Self {
        Self {
            id,
            pin: driver.pin(),
            driver: Mutex::new(driver),
        }
    }

    /// External 1-based id
    pub fn id(&self) -> RelayId {
        self.id
    }

    /// BCM pin driving this relay
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Turn the relay on
    pub async fn turn_on(&self) {
        let mut driver = self.driver.lock().await;
        driver.turn_on();
        debug!("Relay {} (GPIO {}) on", self.id, self.pin);
    }

    /// Turn the relay off
    pub async fn turn_off(&self) {
        let mut driver = self.driver.lock().await;
        driver.turn_off();
        debug!("Relay {} (GPIO {}) off", self.id, self.pin);
    }

    /// Toggle the relay and return the new state
    ///
    /// The read-back happens under the same lock as the toggle, so the
    /// returned state is the one this call produced.
    pub async fn toggle(&self) -> bool {
        let mut driver = self.driver.lock().await;
        driver.toggle();
        let on = driver.is_on();
        debug!("Relay {} (GPIO {}) toggled -> {}", self.id, self.pin, on);
        on
    }

    /// Current state
    pub async fn is_on(&self) -> bool {
        self.driver.lock().await.is_on()
    }
}

/// Registry of every relay on the board
pub struct RelayRegistry {
    relays: Vec<Relay>,
    released: AtomicBool,
}

impl RelayRegistry {
    /// Create a registry from drivers in relay order (first driver is relay 1)
    pub fn new(drivers: Vec<Box<dyn SwitchDriver>>) -> Self {
        let relays = drivers
            .into_iter()
            .enumerate()
            .map(|(index, driver)| Relay::new(RelayId::from_index(index), driver))
            .collect();

        Self {
            relays,
            released: AtomicBool::new(false),
        }
    }

    /// Number of relays
    pub fn len(&self) -> usize {
        self.relays.len()
    }

    /// Resolve an external id string
    pub fn resolve(&self, raw: &str) -> Result<RelayId> {
        RelayId::parse(raw, self.relays.len())
    }

    /// Get a relay by its external id string
    ///
    /// Returns [`RelaySwitchError::NotFound`] for anything that is not a
    /// plain unsigned integer in `1..=len()`.
    pub fn get(&self, raw: &str) -> Result<&Relay> {
        let id = self.resolve(raw)?;
        self.relay(id)
    }

    /// Get a relay by typed id
    pub fn relay(&self, id: RelayId) -> Result<&Relay> {
        self.relays
            .get(id.index())
            .ok_or_else(|| RelaySwitchError::NotFound(format!("relay {}", id)))
    }

    /// Iterate over all relays in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = &Relay> {
        self.relays.iter()
    }

    /// State of every relay in ordinal order
    pub async fn list(&self) -> Vec<(RelayId, bool)> {
        let mut states = Vec::with_capacity(self.relays.len());
        for relay in &self.relays {
            states.push((relay.id, relay.is_on().await));
        }
        states
    }

    /// Turn on the relay addressed by `raw`
    pub async fn turn_on(&self, raw: &str) -> Result<()> {
        self.get(raw)?.turn_on().await;
        Ok(())
    }

    /// Turn off the relay addressed by `raw`
    pub async fn turn_off(&self, raw: &str) -> Result<()> {
        self.get(raw)?.turn_off().await;
        Ok(())
    }

    /// Toggle the relay addressed by `raw`, returning its new state
    pub async fn toggle(&self, raw: &str) -> Result<bool> {
        Ok(self.get(raw)?.toggle().await)
    }

    /// Current state of the relay addressed by `raw`
    pub async fn state(&self, raw: &str) -> Result<bool> {
        Ok(self.get(raw)?.is_on().await)
    }

    /// Release every driver.
    ///
    /// Only the first call (including the implicit one on drop) releases;
    /// later calls return immediately.
    pub async fn release_all(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }

        for relay in &self.relays {
            relay.driver.lock().await.release();
            debug!("Relay {} (GPIO {}) released", relay.id, relay.pin);
        }
        info!("Released {} relay(s)", self.relays.len());
    }
}

impl Drop for RelayRegistry {
    fn drop(&mut self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }

        for relay in &mut self.relays {
            relay.driver.get_mut().release();
        }
        info!("Released {} relay(s) on drop", self.relays.len());
    }
}

//! Relay management for the daemon
//!
//! Owns the relay registry and the startup code that claims one switch
//! driver per configured pin.

mod relay_registry;

pub use relay_registry::RelayRegistry;

use relayswitch_core::{RelayBoardConfig, Result};
use relayswitch_hardware::{GpioSwitch, MockSwitch, SwitchDriver};
use tracing::{debug, info};

/// Build the registry for the configured board.
///
/// Drivers are created in pin-list order, all initially off. If claiming a
/// pin fails, the drivers created so far are released before the error is
/// returned.
pub fn build_registry(config: &RelayBoardConfig, mock: bool) -> Result<RelayRegistry> {
    build_with(config, |pin| {
        if mock {
            Ok(Box::new(MockSwitch::new(pin)) as Box<dyn SwitchDriver>)
        } else {
            GpioSwitch::new(pin, config.active_high).map(|s| Box::new(s) as Box<dyn SwitchDriver>)
        }
    })
}

fn build_with<F>(config: &RelayBoardConfig, mut factory: F) -> Result<RelayRegistry>
where
    F: FnMut(u8) -> Result<Box<dyn SwitchDriver>>,
{
    info!(
        "Initializing {} relay(s) on GPIO {:?} ({})",
        config.pins.len(),
        config.pins,
        if config.active_high {
            "active high"
        } else {
            "active low"
        }
    );

    let mut drivers: Vec<Box<dyn SwitchDriver>> = Vec::with_capacity(config.pins.len());
    for &pin in &config.pins {
        debug!("Initializing GPIO {}", pin);
        match factory(pin) {
            Ok(driver) => drivers.push(driver),
            Err(e) => {
                for driver in &mut drivers {
                    driver.release();
                }
                return Err(e);
            }
        }
    }

    Ok(RelayRegistry::new(drivers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relayswitch_core::RelaySwitchError;
    use relayswitch_hardware::MockProbe;

    #[test]
    fn test_build_mock_registry() {
        let config = RelayBoardConfig::default();
        let registry = build_registry(&config, true).unwrap();

        assert_eq!(registry.len(), 4);
        let pins: Vec<u8> = registry.iter().map(|r| r.pin()).collect();
        assert_eq!(pins, config.pins);
    }

    #[test]
    fn test_failed_pin_releases_earlier_drivers() {
        let config = RelayBoardConfig {
            pins: vec![6, 13, 19],
            active_high: false,
            default_relay: 0,
        };
        let mut probes: Vec<MockProbe> = Vec::new();

        let result = build_with(&config, |pin| {
            if pin == 19 {
                return Err(RelaySwitchError::Gpio("pin busy".to_string()));
            }
            let switch = MockSwitch::new(pin);
            probes.push(switch.probe());
            Ok(Box::new(switch) as Box<dyn SwitchDriver>)
        });

        assert!(matches!(result, Err(RelaySwitchError::Gpio(_))));
        assert_eq!(probes.len(), 2);
        assert!(probes.iter().all(|p| p.releases() == 1));
    }
}

//! GPIO-backed switch driver
//!
//! Drives a relay board input through the Raspberry Pi GPIO peripheral.

use crate::switch_driver::SwitchDriver;
use relayswitch_core::{RelaySwitchError, Result};
use rppal::gpio::{Gpio, OutputPin};
use tracing::{debug, warn};

/// Relay driven by a single BCM output pin
pub struct GpioSwitch {
    pin_number: u8,
    active_high: bool,
    output: Option<OutputPin>,
}

impl GpioSwitch {
    /// Claim `pin` as an output and drive it to the "off" level.
    ///
    /// # Arguments
    /// * `pin` - BCM pin number
    /// * `active_high` - `true` if the relay closes on a high level,
    ///   `false` for the usual active-low relay modules
    pub fn new(pin: u8, active_high: bool) -> Result<Self> {
        debug!(
            "Initializing GPIO {} ({})",
            pin,
            if active_high { "active high" } else { "active low" }
        );

        let gpio = Gpio::new().map_err(|e| {
            RelaySwitchError::Gpio(format!("Failed to access GPIO peripheral: {}", e))
        })?;

        let handle = gpio
            .get(pin)
            .map_err(|e| RelaySwitchError::Gpio(format!("Failed to claim GPIO {}: {}", pin, e)))?;

        // Start in the off state without a glitch through the on level
        let output = if active_high {
            handle.into_output_low()
        } else {
            handle.into_output_high()
        };

        Ok(Self {
            pin_number: pin,
            active_high,
            output: Some(output),
        })
    }

    fn set_on(&mut self, on: bool) {
        let active_high = self.active_high;
        let Some(output) = self.output.as_mut() else {
            warn!("GPIO {} already released, ignoring write", self.pin_number);
            return;
        };

        if on == active_high {
            output.set_high();
        } else {
            output.set_low();
        }
    }
}

impl SwitchDriver for GpioSwitch {
    fn pin(&self) -> u8 {
        self.pin_number
    }

    fn turn_on(&mut self) {
        self.set_on(true);
    }

    fn turn_off(&mut self) {
        self.set_on(false);
    }

    fn toggle(&mut self) {
        match self.output.as_mut() {
            Some(output) => output.toggle(),
            None => warn!("GPIO {} already released, ignoring toggle", self.pin_number),
        }
    }

    fn is_on(&self) -> bool {
        self.output
            .as_ref()
            .is_some_and(|output| output.is_set_high() == self.active_high)
    }

    fn release(&mut self) {
        if self.output.is_none() {
            return;
        }

        self.set_on(false);
        // Dropping the OutputPin restores the pin's original mode
        self.output = None;
        debug!("GPIO {} released", self.pin_number);
    }
}

impl Drop for GpioSwitch {
    fn drop(&mut self) {
        self.release();
    }
}

//! Switch driver abstraction
//!
//! One driver owns one output pin and turns logical on/off commands into pin
//! levels. Drivers are infallible once constructed: acquiring the pin is the
//! only step that can fail.

/// Trait for binary switch drivers
///
/// This trait decouples the relay registry from the GPIO backend so it can be
/// exercised with [`crate::MockSwitch`] instead of real hardware.
pub trait SwitchDriver: Send {
    /// BCM number of the pin this driver owns
    fn pin(&self) -> u8;

    /// Drive the relay to its "on" level
    fn turn_on(&mut self);

    /// Drive the relay to its "off" level
    fn turn_off(&mut self);

    /// Invert the current state
    fn toggle(&mut self);

    /// Whether the relay is currently driven on
    fn is_on(&self) -> bool;

    /// Turn the relay off and hand the pin back.
    ///
    /// After release every other call is a no-op and [`SwitchDriver::is_on`]
    /// reports `false`. Releasing twice has no further effect.
    fn release(&mut self);
}

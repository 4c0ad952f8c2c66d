//! relayswitch-hardware
//!
//! Hardware abstraction crate containing the switch driver trait and its
//! implementations. The daemon builds one driver per configured relay pin.
//!
//! Public API:
//! - `switch_driver::SwitchDriver`: capability set of a single relay
//! - `gpio_switch::GpioSwitch`: driver backed by a Raspberry Pi GPIO pin
//! - `mock_switch::MockSwitch`: in-memory driver for mock mode and tests

pub mod gpio_switch;
pub mod mock_switch;
pub mod switch_driver;

pub use gpio_switch::GpioSwitch;
pub use mock_switch::{MockProbe, MockSwitch};
pub use switch_driver::SwitchDriver;

//! Core types for relay addressing and switch commands

use crate::error::{RelaySwitchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// External 1-based relay identifier.
///
/// Relay `n` is the `n`-th entry of the configured pin list and lives at
/// internal index `n - 1`. A `RelayId` obtained from [`RelayId::parse`] is
/// always valid for the relay count it was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelayId(NonZeroUsize);

impl RelayId {
    /// Parse an external relay id and check it against the relay count.
    ///
    /// Only plain ASCII digits are accepted: no sign, no whitespace and no
    /// trailing characters. Leading zeros are allowed. Zero, values above
    /// `relay_count` and anything unparseable are [`RelaySwitchError::NotFound`].
    pub fn parse(raw: &str, relay_count: usize) -> Result<Self> {
        let not_found = || RelaySwitchError::NotFound(format!("relay '{}'", raw));

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_found());
        }

        let value = raw.parse::<usize>().map_err(|_| not_found())?;
        if value > relay_count {
            return Err(not_found());
        }

        NonZeroUsize::new(value).map(Self).ok_or_else(not_found)
    }

    /// Relay id for a 0-based internal index
    pub fn from_index(index: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(index))
    }

    /// The external 1-based value
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// The internal 0-based index
    pub fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for RelayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target state requested through the legacy set-state call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCommand {
    /// Energize the relay
    On,
    /// De-energize the relay
    Off,
}

impl SwitchCommand {
    /// Interpret the myStrom `state` query value.
    ///
    /// Exactly `"1"` and `"0"` are recognized. Every other value, including a
    /// missing one, is [`RelaySwitchError::NotFound`] rather than a
    /// validation error; existing myStrom clients depend on that.
    pub fn from_legacy_state(state: Option<&str>) -> Result<Self> {
        match state {
            Some("1") => Ok(SwitchCommand::On),
            Some("0") => Ok(SwitchCommand::Off),
            Some(other) => Err(RelaySwitchError::NotFound(format!(
                "state '{}'",
                other
            ))),
            None => Err(RelaySwitchError::NotFound("missing state".to_string())),
        }
    }
}

//! Message classification

use crate::document::Action;
use crate::error::ContractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification attached to a discovered message type
///
/// Determines the direction of the generated operation: events are received,
/// commands are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Event,
    Command,
}

impl Classification {
    /// The operation action for this classification
    pub fn action(self) -> Action {
        match self {
            Classification::Event => Action::Receive,
            Classification::Command => Action::Send,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Event => "event",
            Classification::Command => "command",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "event" => Ok(Classification::Event),
            "command" => Ok(Classification::Command),
            other => Err(ContractError::configuration(format!(
                "unknown classification '{}' (expected 'event' or 'command')",
                other
            ))),
        }
    }
}

//! Ports for maritime trade.
//!
//! A port sits on the junctions at both ends of a coastal side. The board only
//! records where ports are; exchange itself is the trading rules' concern.

use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Port types for maritime trading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Port {
    /// 3:1 trade for any resource
    Any,
    /// 2:1 trade for one specific resource
    Only(Resource),
}

impl Port {
    /// How many of a resource are given for one card
    pub fn rate(&self) -> u32 {
        match self {
            Port::Any => 3,
            Port::Only(_) => 2,
        }
    }

    /// Whether `resource` can be traded away at this port
    pub fn accepts(&self, resource: Resource) -> bool {
        match self {
            Port::Any => true,
            Port::Only(only) => *only == resource,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Any => write!(f, "{}:1 any", self.rate()),
            Port::Only(resource) => write!(f, "{}:1 {}", self.rate(), resource),
        }
    }
}

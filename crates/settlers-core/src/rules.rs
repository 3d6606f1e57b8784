//! Placement rule configuration.
//!
//! The board graph consults a `PlacementRules` value for the rules that vary
//! between house variants. Loading it from a file or environment is up to the
//! embedding application; missing fields fall back to the standard rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRules {
    /// Reject settlements and cities next to an occupied junction
    pub enforce_distance_rule: bool,

    /// Require a connecting road for settlements during setup as well
    pub setup_requires_connection: bool,
}

impl PlacementRules {
    /// Standard rules
    pub const fn standard() -> Self {
        Self {
            enforce_distance_rule: true,
            setup_requires_connection: false,
        }
    }

    /// No distance rule; connectivity still applies once setup ends
    pub const fn relaxed() -> Self {
        Self {
            enforce_distance_rule: false,
            setup_requires_connection: false,
        }
    }
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self::standard()
    }
}

//! Placeable and ownable artifacts.

use crate::node::NodeType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something a player can build or buy.
///
/// A building carries no owner or location. Placement is recorded by the
/// board graph as an [`Occupancy`](crate::node::Occupancy) on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Building {
    Road,
    Settlement,
    City,
    /// Held in a player's hand, never bound to a node
    DevelopmentCard,
}

impl Building {
    /// All building types
    pub const ALL: [Building; 4] = [
        Building::Road,
        Building::Settlement,
        Building::City,
        Building::DevelopmentCard,
    ];

    /// Stable display name
    pub fn name(&self) -> &'static str {
        match self {
            Building::Road => "Road",
            Building::Settlement => "Settlement",
            Building::City => "City",
            Building::DevelopmentCard => "DevelopmentCard",
        }
    }

    /// The node type that can hold this building, if any
    pub fn node_type(&self) -> Option<NodeType> {
        match self {
            Building::Road => Some(NodeType::Road),
            Building::Settlement | Building::City => Some(NodeType::Junction),
            Building::DevelopmentCard => None,
        }
    }

    /// Resources received per producing hex
    pub fn yield_multiplier(&self) -> u32 {
        match self {
            Building::Settlement => 1,
            Building::City => 2,
            Building::Road | Building::DevelopmentCard => 0,
        }
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Building::ALL.iter().map(|b| b.to_string()).collect();
        assert_eq!(names.len(), Building::ALL.len());
    }

    #[test]
    fn test_development_card_has_no_node() {
        assert_eq!(Building::DevelopmentCard.node_type(), None);
        assert_eq!(Building::City.node_type(), Some(NodeType::Junction));
    }

    #[test]
    fn test_city_yields_double() {
        assert_eq!(
            Building::City.yield_multiplier(),
            2 * Building::Settlement.yield_multiplier()
        );
    }
}

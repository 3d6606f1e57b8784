//! Resource types and resource counters.
//!
//! This module contains:
//! - The five tradeable resources
//! - `ResourceCounts`, a sparse counter keyed by resource

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tradeable goods produced by hexes.
///
/// Ordering follows declaration order and only exists so that iteration and
/// rendering are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Brick,
    Ore,
    Sheep,
    Wheat,
    Wood,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Brick,
        Resource::Ore,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Wood,
    ];

    /// Stable display name
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Brick => "Brick",
            Resource::Ore => "Ore",
            Resource::Sheep => "Sheep",
            Resource::Wheat => "Wheat",
            Resource::Wood => "Wood",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A counter of resources.
///
/// Absent entries read as zero and counts saturate at `u32::MAX`. Entries
/// that reach zero through [`ResourceCounts::decrement`] are kept, so two
/// counters holding the same amounts may still differ structurally; compare
/// through [`get`] when that matters.
///
/// [`get`]: ResourceCounts::get
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCounts {
    counts: BTreeMap<Resource, u32>,
}

impl ResourceCounts {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter holding a single resource
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut counts = Self::new();
        counts.increment(resource, amount);
        counts
    }

    /// Current count of a resource, zero when absent
    pub fn get(&self, resource: Resource) -> u32 {
        self.counts.get(&resource).copied().unwrap_or(0)
    }

    /// Add `amount` of `resource`, creating the entry if needed.
    ///
    /// Counts saturate at `u32::MAX` instead of overflowing.
    pub fn increment(&mut self, resource: Resource, amount: u32) {
        let count = self.counts.entry(resource).or_insert(0);
        *count = count.saturating_add(amount);
    }

    /// Remove `amount` of `resource`.
    ///
    /// Fails without touching the count when `amount` exceeds the balance.
    pub fn decrement(&mut self, resource: Resource, amount: u32) -> Result<()> {
        let available = self.get(resource);
        if amount > available {
            return Err(GameError::InsufficientResource {
                resource,
                requested: amount,
                available,
            });
        }
        if let Some(count) = self.counts.get_mut(&resource) {
            *count -= amount;
        }
        Ok(())
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.counts
            .values()
            .fold(0u32, |total, count| total.saturating_add(*count))
    }

    /// Check if every count is zero
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero entries in resource order
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(&resource, &count)| (resource, count))
    }

    /// Add every entry of `other` to this counter
    pub fn merge(&mut self, other: &ResourceCounts) {
        for (resource, amount) in other.iter() {
            self.increment(resource, amount);
        }
    }

    /// Check if this counter covers `cost`
    pub fn can_afford(&self, cost: &ResourceCounts) -> bool {
        cost.iter().all(|(resource, amount)| self.get(resource) >= amount)
    }

    /// Subtract a whole cost, or nothing at all
    pub fn try_spend(&mut self, cost: &ResourceCounts) -> Result<()> {
        if let Some((resource, requested)) = cost
            .iter()
            .find(|(resource, amount)| self.get(*resource) < *amount)
        {
            return Err(GameError::InsufficientResource {
                resource,
                requested,
                available: self.get(resource),
            });
        }
        for (resource, amount) in cost.iter() {
            self.decrement(resource, amount)?;
        }
        Ok(())
    }

    /// Every count is at most the other's and at least one is strictly less
    pub fn is_strictly_below(&self, other: &ResourceCounts) -> bool {
        let mut strictly = false;
        for resource in Resource::ALL {
            let (mine, theirs) = (self.get(resource), other.get(resource));
            if mine > theirs {
                return false;
            }
            strictly |= mine < theirs;
        }
        strictly
    }
}

impl FromIterator<(Resource, u32)> for ResourceCounts {
    fn from_iter<I: IntoIterator<Item = (Resource, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (resource, amount) in iter {
            counts.increment(resource, amount);
        }
        counts
    }
}

impl fmt::Display for ResourceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceCounts{{ ")?;
        for (i, (resource, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", resource, count)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_get_absent_is_zero() {
        let counts = ResourceCounts::new();
        for resource in Resource::ALL {
            assert_eq!(counts.get(resource), 0);
        }
        assert!(counts.is_empty());
    }

    #[test]
    fn test_increment_creates_entry() {
        let mut counts = ResourceCounts::new();
        counts.increment(Resource::Wood, 2);
        counts.increment(Resource::Wood, 3);
        assert_eq!(counts.get(Resource::Wood), 5);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_increment_saturates() {
        let mut counts = ResourceCounts::single(Resource::Wood, u32::MAX);
        counts.increment(Resource::Wood, 1);
        assert_eq!(counts.get(Resource::Wood), u32::MAX);
        counts.increment(Resource::Ore, 2);
        assert_eq!(counts.total(), u32::MAX);

        let mut merged = ResourceCounts::single(Resource::Wood, u32::MAX - 1);
        merged.merge(&ResourceCounts::single(Resource::Wood, 5));
        assert_eq!(merged.get(Resource::Wood), u32::MAX);

        merged.decrement(Resource::Wood, u32::MAX).unwrap();
        assert_eq!(merged.get(Resource::Wood), 0);
    }

    #[test]
    fn test_decrement_to_zero_keeps_entry() {
        let mut counts = ResourceCounts::single(Resource::Ore, 2);
        counts.decrement(Resource::Ore, 2).unwrap();
        assert_eq!(counts.get(Resource::Ore), 0);
        assert_eq!(counts.to_string(), "ResourceCounts{ Ore: 0 }");
    }

    #[test]
    fn test_decrement_insufficient_is_atomic() {
        let mut counts = ResourceCounts::single(Resource::Sheep, 1);
        let err = counts.decrement(Resource::Sheep, 2).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientResource {
                resource: Resource::Sheep,
                requested: 2,
                available: 1,
            }
        );
        assert_eq!(counts.get(Resource::Sheep), 1);
    }

    #[test]
    fn test_decrement_absent_resource() {
        let mut counts = ResourceCounts::new();
        assert!(counts.decrement(Resource::Brick, 1).is_err());
        assert!(counts.decrement(Resource::Brick, 0).is_ok());
    }

    #[test]
    fn test_try_spend_all_or_nothing() {
        let mut hand: ResourceCounts = [(Resource::Brick, 1), (Resource::Wood, 1)]
            .into_iter()
            .collect();
        let settlement: ResourceCounts = [
            (Resource::Brick, 1),
            (Resource::Wood, 1),
            (Resource::Wheat, 1),
            (Resource::Sheep, 1),
        ]
        .into_iter()
        .collect();

        assert!(!hand.can_afford(&settlement));
        assert!(hand.try_spend(&settlement).is_err());
        assert_eq!(hand.get(Resource::Brick), 1);
        assert_eq!(hand.get(Resource::Wood), 1);

        let road: ResourceCounts = [(Resource::Brick, 1), (Resource::Wood, 1)]
            .into_iter()
            .collect();
        hand.try_spend(&road).unwrap();
        assert!(hand.is_empty());
    }

    #[test]
    fn test_strict_partial_order() {
        let empty = ResourceCounts::new();
        let zero_brick = ResourceCounts::single(Resource::Brick, 0);
        let one_brick = ResourceCounts::single(Resource::Brick, 1);
        let brick_and_ore: ResourceCounts = [(Resource::Brick, 1), (Resource::Ore, 1)]
            .into_iter()
            .collect();
        let lots_of_ore: ResourceCounts = [(Resource::Brick, 0), (Resource::Ore, 9)]
            .into_iter()
            .collect();

        assert!(!empty.is_strictly_below(&empty));
        assert!(!empty.is_strictly_below(&zero_brick));
        assert!(empty.is_strictly_below(&one_brick));
        assert!(zero_brick.is_strictly_below(&one_brick));
        assert!(!one_brick.is_strictly_below(&one_brick));
        assert!(!one_brick.is_strictly_below(&zero_brick));
        assert!(one_brick.is_strictly_below(&brick_and_ore));
        assert!(!lots_of_ore.is_strictly_below(&brick_and_ore));
    }

    #[test]
    fn test_display_ordering() {
        let counts: ResourceCounts = [(Resource::Wood, 3), (Resource::Brick, 1)]
            .into_iter()
            .collect();
        assert_eq!(counts.to_string(), "ResourceCounts{ Brick: 1, Wood: 3 }");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Inc(Resource, u32),
        Dec(Resource, u32),
    }

    fn resource() -> impl Strategy<Value = Resource> {
        prop::sample::select(Resource::ALL.to_vec())
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (resource(), 0u32..20).prop_map(|(r, n)| Op::Inc(r, n)),
            (resource(), 0u32..20).prop_map(|(r, n)| Op::Dec(r, n)),
        ]
    }

    proptest! {
        #[test]
        fn prop_counts_track_net_sum(ops in prop::collection::vec(op(), 0..64)) {
            let mut counts = ResourceCounts::new();
            let mut expected = [0u32; 5];

            for op in ops {
                match op {
                    Op::Inc(r, n) => {
                        counts.increment(r, n);
                        expected[r as usize] += n;
                    }
                    Op::Dec(r, n) => {
                        let before = counts.get(r);
                        let result = counts.decrement(r, n);
                        if n > expected[r as usize] {
                            prop_assert!(result.is_err());
                            prop_assert_eq!(counts.get(r), before);
                        } else {
                            prop_assert!(result.is_ok());
                            expected[r as usize] -= n;
                        }
                    }
                }
            }

            for r in Resource::ALL {
                prop_assert_eq!(counts.get(r), expected[r as usize]);
            }
        }
    }
}

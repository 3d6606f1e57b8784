//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the coordinate types used to derive board topology:
//! - `HexCoord`: Identifies individual hex tiles
//! - `Corner`: A point where three hexes meet (becomes a junction)
//! - `Side`: The border between two hexes (becomes a road)
//!
//! Corners and sides are identified by the sorted set of hexes touching them,
//! so the same point described from any of its hexes compares equal.

use serde::{Deserialize, Serialize};

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The six neighboring hexes, going round counter-clockwise from East.
    ///
    /// Consecutive entries (wrapping) are neighbours of each other.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r),     // East
            HexCoord::new(self.q + 1, self.r - 1), // NorthEast
            HexCoord::new(self.q, self.r - 1),     // NorthWest
            HexCoord::new(self.q - 1, self.r),     // West
            HexCoord::new(self.q - 1, self.r + 1), // SouthWest
            HexCoord::new(self.q, self.r + 1),     // SouthEast
        ]
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Get all six corners of this hex
    pub fn corners(&self) -> [Corner; 6] {
        let n = self.neighbors();
        std::array::from_fn(|i| Corner::new(*self, n[i], n[(i + 1) % 6]))
    }

    /// Get all six sides of this hex
    pub fn sides(&self) -> [Side; 6] {
        self.neighbors().map(|n| Side::new(*self, n))
    }

    /// All hexes within `radius` steps of this one, in coordinate order
    pub fn within(&self, radius: u32) -> Vec<HexCoord> {
        let r = radius as i32;
        let mut hexes = Vec::new();
        for dq in -r..=r {
            for dr in (-r).max(-dq - r)..=r.min(-dq + r) {
                hexes.push(HexCoord::new(self.q + dq, self.r + dr));
            }
        }
        hexes
    }
}

/// A corner where three mutually adjacent hexes meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Corner([HexCoord; 3]);

impl Corner {
    /// Create a corner from its three hexes, in any order
    pub fn new(a: HexCoord, b: HexCoord, c: HexCoord) -> Self {
        let mut hexes = [a, b, c];
        hexes.sort();
        Self(hexes)
    }

    /// The three hexes touching this corner
    pub fn hexes(&self) -> [HexCoord; 3] {
        self.0
    }

    /// The three sides that meet at this corner
    pub fn sides(&self) -> [Side; 3] {
        let [a, b, c] = self.0;
        [Side::new(a, b), Side::new(a, c), Side::new(b, c)]
    }
}

/// The border shared by two adjacent hexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Side([HexCoord; 2]);

impl Side {
    /// Create a side from its two hexes, in any order
    pub fn new(a: HexCoord, b: HexCoord) -> Self {
        if a <= b {
            Self([a, b])
        } else {
            Self([b, a])
        }
    }

    /// The two hexes sharing this side
    pub fn hexes(&self) -> [HexCoord; 2] {
        self.0
    }

    /// The two corners at the ends of this side
    pub fn endpoints(&self) -> [Corner; 2] {
        let [a, b] = self.0;
        let mut shared = a
            .neighbors()
            .into_iter()
            .filter(|h| h.distance_to(&b) == 1);
        // Two adjacent hexes always share exactly two neighbours
        let first = shared.next().unwrap_or(a);
        let second = shared.next().unwrap_or(b);
        [Corner::new(a, b, first), Corner::new(a, b, second)]
    }
}

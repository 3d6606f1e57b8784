//! Rules and topology kernel for a settlers-style board game.
//!
//! This crate provides:
//! - Resources and resource counters
//! - Buildings and the node types that may hold them
//! - A board graph with placement validation and dice-driven production
//! - Two six-sided dice
//!
//! # Architecture
//!
//! The board is an arena of typed nodes (hexes, desert, ocean, junctions, roads)
//! connected by adjacency sets and addressed by stable [`NodeId`]s. Board
//! generation fills the graph through [`BoardGraphBuilder`] or derives it from
//! hex coordinates with [`HexLayout`]. The turn driver then rolls [`Dice`],
//! asks the graph where buildings may go, and hands it the players'
//! [`ResourceCounts`] to credit production.
//!
//! Turn order, trading, scoring and transport live outside this crate.
//!
//! # Modules
//!
//! - [`resource`]: Resources and counters
//! - [`building`]: Placeable artifacts
//! - [`node`]: Node types and graph nodes
//! - [`graph`]: The board graph
//! - [`port`]: Maritime trade ports
//! - [`hex`]: Axial hex coordinates
//! - [`layout`]: Building a graph from hex coordinates
//! - [`dice`]: The dice
//! - [`rules`]: Placement rule configuration
//! - [`error`]: Error type

pub mod building;
pub mod dice;
pub mod error;
pub mod graph;
pub mod hex;
pub mod layout;
pub mod node;
pub mod port;
pub mod resource;
pub mod rules;

// Re-export commonly used types
pub use building::Building;
pub use dice::Dice;
pub use error::{GameError, PlacementViolation, Result};
pub use graph::{BoardGraph, BoardGraphBuilder, Distribution};
pub use hex::{Corner, HexCoord, Side};
pub use layout::{HexLayout, LayoutIndex, TileSpec};
pub use node::{Node, NodeId, NodeType, Occupancy, PlayerId};
pub use port::Port;
pub use resource::{Resource, ResourceCounts};
pub use rules::PlacementRules;

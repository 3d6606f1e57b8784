//! Errors returned by the board, counters and dice.
//!
//! Every failure here is an expected gameplay edge case or a caller bug that
//! is reported synchronously. Nothing is retried and nothing is fatal.

use crate::building::Building;
use crate::hex::Side;
use crate::node::NodeId;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GameError>;

/// Why a placement request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementViolation {
    /// The node's type cannot hold this building
    WrongNodeType,
    /// Something is already built here
    Occupied,
    /// Not attached to the owner's network
    NotConnected,
    /// A neighbouring junction is already settled
    TooClose,
    /// City upgrade on something other than the owner's settlement
    NotOwnSettlement,
    /// The building never sits on the board (development cards)
    NotPlaceable,
}

impl fmt::Display for PlacementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PlacementViolation::WrongNodeType => "node type cannot hold this building",
            PlacementViolation::Occupied => "node is already occupied",
            PlacementViolation::NotConnected => "not connected to the owner's network",
            PlacementViolation::TooClose => "too close to another building",
            PlacementViolation::NotOwnSettlement => "no settlement of this owner to upgrade",
            PlacementViolation::NotPlaceable => "building is never placed on the board",
        };
        f.write_str(text)
    }
}

/// Errors that can occur when querying or mutating core state
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Insufficient {resource}: requested {requested}, available {available}")]
    InsufficientResource {
        resource: Resource,
        requested: u32,
        available: u32,
    },

    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("Cannot place {building} at node {node}: {reason}")]
    IllegalPlacement {
        building: Building,
        node: NodeId,
        reason: PlacementViolation,
    },

    #[error("Node {0} is already revealed")]
    AlreadyRevealed(NodeId),

    #[error("Node {0} is not an unflipped hex")]
    NotRevealable(NodeId),

    #[error("Node {0} is not a hex")]
    NotAHex(NodeId),

    #[error("Trigger number {0} is outside 2-12")]
    InvalidTrigger(u8),

    #[error("Die face {0} is outside 1-6")]
    InvalidDieFace(u8),

    #[error("Node {0} cannot be connected to itself")]
    SelfLoop(NodeId),

    #[error("Node {0} is not a junction")]
    NotAJunction(NodeId),

    #[error("Port side {0:?} does not have a junction at both ends")]
    PortOffBoard(Side),

    #[error("Invalid board data at node {node}: {problem}")]
    InvalidBoard { node: NodeId, problem: String },
}

//! Board-graph nodes.
//!
//! A node is a tile (hex, unflipped hex, desert, ocean), a junction where
//! settlements and cities sit, or a road slot between two junctions. Nodes live in the
//! [`BoardGraph`](crate::graph::BoardGraph) arena and refer to each other by
//! [`NodeId`].

use crate::building::Building;
use crate::error::{GameError, Result};
use crate::port::Port;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable index of a node in the board arena
pub type NodeId = usize;

/// Player identifier
pub type PlayerId = u8;

/// Valid trigger numbers for a hex
pub const TRIGGER_RANGE: std::ops::RangeInclusive<u8> = 2..=12;

/// Kind of board-graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Revealed resource tile
    Hex,
    /// Non-producing boundary tile
    Ocean,
    /// Corner where settlements and cities are built
    Junction,
    /// Side between two junctions where roads are built
    Road,
    /// Resource tile that has not been revealed yet
    UnflippedHex,
    /// Land tile that never produces; the robber starts here
    Desert,
}

impl NodeType {
    /// All node types
    pub const ALL: [NodeType; 6] = [
        NodeType::Hex,
        NodeType::Ocean,
        NodeType::Junction,
        NodeType::Road,
        NodeType::UnflippedHex,
        NodeType::Desert,
    ];

    /// Stable display name
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Hex => "Hex",
            NodeType::Ocean => "Ocean",
            NodeType::Junction => "Junction",
            NodeType::Road => "Road",
            NodeType::UnflippedHex => "UnflippedHex",
            NodeType::Desert => "Desert",
        }
    }

    /// Whether a node of this type may hold `building`
    pub fn can_hold(&self, building: Building) -> bool {
        matches!(
            (self, building),
            (NodeType::Junction, Building::Settlement)
                | (NodeType::Junction, Building::City)
                | (NodeType::Road, Building::Road)
        )
    }

    /// Whether this node type yields resources on a matching roll
    pub fn produces(&self) -> bool {
        matches!(self, NodeType::Hex)
    }

    /// Tiles are the hex-shaped nodes
    pub fn is_tile(&self) -> bool {
        matches!(
            self,
            NodeType::Hex | NodeType::UnflippedHex | NodeType::Desert | NodeType::Ocean
        )
    }

    /// Land tiles, the only places the robber may stand
    pub fn can_hold_robber(&self) -> bool {
        matches!(self, NodeType::Hex | NodeType::UnflippedHex | NodeType::Desert)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A building on the board together with its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupancy {
    pub owner: PlayerId,
    pub building: Building,
}

impl Occupancy {
    pub fn new(owner: PlayerId, building: Building) -> Self {
        Self { owner, building }
    }
}

/// A single node of the board graph.
///
/// Fields are private so the per-type invariants hold: only hexes carry a
/// resource and trigger, only junctions and roads carry occupancy, and only
/// junctions carry a port. Deserialization checks the same invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    id: NodeId,
    node_type: NodeType,
    resource: Option<Resource>,
    trigger: Option<u8>,
    neighbors: BTreeSet<NodeId>,
    occupancy: Option<Occupancy>,
    port: Option<Port>,
}

/// Unchecked wire form of [`Node`]
#[derive(Deserialize)]
struct RawNode {
    id: NodeId,
    node_type: NodeType,
    resource: Option<Resource>,
    trigger: Option<u8>,
    neighbors: BTreeSet<NodeId>,
    occupancy: Option<Occupancy>,
    #[serde(default)]
    port: Option<Port>,
}

impl TryFrom<RawNode> for Node {
    type Error = GameError;

    fn try_from(raw: RawNode) -> Result<Self> {
        let node = Node {
            id: raw.id,
            node_type: raw.node_type,
            resource: raw.resource,
            trigger: raw.trigger,
            neighbors: raw.neighbors,
            occupancy: raw.occupancy,
            port: raw.port,
        };
        node.check_invariants()?;
        Ok(node)
    }
}

impl Node {
    pub(crate) fn new(id: NodeId, node_type: NodeType) -> Self {
        Self {
            id,
            node_type,
            resource: None,
            trigger: None,
            neighbors: BTreeSet::new(),
            occupancy: None,
            port: None,
        }
    }

    pub(crate) fn hex(id: NodeId, resource: Resource, trigger: u8) -> Result<Self> {
        check_trigger(trigger)?;
        Ok(Self {
            resource: Some(resource),
            trigger: Some(trigger),
            ..Self::new(id, NodeType::Hex)
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Resource produced, present only on revealed hexes
    pub fn resource(&self) -> Option<Resource> {
        self.resource
    }

    /// Dice total that activates this hex
    pub fn trigger(&self) -> Option<u8> {
        self.trigger
    }

    pub fn neighbors(&self) -> &BTreeSet<NodeId> {
        &self.neighbors
    }

    pub fn occupancy(&self) -> Option<Occupancy> {
        self.occupancy
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.occupancy.map(|o| o.owner)
    }

    pub fn is_occupied(&self) -> bool {
        self.occupancy.is_some()
    }

    /// Trade port on this junction
    pub fn port(&self) -> Option<Port> {
        self.port
    }

    pub(crate) fn link(&mut self, other: NodeId) {
        self.neighbors.insert(other);
    }

    pub(crate) fn occupy(&mut self, occupancy: Occupancy) {
        self.occupancy = Some(occupancy);
    }

    pub(crate) fn set_port(&mut self, port: Port) -> Result<()> {
        if self.node_type != NodeType::Junction {
            return Err(GameError::NotAJunction(self.id));
        }
        self.port = Some(port);
        Ok(())
    }

    /// Per-node invariants that do not depend on the rest of the graph
    pub(crate) fn check_invariants(&self) -> Result<()> {
        let problem = match (self.node_type, self.resource, self.trigger) {
            (NodeType::Hex, Some(_), Some(trigger)) => {
                check_trigger(trigger)?;
                None
            }
            (NodeType::Hex, _, _) => Some("hex without a resource and trigger"),
            (_, None, None) => None,
            _ => Some("resource or trigger on a node that is not a hex"),
        };
        let problem = problem.or_else(|| match self.occupancy {
            Some(occupancy) if !self.node_type.can_hold(occupancy.building) => {
                Some("node type cannot hold its building")
            }
            _ => None,
        });
        let problem = problem.or_else(|| {
            if self.port.is_some() && self.node_type != NodeType::Junction {
                Some("port on a node that is not a junction")
            } else if self.neighbors.contains(&self.id) {
                Some("node is its own neighbour")
            } else {
                None
            }
        });
        match problem {
            Some(problem) => Err(GameError::InvalidBoard {
                node: self.id,
                problem: problem.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Flip an unflipped hex into a revealed one
    pub(crate) fn reveal(&mut self, resource: Resource, trigger: u8) -> Result<()> {
        match self.node_type {
            NodeType::Hex => Err(GameError::AlreadyRevealed(self.id)),
            NodeType::UnflippedHex => {
                check_trigger(trigger)?;
                self.node_type = NodeType::Hex;
                self.resource = Some(resource);
                self.trigger = Some(trigger);
                Ok(())
            }
            _ => Err(GameError::NotRevealable(self.id)),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.node_type, self.id)?;
        if let (Some(resource), Some(trigger)) = (self.resource, self.trigger) {
            write!(f, " {} on {}", resource, trigger)?;
        }
        if let Some(occupancy) = self.occupancy {
            write!(f, " {} of player {}", occupancy.building, occupancy.owner)?;
        }
        if let Some(port) = self.port {
            write!(f, " with {} port", port)?;
        }
        Ok(())
    }
}

fn check_trigger(trigger: u8) -> Result<()> {
    if TRIGGER_RANGE.contains(&trigger) {
        Ok(())
    } else {
        Err(GameError::InvalidTrigger(trigger))
    }
}

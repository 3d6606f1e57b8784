//! The board graph: an arena of typed nodes connected by adjacency sets.
//!
//! This module contains:
//! - `BoardGraphBuilder`, used by board generation to lay out nodes and edges
//! - `BoardGraph` with placement validation, reveals, the robber, ports and
//!   production
//!
//! Hexes border the junctions at their corners and junctions border the roads
//! leading away from them. Placement legality and production are both answered
//! by walking that adjacency.

use crate::building::Building;
use crate::error::{GameError, PlacementViolation, Result};
use crate::node::{Node, NodeId, NodeType, Occupancy, PlayerId};
use crate::port::Port;
use crate::resource::{Resource, ResourceCounts};
use crate::rules::PlacementRules;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Resources owed to each player
pub type Distribution = BTreeMap<PlayerId, ResourceCounts>;

/// Builds a [`BoardGraph`] node by node.
///
/// Node ids are handed out in insertion order and stay stable for the life
/// of the graph.
#[derive(Debug, Clone, Default)]
pub struct BoardGraphBuilder {
    nodes: Vec<Node>,
    rules: PlacementRules,
}

impl BoardGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these placement rules instead of the standard ones
    pub fn rules(mut self, rules: PlacementRules) -> Self {
        self.rules = rules;
        self
    }

    /// Add a revealed hex producing `resource` on `trigger`
    pub fn add_hex(&mut self, resource: Resource, trigger: u8) -> Result<NodeId> {
        let id = self.nodes.len();
        self.nodes.push(Node::hex(id, resource, trigger)?);
        Ok(id)
    }

    pub fn add_unflipped_hex(&mut self) -> NodeId {
        self.push(NodeType::UnflippedHex)
    }

    pub fn add_desert(&mut self) -> NodeId {
        self.push(NodeType::Desert)
    }

    pub fn add_ocean(&mut self) -> NodeId {
        self.push(NodeType::Ocean)
    }

    pub fn add_junction(&mut self) -> NodeId {
        self.push(NodeType::Junction)
    }

    pub fn add_road(&mut self) -> NodeId {
        self.push(NodeType::Road)
    }

    fn push(&mut self, node_type: NodeType) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, node_type));
        id
    }

    /// Connect two nodes in both directions. Connecting twice is a no-op.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        if a == b {
            return Err(GameError::SelfLoop(a));
        }
        for id in [a, b] {
            if id >= self.nodes.len() {
                return Err(GameError::UnknownNode(id));
            }
        }
        self.nodes[a].link(b);
        self.nodes[b].link(a);
        Ok(())
    }

    /// Put a trade port on a junction
    pub fn set_port(&mut self, junction: NodeId, port: Port) -> Result<()> {
        self.nodes
            .get_mut(junction)
            .ok_or(GameError::UnknownNode(junction))?
            .set_port(port)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finish the graph. It starts in the setup state with the robber on the
    /// first desert, or off the board when there is none.
    pub fn build(self) -> BoardGraph {
        let robber = self
            .nodes
            .iter()
            .find(|n| n.node_type() == NodeType::Desert)
            .map(|n| n.id());
        BoardGraph {
            nodes: self.nodes,
            rules: self.rules,
            setup: true,
            robber,
        }
    }
}

/// The game board as a graph.
///
/// Deserialization rejects documents the builder could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardGraph")]
pub struct BoardGraph {
    nodes: Vec<Node>,
    rules: PlacementRules,
    setup: bool,
    robber: Option<NodeId>,
}

/// Unchecked wire form of [`BoardGraph`]
#[derive(Deserialize)]
struct RawBoardGraph {
    nodes: Vec<Node>,
    rules: PlacementRules,
    setup: bool,
    robber: Option<NodeId>,
}

impl TryFrom<RawBoardGraph> for BoardGraph {
    type Error = GameError;

    fn try_from(raw: RawBoardGraph) -> Result<Self> {
        let invalid = |node: NodeId, problem: &str| GameError::InvalidBoard {
            node,
            problem: problem.to_string(),
        };

        for (index, node) in raw.nodes.iter().enumerate() {
            if node.id() != index {
                return Err(invalid(index, "id does not match its position"));
            }
            for &neighbor in node.neighbors() {
                let linked_back = raw
                    .nodes
                    .get(neighbor)
                    .ok_or_else(|| invalid(index, "neighbour is not on the board"))?
                    .neighbors()
                    .contains(&index);
                if !linked_back {
                    return Err(invalid(index, "adjacency is not symmetric"));
                }
            }
        }

        if let Some(robber) = raw.robber {
            let holds_robber = raw
                .nodes
                .get(robber)
                .is_some_and(|n| n.node_type().can_hold_robber());
            if !holds_robber {
                return Err(invalid(robber, "robber is not on a land tile"));
            }
        }

        Ok(BoardGraph {
            nodes: raw.nodes,
            rules: raw.rules,
            setup: raw.setup,
            robber: raw.robber,
        })
    }
}

impl BoardGraph {
    pub fn builder() -> BoardGraphBuilder {
        BoardGraphBuilder::new()
    }

    // ==================== Query Methods ====================

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn rules(&self) -> &PlacementRules {
        &self.rules
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(GameError::UnknownNode(id))
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Ids of the nodes adjacent to `id`
    pub fn neighbors_of(&self, id: NodeId) -> Result<&BTreeSet<NodeId>> {
        Ok(self.node(id)?.neighbors())
    }

    /// Adjacent nodes of a given type
    fn neighbors_typed<'a>(
        &'a self,
        node: &'a Node,
        node_type: NodeType,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        node.neighbors()
            .iter()
            .filter_map(|&id| self.nodes.get(id))
            .filter(move |n| n.node_type() == node_type)
    }

    /// Nodes occupied by `owner`
    pub fn occupied_by(&self, owner: PlayerId) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.owner() == Some(owner))
    }

    /// Players with a settlement or city on a corner of `hex`
    pub fn owners_bordering(&self, hex: NodeId) -> Result<BTreeSet<PlayerId>> {
        let node = self.node(hex)?;
        Ok(self
            .neighbors_typed(node, NodeType::Junction)
            .filter_map(|j| j.owner())
            .collect())
    }

    /// Revealed hexes that produce on `total`, skipping the robber's hex
    pub fn hexes_with_trigger(&self, total: u8) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| {
            n.node_type().produces() && n.trigger() == Some(total) && self.robber != Some(n.id())
        })
    }

    // ==================== Setup and Robber ====================

    /// Whether the opening placement rounds are still running
    pub fn is_setup(&self) -> bool {
        self.setup
    }

    /// Leave setup; settlements need a connecting road from now on
    pub fn end_setup(&mut self) {
        if self.setup {
            debug!("setup finished");
        }
        self.setup = false;
    }

    pub fn robber(&self) -> Option<NodeId> {
        self.robber
    }

    /// Move the robber onto a land tile, returning where it was
    pub fn move_robber(&mut self, hex: NodeId) -> Result<Option<NodeId>> {
        if !self.node(hex)?.node_type().can_hold_robber() {
            return Err(GameError::NotAHex(hex));
        }
        debug!(from = ?self.robber, to = hex, "moved robber");
        Ok(self.robber.replace(hex))
    }

    // ==================== Ports ====================

    /// The trade port on a node, if any
    pub fn port_of(&self, id: NodeId) -> Result<Option<Port>> {
        Ok(self.node(id)?.port())
    }

    /// Ports reachable through `owner`'s settlements and cities
    pub fn ports_of(&self, owner: PlayerId) -> BTreeSet<Port> {
        self.occupied_by(owner).filter_map(|n| n.port()).collect()
    }

    // ==================== Reveals ====================

    /// Turn an unflipped hex into a revealed one
    pub fn reveal(&mut self, id: NodeId, resource: Resource, trigger: u8) -> Result<&Node> {
        let node = self.nodes.get_mut(id).ok_or(GameError::UnknownNode(id))?;
        node.reveal(resource, trigger)?;
        debug!(node = id, %resource, trigger, "revealed hex");
        Ok(node)
    }

    // ==================== Placement ====================

    /// Whether `owner` may place `building` on node `id` right now
    pub fn can_place(&self, building: Building, id: NodeId, owner: PlayerId) -> Result<bool> {
        Ok(self.placement_violation(building, id, owner)?.is_none())
    }

    /// The first rule a placement would break, if any
    pub fn placement_violation(
        &self,
        building: Building,
        id: NodeId,
        owner: PlayerId,
    ) -> Result<Option<PlacementViolation>> {
        let node = self.node(id)?;

        if building.node_type().is_none() {
            return Ok(Some(PlacementViolation::NotPlaceable));
        }
        if !node.node_type().can_hold(building) {
            return Ok(Some(PlacementViolation::WrongNodeType));
        }
        if node.is_occupied() {
            return Ok(Some(PlacementViolation::Occupied));
        }

        let violation = match building {
            Building::Settlement | Building::City
                if self.rules.enforce_distance_rule && !self.satisfies_distance_rule(node) =>
            {
                Some(PlacementViolation::TooClose)
            }
            Building::Settlement
                if self.settlement_needs_connection() && !self.is_connected_junction(node, owner) =>
            {
                Some(PlacementViolation::NotConnected)
            }
            Building::Road if !self.is_connected_road(node, owner) => {
                Some(PlacementViolation::NotConnected)
            }
            _ => None,
        };
        Ok(violation)
    }

    /// Place a building, returning the updated node
    pub fn place(&mut self, building: Building, id: NodeId, owner: PlayerId) -> Result<&Node> {
        if let Some(reason) = self.placement_violation(building, id, owner)? {
            return Err(GameError::IllegalPlacement {
                building,
                node: id,
                reason,
            });
        }
        debug!(%building, node = id, owner, "placed building");
        let node = &mut self.nodes[id];
        node.occupy(Occupancy::new(owner, building));
        Ok(node)
    }

    /// Replace the owner's settlement on `id` with a city
    pub fn upgrade_to_city(&mut self, id: NodeId, owner: PlayerId) -> Result<&Node> {
        let node = self.node(id)?;
        let reason = if node.node_type() != NodeType::Junction {
            Some(PlacementViolation::WrongNodeType)
        } else if node.occupancy() != Some(Occupancy::new(owner, Building::Settlement)) {
            Some(PlacementViolation::NotOwnSettlement)
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(GameError::IllegalPlacement {
                building: Building::City,
                node: id,
                reason,
            });
        }
        debug!(node = id, owner, "upgraded settlement to city");
        let node = &mut self.nodes[id];
        node.occupy(Occupancy::new(owner, Building::City));
        Ok(node)
    }

    fn settlement_needs_connection(&self) -> bool {
        !self.setup || self.rules.setup_requires_connection
    }

    /// Junctions one step away, directly or across a single road node
    fn nearby_junctions<'a>(&'a self, junction: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        let direct = self.neighbors_typed(junction, NodeType::Junction);
        let across_roads = self
            .neighbors_typed(junction, NodeType::Road)
            .flat_map(move |road| self.neighbors_typed(road, NodeType::Junction))
            .filter(move |j| j.id() != junction.id());
        direct.chain(across_roads)
    }

    /// No settlement or city on a neighbouring junction
    fn satisfies_distance_rule(&self, junction: &Node) -> bool {
        !self.nearby_junctions(junction).any(|j| j.is_occupied())
    }

    /// A settlement needs one of the owner's roads touching the junction
    fn is_connected_junction(&self, junction: &Node, owner: PlayerId) -> bool {
        self.neighbors_typed(junction, NodeType::Road)
            .any(|road| road.owner() == Some(owner))
    }

    /// A road must touch something the owner holds, or continue one of the
    /// owner's roads through a junction no opponent has built on
    fn is_connected_road(&self, road: &Node, owner: PlayerId) -> bool {
        road.neighbors()
            .iter()
            .filter_map(|&id| self.nodes.get(id))
            .any(|neighbor| {
                if neighbor.owner() == Some(owner) {
                    return true;
                }
                neighbor.node_type() == NodeType::Junction
                    && neighbor.owner().is_none()
                    && self
                        .neighbors_typed(neighbor, NodeType::Road)
                        .any(|other| other.id() != road.id() && other.owner() == Some(owner))
            })
    }

    // ==================== Resource Distribution ====================

    /// Resources each player would receive for a dice total
    pub fn resources_for_roll(&self, total: u8) -> Distribution {
        let mut distribution = Distribution::new();

        for hex in self.hexes_with_trigger(total) {
            let Some(resource) = hex.resource() else {
                continue;
            };
            for junction in self.neighbors_typed(hex, NodeType::Junction) {
                if let Some(occupancy) = junction.occupancy() {
                    let amount = occupancy.building.yield_multiplier();
                    if amount > 0 {
                        distribution
                            .entry(occupancy.owner)
                            .or_default()
                            .increment(resource, amount);
                    }
                }
            }
        }

        distribution
    }

    /// Credit production for `total` into the players' tallies.
    ///
    /// Players missing from `tallies` get a fresh counter. The graph itself is
    /// not modified. Returns what was credited.
    pub fn produce(&self, total: u8, tallies: &mut Distribution) -> Distribution {
        let distribution = self.resources_for_roll(total);
        for (owner, counts) in &distribution {
            debug!(owner, total, %counts, "produced resources");
            tallies.entry(*owner).or_default().merge(counts);
        }
        distribution
    }
}

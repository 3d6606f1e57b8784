//! Deriving a board graph from hex coordinates.
//!
//! Board generation decides which tile goes where; this module turns that
//! decision into topology. Every corner touching a land tile becomes a
//! junction, every side between two such corners becomes a road, and each
//! tile is connected to the junctions on its corners. Ports placed on a side
//! go to the junctions at both of its ends.
//!
//! Coordinate-keyed maps serialize as lists of pairs, since JSON object keys
//! must be strings.

use crate::error::{GameError, Result};
use crate::graph::{BoardGraph, BoardGraphBuilder};
use crate::hex::{Corner, HexCoord, Side};
use crate::node::NodeId;
use crate::port::Port;
use crate::resource::Resource;
use crate::rules::PlacementRules;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Radius of the standard island
pub const STANDARD_RADIUS: u32 = 2;

/// What sits on one hex of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileSpec {
    /// Revealed resource tile
    Hex { resource: Resource, trigger: u8 },
    /// Face-down resource tile
    Unflipped,
    Desert,
    Ocean,
}

impl TileSpec {
    fn is_land(&self) -> bool {
        !matches!(self, TileSpec::Ocean)
    }
}

/// Maps layout coordinates to the node ids they became
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutIndex {
    #[serde(with = "pairs")]
    tiles: BTreeMap<HexCoord, NodeId>,
    #[serde(with = "pairs")]
    corners: BTreeMap<Corner, NodeId>,
    #[serde(with = "pairs")]
    sides: BTreeMap<Side, NodeId>,
}

impl LayoutIndex {
    pub fn tile(&self, coord: HexCoord) -> Option<NodeId> {
        self.tiles.get(&coord).copied()
    }

    pub fn corner(&self, corner: &Corner) -> Option<NodeId> {
        self.corners.get(corner).copied()
    }

    pub fn side(&self, side: &Side) -> Option<NodeId> {
        self.sides.get(side).copied()
    }

    pub fn junction_count(&self) -> usize {
        self.corners.len()
    }

    pub fn road_count(&self) -> usize {
        self.sides.len()
    }
}

/// Tiles and ports keyed by coordinate, ready to be turned into a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexLayout {
    #[serde(with = "pairs")]
    tiles: BTreeMap<HexCoord, TileSpec>,
    #[serde(default, with = "pairs")]
    ports: BTreeMap<Side, Port>,
}

impl HexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinates of the 19 land hexes of the standard island
    pub fn standard_shape() -> Vec<HexCoord> {
        HexCoord::default().within(STANDARD_RADIUS)
    }

    /// Coordinates of the 18 ocean hexes surrounding the standard island
    pub fn ocean_ring() -> Vec<HexCoord> {
        let origin = HexCoord::default();
        origin
            .within(STANDARD_RADIUS + 1)
            .into_iter()
            .filter(|h| origin.distance_to(h) == STANDARD_RADIUS + 1)
            .collect()
    }

    /// Put a tile at `coord`, replacing whatever was there
    pub fn add(&mut self, coord: HexCoord, tile: TileSpec) -> &mut Self {
        self.tiles.insert(coord, tile);
        self
    }

    pub fn get(&self, coord: HexCoord) -> Option<TileSpec> {
        self.tiles.get(&coord).copied()
    }

    /// Put a port on `side`, replacing whatever was there
    pub fn add_port(&mut self, side: Side, port: Port) -> &mut Self {
        self.ports.insert(side, port);
        self
    }

    pub fn port(&self, side: Side) -> Option<Port> {
        self.ports.get(&side).copied()
    }

    fn is_land(&self, coord: &HexCoord) -> bool {
        self.tiles.get(coord).is_some_and(TileSpec::is_land)
    }

    /// Sides between a land tile and the sea or the edge of the layout,
    /// where ports can go
    pub fn coastal_sides(&self) -> Vec<Side> {
        let coastal: BTreeSet<Side> = self
            .tiles
            .keys()
            .filter(|coord| self.is_land(coord))
            .flat_map(|coord| {
                coord
                    .neighbors()
                    .into_iter()
                    .filter(move |n| !self.is_land(n))
                    .map(move |n| Side::new(*coord, n))
            })
            .collect();
        coastal.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Build the board graph.
    ///
    /// Tiles get the lowest ids in coordinate order, followed by junctions
    /// and then roads.
    pub fn build(&self, rules: PlacementRules) -> Result<(BoardGraph, LayoutIndex)> {
        let mut builder = BoardGraphBuilder::new().rules(rules);
        let mut index = LayoutIndex::default();

        for (&coord, tile) in &self.tiles {
            let id = match *tile {
                TileSpec::Hex { resource, trigger } => builder.add_hex(resource, trigger)?,
                TileSpec::Unflipped => builder.add_unflipped_hex(),
                TileSpec::Desert => builder.add_desert(),
                TileSpec::Ocean => builder.add_ocean(),
            };
            index.tiles.insert(coord, id);
        }

        let land: Vec<HexCoord> = self
            .tiles
            .iter()
            .filter(|(_, tile)| tile.is_land())
            .map(|(&coord, _)| coord)
            .collect();

        for coord in &land {
            for corner in coord.corners() {
                if !index.corners.contains_key(&corner) {
                    index.corners.insert(corner, builder.add_junction());
                }
            }
        }

        for coord in &land {
            for side in coord.sides() {
                if index.sides.contains_key(&side) {
                    continue;
                }
                let road = builder.add_road();
                index.sides.insert(side, road);
                for endpoint in side.endpoints() {
                    if let Some(&junction) = index.corners.get(&endpoint) {
                        builder.connect(road, junction)?;
                    }
                }
            }
        }

        for (side, &port) in &self.ports {
            for endpoint in side.endpoints() {
                let junction = index
                    .corners
                    .get(&endpoint)
                    .ok_or(GameError::PortOffBoard(*side))?;
                builder.set_port(*junction, port)?;
            }
        }

        for (coord, &tile) in &index.tiles {
            for corner in coord.corners() {
                if let Some(&junction) = index.corners.get(&corner) {
                    builder.connect(tile, junction)?;
                }
            }
        }

        Ok((builder.build(), index))
    }
}

/// Serialize a map as a list of `(key, value)` pairs
mod pairs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S, K, V>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        K: Serialize,
        V: Serialize,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
    where
        D: Deserializer<'de>,
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
    {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::Building;
    use crate::node::NodeType;

    fn standard_layout() -> HexLayout {
        let mut layout = HexLayout::new();
        for (i, coord) in HexLayout::standard_shape().into_iter().enumerate() {
            let resource = Resource::ALL[i % Resource::ALL.len()];
            let trigger = [2, 3, 4, 5, 6, 8, 9, 10, 11, 12][i % 10];
            layout.add(coord, TileSpec::Hex { resource, trigger });
        }
        for coord in HexLayout::ocean_ring() {
            layout.add(coord, TileSpec::Ocean);
        }
        layout
    }

    #[test]
    fn test_standard_shape_sizes() {
        assert_eq!(HexLayout::standard_shape().len(), 19);
        assert_eq!(HexLayout::ocean_ring().len(), 18);
    }

    #[test]
    fn test_standard_topology_counts() {
        let (graph, index) = standard_layout().build(PlacementRules::standard()).unwrap();
        assert_eq!(index.junction_count(), 54);
        assert_eq!(index.road_count(), 72);
        assert_eq!(graph.len(), 19 + 18 + 54 + 72);
    }

    #[test]
    fn test_every_land_hex_borders_six_junctions() {
        let (graph, _) = standard_layout().build(PlacementRules::standard()).unwrap();
        for node in graph.nodes().filter(|n| n.node_type() == NodeType::Hex) {
            let junctions = node
                .neighbors()
                .iter()
                .filter(|&&id| graph.node(id).unwrap().node_type() == NodeType::Junction)
                .count();
            assert_eq!(junctions, 6, "{}", node);
        }
    }

    #[test]
    fn test_every_road_joins_two_junctions() {
        let (graph, _) = standard_layout().build(PlacementRules::standard()).unwrap();
        for road in graph.nodes().filter(|n| n.node_type() == NodeType::Road) {
            assert_eq!(road.neighbors().len(), 2, "{}", road);
            for &id in road.neighbors() {
                assert_eq!(graph.node(id).unwrap().node_type(), NodeType::Junction);
            }
        }
    }

    #[test]
    fn test_junctions_touch_three_tiles_inside_ocean_ring() {
        let (graph, _) = standard_layout().build(PlacementRules::standard()).unwrap();
        for junction in graph.nodes().filter(|n| n.node_type() == NodeType::Junction) {
            let tiles = junction
                .neighbors()
                .iter()
                .filter(|&&id| graph.node(id).unwrap().node_type().is_tile())
                .count();
            assert_eq!(tiles, 3, "{}", junction);
        }
    }

    #[test]
    fn test_layout_without_ocean_has_no_ocean_nodes() {
        let mut layout = HexLayout::new();
        layout.add(HexCoord::new(0, 0), TileSpec::Unflipped);
        let (graph, index) = layout.build(PlacementRules::standard()).unwrap();
        assert_eq!(index.junction_count(), 6);
        assert_eq!(index.road_count(), 6);
        assert!(graph.nodes().all(|n| n.node_type() != NodeType::Ocean));
    }

    #[test]
    fn test_index_resolves_placements() {
        let (mut graph, index) = standard_layout().build(PlacementRules::standard()).unwrap();
        let center = HexCoord::new(0, 0);
        let corner = center.corners()[0];
        let junction = index.corner(&corner).unwrap();

        graph.place(Building::Settlement, junction, 0).unwrap();
        let side = corner.sides()[0];
        let road = index.side(&side).unwrap();
        assert!(graph.can_place(Building::Road, road, 0).unwrap());
        assert!(graph
            .neighbors_of(index.tile(center).unwrap())
            .unwrap()
            .contains(&junction));
    }

    #[test]
    fn test_desert_tile_holds_robber() {
        let mut layout = HexLayout::new();
        let desert = HexCoord::new(0, 0);
        layout.add(desert, TileSpec::Desert);
        layout.add(
            HexCoord::new(1, 0),
            TileSpec::Hex {
                resource: Resource::Wheat,
                trigger: 9,
            },
        );
        let (graph, index) = layout.build(PlacementRules::standard()).unwrap();
        let desert_id = index.tile(desert).unwrap();
        assert_eq!(graph.node(desert_id).unwrap().node_type(), NodeType::Desert);
        assert_eq!(graph.robber(), Some(desert_id));
        assert_eq!(graph.neighbors_of(desert_id).unwrap().len(), 6);
    }

    #[test]
    fn test_coastal_sides_of_standard_island() {
        let layout = standard_layout();
        let coastal = layout.coastal_sides();
        assert_eq!(coastal.len(), 30);
        for side in &coastal {
            let [a, b] = side.hexes();
            assert_ne!(layout.is_land(&a), layout.is_land(&b));
        }
    }

    #[test]
    fn test_ports_land_on_both_junctions() {
        let mut layout = standard_layout();
        let side = layout.coastal_sides()[0];
        layout.add_port(side, Port::Only(Resource::Ore));
        let (graph, index) = layout.build(PlacementRules::standard()).unwrap();

        for endpoint in side.endpoints() {
            let junction = index.corner(&endpoint).unwrap();
            assert_eq!(graph.port_of(junction), Ok(Some(Port::Only(Resource::Ore))));
        }
        let with_port = graph.nodes().filter(|n| n.port().is_some()).count();
        assert_eq!(with_port, 2);
    }

    #[test]
    fn test_port_off_board_fails_build() {
        let mut layout = HexLayout::new();
        layout.add(HexCoord::new(0, 0), TileSpec::Unflipped);
        let far_side = Side::new(HexCoord::new(5, 0), HexCoord::new(6, 0));
        layout.add_port(far_side, Port::Any);
        assert_eq!(
            layout.build(PlacementRules::standard()).unwrap_err(),
            GameError::PortOffBoard(far_side)
        );
    }

    #[test]
    fn test_layout_and_index_serialize_as_pairs() {
        let mut layout = standard_layout();
        layout.add_port(layout.coastal_sides()[3], Port::Any);
        let json = serde_json::to_string(&layout).unwrap();
        let back: HexLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);

        let (_, index) = layout.build(PlacementRules::standard()).unwrap();
        let json = serde_json::to_string(&index).unwrap();
        let back: LayoutIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
        assert_eq!(back.junction_count(), 54);
    }

    #[test]
    fn test_invalid_trigger_fails_build() {
        let mut layout = HexLayout::new();
        layout.add(
            HexCoord::new(0, 0),
            TileSpec::Hex {
                resource: Resource::Ore,
                trigger: 14,
            },
        );
        assert!(layout.build(PlacementRules::standard()).is_err());
    }
}

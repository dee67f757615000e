//! Board snapshot: tiles, placed settlements and roads, and the remaining
//! development-card deck. The topology itself lives in [`geometry`] and is
//! shared by every snapshot.

use serde::{Deserialize, Serialize};

use crate::game::dev_card::DevDeck;
use crate::game::geometry::{geometry, EdgeId, VertexId, TILE_COUNT};
use crate::game::player::Player;
use crate::game::resource::Resource;
use crate::{AgentError, Result};

/// A resource hex. The desert carries no resource and starts blocked by
/// the robber; the blocking mechanic is otherwise inert in this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub resource: Option<Resource>,
    pub chit: Option<u8>,
    pub blocked: bool,
}

/// A placed settlement, optionally upgraded to a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub owner: usize,
    pub vertex: VertexId,
    pub city: bool,
}

/// A placed road segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub owner: usize,
    pub edge: EdgeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub tiles: Vec<Tile>,
    pub settlements: Vec<Settlement>,
    pub roads: Vec<Road>,
    pub dev_deck: DevDeck,
}

/// Chit sequence of the reference layout, one per non-desert tile.
const STANDARD_CHITS: [u8; 18] = [5, 2, 6, 3, 8, 10, 9, 12, 11, 4, 8, 10, 9, 4, 5, 6, 3, 11];

impl Board {
    /// An empty board with the fixed reference tile layout: 3 brick,
    /// 4 lumber, 4 wool, 4 grain, 3 ore and the desert last. Tile
    /// shuffling and port randomization belong to the surrounding
    /// application, not to this core.
    pub fn standard() -> Self {
        let mut resources = Vec::with_capacity(TILE_COUNT);
        resources.extend(std::iter::repeat(Resource::Brick).take(3));
        resources.extend(std::iter::repeat(Resource::Lumber).take(4));
        resources.extend(std::iter::repeat(Resource::Wool).take(4));
        resources.extend(std::iter::repeat(Resource::Grain).take(4));
        resources.extend(std::iter::repeat(Resource::Ore).take(3));

        let mut tiles: Vec<Tile> = resources
            .into_iter()
            .zip(STANDARD_CHITS)
            .map(|(resource, chit)| Tile {
                resource: Some(resource),
                chit: Some(chit),
                blocked: false,
            })
            .collect();
        tiles.push(Tile {
            resource: None,
            chit: None,
            blocked: true,
        });

        Board {
            tiles,
            settlements: Vec::new(),
            roads: Vec::new(),
            dev_deck: DevDeck::full(),
        }
    }

    pub fn settlement_at(&self, vertex: VertexId) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.vertex == vertex)
    }

    pub fn road_at(&self, edge: EdgeId) -> Option<&Road> {
        self.roads.iter().find(|r| r.edge == edge)
    }

    /// Settlement placement legality: the vertex is vacant, no adjacent
    /// vertex is occupied (the distance rule), and outside free-placement
    /// mode the vertex touches one of the player's roads.
    pub fn can_place_settlement(&self, owner: usize, vertex: VertexId, free: bool) -> bool {
        if self.settlement_at(vertex).is_some() {
            return false;
        }
        let geo = geometry();
        if geo.neighbors(vertex).any(|n| self.settlement_at(n).is_some()) {
            return false;
        }
        if free {
            return true;
        }
        self.roads.iter().any(|road| {
            if road.owner != owner {
                return false;
            }
            let (a, b) = geo.edge_endpoints(road.edge);
            a == vertex || b == vertex
        })
    }

    /// Road placement legality: the edge is vacant and shares an endpoint
    /// with the player's road network or one of their settlements.
    pub fn can_place_road(&self, owner: usize, edge: EdgeId) -> bool {
        if self.road_at(edge).is_some() {
            return false;
        }
        let geo = geometry();
        let (a, b) = geo.edge_endpoints(edge);
        let touches_settlement = self
            .settlements
            .iter()
            .any(|s| s.owner == owner && (s.vertex == a || s.vertex == b));
        if touches_settlement {
            return true;
        }
        self.roads
            .iter()
            .any(|road| road.owner == owner && geo.edges_connected(road.edge, edge))
    }

    pub fn place_settlement(&mut self, owner: usize, vertex: VertexId) -> Result<()> {
        if self.settlement_at(vertex).is_some() {
            return Err(AgentError::Precondition(format!(
                "vertex {vertex} is already occupied"
            )));
        }
        self.settlements.push(Settlement {
            owner,
            vertex,
            city: false,
        });
        Ok(())
    }

    pub fn place_road(&mut self, owner: usize, edge: EdgeId) -> Result<()> {
        if self.road_at(edge).is_some() {
            return Err(AgentError::Precondition(format!(
                "edge {edge} is already occupied"
            )));
        }
        self.roads.push(Road { owner, edge });
        Ok(())
    }

    /// Upgrades the owner's settlement at `vertex` to a city.
    pub fn upgrade_to_city(&mut self, owner: usize, vertex: VertexId) -> Result<()> {
        let settlement = self
            .settlements
            .iter_mut()
            .find(|s| s.vertex == vertex && s.owner == owner && !s.city)
            .ok_or_else(|| {
                AgentError::Precondition(format!(
                    "no upgradeable settlement of player {owner} at vertex {vertex}"
                ))
            })?;
        settlement.city = true;
        Ok(())
    }

    /// Pays out resources for a dice total: every settlement on a corner of
    /// an unblocked tile with a matching chit earns one resource, two for a
    /// city.
    pub fn distribute_resources(&self, players: &mut [Player], total: u8) {
        let geo = geometry();
        for (index, tile) in self.tiles.iter().enumerate() {
            let Some(resource) = tile.resource else {
                continue;
            };
            if tile.blocked || tile.chit != Some(total) {
                continue;
            }
            for &corner in geo.tile_corners(index) {
                if let Some(settlement) = self.settlement_at(corner) {
                    players[settlement.owner].take_resource(resource);
                    if settlement.city {
                        players[settlement.owner].take_resource(resource);
                    }
                }
            }
        }
    }

    /// Length of the player's longest connected road: the longest trail
    /// through their placed edges, each segment used at most once.
    pub fn longest_road_length(&self, owner: usize) -> usize {
        let geo = geometry();
        let owned: Vec<EdgeId> = self
            .roads
            .iter()
            .filter(|r| r.owner == owner)
            .map(|r| r.edge)
            .collect();

        fn walk(
            geo: &crate::game::geometry::Geometry,
            owned: &[EdgeId],
            used: &mut Vec<EdgeId>,
            from: VertexId,
        ) -> usize {
            let mut best = 0;
            for &edge in owned {
                if used.contains(&edge) {
                    continue;
                }
                let (a, b) = geo.edge_endpoints(edge);
                let next = if a == from {
                    b
                } else if b == from {
                    a
                } else {
                    continue;
                };
                used.push(edge);
                best = best.max(1 + walk(geo, owned, used, next));
                used.pop();
            }
            best
        }

        let mut best = 0;
        for &edge in &owned {
            let (a, b) = geo.edge_endpoints(edge);
            for start in [a, b] {
                best = best.max(walk(geo, &owned, &mut Vec::new(), start));
            }
        }
        best
    }

    /// Recomputes the longest-road bonus holder across all players.
    ///
    /// The bonus moves only when a single player strictly holds the best
    /// network of at least 5 segments; ties leave the flags untouched.
    pub fn award_longest_road(&self, players: &mut [Player]) {
        let lengths: Vec<usize> = (0..players.len())
            .map(|owner| self.longest_road_length(owner))
            .collect();
        let best = lengths.iter().copied().max().unwrap_or(0);
        if best < 5 {
            return;
        }
        let leaders: Vec<usize> = (0..players.len())
            .filter(|&i| lengths[i] == best)
            .collect();
        if leaders.len() != 1 {
            return;
        }
        let leader = leaders[0];
        if players[leader].longest_road {
            return;
        }
        for player in players.iter_mut() {
            player.longest_road = false;
        }
        players[leader].longest_road = true;
    }
}

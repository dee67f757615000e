//! Fixed board topology: 19 hex tiles in a 3/4/5/4/3 layout, with the
//! settlement vertices and road edges derived from the tile corners.
//!
//! The geometry is read-only and shared by every board snapshot, so it is
//! built once and handed out as a `&'static` reference.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Index of a settlement position (0..54).
pub type VertexId = usize;
/// Index of a road edge (0..72).
pub type EdgeId = usize;

pub const TILE_COUNT: usize = 19;
pub const VERTEX_COUNT: usize = 54;
pub const EDGE_COUNT: usize = 72;

/// Tiles per row of the hex layout.
const ROW_WIDTHS: [usize; 5] = [3, 4, 5, 4, 3];

/// Corner offsets of a pointy-top hex centered at (0, 0), in ring order.
const CORNER_OFFSETS: [(i32, i32); 6] = [(0, -2), (1, -1), (1, 1), (0, 2), (-1, 1), (-1, -1)];

pub struct Geometry {
    /// Endpoints of each edge, with `endpoints.0 < endpoints.1`.
    edges: Vec<(VertexId, VertexId)>,
    /// Edges incident to each vertex (2 or 3 per vertex).
    vertex_edges: Vec<Vec<EdgeId>>,
    /// The six corner vertices of each tile.
    tile_corners: Vec<[VertexId; 6]>,
}

impl Geometry {
    fn build() -> Self {
        let mut vertex_ids: BTreeMap<(i32, i32), VertexId> = BTreeMap::new();
        let mut edge_ids: BTreeMap<(VertexId, VertexId), EdgeId> = BTreeMap::new();
        let mut tile_corners = Vec::with_capacity(TILE_COUNT);

        for (row, &width) in ROW_WIDTHS.iter().enumerate() {
            let x_offset = (5 - width) as i32;
            for i in 0..width {
                let center = (x_offset + 2 * i as i32, 3 * row as i32);
                let mut corners = [0; 6];
                for (c, &(dx, dy)) in CORNER_OFFSETS.iter().enumerate() {
                    let pos = (center.0 + dx, center.1 + dy);
                    let next_id = vertex_ids.len();
                    corners[c] = *vertex_ids.entry(pos).or_insert(next_id);
                }
                for c in 0..6 {
                    let (a, b) = (corners[c], corners[(c + 1) % 6]);
                    let key = (a.min(b), a.max(b));
                    let next_id = edge_ids.len();
                    edge_ids.entry(key).or_insert(next_id);
                }
                tile_corners.push(corners);
            }
        }

        let mut edges = vec![(0, 0); edge_ids.len()];
        for (&endpoints, &id) in &edge_ids {
            edges[id] = endpoints;
        }
        let mut vertex_edges = vec![Vec::new(); vertex_ids.len()];
        for (id, &(a, b)) in edges.iter().enumerate() {
            vertex_edges[a].push(id);
            vertex_edges[b].push(id);
        }

        Geometry {
            edges,
            vertex_edges,
            tile_corners,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_endpoints(&self, edge: EdgeId) -> (VertexId, VertexId) {
        self.edges[edge]
    }

    pub fn edges_at(&self, vertex: VertexId) -> &[EdgeId] {
        &self.vertex_edges[vertex]
    }

    /// Vertices one road segment away from `vertex`.
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex_edges[vertex].iter().map(move |&e| {
            let (a, b) = self.edges[e];
            if a == vertex {
                b
            } else {
                a
            }
        })
    }

    pub fn tile_corners(&self, tile: usize) -> &[VertexId; 6] {
        &self.tile_corners[tile]
    }

    /// True when the two edges share an endpoint.
    pub fn edges_connected(&self, a: EdgeId, b: EdgeId) -> bool {
        let (a0, a1) = self.edges[a];
        let (b0, b1) = self.edges[b];
        a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1
    }
}

/// The shared board topology.
pub fn geometry() -> &'static Geometry {
    static GEOMETRY: OnceLock<Geometry> = OnceLock::new();
    GEOMETRY.get_or_init(Geometry::build)
}

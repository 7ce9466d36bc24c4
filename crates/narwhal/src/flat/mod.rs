//! Simulation-friendly materialization of a [`Graph`].
//!
//! Nodes live in an arena addressed by their input order; ids are only consulted when building
//! the adjacency index and when translating to and from the topological graph.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Node};
use crate::vec2d::Vec2D;

/// Physical state of one node: position `r` and the per-tick force/velocity buffer `v`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode {
    pub id: String,
    pub r: Vec2D,
    pub v: Vec2D,
}

impl FlatNode {
    fn new(id: String) -> Self {
        Self {
            id,
            r: Vec2D::zero(),
            v: Vec2D::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct FlatGraph {
    nodes: Vec<FlatNode>,
    id_to_idx: FxHashMap<String, usize>,
    // Input positions, consulted only by `Seeding::Input`.
    initial: Vec<Option<Vec2D>>,
    edges: IndexMap<String, FlatEdge>,
    adjacency: Vec<Vec<usize>>,
}

impl FlatGraph {
    /// Builds the node arena, edge registry and symmetric adjacency index.
    ///
    /// Fails fast on malformed input (missing endpoints, duplicate ids, non-finite positions);
    /// no partial graph is produced.
    pub fn from_graph(graph: &Graph) -> Result<Self> {
        graph.validate()?;

        let mut nodes: Vec<FlatNode> = Vec::with_capacity(graph.nodes.len());
        let mut initial: Vec<Option<Vec2D>> = Vec::with_capacity(graph.nodes.len());
        let mut id_to_idx: FxHashMap<String, usize> = FxHashMap::default();
        id_to_idx.reserve(graph.nodes.len());
        for (idx, n) in graph.nodes.iter().enumerate() {
            nodes.push(FlatNode::new(n.id.clone()));
            initial.push(n.position.map(Vec2D::from));
            id_to_idx.insert(n.id.clone(), idx);
        }

        let mut edges: IndexMap<String, FlatEdge> = IndexMap::with_capacity(graph.edges.len());
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for e in &graph.edges {
            let a = lookup(&id_to_idx, e, &e.source)?;
            let b = lookup(&id_to_idx, e, &e.target)?;
            // Self-loops are kept for reconstruction but exert no spring force.
            if a != b {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
            edges.insert(
                e.id.clone(),
                FlatEdge {
                    id: e.id.clone(),
                    source: e.source.clone(),
                    target: e.target.clone(),
                },
            );
        }

        Ok(Self {
            nodes,
            id_to_idx,
            initial,
            edges,
            adjacency,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [FlatNode] {
        &mut self.nodes
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlatEdge> {
        self.edges.values()
    }

    pub fn edge(&self, id: &str) -> Option<&FlatEdge> {
        self.edges.get(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&FlatNode> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    pub fn position_of(&self, id: &str) -> Result<Vec2D> {
        self.node(id).map(|n| n.r).ok_or_else(|| Error::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    /// Adjacent node ids; unknown or isolated nodes have none.
    pub fn neighbors_of(&self, id: &str) -> Vec<&str> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.adjacency[idx]
            .iter()
            .map(|&j| self.nodes[j].id.as_str())
            .collect()
    }

    pub(crate) fn neighbor_indices(&self, idx: usize) -> &[usize] {
        self.adjacency.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn initial_position(&self, idx: usize) -> Option<Vec2D> {
        self.initial.get(idx).copied().flatten()
    }

    /// Snapshot of the current layout as a topological graph.
    pub fn to_graph(&self) -> Graph {
        Graph {
            nodes: self
                .nodes
                .iter()
                .map(|n| Node::at(n.id.clone(), n.r.x(), n.r.y()))
                .collect(),
            edges: self
                .edges
                .values()
                .map(|e| Edge::new(e.id.clone(), e.source.clone(), e.target.clone()))
                .collect(),
        }
    }
}

fn lookup(id_to_idx: &FxHashMap<String, usize>, edge: &Edge, node_id: &str) -> Result<usize> {
    id_to_idx
        .get(node_id)
        .copied()
        .ok_or_else(|| Error::MissingEndpoint {
            edge_id: edge.id.clone(),
            node_id: node_id.to_string(),
        })
}

#![forbid(unsafe_code)]

//! Headless force-directed graph layout.
//!
//! `narwhal` takes a graph (nodes with optional positions, undirected edges) and computes a 2D
//! position per node with an adaptive Fruchterman-Reingold solver: all-pairs repulsion, spring
//! attraction along edges, an energy-driven step size, and a staleness-based stop. The solver can
//! run to convergence in one call or be ticked one iteration at a time by an embedding caller.
//!
//! Rendering, graph generation and persistence are left to the caller.

pub mod algo;
pub mod error;
pub mod flat;
pub mod graph;
mod rng;
pub mod vec2d;

pub use algo::{
    Algorithm, EngineState, ForceLayout, ForceModel, ForceOptions, GridLayout, GridOptions, Layout,
    RandomLayout, RandomOptions, Seeding,
};
pub use error::{Error, Result};
pub use flat::{FlatEdge, FlatGraph, FlatNode};
pub use graph::{Edge, Graph, Node, Point};
pub use vec2d::Vec2D;

/// Headless layout entry point.
///
/// Returns a copy of `graph` with every node's position replaced by its computed position.
pub fn layout(graph: &Graph, algorithm: Algorithm) -> Result<Graph> {
    let flat = FlatGraph::from_graph(graph)?;
    match algorithm {
        Algorithm::Grid(opts) => Ok(GridLayout::new(flat, opts)?.compute()),
        Algorithm::Random(opts) => Ok(RandomLayout::new(flat, opts)?.compute()),
        Algorithm::ForceDirected(opts) => Ok(ForceLayout::new(flat, opts)?.run()),
    }
}

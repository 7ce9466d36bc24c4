//! Adaptive Fruchterman-Reingold solver.
//!
//! One iteration evaluates all-pairs repulsion plus spring attraction along edges against a
//! snapshot of the current positions, folds the squared force magnitudes into an energy value,
//! adapts the step size from the energy trend, and finally moves every node by
//! `force * step_size`. Repulsion is always the exhaustive O(N²) pass.

use crate::algo::Layout;
use crate::algo::naive;
use crate::algo::options::{ForceOptions, Seeding, non_negative};
use crate::error::Result;
use crate::flat::{FlatGraph, FlatNode};
use crate::graph::Graph;
use crate::rng::XorShift64Star;
use crate::vec2d::Vec2D;

mod model;
mod schedule;

pub use model::ForceModel;
pub use schedule::EngineState;

/// Force-directed layout engine.
///
/// The engine owns its [`FlatGraph`] and is the only writer of node positions and force buffers.
/// Callers either run to convergence ([`ForceLayout::run`]) or drive their own loop with
/// [`ForceLayout::tick`].
#[derive(Debug, Clone)]
pub struct ForceLayout {
    graph: FlatGraph,
    options: ForceOptions,
    model: ForceModel,
    state: EngineState,
    rng: XorShift64Star,
    seeded: bool,
    forces: Vec<Vec2D>,
}

impl ForceLayout {
    pub fn new(graph: FlatGraph, options: ForceOptions) -> Result<Self> {
        let model = ForceModel::new(&options)?;
        let state = EngineState::new(options.init_step_size);
        let rng = XorShift64Star::new(options.random_seed);
        let forces = vec![Vec2D::zero(); graph.len()];
        Ok(Self {
            graph,
            options,
            model,
            state,
            rng,
            seeded: false,
            forces,
        })
    }

    pub fn from_graph(graph: &Graph, options: ForceOptions) -> Result<Self> {
        Self::new(FlatGraph::from_graph(graph)?, options)
    }

    pub fn options(&self) -> &ForceOptions {
        &self.options
    }

    pub fn model(&self) -> &ForceModel {
        &self.model
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn graph(&self) -> &FlatGraph {
        &self.graph
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn into_graph(self) -> Graph {
        self.graph.to_graph()
    }

    /// Places nodes with the configured seeding strategy and resets the solver state.
    pub fn seed(&mut self) {
        naive::seed(
            &mut self.graph,
            self.options.seeding,
            self.options.spacing,
            &mut self.rng,
        );
        self.state = EngineState::new(self.options.init_step_size);
        self.seeded = true;
    }

    /// Grid placement only; no force iterations run.
    pub fn grid(&mut self) -> Graph {
        naive::seed(
            &mut self.graph,
            Seeding::Grid,
            self.options.spacing,
            &mut self.rng,
        );
        self.state = EngineState::new(self.options.init_step_size);
        self.seeded = true;
        self.graph.to_graph()
    }

    /// Seeds, then iterates until the energy goes stale or `max_iterations` is reached.
    ///
    /// Hitting the iteration cap is not an error: the layout reached so far is returned.
    /// Graphs with fewer than two nodes have no forces and are settled once seeded.
    pub fn run(&mut self) -> Graph {
        let start = std::time::Instant::now();
        self.seed();
        if self.graph.len() < 2 {
            self.state.converged = true;
            tracing::debug!(nodes = self.graph.len(), "force layout has nothing to solve");
            return self.graph.to_graph();
        }
        tracing::debug!(
            nodes = self.graph.len(),
            edges = self.graph.edge_count(),
            "force layout started"
        );

        while self.state.iteration < self.options.max_iterations {
            if self.iterate() {
                self.state.converged = true;
                break;
            }
            self.update_positions();
        }

        if self.state.converged {
            tracing::debug!(
                iterations = self.state.iteration,
                energy = self.state.energy,
                step_size = self.state.step_size,
                elapsed = ?start.elapsed(),
                "force layout converged"
            );
        } else {
            tracing::warn!(
                iterations = self.state.iteration,
                energy = self.state.energy,
                step_size = self.state.step_size,
                elapsed = ?start.elapsed(),
                "force layout stopped at the iteration cap without converging"
            );
        }
        self.graph.to_graph()
    }

    /// Advances the simulation by exactly one iteration and returns the live node state.
    ///
    /// An engine that has not been seeded yet is seeded first. Staleness is tracked as in
    /// [`ForceLayout::run`] but never stops anything; poll [`Layout::is_converged`] to decide
    /// when to stop ticking.
    pub fn tick(&mut self) -> &[FlatNode] {
        if !self.seeded {
            self.seed();
        }
        if self.iterate() || self.graph.len() < 2 {
            self.state.converged = true;
        }
        self.update_positions();
        self.graph.nodes()
    }

    /// Displaces every node by a uniform random offset in `[-magnitude, magnitude)` per axis.
    ///
    /// Force buffers, energy and cooling state are left alone; only the stale streak restarts.
    pub fn random_kick(&mut self, magnitude: Option<f64>) -> Result<()> {
        let magnitude = magnitude.unwrap_or_else(|| self.options.kick_magnitude());
        non_negative("magnitude", magnitude)?;
        for n in self.graph.nodes_mut() {
            let dx = self.rng.next_f64_signed() * magnitude;
            let dy = self.rng.next_f64_signed() * magnitude;
            n.r.add(Vec2D::new(dx, dy));
        }
        self.state.stale_count = 0;
        self.state.converged = false;
        tracing::debug!(nodes = self.graph.len(), magnitude, "random kick");
        Ok(())
    }

    /// Computes forces, updates energy and step size, and reports whether the run went stale.
    ///
    /// Positions are not touched; see [`ForceLayout::update_positions`].
    fn iterate(&mut self) -> bool {
        let t = self.state.iteration;
        let energy = self.compute_forces();
        self.state.record_energy(energy);
        let cooling = self
            .state
            .cool(self.options.cooling_factor, self.options.max_cooling_exponent);
        let stale = self.state.check_stale(
            t,
            self.options.min_iterations,
            self.options.stale_threshold,
            self.options.max_stale_iterations(),
        );
        self.state.iteration += 1;

        tracing::trace!(
            iteration = t,
            energy,
            step_size = self.state.step_size,
            ?cooling,
            stale_count = self.state.stale_count,
            "force layout iteration"
        );
        stale
    }

    /// Fills every node's force buffer `v` and returns the total energy.
    fn compute_forces(&mut self) -> f64 {
        let n = self.graph.len();
        self.forces.clear();
        self.forces.resize(n, Vec2D::zero());

        let nodes = self.graph.nodes();
        // Coincident pairs split along x: the earlier node goes left.
        let tie = Vec2D::new(-1.0, 0.0);
        for i in 0..n {
            for j in (i + 1)..n {
                let f = self.model.repulsion_or(nodes[i].r, nodes[j].r, tie);
                self.forces[i] += f;
                self.forces[j] -= f;
            }
        }

        for (i, node) in nodes.iter().enumerate() {
            for &j in self.graph.neighbor_indices(i) {
                let f = self.model.spring(node.r, nodes[j].r);
                self.forces[i] += f;
            }
        }

        let mut energy = 0.0;
        for (node, force) in self.graph.nodes_mut().iter_mut().zip(&self.forces) {
            node.v = *force;
            energy += Vec2D::dot(*force, *force);
        }
        energy
    }

    fn update_positions(&mut self) {
        let step_size = self.state.step_size;
        for n in self.graph.nodes_mut() {
            let mut delta = n.v;
            delta.scale(step_size);
            n.r.add(delta);
        }
    }
}

impl Layout for ForceLayout {
    fn seed(&mut self) {
        ForceLayout::seed(self);
    }

    fn step(&mut self) -> &[FlatNode] {
        self.tick()
    }

    /// Stale streak tripped, or the iteration cap reached.
    fn is_converged(&self) -> bool {
        self.state.converged || self.state.iteration >= self.options.max_iterations
    }

    fn graph(&self) -> &FlatGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::ForceLayout;
    use crate::algo::options::{ForceOptions, Seeding};
    use crate::graph::{Edge, Graph, Node};
    use crate::vec2d::Vec2D;

    fn pair(edge: bool) -> Graph {
        Graph {
            nodes: vec![Node::at("a", 0.0, 0.0), Node::at("b", 300.0, 0.0)],
            edges: if edge {
                vec![Edge::new("ab", "a", "b")]
            } else {
                Vec::new()
            },
        }
    }

    fn input_opts() -> ForceOptions {
        ForceOptions {
            seeding: Seeding::Input,
            ..Default::default()
        }
    }

    #[test]
    fn force_buffer_is_overwritten_each_tick() {
        let mut engine = ForceLayout::from_graph(&pair(true), input_opts()).unwrap();
        engine.tick();
        let first = engine.graph().nodes()[0].v;
        let a = engine.graph().position_of("a").unwrap();
        let b = engine.graph().position_of("b").unwrap();

        engine.tick();
        let second = engine.graph().nodes()[0].v;

        // Net force at the positions committed by the first tick, not an accumulation.
        let m = *engine.model();
        let mut expected = m.repulsion(a, b);
        expected.add(m.spring(a, b));
        assert!((second.x() - expected.x()).abs() < 1e-12);
        assert!((second.y() - expected.y()).abs() < 1e-12);
        assert!(second.x() > 0.0);
        assert!(second.x() < first.x());
    }

    #[test]
    fn energy_is_the_sum_of_squared_forces() {
        let mut engine = ForceLayout::from_graph(&pair(true), input_opts()).unwrap();
        engine.tick();
        let e: f64 = engine
            .graph()
            .nodes()
            .iter()
            .map(|n| Vec2D::dot(n.v, n.v))
            .sum();
        assert!((engine.state().energy - e).abs() < 1e-12);
        assert_eq!(engine.state().iteration, 1);
    }

    #[test]
    fn coincident_nodes_split_apart() {
        let g = Graph {
            nodes: vec![Node::at("a", 5.0, 5.0), Node::at("b", 5.0, 5.0)],
            edges: Vec::new(),
        };
        let mut engine = ForceLayout::from_graph(&g, input_opts()).unwrap();
        let nodes = engine.tick();
        assert!(nodes.iter().all(|n| n.r.is_finite()));
        assert!(nodes[0].r.x() < 5.0);
        assert!(nodes[1].r.x() > 5.0);
        assert!((nodes[0].r.x() + nodes[1].r.x() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn unseeded_tick_seeds_first() {
        let g = Graph {
            nodes: (0..4).map(|i| Node::new(format!("n{i}"))).collect(),
            edges: Vec::new(),
        };
        let mut engine = ForceLayout::from_graph(&g, ForceOptions::default()).unwrap();
        assert!(!engine.is_seeded());
        engine.tick();
        assert!(engine.is_seeded());
        // Grid slot of n3 is (100, 100); repulsion pushes it outward.
        let p = engine.graph().position_of("n3").unwrap();
        assert!(p.x() > 100.0 && p.y() > 100.0, "{p:?}");
    }

    #[test]
    fn negative_kick_magnitude_is_rejected() {
        let mut engine = ForceLayout::from_graph(&pair(false), input_opts()).unwrap();
        assert!(engine.random_kick(Some(-1.0)).is_err());
        assert!(engine.random_kick(Some(f64::INFINITY)).is_err());
    }
}

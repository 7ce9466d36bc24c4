//! Physics-free placements: used on their own and as starting configurations for the solver.

use crate::algo::Layout;
use crate::algo::options::{GridOptions, RandomOptions, Seeding};
use crate::error::Result;
use crate::flat::{FlatGraph, FlatNode};
use crate::graph::Graph;
use crate::rng::XorShift64Star;
use crate::vec2d::Vec2D;

fn grid_side(n: usize) -> usize {
    (n as f64).sqrt().ceil() as usize
}

fn grid_slot(i: usize, side: usize, spacing: f64) -> Vec2D {
    let side = side.max(1);
    Vec2D::new((i % side) as f64 * spacing, (i / side) as f64 * spacing)
}

/// Row-major square grid in node order. Deterministic.
pub(crate) fn seed_grid(graph: &mut FlatGraph, spacing: f64) {
    let side = grid_side(graph.len());
    for (i, n) in graph.nodes_mut().iter_mut().enumerate() {
        n.r = grid_slot(i, side, spacing);
        n.v = Vec2D::zero();
    }
}

pub(crate) fn seed_random(graph: &mut FlatGraph, spacing: f64, rng: &mut XorShift64Star) {
    let extent = (graph.len() as f64).sqrt() * spacing;
    for n in graph.nodes_mut() {
        let x = rng.next_f64_unit() * extent;
        let y = rng.next_f64_unit() * extent;
        n.r = Vec2D::new(x, y);
        n.v = Vec2D::zero();
    }
}

pub(crate) fn seed_input(graph: &mut FlatGraph, spacing: f64) {
    let side = grid_side(graph.len());
    let initial: Vec<Option<Vec2D>> = (0..graph.len())
        .map(|i| graph.initial_position(i))
        .collect();
    for (i, n) in graph.nodes_mut().iter_mut().enumerate() {
        n.r = initial[i].unwrap_or_else(|| grid_slot(i, side, spacing));
        n.v = Vec2D::zero();
    }
}

pub(crate) fn seed(
    graph: &mut FlatGraph,
    seeding: Seeding,
    spacing: f64,
    rng: &mut XorShift64Star,
) {
    match seeding {
        Seeding::Grid => seed_grid(graph, spacing),
        Seeding::Random => seed_random(graph, spacing, rng),
        Seeding::Input => seed_input(graph, spacing),
    }
    tracing::debug!(
        nodes = graph.len(),
        ?seeding,
        spacing,
        "seeded layout positions"
    );
}

/// Pure grid arrangement.
#[derive(Debug, Clone)]
pub struct GridLayout {
    graph: FlatGraph,
    options: GridOptions,
    seeded: bool,
}

impl GridLayout {
    pub fn new(graph: FlatGraph, options: GridOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            graph,
            options,
            seeded: false,
        })
    }

    pub fn compute(mut self) -> Graph {
        self.seed();
        self.graph.to_graph()
    }
}

impl Layout for GridLayout {
    fn seed(&mut self) {
        seed_grid(&mut self.graph, self.options.spacing);
        self.seeded = true;
    }

    fn step(&mut self) -> &[FlatNode] {
        if !self.seeded {
            self.seed();
        }
        self.graph.nodes()
    }

    fn is_converged(&self) -> bool {
        self.seeded
    }

    fn graph(&self) -> &FlatGraph {
        &self.graph
    }
}

/// Uniform random scatter, reproducible from `random_seed`.
#[derive(Debug, Clone)]
pub struct RandomLayout {
    graph: FlatGraph,
    options: RandomOptions,
    rng: XorShift64Star,
    seeded: bool,
}

impl RandomLayout {
    pub fn new(graph: FlatGraph, options: RandomOptions) -> Result<Self> {
        options.validate()?;
        let rng = XorShift64Star::new(options.random_seed);
        Ok(Self {
            graph,
            options,
            rng,
            seeded: false,
        })
    }

    pub fn compute(mut self) -> Graph {
        self.seed();
        self.graph.to_graph()
    }
}

impl Layout for RandomLayout {
    fn seed(&mut self) {
        seed_random(&mut self.graph, self.options.spacing, &mut self.rng);
        self.seeded = true;
    }

    fn step(&mut self) -> &[FlatNode] {
        if !self.seeded {
            self.seed();
        }
        self.graph.nodes()
    }

    fn is_converged(&self) -> bool {
        self.seeded
    }

    fn graph(&self) -> &FlatGraph {
        &self.graph
    }
}

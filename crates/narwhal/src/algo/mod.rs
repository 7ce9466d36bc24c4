pub mod force;
pub mod naive;
pub mod options;

pub use force::{EngineState, ForceLayout, ForceModel};
pub use naive::{GridLayout, RandomLayout};
pub use options::{ForceOptions, GridOptions, RandomOptions, Seeding};

use crate::flat::{FlatGraph, FlatNode};

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Grid placement, no physics.
    Grid(GridOptions),
    /// Seeded uniform scatter, no physics.
    Random(RandomOptions),
    /// Adaptive Fruchterman-Reingold run to convergence.
    ForceDirected(ForceOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::ForceDirected(ForceOptions::default())
    }
}

/// Stepping capability shared by every layout strategy.
///
/// The caller owns the loop and its timing: seed once, then `step` until `is_converged` (or for
/// as long as it likes), reading positions from the returned node state between steps.
pub trait Layout {
    /// Places every node at its starting position and resets any iteration state.
    fn seed(&mut self);

    /// Advances by one unit and returns the live node state (not a copy).
    fn step(&mut self) -> &[FlatNode];

    fn is_converged(&self) -> bool;

    fn graph(&self) -> &FlatGraph;
}

use crate::algo::options::ForceOptions;
use crate::error::Result;
use crate::vec2d::Vec2D;

/// Fruchterman-Reingold force laws with a distance floor.
///
/// Every distance is clamped to `min_dist` before it enters a force law, so coincident or
/// near-coincident nodes produce large but finite forces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    strength: f64,
    ideal_length: f64,
    ideal_length_sq: f64,
    min_dist: f64,
}

impl ForceModel {
    pub fn new(options: &ForceOptions) -> Result<Self> {
        options.validate()?;
        let ideal_length = options.ideal_length();
        Ok(Self {
            strength: options.strength,
            ideal_length,
            ideal_length_sq: ideal_length * ideal_length,
            min_dist: options.min_dist(),
        })
    }

    /// `K`: the separation at which repulsion and attraction of a single edge cancel.
    pub fn ideal_length(&self) -> f64 {
        self.ideal_length
    }

    pub fn min_dist(&self) -> f64 {
        self.min_dist
    }

    /// Repulsion felt by a node at `at` from a body at `from`: `C·K²/d²`, pointing away from it.
    ///
    /// Coincident positions push `at` along `+x`.
    pub fn repulsion(&self, at: Vec2D, from: Vec2D) -> Vec2D {
        self.repulsion_or(at, from, Vec2D::new(1.0, 0.0))
    }

    pub(crate) fn repulsion_or(&self, at: Vec2D, from: Vec2D, coincident_dir: Vec2D) -> Vec2D {
        let mut dir = Vec2D::displacement(at, from);
        let len = dir.norm();
        if len > 0.0 {
            dir.normalize();
        } else {
            dir = coincident_dir;
        }
        let d = len.max(self.min_dist);
        let magnitude = (self.strength * self.ideal_length_sq) / (d * d);
        dir.scale(magnitude);
        dir
    }

    /// Spring pull on a node at `at` toward a neighbor at `toward`: magnitude `d/K`.
    ///
    /// Coincident endpoints have no direction and exert nothing.
    pub fn spring(&self, at: Vec2D, toward: Vec2D) -> Vec2D {
        let mut dir = Vec2D::displacement(at, toward);
        let len = dir.norm();
        if len == 0.0 {
            return Vec2D::zero();
        }
        dir.normalize();
        let d = len.max(self.min_dist);
        dir.scale(-d / self.ideal_length);
        dir
    }
}

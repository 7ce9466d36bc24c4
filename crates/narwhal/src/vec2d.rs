//! Two-dimensional vector used for positions, velocities and force accumulation.

use nalgebra as na;

use crate::graph::Point;

/// A 2D vector backed by `nalgebra::Vector2<f64>`.
///
/// In-place operations (`set`, `add`, `sub`, `scale`, `normalize`) return `&mut Self` so they can
/// be chained; the associated helpers (`unit`, `proj`, `distance`, `displacement`, `dot`) always
/// produce new values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2D(na::Vector2<f64>);

impl Vec2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self(na::Vector2::new(x, y))
    }

    pub fn zero() -> Self {
        Self(na::Vector2::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0
    }

    pub fn set(&mut self, v: Vec2D) -> &mut Self {
        self.0 = v.0;
        self
    }

    pub fn add(&mut self, v: Vec2D) -> &mut Self {
        self.0 += v.0;
        self
    }

    pub fn sub(&mut self, v: Vec2D) -> &mut Self {
        self.0 -= v.0;
        self
    }

    pub fn scale(&mut self, k: f64) -> &mut Self {
        self.0 *= k;
        self
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Scales this vector to unit length.
    ///
    /// A zero vector has no direction and is left untouched instead of turning into NaNs.
    pub fn normalize(&mut self) -> &mut Self {
        let norm = self.norm();
        if norm > 0.0 {
            self.0 /= norm;
        }
        self
    }

    pub fn negate(&self) -> Vec2D {
        Vec2D(-self.0)
    }

    /// Normalized copy of `v` (zero stays zero).
    pub fn unit(v: Vec2D) -> Vec2D {
        let mut out = v;
        out.normalize();
        out
    }

    /// Projection of `v1` onto the direction of `v2`.
    pub fn proj(v1: Vec2D, v2: Vec2D) -> Vec2D {
        let mut dir = Vec2D::unit(v2);
        let along = Vec2D::dot(v1, dir);
        dir.scale(along);
        dir
    }

    pub fn distance(v1: Vec2D, v2: Vec2D) -> f64 {
        Vec2D::displacement(v1, v2).norm()
    }

    /// `v1 - v2`: points from `v2` toward `v1`.
    pub fn displacement(v1: Vec2D, v2: Vec2D) -> Vec2D {
        Vec2D(v1.0 - v2.0)
    }

    pub fn dot(v1: Vec2D, v2: Vec2D) -> f64 {
        v1.0.dot(&v2.0)
    }
}

impl Default for Vec2D {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::AddAssign for Vec2D {
    fn add_assign(&mut self, rhs: Vec2D) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Vec2D {
    fn sub_assign(&mut self, rhs: Vec2D) {
        self.0 -= rhs.0;
    }
}

impl std::ops::MulAssign<f64> for Vec2D {
    fn mul_assign(&mut self, rhs: f64) {
        self.0 *= rhs;
    }
}

impl std::ops::Neg for Vec2D {
    type Output = Vec2D;

    fn neg(self) -> Vec2D {
        self.negate()
    }
}

impl From<Point> for Vec2D {
    fn from(p: Point) -> Self {
        Vec2D::new(p.x, p.y)
    }
}

impl From<Vec2D> for Point {
    fn from(v: Vec2D) -> Self {
        Point { x: v.x(), y: v.y() }
    }
}

impl From<(f64, f64)> for Vec2D {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2D::new(x, y)
    }
}

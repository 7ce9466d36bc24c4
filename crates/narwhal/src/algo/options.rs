use crate::error::{Error, Result};

/// How node positions are initialized before any physics runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Seeding {
    /// Square grid with `spacing`-sized cells, filled row by row in node order.
    ///
    /// Random starts take noticeably longer to untangle, so this is the default.
    #[default]
    Grid,
    /// Uniform in `[0, sqrt(N) * spacing)²`.
    Random,
    /// Keep input positions; nodes without one fall back to their grid slot.
    Input,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ForceOptions {
    /// Equilibrium distance between two connected nodes.
    pub spacing: f64,
    /// Relative strength `C` of repulsion versus attraction.
    pub strength: f64,
    /// Distance floor used by the force laws. Defaults to `spacing / 40`.
    pub min_dist: Option<f64>,
    pub init_step_size: f64,
    /// Multiplier applied to the step size when energy does not improve (divisor when it does).
    pub cooling_factor: f64,
    /// Consecutive improving iterations required before the step size grows.
    pub max_cooling_exponent: usize,
    /// Stale streak that ends a run. Defaults to `max_cooling_exponent + 5`.
    pub max_stale_iterations: Option<usize>,
    /// Relative energy change below which an iteration counts as stale.
    pub stale_threshold: f64,
    /// Iterations run before staleness is evaluated at all.
    pub min_iterations: usize,
    /// Hard cap on iterations for a run to convergence.
    pub max_iterations: usize,
    /// Default kick bound. Defaults to `5 * spacing`.
    pub kick_magnitude: Option<f64>,
    pub seeding: Seeding,
    pub random_seed: u64,
}

impl ForceOptions {
    /// Iteration floor for `min_iterations`.
    pub const ITERATION_FLOOR: usize = 3;

    pub fn min_dist(&self) -> f64 {
        self.min_dist.unwrap_or(self.spacing / 40.0)
    }

    pub fn max_stale_iterations(&self) -> usize {
        self.max_stale_iterations.unwrap_or(self.max_cooling_exponent + 5)
    }

    pub fn kick_magnitude(&self) -> f64 {
        self.kick_magnitude.unwrap_or(self.spacing * 5.0)
    }

    /// Ideal edge length `K = spacing / cbrt(C)`.
    pub fn ideal_length(&self) -> f64 {
        self.spacing / self.strength.cbrt()
    }

    pub fn validate(&self) -> Result<()> {
        positive("spacing", self.spacing)?;
        positive("strength", self.strength)?;
        positive("min_dist", self.min_dist())?;
        positive("init_step_size", self.init_step_size)?;
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(invalid(
                "cooling_factor",
                self.cooling_factor,
                "must be strictly between 0 and 1",
            ));
        }
        if self.max_cooling_exponent == 0 {
            return Err(invalid(
                "max_cooling_exponent",
                self.max_cooling_exponent,
                "must be greater than 0",
            ));
        }
        if self.max_stale_iterations() == 0 {
            return Err(invalid(
                "max_stale_iterations",
                self.max_stale_iterations(),
                "must be greater than 0",
            ));
        }
        positive("stale_threshold", self.stale_threshold)?;
        if self.min_iterations < Self::ITERATION_FLOOR {
            return Err(invalid(
                "min_iterations",
                self.min_iterations,
                "must be at least 3",
            ));
        }
        if self.max_iterations < self.min_iterations {
            return Err(invalid(
                "max_iterations",
                self.max_iterations,
                "must not be less than min_iterations",
            ));
        }
        non_negative("kick_magnitude", self.kick_magnitude())?;
        Ok(())
    }
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            spacing: 100.0,
            strength: 1.0,
            min_dist: None,
            init_step_size: 1.0,
            cooling_factor: 0.9,
            max_cooling_exponent: 5,
            max_stale_iterations: None,
            stale_threshold: 0.02,
            min_iterations: 500,
            max_iterations: 1000,
            kick_magnitude: None,
            seeding: Seeding::Grid,
            random_seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    pub spacing: f64,
}

impl GridOptions {
    pub fn validate(&self) -> Result<()> {
        positive("spacing", self.spacing)
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { spacing: 100.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RandomOptions {
    pub spacing: f64,
    pub random_seed: u64,
}

impl RandomOptions {
    pub fn validate(&self) -> Result<()> {
        positive("spacing", self.spacing)
    }
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            spacing: 100.0,
            random_seed: 0,
        }
    }
}

fn invalid(name: &'static str, value: impl std::fmt::Display, reason: &'static str) -> Error {
    Error::InvalidOption {
        name,
        value: value.to_string(),
        reason,
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be finite and greater than 0"))
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be finite and not negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::ForceOptions;
    use crate::error::Error;

    #[test]
    fn defaults_are_valid_and_derive_dependent_values() {
        let opts = ForceOptions::default();
        opts.validate().unwrap();
        assert_eq!(opts.min_dist(), 2.5);
        assert_eq!(opts.max_stale_iterations(), 10);
        assert_eq!(opts.kick_magnitude(), 500.0);
        assert!((opts.ideal_length() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn derived_defaults_follow_spacing() {
        let opts = ForceOptions {
            spacing: 40.0,
            strength: 8.0,
            ..Default::default()
        };
        assert_eq!(opts.min_dist(), 1.0);
        assert_eq!(opts.kick_magnitude(), 200.0);
        assert!((opts.ideal_length() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            (
                "spacing",
                ForceOptions {
                    spacing: -1.0,
                    ..Default::default()
                },
            ),
            (
                "strength",
                ForceOptions {
                    strength: 0.0,
                    ..Default::default()
                },
            ),
            (
                "cooling_factor",
                ForceOptions {
                    cooling_factor: 1.0,
                    ..Default::default()
                },
            ),
            (
                "min_dist",
                ForceOptions {
                    min_dist: Some(f64::NAN),
                    ..Default::default()
                },
            ),
            (
                "min_dist",
                ForceOptions {
                    min_dist: Some(0.0),
                    ..Default::default()
                },
            ),
            (
                "min_iterations",
                ForceOptions {
                    min_iterations: 2,
                    ..Default::default()
                },
            ),
            (
                "max_iterations",
                ForceOptions {
                    min_iterations: 10,
                    max_iterations: 9,
                    ..Default::default()
                },
            ),
            (
                "max_stale_iterations",
                ForceOptions {
                    max_stale_iterations: Some(0),
                    ..Default::default()
                },
            ),
        ];
        for (field, opts) in cases {
            match opts.validate() {
                Err(Error::InvalidOption { name, .. }) => assert_eq!(name, field),
                other => panic!("{field}: expected InvalidOption, got {other:?}"),
            }
        }
    }
}

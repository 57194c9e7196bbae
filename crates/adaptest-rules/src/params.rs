//! Plain-data descriptors from which default components are constructed.
//!
//! These carry no behavior of their own. They are what a declarative session
//! config deserializes into, and what the default constructors of each role
//! look for among the ingredients.

use serde::{Deserialize, Serialize};

fn positive(value: f64) -> bool {
    value > 0.0
}

fn ordered(lo: f64, hi: f64) -> bool {
    lo < hi
}

/// Prior distribution over ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbilityPrior {
    Normal { mean: f64, std_dev: f64 },
    Uniform { lo: f64, hi: f64 },
}

impl AbilityPrior {
    pub fn standard_normal() -> Self {
        Self::Normal {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::Normal { std_dev, .. } if !positive(std_dev) => {
                Err(format!("std_dev must be positive, got {std_dev}"))
            }
            Self::Uniform { lo, hi } if !ordered(lo, hi) => {
                Err(format!("lo must be below hi, got [{lo}, {hi}]"))
            }
            _ => Ok(()),
        }
    }
}

/// A fixed grid over the ability scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub lo: f64,
    pub hi: f64,
    pub points: usize,
}

impl Grid {
    pub fn new(lo: f64, hi: f64, points: usize) -> Self {
        Self { lo, hi, points }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !ordered(self.lo, self.hi) {
            return Err(format!(
                "grid lo must be below hi, got [{}, {}]",
                self.lo, self.hi
            ));
        }
        if self.points < 2 {
            return Err(format!("grid needs at least 2 points, got {}", self.points));
        }
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(-6.0, 6.0, 61)
    }
}

/// How expectations over ability are integrated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Integrator {
    Grid(Grid),
    Quadrature { order: usize },
}

impl Integrator {
    /// The grid, when this integrator evaluates on one.
    pub fn grid(&self) -> Option<Grid> {
        match self {
            Self::Grid(grid) => Some(*grid),
            Self::Quadrature { .. } => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Grid(grid) => grid.validate(),
            Self::Quadrature { order: 0 } => Err("quadrature order must be at least 1".into()),
            Self::Quadrature { .. } => Ok(()),
        }
    }
}

/// How a point estimate of ability is optimized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Optimizer {
    NewtonRaphson { max_iterations: usize },
    GoldenSection { tolerance: f64 },
}

impl Optimizer {
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::NewtonRaphson { max_iterations: 0 } => {
                Err("max_iterations must be at least 1".into())
            }
            Self::GoldenSection { tolerance } if !positive(tolerance) => {
                Err(format!("tolerance must be positive, got {tolerance}"))
            }
            _ => Ok(()),
        }
    }
}

/// Which built-in tracker to construct when none is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerKind {
    /// Follow the point estimate.
    Point,
    /// Follow the full posterior on a grid.
    Gridded,
}

/// Item-selection criterion for the built-in next-item rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Maximize Fisher information at the current point estimate.
    MaxInformation,
    /// Pick the item whose difficulty is closest to the point estimate.
    Urry,
    /// Minimize expected posterior variance. Needs an ability distribution.
    ExpectedVariance,
}

impl Criterion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MaxInformation => "max_information",
            Self::Urry => "urry",
            Self::ExpectedVariance => "expected_variance",
        }
    }

    /// Whether the criterion is evaluated against a posterior distribution
    /// rather than a point estimate.
    pub fn needs_distribution(self) -> bool {
        matches!(self, Self::ExpectedVariance)
    }
}

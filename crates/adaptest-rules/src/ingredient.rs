//! Ingredients: the unordered bag a rule-set is resolved from.

use crate::capability::{AbilityEstimator, AbilityTracker, NextItemRule, TerminationCondition};
use crate::params::{AbilityPrior, Criterion, Grid, Integrator, Optimizer, TrackerKind};
use std::sync::Arc;

/// A single caller-supplied value.
///
/// The first four variants pass an already built component through as-is.
/// The rest are descriptors the default constructors draw on.
#[derive(Debug, Clone)]
pub enum Ingredient {
    AbilityEstimator(Arc<dyn AbilityEstimator>),
    AbilityTracker(Arc<dyn AbilityTracker>),
    NextItemRule(Arc<dyn NextItemRule>),
    TerminationCondition(Arc<dyn TerminationCondition>),
    Prior(AbilityPrior),
    Integrator(Integrator),
    Optimizer(Optimizer),
    Tracker(TrackerKind),
    Criterion(Criterion),
    MaxItems(usize),
}

impl Ingredient {
    pub fn estimator(estimator: impl AbilityEstimator + 'static) -> Self {
        Self::AbilityEstimator(Arc::new(estimator))
    }

    pub fn tracker(tracker: impl AbilityTracker + 'static) -> Self {
        Self::AbilityTracker(Arc::new(tracker))
    }

    pub fn next_item_rule(rule: impl NextItemRule + 'static) -> Self {
        Self::NextItemRule(Arc::new(rule))
    }

    pub fn termination_condition(condition: impl TerminationCondition + 'static) -> Self {
        Self::TerminationCondition(Arc::new(condition))
    }

    /// Stable label for logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AbilityEstimator(_) => "ability_estimator",
            Self::AbilityTracker(_) => "ability_tracker",
            Self::NextItemRule(_) => "next_item_rule",
            Self::TerminationCondition(_) => "termination_condition",
            Self::Prior(_) => "prior",
            Self::Integrator(_) => "integrator",
            Self::Optimizer(_) => "optimizer",
            Self::Tracker(_) => "tracker",
            Self::Criterion(_) => "criterion",
            Self::MaxItems(_) => "max_items",
        }
    }

    /// One-line description of the value carried.
    pub fn describe(&self) -> String {
        match self {
            Self::AbilityEstimator(e) => e.name().to_string(),
            Self::AbilityTracker(t) => t.name().to_string(),
            Self::NextItemRule(r) => r.name().to_string(),
            Self::TerminationCondition(c) => c.name().to_string(),
            Self::Prior(p) => format!("{p:?}"),
            Self::Integrator(i) => format!("{i:?}"),
            Self::Optimizer(o) => format!("{o:?}"),
            Self::Tracker(k) => format!("{k:?}"),
            Self::Criterion(c) => c.as_str().to_string(),
            Self::MaxItems(n) => n.to_string(),
        }
    }
}

impl From<AbilityPrior> for Ingredient {
    fn from(prior: AbilityPrior) -> Self {
        Self::Prior(prior)
    }
}

impl From<Integrator> for Ingredient {
    fn from(integrator: Integrator) -> Self {
        Self::Integrator(integrator)
    }
}

impl From<Optimizer> for Ingredient {
    fn from(optimizer: Optimizer) -> Self {
        Self::Optimizer(optimizer)
    }
}

impl From<TrackerKind> for Ingredient {
    fn from(kind: TrackerKind) -> Self {
        Self::Tracker(kind)
    }
}

impl From<Criterion> for Ingredient {
    fn from(criterion: Criterion) -> Self {
        Self::Criterion(criterion)
    }
}

// Descriptor lookups. Each returns the first match in scan order.

pub(crate) fn first_prior(ingredients: &[Ingredient]) -> Option<AbilityPrior> {
    ingredients.iter().find_map(|i| match i {
        Ingredient::Prior(prior) => Some(*prior),
        _ => None,
    })
}

pub(crate) fn first_integrator(ingredients: &[Ingredient]) -> Option<Integrator> {
    ingredients.iter().find_map(|i| match i {
        Ingredient::Integrator(integrator) => Some(*integrator),
        _ => None,
    })
}

/// First integrator that evaluates on a grid, skipping any that don't.
pub(crate) fn first_grid(ingredients: &[Ingredient]) -> Option<Grid> {
    ingredients.iter().find_map(|i| match i {
        Ingredient::Integrator(integrator) => integrator.grid(),
        _ => None,
    })
}

pub(crate) fn first_optimizer(ingredients: &[Ingredient]) -> Option<Optimizer> {
    ingredients.iter().find_map(|i| match i {
        Ingredient::Optimizer(optimizer) => Some(*optimizer),
        _ => None,
    })
}

pub(crate) fn first_tracker_kind(ingredients: &[Ingredient]) -> Option<TrackerKind> {
    ingredients.iter().find_map(|i| match i {
        Ingredient::Tracker(kind) => Some(*kind),
        _ => None,
    })
}

pub(crate) fn first_criterion(ingredients: &[Ingredient]) -> Option<Criterion> {
    ingredients.iter().find_map(|i| match i {
        Ingredient::Criterion(criterion) => Some(*criterion),
        _ => None,
    })
}

pub(crate) fn first_max_items(ingredients: &[Ingredient]) -> Option<usize> {
    ingredients.iter().find_map(|i| match i {
        Ingredient::MaxItems(n) => Some(*n),
        _ => None,
    })
}

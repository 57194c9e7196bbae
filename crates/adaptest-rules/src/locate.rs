//! Type-directed component locator.
//!
//! Every role a rule-set needs is named by a marker type implementing
//! [`Role`]. A role knows which ingredient variant passes a ready-made
//! component through, and how to build a default from the bag when none
//! was supplied. [`locate`] tries the first, then the second, and reports
//! failure as a value.

use crate::capability::{AbilityEstimator, NextItemRule, TerminationCondition};
use crate::chain::TrackerChain;
use crate::components::{
    default_estimator, default_next_item_rule, default_termination, default_tracker,
};
use crate::error::Component;
use crate::ingredient::Ingredient;
use std::sync::Arc;

/// Components resolved before the role currently being located.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub ability_estimator: Option<Arc<dyn AbilityEstimator>>,
    pub ability_tracker: Option<TrackerChain>,
}

impl Bindings {
    pub fn with_estimator(mut self, estimator: Arc<dyn AbilityEstimator>) -> Self {
        self.ability_estimator = Some(estimator);
        self
    }

    pub fn with_tracker(mut self, tracker: TrackerChain) -> Self {
        self.ability_tracker = Some(tracker);
        self
    }
}

/// Outcome of locating one role.
#[derive(Debug, Clone)]
pub enum Located<T> {
    /// Passed through from the ingredients unchanged.
    Supplied(T),
    /// Built by the role's default constructor.
    Constructed(T),
    Missing,
}

impl<T> Located<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Supplied(value) | Self::Constructed(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn origin(&self) -> &'static str {
        match self {
            Self::Supplied(_) => "supplied",
            Self::Constructed(_) => "constructed",
            Self::Missing => "missing",
        }
    }
}

/// A role a rule-set component fills.
pub trait Role {
    type Output;

    /// The rule-set field this role resolves.
    const COMPONENT: Component;

    /// Pass-through: the component carried by `ingredient`, if it fills
    /// this role.
    fn pick(ingredient: &Ingredient) -> Option<Self::Output>;

    /// Build a default from the ingredients and earlier bindings.
    fn construct(ingredients: &[Ingredient], bindings: &Bindings) -> Option<Self::Output>;
}

/// Locate a component for role `R`.
///
/// The first ingredient that already fills the role wins. Only when none
/// does is the role's default constructor consulted.
pub fn locate<R: Role>(ingredients: &[Ingredient], bindings: &Bindings) -> Located<R::Output> {
    if let Some(found) = ingredients.iter().find_map(R::pick) {
        return Located::Supplied(found);
    }
    match R::construct(ingredients, bindings) {
        Some(built) => Located::Constructed(built),
        None => Located::Missing,
    }
}

pub struct EstimatorRole;

impl Role for EstimatorRole {
    type Output = Arc<dyn AbilityEstimator>;
    const COMPONENT: Component = Component::AbilityEstimator;

    fn pick(ingredient: &Ingredient) -> Option<Self::Output> {
        match ingredient {
            Ingredient::AbilityEstimator(estimator) => Some(Arc::clone(estimator)),
            _ => None,
        }
    }

    fn construct(ingredients: &[Ingredient], _bindings: &Bindings) -> Option<Self::Output> {
        default_estimator(ingredients)
    }
}

/// Resolves to a chain so the no-op tracker is a valid outcome.
pub struct TrackerRole;

impl Role for TrackerRole {
    type Output = TrackerChain;
    const COMPONENT: Component = Component::AbilityTracker;

    fn pick(ingredient: &Ingredient) -> Option<Self::Output> {
        match ingredient {
            Ingredient::AbilityTracker(tracker) => Some(TrackerChain::leaf(Arc::clone(tracker))),
            _ => None,
        }
    }

    fn construct(ingredients: &[Ingredient], bindings: &Bindings) -> Option<Self::Output> {
        default_tracker(ingredients, bindings.ability_estimator.as_ref()?)
    }
}

pub struct NextItemRuleRole;

impl Role for NextItemRuleRole {
    type Output = Arc<dyn NextItemRule>;
    const COMPONENT: Component = Component::NextItemRule;

    fn pick(ingredient: &Ingredient) -> Option<Self::Output> {
        match ingredient {
            Ingredient::NextItemRule(rule) => Some(Arc::clone(rule)),
            _ => None,
        }
    }

    fn construct(ingredients: &[Ingredient], bindings: &Bindings) -> Option<Self::Output> {
        let estimator = bindings.ability_estimator.as_ref()?;
        match &bindings.ability_tracker {
            Some(tracker) => default_next_item_rule(ingredients, estimator, tracker),
            None => default_next_item_rule(ingredients, estimator, &TrackerChain::NoOp),
        }
    }
}

pub struct TerminationRole;

impl Role for TerminationRole {
    type Output = Arc<dyn TerminationCondition>;
    const COMPONENT: Component = Component::TerminationCondition;

    fn pick(ingredient: &Ingredient) -> Option<Self::Output> {
        match ingredient {
            Ingredient::TerminationCondition(condition) => Some(Arc::clone(condition)),
            _ => None,
        }
    }

    fn construct(ingredients: &[Ingredient], _bindings: &Bindings) -> Option<Self::Output> {
        default_termination(ingredients)
    }
}

//! Built-in component families.
//!
//! Each family knows how to build itself from a bag of ingredients plus the
//! dependencies resolved before it. The locator calls these only when the
//! caller did not supply a ready-made component for the role.
//!
//! The numerical work these components stand for (posterior integration,
//! mode finding, information maximization) lives in the session runtime.
//! Here they are descriptors with identity.

use crate::capability::{
    AbilityEstimator, AbilityTracker, NextItemRule, Part, TerminationCondition, TrackedResponses,
};
use crate::chain::TrackerChain;
use crate::ingredient::{
    Ingredient, first_criterion, first_grid, first_integrator, first_max_items, first_optimizer,
    first_prior, first_tracker_kind,
};
use crate::params::{AbilityPrior, Criterion, Grid, Integrator, Optimizer, TrackerKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ─── Estimators ─────────────────────────────────────────────────────────────

/// Posterior (or likelihood) mean, integrated with `integrator`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanAbilityEstimator {
    pub prior: Option<AbilityPrior>,
    pub integrator: Integrator,
}

impl AbilityEstimator for MeanAbilityEstimator {
    fn name(&self) -> &str {
        "mean"
    }
}

/// Posterior mode (MAP), or maximum likelihood without a prior.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeAbilityEstimator {
    pub prior: Option<AbilityPrior>,
    pub optimizer: Optimizer,
}

impl AbilityEstimator for ModeAbilityEstimator {
    fn name(&self) -> &str {
        if self.prior.is_some() { "mode" } else { "max_likelihood" }
    }
}

/// Default estimator: a mean estimator when an integrator is available,
/// otherwise a mode estimator when an optimizer is.
pub fn default_estimator(ingredients: &[Ingredient]) -> Option<Arc<dyn AbilityEstimator>> {
    let prior = first_prior(ingredients);
    if let Some(integrator) = first_integrator(ingredients) {
        return Some(Arc::new(MeanAbilityEstimator { prior, integrator }));
    }
    let optimizer = first_optimizer(ingredients)?;
    Some(Arc::new(ModeAbilityEstimator { prior, optimizer }))
}

// ─── Trackers ───────────────────────────────────────────────────────────────

/// Follows the point estimate produced by `estimator`.
#[derive(Debug)]
pub struct PointAbilityTracker {
    estimator: Arc<dyn AbilityEstimator>,
    observed: AtomicUsize,
}

impl PointAbilityTracker {
    pub fn new(estimator: Arc<dyn AbilityEstimator>) -> Self {
        Self {
            estimator,
            observed: AtomicUsize::new(0),
        }
    }

    pub fn estimator(&self) -> &Arc<dyn AbilityEstimator> {
        &self.estimator
    }

    /// Length of the response history at the most recent update.
    pub fn observed(&self) -> usize {
        self.observed.load(Ordering::Acquire)
    }
}

impl AbilityTracker for PointAbilityTracker {
    fn name(&self) -> &str {
        "point"
    }

    fn track(&self, responses: &TrackedResponses) {
        self.observed.store(responses.len(), Ordering::Release);
    }
}

/// Follows the full ability posterior evaluated on `grid`.
#[derive(Debug)]
pub struct GriddedAbilityTracker {
    estimator: Arc<dyn AbilityEstimator>,
    grid: Grid,
    observed: AtomicUsize,
}

impl GriddedAbilityTracker {
    pub fn new(estimator: Arc<dyn AbilityEstimator>, grid: Grid) -> Self {
        Self {
            estimator,
            grid,
            observed: AtomicUsize::new(0),
        }
    }

    pub fn estimator(&self) -> &Arc<dyn AbilityEstimator> {
        &self.estimator
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn observed(&self) -> usize {
        self.observed.load(Ordering::Acquire)
    }
}

impl AbilityTracker for GriddedAbilityTracker {
    fn name(&self) -> &str {
        "gridded"
    }

    fn track(&self, responses: &TrackedResponses) {
        self.observed.store(responses.len(), Ordering::Release);
    }

    fn tracks_distribution(&self) -> bool {
        true
    }
}

/// Default tracker for `estimator`.
///
/// With no tracker requested this is the no-op chain. A gridded tracker
/// needs a grid integrator among the ingredients.
pub fn default_tracker(
    ingredients: &[Ingredient],
    estimator: &Arc<dyn AbilityEstimator>,
) -> Option<TrackerChain> {
    let tracker: Arc<dyn AbilityTracker> = match first_tracker_kind(ingredients) {
        None => return Some(TrackerChain::NoOp),
        Some(TrackerKind::Point) => Arc::new(PointAbilityTracker::new(Arc::clone(estimator))),
        Some(TrackerKind::Gridded) => Arc::new(GriddedAbilityTracker::new(
            Arc::clone(estimator),
            first_grid(ingredients)?,
        )),
    };
    Some(TrackerChain::leaf(tracker))
}

// ─── Next-item rules ────────────────────────────────────────────────────────

/// Picks the item optimizing `criterion` against the current ability state.
///
/// Criteria that need a posterior either read it from the session's tracker
/// chain or carry their own `posterior` tracker.
#[derive(Debug)]
pub struct CriterionNextItemRule {
    criterion: Criterion,
    estimator: Arc<dyn AbilityEstimator>,
    posterior: Option<Arc<dyn AbilityTracker>>,
}

impl CriterionNextItemRule {
    pub fn new(criterion: Criterion, estimator: Arc<dyn AbilityEstimator>) -> Self {
        Self {
            criterion,
            estimator,
            posterior: None,
        }
    }

    /// Attach a tracker private to this rule.
    pub fn with_posterior(mut self, posterior: Arc<dyn AbilityTracker>) -> Self {
        self.posterior = Some(posterior);
        self
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn estimator(&self) -> &Arc<dyn AbilityEstimator> {
        &self.estimator
    }

    pub fn posterior(&self) -> Option<&Arc<dyn AbilityTracker>> {
        self.posterior.as_ref()
    }
}

impl NextItemRule for CriterionNextItemRule {
    fn name(&self) -> &str {
        self.criterion.as_str()
    }

    fn parts(&self) -> Vec<Part<'_>> {
        vec![
            Part::estimator(&self.estimator),
            match &self.posterior {
                Some(tracker) => Part::Tracker(tracker),
                None => Part::Opaque,
            },
        ]
    }
}

/// Default next-item rule built around the first criterion ingredient.
///
/// A distribution-based criterion reuses the session tracker when it already
/// follows a posterior. Otherwise the rule gets a gridded tracker of its own,
/// which requires a grid integrator.
pub fn default_next_item_rule(
    ingredients: &[Ingredient],
    estimator: &Arc<dyn AbilityEstimator>,
    tracker: &TrackerChain,
) -> Option<Arc<dyn NextItemRule>> {
    let criterion = first_criterion(ingredients)?;
    let rule = CriterionNextItemRule::new(criterion, Arc::clone(estimator));
    if !criterion.needs_distribution() || tracker.tracks_distribution() {
        return Some(Arc::new(rule));
    }
    let grid = first_grid(ingredients)?;
    let posterior = GriddedAbilityTracker::new(Arc::clone(estimator), grid);
    Some(Arc::new(rule.with_posterior(Arc::new(posterior))))
}

// ─── Termination ────────────────────────────────────────────────────────────

/// Stops once `max_items` responses have been tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedItemsTermination {
    pub max_items: usize,
}

impl TerminationCondition for FixedItemsTermination {
    fn name(&self) -> &str {
        "fixed_items"
    }

    fn should_stop(&self, responses: &TrackedResponses) -> bool {
        responses.len() >= self.max_items
    }
}

pub fn default_termination(ingredients: &[Ingredient]) -> Option<Arc<dyn TerminationCondition>> {
    let max_items = first_max_items(ingredients)?;
    Some(Arc::new(FixedItemsTermination { max_items }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_ingredient() -> Ingredient {
        Ingredient::from(Integrator::Grid(Grid::new(-4.0, 4.0, 41)))
    }

    #[test]
    fn estimator_prefers_integrator_over_optimizer() {
        let ingredients = vec![
            Ingredient::from(Optimizer::NewtonRaphson { max_iterations: 20 }),
            grid_ingredient(),
        ];
        let estimator = default_estimator(&ingredients).unwrap();
        assert_eq!(estimator.name(), "mean");
    }

    #[test]
    fn mode_estimator_without_prior_is_max_likelihood() {
        let ingredients = vec![Ingredient::from(Optimizer::GoldenSection { tolerance: 1e-4 })];
        assert_eq!(
            default_estimator(&ingredients).unwrap().name(),
            "max_likelihood"
        );

        let with_prior = vec![
            Ingredient::from(AbilityPrior::standard_normal()),
            Ingredient::from(Optimizer::GoldenSection { tolerance: 1e-4 }),
        ];
        assert_eq!(default_estimator(&with_prior).unwrap().name(), "mode");
    }

    #[test]
    fn estimator_needs_integrator_or_optimizer() {
        let ingredients = vec![Ingredient::from(AbilityPrior::standard_normal())];
        assert!(default_estimator(&ingredients).is_none());
    }

    #[test]
    fn tracker_defaults_to_noop() {
        let estimator = default_estimator(&[grid_ingredient()]).unwrap();
        let chain = default_tracker(&[], &estimator).unwrap();
        assert!(chain.is_noop());
    }

    #[test]
    fn gridded_tracker_requires_grid() {
        let estimator = default_estimator(&[grid_ingredient()]).unwrap();
        let quadrature_only = vec![
            Ingredient::from(TrackerKind::Gridded),
            Ingredient::from(Integrator::Quadrature { order: 10 }),
        ];
        assert!(default_tracker(&quadrature_only, &estimator).is_none());

        let with_grid = vec![Ingredient::from(TrackerKind::Gridded), grid_ingredient()];
        let chain = default_tracker(&with_grid, &estimator).unwrap();
        assert_eq!(chain.names(), vec!["gridded"]);
        assert!(chain.tracks_distribution());
    }

    #[test]
    fn expected_variance_reuses_distribution_tracker() {
        let ingredients = vec![
            Ingredient::from(Criterion::ExpectedVariance),
            Ingredient::from(TrackerKind::Gridded),
            grid_ingredient(),
        ];
        let estimator = default_estimator(&ingredients).unwrap();
        let tracker = default_tracker(&ingredients, &estimator).unwrap();
        let rule = default_next_item_rule(&ingredients, &estimator, &tracker).unwrap();
        assert_eq!(rule.name(), "expected_variance");
        assert!(
            rule.parts()
                .iter()
                .all(|part| !matches!(part, Part::Tracker(_)))
        );
    }

    #[test]
    fn expected_variance_builds_own_posterior() {
        let ingredients = vec![Ingredient::from(Criterion::ExpectedVariance), grid_ingredient()];
        let estimator = default_estimator(&ingredients).unwrap();
        let rule = default_next_item_rule(&ingredients, &estimator, &TrackerChain::NoOp).unwrap();
        assert!(
            rule.parts()
                .iter()
                .any(|part| matches!(part, Part::Tracker(t) if t.name() == "gridded"))
        );
    }

    #[test]
    fn expected_variance_without_grid_is_missing() {
        let ingredients = vec![
            Ingredient::from(Criterion::ExpectedVariance),
            Ingredient::from(Optimizer::NewtonRaphson { max_iterations: 10 }),
        ];
        let estimator = default_estimator(&ingredients).unwrap();
        assert!(default_next_item_rule(&ingredients, &estimator, &TrackerChain::NoOp).is_none());
    }

    #[test]
    fn fixed_items_termination_counts_responses() {
        let condition = FixedItemsTermination { max_items: 2 };
        let mut responses = TrackedResponses::new();
        assert!(!condition.should_stop(&responses));
        responses.push(0, 1);
        responses.push(1, 0);
        assert!(condition.should_stop(&responses));
    }

    #[test]
    fn trackers_record_history_length() {
        let estimator = default_estimator(&[grid_ingredient()]).unwrap();
        let tracker = PointAbilityTracker::new(estimator);
        let mut responses = TrackedResponses::new();
        responses.push(7, 1);
        tracker.track(&responses);
        assert_eq!(tracker.observed(), 1);
    }
}

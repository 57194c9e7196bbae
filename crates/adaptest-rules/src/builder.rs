//! Dependent builder: resolves the four rule-set components in order.
//!
//! ```text
//! ability estimator        ← ingredients
//!     │
//! ability tracker          ← ingredients + estimator
//!     │
//! next-item rule           ← ingredients + estimator + tracker
//!     │
//! termination condition    ← ingredients
//!     │
//! compose(rule, tracker)   → final tracker chain
//! ```
//!
//! Each step only sees ingredients and the results of strictly earlier
//! steps. The first missing component aborts the build.

use crate::compose::compose_with_tracker;
use crate::error::RulesError;
use crate::ingredient::Ingredient;
use crate::locate::{
    Bindings, EstimatorRole, Located, NextItemRuleRole, Role, TerminationRole, TrackerRole,
    locate,
};
use crate::rules::CatRules;

/// Resolve a complete rule-set from `ingredients`.
///
/// Fails with [`RulesError::ConfigurationMissing`] naming the first component,
/// in resolution order, that could be neither located nor constructed.
pub fn build_rules(ingredients: &[Ingredient]) -> Result<CatRules, RulesError> {
    tracing::debug!(ingredients = ingredients.len(), "resolving rule-set");

    let ability_estimator = require::<EstimatorRole>(ingredients, &Bindings::default())?;

    let bindings = Bindings::default().with_estimator(ability_estimator.clone());
    let explicit_tracker = require::<TrackerRole>(ingredients, &bindings)?;

    let bindings = bindings.with_tracker(explicit_tracker.clone());
    let next_item = require::<NextItemRuleRole>(ingredients, &bindings)?;

    let termination_condition = require::<TerminationRole>(ingredients, &Bindings::default())?;

    let ability_tracker = compose_with_tracker(&next_item, &explicit_tracker);
    tracing::debug!(trackers = ?ability_tracker.names(), "composed tracker chain");

    Ok(CatRules::with_tracker(
        next_item,
        termination_condition,
        ability_estimator,
        ability_tracker,
    ))
}

fn require<R: Role>(
    ingredients: &[Ingredient],
    bindings: &Bindings,
) -> Result<R::Output, RulesError> {
    let located = locate::<R>(ingredients, bindings);
    let origin = located.origin();
    match located {
        Located::Supplied(value) | Located::Constructed(value) => {
            tracing::debug!(component = %R::COMPONENT, origin, "resolved component");
            Ok(value)
        }
        Located::Missing => {
            tracing::warn!(
                component = %R::COMPONENT,
                "component could not be located or constructed"
            );
            Err(RulesError::ConfigurationMissing(R::COMPONENT))
        }
    }
}

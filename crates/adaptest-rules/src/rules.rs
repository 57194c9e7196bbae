//! The resolved rule-set.

use crate::builder::build_rules;
use crate::capability::{AbilityEstimator, NextItemRule, Part, TerminationCondition};
use crate::chain::TrackerChain;
use crate::error::RulesError;
use crate::ingredient::Ingredient;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub const RULES_SUMMARY_SCHEMA: u32 = 1;
pub const RULES_SUMMARY_KIND: &str = "adaptest.rules_summary.v1";

/// Everything a session loop needs to decide what to ask and when to stop.
///
/// Immutable once built. Share it behind an `Arc` between sessions.
#[derive(Debug, Clone)]
pub struct CatRules {
    next_item: Arc<dyn NextItemRule>,
    termination_condition: Arc<dyn TerminationCondition>,
    ability_estimator: Arc<dyn AbilityEstimator>,
    ability_tracker: TrackerChain,
}

impl CatRules {
    /// Assemble a rule-set from explicit components, with the no-op tracker.
    pub fn new(
        next_item: Arc<dyn NextItemRule>,
        termination_condition: Arc<dyn TerminationCondition>,
        ability_estimator: Arc<dyn AbilityEstimator>,
    ) -> Self {
        Self::with_tracker(
            next_item,
            termination_condition,
            ability_estimator,
            TrackerChain::NoOp,
        )
    }

    /// Assemble a rule-set from explicit components. No resolution happens.
    pub fn with_tracker(
        next_item: Arc<dyn NextItemRule>,
        termination_condition: Arc<dyn TerminationCondition>,
        ability_estimator: Arc<dyn AbilityEstimator>,
        ability_tracker: impl Into<TrackerChain>,
    ) -> Self {
        Self {
            next_item,
            termination_condition,
            ability_estimator,
            ability_tracker: ability_tracker.into(),
        }
    }

    /// Resolve a rule-set from an unordered bag of ingredients.
    ///
    /// See [`build_rules`] for the resolution order.
    pub fn from_ingredients(ingredients: &[Ingredient]) -> Result<Self, RulesError> {
        build_rules(ingredients)
    }

    pub fn next_item(&self) -> &Arc<dyn NextItemRule> {
        &self.next_item
    }

    pub fn termination_condition(&self) -> &Arc<dyn TerminationCondition> {
        &self.termination_condition
    }

    pub fn ability_estimator(&self) -> &Arc<dyn AbilityEstimator> {
        &self.ability_estimator
    }

    pub fn ability_tracker(&self) -> &TrackerChain {
        &self.ability_tracker
    }

    /// Fields in declaration order, for tracker composition.
    pub fn parts(&self) -> Vec<Part<'_>> {
        vec![
            Part::next_item_rule(&self.next_item),
            Part::termination_condition(&self.termination_condition),
            Part::estimator(&self.ability_estimator),
            Part::Chain(&self.ability_tracker),
        ]
    }

    pub fn summary(&self) -> RulesSummary {
        RulesSummary {
            schema: RULES_SUMMARY_SCHEMA,
            summary_kind: RULES_SUMMARY_KIND.to_string(),
            next_item_rule: self.next_item.name().to_string(),
            termination_condition: self.termination_condition.name().to_string(),
            ability_estimator: self.ability_estimator.name().to_string(),
            ability_trackers: self.ability_tracker.names(),
        }
    }
}

/// Serializable description of a rule-set: component names and the order in
/// which trackers are notified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesSummary {
    pub schema: u32,
    pub summary_kind: String,
    pub next_item_rule: String,
    pub termination_condition: String,
    pub ability_estimator: String,
    pub ability_trackers: Vec<String>,
}

impl RulesSummary {
    /// Deterministic SHA-256 over the canonical JSON encoding.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut digest = Sha256::new();
        digest.update(&bytes);
        format!("{:x}", digest.finalize())
    }
}

//! Capabilities: the four roles a rule-set is assembled from.
//!
//! Each role is an explicit trait. Concrete components implement exactly the
//! roles they can fill, and the locator dispatches on the [`Ingredient`]
//! variant they were supplied under, never on runtime type inspection.
//!
//! Components that contain other components (a next-item rule holding its
//! own posterior tracker, say) expose them through `parts()`, an ordered and
//! fixed enumeration the tracker composer walks.
//!
//! [`Ingredient`]: crate::ingredient::Ingredient

use crate::chain::TrackerChain;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Computes a testee's latent ability from observed responses.
///
/// The estimation itself happens in the session loop; this layer only needs
/// to identify the estimator and look inside it for trackers.
pub trait AbilityEstimator: fmt::Debug + Send + Sync {
    /// Short stable name used in summaries and logs.
    fn name(&self) -> &str;

    /// Sub-components, in declaration order.
    fn parts(&self) -> Vec<Part<'_>> {
        Vec::new()
    }
}

/// Observes how the ability estimate evolves over a session.
///
/// `track` takes `&self`: a chain is shared read-only, so any accumulation a
/// tracker performs must use its own interior synchronization.
pub trait AbilityTracker: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Called once per administered item with the full response history.
    fn track(&self, responses: &TrackedResponses);

    /// Whether this tracker maintains a full ability distribution rather
    /// than a point estimate.
    fn tracks_distribution(&self) -> bool {
        false
    }
}

/// Selects the next item to administer.
pub trait NextItemRule: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn parts(&self) -> Vec<Part<'_>> {
        Vec::new()
    }
}

/// Decides whether a session stops after the current item.
pub trait TerminationCondition: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn should_stop(&self, responses: &TrackedResponses) -> bool;

    fn parts(&self) -> Vec<Part<'_>> {
        Vec::new()
    }
}

/// One sub-value of a composite component, as seen by the tracker composer.
#[derive(Debug)]
pub enum Part<'a> {
    /// A tracker instance.
    Tracker(&'a Arc<dyn AbilityTracker>),

    /// An already composed chain (a rule-set's own tracker field).
    Chain(&'a TrackerChain),

    /// A nested composite, given by its own ordered parts.
    Composite(Vec<Part<'a>>),

    /// Anything that neither tracks nor contains trackers.
    Opaque,
}

impl<'a> Part<'a> {
    pub fn estimator(estimator: &'a Arc<dyn AbilityEstimator>) -> Self {
        Self::nested(estimator.as_ref().parts())
    }

    pub fn next_item_rule(rule: &'a Arc<dyn NextItemRule>) -> Self {
        Self::nested(rule.as_ref().parts())
    }

    pub fn termination_condition(condition: &'a Arc<dyn TerminationCondition>) -> Self {
        Self::nested(condition.as_ref().parts())
    }

    fn nested(parts: Vec<Part<'a>>) -> Self {
        if parts.is_empty() {
            Self::Opaque
        } else {
            Self::Composite(parts)
        }
    }
}

/// A single recorded response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Index of the administered item in the item bank.
    pub item_index: usize,

    /// Response code as returned by the response-acquisition callback.
    pub response: i8,
}

/// The ordered response history of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedResponses {
    responses: Vec<ItemResponse>,
}

impl TrackedResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a response.
    pub fn push(&mut self, item_index: usize, response: i8) {
        self.responses.push(ItemResponse {
            item_index,
            response,
        });
    }

    /// Number of items administered so far.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn last(&self) -> Option<&ItemResponse> {
        self.responses.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemResponse> {
        self.responses.iter()
    }

    /// Whether `item_index` has already been administered.
    pub fn contains_item(&self, item_index: usize) -> bool {
        self.responses.iter().any(|r| r.item_index == item_index)
    }
}

impl<'a> IntoIterator for &'a TrackedResponses {
    type Item = &'a ItemResponse;
    type IntoIter = std::slice::Iter<'a, ItemResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

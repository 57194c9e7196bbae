//! Persistent tracker chain.
//!
//! A chain is a singly linked list over trackers with a distinguished empty
//! element:
//!
//! ```text
//! NoOp                      ← no tracker; identity for concatenation
//! Leaf(t)                   ← exactly one tracker
//! Link(t, rest)             ← one tracker, then the rest of the chain
//! ```
//!
//! Chains are built bottom-up once and never mutated. Tails are shared via
//! `Arc`, so prepending to an existing chain does not copy it.

use crate::capability::{AbilityTracker, TrackedResponses};
use std::sync::Arc;

/// An ordered, immutable sequence of trackers.
#[derive(Debug, Clone, Default)]
pub enum TrackerChain {
    #[default]
    NoOp,
    Leaf(Arc<dyn AbilityTracker>),
    Link(Arc<dyn AbilityTracker>, Arc<TrackerChain>),
}

/// The no-op tracker.
pub const NULL_TRACKER: TrackerChain = TrackerChain::NoOp;

impl TrackerChain {
    pub fn leaf(tracker: Arc<dyn AbilityTracker>) -> Self {
        Self::Leaf(tracker)
    }

    /// Prepend `head` to `rest`.
    ///
    /// Prepending to the no-op chain yields a leaf, never a link with an
    /// empty tail.
    pub fn cons(head: Arc<dyn AbilityTracker>, rest: TrackerChain) -> Self {
        match rest {
            Self::NoOp => Self::Leaf(head),
            rest => Self::Link(head, Arc::new(rest)),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.is_noop()
    }

    /// Head-to-tail traversal.
    pub fn iter(&self) -> Iter<'_> {
        Iter { next: Some(self) }
    }

    /// `self` followed by `tail`. `tail` is shared, not copied.
    pub fn concat(&self, tail: &TrackerChain) -> TrackerChain {
        let heads: Vec<&Arc<dyn AbilityTracker>> = self.iter().collect();
        heads
            .into_iter()
            .rev()
            .fold(tail.clone(), |rest, head| Self::cons(Arc::clone(head), rest))
    }

    /// Hand `responses` to every tracker, head to tail.
    pub fn notify(&self, responses: &TrackedResponses) {
        for tracker in self {
            tracker.track(responses);
        }
    }

    /// Tracker names in traversal order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|t| t.name().to_string()).collect()
    }

    /// Whether any tracker in the chain maintains an ability distribution.
    pub fn tracks_distribution(&self) -> bool {
        self.iter().any(|t| t.tracks_distribution())
    }
}

impl From<Arc<dyn AbilityTracker>> for TrackerChain {
    fn from(tracker: Arc<dyn AbilityTracker>) -> Self {
        Self::Leaf(tracker)
    }
}

/// Two chains are equal when they visit the same tracker instances in the
/// same order.
impl PartialEq for TrackerChain {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl Eq for TrackerChain {}

pub struct Iter<'a> {
    next: Option<&'a TrackerChain>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Arc<dyn AbilityTracker>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next.take()? {
            TrackerChain::NoOp => None,
            TrackerChain::Leaf(tracker) => Some(tracker),
            TrackerChain::Link(tracker, rest) => {
                self.next = Some(rest.as_ref());
                Some(tracker)
            }
        }
    }
}

impl<'a> IntoIterator for &'a TrackerChain {
    type Item = &'a Arc<dyn AbilityTracker>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

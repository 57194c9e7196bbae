//! Tracker composition.
//!
//! Walks a value and every composite nested inside it, collecting each
//! tracker found into a single chain. A session loop then notifies every
//! tracker with one traversal, without trackers knowing about each other.
//!
//! Discovery order is declaration order: the first part holding a tracker
//! becomes the head of the chain.

use crate::capability::{NextItemRule, Part};
use crate::chain::TrackerChain;
use std::sync::Arc;

/// Compose the trackers reachable from `part`.
///
/// - a tracker becomes a leaf;
/// - a chain is taken as-is;
/// - a composite is composed part by part, in order;
/// - anything else contributes nothing.
pub fn compose(part: Part<'_>) -> TrackerChain {
    match part {
        Part::Tracker(tracker) => TrackerChain::leaf(Arc::clone(tracker)),
        Part::Chain(chain) => chain.clone(),
        Part::Composite(parts) => compose_parts(parts),
        Part::Opaque => TrackerChain::NoOp,
    }
}

/// Compose an ordered list of parts, dropping those that yield nothing.
///
/// The result is the no-op chain when no part carries a tracker.
pub fn compose_parts(parts: Vec<Part<'_>>) -> TrackerChain {
    let found: Vec<TrackerChain> = parts
        .into_iter()
        .map(compose)
        .filter(|chain| !chain.is_noop())
        .collect();
    found
        .into_iter()
        .rev()
        .fold(TrackerChain::NoOp, |rest, chain| chain.concat(&rest))
}

/// Compose the trackers nested in `rule`, then put `explicit` in front.
///
/// An explicitly supplied tracker is always traversed before anything the
/// next-item rule carries. A no-op `explicit` leaves the rule's chain as is.
pub fn compose_with_tracker(
    rule: &Arc<dyn NextItemRule>,
    explicit: &TrackerChain,
) -> TrackerChain {
    let nested = compose(Part::next_item_rule(rule));
    explicit.concat(&nested)
}

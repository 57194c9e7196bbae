//! # Adaptest Rules
//!
//! The configuration layer of a computerized adaptive test: given an
//! unordered bag of independently authored ingredients, resolve one coherent
//! set of rules for a session.
//!
//! Resolution is type-directed rather than wired by hand. Each required role
//! (estimator, tracker, next-item rule, termination condition) is located in
//! the ingredient list, or constructed from it when nothing suitable was
//! supplied. Later roles see the results of earlier ones.
//!
//! ## Architecture
//!
//! ```text
//! Ingredient[]          ← Caller-supplied components and descriptors
//!     │
//! locate::<Role>        ← First supplied match, else default construction
//!     │
//! build_rules           ← estimator → tracker → next-item rule → termination
//!     │
//! compose               ← Every reachable tracker folded into one chain
//!     │
//! CatRules              ← Immutable rule-set
//!     │
//! CatLoopConfig         ← Rule-set + response callbacks for the session loop
//! ```
//!
//! Nothing here computes probabilities, draws random numbers or performs I/O
//! (apart from [`SessionConfig::load`]). The records produced are immutable
//! and may be shared read-only across concurrently running sessions.

pub mod builder;
pub mod capability;
pub mod chain;
pub mod components;
pub mod compose;
pub mod config;
pub mod error;
pub mod ingredient;
pub mod locate;
pub mod params;
pub mod rules;
pub mod session;

pub use builder::build_rules;
pub use capability::{
    AbilityEstimator, AbilityTracker, ItemResponse, NextItemRule, Part, TerminationCondition,
    TrackedResponses,
};
pub use chain::{NULL_TRACKER, TrackerChain};
pub use compose::{compose, compose_parts, compose_with_tracker};
pub use config::SessionConfig;
pub use error::{Component, ConfigError, RulesError};
pub use ingredient::Ingredient;
pub use locate::{Bindings, Located, Role, locate};
pub use params::{AbilityPrior, Criterion, Grid, Integrator, Optimizer, TrackerKind};
pub use rules::{CatRules, RulesSummary};
pub use session::{CatLoopConfig, GetResponse, NewResponseCallback};

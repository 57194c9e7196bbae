//! Error types for rule resolution and session config loading.

use std::path::PathBuf;

/// One of the four components every rule-set must carry.
///
/// Variants are declared in resolution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    AbilityEstimator,
    AbilityTracker,
    NextItemRule,
    TerminationCondition,
}

impl Component {
    /// All components, in the order the builder resolves them.
    pub const RESOLUTION_ORDER: [Component; 4] = [
        Component::AbilityEstimator,
        Component::AbilityTracker,
        Component::NextItemRule,
        Component::TerminationCondition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AbilityEstimator => "ability_estimator",
            Self::AbilityTracker => "ability_tracker",
            Self::NextItemRule => "next_item_rule",
            Self::TerminationCondition => "termination_condition",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while resolving a rule-set from ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A required component was neither supplied nor constructible.
    #[error("configuration missing: {0} could not be located or constructed")]
    ConfigurationMissing(Component),
}

impl RulesError {
    /// The component whose absence aborted resolution.
    pub fn component(&self) -> Component {
        match self {
            Self::ConfigurationMissing(component) => *component,
        }
    }
}

/// Errors raised while loading a declarative session config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid session config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A descriptor parsed but carries unusable values.
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Rules(#[from] RulesError),
}

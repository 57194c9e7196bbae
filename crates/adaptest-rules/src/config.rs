//! Declarative session config.
//!
//! A TOML document naming the descriptors a rule-set is built from:
//!
//! ```toml
//! prior = { kind = "normal", mean = 0.0, std_dev = 1.0 }
//! integrator = { kind = "grid", lo = -6.0, hi = 6.0, points = 61 }
//! tracker = "gridded"
//! criterion = "expected_variance"
//! max_items = 20
//! ```
//!
//! Every key is optional; a missing one simply contributes no ingredient,
//! and resolution reports whatever that leaves unresolvable.

use crate::error::ConfigError;
use crate::ingredient::Ingredient;
use crate::params::{AbilityPrior, Criterion, Integrator, Optimizer, TrackerKind};
use crate::rules::CatRules;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<AbilityPrior>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrator: Option<Integrator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<Optimizer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker: Option<TrackerKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion: Option<Criterion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl SessionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prior) = &self.prior {
            prior.validate().map_err(invalid("prior"))?;
        }
        if let Some(integrator) = &self.integrator {
            integrator.validate().map_err(invalid("integrator"))?;
        }
        if let Some(optimizer) = &self.optimizer {
            optimizer.validate().map_err(invalid("optimizer"))?;
        }
        Ok(())
    }

    /// The ingredients this config contributes, in a fixed order.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        let mut ingredients = Vec::new();
        ingredients.extend(self.prior.map(Ingredient::Prior));
        ingredients.extend(self.integrator.map(Ingredient::Integrator));
        ingredients.extend(self.optimizer.map(Ingredient::Optimizer));
        ingredients.extend(self.tracker.map(Ingredient::Tracker));
        ingredients.extend(self.criterion.map(Ingredient::Criterion));
        ingredients.extend(self.max_items.map(Ingredient::MaxItems));
        ingredients
    }

    /// Resolve a rule-set from this config alone.
    pub fn resolve(&self) -> Result<CatRules, ConfigError> {
        Ok(CatRules::from_ingredients(&self.ingredients())?)
    }
}

fn invalid(field: &'static str) -> impl FnOnce(String) -> ConfigError {
    move |reason: String| ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Component, RulesError};
    use crate::params::Grid;

    const FULL: &str = r#"
prior = { kind = "normal", mean = 0.0, std_dev = 1.0 }
integrator = { kind = "grid", lo = -4.0, hi = 4.0, points = 41 }
tracker = "gridded"
criterion = "expected_variance"
max_items = 20
"#;

    #[test]
    fn parses_full_config() {
        let config = SessionConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.prior, Some(AbilityPrior::standard_normal()));
        assert_eq!(
            config.integrator,
            Some(Integrator::Grid(Grid::new(-4.0, 4.0, 41)))
        );
        assert_eq!(config.tracker, Some(TrackerKind::Gridded));
        assert_eq!(config.criterion, Some(Criterion::ExpectedVariance));
        assert_eq!(config.max_items, Some(20));
    }

    #[test]
    fn ingredients_follow_fixed_order() {
        let config = SessionConfig::from_toml_str(FULL).unwrap();
        let kinds: Vec<&str> = config.ingredients().iter().map(Ingredient::kind).collect();
        assert_eq!(
            kinds,
            vec!["prior", "integrator", "tracker", "criterion", "max_items"]
        );
    }

    #[test]
    fn resolves_full_config() {
        let rules = SessionConfig::from_toml_str(FULL).unwrap().resolve().unwrap();
        assert_eq!(rules.ability_estimator().name(), "mean");
        assert_eq!(rules.ability_tracker().names(), vec!["gridded"]);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SessionConfig::from_toml_str("max_itmes = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_invalid_grid() {
        let err = SessionConfig::from_toml_str(
            r#"integrator = { kind = "grid", lo = 2.0, hi = -2.0, points = 10 }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "integrator",
                ..
            }
        ));
    }

    #[test]
    fn incomplete_config_names_missing_component() {
        let config = SessionConfig::from_toml_str(
            r#"
optimizer = { kind = "newton_raphson", max_iterations = 50 }
criterion = "urry"
"#,
        )
        .unwrap();
        let err = config.resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Rules(RulesError::ConfigurationMissing(
                Component::TerminationCondition
            ))
        ));
    }

    #[test]
    fn load_reports_path_on_io_error() {
        let path = std::env::temp_dir().join("adaptest-rules-missing-config.toml");
        let err = SessionConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("adaptest-rules-missing-config.toml"));
    }
}

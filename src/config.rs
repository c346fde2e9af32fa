//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! closure_method = 2
//! include_reflexivity = false
//! warshall_variant = "boolean_or"
//! entity_schemes = ["http://", "https://", "urn:"]
//!
//! [power_union]
//! patience = 1
//!
//! [reasoner]
//! equivalence = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_SCHEMES;
use crate::closure::ClosureMethod;
use crate::closure::power_union::PowerUnionOptions;
use crate::closure::warshall::WarshallVariant;
use crate::error::ConfigError;
use crate::reason::ReasonerConfig;

/// Configuration for the closure engine. Immutable once the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Closure method code: 0 none, 1 union of powers, 2 Warshall, 3 reasoning.
    pub closure_method: ClosureMethod,
    /// Union the identity relation into the result.
    pub include_reflexivity: bool,
    /// Cell update used by Warshall's algorithm (method 2).
    pub warshall_variant: WarshallVariant,
    /// URI scheme prefixes an entity name must start with to be catalogued.
    pub entity_schemes: Vec<String>,
    /// Options for the union-of-powers loop (methods 1 and 3).
    pub power_union: PowerUnionOptions,
    /// Entailment families applied by the reasoner (method 3, verification).
    pub reasoner: ReasonerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            closure_method: ClosureMethod::default(),
            include_reflexivity: false,
            warshall_variant: WarshallVariant::default(),
            entity_schemes: DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect(),
            power_union: PowerUnionOptions::default(),
            reasoner: ReasonerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with the given closure method and reflexivity.
    pub fn new(closure_method: ClosureMethod, include_reflexivity: bool) -> Self {
        Self {
            closure_method,
            include_reflexivity,
            ..Default::default()
        }
    }

    /// Parse a TOML document. `origin` names the source in error messages.
    pub fn from_toml_str(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), method = %config.closure_method, "loaded engine config");
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_toml_str("", "inline").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.closure_method, ClosureMethod::PowerUnion);
        assert_eq!(config.entity_schemes, vec!["http://", "https://"]);
    }

    #[test]
    fn parses_all_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            closure_method = 2
            include_reflexivity = true
            warshall_variant = "add_and_clamp"
            entity_schemes = ["urn:"]

            [power_union]
            patience = 2
            early_stopping = false

            [reasoner]
            equivalence = false
            "#,
            "inline",
        )
        .unwrap();
        assert_eq!(config.closure_method, ClosureMethod::Warshall);
        assert!(config.include_reflexivity);
        assert_eq!(config.warshall_variant, WarshallVariant::AddAndClamp);
        assert_eq!(config.entity_schemes, vec!["urn:"]);
        assert_eq!(config.power_union.patience, 2);
        assert!(!config.power_union.early_stopping);
        assert!(!config.reasoner.equivalence);
        assert!(config.reasoner.class_axioms);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = EngineConfig::from_toml_str("closure_method = 7", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("not recognised"));

        let err = EngineConfig::from_toml_str("warshall_variant = \"xor\"", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = EngineConfig::from_toml_str("include_reflexivity = \"yes\"", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("closure.toml");
        let config = EngineConfig::new(ClosureMethod::Reasoning, true);
        config.save(&path).unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap(), config);

        let err = EngineConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

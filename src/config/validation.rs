//! Configuration validation for mpn-match.
//!
//! Validation reports every problem in a file at once; applying a config to
//! the engine fails on the first one instead.

use std::str::FromStr;

use regex::Regex;

use super::types::{AppConfig, ClassifierConfig, MetadataOverride, ScoringConfig, SpecOverride};
use crate::model::ComponentType;
use crate::similarity::{
    EquivalenceGroupEntry, EquivalenceTables, SimilarityProfile, SpecImportance, ToleranceRule,
};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.classifier.validate());
        for (idx, entry) in self.metadata.iter().enumerate() {
            errors.extend(prefixed(&format!("metadata[{idx}]"), entry.validate()));
        }
        for (idx, entry) in self.equivalences.iter().enumerate() {
            errors.extend(prefixed(&format!("equivalences[{idx}]"), entry.validate()));
        }
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref profile) = self.profile {
            if let Err(e) = SimilarityProfile::from_str(profile) {
                errors.push(ConfigError::new("scoring.profile", e.to_string()));
            }
        }
        if let Some(cutoff) = self.numeric_cutoff {
            if !(0.0..1.0).contains(&cutoff) {
                errors.push(ConfigError::new(
                    "scoring.numeric_cutoff",
                    format!("Cutoff must be within [0.0, 1.0), got {cutoff}"),
                ));
            }
        }
        errors
    }
}

impl Validatable for ClassifierConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (idx, entry) in self.patterns.iter().enumerate() {
            let field = format!("classifier.patterns[{idx}]");
            if let Err(e) = Regex::new(&entry.pattern) {
                errors.push(ConfigError::new(
                    format!("{field}.pattern"),
                    format!("Invalid regex '{}': {e}", entry.pattern),
                ));
            }
            if let Err(e) = ComponentType::from_str(&entry.component_type) {
                errors.push(ConfigError::new(format!("{field}.component_type"), e.to_string()));
            }
        }
        errors
    }
}

impl Validatable for MetadataOverride {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Err(e) = ComponentType::from_str(&self.component_type) {
            errors.push(ConfigError::new("component_type", e.to_string()));
        }
        if let Some(ref profile) = self.default_profile {
            if let Err(e) = SimilarityProfile::from_str(profile) {
                errors.push(ConfigError::new("default_profile", e.to_string()));
            }
        }
        for (idx, spec) in self.specs.iter().enumerate() {
            errors.extend(prefixed(&format!("specs[{idx}]"), spec.validate()));
        }
        errors
    }
}

impl Validatable for SpecOverride {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ConfigError::new("name", "Spec name must not be empty"));
        }
        if let Err(e) = SpecImportance::from_str(&self.importance) {
            errors.push(ConfigError::new("importance", e.to_string()));
        }
        // Parsed against the built-in tables: configured groups only extend
        // existing tables, so the set of names is the same.
        if let Err(e) = ToleranceRule::parse(&self.rule, &EquivalenceTables::builtin()) {
            let message = e
                .metadata_kind()
                .map_or_else(|| e.to_string(), ToString::to_string);
            errors.push(ConfigError::new("rule", message));
        }
        errors
    }
}

impl Validatable for EquivalenceGroupEntry {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !EquivalenceTables::builtin().names().contains(&self.table.as_str()) {
            errors.push(ConfigError::new(
                "table",
                format!("Unknown equivalence table '{}'", self.table),
            ));
        }
        if self.members.len() < 2 {
            errors.push(ConfigError::new(
                "members",
                "An equivalence group needs at least two members",
            ));
        }
        errors
    }
}

fn prefixed(prefix: &str, errors: Vec<ConfigError>) -> impl Iterator<Item = ConfigError> + '_ {
    errors.into_iter().map(move |e| ConfigError {
        field: format!("{prefix}.{}", e.field),
        message: e.message,
    })
}

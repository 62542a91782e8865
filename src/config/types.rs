//! Configuration types for mpn-match.
//!
//! Values that name profiles, component types, tiers or rules are kept as
//! strings so a file can be loaded, validated and reported on as a whole
//! before anything is applied to the registries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::similarity::EquivalenceGroupEntry;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from `.mpn-match.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Engine-wide scoring settings
    pub scoring: ScoringConfig,
    /// Extra classification rules, tried before the built-in table
    pub classifier: ClassifierConfig,
    /// Per-type metadata overrides
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataOverride>,
    /// Extra groups for the built-in equivalence tables
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equivalences: Vec<EquivalenceGroupEntry>,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Profile applied to every type instead of its default.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config.scoring.profile = Some(profile.into());
        self
    }

    /// Cutoff for every numeric tolerance rule.
    pub const fn numeric_cutoff(mut self, cutoff: f64) -> Self {
        self.config.scoring.numeric_cutoff = Some(cutoff);
        self
    }

    /// Add a classification rule.
    pub fn pattern(mut self, pattern: impl Into<String>, component_type: impl Into<String>) -> Self {
        self.config.classifier.patterns.push(PatternEntry {
            pattern: pattern.into(),
            component_type: component_type.into(),
        });
        self
    }

    /// Add a metadata override.
    pub fn metadata_override(mut self, entry: MetadataOverride) -> Self {
        self.config.metadata.push(entry);
        self
    }

    /// Add an equivalence group to an existing table.
    pub fn equivalence_group(mut self, table: impl Into<String>, members: &[&str]) -> Self {
        self.config.equivalences.push(EquivalenceGroupEntry {
            table: table.into(),
            members: members.iter().map(|m| (*m).to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Engine-wide scoring settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Profile override: replacement, design-phase or cost-optimization.
    /// Each type's default profile applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Ratio at or below which numeric specs count as different, in [0, 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_cutoff: Option<f64>,
}

/// Classification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClassifierConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<PatternEntry>,
}

/// One regex classification rule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PatternEntry {
    /// Regular expression matched against the upper-cased MPN
    pub pattern: String,
    /// Component type name, e.g. `RESISTOR` or `mosfet`
    pub component_type: String,
}

/// Metadata changes for one component type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MetadataOverride {
    /// Component type name; subtypes inherit their base type's specs
    pub component_type: String,
    /// Profile used when no engine-wide override is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Specs to add or replace
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specs: Vec<SpecOverride>,
}

/// One spec definition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SpecOverride {
    pub name: String,
    /// critical, high, medium or low
    pub importance: String,
    /// exact, case_insensitive, numeric, numeric:<cutoff> or equivalence:<table>
    pub rule: String,
}

//! Importance tiers and similarity profiles.
//!
//! A profile only changes the multiplier applied to each tier; the base
//! weight of a tier is shared by every profile.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MetadataErrorKind;

/// How much a mismatch in one spec should matter.
///
/// Ordered `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SpecImportance {
    Low,
    Medium,
    High,
    Critical,
}

impl SpecImportance {
    /// All tiers, highest first
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Profile-independent base weight of this tier
    #[must_use]
    pub const fn base_weight(&self) -> f64 {
        match self {
            Self::Critical => 1.0,
            Self::High => 0.7,
            Self::Medium => 0.4,
            Self::Low => 0.2,
        }
    }
}

impl fmt::Display for SpecImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

impl FromStr for SpecImportance {
    type Err = MetadataErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(MetadataErrorKind::UnknownImportance(s.to_string())),
        }
    }
}

/// Named weighting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum SimilarityProfile {
    /// Field replacement screening: dominated by critical specs
    Replacement,
    /// Design-time substitution: every tier matters and the bar is higher
    DesignPhase,
    /// Cheaper alternates: only critical specs carry real weight
    CostOptimization,
}

impl SimilarityProfile {
    /// All profiles
    pub const ALL: [Self; 3] = [Self::Replacement, Self::DesignPhase, Self::CostOptimization];

    /// Weight multiplier for a tier under this profile.
    ///
    /// Non-decreasing in importance for every profile.
    #[must_use]
    pub const fn multiplier(&self, importance: SpecImportance) -> f64 {
        use SpecImportance::{Critical, High, Low, Medium};
        match (self, importance) {
            (Self::Replacement, Critical) => 1.0,
            (Self::Replacement, High) => 0.7,
            (Self::Replacement, Medium) => 0.6,
            (Self::Replacement, Low) => 0.5,
            (Self::DesignPhase, Critical) => 1.2,
            (Self::DesignPhase, High) => 1.0,
            (Self::DesignPhase, Medium) => 0.8,
            (Self::DesignPhase, Low) => 0.6,
            (Self::CostOptimization, Critical) => 1.0,
            (Self::CostOptimization, High) => 0.6,
            (Self::CostOptimization, Medium) => 0.4,
            (Self::CostOptimization, Low) => 0.3,
        }
    }

    /// `base_weight(importance) * multiplier(importance)`
    #[must_use]
    pub fn effective_weight(&self, importance: SpecImportance) -> f64 {
        importance.base_weight() * self.multiplier(importance)
    }

    /// Advisory acceptance threshold for a substitution.
    ///
    /// Calculators never enforce this; callers compare against it.
    #[must_use]
    pub const fn minimum_score(&self) -> f64 {
        match self {
            Self::Replacement => 0.70,
            Self::DesignPhase => 0.85,
            Self::CostOptimization => 0.60,
        }
    }

    /// Whether `score` reaches [`Self::minimum_score`]
    #[must_use]
    pub fn accepts(&self, score: f64) -> bool {
        score >= self.minimum_score()
    }

    /// Kebab-case name used in config files and on the command line
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Replacement => "replacement",
            Self::DesignPhase => "design-phase",
            Self::CostOptimization => "cost-optimization",
        }
    }
}

impl Default for SimilarityProfile {
    fn default() -> Self {
        Self::Replacement
    }
}

impl fmt::Display for SimilarityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimilarityProfile {
    type Err = MetadataErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "replacement" => Ok(Self::Replacement),
            "design-phase" | "design" => Ok(Self::DesignPhase),
            "cost-optimization" | "cost" => Ok(Self::CostOptimization),
            _ => Err(MetadataErrorKind::UnknownProfile(s.to_string())),
        }
    }
}

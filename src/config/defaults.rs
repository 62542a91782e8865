//! Default values and named presets.

use super::types::{AppConfig, ScoringConfig};

pub use crate::similarity::DEFAULT_NUMERIC_CUTOFF;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common sourcing tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Each type's own default profile
    Default,
    /// Design-phase weighting: every tier counts and the bar is higher
    Strict,
    /// Cost-optimization weighting with a looser numeric cutoff
    Lenient,
}

/// Numeric cutoff used by [`ConfigPreset::Lenient`]
pub const LENIENT_NUMERIC_CUTOFF: f64 = 0.8;

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "replacement" => Some(Self::Default),
            "strict" | "design" | "design-phase" => Some(Self::Strict),
            "lenient" | "cost" | "cost-optimization" => Some(Self::Lenient),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Per-type default profiles, numeric cutoff 0.9",
            Self::Strict => "Design-phase profile for every type",
            Self::Lenient => "Cost-optimization profile with numeric cutoff 0.8",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Lenient]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        let scoring = match preset {
            ConfigPreset::Default => ScoringConfig::default(),
            ConfigPreset::Strict => ScoringConfig {
                profile: Some("design-phase".to_string()),
                numeric_cutoff: None,
            },
            ConfigPreset::Lenient => ScoringConfig {
                profile: Some("cost-optimization".to_string()),
                numeric_cutoff: Some(LENIENT_NUMERIC_CUTOFF),
            },
        };
        Self {
            scoring,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("DESIGN"), Some(ConfigPreset::Strict));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in ConfigPreset::all() {
            let config = AppConfig::from_preset(*preset);
            assert!(config.is_valid(), "{preset} preset failed validation");
        }
    }

    #[test]
    fn test_lenient_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Lenient);
        assert_eq!(config.scoring.numeric_cutoff, Some(LENIENT_NUMERIC_CUTOFF));
        assert!(LENIENT_NUMERIC_CUTOFF < DEFAULT_NUMERIC_CUTOFF);
    }
}

//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::error::{MpnMatchError, Result};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".mpn-match.yaml",
    ".mpn-match.yml",
    "mpn-match.yaml",
    "mpn-match.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/mpn-match/)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("mpn-match")))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MpnMatchError::io(path, e))?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Scalar settings are replaced when `other` sets them; lists are
    /// appended so file and command-line additions both apply.
    pub fn merge(&mut self, other: &Self) {
        if other.scoring.profile.is_some() {
            self.scoring.profile.clone_from(&other.scoring.profile);
        }
        if other.scoring.numeric_cutoff.is_some() {
            self.scoring.numeric_cutoff = other.scoring.numeric_cutoff;
        }
        self.classifier
            .patterns
            .extend(other.classifier.patterns.iter().cloned());
        self.metadata.extend(other.metadata.iter().cloned());
        self.equivalences.extend(other.equivalences.iter().cloned());
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Commented example config with every option.
#[must_use]
pub fn generate_example_config() -> String {
    r"# mpn-match configuration
# Place this file at .mpn-match.yaml in your project root or
# ~/.config/mpn-match/mpn-match.yaml for a per-user default.

scoring:
  # Profile applied to every type: replacement, design-phase, cost-optimization.
  # Omit to use each type's default profile.
  # profile: replacement
  # Ratio at or below which numeric specs are treated as different
  numeric_cutoff: 0.9

# Extra classification rules, tried before the built-in ones
classifier:
  patterns: []
  #  - pattern: '^ACME-R\d{4}'
  #    component_type: RESISTOR

# Per-type metadata overrides
metadata: []
#  - component_type: RESISTOR
#    default_profile: design-phase
#    specs:
#      - name: resistance
#        importance: critical
#        rule: numeric:0.95

# Extra groups for the built-in equivalence tables
# (dielectric, logic_family, diode, transistor, mosfet, opamp, regulator,
# memory, sensor)
equivalences: []
#  - table: opamp
#    members: [LM358, NJM2904]
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

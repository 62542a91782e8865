//! Configuration for mpn-match.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation that reports every problem at once
//! - Named presets
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust
//! use mpn_match::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//! assert_eq!(config.scoring.profile.as_deref(), Some("design-phase"));
//!
//! let config = AppConfig::builder()
//!     .profile("cost-optimization")
//!     .equivalence_group("opamp", &["LM358", "NJM2904"])
//!     .build();
//! ```
//!
//! # Configuration File
//!
//! Place a `.mpn-match.yaml` file in your project root or `~/.config/mpn-match/`:
//!
//! ```yaml
//! scoring:
//!   profile: design-phase
//! equivalences:
//!   - table: opamp
//!     members: [LM358, NJM2904]
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_NUMERIC_CUTOFF, LENIENT_NUMERIC_CUTOFF};
pub use types::{
    AppConfig, AppConfigBuilder, ClassifierConfig, MetadataOverride, PatternEntry, ScoringConfig,
    SpecOverride,
};
pub use validation::{ConfigError, Validatable};

pub use file::{discover_config_file, generate_example_config, load_config_file, load_or_default};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.mpn-match.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

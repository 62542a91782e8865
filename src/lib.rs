//! **Similarity scoring for electronic component part numbers.**
//!
//! `mpn-match` classifies manufacturer part numbers (MPNs) and scores how
//! interchangeable two of them are, to support replacement and substitution
//! lookups in a parts catalog.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`ComponentType`] taxonomy, typed spec values and the
//!   value-code decoders (EIA, R-notation, package sizes).
//! - **[`classify`]**: the [`TypeClassifier`] oracle and its regex-table
//!   implementation [`PatternClassifier`].
//! - **[`handlers`]**: per-manufacturer knowledge (series, packages, official
//!   replacements, connector geometry) behind [`ManufacturerHandler`].
//! - **[`similarity`]**: the [`SimilarityEngine`], the metadata registry, the
//!   tolerance rules and the family calculators.
//! - **[`config`]**: YAML configuration applied with
//!   [`SimilarityEngine::from_config`].
//!
//! ## Getting Started
//!
//! ```
//! use mpn_match::SimilarityEngine;
//!
//! let engine = SimilarityEngine::new();
//!
//! // Same value, different package
//! let score = engine.calculate_similarity("CRCW060310K0FKEA", "CRCW080510K0FKEA");
//! assert!((score - 0.67).abs() < 0.02);
//!
//! // Known second source
//! assert!(engine.calculate_similarity("1N4148", "1N914") >= 0.9);
//!
//! // Explain how a score was reached
//! let explanation = engine.explain("IRF530", "IRF9530");
//! println!("{}", explanation.detailed());
//! ```
//!
//! Scoring never fails: blank input scores 0.0, unreadable specs are left
//! out, and pairs no family calculator understands fall back to token
//! overlap and finally edit distance.
//!
//! ## Command-Line Interface (CLI)
//!
//! The `mpn-match` binary wraps the engine: `compare`, `classify`, `rank`,
//! `calculators` and `config`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Scores are bounded ratios; usize/u32 to f64 casts are exact in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Value tables are long by nature
    clippy::too_many_lines,
    clippy::unused_self,
    clippy::similar_names
)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod similarity;

// Re-export main types for convenience
pub use classify::{PatternClassifier, TypeClassifier};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{MetadataErrorKind, MpnMatchError, Result};
pub use handlers::{HandlerRegistry, ManufacturerHandler, MountingType};
pub use model::{ComponentType, SpecBag, SpecData, SpecUnit, SpecValue};
pub use similarity::{
    calculate_similarity, default_engine, CalculatorChain, MetadataRegistry, RankedCandidate,
    ScorePath, SimilarityCalculator, SimilarityEngine, SimilarityExplanation, SimilarityProfile,
    SpecImportance, ToleranceRule,
};

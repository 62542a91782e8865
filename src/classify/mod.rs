//! Component type classification.
//!
//! The engine only needs an oracle that maps an MPN to a [`ComponentType`];
//! [`PatternClassifier`] is the built-in one, driven by an ordered table of
//! regular expressions. Callers with their own catalogue can implement
//! [`TypeClassifier`] instead.

mod patterns;

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::error::{MpnMatchError, Result};
use crate::model::ComponentType;

/// Maps an MPN to its component type.
pub trait TypeClassifier: Send + Sync {
    /// Classify an MPN; `None` when the type is unknown
    fn classify(&self, mpn: &str) -> Option<ComponentType>;

    /// Name for logging
    fn name(&self) -> &'static str {
        "TypeClassifier"
    }
}

static BUILTIN: LazyLock<Vec<(Regex, ComponentType)>> = LazyLock::new(|| {
    patterns::BUILTIN_PATTERNS
        .iter()
        .map(|(pattern, ty)| (Regex::new(pattern).expect("static regex"), *ty))
        .collect()
});

/// Regex-table classifier.
///
/// User rules added with [`PatternClassifier::with_pattern`] are tried
/// before the built-in table.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    custom: Vec<(Regex, ComponentType)>,
    use_builtin: bool,
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternClassifier {
    /// Classifier with the built-in pattern table
    #[must_use]
    pub fn new() -> Self {
        Self {
            custom: Vec::new(),
            use_builtin: true,
        }
    }

    /// Classifier with no patterns at all
    #[must_use]
    pub fn empty() -> Self {
        Self {
            custom: Vec::new(),
            use_builtin: false,
        }
    }

    /// Add a rule that takes precedence over the built-in table.
    ///
    /// The pattern is matched against the upper-cased MPN.
    pub fn with_pattern(mut self, pattern: &str, ty: ComponentType) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            MpnMatchError::config(format!("invalid classification pattern '{pattern}': {e}"))
        })?;
        self.custom.push((regex, ty));
        Ok(self)
    }

    /// Number of rules consulted
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.custom.len() + if self.use_builtin { BUILTIN.len() } else { 0 }
    }

    fn rules(&self) -> impl Iterator<Item = &(Regex, ComponentType)> {
        let builtin: &[(Regex, ComponentType)] = if self.use_builtin { &BUILTIN } else { &[] };
        self.custom.iter().chain(builtin.iter())
    }
}

impl TypeClassifier for PatternClassifier {
    fn classify(&self, mpn: &str) -> Option<ComponentType> {
        let normalized = mpn.trim().to_uppercase();
        if normalized.is_empty() {
            return None;
        }
        let ty = self
            .rules()
            .find(|(regex, _)| regex.is_match(&normalized))
            .map(|(_, ty)| *ty);
        trace!("classified {normalized} as {ty:?}");
        ty
    }

    fn name(&self) -> &'static str {
        "PatternClassifier"
    }
}

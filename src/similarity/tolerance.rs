//! Tolerance rules: how closely two values of one spec must agree.
//!
//! Every rule maps a pair of [`SpecValue`]s to a score in `[0, 1]`. A unit
//! mismatch or a numeric/text mismatch is scored 0.0; rules never panic.

use std::fmt;
use std::sync::Arc;

use super::equivalence::{EquivalenceTable, EquivalenceTables};
use crate::error::{MetadataErrorKind, MpnMatchError, Result};
use crate::model::{SpecData, SpecValue};

/// Default ratio at or below which numeric values are treated as different.
pub const DEFAULT_NUMERIC_CUTOFF: f64 = 0.9;

/// Relative tolerance for numeric equality under [`ToleranceRule::Exact`].
const EXACT_EPSILON: f64 = 1e-9;

/// Comparison policy for one spec.
#[derive(Clone)]
#[non_exhaustive]
pub enum ToleranceRule {
    /// Equal values score 1.0, anything else 0.0
    Exact,
    /// Text compared ignoring case and surrounding whitespace
    CaseInsensitive,
    /// `min/max` ratio of magnitudes; at or below `cutoff` the score is 0.0.
    /// Text payloads under a numeric rule are compared exactly.
    NumericRatio { cutoff: f64 },
    /// Members of the same curated group score 1.0; otherwise exact
    Equivalence(Arc<EquivalenceTable>),
}

impl ToleranceRule {
    /// Numeric rule with the default cutoff
    #[must_use]
    pub const fn numeric() -> Self {
        Self::NumericRatio {
            cutoff: DEFAULT_NUMERIC_CUTOFF,
        }
    }

    /// Numeric rule with a custom cutoff in `[0, 1)`.
    pub fn numeric_with_cutoff(cutoff: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&cutoff) {
            return Err(MpnMatchError::metadata(
                "building numeric tolerance rule",
                MetadataErrorKind::InvalidCutoff(cutoff),
            ));
        }
        Ok(Self::NumericRatio { cutoff })
    }

    /// Parse a rule name as written in configuration files.
    ///
    /// Accepts `exact`, `case_insensitive`, `numeric`, `numeric:<cutoff>`
    /// and `equivalence:<table>`.
    pub fn parse(spec: &str, tables: &EquivalenceTables) -> Result<Self> {
        let trimmed = spec.trim();
        let (kind, arg) = match trimmed.split_once(':') {
            Some((k, a)) => (k.trim().to_lowercase(), Some(a.trim())),
            None => (trimmed.to_lowercase(), None),
        };
        let unknown = || {
            MpnMatchError::metadata(
                "parsing tolerance rule",
                MetadataErrorKind::UnknownToleranceRule(spec.to_string()),
            )
        };

        match (kind.as_str(), arg) {
            ("exact", None) => Ok(Self::Exact),
            ("case_insensitive" | "case-insensitive", None) => Ok(Self::CaseInsensitive),
            ("numeric", None) => Ok(Self::numeric()),
            ("numeric", Some(cutoff)) => {
                let cutoff: f64 = cutoff.parse().map_err(|_| unknown())?;
                Self::numeric_with_cutoff(cutoff)
            }
            ("equivalence", Some(table)) => tables.get(table).map(Self::Equivalence).ok_or_else(
                || {
                    MpnMatchError::metadata(
                        "parsing tolerance rule",
                        MetadataErrorKind::UnknownEquivalenceTable(table.to_string()),
                    )
                },
            ),
            _ => Err(unknown()),
        }
    }

    /// Score agreement between two values.
    #[must_use]
    pub fn compare(&self, origin: &SpecValue, candidate: &SpecValue) -> f64 {
        if origin.unit() != candidate.unit() {
            return 0.0;
        }
        match self {
            Self::Exact => exact(origin.value(), candidate.value()),
            Self::CaseInsensitive => match (origin.value(), candidate.value()) {
                (SpecData::Text(a), SpecData::Text(b)) => {
                    if a.trim().eq_ignore_ascii_case(b.trim()) {
                        1.0
                    } else {
                        0.0
                    }
                }
                (a, b) => exact(a, b),
            },
            Self::NumericRatio { cutoff } => match (origin.value(), candidate.value()) {
                (SpecData::Numeric(a), SpecData::Numeric(b)) => ratio_score(*a, *b, *cutoff),
                // symbolic values such as an adjustable output
                (a, b) => exact(a, b),
            },
            Self::Equivalence(table) => match (origin.value(), candidate.value()) {
                (SpecData::Text(a), SpecData::Text(b)) if table.same_group(a, b) => 1.0,
                (a, b) => exact(a, b),
            },
        }
    }

    /// Configuration name of this rule
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Exact => "exact".to_string(),
            Self::CaseInsensitive => "case_insensitive".to_string(),
            Self::NumericRatio { cutoff } if (*cutoff - DEFAULT_NUMERIC_CUTOFF).abs() < f64::EPSILON => {
                "numeric".to_string()
            }
            Self::NumericRatio { cutoff } => format!("numeric:{cutoff}"),
            Self::Equivalence(table) => format!("equivalence:{}", table.name()),
        }
    }
}

impl fmt::Debug for ToleranceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ToleranceRule({})", self.name())
    }
}

impl fmt::Display for ToleranceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn exact(a: &SpecData, b: &SpecData) -> f64 {
    let equal = match (a, b) {
        (SpecData::Numeric(x), SpecData::Numeric(y)) => {
            x == y || (x - y).abs() <= EXACT_EPSILON * x.abs().max(y.abs())
        }
        (SpecData::Text(x), SpecData::Text(y)) => {
            x.trim().to_ascii_uppercase() == y.trim().to_ascii_uppercase()
        }
        _ => false,
    };
    if equal {
        1.0
    } else {
        0.0
    }
}

/// Two-branch ratio score. The jump from 0.0 to `cutoff` at the boundary is
/// intentional: values are either close enough or not.
fn ratio_score(a: f64, b: f64, cutoff: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return 0.0;
    }
    let (a, b) = (a.abs(), b.abs());
    if a == 0.0 && b == 0.0 {
        return 1.0;
    }
    if a == 0.0 || b == 0.0 || a.is_infinite() || b.is_infinite() {
        return if a == b { 1.0 } else { 0.0 };
    }
    let ratio = a.min(b) / a.max(b);
    if ratio <= cutoff {
        0.0
    } else {
        ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecUnit;

    fn ohms(v: f64) -> SpecValue {
        SpecValue::numeric(v, SpecUnit::Ohms)
    }

    #[test]
    fn test_numeric_two_branch_policy() {
        let rule = ToleranceRule::numeric();
        assert_eq!(rule.compare(&ohms(100.0), &ohms(100.0)), 1.0);
        assert!((rule.compare(&ohms(100.0), &ohms(95.0)) - 0.95).abs() < 1e-12);
        // exactly at the cutoff collapses
        assert_eq!(rule.compare(&ohms(100.0), &ohms(90.0)), 0.0);
        assert_eq!(rule.compare(&ohms(100.0), &ohms(10_000.0)), 0.0);
    }

    #[test]
    fn test_numeric_is_symmetric() {
        let rule = ToleranceRule::numeric();
        assert_eq!(
            rule.compare(&ohms(96.0), &ohms(100.0)),
            rule.compare(&ohms(100.0), &ohms(96.0))
        );
    }

    #[test]
    fn test_numeric_zero_and_nan() {
        let rule = ToleranceRule::numeric();
        assert_eq!(rule.compare(&ohms(0.0), &ohms(0.0)), 1.0);
        assert_eq!(rule.compare(&ohms(0.0), &ohms(1.0)), 0.0);
        assert_eq!(rule.compare(&ohms(f64::NAN), &ohms(1.0)), 0.0);
        assert_eq!(rule.compare(&ohms(f64::NAN), &ohms(f64::NAN)), 0.0);
    }

    #[test]
    fn test_numeric_compares_magnitudes() {
        let rule = ToleranceRule::numeric();
        let a = SpecValue::numeric(-5.0, SpecUnit::Volts);
        let b = SpecValue::numeric(5.0, SpecUnit::Volts);
        assert_eq!(rule.compare(&a, &b), 1.0);
    }

    #[test]
    fn test_unit_mismatch_scores_zero() {
        let rule = ToleranceRule::numeric();
        let a = SpecValue::numeric(5.0, SpecUnit::Volts);
        let b = SpecValue::numeric(5.0, SpecUnit::Amps);
        assert_eq!(rule.compare(&a, &b), 0.0);
        assert_eq!(ToleranceRule::Exact.compare(&a, &b), 0.0);
    }

    #[test]
    fn test_kind_mismatch_scores_zero() {
        let a = SpecValue::text("5");
        let b = SpecValue::numeric(5.0, SpecUnit::None);
        assert_eq!(ToleranceRule::Exact.compare(&a, &b), 0.0);
        assert_eq!(ToleranceRule::numeric().compare(&a, &b), 0.0);
    }

    #[test]
    fn test_numeric_rule_on_symbolic_values() {
        let adj = SpecValue::new(SpecData::Text("ADJ".to_string()), SpecUnit::Volts);
        let fixed = SpecValue::numeric(5.0, SpecUnit::Volts);
        let rule = ToleranceRule::numeric();
        assert_eq!(rule.compare(&adj, &adj), 1.0);
        assert_eq!(rule.compare(&adj, &fixed), 0.0);
    }

    #[test]
    fn test_exact_and_case_insensitive() {
        let a = SpecValue::text("sot-23");
        let b = SpecValue::text("SOT-23 ");
        assert_eq!(ToleranceRule::Exact.compare(&a, &b), 1.0);
        assert_eq!(ToleranceRule::CaseInsensitive.compare(&a, &b), 1.0);
        let c = SpecValue::text("SOT-223");
        assert_eq!(ToleranceRule::CaseInsensitive.compare(&a, &c), 0.0);
    }

    #[test]
    fn test_equivalence_rule() {
        let tables = EquivalenceTables::builtin();
        let rule = ToleranceRule::parse("equivalence:dielectric", &tables).unwrap();
        assert_eq!(
            rule.compare(&SpecValue::text("NP0"), &SpecValue::text("C0G")),
            1.0
        );
        assert_eq!(
            rule.compare(&SpecValue::text("X7R"), &SpecValue::text("X7R")),
            1.0
        );
        assert_eq!(
            rule.compare(&SpecValue::text("X7R"), &SpecValue::text("X5R")),
            0.0
        );
    }

    #[test]
    fn test_parse_rule_names() {
        let tables = EquivalenceTables::builtin();
        assert!(matches!(
            ToleranceRule::parse("exact", &tables),
            Ok(ToleranceRule::Exact)
        ));
        assert!(matches!(
            ToleranceRule::parse("Case_Insensitive", &tables),
            Ok(ToleranceRule::CaseInsensitive)
        ));
        match ToleranceRule::parse("numeric:0.8", &tables) {
            Ok(ToleranceRule::NumericRatio { cutoff }) => assert!((cutoff - 0.8).abs() < 1e-12),
            other => panic!("unexpected rule: {other:?}"),
        }
        assert_eq!(
            ToleranceRule::parse("numeric", &tables).unwrap().name(),
            "numeric"
        );
    }

    #[test]
    fn test_parse_rejects_unknown_rules() {
        let tables = EquivalenceTables::builtin();
        let err = ToleranceRule::parse("fuzzy", &tables).unwrap_err();
        assert!(matches!(
            err.metadata_kind(),
            Some(MetadataErrorKind::UnknownToleranceRule(_))
        ));
        let err = ToleranceRule::parse("numeric:1.5", &tables).unwrap_err();
        assert!(matches!(
            err.metadata_kind(),
            Some(MetadataErrorKind::InvalidCutoff(_))
        ));
        let err = ToleranceRule::parse("equivalence:nope", &tables).unwrap_err();
        assert!(matches!(
            err.metadata_kind(),
            Some(MetadataErrorKind::UnknownEquivalenceTable(_))
        ));
    }
}

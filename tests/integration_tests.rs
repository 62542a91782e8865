//! Integration tests for mpn-match
//!
//! These tests drive the public engine end to end: classification,
//! calculator dispatch, weighted scoring, boosts and fallbacks.

use mpn_match::{
    similarity::{CalculatorChain, SimilarityEngine},
    ComponentType, ScorePath, SimilarityProfile, SpecImportance,
};

fn engine() -> SimilarityEngine {
    SimilarityEngine::new()
}

// ============================================================================
// Reference Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn test_identical_resistor() {
        let s = engine().calculate_similarity("CRCW060310K0FKEA", "CRCW060310K0FKEA");
        assert!((s - 1.0).abs() <= 0.01, "got {s}");
    }

    #[test]
    fn test_resistor_same_value_different_package() {
        let s = engine().calculate_similarity("CRCW060310K0FKEA", "CRCW080510K0FKEA");
        assert!((s - 0.67).abs() <= 0.02, "got {s}");
    }

    #[test]
    fn test_resistor_different_value_same_package() {
        let s = engine().calculate_similarity("CRCW0603100RFKEA", "CRCW060310K0FKEA");
        assert!((s - 0.33).abs() <= 0.02, "got {s}");
    }

    #[test]
    fn test_signal_diode_second_source() {
        let s = engine().calculate_similarity("1N4148", "1N914");
        assert!(s >= 0.9, "got {s}");
    }

    #[test]
    fn test_mosfet_channel_mismatch() {
        let s = engine().calculate_similarity("IRF530", "IRF9530");
        assert!(s < 0.6, "got {s}");
    }

    #[test]
    fn test_missing_input() {
        let engine = engine();
        assert_eq!(engine.calculate_similarity_opt(None, Some("CRCW060310K0FKEA")), 0.0);
        assert_eq!(engine.calculate_similarity_opt(Some("CRCW060310K0FKEA"), None), 0.0);
        assert_eq!(engine.calculate_similarity("", "CRCW060310K0FKEA"), 0.0);
        assert_eq!(engine.calculate_similarity("  ", "  "), 0.0);
    }
}

// ============================================================================
// Dispatch
// ============================================================================

mod dispatch_tests {
    use super::*;

    #[test]
    fn test_builtin_registration_order() {
        let names = CalculatorChain::builtin().names();
        assert_eq!(
            names,
            vec![
                "ResistorCalculator",
                "CapacitorCalculator",
                "LedCalculator",
                "DiodeCalculator",
                "MosfetCalculator",
                "TransistorCalculator",
                "OpAmpCalculator",
                "VoltageRegulatorCalculator",
                "MemoryCalculator",
                "SensorCalculator",
                "ConnectorCalculator",
                "LogicIcCalculator",
                "PassiveCalculator",
            ]
        );
    }

    #[test]
    fn test_family_pairs_reach_their_calculator() {
        let engine = engine();
        let cases = [
            ("CRCW060310K0FKEA", "RC0603FR-0710KL", "ResistorCalculator"),
            ("GRM188R71H104KA01D", "CL10B104KB8NNNC", "CapacitorCalculator"),
            ("APT2012SGC", "LTST-C170KGKT", "LedCalculator"),
            ("1N4148", "1N914", "DiodeCalculator"),
            ("IRF540N", "IRF540NPBF", "MosfetCalculator"),
            ("2N3904", "2N3906", "TransistorCalculator"),
            ("LM358DR", "LM2904DR", "OpAmpCalculator"),
            ("LM7805CT", "L7805CV", "VoltageRegulatorCalculator"),
            ("24LC256-I/SN", "AT24C256C-SSHL-T", "MemoryCalculator"),
            ("DHT22", "AM2302", "SensorCalculator"),
            ("B4B-XH-A", "B5B-XH-A", "ConnectorCalculator"),
            ("SN74HC00N", "MC74HC00AN", "LogicIcCalculator"),
            ("LQM21PN2R2MC0", "MLZ2012N2R2LT", "PassiveCalculator"),
        ];
        for (a, b, expected) in cases {
            assert_eq!(engine.explain(a, b).calculator, expected, "{a} vs {b}");
        }
    }

    #[test]
    fn test_input_is_trimmed_and_uppercased() {
        let engine = engine();
        let s = engine.calculate_similarity(" crcw060310k0fkea ", "CRCW080510K0FKEA");
        assert!((s - 0.67).abs() <= 0.02, "got {s}");
    }

    #[test]
    fn test_unclassified_pairs_use_fallbacks() {
        let engine = engine();
        let e = engine.explain("ACME1000A", "ACME1000B");
        assert_eq!(e.calculator, "DefaultCalculator");
        assert!(e.score <= 0.8);

        let e = engine.explain("ACME1000A", "ACME1000A");
        assert_eq!(e.score, 1.0);

        let e = engine.explain("--", "-+");
        assert_eq!(e.path, ScorePath::EditDistance);
    }

    #[test]
    fn test_cross_family_pair_without_common_calculator() {
        // A MOSFET and a memory chip share no family calculator
        let e = engine().explain("IRF540N", "W25Q128JVSIQ");
        assert_eq!(e.path, ScorePath::TokenOverlap);
        assert!(e.score < 0.5, "got {}", e.score);
    }

    #[test]
    fn test_classification() {
        let engine = engine();
        assert_eq!(engine.classify("1N4148"), Some(ComponentType::Diode));
        assert!(engine
            .classify("LTST-C170KGKT")
            .is_some_and(|t| t.is_a(ComponentType::Led) && t.is_a(ComponentType::Diode)));
        assert_eq!(engine.classify("NOT-A-PART"), None);
    }
}

// ============================================================================
// Scoring Behaviour
// ============================================================================

mod scoring_tests {
    use super::*;

    #[test]
    fn test_short_circuit_reports_path() {
        let e = engine().explain("2N3904", "2N3906");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!(e.reason.contains("polarity"));
        assert!(e.breakdown.is_empty());
    }

    #[test]
    fn test_weighted_breakdown_sums_to_score() {
        let e = engine().explain("CRCW060310K0FKEA", "CRCW080510K0FKEA");
        assert_eq!(e.path, ScorePath::Weighted);
        let total: f64 = e.breakdown.iter().map(|c| c.weighted_score).sum();
        let max: f64 = e.breakdown.iter().map(|c| c.weight).sum();
        assert!((total / max - e.score).abs() < 1e-9);
        assert!(e
            .breakdown
            .iter()
            .any(|c| c.name == "resistance" && c.importance == Some(SpecImportance::Critical)));
    }

    #[test]
    fn test_boost_is_reported() {
        let e = engine().explain("TL072CP", "TL082CP");
        assert!(e.boosted);
        assert!((e.score - 0.9).abs() < 1e-9, "got {}", e.score);
    }

    #[test]
    fn test_design_phase_is_stricter() {
        let replacement = engine();
        let design = SimilarityEngine::builder()
            .profile(SimilarityProfile::DesignPhase)
            .build()
            .unwrap();
        let pair = ("CRCW060310K0FKEA", "CRCW080510K0FKEA");

        let r = replacement.calculate_similarity(pair.0, pair.1);
        let d = design.calculate_similarity(pair.0, pair.1);
        assert!(d < r, "{d} >= {r}");
        assert!(
            SimilarityProfile::DesignPhase.minimum_score()
                >= SimilarityProfile::Replacement.minimum_score()
        );
        assert_eq!(
            design.explain(pair.0, pair.1).profile,
            Some(SimilarityProfile::DesignPhase)
        );
    }

    #[test]
    fn test_rank_candidates() {
        let ranked = engine().rank_candidates(
            "LM358DR",
            &["TL072CP", "LM358DR", "LM324N", "LM2904DR"],
        );
        // Equal scores keep their input order
        assert_eq!(ranked[0].mpn, "LM358DR");
        assert_eq!(ranked[1].mpn, "LM2904DR");
        assert!((ranked[0].score - ranked[1].score).abs() < 1e-9);
        assert_eq!(ranked.last().map(|r| r.mpn.as_str()), Some("LM324N"));
    }

    #[test]
    fn test_free_function_uses_default_engine() {
        let s = mpn_match::calculate_similarity("1N4148", "1N914");
        assert!(s >= 0.9, "got {s}");
    }
}

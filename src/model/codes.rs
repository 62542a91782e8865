//! Value and package code decoding shared by the family calculators.
//!
//! Results are always in base units (ohms, farads, henries, hertz). A code
//! that fails to decode yields `None` and a trace-level log line; it is never
//! an error.

use tracing::trace;

/// Imperial chip sizes recognised in part numbers.
pub const IMPERIAL_SIZES: &[&str] = &[
    "01005", "0201", "0402", "0603", "0805", "1206", "1210", "1806", "1812", "2010", "2220",
    "2512",
];

/// Metric chip size to imperial size.
const METRIC_TO_IMPERIAL: &[(&str, &str)] = &[
    ("0402", "01005"),
    ("0603", "0201"),
    ("1005", "0402"),
    ("1608", "0603"),
    ("2012", "0805"),
    ("3216", "1206"),
    ("3225", "1210"),
    ("4532", "1812"),
    ("5025", "2010"),
    ("5750", "2220"),
    ("6432", "2512"),
];

/// Convert a metric chip size (e.g. `1608`) to its imperial name (`0603`).
#[must_use]
pub fn metric_to_imperial(metric: &str) -> Option<&'static str> {
    METRIC_TO_IMPERIAL
        .iter()
        .find(|(m, _)| *m == metric)
        .map(|(_, i)| *i)
}

/// Decode a value written with a letter as the decimal point.
///
/// `4R7` → 4.7, `10K0` → 10 000, `R47` → 0.47. `letters` maps each
/// accepted letter to its multiplier.
#[must_use]
pub fn decode_letter_notation(code: &str, letters: &[(char, f64)]) -> Option<f64> {
    let mut found = None;
    for (idx, ch) in code.char_indices() {
        if let Some((_, mult)) = letters.iter().find(|(l, _)| *l == ch) {
            if found.is_some() {
                return None;
            }
            found = Some((idx, *mult));
        } else if !ch.is_ascii_digit() {
            return None;
        }
    }
    let (idx, mult) = found?;
    let int_part = &code[..idx];
    let frac_part = &code[idx + 1..];
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let text = format!(
        "{}.{}",
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part }
    );
    text.parse::<f64>().ok().map(|v| v * mult)
}

/// Decode an EIA significant-digits-plus-multiplier code.
///
/// `103` → 10 × 10³, `1002` → 100 × 10². The last digit is the power of ten;
/// when `fractional_multipliers` is set, 8 and 9 mean ×0.01 and ×0.1 as on
/// ceramic capacitor codes.
#[must_use]
pub fn decode_eia(code: &str, fractional_multipliers: bool) -> Option<f64> {
    if !(3..=4).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (digits, exp) = code.split_at(code.len() - 1);
    let significant: f64 = digits.parse().ok()?;
    let exp: i32 = exp.parse().ok()?;
    let multiplier = match exp {
        8 if fractional_multipliers => 0.01,
        9 if fractional_multipliers => 0.1,
        e => 10f64.powi(e),
    };
    Some(significant * multiplier)
}

/// Decode a resistance code in ohms (`10K0`, `4R7`, `1M00`, `1002`, `103`).
#[must_use]
pub fn parse_resistance_code(code: &str) -> Option<f64> {
    let code = code.trim().to_ascii_uppercase();
    let value = if code.chars().any(|c| c.is_ascii_alphabetic()) {
        decode_letter_notation(&code, &[('R', 1.0), ('K', 1e3), ('M', 1e6), ('G', 1e9)])
    } else {
        decode_eia(&code, false)
    };
    if value.is_none() {
        trace!("unparseable resistance code '{code}'");
    }
    value
}

/// Decode a capacitance code in farads.
///
/// Digit codes are picofarads (`104` → 100 nF). Letter notation uses the
/// letter as both decimal point and scale: `4R7`/`4P7` pF, `4N7` nF,
/// `4U7` µF.
#[must_use]
pub fn parse_capacitance_code(code: &str) -> Option<f64> {
    let code = code.trim().to_ascii_uppercase();
    let value = if code.chars().any(|c| c.is_ascii_alphabetic()) {
        decode_letter_notation(
            &code,
            &[('R', 1e-12), ('P', 1e-12), ('N', 1e-9), ('U', 1e-6)],
        )
    } else {
        decode_eia(&code, true).map(|pf| pf * 1e-12)
    };
    if value.is_none() {
        trace!("unparseable capacitance code '{code}'");
    }
    value
}

/// Decode an inductance code in henries.
///
/// Digit codes and `R` notation are microhenries (`100` → 10 µH,
/// `4R7` → 4.7 µH); `N` notation is nanohenries (`47N` → 47 nH).
#[must_use]
pub fn parse_inductance_code(code: &str) -> Option<f64> {
    let code = code.trim().to_ascii_uppercase();
    let value = if code.chars().any(|c| c.is_ascii_alphabetic()) {
        decode_letter_notation(&code, &[('R', 1e-6), ('N', 1e-9)])
    } else {
        decode_eia(&code, false).map(|uh| uh * 1e-6)
    };
    if value.is_none() {
        trace!("unparseable inductance code '{code}'");
    }
    value
}

/// Decode a frequency such as `16.000MHZ`, `32.768KHZ`, `16M` or `8MHZ`.
#[must_use]
pub fn parse_frequency(text: &str) -> Option<f64> {
    let upper = text.trim().to_ascii_uppercase();
    let number_end = upper
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(upper.len());
    let (number, suffix) = upper.split_at(number_end);
    let base: f64 = match number.parse() {
        Ok(v) => v,
        Err(_) => {
            trace!("unparseable frequency '{text}'");
            return None;
        }
    };
    let multiplier = match suffix.trim_end_matches("HZ") {
        "" => 1.0,
        "K" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        other => {
            trace!("unknown frequency suffix '{other}' in '{text}'");
            return None;
        }
    };
    Some(base * multiplier)
}

/// First imperial chip size appearing in `mpn`, if any.
#[must_use]
pub fn find_imperial_size(mpn: &str) -> Option<&'static str> {
    IMPERIAL_SIZES
        .iter()
        .filter_map(|size| mpn.find(size).map(|pos| (pos, *size)))
        .min_by_key(|(pos, size)| (*pos, std::cmp::Reverse(size.len())))
        .map(|(_, size)| size)
}

/// Longest table key that prefixes `mpn` at a part-number boundary.
///
/// A key ending in a digit only matches when the next character is not a
/// digit, so `LM35` does not claim `LM358`.
#[must_use]
pub fn match_part_prefix<'t, T>(table: &'t [(&'static str, T)], mpn: &str) -> Option<&'t (&'static str, T)> {
    table
        .iter()
        .filter(|(key, _)| {
            mpn.starts_with(key)
                && !(key.ends_with(|c: char| c.is_ascii_digit())
                    && mpn[key.len()..].starts_with(|c: char| c.is_ascii_digit()))
        })
        .max_by_key(|(key, _)| key.len())
}

/// Package of an IC from its ordering suffix.
///
/// Understands the TI style (`DR`, `N`, `P`, `PW`, `DGK`, `DBV`) and the
/// Microchip style after a slash (`/SN`, `/P`, `/OT`, `/MS`, `/ST`).
#[must_use]
pub fn ic_package_from_suffix(suffix: &str) -> Option<&'static str> {
    if let Some((_, code)) = suffix.rsplit_once('/') {
        return match code {
            "SN" => Some("SOIC"),
            "P" => Some("DIP"),
            "OT" => Some("SOT-23"),
            "MS" => Some("MSOP"),
            "ST" => Some("TSSOP"),
            "TO" => Some("TO-92"),
            "TT" => Some("SOT-23"),
            "MB" => Some("SOT-89"),
            _ => None,
        };
    }

    let suffix = suffix.trim_end_matches(['-', '+']);
    let suffix = suffix
        .strip_suffix("G4")
        .or_else(|| suffix.strip_suffix("E4"))
        .unwrap_or(suffix);
    let core = if suffix.len() > 1 {
        suffix.strip_suffix('R').unwrap_or(suffix)
    } else {
        suffix
    };

    if core.ends_with("DGK") {
        Some("MSOP")
    } else if core.ends_with("DBV") {
        Some("SOT-23")
    } else if core.ends_with("PW") {
        Some("TSSOP")
    } else if core.ends_with("DT") {
        Some("DPAK")
    } else if core.ends_with('D') || core.ends_with("M") {
        Some("SOIC")
    } else if core.ends_with('N') || core.ends_with('P') || core.ends_with('E') {
        Some("DIP")
    } else if core.ends_with('T') {
        Some("TO-220")
    } else if core.ends_with('Z') {
        Some("TO-92")
    } else {
        None
    }
}

/// Leading run of ASCII letters.
#[must_use]
pub fn alpha_prefix(mpn: &str) -> &str {
    let end = mpn
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(mpn.len());
    &mpn[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= b.abs() * 1e-9 + 1e-18
    }

    #[test]
    fn test_resistance_letter_notation() {
        assert!(approx(parse_resistance_code("10K0").unwrap(), 10_000.0));
        assert!(approx(parse_resistance_code("100R").unwrap(), 100.0));
        assert!(approx(parse_resistance_code("4R7").unwrap(), 4.7));
        assert!(approx(parse_resistance_code("R47").unwrap(), 0.47));
        assert!(approx(parse_resistance_code("1M00").unwrap(), 1_000_000.0));
    }

    #[test]
    fn test_resistance_eia_codes() {
        assert!(approx(parse_resistance_code("103").unwrap(), 10_000.0));
        assert!(approx(parse_resistance_code("1002").unwrap(), 10_000.0));
        assert!(approx(parse_resistance_code("4701").unwrap(), 4_700.0));
    }

    #[test]
    fn test_resistance_rejects_garbage() {
        assert_eq!(parse_resistance_code("1K0K"), None);
        assert_eq!(parse_resistance_code("ABC"), None);
        assert_eq!(parse_resistance_code("12"), None);
        assert_eq!(parse_resistance_code("R"), None);
    }

    #[test]
    fn test_capacitance_codes() {
        assert!(approx(parse_capacitance_code("104").unwrap(), 100e-9));
        assert!(approx(parse_capacitance_code("475").unwrap(), 4.7e-6));
        assert!(approx(parse_capacitance_code("4R7").unwrap(), 4.7e-12));
        assert!(approx(parse_capacitance_code("4N7").unwrap(), 4.7e-9));
        assert!(approx(parse_capacitance_code("109").unwrap(), 1e-12));
    }

    #[test]
    fn test_inductance_codes() {
        assert!(approx(parse_inductance_code("100").unwrap(), 10e-6));
        assert!(approx(parse_inductance_code("4R7").unwrap(), 4.7e-6));
        assert!(approx(parse_inductance_code("47N").unwrap(), 47e-9));
    }

    #[test]
    fn test_frequency() {
        assert!(approx(parse_frequency("16.000MHZ").unwrap(), 16e6));
        assert!(approx(parse_frequency("32.768KHZ").unwrap(), 32_768.0));
        assert!(approx(parse_frequency("8M").unwrap(), 8e6));
        assert_eq!(parse_frequency("MHZ"), None);
        assert_eq!(parse_frequency("16XHZ"), None);
    }

    #[test]
    fn test_metric_to_imperial() {
        assert_eq!(metric_to_imperial("1608"), Some("0603"));
        assert_eq!(metric_to_imperial("9999"), None);
    }

    #[test]
    fn test_find_imperial_size() {
        assert_eq!(find_imperial_size("CRCW060310K0FKEA"), Some("0603"));
        assert_eq!(find_imperial_size("RC0805FR-0710KL"), Some("0805"));
        assert_eq!(find_imperial_size("LM358"), None);
    }

    #[test]
    fn test_match_part_prefix_boundary() {
        let table = [("LM35", 1), ("LM358", 2), ("TL07", 3)];
        assert_eq!(match_part_prefix(&table, "LM35DZ").map(|e| e.1), Some(1));
        assert_eq!(match_part_prefix(&table, "LM358DR").map(|e| e.1), Some(2));
        assert_eq!(match_part_prefix(&table, "LM3580"), None);
        assert_eq!(match_part_prefix(&table, "TL072"), None);
    }

    #[test]
    fn test_ic_package_from_suffix() {
        assert_eq!(ic_package_from_suffix("DR"), Some("SOIC"));
        assert_eq!(ic_package_from_suffix("D"), Some("SOIC"));
        assert_eq!(ic_package_from_suffix("N"), Some("DIP"));
        assert_eq!(ic_package_from_suffix("CP"), Some("DIP"));
        assert_eq!(ic_package_from_suffix("IDGKR"), Some("MSOP"));
        assert_eq!(ic_package_from_suffix("DBVR"), Some("SOT-23"));
        assert_eq!(ic_package_from_suffix("-I/SN"), Some("SOIC"));
        assert_eq!(ic_package_from_suffix(""), None);
    }

    #[test]
    fn test_alpha_prefix() {
        assert_eq!(alpha_prefix("IRF530"), "IRF");
        assert_eq!(alpha_prefix("1N4148"), "");
    }
}

//! String similarity primitives for part numbers.
//!
//! These back the generic fallbacks and a few legacy family comparisons;
//! family calculators prefer decoded specs whenever they can read them.

use std::collections::HashSet;

/// Split an MPN into alphanumeric tokens.
///
/// Splits on any non-alphanumeric character and at every letter/digit
/// boundary, so `LM358DR` yields `LM`, `358`, `DR`.
#[must_use]
pub fn mpn_tokens(mpn: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in mpn.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut start = 0;
        let mut prev_digit: Option<bool> = None;
        for (idx, ch) in chunk.char_indices() {
            let is_digit = ch.is_ascii_digit();
            if prev_digit.is_some_and(|p| p != is_digit) {
                tokens.push(&chunk[start..idx]);
                start = idx;
            }
            prev_digit = Some(is_digit);
        }
        if start < chunk.len() {
            tokens.push(&chunk[start..]);
        }
    }
    tokens
}

/// Jaccard index over MPN token sets.
///
/// Returns `None` if either side has no tokens.
#[must_use]
pub fn token_similarity(a: &str, b: &str) -> Option<f64> {
    let tokens_a: HashSet<&str> = mpn_tokens(a).into_iter().collect();
    let tokens_b: HashSet<&str> = mpn_tokens(b).into_iter().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return None;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    Some(intersection as f64 / union as f64)
}

/// Jaro-Winkler similarity
#[must_use]
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

/// `1 - distance / max_len` on characters; two empty strings score 1.0.
#[must_use]
pub fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - strsim::levenshtein(a, b) as f64 / max_len as f64
}

/// Length in bytes of the shared ASCII prefix
#[must_use]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

/// First run of digits in `mpn`
#[must_use]
pub fn first_digit_run(mpn: &str) -> Option<&str> {
    let start = mpn.find(|c: char| c.is_ascii_digit())?;
    let rest = &mpn[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpn_tokens() {
        assert_eq!(mpn_tokens("LM358DR"), vec!["LM", "358", "DR"]);
        assert_eq!(mpn_tokens("RC0805FR-0710KL"), vec!["RC", "0805", "FR", "0710", "KL"]);
        assert!(mpn_tokens("--").is_empty());
    }

    #[test]
    fn test_token_similarity() {
        assert_eq!(token_similarity("LM358DR", "LM358DR"), Some(1.0));
        let partial = token_similarity("LM358DR", "LM358N").unwrap();
        assert!((partial - 0.5).abs() < 1e-12, "got {partial}");
        assert_eq!(token_similarity("---", "LM358"), None);
    }

    #[test]
    fn test_normalized_levenshtein() {
        assert_eq!(normalized_levenshtein("", ""), 1.0);
        assert_eq!(normalized_levenshtein("ABC", "ABC"), 1.0);
        assert!((normalized_levenshtein("ABCD", "ABCE") - 0.75).abs() < 1e-12);
        assert_eq!(normalized_levenshtein("AB", "CD"), 0.0);
    }

    #[test]
    fn test_prefix_and_digits() {
        assert_eq!(common_prefix_len("LM358", "LM324"), 3);
        assert_eq!(first_digit_run("SN74HC00N"), Some("74"));
        assert_eq!(first_digit_run("ABC"), None);
    }
}

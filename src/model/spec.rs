//! Typed, unit-aware spec values extracted from part numbers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement kind of a spec value.
///
/// Extraction code converts to the base unit before building a
/// [`SpecValue`], so rules can assume one unit per spec kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SpecUnit {
    None,
    Volts,
    Amps,
    Ohms,
    Farads,
    Henries,
    Hertz,
    Watts,
    Percentage,
    Bits,
    Bytes,
    Count,
    Millimeters,
    Decibels,
    Celsius,
}

impl SpecUnit {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Volts => "volts",
            Self::Amps => "amps",
            Self::Ohms => "ohms",
            Self::Farads => "farads",
            Self::Henries => "henries",
            Self::Hertz => "hertz",
            Self::Watts => "watts",
            Self::Percentage => "percent",
            Self::Bits => "bits",
            Self::Bytes => "bytes",
            Self::Count => "count",
            Self::Millimeters => "millimeters",
            Self::Decibels => "decibels",
            Self::Celsius => "celsius",
        }
    }

    /// Short symbol used when formatting values
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::None | Self::Count => "",
            Self::Volts => "V",
            Self::Amps => "A",
            Self::Ohms => "Ω",
            Self::Farads => "F",
            Self::Henries => "H",
            Self::Hertz => "Hz",
            Self::Watts => "W",
            Self::Percentage => "%",
            Self::Bits => "bit",
            Self::Bytes => "B",
            Self::Millimeters => "mm",
            Self::Decibels => "dB",
            Self::Celsius => "°C",
        }
    }
}

impl fmt::Display for SpecUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload of a spec value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecData {
    Numeric(f64),
    Text(String),
}

impl SpecData {
    /// Numeric payload, if any
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Text payload, if any
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Numeric(_) => None,
        }
    }
}

impl fmt::Display for SpecData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A value paired with its measurement unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecValue<T = SpecData> {
    value: T,
    unit: SpecUnit,
}

impl<T> SpecValue<T> {
    /// Create a new spec value
    pub const fn new(value: T, unit: SpecUnit) -> Self {
        Self { value, unit }
    }

    /// The raw value
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// The unit the value is expressed in
    pub const fn unit(&self) -> SpecUnit {
        self.unit
    }
}

impl SpecValue {
    /// Numeric value in the given base unit
    #[must_use]
    pub const fn numeric(value: f64, unit: SpecUnit) -> Self {
        Self::new(SpecData::Numeric(value), unit)
    }

    /// Unitless text value (package codes, families, polarities)
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(SpecData::Text(value.into()), SpecUnit::None)
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            SpecData::Numeric(v) => write!(f, "{v}{}", self.unit.symbol()),
            SpecData::Text(s) => f.write_str(s),
        }
    }
}

/// Named specs extracted from one part number.
///
/// A name that is missing from the bag means the spec could not be
/// extracted; it is skipped during scoring rather than counted as a mismatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpecBag {
    specs: IndexMap<String, SpecValue>,
}

impl SpecBag {
    /// Create an empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a spec value, replacing any previous value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: SpecValue) {
        self.specs.insert(name.into(), value);
    }

    /// Insert a numeric value if present
    pub fn insert_numeric(&mut self, name: &str, value: Option<f64>, unit: SpecUnit) {
        if let Some(v) = value {
            self.insert(name, SpecValue::numeric(v, unit));
        }
    }

    /// Insert a text value if present
    pub fn insert_text<S: Into<String>>(&mut self, name: &str, value: Option<S>) {
        if let Some(v) = value {
            self.insert(name, SpecValue::text(v));
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: &str, value: SpecValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a spec by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SpecValue> {
        self.specs.get(name)
    }

    /// Text payload of a spec, if present and textual
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.value().as_text())
    }

    /// Whether the named spec was extracted
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Number of extracted specs
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether nothing was extracted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterate over (name, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpecValue)> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_value_accessors() {
        let v = SpecValue::numeric(10_000.0, SpecUnit::Ohms);
        assert_eq!(v.value().as_f64(), Some(10_000.0));
        assert_eq!(v.unit(), SpecUnit::Ohms);
        assert_eq!(v.to_string(), "10000Ω");
    }

    #[test]
    fn test_text_value_is_unitless() {
        let v = SpecValue::text("0603");
        assert_eq!(v.unit(), SpecUnit::None);
        assert_eq!(v.value().as_text(), Some("0603"));
        assert_eq!(v.value().as_f64(), None);
    }

    #[test]
    fn test_bag_skips_absent_values() {
        let mut bag = SpecBag::new();
        bag.insert_numeric("resistance", None, SpecUnit::Ohms);
        bag.insert_text::<String>("package", None);
        assert!(bag.is_empty());

        bag.insert_numeric("resistance", Some(100.0), SpecUnit::Ohms);
        bag.insert_text("package", Some("0603"));
        assert_eq!(bag.len(), 2);
        assert!(bag.contains("resistance"));
        assert_eq!(bag.text("package"), Some("0603"));
    }

    #[test]
    fn test_bag_preserves_insertion_order() {
        let bag = SpecBag::new()
            .with("b", SpecValue::text("1"))
            .with("a", SpecValue::text("2"));
        let names: Vec<_> = bag.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}

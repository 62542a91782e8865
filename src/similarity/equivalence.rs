//! Curated equivalence tables.
//!
//! Each table groups values that are known to be mutually substitutable:
//! cross-manufacturer replacement parts, synonymous dielectric codes, logic
//! families with compatible input levels. Membership is case-insensitive.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{MetadataErrorKind, MpnMatchError, Result};

/// A single named table of equivalence groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceTable {
    name: String,
    /// Member (upper-case) to index in `groups`
    member_to_group: HashMap<String, usize>,
    groups: Vec<Vec<String>>,
}

impl EquivalenceTable {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Table name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a group of mutually equivalent values.
    ///
    /// A member already present in another group joins the two groups.
    pub fn add_group(&mut self, members: &[&str]) {
        let normalized: Vec<String> = members
            .iter()
            .map(|m| m.trim().to_uppercase())
            .filter(|m| !m.is_empty())
            .collect();

        let existing = normalized
            .iter()
            .find_map(|m| self.member_to_group.get(m).copied());
        let idx = existing.unwrap_or_else(|| {
            self.groups.push(Vec::new());
            self.groups.len() - 1
        });

        for member in normalized {
            match self.member_to_group.get(&member).copied() {
                Some(other) if other != idx => {
                    let moved = std::mem::take(&mut self.groups[other]);
                    for m in moved {
                        self.member_to_group.insert(m.clone(), idx);
                        self.groups[idx].push(m);
                    }
                }
                Some(_) => {}
                None => {
                    self.member_to_group.insert(member.clone(), idx);
                    self.groups[idx].push(member);
                }
            }
        }
    }

    /// Builder-style group insertion
    #[must_use]
    pub fn with_group(mut self, members: &[&str]) -> Self {
        self.add_group(members);
        self
    }

    /// Whether both values belong to the same group
    #[must_use]
    pub fn same_group(&self, a: &str, b: &str) -> bool {
        match (self.group_index(a), self.group_index(b)) {
            (Some(ga), Some(gb)) => ga == gb,
            _ => false,
        }
    }

    /// Whether the value belongs to any group
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.group_index(value).is_some()
    }

    /// All members of the group containing `value`
    #[must_use]
    pub fn group_of(&self, value: &str) -> Option<&[String]> {
        self.group_index(value).map(|idx| self.groups[idx].as_slice())
    }

    /// Number of non-empty groups
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.iter().filter(|g| !g.is_empty()).count()
    }

    fn group_index(&self, value: &str) -> Option<usize> {
        self.member_to_group
            .get(&value.trim().to_uppercase())
            .copied()
    }
}

/// Serializable form of an extra group supplied through configuration.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct EquivalenceGroupEntry {
    /// Table to extend (e.g. `opamp`, `diode`)
    pub table: String,
    /// Mutually substitutable members
    pub members: Vec<String>,
}

/// Named collection of equivalence tables, shared by tolerance rules and
/// calculator boosts.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceTables {
    tables: HashMap<String, Arc<EquivalenceTable>>,
}

impl EquivalenceTables {
    pub const DIELECTRIC: &'static str = "dielectric";
    pub const LOGIC_FAMILY: &'static str = "logic_family";
    pub const DIODE: &'static str = "diode";
    pub const TRANSISTOR: &'static str = "transistor";
    pub const MOSFET: &'static str = "mosfet";
    pub const OPAMP: &'static str = "opamp";
    pub const REGULATOR: &'static str = "regulator";
    pub const MEMORY: &'static str = "memory";
    pub const SENSOR: &'static str = "sensor";

    /// Empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in curated tables
    #[must_use]
    pub fn builtin() -> Self {
        let mut tables = Self::new();

        tables.insert(
            EquivalenceTable::new(Self::DIELECTRIC).with_group(&["C0G", "NP0", "COG"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::LOGIC_FAMILY)
                // TTL-compatible input thresholds at 5 V
                .with_group(&["LS", "ALS", "S", "F", "HCT", "ACT", "AHCT"])
                // CMOS input thresholds at 5 V
                .with_group(&["HC", "AC", "AHC"])
                // Low-voltage CMOS
                .with_group(&["LVC", "LV", "ALVC", "LVX"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::DIODE)
                .with_group(&["1N4148", "1N914", "1N4448", "1N914B", "LL4148"])
                .with_group(&["1N4001", "RL201"])
                .with_group(&["1N4002", "RL202"])
                .with_group(&["1N4003", "RL203"])
                .with_group(&["1N4004", "RL204"])
                .with_group(&["1N4005", "RL205"])
                .with_group(&["1N4006", "RL206"])
                .with_group(&["1N4007", "RL207"])
                .with_group(&["1N5817", "SB120"])
                .with_group(&["1N5819", "SB140"])
                .with_group(&["BAT54", "BAT54W"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::TRANSISTOR)
                .with_group(&["2N2222", "2N2222A", "PN2222", "PN2222A", "MMBT2222A"])
                .with_group(&["2N2907", "2N2907A", "PN2907", "PN2907A", "MMBT2907A"])
                .with_group(&["2N3904", "MMBT3904", "PN3904"])
                .with_group(&["2N3906", "MMBT3906", "PN3906"])
                .with_group(&["BC547", "BC847"])
                .with_group(&["BC557", "BC857"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::MOSFET)
                .with_group(&["IRF540", "IRF540N"])
                .with_group(&["IRFZ44", "IRFZ44N"])
                .with_group(&["IRF9540", "IRF9540N"])
                .with_group(&["AO3400", "SI2302"])
                .with_group(&["AO3401", "SI2301"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::OPAMP)
                .with_group(&["LM358", "LM2904", "MC1458", "RC4558", "NJM4558"])
                .with_group(&["LM324", "LM2902"])
                .with_group(&["LM741", "UA741"])
                .with_group(&["TL071", "TL081"])
                .with_group(&["TL072", "TL082"])
                .with_group(&["TL074", "TL084"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::REGULATOR)
                .with_group(&["LM1117", "AMS1117", "LD1117"])
                .with_group(&["LM317", "LM317T"])
                .with_group(&["LM2596", "LM2576"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::MEMORY)
                .with_group(&["24LC256", "AT24C256", "M24256", "CAT24C256"])
                .with_group(&["24LC512", "AT24C512", "M24512"])
                .with_group(&["W25Q128", "MX25L128", "IS25LP128", "S25FL128"])
                .with_group(&["W25Q64", "MX25L64", "IS25LP064", "S25FL064"]),
        );

        tables.insert(
            EquivalenceTable::new(Self::SENSOR)
                .with_group(&["DHT22", "AM2302"])
                .with_group(&["LM75", "LM75A", "LM75B"])
                .with_group(&["TMP36", "TMP35"]),
        );

        tables
    }

    /// Insert or replace a table
    pub fn insert(&mut self, table: EquivalenceTable) {
        self.tables
            .insert(table.name().to_string(), Arc::new(table));
    }

    /// Shared handle to a table
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<EquivalenceTable>> {
        self.tables.get(name).cloned()
    }

    /// Whether two values are equivalent in the named table.
    ///
    /// An unknown table never declares anything equivalent.
    #[must_use]
    pub fn same_group(&self, table: &str, a: &str, b: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|t| t.same_group(a, b))
    }

    /// Table names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Extend an existing table with a configured group.
    pub fn extend_with(&mut self, entry: &EquivalenceGroupEntry) -> Result<()> {
        if entry.members.len() < 2 {
            return Err(MpnMatchError::metadata(
                "loading equivalence groups",
                MetadataErrorKind::EmptyEquivalenceGroup(entry.table.clone()),
            ));
        }
        let Some(existing) = self.tables.get(&entry.table) else {
            return Err(MpnMatchError::metadata(
                "loading equivalence groups",
                MetadataErrorKind::UnknownEquivalenceTable(entry.table.clone()),
            ));
        };
        let mut table = EquivalenceTable::clone(existing);
        let members: Vec<&str> = entry.members.iter().map(String::as_str).collect();
        table.add_group(&members);
        self.insert(table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_group_is_case_insensitive() {
        let table = EquivalenceTable::new("t").with_group(&["lm358", "MC1458"]);
        assert!(table.same_group("LM358", "mc1458"));
        assert!(table.same_group("MC1458", "LM358"));
        assert!(!table.same_group("LM358", "LM324"));
    }

    #[test]
    fn test_overlapping_groups_merge() {
        let table = EquivalenceTable::new("t")
            .with_group(&["A", "B"])
            .with_group(&["C", "D"])
            .with_group(&["B", "C"]);
        assert!(table.same_group("A", "D"));
        assert_eq!(table.group_count(), 1);
        assert_eq!(table.group_of("A").map(<[String]>::len), Some(4));
    }

    #[test]
    fn test_builtin_tables() {
        let tables = EquivalenceTables::builtin();
        assert!(tables.same_group(EquivalenceTables::DIODE, "1N4148", "1N914"));
        assert!(tables.same_group(EquivalenceTables::DIODE, "1N4007", "RL207"));
        assert!(!tables.same_group(EquivalenceTables::DIODE, "1N4001", "RL207"));
        assert!(tables.same_group(EquivalenceTables::OPAMP, "LM358", "MC1458"));
        assert!(tables.same_group(EquivalenceTables::DIELECTRIC, "NP0", "C0G"));
        assert!(!tables.same_group("no-such-table", "A", "A"));
    }

    #[test]
    fn test_extend_with_config_group() {
        let mut tables = EquivalenceTables::builtin();
        tables
            .extend_with(&EquivalenceGroupEntry {
                table: EquivalenceTables::OPAMP.to_string(),
                members: vec!["OPA2134".to_string(), "OPA2604".to_string()],
            })
            .unwrap();
        assert!(tables.same_group(EquivalenceTables::OPAMP, "OPA2134", "OPA2604"));
        assert!(tables.same_group(EquivalenceTables::OPAMP, "LM358", "MC1458"));
    }

    #[test]
    fn test_extend_with_rejects_bad_entries() {
        let mut tables = EquivalenceTables::builtin();
        let unknown = tables.extend_with(&EquivalenceGroupEntry {
            table: "flux".to_string(),
            members: vec!["A".to_string(), "B".to_string()],
        });
        assert!(matches!(
            unknown.unwrap_err().metadata_kind(),
            Some(MetadataErrorKind::UnknownEquivalenceTable(_))
        ));

        let single = tables.extend_with(&EquivalenceGroupEntry {
            table: EquivalenceTables::DIODE.to_string(),
            members: vec!["1N4148".to_string()],
        });
        assert!(matches!(
            single.unwrap_err().metadata_kind(),
            Some(MetadataErrorKind::EmptyEquivalenceGroup(_))
        ));
    }
}

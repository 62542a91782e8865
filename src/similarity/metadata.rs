//! Per-component-type spec metadata.
//!
//! A [`MetadataRegistry`] records, for each component type, which specs are
//! compared, how much each matters and which tolerance rule applies. It is
//! assembled once through [`MetadataRegistryBuilder`] and is read-only
//! afterwards.

use indexmap::IndexMap;
use std::collections::HashMap;

use super::equivalence::EquivalenceTables;
use super::profile::{SimilarityProfile, SpecImportance};
use super::tolerance::ToleranceRule;
use crate::error::{MetadataErrorKind, MpnMatchError, Result};
use crate::model::ComponentType;

/// Comparison settings for one named spec.
#[derive(Debug, Clone)]
pub struct SpecConfig {
    pub name: String,
    pub importance: SpecImportance,
    pub rule: ToleranceRule,
}

impl SpecConfig {
    pub fn new(name: impl Into<String>, importance: SpecImportance, rule: ToleranceRule) -> Self {
        Self {
            name: name.into(),
            importance,
            rule,
        }
    }
}

/// Spec configuration for one component type.
#[derive(Debug, Clone)]
pub struct ComponentTypeMetadata {
    component_type: ComponentType,
    spec_configs: IndexMap<String, SpecConfig>,
    default_profile: SimilarityProfile,
}

impl ComponentTypeMetadata {
    /// Start building metadata for a type
    #[must_use]
    pub fn builder(component_type: ComponentType) -> ComponentTypeMetadataBuilder {
        ComponentTypeMetadataBuilder {
            inner: Self {
                component_type,
                spec_configs: IndexMap::new(),
                default_profile: SimilarityProfile::default(),
            },
        }
    }

    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        self.component_type
    }

    #[must_use]
    pub const fn default_profile(&self) -> SimilarityProfile {
        self.default_profile
    }

    /// Settings for one spec
    #[must_use]
    pub fn spec_config(&self, name: &str) -> Option<&SpecConfig> {
        self.spec_configs.get(name)
    }

    /// Spec configs in registration order
    pub fn spec_configs(&self) -> impl Iterator<Item = &SpecConfig> {
        self.spec_configs.values()
    }

    /// Names of specs at the given tier
    pub fn specs_with_importance(
        &self,
        importance: SpecImportance,
    ) -> impl Iterator<Item = &str> + '_ {
        self.spec_configs
            .values()
            .filter(move |c| c.importance == importance)
            .map(|c| c.name.as_str())
    }

    fn upsert(&mut self, config: SpecConfig) {
        self.spec_configs.insert(config.name.clone(), config);
    }
}

/// Builder for [`ComponentTypeMetadata`].
#[derive(Debug)]
#[must_use]
pub struct ComponentTypeMetadataBuilder {
    inner: ComponentTypeMetadata,
}

impl ComponentTypeMetadataBuilder {
    /// Add a spec; a later spec with the same name replaces the earlier one
    /// but keeps its position.
    pub fn spec(mut self, name: &str, importance: SpecImportance, rule: ToleranceRule) -> Self {
        self.inner.upsert(SpecConfig::new(name, importance, rule));
        self
    }

    pub const fn default_profile(mut self, profile: SimilarityProfile) -> Self {
        self.inner.default_profile = profile;
        self
    }

    #[must_use]
    pub fn build(self) -> ComponentTypeMetadata {
        self.inner
    }
}

/// Immutable lookup from component type to metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    entries: HashMap<ComponentType, ComponentTypeMetadata>,
}

impl MetadataRegistry {
    #[must_use]
    pub fn builder() -> MetadataRegistryBuilder {
        MetadataRegistryBuilder::default()
    }

    /// Registry with the built-in metadata for every calculator family.
    ///
    /// Fails when `tables` lacks a table the built-in rules refer to.
    pub fn builtin(tables: &EquivalenceTables) -> Result<Self> {
        Ok(MetadataRegistryBuilder::with_builtin(tables)?.build())
    }

    /// Metadata for `ty`, falling back along its base-type chain.
    #[must_use]
    pub fn get(&self, ty: ComponentType) -> Option<&ComponentTypeMetadata> {
        ty.lineage().find_map(|t| self.entries.get(&t))
    }

    /// Metadata registered for exactly `ty`, without fallback
    #[must_use]
    pub fn get_exact(&self, ty: ComponentType) -> Option<&ComponentTypeMetadata> {
        self.entries.get(&ty)
    }

    /// Registered types, sorted
    #[must_use]
    pub fn types(&self) -> Vec<ComponentType> {
        let mut types: Vec<_> = self.entries.keys().copied().collect();
        types.sort();
        types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`MetadataRegistry`].
#[derive(Debug, Default)]
#[must_use]
pub struct MetadataRegistryBuilder {
    entries: HashMap<ComponentType, ComponentTypeMetadata>,
}

impl MetadataRegistryBuilder {
    /// Builder pre-populated with the built-in metadata
    pub fn with_builtin(tables: &EquivalenceTables) -> Result<Self> {
        use SpecImportance::{Critical, High, Low, Medium};
        use ToleranceRule::Exact;

        let numeric = ToleranceRule::numeric;
        let equivalence = |name: &str| {
            tables.get(name).map(ToleranceRule::Equivalence).ok_or_else(|| {
                MpnMatchError::metadata(
                    "populating built-in metadata",
                    MetadataErrorKind::UnknownEquivalenceTable(name.to_string()),
                )
            })
        };
        let dielectric = equivalence(EquivalenceTables::DIELECTRIC)?;
        let logic_family = equivalence(EquivalenceTables::LOGIC_FAMILY)?;

        let mut builder = Self::default();

        builder = builder
            .register(
                ComponentTypeMetadata::builder(ComponentType::Resistor)
                    .spec("resistance", Critical, numeric())
                    .spec("package", High, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Capacitor)
                    .spec("capacitance", Critical, numeric())
                    .spec("package", High, Exact)
                    .spec("dielectric", Medium, dielectric)
                    .spec("voltage", Medium, numeric())
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Led)
                    .spec("color", Critical, Exact)
                    .spec("package", High, Exact)
                    .spec("series", Medium, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Diode)
                    .spec("family", Critical, Exact)
                    .spec("voltage", High, numeric())
                    .spec("current", Medium, numeric())
                    .spec("package", Low, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Mosfet)
                    .spec("channel", Critical, Exact)
                    .spec("voltage", High, numeric())
                    .spec("current", High, numeric())
                    .spec("package", Medium, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Transistor)
                    .spec("polarity", Critical, Exact)
                    .spec("vce", High, numeric())
                    .spec("package", Medium, Exact)
                    .spec("series", Low, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::OpAmp)
                    .spec("channels", Critical, Exact)
                    .spec("input_type", High, Exact)
                    .spec("function", Medium, Exact)
                    .spec("package", Medium, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::VoltageRegulator)
                    .spec("regulator_type", Critical, Exact)
                    .spec("polarity", Critical, Exact)
                    .spec("output_voltage", Critical, numeric())
                    .spec("current", High, numeric())
                    .spec("package", Medium, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Memory)
                    .spec("memory_type", Critical, Exact)
                    .spec("interface", High, Exact)
                    .spec("density", High, numeric())
                    .spec("package", Medium, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Sensor)
                    .spec("sensor_family", Critical, Exact)
                    .spec("interface", High, Exact)
                    .spec("package", Medium, Exact)
                    .spec("series", Low, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Connector)
                    .spec("pin_count", Critical, Exact)
                    .spec("pitch", Critical, Exact)
                    .spec("mounting", High, Exact)
                    .spec("family", Medium, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::LogicIc)
                    .spec("function", Critical, Exact)
                    .spec("logic_family", High, logic_family)
                    .spec("package", Medium, Exact)
                    .spec("temp_grade", Low, Exact)
                    .build(),
            )
            .register(
                ComponentTypeMetadata::builder(ComponentType::Passive)
                    .spec("value", Critical, numeric())
                    .spec("package", High, Exact)
                    .build(),
            );

        // Crystal and oscillator frequencies are ordered exactly
        for ty in [ComponentType::Crystal, ComponentType::Oscillator] {
            builder = builder.register(
                ComponentTypeMetadata::builder(ty)
                    .spec("value", Critical, Exact)
                    .spec("package", High, Exact)
                    .build(),
            );
        }

        Ok(builder)
    }

    /// Register (or replace) the metadata for a type
    pub fn register(mut self, metadata: ComponentTypeMetadata) -> Self {
        self.entries.insert(metadata.component_type, metadata);
        self
    }

    /// Add or replace one spec of a type, creating the entry if needed.
    pub fn override_spec(mut self, ty: ComponentType, config: SpecConfig) -> Self {
        self.entry(ty).upsert(config);
        self
    }

    /// Change the default profile of a type, creating the entry if needed.
    pub fn override_default_profile(mut self, ty: ComponentType, profile: SimilarityProfile) -> Self {
        self.entry(ty).default_profile = profile;
        self
    }

    /// Replace the cutoff of every numeric rule
    pub fn with_numeric_cutoff(mut self, cutoff: f64) -> Self {
        for metadata in self.entries.values_mut() {
            for config in metadata.spec_configs.values_mut() {
                if matches!(config.rule, ToleranceRule::NumericRatio { .. }) {
                    config.rule = ToleranceRule::NumericRatio { cutoff };
                }
            }
        }
        self
    }

    #[must_use]
    pub fn build(self) -> MetadataRegistry {
        MetadataRegistry {
            entries: self.entries,
        }
    }

    fn entry(&mut self, ty: ComponentType) -> &mut ComponentTypeMetadata {
        if !self.entries.contains_key(&ty) {
            // Start from the inherited entry so an override only changes
            // what it names.
            let inherited = ty.lineage().skip(1).find_map(|t| self.entries.get(&t));
            let metadata = ComponentTypeMetadata {
                component_type: ty,
                spec_configs: inherited
                    .map(|m| m.spec_configs.clone())
                    .unwrap_or_default(),
                default_profile: inherited.map_or_else(SimilarityProfile::default, |m| {
                    m.default_profile
                }),
            };
            self.entries.insert(ty, metadata);
        }
        self.entries
            .entry(ty)
            .or_insert_with(|| ComponentTypeMetadata::builder(ty).build())
    }
}

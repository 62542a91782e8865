//! Component-type taxonomy.
//!
//! Types form a shallow tree: manufacturer- or technology-specific subtypes
//! point at a base type through [`SUBTYPE_BASES`], and base types may in turn
//! point at a broader family (a MOSFET is a transistor, an op-amp is an IC).
//! Applicability checks walk this relation with [`ComponentType::is_a`]
//! instead of inspecting type names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Electronic component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum ComponentType {
    // Broad families
    Passive,
    Ic,

    // Passives
    Resistor,
    ResistorChipVishay,
    ResistorChipYageo,
    ResistorChipPanasonic,
    ResistorThroughHole,
    Capacitor,
    CapacitorCeramicMurata,
    CapacitorCeramicKemet,
    CapacitorCeramicTdk,
    CapacitorCeramicSamsung,
    CapacitorElectrolytic,
    Inductor,
    FerriteBead,
    Crystal,
    Oscillator,

    // Discretes
    Diode,
    DiodeRectifier,
    DiodeZener,
    DiodeSchottky,
    DiodeTvs,
    Led,
    LedOsram,
    LedLiteOn,
    LedKingbright,
    Transistor,
    TransistorDarlington,
    Mosfet,
    MosfetInfineon,
    MosfetVishay,
    MosfetAos,

    // Integrated circuits
    OpAmp,
    OpAmpTi,
    OpAmpMicrochip,
    VoltageRegulator,
    VoltageRegulatorLinear,
    VoltageRegulatorLdo,
    VoltageRegulatorSwitching,
    Memory,
    MemoryFlash,
    MemoryEeprom,
    MemorySram,
    Sensor,
    TemperatureSensor,
    HumiditySensor,
    PressureSensor,
    Accelerometer,
    Gyroscope,
    Magnetometer,
    CurrentSensor,
    HallSensor,
    LogicIc,
    LogicIcCmos4000,
    Microcontroller,

    // Electromechanical
    Connector,
    ConnectorMolex,
    ConnectorJst,
    ConnectorTe,
    ConnectorHeader,
}

/// Subtype to base-type relation.
///
/// Every type not listed here is a root.
pub const SUBTYPE_BASES: &[(ComponentType, ComponentType)] = &[
    (ComponentType::Resistor, ComponentType::Passive),
    (ComponentType::ResistorChipVishay, ComponentType::Resistor),
    (ComponentType::ResistorChipYageo, ComponentType::Resistor),
    (ComponentType::ResistorChipPanasonic, ComponentType::Resistor),
    (ComponentType::ResistorThroughHole, ComponentType::Resistor),
    (ComponentType::Capacitor, ComponentType::Passive),
    (ComponentType::CapacitorCeramicMurata, ComponentType::Capacitor),
    (ComponentType::CapacitorCeramicKemet, ComponentType::Capacitor),
    (ComponentType::CapacitorCeramicTdk, ComponentType::Capacitor),
    (ComponentType::CapacitorCeramicSamsung, ComponentType::Capacitor),
    (ComponentType::CapacitorElectrolytic, ComponentType::Capacitor),
    (ComponentType::Inductor, ComponentType::Passive),
    (ComponentType::FerriteBead, ComponentType::Passive),
    (ComponentType::Crystal, ComponentType::Passive),
    (ComponentType::DiodeRectifier, ComponentType::Diode),
    (ComponentType::DiodeZener, ComponentType::Diode),
    (ComponentType::DiodeSchottky, ComponentType::Diode),
    (ComponentType::DiodeTvs, ComponentType::Diode),
    (ComponentType::Led, ComponentType::Diode),
    (ComponentType::LedOsram, ComponentType::Led),
    (ComponentType::LedLiteOn, ComponentType::Led),
    (ComponentType::LedKingbright, ComponentType::Led),
    (ComponentType::TransistorDarlington, ComponentType::Transistor),
    (ComponentType::Mosfet, ComponentType::Transistor),
    (ComponentType::MosfetInfineon, ComponentType::Mosfet),
    (ComponentType::MosfetVishay, ComponentType::Mosfet),
    (ComponentType::MosfetAos, ComponentType::Mosfet),
    (ComponentType::OpAmp, ComponentType::Ic),
    (ComponentType::OpAmpTi, ComponentType::OpAmp),
    (ComponentType::OpAmpMicrochip, ComponentType::OpAmp),
    (ComponentType::VoltageRegulator, ComponentType::Ic),
    (ComponentType::VoltageRegulatorLinear, ComponentType::VoltageRegulator),
    (ComponentType::VoltageRegulatorLdo, ComponentType::VoltageRegulator),
    (ComponentType::VoltageRegulatorSwitching, ComponentType::VoltageRegulator),
    (ComponentType::Memory, ComponentType::Ic),
    (ComponentType::MemoryFlash, ComponentType::Memory),
    (ComponentType::MemoryEeprom, ComponentType::Memory),
    (ComponentType::MemorySram, ComponentType::Memory),
    (ComponentType::Sensor, ComponentType::Ic),
    (ComponentType::TemperatureSensor, ComponentType::Sensor),
    (ComponentType::HumiditySensor, ComponentType::Sensor),
    (ComponentType::PressureSensor, ComponentType::Sensor),
    (ComponentType::Accelerometer, ComponentType::Sensor),
    (ComponentType::Gyroscope, ComponentType::Sensor),
    (ComponentType::Magnetometer, ComponentType::Sensor),
    (ComponentType::CurrentSensor, ComponentType::Sensor),
    (ComponentType::HallSensor, ComponentType::Sensor),
    (ComponentType::LogicIc, ComponentType::Ic),
    (ComponentType::LogicIcCmos4000, ComponentType::LogicIc),
    (ComponentType::Microcontroller, ComponentType::Ic),
    (ComponentType::ConnectorMolex, ComponentType::Connector),
    (ComponentType::ConnectorJst, ComponentType::Connector),
    (ComponentType::ConnectorTe, ComponentType::Connector),
    (ComponentType::ConnectorHeader, ComponentType::Connector),
];

impl ComponentType {
    /// Every component type, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Passive,
        Self::Ic,
        Self::Resistor,
        Self::ResistorChipVishay,
        Self::ResistorChipYageo,
        Self::ResistorChipPanasonic,
        Self::ResistorThroughHole,
        Self::Capacitor,
        Self::CapacitorCeramicMurata,
        Self::CapacitorCeramicKemet,
        Self::CapacitorCeramicTdk,
        Self::CapacitorCeramicSamsung,
        Self::CapacitorElectrolytic,
        Self::Inductor,
        Self::FerriteBead,
        Self::Crystal,
        Self::Oscillator,
        Self::Diode,
        Self::DiodeRectifier,
        Self::DiodeZener,
        Self::DiodeSchottky,
        Self::DiodeTvs,
        Self::Led,
        Self::LedOsram,
        Self::LedLiteOn,
        Self::LedKingbright,
        Self::Transistor,
        Self::TransistorDarlington,
        Self::Mosfet,
        Self::MosfetInfineon,
        Self::MosfetVishay,
        Self::MosfetAos,
        Self::OpAmp,
        Self::OpAmpTi,
        Self::OpAmpMicrochip,
        Self::VoltageRegulator,
        Self::VoltageRegulatorLinear,
        Self::VoltageRegulatorLdo,
        Self::VoltageRegulatorSwitching,
        Self::Memory,
        Self::MemoryFlash,
        Self::MemoryEeprom,
        Self::MemorySram,
        Self::Sensor,
        Self::TemperatureSensor,
        Self::HumiditySensor,
        Self::PressureSensor,
        Self::Accelerometer,
        Self::Gyroscope,
        Self::Magnetometer,
        Self::CurrentSensor,
        Self::HallSensor,
        Self::LogicIc,
        Self::LogicIcCmos4000,
        Self::Microcontroller,
        Self::Connector,
        Self::ConnectorMolex,
        Self::ConnectorJst,
        Self::ConnectorTe,
        Self::ConnectorHeader,
    ];

    /// Canonical upper-case name, e.g. `RESISTOR_CHIP_VISHAY`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Passive => "PASSIVE",
            Self::Ic => "IC",
            Self::Resistor => "RESISTOR",
            Self::ResistorChipVishay => "RESISTOR_CHIP_VISHAY",
            Self::ResistorChipYageo => "RESISTOR_CHIP_YAGEO",
            Self::ResistorChipPanasonic => "RESISTOR_CHIP_PANASONIC",
            Self::ResistorThroughHole => "RESISTOR_THROUGH_HOLE",
            Self::Capacitor => "CAPACITOR",
            Self::CapacitorCeramicMurata => "CAPACITOR_CERAMIC_MURATA",
            Self::CapacitorCeramicKemet => "CAPACITOR_CERAMIC_KEMET",
            Self::CapacitorCeramicTdk => "CAPACITOR_CERAMIC_TDK",
            Self::CapacitorCeramicSamsung => "CAPACITOR_CERAMIC_SAMSUNG",
            Self::CapacitorElectrolytic => "CAPACITOR_ELECTROLYTIC",
            Self::Inductor => "INDUCTOR",
            Self::FerriteBead => "FERRITE_BEAD",
            Self::Crystal => "CRYSTAL",
            Self::Oscillator => "OSCILLATOR",
            Self::Diode => "DIODE",
            Self::DiodeRectifier => "DIODE_RECTIFIER",
            Self::DiodeZener => "DIODE_ZENER",
            Self::DiodeSchottky => "DIODE_SCHOTTKY",
            Self::DiodeTvs => "DIODE_TVS",
            Self::Led => "LED",
            Self::LedOsram => "LED_OSRAM",
            Self::LedLiteOn => "LED_LITEON",
            Self::LedKingbright => "LED_KINGBRIGHT",
            Self::Transistor => "TRANSISTOR",
            Self::TransistorDarlington => "TRANSISTOR_DARLINGTON",
            Self::Mosfet => "MOSFET",
            Self::MosfetInfineon => "MOSFET_INFINEON",
            Self::MosfetVishay => "MOSFET_VISHAY",
            Self::MosfetAos => "MOSFET_AOS",
            Self::OpAmp => "OPAMP",
            Self::OpAmpTi => "OPAMP_TI",
            Self::OpAmpMicrochip => "OPAMP_MICROCHIP",
            Self::VoltageRegulator => "VOLTAGE_REGULATOR",
            Self::VoltageRegulatorLinear => "VOLTAGE_REGULATOR_LINEAR",
            Self::VoltageRegulatorLdo => "VOLTAGE_REGULATOR_LDO",
            Self::VoltageRegulatorSwitching => "VOLTAGE_REGULATOR_SWITCHING",
            Self::Memory => "MEMORY",
            Self::MemoryFlash => "MEMORY_FLASH",
            Self::MemoryEeprom => "MEMORY_EEPROM",
            Self::MemorySram => "MEMORY_SRAM",
            Self::Sensor => "SENSOR",
            Self::TemperatureSensor => "TEMPERATURE_SENSOR",
            Self::HumiditySensor => "HUMIDITY_SENSOR",
            Self::PressureSensor => "PRESSURE_SENSOR",
            Self::Accelerometer => "ACCELEROMETER",
            Self::Gyroscope => "GYROSCOPE",
            Self::Magnetometer => "MAGNETOMETER",
            Self::CurrentSensor => "CURRENT_SENSOR",
            Self::HallSensor => "HALL_SENSOR",
            Self::LogicIc => "LOGIC_IC",
            Self::LogicIcCmos4000 => "LOGIC_IC_CMOS_4000",
            Self::Microcontroller => "MICROCONTROLLER",
            Self::Connector => "CONNECTOR",
            Self::ConnectorMolex => "CONNECTOR_MOLEX",
            Self::ConnectorJst => "CONNECTOR_JST",
            Self::ConnectorTe => "CONNECTOR_TE",
            Self::ConnectorHeader => "CONNECTOR_HEADER",
        }
    }

    /// Immediate base type, or `None` for a root.
    #[must_use]
    pub fn base_type(&self) -> Option<Self> {
        SUBTYPE_BASES
            .iter()
            .find(|(sub, _)| sub == self)
            .map(|(_, base)| *base)
    }

    /// Whether `self` is `base` or (transitively) one of its subtypes.
    #[must_use]
    pub fn is_a(&self, base: Self) -> bool {
        self.lineage().any(|t| t == base)
    }

    /// `self` followed by each ancestor up to the root.
    pub fn lineage(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(*self), Self::base_type)
    }

    /// Whether `sub` is a strict subtype of `self`.
    #[must_use]
    pub fn is_base_type_of(&self, sub: Self) -> bool {
        sub != *self && sub.is_a(*self)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a component type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComponentType(pub String);

impl fmt::Display for UnknownComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown component type '{}'", self.0)
    }
}

impl std::error::Error for UnknownComponentType {}

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}

impl Serialize for ComponentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_resolves_to_base() {
        assert_eq!(
            ComponentType::ResistorChipVishay.base_type(),
            Some(ComponentType::Resistor)
        );
        assert!(ComponentType::ResistorChipVishay.is_a(ComponentType::Resistor));
        assert!(ComponentType::ResistorChipVishay.is_a(ComponentType::Passive));
        assert!(!ComponentType::ResistorChipVishay.is_a(ComponentType::Capacitor));
    }

    #[test]
    fn test_mosfet_is_a_transistor() {
        assert!(ComponentType::MosfetInfineon.is_a(ComponentType::Mosfet));
        assert!(ComponentType::MosfetInfineon.is_a(ComponentType::Transistor));
        assert!(!ComponentType::Transistor.is_a(ComponentType::Mosfet));
    }

    #[test]
    fn test_roots_have_no_base() {
        assert_eq!(ComponentType::Ic.base_type(), None);
        assert_eq!(ComponentType::Connector.base_type(), None);
        assert_eq!(ComponentType::Diode.base_type(), None);
    }

    #[test]
    fn test_is_base_type_of() {
        assert!(ComponentType::OpAmp.is_base_type_of(ComponentType::OpAmpTi));
        assert!(ComponentType::Ic.is_base_type_of(ComponentType::OpAmpTi));
        assert!(!ComponentType::OpAmp.is_base_type_of(ComponentType::OpAmp));
    }

    #[test]
    fn test_lineage_order() {
        let lineage: Vec<_> = ComponentType::LedOsram.lineage().collect();
        assert_eq!(
            lineage,
            vec![
                ComponentType::LedOsram,
                ComponentType::Led,
                ComponentType::Diode
            ]
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "resistor_chip_vishay".parse::<ComponentType>(),
            Ok(ComponentType::ResistorChipVishay)
        );
        assert_eq!("OPAMP".parse::<ComponentType>(), Ok(ComponentType::OpAmp));
        assert_eq!(
            "voltage-regulator".parse::<ComponentType>(),
            Ok(ComponentType::VoltageRegulator)
        );
        assert!("FLUX_CAPACITOR".parse::<ComponentType>().is_err());
    }

    #[test]
    fn test_all_names_round_trip() {
        for ty in ComponentType::ALL {
            assert_eq!(ty.name().parse::<ComponentType>(), Ok(*ty));
        }
    }

    #[test]
    fn test_base_table_has_no_cycles() {
        for ty in ComponentType::ALL {
            assert!(ty.lineage().count() <= 4, "{ty} lineage too deep");
        }
    }
}

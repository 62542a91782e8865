//! Environmental, motion and current sensors.

use super::{scoring_type, Tiers};
use crate::model::codes::match_part_prefix;
use crate::model::{ComponentType, SpecBag};
use crate::similarity::equivalence::EquivalenceTables;
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const TIERS: Tiers = Tiers {
    high: 0.9,
    medium: 0.6,
    low: 0.2,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct SensorInfo {
    family: &'static str,
    interface: &'static str,
    package: &'static str,
    series: &'static str,
}

const fn sensor(
    family: &'static str,
    interface: &'static str,
    package: &'static str,
    series: &'static str,
) -> SensorInfo {
    SensorInfo {
        family,
        interface,
        package,
        series,
    }
}

/// Keys are matched against the MPN with dashes removed
const SENSOR_PARTS: &[(&str, SensorInfo)] = &[
    // Temperature
    ("LM35", sensor("TEMPERATURE", "ANALOG", "TO-92", "LM35")),
    ("LM75", sensor("TEMPERATURE", "I2C", "SOIC-8", "LM75")),
    ("LM75A", sensor("TEMPERATURE", "I2C", "SOIC-8", "LM75")),
    ("LM75B", sensor("TEMPERATURE", "I2C", "SOIC-8", "LM75")),
    ("TMP35", sensor("TEMPERATURE", "ANALOG", "TO-92", "TMP3")),
    ("TMP36", sensor("TEMPERATURE", "ANALOG", "TO-92", "TMP3")),
    ("TMP102", sensor("TEMPERATURE", "I2C", "SOT-563", "TMP1")),
    ("TMP117", sensor("TEMPERATURE", "I2C", "WSON-6", "TMP1")),
    ("DS18B20", sensor("TEMPERATURE", "1-WIRE", "TO-92", "DS18")),
    ("MCP9808", sensor("TEMPERATURE", "I2C", "MSOP-8", "MCP98")),
    ("MAX6675", sensor("TEMPERATURE", "SPI", "SOIC-8", "MAX66")),
    ("MAX31855", sensor("TEMPERATURE", "SPI", "SOIC-8", "MAX318")),
    ("MAX31856", sensor("TEMPERATURE", "SPI", "TSSOP-14", "MAX318")),
    // Humidity
    ("DHT11", sensor("HUMIDITY", "SINGLE_WIRE", "MODULE", "DHT")),
    ("DHT22", sensor("HUMIDITY", "SINGLE_WIRE", "MODULE", "DHT")),
    ("AM2302", sensor("HUMIDITY", "SINGLE_WIRE", "MODULE", "AM23")),
    ("SHT30", sensor("HUMIDITY", "I2C", "DFN-8", "SHT3")),
    ("SHT31", sensor("HUMIDITY", "I2C", "DFN-8", "SHT3")),
    ("SHT35", sensor("HUMIDITY", "I2C", "DFN-8", "SHT3")),
    ("SHT40", sensor("HUMIDITY", "I2C", "DFN-4", "SHT4")),
    ("HDC1080", sensor("HUMIDITY", "I2C", "WSON-6", "HDC")),
    ("SI7021", sensor("HUMIDITY", "I2C", "DFN-6", "SI70")),
    ("HTU21", sensor("HUMIDITY", "I2C", "DFN-6", "HTU")),
    // Pressure
    ("BMP180", sensor("PRESSURE", "I2C", "LGA-7", "BMP")),
    ("BMP280", sensor("PRESSURE", "I2C", "LGA-8", "BMP")),
    ("BME280", sensor("PRESSURE", "I2C", "LGA-8", "BME")),
    ("BME680", sensor("PRESSURE", "I2C", "LGA-8", "BME")),
    ("MPL3115", sensor("PRESSURE", "I2C", "LGA-8", "MPL")),
    ("LPS22", sensor("PRESSURE", "I2C", "LGA-10", "LPS")),
    ("MS5611", sensor("PRESSURE", "I2C", "QFN-8", "MS56")),
    // Motion
    ("ADXL345", sensor("ACCELEROMETER", "SPI", "LGA-14", "ADXL")),
    ("ADXL335", sensor("ACCELEROMETER", "ANALOG", "LFCSP-16", "ADXL")),
    ("LIS3DH", sensor("ACCELEROMETER", "I2C", "LGA-16", "LIS")),
    ("LIS2DH", sensor("ACCELEROMETER", "I2C", "LGA-12", "LIS")),
    ("MMA8452", sensor("ACCELEROMETER", "I2C", "QFN-16", "MMA")),
    ("MPU6050", sensor("GYROSCOPE", "I2C", "QFN-24", "MPU")),
    ("MPU9250", sensor("GYROSCOPE", "I2C", "QFN-24", "MPU")),
    ("L3GD20", sensor("GYROSCOPE", "SPI", "LGA-16", "L3G")),
    ("BMI160", sensor("GYROSCOPE", "I2C", "LGA-14", "BMI")),
    ("ICM20948", sensor("GYROSCOPE", "I2C", "QFN-24", "ICM")),
    ("HMC5883", sensor("MAGNETOMETER", "I2C", "LCC-16", "HMC")),
    ("QMC5883", sensor("MAGNETOMETER", "I2C", "LGA-16", "QMC")),
    ("LIS3MDL", sensor("MAGNETOMETER", "I2C", "LGA-12", "LIS")),
    // Current and magnetic field
    ("ACS712", sensor("CURRENT", "ANALOG", "SOIC-8", "ACS7")),
    ("ACS723", sensor("CURRENT", "ANALOG", "SOIC-8", "ACS7")),
    ("INA219", sensor("CURRENT", "I2C", "SOT-23-8", "INA2")),
    ("INA226", sensor("CURRENT", "I2C", "MSOP-10", "INA2")),
    ("MAX471", sensor("CURRENT", "ANALOG", "SOIC-8", "MAX47")),
    ("A3144", sensor("HALL", "DIGITAL", "TO-92", "A31")),
    ("US5881", sensor("HALL", "DIGITAL", "TO-92", "US58")),
    ("SS49E", sensor("HALL", "ANALOG", "TO-92", "SS49")),
    ("DRV5053", sensor("HALL", "ANALOG", "SOT-23", "DRV50")),
];

/// Table entry for `mpn` and the key it matched
fn lookup(mpn: &str) -> Option<(&'static str, SensorInfo)> {
    let compact = mpn.replace('-', "");
    match_part_prefix(SENSOR_PARTS, &compact).map(|&(key, info)| (key, info))
}

/// Sensor similarity; a different measured quantity never matches
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorCalculator;

impl SpecFamily for SensorCalculator {
    fn family_name(&self) -> &'static str {
        "SensorCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Sensor, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let mut bag = SpecBag::new();
        if let Some((_, info)) = lookup(mpn) {
            bag.insert_text("sensor_family", Some(info.family));
            bag.insert_text("interface", Some(info.interface));
            bag.insert_text("package", Some(info.package));
            bag.insert_text("series", Some(info.series));
        }
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["sensor_family"]
    }

    fn low_similarity(&self) -> f64 {
        TIERS.low
    }

    fn high_similarity(&self) -> f64 {
        TIERS.high
    }

    fn known_equivalent(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> bool {
        match (lookup(mpn1), lookup(mpn2)) {
            (Some((a, _)), Some((b, _))) => ctx.equivalent(EquivalenceTables::SENSOR, a, b),
            _ => false,
        }
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        let same_base = match (lookup(mpn1), lookup(mpn2)) {
            (Some((a, _)), Some((b, _))) => a == b,
            _ => false,
        };
        TIERS.score(mpn1, mpn2, same_base || self.known_equivalent(mpn1, mpn2, ctx))
    }
}

impl SimilarityCalculator for SensorCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Sensor)
    }

    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        evaluate(self, mpn1, mpn2, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::calculators::test_support::{assert_symmetric, explain};
    use crate::similarity::traits::ScorePath;

    #[test]
    fn test_lookup_respects_part_boundaries() {
        assert_eq!(lookup("LM35DZ").map(|(k, _)| k), Some("LM35"));
        assert_eq!(lookup("LM75BD").map(|(k, _)| k), Some("LM75B"));
        assert_eq!(lookup("MPU-6050").map(|(k, _)| k), Some("MPU6050"));
        assert!(lookup("LM358").is_none());
    }

    #[test]
    fn test_humidity_second_source() {
        let s = assert_symmetric(&SensorCalculator, "DHT22", "AM2302");
        assert!(s >= 0.9, "got {s}");
    }

    #[test]
    fn test_tmp3x_pair_identical() {
        let s = assert_symmetric(&SensorCalculator, "TMP36GT9Z", "TMP35GT9Z");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_family_mismatch_short_circuits() {
        let e = explain(&SensorCalculator, "LM75AD", "DHT22");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - TIERS.low).abs() < 1e-12);
    }

    #[test]
    fn test_same_family_different_interface() {
        let s = assert_symmetric(&SensorCalculator, "LM35DZ", "DS18B20");
        assert!(s > 0.5 && s < 0.8, "got {s}");
    }
}

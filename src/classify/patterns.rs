//! Built-in MPN classification patterns.
//!
//! Patterns are tried in order against the trimmed, upper-cased MPN and the
//! first match wins, so more specific families come before the broad ones
//! that would also match them (MOSFETs before `2N` transistors, sensors
//! before `SS` Schottky diodes).

use crate::model::ComponentType;

pub(super) const BUILTIN_PATTERNS: &[(&str, ComponentType)] = &[
    // Connectors
    (r"^\d{2}-\d{2}-\d{4}$", ComponentType::ConnectorMolex),
    (
        r"^(5304[78]|53261|53398|43650|43045|87758)-?\d{4}$",
        ComponentType::ConnectorMolex,
    ),
    (r"^(B|S|BM|SM)\d{1,2}B-[A-Z]+", ComponentType::ConnectorJst),
    (r"^(\d-)?\d{6,7}-\d$", ComponentType::ConnectorTe),
    (r"^(HDR|PINHD|HEADER)-?\d", ComponentType::ConnectorHeader),
    // Sensors
    (
        r"^(LM35|LM75[AB]?)([^0-9]|$)|^(TMP\d{2,3}|DS18B20|MCP9808|MAX6675|MAX3185\d)",
        ComponentType::TemperatureSensor,
    ),
    (
        r"^(DHT\d{2}|AM23\d{2}|SHT\d{2}|HDC\d{4}|SI70\d{2}|HTU21)",
        ComponentType::HumiditySensor,
    ),
    (
        r"^(BMP\d{3}|BME\d{3}|MPL3115|LPS\d{2}|MS5611)",
        ComponentType::PressureSensor,
    ),
    (
        r"^(ADXL\d{3}|LIS3DH|LIS2DH|MMA\d{4})",
        ComponentType::Accelerometer,
    ),
    (r"^(L3GD20|MPU-?\d{4}|BMI\d{3}|ICM-?\d{5})", ComponentType::Gyroscope),
    (r"^(HMC5883|QMC5883|LIS3MDL)", ComponentType::Magnetometer),
    (r"^(ACS7\d{2}|INA\d{3}|MAX471)", ComponentType::CurrentSensor),
    (r"^(A3144|SS49E|DRV50\d{2}|US5881)", ComponentType::HallSensor),
    // Resistors
    (r"^CRCW\d{4}", ComponentType::ResistorChipVishay),
    (r"^RC\d{4}[A-Z]{2}-", ComponentType::ResistorChipYageo),
    (r"^ERJ-?\d", ComponentType::ResistorChipPanasonic),
    (r"^(CFR|MFR)-?\d{2}", ComponentType::ResistorThroughHole),
    (r"^(RMCF|RNCP|RK73|MCR\d{2}|ERA-?\d)", ComponentType::Resistor),
    // Capacitors
    (r"^G[RC][MJT]\d{2}", ComponentType::CapacitorCeramicMurata),
    (r"^C\d{4}C\d{3}", ComponentType::CapacitorCeramicKemet),
    (
        r"^C\d{4}([A-Z]\d[A-Z]|C0G|NP0)\d[A-Z]",
        ComponentType::CapacitorCeramicTdk,
    ),
    (r"^CL\d{2}[A-Z]\d{3}", ComponentType::CapacitorCeramicSamsung),
    (r"^(EEE|EEU|UVR|UVZ|UWT|ECA)-?", ComponentType::CapacitorElectrolytic),
    (r"^(CC|CGA)\d{4}", ComponentType::Capacitor),
    // Inductors and ferrites
    (r"^LQ[MHWG]\d{2}", ComponentType::Inductor),
    (r"^(SRR|SRN|SRU|SRP)\d{4}", ComponentType::Inductor),
    (r"^MLZ\d{4}", ComponentType::Inductor),
    (r"^(XAL|XFL|LPS)\d{4}", ComponentType::Inductor),
    (r"^BLM\d{2}", ComponentType::FerriteBead),
    // Frequency control
    (r"^(ASE|ASV|ASDMB|SIT\d{4}|DSC\d{4})", ComponentType::Oscillator),
    (
        r"^(ABM\d|HC-?49|NX\d{4}|FA-\d{3}|ECS-\d{3})",
        ComponentType::Crystal,
    ),
    // LEDs
    (r"^(APT|APTD|APHHS|APHCM)\d{4}", ComponentType::LedKingbright),
    (r"^WP\d{3,4}", ComponentType::LedKingbright),
    (r"^(LTST|LTL)-?", ComponentType::LedLiteOn),
    (
        r"^L[SGYBWAOTR] ?[A-Z]{1,2}\d{2,3}[A-Z]?(-| |$)",
        ComponentType::LedOsram,
    ),
    (r"^(LED|SML-|SMLE|OVS|XPG|VLM)", ComponentType::Led),
    // Diodes
    (
        r"^(1N47\d{2}|1N52\d{2}|BZX\d{2}|BZT52|MMSZ)",
        ComponentType::DiodeZener,
    ),
    (
        r"^(1N58\d{2}|BAT\d{2}|SS\d{2,3}|SB\d{3}|MBR\d|SK\d{2})",
        ComponentType::DiodeSchottky,
    ),
    (r"^(SMAJ|SMBJ|SMCJ|P6KE|1\.5KE|P4SMA)", ComponentType::DiodeTvs),
    (
        r"^(1N400\d|1N540\d|RL20\d|UF400\d|MUR\d{3}|FR\d{3})",
        ComponentType::DiodeRectifier,
    ),
    (r"^(1N\d{3,4}|LL4148|BAV\d{2}|BAS\d{2}|BAW\d{2})", ComponentType::Diode),
    // MOSFETs before BJTs: 2N7000 also looks like a 2N transistor
    (r"^(IRF|IRL)", ComponentType::MosfetInfineon),
    (r"^(BSC|BSZ|IP[PDBAW]\d{2})", ComponentType::MosfetInfineon),
    (r"^SI\d{4}", ComponentType::MosfetVishay),
    (r"^AON?\d{4}", ComponentType::MosfetAos),
    (r"^(2N700[02]|BSS\d{2,3}|FQP|FDN|NTR|DMN|DMP)", ComponentType::Mosfet),
    (r"^TIP1[2-4]\d", ComponentType::TransistorDarlington),
    (
        r"^(2N\d{4}|PN\d{4}|MMBT\d{4}|BC\d{3}|BD\d{3}|TIP\d{2,3}|MJE?\d{4}|S[89][05]\d{2})",
        ComponentType::Transistor,
    ),
    // Op-amps
    (r"^(TL0[78]\d|OPA\d{3,4}|TLV\d{4}|LMV3\d{2})", ComponentType::OpAmpTi),
    (r"^MCP60\d{2}", ComponentType::OpAmpMicrochip),
    (
        r"^(LM358|LM324|LM2904|LM2902|LM741|UA741|MC1458|RC4558|NJM4558|NE553[24]|OP07|AD86\d{2})",
        ComponentType::OpAmp,
    ),
    // Voltage regulators
    (r"^(L|LM|MC|UA|KA)?7[89](L|M)?\d{2}", ComponentType::VoltageRegulatorLinear),
    (r"^LM3(17|37|38|50)", ComponentType::VoltageRegulatorLinear),
    (
        r"^((LM|AMS|LD|AZ)1117|LM108[56]|MCP17\d{2}|LP29\d{2}|TPS7\d)",
        ComponentType::VoltageRegulatorLdo,
    ),
    (
        r"^(LM2596|LM257[56]|MP1584|TPS5\d{4}|MC34063)",
        ComponentType::VoltageRegulatorSwitching,
    ),
    // Memory
    (
        r"^(W25Q|MX25[LRUV]|S25FL|IS25[LW]P|AT25SF|AT25DF|GD25Q)",
        ComponentType::MemoryFlash,
    ),
    (
        r"^((AT|CAT|BR)?24(LC|AA|FC|C)\d|M24C?\d{2,3}|(AT)?25(LC|AA|C)\d|93(LC|AA|C)\d|AT28C)",
        ComponentType::MemoryEeprom,
    ),
    (r"^(23(LC|K|A)\d|CY62|IS6[12]|AS6C)", ComponentType::MemorySram),
    // Logic
    (r"^(CD|HEF|MC1|TC)4\d{3}", ComponentType::LogicIcCmos4000),
    (
        r"^(SN|MC|M|CD|NC|HD|TC|IDT|NLV|NL)?(74|54)[A-Z]{0,5}(\dG)?\d{2,4}",
        ComponentType::LogicIc,
    ),
    // Other ICs
    (
        r"^(ATMEGA|ATTINY|ATSAM|STM32|STM8|PIC1[0268]|PIC24|DSPIC|ESP32|ESP8266|MSP430|NRF5\d|RP2040|EFM32|LPC\d{4})",
        ComponentType::Microcontroller,
    ),
    (
        r"^(NE55[56]|LM555|TLC555|ICM7555|ULN200\d|MAX3?232|CH340|FT232|LM393|LM339|TPS\d)",
        ComponentType::Ic,
    ),
    // Anything still carrying a frequency is most likely a crystal
    (r"\d(\.\d+)?MHZ", ComponentType::Crystal),
];

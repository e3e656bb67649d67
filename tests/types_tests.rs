//! Type System Tests
//!
//! Tests for command codes and the small value types shared with the host.

use rf_test_firmware::types::*;

// ============================================================================
// RfCommand Tests
// ============================================================================

#[test]
fn test_rf_command_codes() {
    assert_eq!(RfCommand::ModulatedTx.code(), 0);
    assert_eq!(RfCommand::UnmodulatedTx.code(), 1);
    assert_eq!(RfCommand::Rx.code(), 2);
    assert_eq!(RfCommand::TxSweep.code(), 3);
    assert_eq!(RfCommand::RxSweep.code(), 4);
    assert_eq!(RfCommand::RangeTest.code(), 5);
}

#[test]
fn test_rf_command_code_preserved_for_every_byte() {
    for code in 0..=u8::MAX {
        assert_eq!(RfCommand::from_code(code).code(), code);
    }
}

#[test]
fn test_rf_command_unknown_above_range() {
    assert_eq!(RfCommand::from(6), RfCommand::Unknown(6));
    assert_eq!(RfCommand::from(0xFF), RfCommand::Unknown(0xFF));
}

#[test]
fn test_rf_command_transmitting() {
    assert!(RfCommand::ModulatedTx.is_transmitting());
    assert!(RfCommand::UnmodulatedTx.is_transmitting());
    assert!(RfCommand::TxSweep.is_transmitting());
    assert!(!RfCommand::Rx.is_transmitting());
    assert!(!RfCommand::RxSweep.is_transmitting());
    assert!(!RfCommand::RangeTest.is_transmitting());
    assert!(!RfCommand::Unknown(9).is_transmitting());
}

// ============================================================================
// UsbCommand Tests
// ============================================================================

#[test]
fn test_usb_command_codes() {
    assert_eq!(UsbCommand::FirmwareVersion.code(), 1);
    assert_eq!(UsbCommand::InitRf.code(), 10);
    assert_eq!(UsbCommand::SendPacket.code(), 11);
    assert_eq!(UsbCommand::StatusPacket.code(), 12);
}

#[test]
fn test_usb_command_unknown() {
    assert_eq!(UsbCommand::from_code(2), UsbCommand::Unknown(2));
    assert_eq!(u8::from(UsbCommand::Unknown(0x5B)), 0x5B);
}

// ============================================================================
// FemConfig Tests
// ============================================================================

#[test]
fn test_fem_config_bits() {
    assert!(!FemConfig::from_bits(0).mode_high());
    assert!(!FemConfig::from_bits(0).antenna_high());
    assert!(FemConfig::from_bits(0x01).mode_high());
    assert!(FemConfig::from_bits(0x02).antenna_high());
    assert!(!FemConfig::from_bits(0x02).mode_high());
}

#[test]
fn test_fem_config_upper_bits_carried() {
    let fem = FemConfig::from_bits(0xF1);
    assert_eq!(fem.bits(), 0xF1);
    assert!(fem.mode_high());
    assert!(!fem.antenna_high());
}

#[test]
fn test_fem_config_new() {
    assert_eq!(FemConfig::new(true, true).bits(), 0x03);
    assert_eq!(FemConfig::new(false, true).bits(), 0x02);
}

// ============================================================================
// TxPower Tests
// ============================================================================

#[test]
fn test_tx_power_negative_dbm() {
    assert_eq!(TxPower::from_dbm(-8).raw(), 0xF8);
    assert_eq!(TxPower::from_dbm(-40).raw(), 0xD8);
}

#[test]
fn test_tx_power_positive_dbm() {
    assert_eq!(TxPower::from_dbm(8).raw(), 8);
    assert_eq!(TxPower::from_raw(8).as_dbm(), 8);
}

#[test]
fn test_tx_power_dbm_round_trip() {
    for dbm in [-40, -20, -16, -12, -8, -4, 0, 2, 3, 4, 8] {
        assert_eq!(TxPower::from_dbm(dbm).as_dbm(), dbm);
    }
}

// ============================================================================
// FirmwareVersion Tests
// ============================================================================

#[test]
fn test_firmware_version_raw() {
    let version = FirmwareVersion::from_raw(0x0001_0000);
    assert_eq!(version, FirmwareVersion::new(1, 0, 0));
    assert_eq!(version.raw(), 0x0001_0000);
}

#[test]
fn test_firmware_version_display() {
    assert_eq!(FirmwareVersion::new(1, 0, 0).to_string(), "1.0.0");
    assert_eq!(format!("{:?}", FirmwareVersion::new(1, 2, 3)), "FirmwareVersion(1.2.3)");
}

#[test]
fn test_firmware_version_ordering() {
    assert!(FirmwareVersion::new(1, 0, 1) > FirmwareVersion::new(1, 0, 0));
    assert!(FirmwareVersion::new(2, 0, 0) > FirmwareVersion::new(1, 9, 9));
}

#[test]
fn test_transmit_pattern_default() {
    assert_eq!(TransmitPattern::default(), TransmitPattern::Pattern11001100);
    assert_eq!(TransmitPattern::Pattern11001100 as u8, 2);
}

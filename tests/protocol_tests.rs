//! Command Protocol Tests
//!
//! Tests for command frame parsing, radio payload handling and replies.

use rf_test_firmware::protocol::{CommandFrame, FrameError, RadioCommand, RadioPayload, Response};
use rf_test_firmware::types::{FemConfig, FirmwareVersion, RfCommand, TxPower, UsbCommand};

// ============================================================================
// Frame Parsing Tests
// ============================================================================

#[test]
fn test_parse_full_frame() {
    let frame = CommandFrame::parse(Some(&[5, 80, 0xF8, 1, 0x03, 3, 11])).unwrap();

    assert_eq!(frame.usb_cmd, UsbCommand::SendPacket);
    assert_eq!(frame.radio.first_rf_channel, 5);
    assert_eq!(frame.radio.last_rf_channel, 80);
    assert_eq!(frame.radio.radio_power.as_dbm(), -8);
    assert_eq!(frame.radio.datarate, 1);
    assert!(frame.radio.fem_config.mode_high());
    assert!(frame.radio.fem_config.antenna_high());
    assert_eq!(frame.radio.rf_cmd, RfCommand::TxSweep);
}

#[test]
fn test_parse_missing_frame() {
    assert_eq!(CommandFrame::parse(None), Err(FrameError::Missing));
}

#[test]
fn test_parse_rejects_eight_bytes() {
    let data = [0u8; 8];
    assert_eq!(CommandFrame::parse(Some(&data)), Err(FrameError::TooLong(8)));
}

#[test]
fn test_parse_rejects_full_usb_packet() {
    let data = [1u8; 64];
    assert_eq!(CommandFrame::parse(Some(&data)), Err(FrameError::TooLong(64)));
}

#[test]
fn test_parse_short_frame_is_zero_filled() {
    let frame = CommandFrame::parse(Some(&[7, 9])).unwrap();
    assert_eq!(frame.radio.first_rf_channel, 7);
    assert_eq!(frame.radio.last_rf_channel, 9);
    assert_eq!(frame.radio.radio_power, TxPower::from_raw(0));
    assert_eq!(frame.usb_cmd, UsbCommand::Unknown(0));
}

#[test]
fn test_parse_empty_frame_is_unknown_command() {
    let frame = CommandFrame::parse(Some(&[])).unwrap();
    assert_eq!(frame.usb_cmd, UsbCommand::Unknown(0));
    assert_eq!(frame.radio, RadioCommand::default());
}

#[test]
fn test_unknown_rf_cmd_is_preserved() {
    let frame = CommandFrame::parse(Some(&[0, 0, 0, 0, 0, 0xC8, 11])).unwrap();
    assert_eq!(frame.radio.rf_cmd, RfCommand::Unknown(0xC8));
    assert_eq!(frame.radio_payload().as_bytes()[5], 0xC8);
}

// ============================================================================
// Radio Payload Tests
// ============================================================================

#[test]
fn test_radio_payload_strips_usb_cmd() {
    let frame = CommandFrame::decode(&[1, 2, 3, 4, 5, 6, 11]);
    assert_eq!(frame.radio_payload().as_bytes(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_payload_from_short_slice() {
    let payload = RadioPayload::from_slice(&[0xAA, 0xBB]);
    assert_eq!(payload.as_bytes(), &[0xAA, 0xBB, 0, 0, 0, 0]);
}

#[test]
fn test_payload_from_long_slice_truncates() {
    let payload = RadioPayload::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(payload.as_bytes(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_payload_debug_is_hex() {
    let payload = RadioPayload::new([0x10, 0x28, 0x02, 0x01, 0x00, 0x03]);
    assert_eq!(format!("{payload:?}"), "RadioPayload([10, 28, 02, 01, 00, 03])");
}

#[test]
fn test_radio_command_decode_offsets() {
    let cmd = RadioCommand::decode(&RadioPayload::new([0x10, 0x28, 0x02, 0x01, 0x02, 0x03]));

    assert_eq!(cmd.first_rf_channel, 16);
    assert_eq!(cmd.last_rf_channel, 40);
    assert_eq!(cmd.radio_power.raw(), 2);
    assert_eq!(cmd.datarate, 1);
    assert_eq!(cmd.fem_config, FemConfig::new(false, true));
    assert_eq!(cmd.rf_cmd, RfCommand::TxSweep);
}

#[test]
fn test_builder_encodes_expected_bytes() {
    let cmd = RadioCommand::default()
        .with_channels(2, 80)
        .with_power(TxPower::from_dbm(-4))
        .with_datarate(1)
        .with_fem(FemConfig::new(true, false))
        .with_mode(RfCommand::RxSweep);

    assert_eq!(cmd.encode().as_bytes(), &[2, 80, 0xFC, 1, 0x01, 4]);
}

// ============================================================================
// Host Frame Construction Tests
// ============================================================================

#[test]
fn test_send_packet_frame() {
    let radio = RadioCommand::default()
        .with_channels(40, 40)
        .with_mode(RfCommand::UnmodulatedTx);
    let bytes = CommandFrame::send_packet(radio).encode();

    assert_eq!(bytes, [40, 40, 0, 0, 0, 1, 11]);
}

#[test]
fn test_version_query_frame() {
    assert_eq!(CommandFrame::version_query().encode(), [0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn test_status_query_frame() {
    assert_eq!(CommandFrame::status_query().encode(), [0, 0, 0, 0, 0, 0, 12]);
}

#[test]
fn test_host_frame_parses_back() {
    let radio = RadioCommand::default()
        .with_channels(0, 39)
        .with_mode(RfCommand::Rx);
    let bytes = CommandFrame::send_packet(radio).encode();
    let frame = CommandFrame::parse(Some(&bytes)).unwrap();

    assert_eq!(frame.usb_cmd, UsbCommand::SendPacket);
    assert_eq!(frame.radio, radio);
}

// ============================================================================
// Response Tests
// ============================================================================

#[test]
fn test_version_reply_is_big_endian() {
    let reply = Response::FirmwareVersion(FirmwareVersion::new(1, 0, 0)).encode();
    assert_eq!(reply.as_slice(), &[0x00, 0x01, 0x00, 0x00]);
}

#[test]
fn test_version_reply_decodes_on_host() {
    let reply = Response::FirmwareVersion(FirmwareVersion::new(2, 5, 9)).encode();
    let version = FirmwareVersion::from_reply(&reply).unwrap();
    assert_eq!(version.to_string(), "2.5.9");
}

#[test]
fn test_short_version_reply() {
    assert_eq!(FirmwareVersion::from_reply(&[0, 1]), None);
}

#[test]
fn test_status_reply_is_one_byte() {
    assert_eq!(Response::Status(true).encode().as_slice(), &[1]);
    assert_eq!(Response::Status(false).encode().as_slice(), &[0]);
}

#[test]
fn test_status_reply_decode() {
    assert_eq!(Response::decode_status(&[1]), Some(true));
    assert_eq!(Response::decode_status(&[0]), Some(false));
    assert_eq!(Response::decode_status(&[]), None);
}

#[test]
fn test_frame_error_display() {
    assert_eq!(FrameError::Missing.to_string(), "no frame data");
    assert_eq!(FrameError::TooLong(8).to_string(), "frame of 8 bytes exceeds 7");
}

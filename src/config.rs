//! System configuration and hardware constants
//!
//! This module defines compile-time constants shared by the dongle and DUT
//! images. Protocol sizes, USB identity, radio-link addressing and timing
//! parameters are centralized here.

use crate::types::FirmwareVersion;

/// Dongle firmware version reported to the host (raw `0x010000`)
pub const FIRMWARE_VERSION: FirmwareVersion = FirmwareVersion::from_raw(0x0001_0000);

/// Size of a host command frame on the USB vendor interface
pub const COMMAND_FRAME_LEN: usize = 7;

/// Size of the application payload carried over the radio link
pub const RADIO_PAYLOAD_LEN: usize = 6;

/// Radio-link channel used by both images for the command handshake
pub const RADIO_CHANNEL: u8 = 40;

/// DUT poll tick while waiting for a command
pub const DUT_POLL_INTERVAL_MS: u32 = 100;

/// Per-step dwell time for channel sweeps
pub const SWEEP_STEP_DELAY_MS: u32 = 10;

/// Sentinel for an unassigned FEM pin
pub const UNUSED_PIN: u8 = 0xFF;

/// Value of an erased (never programmed) user configuration word
pub const ERASED_WORD: u32 = 0xFFFF_FFFF;

/// USB VID (Nordic Semiconductor)
pub const USB_VID: u16 = 0x1915;

/// USB PID expected by the host tooling
pub const USB_PID: u16 = 0x0103;

/// Bulk endpoint max packet size
pub const USB_BULK_PACKET_SIZE: u16 = 64;

/// Bulk OUT endpoint carrying host command frames
pub const USB_COMMAND_EP_ADDR: u8 = 0x01;

/// Bulk IN endpoint left over from the loopback layout (unused)
pub const USB_LOOPBACK_EP_ADDR: u8 = 0x81;

/// Bulk IN endpoint carrying replies to the host
pub const USB_REPLY_EP_ADDR: u8 = 0x82;

/// Radio-link addressing
pub mod link {
    //! Pipe addresses shared by the dongle (PTX) and DUT (PRX).
    //! Arbitrary defaults; every dongle/DUT pair uses the same set.

    /// Base address for pipe 0
    pub const BASE_ADDR_0: [u8; 4] = [0x33, 0x44, 0xBB, 0x01];

    /// Base address for pipes 1-7
    pub const BASE_ADDR_1: [u8; 4] = [0xDE, 0xF0, 0x12, 0x23];

    /// Address prefixes for pipes 0-7
    pub const ADDR_PREFIXES: [u8; 8] = [0x22, 0xBC, 0x66, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8];
}

/// User configuration region layout
pub mod uicr {
    //! Word indices into the customer/OTP region.

    /// HFXO load capacitance word
    pub const LOAD_CAP_WORD: usize = 0;

    /// FEM pins: power-down, tx-enable, rx-enable, mode (one byte each, LSB first)
    pub const FEM_WORD_A: usize = 1;

    /// FEM pins: antenna-select in the low byte
    pub const FEM_WORD_B: usize = 2;
}

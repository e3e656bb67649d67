//! Shared types used across the RF test firmware
//!
//! This module defines the command codes and small value types that both
//! firmware images and the host tooling agree on. Unknown command codes are
//! preserved rather than rejected so that frames re-encode byte for byte.

use core::fmt;

/// Radio test mode requested by the host (`rf_cmd` field)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RfCommand {
    /// Modulated carrier transmit
    #[default]
    ModulatedTx,
    /// Unmodulated (continuous wave) carrier transmit
    UnmodulatedTx,
    /// Receive on a single channel
    Rx,
    /// Unmodulated transmit sweeping a channel range
    TxSweep,
    /// Receive sweeping a channel range
    RxSweep,
    /// Range test (reserved, not implemented by the DUT)
    RangeTest,
    /// Code outside the known set
    Unknown(u8),
}

impl RfCommand {
    /// Wire code for this command
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::ModulatedTx => 0,
            Self::UnmodulatedTx => 1,
            Self::Rx => 2,
            Self::TxSweep => 3,
            Self::RxSweep => 4,
            Self::RangeTest => 5,
            Self::Unknown(code) => code,
        }
    }

    /// Decode a wire code
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::ModulatedTx,
            1 => Self::UnmodulatedTx,
            2 => Self::Rx,
            3 => Self::TxSweep,
            4 => Self::RxSweep,
            5 => Self::RangeTest,
            other => Self::Unknown(other),
        }
    }

    /// Whether this mode drives the transmitter
    #[must_use]
    pub const fn is_transmitting(self) -> bool {
        matches!(self, Self::ModulatedTx | Self::UnmodulatedTx | Self::TxSweep)
    }
}

impl From<u8> for RfCommand {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl From<RfCommand> for u8 {
    fn from(cmd: RfCommand) -> Self {
        cmd.code()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RfCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ModulatedTx => defmt::write!(f, "MOD_TX"),
            Self::UnmodulatedTx => defmt::write!(f, "UNMOD_TX"),
            Self::Rx => defmt::write!(f, "RX"),
            Self::TxSweep => defmt::write!(f, "TX_SWEEP"),
            Self::RxSweep => defmt::write!(f, "RX_SWEEP"),
            Self::RangeTest => defmt::write!(f, "RANGE"),
            Self::Unknown(code) => defmt::write!(f, "RF?({})", code),
        }
    }
}

/// Dongle sub-command selector (`usb_cmd` field, never sent over the radio)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UsbCommand {
    /// Report the dongle firmware version
    FirmwareVersion,
    /// Radio initialization request (no action on current dongles)
    InitRf,
    /// Forward the radio part of the frame to the DUT
    SendPacket,
    /// Report whether the last forwarded frame was acknowledged
    StatusPacket,
    /// Code outside the known set
    Unknown(u8),
}

impl UsbCommand {
    /// Wire code for this command
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::FirmwareVersion => 1,
            Self::InitRf => 10,
            Self::SendPacket => 11,
            Self::StatusPacket => 12,
            Self::Unknown(code) => code,
        }
    }

    /// Decode a wire code
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::FirmwareVersion,
            10 => Self::InitRf,
            11 => Self::SendPacket,
            12 => Self::StatusPacket,
            other => Self::Unknown(other),
        }
    }
}

impl From<u8> for UsbCommand {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl From<UsbCommand> for u8 {
    fn from(cmd: UsbCommand) -> Self {
        cmd.code()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for UsbCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::FirmwareVersion => defmt::write!(f, "FIRMWARE_VERSION"),
            Self::InitRf => defmt::write!(f, "INIT_RF"),
            Self::SendPacket => defmt::write!(f, "SEND_PACKET"),
            Self::StatusPacket => defmt::write!(f, "STATUS_PACKET"),
            Self::Unknown(code) => defmt::write!(f, "USB?({})", code),
        }
    }
}

/// FEM control bitfield (`fem_config` field)
///
/// Bit 0 is the FEM mode pin level, bit 1 the antenna-select pin level.
/// The remaining bits are carried untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FemConfig(u8);

impl FemConfig {
    const MODE_BIT: u8 = 0x01;
    const ANTENNA_BIT: u8 = 0x02;

    /// Wrap a raw bitfield
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Build from the two pin levels
    #[must_use]
    pub const fn new(mode_high: bool, antenna_high: bool) -> Self {
        let mut bits = 0;
        if mode_high {
            bits |= Self::MODE_BIT;
        }
        if antenna_high {
            bits |= Self::ANTENNA_BIT;
        }
        Self(bits)
    }

    /// Raw bitfield
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Requested level of the FEM mode pin
    #[must_use]
    pub const fn mode_high(self) -> bool {
        self.0 & Self::MODE_BIT != 0
    }

    /// Requested level of the antenna-select pin
    #[must_use]
    pub const fn antenna_high(self) -> bool {
        self.0 & Self::ANTENNA_BIT != 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FemConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FEM(mode={}, ant={})", self.mode_high(), self.antenna_high());
    }
}

/// Transmit power selector as sent on the wire
///
/// The test engine interprets the byte; negative dBm settings travel as
/// their two's-complement encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TxPower(u8);

impl TxPower {
    /// Encode a signed dBm setting
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_dbm(dbm: i8) -> Self {
        Self(dbm as u8)
    }

    /// Wrap a raw selector byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw selector byte
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Selector interpreted as signed dBm
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_dbm(self) -> i8 {
        self.0 as i8
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TxPower {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} dBm", self.as_dbm());
    }
}

/// Bit pattern used by modulated transmit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TransmitPattern {
    /// Pseudo-random payload
    Random = 0,
    /// `11110000` repeated
    Pattern11110000 = 1,
    /// `11001100` repeated
    #[default]
    Pattern11001100 = 2,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TransmitPattern {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Random => defmt::write!(f, "random"),
            Self::Pattern11110000 => defmt::write!(f, "11110000"),
            Self::Pattern11001100 => defmt::write!(f, "11001100"),
        }
    }
}

/// Firmware version as `major.minor.patch`
///
/// Packed into a 32-bit word as `0x00MMmmpp` and sent big-endian, so the
/// host reads the components from bytes 1..=3 of the reply.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirmwareVersion {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Patch version
    pub patch: u8,
}

impl FirmwareVersion {
    /// Create from components
    #[must_use]
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Unpack from a `0x00MMmmpp` word
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        let [_, major, minor, patch] = raw.to_be_bytes();
        Self::new(major, minor, patch)
    }

    /// Pack into a `0x00MMmmpp` word
    #[must_use]
    pub const fn raw(self) -> u32 {
        u32::from_be_bytes([0, self.major, self.minor, self.patch])
    }

    /// Big-endian wire encoding
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.raw().to_be_bytes()
    }

    /// Decode a version reply read from the dongle
    #[must_use]
    pub fn from_reply(reply: &[u8]) -> Option<Self> {
        match reply {
            [_, major, minor, patch, ..] => Some(Self::new(*major, *minor, *patch)),
            _ => None,
        }
    }
}

impl fmt::Debug for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FirmwareVersion({self})")
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FirmwareVersion {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}.{}.{}", self.major, self.minor, self.patch);
    }
}

//! Command Protocol
//!
//! Encoding and decoding of the host command frame and of the radio
//! payload derived from it.
//!
//! # Wire layout
//!
//! ```text
//! offset  field             USB frame  radio payload
//!   0     first_rf_channel      x           x
//!   1     last_rf_channel       x           x
//!   2     radio_power           x           x
//!   3     datarate              x           x
//!   4     fem_config            x           x
//!   5     rf_cmd                x           x
//!   6     usb_cmd               x           -
//! ```
//!
//! Frames are decoded field by field from byte slices; no layout of the
//! in-memory structs is relied upon.

use core::fmt;

use heapless::Vec;

use crate::config::{COMMAND_FRAME_LEN, RADIO_PAYLOAD_LEN};
use crate::types::{FemConfig, FirmwareVersion, RfCommand, TxPower, UsbCommand};

mod offset {
    pub const FIRST_RF_CHANNEL: usize = 0;
    pub const LAST_RF_CHANNEL: usize = 1;
    pub const RADIO_POWER: usize = 2;
    pub const DATARATE: usize = 3;
    pub const FEM_CONFIG: usize = 4;
    pub const RF_CMD: usize = 5;
    pub const USB_CMD: usize = 6;
}

/// Reasons an inbound USB frame is dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// No data was delivered with the notification
    Missing,
    /// Frame is longer than a command frame
    TooLong(usize),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no frame data"),
            Self::TooLong(len) => {
                write!(f, "frame of {len} bytes exceeds {COMMAND_FRAME_LEN}")
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrameError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Missing => defmt::write!(f, "no frame data"),
            Self::TooLong(len) => defmt::write!(f, "frame too long ({} bytes)", len),
        }
    }
}

/// Fixed-size application payload carried over the radio link
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct RadioPayload([u8; RADIO_PAYLOAD_LEN]);

impl RadioPayload {
    /// Wrap a full payload
    #[must_use]
    pub const fn new(bytes: [u8; RADIO_PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }

    /// Copy from a received buffer, zero-filling short data and ignoring
    /// anything past the payload length
    #[must_use]
    pub fn from_slice(data: &[u8]) -> Self {
        let mut bytes = [0u8; RADIO_PAYLOAD_LEN];
        let len = data.len().min(RADIO_PAYLOAD_LEN);
        bytes[..len].copy_from_slice(&data[..len]);
        Self(bytes)
    }

    /// Payload bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RADIO_PAYLOAD_LEN] {
        &self.0
    }
}

impl fmt::Debug for RadioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RadioPayload({:02x?})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioPayload {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RadioPayload({=[u8]:x})", self.0);
    }
}

/// Radio-side command: the frame without its USB selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RadioCommand {
    /// Start channel (single-channel modes and sweep start)
    pub first_rf_channel: u8,
    /// Sweep end channel
    pub last_rf_channel: u8,
    /// Transmit power selector
    pub radio_power: TxPower,
    /// PHY rate/mode selector
    pub datarate: u8,
    /// FEM pin levels
    pub fem_config: FemConfig,
    /// Requested test mode
    pub rf_cmd: RfCommand,
}

impl RadioCommand {
    /// Decode a radio payload
    #[must_use]
    pub const fn decode(payload: &RadioPayload) -> Self {
        let b = &payload.0;
        Self {
            first_rf_channel: b[offset::FIRST_RF_CHANNEL],
            last_rf_channel: b[offset::LAST_RF_CHANNEL],
            radio_power: TxPower::from_raw(b[offset::RADIO_POWER]),
            datarate: b[offset::DATARATE],
            fem_config: FemConfig::from_bits(b[offset::FEM_CONFIG]),
            rf_cmd: RfCommand::from_code(b[offset::RF_CMD]),
        }
    }

    /// Encode as a radio payload
    #[must_use]
    pub const fn encode(&self) -> RadioPayload {
        let mut b = [0u8; RADIO_PAYLOAD_LEN];
        b[offset::FIRST_RF_CHANNEL] = self.first_rf_channel;
        b[offset::LAST_RF_CHANNEL] = self.last_rf_channel;
        b[offset::RADIO_POWER] = self.radio_power.raw();
        b[offset::DATARATE] = self.datarate;
        b[offset::FEM_CONFIG] = self.fem_config.bits();
        b[offset::RF_CMD] = self.rf_cmd.code();
        RadioPayload(b)
    }

    /// Set the channel range
    #[must_use]
    pub const fn with_channels(self, first: u8, last: u8) -> Self {
        Self {
            first_rf_channel: first,
            last_rf_channel: last,
            ..self
        }
    }

    /// Set the transmit power
    #[must_use]
    pub const fn with_power(self, power: TxPower) -> Self {
        Self {
            radio_power: power,
            ..self
        }
    }

    /// Set the PHY rate/mode selector
    #[must_use]
    pub const fn with_datarate(self, datarate: u8) -> Self {
        Self { datarate, ..self }
    }

    /// Set the FEM pin levels
    #[must_use]
    pub const fn with_fem(self, fem_config: FemConfig) -> Self {
        Self { fem_config, ..self }
    }

    /// Set the test mode
    #[must_use]
    pub const fn with_mode(self, rf_cmd: RfCommand) -> Self {
        Self { rf_cmd, ..self }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioCommand {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{} ch {}..{} pwr {} rate {} {}",
            self.rf_cmd,
            self.first_rf_channel,
            self.last_rf_channel,
            self.radio_power.raw(),
            self.datarate,
            self.fem_config
        );
    }
}

/// Host command frame as received on the USB vendor interface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandFrame {
    /// Fields forwarded to the DUT
    pub radio: RadioCommand,
    /// Dongle sub-command
    pub usb_cmd: UsbCommand,
}

impl CommandFrame {
    /// Validate and decode an inbound USB frame
    ///
    /// Frames shorter than [`COMMAND_FRAME_LEN`] are zero-filled.
    ///
    /// # Errors
    ///
    /// [`FrameError::Missing`] when no data was delivered,
    /// [`FrameError::TooLong`] when the frame exceeds [`COMMAND_FRAME_LEN`].
    pub fn parse(frame: Option<&[u8]>) -> Result<Self, FrameError> {
        let data = frame.ok_or(FrameError::Missing)?;
        if data.len() > COMMAND_FRAME_LEN {
            return Err(FrameError::TooLong(data.len()));
        }

        let mut bytes = [0u8; COMMAND_FRAME_LEN];
        bytes[..data.len()].copy_from_slice(data);

        Ok(Self::decode(&bytes))
    }

    /// Decode a complete frame
    #[must_use]
    pub fn decode(bytes: &[u8; COMMAND_FRAME_LEN]) -> Self {
        Self {
            radio: RadioCommand::decode(&RadioPayload::from_slice(&bytes[..RADIO_PAYLOAD_LEN])),
            usb_cmd: UsbCommand::from_code(bytes[offset::USB_CMD]),
        }
    }

    /// Encode for transmission by the host
    #[must_use]
    pub fn encode(&self) -> [u8; COMMAND_FRAME_LEN] {
        let mut bytes = [0u8; COMMAND_FRAME_LEN];
        bytes[..RADIO_PAYLOAD_LEN].copy_from_slice(self.radio.encode().as_bytes());
        bytes[offset::USB_CMD] = self.usb_cmd.code();
        bytes
    }

    /// Radio payload forwarded by `SEND_PACKET`
    #[must_use]
    pub const fn radio_payload(&self) -> RadioPayload {
        self.radio.encode()
    }

    /// Frame forwarding `radio` to the DUT
    #[must_use]
    pub const fn send_packet(radio: RadioCommand) -> Self {
        Self {
            radio,
            usb_cmd: UsbCommand::SendPacket,
        }
    }

    /// Firmware version query
    #[must_use]
    pub fn version_query() -> Self {
        Self::query(UsbCommand::FirmwareVersion)
    }

    /// Last-transmit status query
    #[must_use]
    pub fn status_query() -> Self {
        Self::query(UsbCommand::StatusPacket)
    }

    fn query(usb_cmd: UsbCommand) -> Self {
        Self {
            radio: RadioCommand::default(),
            usb_cmd,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CommandFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} [{}]", self.usb_cmd, self.radio);
    }
}

/// Reply written to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    /// Answer to `FIRMWARE_VERSION` (4 bytes, big-endian)
    FirmwareVersion(FirmwareVersion),
    /// Answer to `STATUS_PACKET` (1 byte)
    Status(bool),
}

impl Response {
    /// Longest reply on the wire
    pub const MAX_LEN: usize = 4;

    /// Wire encoding
    #[must_use]
    pub fn encode(&self) -> Vec<u8, { Self::MAX_LEN }> {
        let mut out = Vec::new();
        match self {
            Self::FirmwareVersion(version) => {
                let _ = out.extend_from_slice(&version.to_be_bytes());
            }
            Self::Status(acked) => {
                let _ = out.push(u8::from(*acked));
            }
        }
        out
    }

    /// Decode a status reply read by the host
    #[must_use]
    pub fn decode_status(reply: &[u8]) -> Option<bool> {
        reply.first().map(|&b| b != 0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Response {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::FirmwareVersion(v) => defmt::write!(f, "version {}", v),
            Self::Status(acked) => defmt::write!(f, "status {}", acked),
        }
    }
}

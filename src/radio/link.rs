//! Radio-Link Transport Interface
//!
//! The point-to-point link between dongle and DUT is a vendor transport.
//! This core only needs payload submission, receive control and channel
//! selection; framing, retransmission and acknowledgment stay inside the
//! transport.

use core::fmt;

use crate::config::{link, RADIO_CHANNEL};
use crate::protocol::RadioPayload;

/// Non-zero status code returned by the transport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkError(pub i32);

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link error {}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "link error {}", self.0);
    }
}

/// Which end of the link this device is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkRole {
    /// Primary transmitter (dongle)
    Ptx,
    /// Primary receiver (DUT)
    Prx,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkRole {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ptx => defmt::write!(f, "PTX"),
            Self::Prx => defmt::write!(f, "PRX"),
        }
    }
}

/// Over-the-air bitrate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bitrate {
    /// 1 Mbit/s
    Mbps1,
    /// 2 Mbit/s
    Mbps2,
}

/// Transport bring-up parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// Link role
    pub role: LinkRole,
    /// Over-the-air bitrate
    pub bitrate: Bitrate,
    /// Dynamic payload length framing
    pub dynamic_payload: bool,
    /// Let the transmitter request no-ack per packet
    pub selective_auto_ack: bool,
    /// Fast radio ramp-up
    pub fast_ramp_up: bool,
    /// Base address for pipe 0
    pub base_addr_0: [u8; 4],
    /// Base address for pipes 1-7
    pub base_addr_1: [u8; 4],
    /// Address prefixes for pipes 0-7
    pub prefixes: [u8; 8],
    /// Channel used for the command handshake
    pub channel: u8,
}

impl LinkConfig {
    const fn base(role: LinkRole) -> Self {
        Self {
            role,
            bitrate: Bitrate::Mbps2,
            dynamic_payload: true,
            selective_auto_ack: true,
            fast_ramp_up: false,
            base_addr_0: link::BASE_ADDR_0,
            base_addr_1: link::BASE_ADDR_1,
            prefixes: link::ADDR_PREFIXES,
            channel: RADIO_CHANNEL,
        }
    }

    /// Dongle side: transmitter
    #[must_use]
    pub const fn dongle() -> Self {
        Self::base(LinkRole::Ptx)
    }

    /// DUT side: receiver with fast ramp-up
    #[must_use]
    pub const fn dut() -> Self {
        Self {
            fast_ramp_up: true,
            ..Self::base(LinkRole::Prx)
        }
    }
}

/// Event delivered by the transport from its callback context
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// The last submitted payload was acknowledged by the peer
    TxSuccess,
    /// The last submitted payload was not acknowledged
    TxFailed,
    /// A payload arrived and was read out of the transport
    RxReceived(RadioPayload),
    /// A payload arrived but could not be read out
    RxFailed,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::TxSuccess => defmt::write!(f, "TX_SUCCESS"),
            Self::TxFailed => defmt::write!(f, "TX_FAILED"),
            Self::RxReceived(p) => defmt::write!(f, "RX_RECEIVED({})", p),
            Self::RxFailed => defmt::write!(f, "RX_FAILED"),
        }
    }
}

/// Radio-link transport
pub trait RadioLink {
    /// Bring up the transport
    ///
    /// # Errors
    ///
    /// Transport status code on failure.
    fn init(&mut self, config: &LinkConfig) -> Result<(), LinkError>;

    /// Select the RF channel
    ///
    /// # Errors
    ///
    /// Transport status code on failure.
    fn set_channel(&mut self, channel: u8) -> Result<(), LinkError>;

    /// Start listening for payloads
    ///
    /// # Errors
    ///
    /// Transport status code on failure.
    fn start_rx(&mut self) -> Result<(), LinkError>;

    /// Queue a payload for transmission
    ///
    /// # Errors
    ///
    /// Transport status code when the payload was not queued.
    fn write_payload(&mut self, payload: &RadioPayload) -> Result<(), LinkError>;

    /// Tear the transport down and release the radio
    fn disable(&mut self);
}

impl<L: RadioLink + ?Sized> RadioLink for &mut L {
    fn init(&mut self, config: &LinkConfig) -> Result<(), LinkError> {
        (**self).init(config)
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), LinkError> {
        (**self).set_channel(channel)
    }

    fn start_rx(&mut self) -> Result<(), LinkError> {
        (**self).start_rx()
    }

    fn write_payload(&mut self, payload: &RadioPayload) -> Result<(), LinkError> {
        (**self).write_payload(payload)
    }

    fn disable(&mut self) {
        (**self).disable();
    }
}

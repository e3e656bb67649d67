//! Radio Test Configuration Mapper
//!
//! Maps a decoded radio command onto the configuration handed to the radio
//! test engine. Pure and total: every `rf_cmd` value yields a configuration,
//! with reserved and unknown codes mapping to [`RadioTestConfig::NoOp`].
//!
//! Channel ordering and ranges are not checked here. Values go to the test
//! engine unchanged, and a sweep whose start is above its end is passed
//! through as-is.

use crate::config::SWEEP_STEP_DELAY_MS;
use crate::protocol::RadioCommand;
use crate::types::{RfCommand, TransmitPattern, TxPower};

/// Configuration for one radio test run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioTestConfig {
    /// Modulated carrier on one channel
    ModulatedTx {
        /// PHY rate/mode selector
        mode: u8,
        /// Transmit power selector
        txpower: TxPower,
        /// RF channel
        channel: u8,
        /// Payload bit pattern
        pattern: TransmitPattern,
    },
    /// Unmodulated carrier on one channel
    UnmodulatedTx {
        /// PHY rate/mode selector
        mode: u8,
        /// Transmit power selector
        txpower: TxPower,
        /// RF channel
        channel: u8,
    },
    /// Receive on one channel
    Rx {
        /// PHY rate/mode selector
        mode: u8,
        /// RF channel
        channel: u8,
    },
    /// Unmodulated carrier stepping through a channel range
    TxSweep {
        /// PHY rate/mode selector
        mode: u8,
        /// Transmit power selector
        txpower: TxPower,
        /// First channel
        channel_start: u8,
        /// Last channel
        channel_end: u8,
        /// Dwell time per channel
        delay_ms: u32,
    },
    /// Receive stepping through a channel range
    RxSweep {
        /// PHY rate/mode selector
        mode: u8,
        /// First channel
        channel_start: u8,
        /// Last channel
        channel_end: u8,
        /// Dwell time per channel
        delay_ms: u32,
    },
    /// Nothing to run (reserved or unknown command)
    NoOp,
}

impl RadioTestConfig {
    /// Whether the run keys the transmitter (drives the FEM TX path)
    #[must_use]
    pub const fn is_transmitting(&self) -> bool {
        matches!(
            self,
            Self::ModulatedTx { .. } | Self::UnmodulatedTx { .. } | Self::TxSweep { .. }
        )
    }

    /// Whether the run is inert
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ModulatedTx { .. } => "TX_MOD_CARRIER",
            Self::UnmodulatedTx { .. } => "TX_UNMOD_CARRIER",
            Self::Rx { .. } => "RX_MODE",
            Self::TxSweep { .. } => "TX_UNMOD_SWEEP",
            Self::RxSweep { .. } => "RX_MODE_SWEEP",
            Self::NoOp => "NO_OP",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioTestConfig {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ModulatedTx {
                mode,
                txpower,
                channel,
                pattern,
            } => defmt::write!(
                f,
                "ModulatedTx(mode {}, {}, ch {}, {})",
                mode,
                txpower,
                channel,
                pattern
            ),
            Self::UnmodulatedTx {
                mode,
                txpower,
                channel,
            } => defmt::write!(f, "UnmodulatedTx(mode {}, {}, ch {})", mode, txpower, channel),
            Self::Rx { mode, channel } => defmt::write!(f, "Rx(mode {}, ch {})", mode, channel),
            Self::TxSweep {
                mode,
                txpower,
                channel_start,
                channel_end,
                delay_ms,
            } => defmt::write!(
                f,
                "TxSweep(mode {}, {}, ch {}..{}, {} ms)",
                mode,
                txpower,
                channel_start,
                channel_end,
                delay_ms
            ),
            Self::RxSweep {
                mode,
                channel_start,
                channel_end,
                delay_ms,
            } => defmt::write!(
                f,
                "RxSweep(mode {}, ch {}..{}, {} ms)",
                mode,
                channel_start,
                channel_end,
                delay_ms
            ),
            Self::NoOp => defmt::write!(f, "NoOp"),
        }
    }
}

/// Map a radio command onto a test engine configuration
#[must_use]
pub const fn map_command(cmd: &RadioCommand) -> RadioTestConfig {
    let mode = cmd.datarate;
    match cmd.rf_cmd {
        RfCommand::ModulatedTx => RadioTestConfig::ModulatedTx {
            mode,
            txpower: cmd.radio_power,
            channel: cmd.first_rf_channel,
            pattern: TransmitPattern::Pattern11001100,
        },
        RfCommand::UnmodulatedTx => RadioTestConfig::UnmodulatedTx {
            mode,
            txpower: cmd.radio_power,
            channel: cmd.first_rf_channel,
        },
        RfCommand::Rx => RadioTestConfig::Rx {
            mode,
            channel: cmd.first_rf_channel,
        },
        RfCommand::TxSweep => RadioTestConfig::TxSweep {
            mode,
            txpower: cmd.radio_power,
            channel_start: cmd.first_rf_channel,
            channel_end: cmd.last_rf_channel,
            delay_ms: SWEEP_STEP_DELAY_MS,
        },
        RfCommand::RxSweep => RadioTestConfig::RxSweep {
            mode,
            channel_start: cmd.first_rf_channel,
            channel_end: cmd.last_rf_channel,
            delay_ms: SWEEP_STEP_DELAY_MS,
        },
        // Range test is reserved
        RfCommand::RangeTest | RfCommand::Unknown(_) => RadioTestConfig::NoOp,
    }
}

//! DUT Receive Loop and Mode State Machine
//!
//! ```text
//! Listening ──payload──▶ Decoding ──▶ Configuring ──▶ Running
//! ```
//!
//! The DUT listens on the command channel until one payload arrives,
//! decodes it, tears the radio link down, applies FEM levels and starts the
//! radio test engine. `Running` is terminal: the engine cannot be stopped
//! safely, so reconfiguring requires a hardware reset.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::DUT_POLL_INTERVAL_MS;
use crate::error::{InitError, LinkStage};
use crate::protocol::{RadioCommand, RadioPayload};
use crate::radio::engine::RadioTestEngine;
use crate::radio::fem::FemSequencer;
use crate::radio::link::{LinkConfig, LinkEvent, RadioLink};
use crate::radio::mapper::{map_command, RadioTestConfig};
use crate::sync::PayloadSlot;

/// Handshake state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DutState {
    /// Waiting for a command payload
    #[default]
    Listening,
    /// Interpreting the received payload
    Decoding,
    /// Applying FEM levels
    Configuring,
    /// Test engine started; left only by hardware reset
    Running,
}

#[cfg(feature = "embedded")]
impl defmt::Format for DutState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Listening => defmt::write!(f, "Listening"),
            Self::Decoding => defmt::write!(f, "Decoding"),
            Self::Configuring => defmt::write!(f, "Configuring"),
            Self::Running => defmt::write!(f, "Running"),
        }
    }
}

/// DUT controller owning the link, the test engine and the FEM lines
pub struct Dut<L, E, P> {
    link: L,
    engine: E,
    fem: Option<FemSequencer<P>>,
    state: DutState,
    active: Option<RadioTestConfig>,
}

impl<L, E, P> Dut<L, E, P>
where
    L: RadioLink,
    E: RadioTestEngine,
    P: OutputPin,
{
    /// Bring up the link as receiver on the command channel and start
    /// listening
    ///
    /// # Errors
    ///
    /// [`InitError`] naming the failing step; fatal for the DUT.
    pub fn start(
        mut link: L,
        engine: E,
        fem: Option<FemSequencer<P>>,
        config: &LinkConfig,
    ) -> Result<Self, InitError> {
        link.init(config)
            .map_err(|err| InitError::link(LinkStage::Init, err))?;
        info!("Initialization complete");

        link.set_channel(config.channel)
            .map_err(|err| InitError::link(LinkStage::Channel, err))?;
        info!("Setting up for packet reception on channel {}", config.channel);

        link.start_rx()
            .map_err(|err| InitError::link(LinkStage::Receive, err))?;

        Ok(Self {
            link,
            engine,
            fem,
            state: DutState::Listening,
            active: None,
        })
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> DutState {
        self.state
    }

    /// Configuration handed to the engine, once running
    #[must_use]
    pub const fn active_config(&self) -> Option<&RadioTestConfig> {
        self.active.as_ref()
    }

    /// FEM sequencer, when a FEM is fitted
    #[must_use]
    pub const fn fem(&self) -> Option<&FemSequencer<P>> {
        self.fem.as_ref()
    }

    /// One iteration of the poll loop
    ///
    /// Consumes a pending payload from `slot` and runs the handshake to
    /// completion. Once `Running`, further payloads are left in the slot.
    pub fn poll(&mut self, slot: &PayloadSlot) -> DutState {
        if self.state != DutState::Listening {
            return self.state;
        }

        if let Some(payload) = slot.take() {
            self.transition(DutState::Decoding);
            let cmd = self.decode(&payload);
            let config = map_command(&cmd);
            if config.is_noop() {
                info!("Unsupported command {}, starting idle", cmd.rf_cmd.code());
            } else {
                info!("RADIO_TEST_MODE_{}", config.name());
            }

            self.transition(DutState::Configuring);
            if let Some(fem) = self.fem.as_mut() {
                fem.apply(cmd.fem_config, config.is_transmitting());
            }

            self.launch(config);
            self.transition(DutState::Running);
        }

        self.state
    }

    /// Poll until a command has been applied, ticking every
    /// [`DUT_POLL_INTERVAL_MS`]
    ///
    /// Returns the configuration the engine was started with.
    pub async fn run<D: DelayNs>(&mut self, slot: &PayloadSlot, delay: &mut D) -> RadioTestConfig {
        loop {
            if self.poll(slot) == DutState::Running {
                if let Some(config) = self.active {
                    return config;
                }
            }
            delay.delay_ms(DUT_POLL_INTERVAL_MS).await;
        }
    }

    fn transition(&mut self, next: DutState) {
        debug!("DUT {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn decode(&mut self, payload: &RadioPayload) -> RadioCommand {
        let cmd = RadioCommand::decode(payload);

        debug!("first_rf_channel: {}", cmd.first_rf_channel);
        debug!("last_rf_channel: {}", cmd.last_rf_channel);
        debug!("radio_power: {}", cmd.radio_power.raw());
        debug!("datarate: {}", cmd.datarate);
        debug!("fem_config: {}", cmd.fem_config.bits());
        debug!("rf_cmd: {}", cmd.rf_cmd.code());

        // The radio link and the test engine cannot share the radio
        self.link.disable();

        cmd
    }

    fn launch(&mut self, config: RadioTestConfig) {
        self.engine.init(&config);
        // Needs a physical reset to stop or retest
        self.engine.start(&config);
        self.active = Some(config);
    }
}

/// Radio-link event handler for the DUT (callback context)
pub fn handle_link_event(event: LinkEvent, slot: &PayloadSlot) {
    match event {
        LinkEvent::RxReceived(payload) => slot.store(payload),
        LinkEvent::RxFailed => error!("Error while reading rx packet"),
        LinkEvent::TxSuccess => debug!("TX SUCCESS EVENT"),
        LinkEvent::TxFailed => debug!("TX FAILED EVENT"),
    }
}

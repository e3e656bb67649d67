//! Dongle Command Dispatcher
//!
//! Validates frames arriving on the USB vendor interface and routes them:
//! version query, forward to the DUT over the radio link, or status query.
//! The transmit-outcome flag is raised by the radio-link callback and
//! consumed by the status query.

use crate::config::FIRMWARE_VERSION;
use crate::error::{InitError, LinkStage};
use crate::protocol::{CommandFrame, FrameError, Response};
use crate::radio::link::{LinkConfig, LinkError, LinkEvent, RadioLink};
use crate::sync::EventFlag;
use crate::types::UsbCommand;

/// What the dispatcher did with a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Frame rejected; nothing is sent back
    Dropped(FrameError),
    /// Reply to write on the IN endpoint
    Reply(Response),
    /// Radio payload queued on the link
    Forwarded,
    /// Radio payload not queued; nothing is sent back
    ForwardFailed(LinkError),
    /// Command needs no action on the dongle
    Ignored(UsbCommand),
}

impl Dispatch {
    /// Reply owed to the host, if any
    #[must_use]
    pub const fn reply(&self) -> Option<&Response> {
        match self {
            Self::Reply(response) => Some(response),
            _ => None,
        }
    }
}

/// Routes host frames
pub struct Dispatcher<'a, L> {
    link: L,
    tx_acked: &'a EventFlag,
}

impl<'a, L: RadioLink> Dispatcher<'a, L> {
    /// Create a dispatcher over a started link
    ///
    /// `tx_acked` is the flag raised by [`handle_link_event`].
    pub const fn new(link: L, tx_acked: &'a EventFlag) -> Self {
        Self { link, tx_acked }
    }

    /// Handle one inbound USB frame
    pub fn dispatch(&mut self, frame: Option<&[u8]>) -> Dispatch {
        let frame = match CommandFrame::parse(frame) {
            Ok(frame) => frame,
            Err(err) => {
                error!("Dropping USB frame: {:?}", err);
                return Dispatch::Dropped(err);
            }
        };

        debug!("USB command {:?}", frame.usb_cmd);

        match frame.usb_cmd {
            UsbCommand::FirmwareVersion => {
                info!("FIRMWARE_VERSION: {:?}", FIRMWARE_VERSION);
                Dispatch::Reply(Response::FirmwareVersion(FIRMWARE_VERSION))
            }
            UsbCommand::SendPacket => self.forward(&frame),
            UsbCommand::StatusPacket => {
                let acked = self.tx_acked.take();
                debug!("STATUS_PACKET: acked={}", acked);
                Dispatch::Reply(Response::Status(acked))
            }
            // Radio test commands are executed by the DUT, not locally
            other @ (UsbCommand::InitRf | UsbCommand::Unknown(_)) => Dispatch::Ignored(other),
        }
    }

    fn forward(&mut self, frame: &CommandFrame) -> Dispatch {
        let payload = frame.radio_payload();
        debug!("rf_payload: {:?}", payload);

        match self.link.write_payload(&payload) {
            Ok(()) => Dispatch::Forwarded,
            Err(err) => {
                error!("Failed to send payload: {:?}", err);
                Dispatch::ForwardFailed(err)
            }
        }
    }

    /// Underlying link
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}

/// Bring up the radio link as transmitter on the command channel
///
/// # Errors
///
/// [`InitError`] naming the failing step; fatal for the dongle.
pub fn start_link<L: RadioLink>(link: &mut L, config: &LinkConfig) -> Result<(), InitError> {
    link.init(config)
        .map_err(|err| InitError::link(LinkStage::Init, err))?;
    link.set_channel(config.channel)
        .map_err(|err| InitError::link(LinkStage::Channel, err))?;
    info!("Radio link up on channel {}", config.channel);
    Ok(())
}

/// Radio-link event handler for the dongle (callback context)
pub fn handle_link_event(event: LinkEvent, tx_acked: &EventFlag) {
    match event {
        LinkEvent::TxSuccess => {
            tx_acked.set();
            debug!("TX SUCCESS EVENT");
        }
        LinkEvent::TxFailed => debug!("TX FAILED EVENT"),
        LinkEvent::RxReceived(payload) => info!("Packet received: {:?}", payload),
        LinkEvent::RxFailed => error!("Error while reading rx packet"),
    }
}

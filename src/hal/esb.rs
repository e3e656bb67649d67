//! Enhanced ShockBurst Transport
//!
//! FFI bindings to the vendor ESB library and a [`RadioLink`]
//! implementation on top of it. The library reports events from the radio
//! interrupt through a C callback; the trampoline here reads received
//! payloads out of the library and forwards typed [`LinkEvent`]s to the
//! handler registered with [`Esb::new`].

#![allow(unsafe_code)]

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::RADIO_PAYLOAD_LEN;
use crate::protocol::RadioPayload;
use crate::radio::link::{Bitrate, LinkConfig, LinkError, LinkEvent, LinkRole, RadioLink};

/// Maximum payload length the library was built with
pub const ESB_MAX_PAYLOAD_LENGTH: usize = 32;

mod ffi {
    use super::ESB_MAX_PAYLOAD_LENGTH;

    pub const PROTOCOL_ESB_DPL: u32 = 1;
    pub const MODE_PTX: u32 = 0;
    pub const MODE_PRX: u32 = 1;
    pub const BITRATE_1MBPS: u32 = 0;
    pub const BITRATE_2MBPS: u32 = 1;
    pub const CRC_16BIT: u32 = 2;
    pub const TX_POWER_0DBM: u32 = 0;
    pub const TXMODE_AUTO: u32 = 0;

    pub const EVENT_TX_SUCCESS: u32 = 0;
    pub const EVENT_TX_FAILED: u32 = 1;
    pub const EVENT_RX_RECEIVED: u32 = 2;

    #[repr(C)]
    pub struct EsbEvt {
        pub evt_id: u32,
        pub tx_attempts: u32,
    }

    pub type EventHandler = extern "C" fn(event: *const EsbEvt);

    #[repr(C)]
    pub struct EsbConfig {
        pub protocol: u32,
        pub mode: u32,
        pub event_handler: Option<EventHandler>,
        pub bitrate: u32,
        pub crc: u32,
        pub tx_output_power: u32,
        pub retransmit_delay: u16,
        pub retransmit_count: u16,
        pub tx_mode: u32,
        pub payload_length: u8,
        pub selective_auto_ack: bool,
        pub use_fast_ramp_up: bool,
    }

    #[repr(C)]
    pub struct EsbPayload {
        pub length: u8,
        pub pipe: u8,
        pub rssi: i8,
        pub noack: u8,
        pub pid: u8,
        pub data: [u8; ESB_MAX_PAYLOAD_LENGTH],
    }

    impl EsbPayload {
        pub const fn zeroed() -> Self {
            Self {
                length: 0,
                pipe: 0,
                rssi: 0,
                noack: 0,
                pid: 0,
                data: [0; ESB_MAX_PAYLOAD_LENGTH],
            }
        }
    }

    extern "C" {
        pub fn esb_init(config: *const EsbConfig) -> i32;
        pub fn esb_set_base_address_0(addr: *const u8) -> i32;
        pub fn esb_set_base_address_1(addr: *const u8) -> i32;
        pub fn esb_set_prefixes(prefixes: *const u8, num_pipes: u8) -> i32;
        pub fn esb_set_rf_channel(channel: u32) -> i32;
        pub fn esb_start_rx() -> i32;
        pub fn esb_write_payload(payload: *const EsbPayload) -> i32;
        pub fn esb_read_rx_payload(payload: *mut EsbPayload) -> i32;
        pub fn esb_disable();
    }
}

static EVENT_HANDLER: Mutex<CriticalSectionRawMutex, Cell<Option<fn(LinkEvent)>>> =
    Mutex::new(Cell::new(None));

fn check(code: i32) -> Result<(), LinkError> {
    if code == 0 {
        Ok(())
    } else {
        Err(LinkError(code))
    }
}

extern "C" fn on_esb_event(event: *const ffi::EsbEvt) {
    // SAFETY: the library passes a valid event for the duration of the call
    let Some(event) = (unsafe { event.as_ref() }) else {
        return;
    };

    let event = match event.evt_id {
        ffi::EVENT_TX_SUCCESS => LinkEvent::TxSuccess,
        ffi::EVENT_TX_FAILED => LinkEvent::TxFailed,
        ffi::EVENT_RX_RECEIVED => read_rx_payload(),
        other => {
            trace!("Unhandled ESB event {}", other);
            return;
        }
    };

    if let Some(handler) = EVENT_HANDLER.lock(Cell::get) {
        handler(event);
    }
}

fn read_rx_payload() -> LinkEvent {
    let mut raw = ffi::EsbPayload::zeroed();
    // SAFETY: `raw` is a valid, writable payload buffer
    if unsafe { ffi::esb_read_rx_payload(&mut raw) } != 0 {
        return LinkEvent::RxFailed;
    }

    let len = usize::from(raw.length).min(ESB_MAX_PAYLOAD_LENGTH);
    LinkEvent::RxReceived(RadioPayload::from_slice(&raw.data[..len]))
}

/// ESB radio link
pub struct Esb {
    _private: (),
}

impl Esb {
    /// Take the ESB transport, routing its events to `on_event`
    ///
    /// `on_event` runs in interrupt context.
    #[must_use]
    pub fn new(on_event: fn(LinkEvent)) -> Self {
        EVENT_HANDLER.lock(|handler| handler.set(Some(on_event)));
        Self { _private: () }
    }
}

impl RadioLink for Esb {
    fn init(&mut self, config: &LinkConfig) -> Result<(), LinkError> {
        let raw = ffi::EsbConfig {
            protocol: ffi::PROTOCOL_ESB_DPL,
            mode: match config.role {
                LinkRole::Ptx => ffi::MODE_PTX,
                LinkRole::Prx => ffi::MODE_PRX,
            },
            event_handler: Some(on_esb_event),
            bitrate: match config.bitrate {
                Bitrate::Mbps1 => ffi::BITRATE_1MBPS,
                Bitrate::Mbps2 => ffi::BITRATE_2MBPS,
            },
            crc: ffi::CRC_16BIT,
            tx_output_power: ffi::TX_POWER_0DBM,
            retransmit_delay: 600,
            retransmit_count: 3,
            tx_mode: ffi::TXMODE_AUTO,
            payload_length: ESB_MAX_PAYLOAD_LENGTH as u8,
            selective_auto_ack: config.selective_auto_ack,
            use_fast_ramp_up: config.fast_ramp_up,
        };

        // SAFETY: all pointers reference live, correctly sized buffers; the
        // library copies addresses and configuration before returning.
        unsafe {
            check(ffi::esb_init(&raw))?;
            check(ffi::esb_set_base_address_0(config.base_addr_0.as_ptr()))?;
            check(ffi::esb_set_base_address_1(config.base_addr_1.as_ptr()))?;
            check(ffi::esb_set_prefixes(
                config.prefixes.as_ptr(),
                config.prefixes.len() as u8,
            ))?;
        }

        debug!("ESB up as {:?}", config.role);
        Ok(())
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), LinkError> {
        // SAFETY: plain value call
        check(unsafe { ffi::esb_set_rf_channel(u32::from(channel)) })
    }

    fn start_rx(&mut self) -> Result<(), LinkError> {
        // SAFETY: plain call, the transport is initialized
        check(unsafe { ffi::esb_start_rx() })
    }

    fn write_payload(&mut self, payload: &RadioPayload) -> Result<(), LinkError> {
        let mut raw = ffi::EsbPayload::zeroed();
        raw.length = RADIO_PAYLOAD_LEN as u8;
        raw.data[..RADIO_PAYLOAD_LEN].copy_from_slice(payload.as_bytes());

        // SAFETY: the library copies the payload into its TX FIFO
        check(unsafe { ffi::esb_write_payload(&raw) })
    }

    fn disable(&mut self) {
        // SAFETY: plain call, valid in any transport state
        unsafe { ffi::esb_disable() };
    }
}

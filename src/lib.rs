//! RF Test Firmware Library
//!
//! Core logic for a two-board radio test rig built on nRF52840 parts: a USB
//! dongle that accepts 7-byte command frames from a host tool and relays
//! them over a proprietary 2.4 GHz link, and a device under test (DUT) that
//! receives one command, configures its front-end module and starts a
//! continuous radio test (carrier, modulated TX, RX, channel sweeps).
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │   Dongle Dispatcher       │       DUT State Machine          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RADIO TEST LOGIC                          │
//! │  Command Frame  │  Config Mapper  │  FEM Sequencer           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / BINDING LAYER                        │
//! │  USB vendor class  │  Radio link  │  Test engine  │  GPIO    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Hardware behind traits**: the radio link, the test engine and GPIO
//!   lines are reached through traits so all decisions run on the host
//! - **No unsafe in application code**: all unsafe isolated in `hal`
//! - **Functional core, imperative shell**: decoding and mapping are pure
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_nrf;
#[cfg(feature = "embedded")]
pub use embassy_time;
#[cfg(feature = "embedded")]
pub use embassy_usb;

/// Hardware Abstraction Layer
///
/// Bindings to nRF52840 GPIO, the user configuration region and the vendor
/// radio libraries.
#[cfg(feature = "embedded")]
pub mod hal;

/// Radio Test Logic
///
/// Command mapping, FEM sequencing and the radio interfaces.
pub mod radio;

/// Dongle command dispatch
pub mod dongle;

/// DUT receive loop and state machine
pub mod dut;

/// USB Subsystem
///
/// Vendor-class interface carrying command frames.
pub mod usb;

/// Communication Protocols
///
/// Command frame layout and replies.
pub mod protocol;

/// Interrupt-to-task signaling
pub mod sync;

/// Startup errors
pub mod error;

/// User configuration region decoding
pub mod uicr;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::protocol::{CommandFrame, RadioCommand, RadioPayload, Response};
    pub use crate::radio::link::{LinkConfig, LinkEvent, RadioLink};
    pub use crate::sync::{EventFlag, PayloadSlot};

    // Common traits
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal_async::delay::DelayNs;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}

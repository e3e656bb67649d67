//! GPIO Bindings
//!
//! FEM control lines are chosen by the user configuration region at boot,
//! so they are bound by pin number rather than by peripheral singleton.

#![allow(unsafe_code)]

use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive};
use embedded_hal::digital::PinState;

use crate::radio::fem::FemRole;

/// Number of GPIOs on the nRF52840 (P0.00..P0.31, P1.00..P1.15)
pub const PIN_COUNT: u8 = 48;

/// Convert an embedded-hal pin state to an nRF output level
#[must_use]
pub const fn level(state: PinState) -> Level {
    match state {
        PinState::Low => Level::Low,
        PinState::High => Level::High,
    }
}

/// Bind a FEM control line as a push-pull output at `initial`
///
/// Returns `None` for a pin number the device does not have.
///
/// The FEM pins must not be claimed by anything else in the image; the
/// caller guarantees this by keeping those pins out of every other driver.
#[must_use]
pub fn fem_output(role: FemRole, pin: u8, initial: PinState) -> Option<Output<'static>> {
    if pin >= PIN_COUNT {
        warn!("FEM {:?} pin {} does not exist, leaving unbound", role, pin);
        return None;
    }

    // SAFETY: the pin number is in range and FEM lines are owned solely by
    // the FEM sequencer for the lifetime of the image.
    let any = unsafe { AnyPin::steal(pin) };
    debug!("FEM {:?} bound to pin {}", role, pin);

    Some(Output::new(any, level(initial), OutputDrive::Standard))
}

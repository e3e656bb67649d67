//! Hardware Abstraction Layer
//!
//! nRF52840 bindings used by the two firmware images. This is the only
//! place allowed to use `unsafe`: raw pin stealing for the FEM lines picked
//! at runtime, volatile reads of the user configuration region, and the
//! FFI to the vendor radio libraries.

pub mod gpio;
pub mod uicr;

#[cfg(feature = "vendor-radio")]
pub mod esb;

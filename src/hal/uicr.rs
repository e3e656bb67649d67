//! User Configuration Region Access

#![allow(unsafe_code)]

use crate::config::uicr::{FEM_WORD_A, FEM_WORD_B, LOAD_CAP_WORD};
use crate::uicr::UserConfig;

/// Address of UICR.CUSTOMER[0] on nRF52 devices
const CUSTOMER_BASE: usize = 0x1000_1080;

fn customer_word(index: usize) -> u32 {
    let addr = (CUSTOMER_BASE + index * 4) as *const u32;
    // SAFETY: UICR.CUSTOMER is always-mapped, aligned, read-only flash.
    unsafe { core::ptr::read_volatile(addr) }
}

/// Read the three user configuration words
#[must_use]
pub fn read() -> UserConfig {
    let config = UserConfig {
        load_cap: customer_word(LOAD_CAP_WORD),
        fem_word_a: customer_word(FEM_WORD_A),
        fem_word_b: customer_word(FEM_WORD_B),
    };
    debug!(
        "UICR words: {=u32:08x} {=u32:08x} {=u32:08x}",
        config.load_cap,
        config.fem_word_a,
        config.fem_word_b
    );
    config
}

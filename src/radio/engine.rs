//! Radio Test Engine Interface
//!
//! The engine that actually drives the transceiver is a vendor component.
//! Once started it runs until a hardware reset; there is no stop entry
//! point.

use super::mapper::RadioTestConfig;

/// Radio test execution engine
pub trait RadioTestEngine {
    /// Prepare the engine for `config`
    fn init(&mut self, config: &RadioTestConfig);

    /// Start the run described by `config`
    fn start(&mut self, config: &RadioTestConfig);
}

impl<E: RadioTestEngine + ?Sized> RadioTestEngine for &mut E {
    fn init(&mut self, config: &RadioTestConfig) {
        (**self).init(config);
    }

    fn start(&mut self, config: &RadioTestConfig) {
        (**self).start(config);
    }
}

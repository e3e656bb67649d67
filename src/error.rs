//! Startup errors
//!
//! Per-frame problems are absorbed where they happen (logged and dropped).
//! Only bring-up failures surface as errors, and both images treat them as
//! fatal.

use core::fmt;

use crate::radio::link::LinkError;

/// Radio-link bring-up step that failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStage {
    /// Transport initialization (mode, bitrate, addresses)
    Init,
    /// Channel selection
    Channel,
    /// Entering receive mode
    Receive,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkStage {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Init => defmt::write!(f, "init"),
            Self::Channel => defmt::write!(f, "channel"),
            Self::Receive => defmt::write!(f, "rx start"),
        }
    }
}

/// Fatal initialization failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitError {
    /// The radio-link transport refused a bring-up step
    Link {
        /// Failing step
        stage: LinkStage,
        /// Transport status code
        error: LinkError,
    },
}

impl InitError {
    /// Wrap a transport error for the given stage
    #[must_use]
    pub const fn link(stage: LinkStage, error: LinkError) -> Self {
        Self::Link { stage, error }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link { stage, error } => {
                let stage = match stage {
                    LinkStage::Init => "init",
                    LinkStage::Channel => "channel",
                    LinkStage::Receive => "rx start",
                };
                write!(f, "radio link {stage} failed: {error}")
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for InitError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Link { stage, error } => {
                defmt::write!(f, "radio link {} failed: {}", stage, error);
            }
        }
    }
}

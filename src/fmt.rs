//! Logging shims
//!
//! Library code logs through these macros so the same call sites emit
//! `defmt` frames on target and go through the `log` facade on the host.
#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::trace!($($arg)*);
        #[cfg(not(feature = "embedded"))]
        ::log::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(feature = "embedded"))]
        ::log::debug!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::info!($($arg)*);
        #[cfg(not(feature = "embedded"))]
        ::log::info!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(feature = "embedded"))]
        ::log::warn!($($arg)*);
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "embedded")]
        ::defmt::error!($($arg)*);
        #[cfg(not(feature = "embedded"))]
        ::log::error!($($arg)*);
    }};
}

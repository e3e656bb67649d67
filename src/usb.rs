//! USB Subsystem
//!
//! The dongle enumerates as a vendor-class device with one bulk OUT
//! endpoint for command frames and two bulk IN endpoints (an unused
//! loopback endpoint kept for host tool compatibility, and the reply
//! endpoint).

use crate::config::{USB_BULK_PACKET_SIZE, USB_PID, USB_VID};

#[cfg(feature = "embedded")]
pub mod vendor;

/// Vendor-specific interface class, subclass and protocol
pub const VENDOR_CLASS: u8 = 0xFF;

/// Descriptor strings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsbStrings {
    /// iManufacturer
    pub manufacturer: &'static str,
    /// iProduct
    pub product: &'static str,
    /// iSerialNumber
    pub serial_number: &'static str,
}

/// Device identity advertised at enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsbDeviceInfo {
    /// Vendor ID
    pub vid: u16,
    /// Product ID
    pub pid: u16,
    /// Bulk endpoint max packet size
    pub max_packet_size: u16,
    /// Bus power budget in mA
    pub max_power_ma: u16,
    /// Descriptor strings
    pub strings: UsbStrings,
}

impl UsbDeviceInfo {
    /// Identity of the RF test dongle
    #[must_use]
    pub const fn dongle() -> Self {
        Self {
            vid: USB_VID,
            pid: USB_PID,
            max_packet_size: USB_BULK_PACKET_SIZE,
            max_power_ma: 100,
            strings: UsbStrings {
                manufacturer: "Nordic Semiconductor",
                product: "RF Test Dongle",
                serial_number: "00000001",
            },
        }
    }
}

impl Default for UsbDeviceInfo {
    fn default() -> Self {
        Self::dongle()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for UsbDeviceInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "USB {=u16:04x}:{=u16:04x} \"{=str}\"",
            self.vid,
            self.pid,
            self.strings.product
        );
    }
}

//! Vendor-class bulk transport
//!
//! Reads command frames from the OUT endpoint, hands them to the
//! dispatcher and writes replies to the reply IN endpoint.

use embassy_usb::driver::{Endpoint, EndpointError, EndpointIn, EndpointOut};

use crate::config::USB_BULK_PACKET_SIZE;
use crate::dongle::{Dispatch, Dispatcher};
use crate::radio::link::RadioLink;
use crate::usb::UsbDeviceInfo;

/// Build the `embassy-usb` device configuration from `info`
#[must_use]
pub fn device_config(info: &UsbDeviceInfo) -> embassy_usb::Config<'static> {
    let mut config = embassy_usb::Config::new(info.vid, info.pid);
    config.manufacturer = Some(info.strings.manufacturer);
    config.product = Some(info.strings.product);
    config.serial_number = Some(info.strings.serial_number);
    config.max_power = info.max_power_ma;
    config.max_packet_size_0 = 64;
    config
}

/// Serve the vendor interface forever
///
/// Each OUT transfer is one command frame. Write errors on the reply
/// endpoint are logged and the loop continues; a disabled endpoint (bus
/// reset, cable pulled) parks the loop until the host configures the
/// device again.
pub async fn serve<L, O, I>(dispatcher: &mut Dispatcher<'_, L>, ep_out: &mut O, ep_in: &mut I) -> !
where
    L: RadioLink,
    O: EndpointOut,
    I: EndpointIn,
{
    let mut buf = [0u8; USB_BULK_PACKET_SIZE as usize];

    loop {
        ep_out.wait_enabled().await;
        info!("USB vendor interface enabled");

        loop {
            let len = match ep_out.read(&mut buf).await {
                Ok(len) => len,
                Err(EndpointError::Disabled) => break,
                Err(EndpointError::BufferOverflow) => {
                    error!("Dropping oversized USB transfer");
                    continue;
                }
            };

            if let Dispatch::Reply(response) = dispatcher.dispatch(Some(&buf[..len])) {
                let reply = response.encode();
                if let Err(err) = ep_in.write(&reply).await {
                    warn!("Reply write failed: {:?}", err);
                }
            }
        }

        warn!("USB vendor interface disabled");
    }
}

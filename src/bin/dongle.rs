//! RF Test Dongle
//!
//! Bridges the host tool on USB to the DUT over the ESB link. Frames
//! arrive on the vendor bulk OUT endpoint; version and status replies go
//! back on the reply IN endpoint.

#![no_std]
#![no_main]

use defmt::{info, panic};
use embassy_executor::Spawner;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals, usb};
use embassy_usb::{Builder, UsbDevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rf_test_firmware::dongle::{self, Dispatcher};
use rf_test_firmware::hal::esb::Esb;
use rf_test_firmware::prelude::*;
use rf_test_firmware::usb::{vendor, UsbDeviceInfo, VENDOR_CLASS};

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USBD => usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => usb::vbus_detect::InterruptHandler;
});

type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Raised by the ESB callback on an acknowledged transmit
static TX_ACKED: EventFlag = EventFlag::new();

fn on_link_event(event: LinkEvent) {
    dongle::handle_link_event(event, &TX_ACKED);
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RF test dongle v{}", env!("CARGO_PKG_VERSION"));

    // ESB needs the crystal oscillator running
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(config);

    let mut link = Esb::new(on_link_event);
    if let Err(err) = dongle::start_link(&mut link, &LinkConfig::dongle()) {
        panic!("ESB initialization failed: {}", err);
    }

    let info = UsbDeviceInfo::dongle();
    info!("{}", info);

    static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

    let driver = Driver::new(p.USBD, Irqs, HardwareVbusDetect::new(Irqs));
    let mut builder = Builder::new(
        driver,
        vendor::device_config(&info),
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );

    // Endpoints are allocated in order: OUT 0x01, IN 0x81, IN 0x82
    let (mut ep_out, mut ep_in) = {
        let mut function = builder.function(VENDOR_CLASS, VENDOR_CLASS, VENDOR_CLASS);
        let mut interface = function.interface();
        let mut alt = interface.alt_setting(VENDOR_CLASS, VENDOR_CLASS, VENDOR_CLASS, None);
        let ep_out = alt.endpoint_bulk_out(info.max_packet_size);
        let _loopback = alt.endpoint_bulk_in(info.max_packet_size);
        let ep_in = alt.endpoint_bulk_in(info.max_packet_size);
        (ep_out, ep_in)
    };

    spawner.spawn(usb_task(builder.build())).unwrap();

    info!("USB vendor interface registered");

    let mut dispatcher = Dispatcher::new(link, &TX_ACKED);
    vendor::serve(&mut dispatcher, &mut ep_out, &mut ep_in).await
}

/// USB device task - runs enumeration and control transfers
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

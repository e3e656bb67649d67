//! RF Test DUT
//!
//! Waits on the ESB link for one radio test command, applies the FEM
//! levels and hands the radio to the test engine. Stopping or changing the
//! test requires a reset.

#![no_std]
#![no_main]

use defmt::{info, panic};
use embassy_executor::Spawner;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rf_test_firmware::dut::{self, Dut};
use rf_test_firmware::hal::esb::Esb;
use rf_test_firmware::hal::radio_test::{RadioTestBlock, VendorRadioTest};
use rf_test_firmware::hal::{gpio, uicr};
use rf_test_firmware::prelude::*;
use rf_test_firmware::radio::fem::FemSequencer;

/// Filled by the ESB callback, drained by the poll loop
static PAYLOAD: PayloadSlot = PayloadSlot::new();

fn on_link_event(event: LinkEvent) {
    dut::handle_link_event(event, &PAYLOAD);
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("RF test DUT v{}", env!("CARGO_PKG_VERSION"));

    let user = uicr::read();
    // Load capacitance is only programmable on nRF54L parts
    info!("HFXO load capacitance: {}", user.hfxo_trim());

    let fem = user.fem_plan().map(|plan| {
        info!("{}", plan);
        FemSequencer::new(&plan, gpio::fem_output)
    });

    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let _p = embassy_nrf::init(config);

    static ENGINE_BLOCK: StaticCell<RadioTestBlock> = StaticCell::new();
    let engine = VendorRadioTest::new(ENGINE_BLOCK.init(RadioTestBlock::new()));
    let link = Esb::new(on_link_event);

    let mut dut = match Dut::start(link, engine, fem, &LinkConfig::dut()) {
        Ok(dut) => dut,
        Err(err) => panic!("ESB initialization failed: {}", err),
    };

    let running = dut.run(&PAYLOAD, &mut Delay).await;
    info!("Radio test running: {}", running);

    // The test engine owns the radio until reset
    core::future::pending::<()>().await;
}

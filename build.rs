//! Build script for the RF test firmware
//!
//! Handles:
//! - Memory layout configuration
//! - Optional vendor radio library linking (radio-link transport and
//!   radio test engine)

fn main() {
    // Tell Cargo to re-run this if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();

    // Link memory.x from project directory
    println!("cargo:rustc-link-search={manifest_dir}");

    // Firmware images need the cortex-m-rt and defmt linker scripts
    #[cfg(feature = "embedded")]
    {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Optional: link the vendor radio libraries (built from the vendor SDK)
    #[cfg(feature = "vendor-radio")]
    {
        println!("cargo:rerun-if-changed=vendor/nrf-radio/lib/libesb.a");
        println!("cargo:rerun-if-changed=vendor/nrf-radio/lib/libradio_test.a");

        println!("cargo:rustc-link-search={manifest_dir}/vendor/nrf-radio/lib");

        println!("cargo:rustc-link-lib=static=esb");
        println!("cargo:rustc-link-lib=static=radio_test");
    }
}

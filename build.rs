//! Build script for segmux-counter.
//!
//! Puts `memory.x` on the linker search path for the RP2350 target.

use std::path::PathBuf;
use std::{env, fs};

fn main() {
    println!("cargo:rerun-if-changed=memory.x");

    // Host builds (tests, stub binary) don't link against cortex-m-rt
    if env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default() != "arm" {
        return;
    }

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).expect("failed to copy memory.x");
    println!("cargo:rustc-link-search={}", out.display());
}

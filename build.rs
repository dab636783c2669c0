use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only the firmware binary needs the cortex-m-rt and defmt linker scripts;
    // host builds of the library and its tests link normally.
    if env::var_os("CARGO_FEATURE_STM32").is_none() {
        return;
    }
    let target = env::var("TARGET").unwrap_or_default();
    if !target.starts_with("thumb") {
        return;
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

use std::env;
use std::fs;
use std::path::PathBuf;

// Put memory.x where cortex-m-rt's link.x can find it
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=memory.x");

    let is_arm = env::var_os("CARGO_CFG_TARGET_ARCH").map_or(false, |arch| arch == "arm");
    if !is_arm {
        return;
    }

    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).unwrap();

    println!("cargo:rustc-link-search={}", out.display());
}

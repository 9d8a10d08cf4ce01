//! Generate `apixer.h` from the `extern "C"` surface into `OUT_DIR`.
//!
//! The path is exported to the crate as `APIXER_HEADER` so tests and
//! packaging scripts can find it.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let (Ok(crate_dir), Ok(out_dir)) = (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) else {
        return;
    };
    let header = PathBuf::from(out_dir).join("apixer.h");

    let result = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("APIXER_H")
        .with_documentation(true)
        .generate();
    match result {
        Ok(bindings) => {
            // `false` only means the contents were already up to date.
            bindings.write_to_file(&header);
            println!("cargo:rustc-env=APIXER_HEADER={}", header.display());
        }
        Err(err) => println!("cargo:warning=skipping header generation: {err}"),
    }
}

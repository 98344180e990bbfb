use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out_dir = env::var("OUT_DIR").unwrap_or_else(|_| ".".to_string());
    let header = PathBuf::from(out_dir).join("tasklist.h");

    let config = cbindgen::Config::from_file(PathBuf::from(&crate_dir).join("cbindgen.toml")).unwrap_or_default();
    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            bindings.write_to_file(&header);
        }
        Err(err) => println!("cargo:warning=C header not generated: {err}"),
    }
}

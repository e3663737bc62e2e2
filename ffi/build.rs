use std::env;
use std::path::PathBuf;

/// Set to a directory to also write `curlify.h` there (e.g. `include`).
const HEADER_DIR_VAR: &str = "CURLIFY_HEADER_DIR";

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed={HEADER_DIR_VAR}");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let Ok(out_dir) = env::var("OUT_DIR") else {
        println!("cargo:warning=OUT_DIR not set, header not generated");
        return;
    };

    let bindings = match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("CURLIFY_H")
        .generate()
    {
        Ok(bindings) => bindings,
        Err(err) => {
            println!("cargo:warning=cbindgen failed, header not generated: {err}");
            return;
        }
    };

    bindings.write_to_file(PathBuf::from(out_dir).join("curlify.h"));

    if let Ok(dir) = env::var(HEADER_DIR_VAR) {
        let dir = PathBuf::from(crate_dir).join(dir);
        if let Err(err) = std::fs::create_dir_all(&dir) {
            println!("cargo:warning=cannot create {}: {err}", dir.display());
            return;
        }
        bindings.write_to_file(dir.join("curlify.h"));
    }
}

// Copies the static site (page, styles, textures) to `dist/`. The wasm bundle
// itself is produced by wasm-pack, see `src/main.rs`.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        println!("cargo:warning=static/ missing – nothing to copy");
        return;
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        if let Err(e) = fs_extra::dir::remove(out_dir) {
            println!("cargo:warning=could not clear dist/: {e}");
        }
    }
    if let Err(e) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=could not create dist/: {e}");
        return;
    }

    let options = CopyOptions::new().content_only(true).overwrite(true);
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {e}");
    }
}

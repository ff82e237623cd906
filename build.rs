// Build script that mirrors `static/` into `dist/` so the site can be served as-is.
use std::{fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let options = CopyOptions::new().overwrite(true).content_only(true);
        if let Err(e) = copy(static_dir, out_dir, &options) {
            println!("cargo:warning=copying static/ to dist/ failed: {e}");
        }
    }
}

use std::fs;
use std::path::Path;

const PLACEHOLDER_INDEX: &str = "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Invitation Cards</title></head>\n<body><p>The web interface was not built. Run <code>trunk build --release</code> in <code>frontend/</code> and rebuild the server.</p></body></html>\n";

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
        .unwrap();
    }

    // `include_dir!` needs the directory to exist even without a UI build.
    let embedded = out_dir.join("dist");
    if !embedded.join("index.html").exists() {
        fs::create_dir_all(&embedded).unwrap();
        fs::write(embedded.join("index.html"), PLACEHOLDER_INDEX).unwrap();
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}

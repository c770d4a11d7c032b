//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg` and
//! serves `static/` locally so the page can be opened in a browser.
//!
//! `cargo run -- 9000` picks another port.

use std::process::{Command, ExitCode, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: u16 = 8000;

fn main() -> ExitCode {
    let port = match env::args().nth(1).map(|p| p.parse::<u16>()) {
        None => DEFAULT_PORT,
        Some(Ok(p)) => p,
        Some(Err(_)) => {
            eprintln!("usage: cargo run [-- <port>]");
            return ExitCode::FAILURE;
        }
    };

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the page may load a stale bundle.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    let mut server = match server {
        Ok(child) => child,
        Err(e) => {
            eprintln!("failed to start http server: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Keep the process alive as long as the server runs.
    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                eprintln!("http server exited: {status}");
                return ExitCode::FAILURE;
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(e) => {
                eprintln!("lost track of http server: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
}

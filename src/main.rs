//! Host-side helper: `cargo run` builds the WASM site, starts a local HTTP
//! server for `static/`, and (if available) exposes it via ngrok.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::{Command, Stdio};
    use std::{thread, time::Duration};

    use anyhow::{bail, Context, Result};
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "landing-wasm", about = "Build and serve the landing page locally")]
    pub struct Args {
        /// Port for the local HTTP server
        #[arg(long, default_value_t = 8000)]
        pub port: u16,

        /// Do not try to open an ngrok tunnel
        #[arg(long, default_value_t = false)]
        pub no_tunnel: bool,

        /// Serve the existing `static/pkg` without rebuilding
        #[arg(long, default_value_t = false)]
        pub skip_build: bool,
    }

    fn build_wasm() -> Result<()> {
        println!("Building WASM pkg …");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => Ok(()),
            Ok(_) => bail!(
                "wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
            ),
            Err(_) => {
                eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
                Ok(())
            }
        }
    }

    pub fn run(args: Args) -> Result<()> {
        if !args.skip_build {
            build_wasm()?;
        }

        println!("Launching local server at http://127.0.0.1:{} …", args.port);
        let port = args.port.to_string();
        let _server = Command::new("python3")
            .args(["-m", "http.server", port.as_str(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to start http server")?;

        if !args.no_tunnel {
            let ngrok = Command::new("ngrok")
                .args(["http", port.as_str()])
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .spawn();
            match ngrok {
                Ok(_) => println!("ngrok tunnel starting …"),
                Err(_) => eprintln!("ngrok not found. Install it to expose the site over the internet."),
            }
        }

        // Keep process alive
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    host::run(host::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#![forbid(unsafe_code)]

//! aps: ALSA profile switcher CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    if let Err(e) = cli_app::run(&args) {
        eprintln!("aps: {e}");
        std::process::exit(1);
    }
}

//! Wiremap CLI - manage module/port link diagrams

mod cli;
mod color;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::WiremapApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

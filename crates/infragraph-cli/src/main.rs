//! Infragraph CLI - Generate diagrams from project requirements

mod cli;

use clap::Parser;
use infragraph::core::prepare_render_environment;

fn main() {
    let cli_args = cli::Cli::parse();

    cli::InfragraphApp::setup_logging(&cli_args);

    // Child `dot` processes inherit PATH; extend it before any requirement runs
    prepare_render_environment();

    let app = cli::InfragraphApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

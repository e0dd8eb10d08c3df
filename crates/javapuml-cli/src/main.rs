//! javapuml CLI - Generate PlantUML class diagrams from Java sources

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run() once the CLI flags are known
    let mut app = cli::JavapumlApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

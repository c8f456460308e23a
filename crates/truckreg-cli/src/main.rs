//! Truck Registry - account-scoped truck registration records
//!
//! A CLI tool that registers trucks, their drivers and weighings under a user account.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

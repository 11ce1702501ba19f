//! Entry point for the `ovsx-sign` binary.

use clap::Parser;
use ovsx_sign::cli::{self, Cli};
use ovsx_sign::telemetry::init_telemetry;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_telemetry(cli.log.as_deref());

    ExitCode::from(cli::run(cli))
}

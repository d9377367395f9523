use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;

use noteorder::adapter::inbound::cli::{self, command::Cli, output};

#[tokio::main]
async fn main() -> miette::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli::run(cli).await {
        Ok(code) => Ok(code),
        Err(e) if output::is_json() => {
            output::error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}

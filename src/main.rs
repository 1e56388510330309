use clap::{Parser, Subcommand};

mod commands;

use ampdeploy::output;
use commands::{deploy, status};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "ampdeploy")]
#[command(version = VERSION)]
#[command(about = "Build and deploy a static front-end to AWS Amplify Hosting (no Git)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, initialize, configure hosting, and publish
    Deploy(deploy::DeployArgs),
    /// Show pipeline guard state without running anything
    Status(status::StatusArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = commands::run_json(cli.command);
    output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

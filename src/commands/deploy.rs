use clap::Args;
use serde::Serialize;

use ampdeploy::deploy::{self, DeployConfig, StepResult};
use ampdeploy::pkg::PackageManager;

use super::CmdResult;

#[derive(Args)]
pub struct DeployArgs {
    /// Path to the project root (the Vite/React app directory)
    #[arg(long, default_value = ".")]
    pub path: String,

    /// Package manager (auto-detected from lock files if omitted)
    #[arg(long, value_enum)]
    pub pkg: Option<PackageManager>,

    /// AWS CLI profile to use
    #[arg(long, default_value = "amplify-usw2")]
    pub profile: String,

    /// AWS region
    #[arg(long, default_value = "us-west-2")]
    pub region: String,

    /// Amplify environment name
    #[arg(long = "env", default_value = "prod")]
    pub env_name: String,

    /// Assume dist/ already exists and skip the local build
    #[arg(long)]
    pub skip_build: bool,

    /// Report the plan without invoking any external tool
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployOutput {
    pub command: String,
    pub project_path: String,
    pub project_name: String,
    pub package_manager: PackageManager,
    pub profile: String,
    pub region: String,
    pub env_name: String,
    pub dry_run: bool,
    pub steps: Vec<StepResult>,
}

pub fn run(args: DeployArgs) -> CmdResult<DeployOutput> {
    let config = DeployConfig {
        path: args.path,
        pkg: args.pkg,
        profile: args.profile,
        region: args.region,
        env_name: args.env_name,
        skip_build: args.skip_build,
        dry_run: args.dry_run,
    };

    let outcome = deploy::run(&config)?;

    Ok((
        DeployOutput {
            command: "deploy.run".to_string(),
            project_path: outcome.project_path,
            project_name: outcome.project_name,
            package_manager: outcome.package_manager,
            profile: outcome.profile,
            region: outcome.region,
            env_name: outcome.env_name,
            dry_run: outcome.dry_run,
            steps: outcome.steps,
        },
        0,
    ))
}

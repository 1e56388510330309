use clap::Args;
use serde::Serialize;

use ampdeploy::deploy::{self, StatusReport};

use super::CmdResult;

#[derive(Args)]
pub struct StatusArgs {
    /// Path to the project root
    #[arg(long, default_value = ".")]
    pub path: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub command: String,
    #[serde(flatten)]
    pub report: StatusReport,
}

pub fn run(args: StatusArgs) -> CmdResult<StatusOutput> {
    let report = deploy::status(&args.path)?;

    Ok((
        StatusOutput {
            command: "status.run".to_string(),
            report,
        },
        0,
    ))
}

//! Deploy pipeline orchestration.
//!
//! One linear pass: resolve the project, build (or verify existing build
//! output), ensure Amplify is initialized, ensure hosting is configured,
//! publish. Each external step blocks until completion and any failure
//! aborts the pipeline with that command's exit code.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::amplify::{self, StepStatus};
use crate::error::{Error, Result};
use crate::log_status;
use crate::pkg::{self, PackageManager};
use crate::runner;

/// Directory the front-end build writes its distributable assets to.
pub const DIST_DIR: &str = "dist";

#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub path: String,
    pub pkg: Option<PackageManager>,
    pub profile: String,
    pub region: String,
    pub env_name: String,
    pub skip_build: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub step: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StepResult {
    fn new(step: &str, status: StepStatus) -> Self {
        Self {
            step: step.to_string(),
            status,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployOutcome {
    pub project_path: String,
    pub project_name: String,
    pub package_manager: PackageManager,
    pub profile: String,
    pub region: String,
    pub env_name: String,
    pub dry_run: bool,
    pub steps: Vec<StepResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub project_path: String,
    pub project_name: String,
    pub package_manager: PackageManager,
    pub dist_exists: bool,
    pub initialized: bool,
    pub hosting_configured: bool,
}

/// Expand and canonicalize the target path, returning it with the project
/// name (the directory's file name).
fn resolve_project(path: &str) -> Result<(PathBuf, String)> {
    let expanded = shellexpand::tilde(path).into_owned();
    let raw = Path::new(&expanded);

    if !raw.exists() {
        return Err(Error::project_path_not_found(expanded));
    }

    let resolved = raw
        .canonicalize()
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("resolve {}", expanded))))?;

    let name = resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                "path",
                "Target path must name a project directory",
                Some(expanded),
            )
        })?;

    Ok((resolved, name))
}

/// Run the deploy pipeline end to end.
pub fn run(config: &DeployConfig) -> Result<DeployOutcome> {
    let (project, project_name) = resolve_project(&config.path)?;
    let pkg = config.pkg.unwrap_or_else(|| pkg::detect(&project));

    let mut steps = Vec::with_capacity(4);

    steps.push(build_step(config, &project, pkg)?);

    if config.dry_run {
        steps.push(plan_init(&project));
        steps.push(plan_hosting(&project));
        steps.push(StepResult::new("publish", StepStatus::Planned).with_detail(
            runner::display_command(
                amplify::AMPLIFY_CLI,
                &["publish", "--yes", "--profile", &config.profile],
            ),
        ));
    } else {
        let status = amplify::ensure_initialized(
            &project,
            &project_name,
            &config.env_name,
            &config.profile,
            &config.region,
            pkg,
        )?;
        steps.push(StepResult::new("init", status));

        let status = amplify::ensure_hosting(&project, &config.profile)?;
        steps.push(StepResult::new("hosting", status));

        amplify::publish(&project, &config.profile)?;
        steps.push(StepResult::new("publish", StepStatus::Ran));

        log_status!("deploy", "Deployment complete for {}", project_name);
    }

    Ok(DeployOutcome {
        project_path: project.to_string_lossy().into_owned(),
        project_name,
        package_manager: pkg,
        profile: config.profile.clone(),
        region: config.region.clone(),
        env_name: config.env_name.clone(),
        dry_run: config.dry_run,
        steps,
    })
}

fn build_step(config: &DeployConfig, project: &Path, pkg: PackageManager) -> Result<StepResult> {
    if config.skip_build {
        let dist = project.join(DIST_DIR);
        if !dist.exists() {
            return Err(Error::build_output_missing(dist.to_string_lossy()));
        }
        return Ok(
            StepResult::new("build", StepStatus::Skipped).with_detail("existing dist/ output used")
        );
    }

    let command = runner::display_command(pkg.program(), &["run", "build"]);

    if config.dry_run {
        return Ok(StepResult::new("build", StepStatus::Planned).with_detail(command));
    }

    log_status!("build", "Building project with {}", pkg);
    runner::run(pkg.program(), &["run", "build"], Some(project), &[])?;
    Ok(StepResult::new("build", StepStatus::Ran).with_detail(command))
}

fn plan_init(project: &Path) -> StepResult {
    if amplify::is_initialized(project) {
        StepResult::new("init", StepStatus::Skipped).with_detail("amplify/ already present")
    } else {
        StepResult::new("init", StepStatus::Planned)
            .with_detail("amplify init --yes (headless)")
    }
}

fn plan_hosting(project: &Path) -> StepResult {
    if amplify::hosting_configured(project) {
        StepResult::new("hosting", StepStatus::Skipped).with_detail("hosting already configured")
    } else {
        StepResult::new("hosting", StepStatus::Planned)
            .with_detail("amplify add hosting --yes --type amplifyhosting (headless)")
    }
}

/// Read-only report of the pipeline's guard state. Runs no external tools.
pub fn status(path: &str) -> Result<StatusReport> {
    let (project, project_name) = resolve_project(path)?;

    Ok(StatusReport {
        project_name,
        package_manager: pkg::detect(&project),
        dist_exists: project.join(DIST_DIR).exists(),
        initialized: amplify::is_initialized(&project),
        hosting_configured: amplify::hosting_configured(&project),
        project_path: project.to_string_lossy().into_owned(),
    })
}

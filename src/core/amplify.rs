//! Amplify CLI steps and the idempotency guards that skip them.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::headless::{self, HEADLESS_ENV, INPUT_ENV};
use crate::log_status;
use crate::pkg::PackageManager;
use crate::runner;

pub const AMPLIFY_CLI: &str = "amplify";

/// Relative path of the metadata file written by the Amplify CLI after a
/// backend push. Used only to decide whether hosting is already configured.
pub const META_FILE: &str = "amplify/#current-cloud-backend/amplify-meta.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Ran,
    Skipped,
    Planned,
}

/// True when the project carries an `amplify/` directory from a previous
/// `amplify init`.
pub fn is_initialized(project: &Path) -> bool {
    project.join("amplify").exists()
}

/// True when the project's Amplify metadata already declares hosting.
/// Missing or malformed metadata counts as not configured, so the step
/// simply runs again.
pub fn hosting_configured(project: &Path) -> bool {
    let Ok(raw) = std::fs::read_to_string(project.join(META_FILE)) else {
        return false;
    };
    let Ok(meta) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return false;
    };
    meta_declares_hosting(&meta)
}

fn meta_declares_hosting(meta: &serde_json::Value) -> bool {
    meta.get("providers")
        .and_then(|p| p.get("awscloudformation"))
        .and_then(|p| p.get("hosting"))
        .is_some()
}

/// Run `amplify init` in headless mode unless the project is already
/// initialized.
pub fn ensure_initialized(
    project: &Path,
    project_name: &str,
    env_name: &str,
    profile: &str,
    region: &str,
    pkg: PackageManager,
) -> Result<StepStatus> {
    if is_initialized(project) {
        log_status!("init", "Amplify already initialized");
        return Ok(StepStatus::Skipped);
    }

    log_status!("init", "Running amplify init (headless)");
    let payload = headless::init_payload(project_name, env_name, profile, region, pkg);
    let input = headless::to_input_json(&payload)?;

    runner::run(
        AMPLIFY_CLI,
        &["init", "--yes", "--profile", profile],
        Some(project),
        &[(HEADLESS_ENV, "true".to_string()), (INPUT_ENV, input)],
    )?;

    Ok(StepStatus::Ran)
}

/// Run `amplify add hosting` unless the metadata already declares hosting.
pub fn ensure_hosting(project: &Path, profile: &str) -> Result<StepStatus> {
    if hosting_configured(project) {
        log_status!("hosting", "Amplify hosting already configured");
        return Ok(StepStatus::Skipped);
    }

    log_status!("hosting", "Adding Amplify hosting (PROD)");
    let input = headless::to_input_json(&headless::hosting_payload())?;

    runner::run(
        AMPLIFY_CLI,
        &[
            "add",
            "hosting",
            "--yes",
            "--profile",
            profile,
            "--type",
            "amplifyhosting",
        ],
        Some(project),
        &[(HEADLESS_ENV, "true".to_string()), (INPUT_ENV, input)],
    )?;

    Ok(StepStatus::Ran)
}

/// Upload static assets and activate the CloudFront distribution.
pub fn publish(project: &Path, profile: &str) -> Result<()> {
    log_status!("publish", "Publishing to Amplify Hosting");
    runner::run(
        AMPLIFY_CLI,
        &["publish", "--yes", "--profile", profile],
        Some(project),
        &[],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn is_initialized_requires_amplify_dir() {
        let dir = TempDir::new().unwrap();
        assert!(!is_initialized(dir.path()));

        fs::create_dir(dir.path().join("amplify")).unwrap();
        assert!(is_initialized(dir.path()));
    }

    #[test]
    fn ensure_initialized_skips_when_marker_exists() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("amplify")).unwrap();

        let status = ensure_initialized(
            dir.path(),
            "site",
            "prod",
            "amplify-usw2",
            "us-west-2",
            PackageManager::Npm,
        )
        .unwrap();
        assert_eq!(status, StepStatus::Skipped);
    }

    #[test]
    fn hosting_configured_false_without_meta_file() {
        let dir = TempDir::new().unwrap();
        assert!(!hosting_configured(dir.path()));
    }

    #[test]
    fn hosting_configured_false_for_malformed_meta() {
        let dir = TempDir::new().unwrap();
        let meta_path = dir.path().join(META_FILE);
        fs::create_dir_all(meta_path.parent().unwrap()).unwrap();
        fs::write(&meta_path, "not json").unwrap();
        assert!(!hosting_configured(dir.path()));
    }

    #[test]
    fn hosting_configured_reads_provider_declaration() {
        let dir = TempDir::new().unwrap();
        let meta_path = dir.path().join(META_FILE);
        fs::create_dir_all(meta_path.parent().unwrap()).unwrap();

        let without_hosting = json!({
            "providers": { "awscloudformation": { "Region": "us-west-2" } }
        });
        fs::write(&meta_path, without_hosting.to_string()).unwrap();
        assert!(!hosting_configured(dir.path()));

        let with_hosting = json!({
            "providers": { "awscloudformation": { "hosting": {} } }
        });
        fs::write(&meta_path, with_hosting.to_string()).unwrap();
        assert!(hosting_configured(dir.path()));
    }

    #[test]
    fn meta_declares_hosting_ignores_top_level_hosting_key() {
        // Only the provider section short-circuits the step.
        let meta = json!({ "hosting": {} });
        assert!(!meta_declares_hosting(&meta));
    }
}

//! Amplify CLI headless input builders.
//!
//! The Amplify CLI accepts pre-supplied configuration via environment
//! variables instead of interactive prompts: `AMPLIFY_CLI_HEADLESS=true`
//! plus the JSON document in `AMPLIFY_CLI_INPUT`. The payload shapes here
//! follow the Amplify headless schema version 1.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::pkg::PackageManager;

pub const HEADLESS_ENV: &str = "AMPLIFY_CLI_HEADLESS";
pub const INPUT_ENV: &str = "AMPLIFY_CLI_INPUT";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    pub version: &'static str,
    pub project_name: String,
    pub env_name: String,
    pub default_editor: &'static str,
    pub frontend: FrontendSection,
    pub providers: ProvidersSection,
}

#[derive(Debug, Serialize)]
pub struct FrontendSection {
    pub frontend: &'static str,
    pub framework: &'static str,
    pub config: FrontendConfig,
}

// The frontend config block uses PascalCase keys, unlike the rest of the
// headless schema.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FrontendConfig {
    pub source_dir: &'static str,
    pub distribution_dir: &'static str,
    pub build_command: String,
    pub start_command: String,
}

#[derive(Debug, Serialize)]
pub struct ProvidersSection {
    pub awscloudformation: CloudFormationProvider,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFormationProvider {
    pub config_level: &'static str,
    pub use_profile: bool,
    pub profile_name: String,
    pub region: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingPayload {
    pub version: &'static str,
    pub service_configuration: HostingServiceConfiguration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingServiceConfiguration {
    pub service_name: &'static str,
    #[serde(rename = "type")]
    pub service_type: &'static str,
    pub app_id: &'static str,
    pub environment: &'static str,
    pub enable_pull_request_preview: bool,
}

/// Build the `amplify init` headless payload for a Vite-style static
/// front-end (source in `src/`, build output in `dist/`).
pub fn init_payload(
    project_name: &str,
    env_name: &str,
    profile: &str,
    region: &str,
    pkg: PackageManager,
) -> InitPayload {
    InitPayload {
        version: "1",
        project_name: project_name.to_string(),
        env_name: env_name.to_string(),
        default_editor: "code",
        frontend: FrontendSection {
            frontend: "javascript",
            framework: "react",
            config: FrontendConfig {
                source_dir: "src",
                distribution_dir: "dist",
                build_command: format!("{} run build", pkg.program()),
                start_command: format!("{} run dev", pkg.program()),
            },
        },
        providers: ProvidersSection {
            awscloudformation: CloudFormationProvider {
                config_level: "project",
                use_profile: true,
                profile_name: profile.to_string(),
                region: region.to_string(),
            },
        },
    }
}

/// Build the `amplify add hosting` headless payload (Amplify Hosting,
/// managed PROD environment, no PR previews).
pub fn hosting_payload() -> HostingPayload {
    HostingPayload {
        version: "1",
        service_configuration: HostingServiceConfiguration {
            service_name: "AmplifyHosting",
            service_type: "amplifyhosting",
            app_id: "use-existing",
            environment: "PROD",
            enable_pull_request_preview: false,
        },
    }
}

/// Serialize a headless payload to the JSON string passed via env var.
pub fn to_input_json<T: Serialize>(payload: &T) -> Result<String> {
    serde_json::to_string(payload)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize headless input".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_payload_contains_supplied_fields() {
        let payload = init_payload("my-site", "prod", "amplify-usw2", "us-west-2", PackageManager::Pnpm);
        let json: serde_json::Value =
            serde_json::from_str(&to_input_json(&payload).unwrap()).unwrap();

        assert_eq!(json["version"], "1");
        assert_eq!(json["projectName"], "my-site");
        assert_eq!(json["envName"], "prod");
        assert_eq!(json["defaultEditor"], "code");
        assert_eq!(json["providers"]["awscloudformation"]["profileName"], "amplify-usw2");
        assert_eq!(json["providers"]["awscloudformation"]["region"], "us-west-2");
        assert_eq!(json["providers"]["awscloudformation"]["configLevel"], "project");
        assert_eq!(json["providers"]["awscloudformation"]["useProfile"], true);
    }

    #[test]
    fn init_payload_frontend_config_uses_pascal_case_keys() {
        let payload = init_payload("app", "prod", "p", "us-west-2", PackageManager::Npm);
        let json: serde_json::Value =
            serde_json::from_str(&to_input_json(&payload).unwrap()).unwrap();

        let config = &json["frontend"]["config"];
        assert_eq!(config["SourceDir"], "src");
        assert_eq!(config["DistributionDir"], "dist");
        assert_eq!(config["BuildCommand"], "npm run build");
        assert_eq!(config["StartCommand"], "npm run dev");
        assert_eq!(json["frontend"]["frontend"], "javascript");
        assert_eq!(json["frontend"]["framework"], "react");
    }

    #[test]
    fn hosting_payload_targets_amplify_hosting_prod() {
        let json: serde_json::Value =
            serde_json::from_str(&to_input_json(&hosting_payload()).unwrap()).unwrap();

        let svc = &json["serviceConfiguration"];
        assert_eq!(svc["serviceName"], "AmplifyHosting");
        assert_eq!(svc["type"], "amplifyhosting");
        assert_eq!(svc["appId"], "use-existing");
        assert_eq!(svc["environment"], "PROD");
        assert_eq!(svc["enablePullRequestPreview"], false);
    }
}

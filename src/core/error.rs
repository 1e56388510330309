use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationMissingArgument,
    ValidationInvalidArgument,

    ProjectPathNotFound,
    BuildOutputMissing,

    CommandSpawnFailed,
    CommandFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::ProjectPathNotFound => "project.path_not_found",
            ErrorCode::BuildOutputMissing => "build.output_missing",

            ErrorCode::CommandSpawnFailed => "command.spawn_failed",
            ErrorCode::CommandFailed => "command.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathNotFoundDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutputMissingDetails {
    pub expected_dir: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpawnFailedDetails {
    pub command: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    /// Exit code to propagate to the shell when an external command failed.
    /// Commands exit with the child's own code, not a fixed class.
    pub exit_code: Option<i32>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            exit_code: None,
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            serde_json::json!({ "args": args }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            value,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn project_path_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        let details = serde_json::to_value(PathNotFoundDetails { path: path.clone() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ProjectPathNotFound,
            format!("Path not found: {}", path),
            details,
        )
    }

    pub fn build_output_missing(expected_dir: impl Into<String>) -> Self {
        let expected_dir = expected_dir.into();
        let details = serde_json::to_value(BuildOutputMissingDetails {
            expected_dir: expected_dir.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::BuildOutputMissing,
            format!(
                "--skip-build specified but build output not found: {}",
                expected_dir
            ),
            details,
        )
        .with_hint("Run without --skip-build to build the project first")
    }

    pub fn command_failed(command: impl Into<String>, exit_code: i32) -> Self {
        let command = command.into();
        let details = serde_json::to_value(CommandFailedDetails {
            command: command.clone(),
            exit_code,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        let mut err = Self::new(
            ErrorCode::CommandFailed,
            format!("Command failed (exit {}): {}", exit_code, command),
            details,
        );
        err.exit_code = Some(exit_code);
        err
    }

    pub fn command_spawn_failed(command: impl Into<String>, error: impl Into<String>) -> Self {
        let command = command.into();
        let details = serde_json::to_value(CommandSpawnFailedDetails {
            command: command.clone(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::CommandSpawnFailed,
            format!("Failed to start command: {}", command),
            details,
        )
        .with_hint("Check that the tool is installed and on PATH")
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            serde_json::json!({ "error": error.into(), "context": context }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_carries_exit_code() {
        let err = Error::command_failed("amplify publish --yes", 127);
        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert_eq!(err.exit_code, Some(127));
        assert_eq!(err.details["exitCode"], 127);
    }

    #[test]
    fn build_output_missing_has_hint() {
        let err = Error::build_output_missing("/srv/app/dist");
        assert_eq!(err.code.as_str(), "build.output_missing");
        assert!(!err.hints.is_empty());
        assert_eq!(err.details["expectedDir"], "/srv/app/dist");
    }
}

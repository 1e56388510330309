//! Package manager detection via lock-file sniffing.

use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// Executable name, also used in generated build/start command strings.
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    pub fn lock_file(&self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Pnpm => "pnpm-lock.yaml",
            PackageManager::Yarn => "yarn.lock",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

/// Detect the package manager that produced the lock file in `dir`.
///
/// Priority when multiple lock files are present: pnpm, then yarn, then npm.
/// Falls back to npm when no lock file matches.
pub fn detect(dir: &Path) -> PackageManager {
    for pm in [
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Npm,
    ] {
        if dir.join(pm.lock_file()).exists() {
            return pm;
        }
    }
    PackageManager::Npm
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn detect_defaults_to_npm_without_lock_files() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect(dir.path()), PackageManager::Npm);
    }

    #[test]
    fn detect_matches_each_lock_file() {
        for (lock, expected) in [
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("package-lock.json", PackageManager::Npm),
        ] {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join(lock), "").unwrap();
            assert_eq!(detect(dir.path()), expected);
        }
    }

    #[test]
    fn detect_prefers_pnpm_over_yarn_and_npm() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        fs::write(dir.path().join("package-lock.json"), "").unwrap();
        assert_eq!(detect(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn detect_prefers_yarn_over_npm() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        fs::write(dir.path().join("package-lock.json"), "").unwrap();
        assert_eq!(detect(dir.path()), PackageManager::Yarn);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(PackageManager::Pnpm).unwrap(),
            serde_json::json!("pnpm")
        );
    }
}

// Public modules
pub mod amplify;
pub mod deploy;
pub mod error;
pub mod headless;
pub mod output;
pub mod pkg;
pub mod runner;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use pkg::PackageManager;

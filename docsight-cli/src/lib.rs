// All core functionality is in docsight-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod config_locator;
pub mod report;

// Re-export core types for convenience
pub use docsight_core::*;

// Re-export CLI utilities
pub use config_locator::{ConfigLocator, ConfigSource};
pub use report::Report;

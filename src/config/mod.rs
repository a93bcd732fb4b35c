//! Configuration module for Reel-Tally
//!
//! Handles loading, parsing, and validating TOML configuration files. A
//! config file is optional: every key has a built-in default matching the
//! public catalog/resolver/document endpoints.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, DocumentConfig, PoolConfig, ResolverConfig};

// Re-export parser functions
pub use parser::{default_config, load_config};

//! Configuration file loading for code-buddy
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OLLAMA_HOST` for the endpoint host
//! 2. `CODE_BUDDY_*` environment variables (`__` separates section and key)
//! 3. `--config <path>` specified file
//! 4. Project root: `./code-buddy.toml` or `./.code-buddy.toml`
//! 5. Global: `$XDG_CONFIG_HOME/code-buddy/config.toml`
//! 6. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileOllamaConfig, FileReplConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};

//! CLI command definitions

use buddy_domain::TaskKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for code-buddy
#[derive(Parser, Debug)]
#[command(name = "code-buddy")]
#[command(author, version, about = "Local coding assistant backed by Ollama")]
#[command(long_about = r#"
code-buddy sends code to a local Ollama model to explain it, debug it, or
generate tests for it, and answers questions about uploaded documents.

Without a subcommand it opens an interactive chat.

Configuration files are loaded from (in priority order):
1. --config <path>                   Explicit config file
2. ./code-buddy.toml                 Project-level config
3. ~/.config/code-buddy/config.toml  Global config
Environment variables CODE_BUDDY_<SECTION>__<KEY> and OLLAMA_HOST override files.

Example:
  code-buddy explain src/main.rs
  git diff | code-buddy debug -
  code-buddy upload notes.txt --ask "What are the open issues?"
  code-buddy --model codellama chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Model to use instead of the configured one
    #[arg(short, long, value_name = "MODEL", global = true)]
    pub model: Option<String>,

    /// Ollama host (e.g. 127.0.0.1:11434)
    #[arg(long, value_name = "URL", global = true)]
    pub host: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The subcommand to run; `chat` when none was given.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open an interactive chat (default)
    Chat,

    /// Explain a piece of code
    Explain {
        /// File containing the code, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        source: String,
    },

    /// Look for bugs and suggest fixes
    Debug {
        /// File containing the code, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        source: String,
    },

    /// Generate test cases
    Tests {
        /// File containing the code, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        source: String,
    },

    /// Register documents for later questions
    Upload {
        /// Files to upload (.txt, .pdf, .docx)
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Ask a question about the last uploaded document
        #[arg(long, value_name = "QUESTION")]
        ask: Option<String>,
    },

    /// List models available on the Ollama server
    Models,
}

impl Command {
    /// The code task and its input source, for `explain`, `debug` and `tests`.
    pub fn code_task(&self) -> Option<(TaskKind, &str)> {
        match self {
            Command::Explain { source } => Some((TaskKind::Explain, source.as_str())),
            Command::Debug { source } => Some((TaskKind::Debug, source.as_str())),
            Command::Tests { source } => Some((TaskKind::GenerateTests, source.as_str())),
            Command::Chat | Command::Upload { .. } | Command::Models => None,
        }
    }
}

//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::endpoint::CacheMode;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  tabby-panel                              Launch interactive control panel
  tabby-panel models                       List models the endpoint can serve
  tabby-panel load llama-7b --max-seq-len 4096 --cache-mode q8
  tabby-panel unload                       Unload the current model
  tabby-panel config                       Show config paths and key status
  tabby-panel config set-api-key           Store API key (reads stdin when omitted)
  tabby-panel completions bash             Generate bash completions

ENVIRONMENT:
  TABBY_API_URL     Endpoint base address (default http://localhost:5001/v1)
  TABBY_API_KEY     API key for CLI commands
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Control panel for a TabbyAPI model server: list, load, and unload models",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API key for this invocation (overrides TABBY_API_KEY and the stored key)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List models the endpoint can serve
    Models,
    /// Ask the endpoint to load a model
    Load {
        /// Model name as listed by `models`
        name: String,
        /// Maximum sequence length (also used as cache size); server default when omitted
        #[arg(long)]
        max_seq_len: Option<u32>,
        /// Key-value cache quantization
        #[arg(long, value_enum, default_value_t = CacheMode::Q4)]
        cache_mode: CacheMode,
    },
    /// Unload the currently loaded model
    Unload,
    /// Show config paths, endpoint, and API key status
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Store the API key in the config directory
    SetApiKey {
        /// The key; read from stdin when omitted
        api_key: Option<String>,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when no subcommand is given and the TUI will take over the terminal.
    pub fn is_tui(&self) -> bool {
        self.command.is_none()
    }
}

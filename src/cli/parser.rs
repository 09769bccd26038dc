//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Look up livestream profiles on secure.xview.tv
#[derive(Parser, Debug)]
#[command(name = "xview-bot")]
#[command(about = "Look up livestream profiles, playback links and thumbnails on secure.xview.tv")]
#[command(long_about = "
xview-bot answers the four chat commands of the XView plugin from the command
line. Reply text is printed to stdout; attached thumbnails are written to a
file.

EXAMPLES:
    # Full profile with thumbnail
    xview-bot info jenny_taborda

    # Playback link closest to 720p
    xview-bot link jenny_taborda 720

    # Thumbnail only, blurred, through a SOCKS proxy
    xview-bot --proxy socks5://127.0.0.1:1080 --blur-level 60 pic jenny_taborda -o thumb.jpg

    # Search rooms by keyword
    xview-bot search latina

    # Validate configuration without contacting the site
    xview-bot --env production check-config
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load settings from this single TOML file instead of the layered
    /// `config/` directory. The file must exist and be readable.
    ///
    /// Example: --config /etc/xview-bot/production.toml
    #[arg(short, long, value_name = "FILE", global = true, value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` overlay is loaded.
    ///
    /// Available values: development (dev), test, staging, production (prod)
    #[arg(short, long, value_enum, global = true)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises log output to debug level. Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Proxy for all requests (http, https, socks5 or socks5h URL)
    ///
    /// Pass an empty string to disable a proxy set in the configuration.
    #[arg(long, value_name = "URL", global = true, value_parser = super::validation::validate_proxy_url)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", global = true, value_parser = super::validation::validate_timeout)]
    pub timeout: Option<u64>,

    /// Thumbnail blur level from 0 (untouched) to 100
    #[arg(long, value_name = "LEVEL", global = true, value_parser = super::validation::validate_blur_level)]
    pub blur_level: Option<u8>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full profile information with thumbnail
    ///
    /// Examples:
    ///   xview-bot info jenny_taborda
    ///   xview-bot info https://secure.xview.tv/jenny_taborda/ -o jenny.jpg
    Info {
        /// Username or profile URL
        id: String,

        /// Where to write the thumbnail (default: thumb_<id>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Playback link for a quality
    ///
    /// Quality is a label, best, worst, half or a resolution such as 720.
    /// The nearest resolution wins when there is no exact match.
    Link {
        /// Username or profile URL
        id: String,

        /// Requested quality (default: best)
        quality: Option<String>,
    },

    /// Thumbnail only
    Pic {
        /// Username or profile URL
        id: String,

        /// Where to write the thumbnail (default: thumb_<id>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Search rooms by keyword
    Search {
        /// Search keyword; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
    },

    /// Validate the merged configuration and exit
    CheckConfig,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl Cli {
    /// Validate CLI arguments beyond what clap checks
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        match &self.command {
            Commands::Info { id, .. } | Commands::Link { id, .. } | Commands::Pic { id, .. }
                if id.trim().is_empty() =>
            {
                Err("Identifier must not be empty".to_string())
            }
            Commands::Search { keyword } if keyword.iter().all(|k| k.trim().is_empty()) => {
                Err("Search keyword must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use std::path::{Path, PathBuf};

use super::parser::{Cli, Commands};
use crate::commands::Command;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::external::xview::StreamIdentifier;
use crate::reply::{ReplyImage, ReplyPayload};
use crate::services::Services;

/// Execute a CLI command with the given settings
///
/// Reply text goes to stdout. An attached image is written to `--output`, or
/// to `thumb_<id>.<ext>` in the current directory.
///
/// # Errors
/// Returns errors for invalid arguments, an unusable HTTP client setup, or a
/// failure to write the image file. Lookup failures are part of the reply.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    let (command, output) = match &cli.command {
        Commands::CheckConfig => {
            print_config_summary(&settings);
            return Ok(());
        }
        Commands::Info { id, output } => (Command::Info { id: id.clone() }, output.as_deref()),
        Commands::Link { id, quality } => (
            Command::Link {
                id: id.clone(),
                quality: quality.clone(),
            },
            None,
        ),
        Commands::Pic { id, output } => (Command::Pic { id: id.clone() }, output.as_deref()),
        Commands::Search { keyword } => (
            Command::Search {
                keyword: keyword.join(" "),
            },
            None,
        ),
    };

    let services = Services::new(&settings)?;
    let reply = command.execute(&services.streams).await;

    deliver(&command, reply, output).await
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate()
        .map_err(|reason| AppError::validation("cli_arguments", reason))
}

fn print_config_summary(settings: &Settings) {
    let request = &settings.request;

    println!("✓ Configuration is valid");
    println!("✓ Site: {}", settings.site.base_url);
    println!("✓ Proxy: {}", request.proxy().unwrap_or("none"));
    println!("✓ Timeout: {}s", request.timeout_seconds);
    println!(
        "✓ Blur: level {} (max radius {})",
        request.blur_level, request.max_blur_radius
    );
    println!(
        "✓ Retry: {} attempt(s), {}ms apart",
        settings.retry.max_attempts, settings.retry.delay_ms
    );
    println!("✓ Log level: {}", settings.logger.level);
}

async fn deliver(command: &Command, reply: ReplyPayload, output: Option<&Path>) -> AppResult<()> {
    println!("{}", reply.text);

    let Some(image) = reply.image else {
        return Ok(());
    };

    let name = match command {
        Command::Info { id } | Command::Pic { id } => id.as_str(),
        Command::Link { id, .. } => id.as_str(),
        Command::Search { keyword } => keyword.as_str(),
    };
    let path = image_path(output, name, &image);

    tokio::fs::write(&path, &image.bytes)
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e)
                .context(format!("Failed to write image to {}", path.display())),
        })?;

    tracing::info!(path = %path.display(), bytes = image.bytes.len(), "Image written");
    println!("🖼️ {}", path.display());
    Ok(())
}

/// `--output` when given, else `thumb_<id>.<ext>` with unsafe characters replaced
fn image_path(output: Option<&Path>, raw_id: &str, image: &ReplyImage) -> PathBuf {
    if let Some(path) = output {
        return path.to_path_buf();
    }

    let id = StreamIdentifier::parse(raw_id)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| raw_id.trim().to_string());
    let safe: String = id
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();

    PathBuf::from(format!("thumb_{}.{}", safe, image.extension))
}

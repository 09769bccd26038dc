use clap::Parser;

use xview_bot::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    tracing::debug!(
        version = xview_bot::pkg_version(),
        environment = ?cli.env,
        "Starting xview-bot"
    );

    cli::execute_command(&cli, settings).await?;

    Ok(())
}

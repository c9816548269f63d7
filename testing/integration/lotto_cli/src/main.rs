//! ListLotto - Command-line picker

use lotto_cli::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli_args = cli::parse();

    // Execute command
    cli::execute(cli_args).await?;

    Ok(())
}

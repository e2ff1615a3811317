//! Taleweaver CLI binary.
//!
//! This binary provides command-line access to Taleweaver's functionality:
//! - Generate and export a storybook for a child
//! - Run the image-generation proxy
//! - List the available story themes

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, handle_generate, handle_serve, handle_themes};

    // .env may carry the provider secret
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    taleweaver::logging::init_tracing(cli.verbose, cli.json_logs);

    let config = cli.load_config()?;

    match cli.command {
        Commands::Generate(args) => {
            handle_generate(args, &config).await?;
        }
        Commands::Serve { bind } => {
            handle_serve(bind, &config).await?;
        }
        Commands::Themes { themes } => {
            handle_themes(themes.as_deref())?;
        }
    }

    Ok(())
}

//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taleweaver::{TaleweaverConfig, TaleweaverResult};

/// Taleweaver - personalised illustrated storybooks for children
#[derive(Parser, Debug)]
#[command(name = "taleweaver")]
#[command(about = "Personalised illustrated storybooks for children", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (default: bundled < ~/.config/taleweaver < ./taleweaver.toml)
    #[arg(long, global = true, env = "TALEWEAVER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the configuration named by `--config`, or the layered default.
    pub fn load_config(&self) -> TaleweaverResult<TaleweaverConfig> {
        match &self.config {
            Some(path) => TaleweaverConfig::from_file(path),
            None => TaleweaverConfig::load(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an illustrated storybook PDF for a child
    Generate(GenerateArgs),

    /// Run the image-generation proxy
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// List the available story themes
    Themes {
        /// Theme catalog overriding the built-in templates
        #[arg(long)]
        themes: Option<PathBuf>,
    },
}

/// Arguments of the `generate` command
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Child's name
    #[arg(long)]
    pub name: String,

    /// Child's age (1-12)
    #[arg(long)]
    pub age: u8,

    /// Reference photo of the child (JPEG, PNG or WebP)
    #[arg(long)]
    pub photo: PathBuf,

    /// Story theme; unknown themes fall back to adventure
    #[arg(long, default_value = "adventure")]
    pub theme: String,

    /// Directory the PDF is written to
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Proxy endpoint to use instead of calling the provider directly
    #[arg(long)]
    pub proxy: Option<String>,

    /// Theme catalog overriding the built-in templates
    #[arg(long)]
    pub themes: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from([
            "taleweaver", "generate", "--name", "Mia", "--age", "6", "--photo", "mia.jpg",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.name, "Mia");
        assert_eq!(args.age, 6);
        assert_eq!(args.photo, PathBuf::from("mia.jpg"));
        assert_eq!(args.theme, "adventure");
        assert_eq!(args.out, PathBuf::from("."));
        assert!(args.proxy.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_generate_requires_photo() {
        let result = Cli::try_parse_from(["taleweaver", "generate", "--name", "Mia", "--age", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_age_must_be_numeric() {
        let result = Cli::try_parse_from([
            "taleweaver", "generate", "--name", "Mia", "--age", "six", "--photo", "mia.jpg",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_with_global_flags() {
        let cli =
            Cli::try_parse_from(["taleweaver", "serve", "--bind", "0.0.0.0:8080", "-v", "--json-logs"])
                .unwrap();

        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "0.0.0.0:8080"));
    }

    #[test]
    fn test_themes_command() {
        let cli = Cli::try_parse_from(["taleweaver", "themes", "--themes", "custom.toml"]).unwrap();
        assert!(
            matches!(cli.command, Commands::Themes { themes: Some(ref p) } if p == &PathBuf::from("custom.toml"))
        );
    }
}

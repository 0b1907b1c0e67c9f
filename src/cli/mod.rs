//! CLI module for L.A.R.A
//!
//! Command-line parsing and handling for the lara-server binary.
//! Uses clap for argument parsing and owo-colors for colored output.

pub mod output;

use clap::{Parser, Subcommand};

/// L.A.R.A - Local Augmented Retrieval Assistant
#[derive(Parser, Debug)]
#[command(
    name = "lara-server",
    version,
    about = "L.A.R.A - Local Augmented Retrieval Assistant",
    long_about = "A local-first RAG document assistant: upload PDF, TXT, MD, or CSV files,\n\
                  then ask questions answered only from those documents via a locally\n\
                  hosted Ollama server.",
    after_help = "EXAMPLES:\n    \
                  lara-server                    # Start the server on 127.0.0.1:3000\n    \
                  lara-server serve --port 8080  # Start on a different port\n    \
                  lara-server config             # Show the resolved configuration\n    \
                  lara-server config --validate  # Validate configuration and exit"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (the default when no subcommand is given)
    Serve {
        /// Host address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration and exit
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["lara-server"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli =
            Cli::try_parse_from(["lara-server", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn config_validate_flag_parses() {
        let cli = Cli::try_parse_from(["lara-server", "config", "--validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { validate: true })
        ));
    }
}

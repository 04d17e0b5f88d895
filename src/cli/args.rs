//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Users API - CRUD over user records with health endpoints
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
}

/// Arguments for the serve command.
///
/// Unset flags fall back to the loaded configuration.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["users-api", "-v", "serve", "-H", "127.0.0.1", "--port", "8080"]);
        assert!(cli.verbose);
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn test_serve_defaults_to_config() {
        let Commands::Serve(args) = Cli::parse_from(["users-api", "serve"]).command;
        assert!(args.host.is_none());
        assert!(args.port.is_none());
    }
}

// src/cli.rs
use clap::{Parser, Subcommand};

/// Single-tenant IndieAuth server.
#[derive(Parser, Debug, Clone)]
#[command(name = "indieauth-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the server using configuration from the environment
    Serve,
    /// Print the name and version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_subcommands() {
        let cli = Cli::try_parse_from(["indieauth-server", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve);
        let cli = Cli::try_parse_from(["indieauth-server", "version"]).unwrap();
        assert_eq!(cli.command, Command::Version);
    }

    #[test]
    fn rejects_unknown_subcommands() {
        assert!(Cli::try_parse_from(["indieauth-server", "migrate"]).is_err());
        assert!(Cli::try_parse_from(["indieauth-server"]).is_err());
    }
}

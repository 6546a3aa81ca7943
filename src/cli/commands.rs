//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docstep - cursor-paginated browsing for remote document stores
#[derive(Parser, Debug)]
#[command(name = "docstep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Session configuration file (YAML)
    #[arg(short, long, global = true, default_value = "docstep.yaml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe store connectivity
    Check,

    /// Step through the collection page by page
    Browse {
        /// Initial keyword filter
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Write the filtered result set to CSV
    Export {
        /// Keyword filter
        #[arg(short, long)]
        filter: Option<String>,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Parse and validate the session configuration
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browse_with_filter() {
        let cli = Cli::parse_from(["docstep", "browse", "--filter", "vip"]);
        match cli.command {
            Commands::Browse { filter } => assert_eq!(filter.as_deref(), Some("vip")),
            other => panic!("expected Browse, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_requires_output() {
        assert!(Cli::try_parse_from(["docstep", "export"]).is_err());

        let cli = Cli::parse_from(["docstep", "export", "--output", "out.csv"]);
        match cli.command {
            Commands::Export { filter, output } => {
                assert!(filter.is_none());
                assert_eq!(output, std::path::PathBuf::from("out.csv"));
            }
            other => panic!("expected Export, got {other:?}"),
        }
    }

    #[test]
    fn test_config_defaults_to_docstep_yaml() {
        let cli = Cli::parse_from(["docstep", "check"]);
        assert_eq!(cli.config, std::path::PathBuf::from("docstep.yaml"));
    }
}

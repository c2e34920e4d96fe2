//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// HTTP API contract verification harness
#[derive(Parser, Debug)]
#[command(name = "api-harness")]
#[command(version = "0.1.0")]
#[command(about = "Verify a REST API surface against its declared contract")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a verification run
    Run(RunArgs),

    /// List the declared cases
    List(ListArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Root URL of the target service
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Registry file (YAML or JSON); defaults to the built-in catalogue
    #[arg(short, long)]
    pub registry: Option<String>,

    /// Run only the named suite
    #[arg(short, long)]
    pub suite: Option<String>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Execute independent suites concurrently
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of concurrent suites (when parallel)
    #[arg(short, long, default_value = "4")]
    pub concurrent: usize,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Login username
    #[arg(long)]
    pub username: Option<String>,

    /// Login password
    #[arg(long)]
    pub password: Option<String>,

    /// Configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Save results to file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show method and path for each case
    #[arg(short, long)]
    pub detailed: bool,

    /// Registry file (YAML or JSON); defaults to the built-in catalogue
    #[arg(short, long)]
    pub registry: Option<String>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "./api-harness.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show {
        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the file; defaults to the discovered location
        file: Option<String>,
    },

    /// Show supported environment variables
    Env,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["api-harness", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => {
                assert!(list_args.detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_run_args() {
        let args = Args::parse_from([
            "api-harness",
            "run",
            "--base-url",
            "http://10.0.0.5:9090",
            "--parallel",
            "--concurrent",
            "8",
        ]);
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(run_args.base_url.as_deref(), Some("http://10.0.0.5:9090"));
                assert!(run_args.parallel);
                assert_eq!(run_args.concurrent, 8);
                assert_eq!(run_args.format, "table");
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_config_init_args() {
        let args = Args::parse_from(["api-harness", "config", "init", "--force"]);
        match args.command {
            Command::Config(config_args) => match config_args.action {
                ConfigAction::Init { output, force } => {
                    assert_eq!(output, "./api-harness.yaml");
                    assert!(force);
                }
                _ => panic!("Expected Init action"),
            },
            _ => panic!("Expected Config command"),
        }
    }
}

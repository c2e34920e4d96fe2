//! api-harness - HTTP API Contract Verification Harness
//!
//! A CLI tool that exercises a REST API surface end-to-end, records
//! pass/fail outcomes per declared case, and exits non-zero when anything
//! failed so CI can gate on the result.
//!
//! ## Features
//!
//! - Declarative case registry (built-in catalogue or YAML/JSON file)
//! - One shared authentication session per run, with fail-open degradation
//!   to a placeholder token when login fails
//! - Per-request timeout and transport failure classification
//! - Multiple output formats (Table, JSON, CSV)
//! - Optional bounded concurrency across suites
//!
//! ## Usage
//!
//! ```bash
//! # Run the full catalogue against a target
//! api-harness run --base-url http://localhost:9090
//!
//! # Run one suite from a registry file, JSON output
//! api-harness run --registry cases.yaml --suite metadata --format json
//!
//! # List declared cases
//! api-harness list --detailed
//!
//! # Write an example configuration
//! api-harness config init
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod catalog;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod session;
mod utils;

use config::{EnvConfig, HarnessConfig};
use executor::HarnessRunner;
use models::Registry;
use output::{OutputFormat, ResultFormatter};
use utils::LogLevel;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    utils::init_logger(level);

    match args.command {
        cli::Command::Run(run_args) => {
            let exit_code = run_verification(run_args).await?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        cli::Command::List(list_args) => {
            list_cases(list_args)?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args)?;
        }
    }

    Ok(())
}

async fn run_verification(args: cli::RunArgs) -> Result<i32> {
    let env_config = EnvConfig::load();

    let mut config = match args.config.as_ref().or(env_config.config_file.as_ref()) {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::load_default()?,
    };

    // Precedence: file < environment < CLI flags
    env_config.apply_to(&mut config);
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(username) = args.username {
        config.login.username = username;
    }
    if let Some(password) = args.password {
        config.login.password = password;
    }
    if args.parallel {
        config.parallel = true;
        config.max_concurrent = args.concurrent;
    }
    config.validate()?;

    let registry = load_registry(args.registry.as_deref())?;
    let registry = match &args.suite {
        Some(name) => registry
            .only(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown suite: {name}"))?,
        None => registry,
    };

    let format = OutputFormat::from_str(&args.format).unwrap_or(OutputFormat::Table);
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let runner = HarnessRunner::new(config)?;
    let summary = runner.run(&registry).await;

    println!("{}", formatter.format_summary(&summary));

    if let Some(output_path) = &args.output {
        output::write_summary_to_file(output_path, &summary, format)?;
        info!("Results saved to: {}", output_path);
    }

    Ok(summary.exit_code())
}

fn load_registry(path: Option<&str>) -> Result<Registry> {
    match path {
        Some(path) => Registry::load(path),
        None => Ok(catalog::default_registry()),
    }
}

fn list_cases(args: cli::ListArgs) -> Result<()> {
    let registry = load_registry(args.registry.as_deref())?;

    println!("\nDeclared cases ({} total)\n", registry.case_count());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for suite in &registry.suites {
        println!("\n{} ({} cases):", suite.name, suite.len());
        println!("──────────────────────────────────────────────────────────────────────");

        for case in &suite.cases {
            if args.detailed {
                println!(
                    "  {:30} {:6} {}{}",
                    case.name,
                    case.method.as_str(),
                    case.path,
                    if case.auth { "" } else { "  [no auth]" }
                );
            } else {
                println!("  {}", case.name);
            }
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    Ok(())
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    use std::path::Path;

    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            let config = HarnessConfig::example();
            config.save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show { format } => {
            let config = HarnessConfig::load_default()?;
            let output = if format == "json" {
                serde_json::to_string_pretty(&config)?
            } else {
                serde_yaml::to_string(&config)?
            };
            println!("{output}");
        }

        cli::ConfigAction::Validate { file } => {
            let path = file.unwrap_or_else(|| {
                HarnessConfig::find()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_else(|| "./api-harness.yaml".to_string())
            });

            match HarnessConfig::load(&path) {
                Ok(_) => {
                    println!("✓ Configuration file is valid: {path}");
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {path}");
                    println!("  Error: {e}");
                    return Err(e);
                }
            }
        }

        cli::ConfigAction::Env => {
            config::env::print_env_help();
        }
    }

    Ok(())
}

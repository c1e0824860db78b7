use anyhow::Result;
use clap::{Parser, Subcommand};
use lockaudit::{
    analyze_entries,
    config::Config,
    lockfile,
    output::{format_result_to_string, print_result, OutputFormat},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const CHECKS_FAILED: u8 = 1;
    pub const FATAL: u8 = 2;
}

#[derive(Parser)]
#[command(name = "lockaudit")]
#[command(
    author,
    version,
    about = "Check an npm lockfile for supply-chain hygiene problems"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a lockfile
    Check {
        /// Path to package-lock.json
        #[arg(default_value = "package-lock.json")]
        path: PathBuf,

        /// Treat every finding as an error
        #[arg(long)]
        strict: bool,

        /// Allowed registry URL prefix (repeatable, replaces the configured list)
        #[arg(long = "allowed-registry", value_name = "URL")]
        allowed_registries: Vec<String>,

        /// Skip dev-only packages
        #[arg(long)]
        production: bool,

        /// Output format (table, json, sarif)
        #[arg(short, long)]
        format: Option<String>,

        /// Write output to file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::FATAL)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Commands::Check {
            path,
            strict,
            allowed_registries,
            production,
            format,
            output,
        } => {
            let mut config = Config::load_for(&path)?;
            config.strict |= strict;
            config.skip_dev |= production;
            if !allowed_registries.is_empty() {
                config.allowed_registries = allowed_registries;
            }

            let format_str = format.unwrap_or_else(|| config.default_format.clone());
            let format = OutputFormat::from_str(&format_str).map_err(|e| anyhow::anyhow!(e))?;

            run_check(&path, &config, format, output.as_deref())
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_check(
    path: &Path,
    config: &Config,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<u8> {
    let entries = match lockfile::read_path(path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: cannot read lockfile {}: {}", path.display(), e);
            return Ok(exit_codes::FATAL);
        }
    };

    let result = analyze_entries(&entries, config);

    if let Some(file) = output_file {
        let content = format_result_to_string(&result, path, format)?;
        std::fs::write(file, content)?;
        if format == OutputFormat::Table {
            println!("Results written to: {}", file.display());
        }
    } else {
        print_result(&result, path, format)?;
    }

    Ok(if result.passed() {
        exit_codes::SUCCESS
    } else {
        exit_codes::CHECKS_FAILED
    })
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'lockaudit config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}

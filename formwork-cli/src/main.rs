//! formwork CLI - check values against a form definition.
//!
//! Commands:
//! - `formwork check --definition <form.json> [--values <values.json>]`:
//!   build the form, apply the values and print every error message
//! - `formwork types`: list the registered component types
//!
//! Exit codes:
//! - 0: Success (form valid)
//! - 1: Error
//! - 2: Form invalid

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formwork::config::{ErrorReporting, FormConfig};
use formwork::definition::FormDefinition;
use formwork::registry::ComponentRegistry;
use formwork::{Form, FormBuilder, FormValue};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Exit code returned when the form has validation errors.
const INVALID_EXIT_CODE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "formwork", version, about = "Validate values against a form definition")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a form, apply values and report errors
    Check {
        /// Form definition (JSON with a `components` array)
        #[arg(short, long)]
        definition: PathBuf,

        /// Values to apply (JSON object keyed by field key)
        #[arg(short = 'V', long)]
        values: Option<PathBuf>,

        /// Engine configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report every failed rule instead of the first per control
        #[arg(long)]
        all_errors: bool,

        /// Print the resulting form value as JSON
        #[arg(long)]
        print_value: bool,
    },
    /// List the registered component types
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Check {
            definition,
            values,
            config,
            all_errors,
            print_value,
        } => {
            let mut config = match config {
                Some(path) => read_json::<FormConfig>(&path)?,
                None => FormConfig::default(),
            };
            if all_errors {
                config.error_reporting = ErrorReporting::All;
            }

            let definition = read_json::<FormDefinition>(&definition)?;
            let values = values.map(|path| read_json::<FormValue>(&path)).transpose()?;
            let form = check(&definition, values.as_ref(), config)?;

            for message in form.errors() {
                println!("{}", message);
            }
            if print_value {
                println!("{}", serde_json::to_string_pretty(&form.value())?);
            }

            if form.is_valid() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(INVALID_EXIT_CODE))
            }
        }
        Command::Types => {
            for tag in ComponentRegistry::with_builtins().tags() {
                println!("{}", tag);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Build the form and apply the values.
fn check(definition: &FormDefinition, values: Option<&FormValue>, config: FormConfig) -> Result<Form> {
    let mut form = FormBuilder::new()
        .config(config)
        .build(definition)
        .context("invalid form definition")?;
    if let Some(values) = values {
        form.patch_value(values).context("values do not fit the form")?;
    }
    log::debug!(
        "checked {} field(s), valid: {}",
        form.len(),
        form.is_valid()
    );
    Ok(form)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

//! Restproxy Code Generator
//!
//! Generates REST proxy methods from TOML or JSON proxy definitions.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use restproxy_gen::config::load_definition;
use restproxy_gen::errors::GeneratorError;
use restproxy_gen::output::{generate_and_write, generate_and_write_all};
use restproxy_gen::validation::validate_definition;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Restproxy code generator - turns proxy definitions into REST proxy methods
#[derive(Parser, Debug)]
#[command(name = "restproxy-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Proxy definition file(s) (.toml or .json)
    #[arg(short, long, required = true, num_args = 1..)]
    definition: Vec<PathBuf>,

    /// Output directory for generated code
    #[arg(short, long, default_value = "src/proxies")]
    output: PathBuf,

    /// Also write a mod.rs declaring every generated module
    #[arg(long)]
    with_mod: bool,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();

    // RUST_LOG overrides -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(output = %cli.output.display(), dry_run = cli.dry_run, "starting generation");

    let definitions = cli
        .definition
        .iter()
        .map(|path| {
            let definition = load_definition(path)?;
            validate_definition(&definition)?;
            for method in &definition.methods {
                debug!(
                    proxy = %definition.name,
                    method = %method.name,
                    http_method = ?method.http_method,
                    path = %method.raw_path(),
                    "validated method"
                );
            }
            Ok(definition)
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    let written = if cli.with_mod {
        let refs: Vec<_> = definitions.iter().collect();
        generate_and_write_all(&refs, &cli.output, cli.dry_run)?.len()
    } else {
        for definition in &definitions {
            generate_and_write(definition, &cli.output, cli.dry_run)?;
        }
        definitions.len()
    };

    if !cli.dry_run {
        eprintln!(
            "{} {} file(s) to {}",
            "Generated".green().bold(),
            written,
            cli.output.display()
        );
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use testnet_topology::config_loader::{self, Format};
use testnet_topology::networks::{validate_all, Variant};
use testnet_topology::utils::validation::{validate, Violation};

/// Topology descriptions for permissioned-ledger integration test networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the standard networks and what each derives from
    List,

    /// Render a standard network
    Show {
        /// Network name, e.g. MultiNodeBFT or multi_node_bft
        variant: Variant,

        /// Output format (yaml or json)
        #[arg(short, long, default_value = "yaml")]
        format: Format,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check topology invariants
    Validate {
        /// Standard network to check
        #[arg(conflicts_with_all = ["all", "file"])]
        variant: Option<Variant>,

        /// Check every standard network
        #[arg(long, conflicts_with = "file")]
        all: bool,

        /// Check a topology file (yaml or json)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn report(name: &str, violations: &[Violation]) -> bool {
    if violations.is_empty() {
        println!("{}: ok", name);
        return true;
    }
    println!("{}: {} violation(s)", name, violations.len());
    for violation in violations {
        println!("  - {}", violation);
    }
    false
}

fn run_validate(variant: Option<Variant>, all: bool, file: Option<PathBuf>) -> Result<()> {
    let passed = if let Some(path) = file {
        let config = config_loader::load_config(&path)
            .wrap_err_with(|| format!("Failed to load topology '{}'", path.display()))?;
        report(&path.display().to_string(), &validate(&config))
    } else if let Some(variant) = variant {
        report(variant.name(), &validate(&variant.build()))
    } else {
        if !all {
            warn!("No network given, checking all standard networks");
        }
        let mut passed = true;
        for (variant, violations) in validate_all() {
            passed &= report(variant.name(), &violations);
        }
        passed
    };

    if !passed {
        bail!("Topology validation failed");
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match args.command {
        Command::List => {
            for variant in Variant::ALL {
                match variant.parent() {
                    Some(parent) => println!("{:<24} <- {}", variant.name(), parent.name()),
                    None => println!("{}", variant.name()),
                }
            }
        }
        Command::Show {
            variant,
            format,
            output,
        } => {
            let rendered = config_loader::render(&variant.build(), format)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
                    info!("Wrote {} network to {:?}", variant, path);
                }
                None => print!("{}", rendered),
            }
        }
        Command::Validate { variant, all, file } => run_validate(variant, all, file)?,
    }

    Ok(())
}

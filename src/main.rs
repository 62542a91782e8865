//! mpn-match: part number similarity from the command line.

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mpn_match::{
    cli::{self, exit_codes, CompareOptions},
    config::{self, AppConfig, Validatable},
    SimilarityEngine,
};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mpn-match")]
#[command(version)]
#[command(about = "Score how interchangeable two electronic part numbers are", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  compare --fail-below-minimum scored under the profile minimum
    2  Error occurred

EXAMPLES:
    # Score a pair
    mpn-match compare CRCW060310K0FKEA CRCW080510K0FKEA

    # Show the per-spec breakdown under the design-phase profile
    mpn-match compare IRF530 IRF9530 --profile design-phase --explain

    # Rank replacement candidates
    mpn-match rank LM358DR LM2904DR TL072CP MC1458P --limit 2")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the similarity of two MPNs
    Compare {
        mpn1: String,
        mpn2: String,

        /// Profile for every type: replacement, design-phase, cost-optimization
        #[arg(long)]
        profile: Option<String>,

        /// Show the per-spec breakdown
        #[arg(long)]
        explain: bool,

        /// Emit JSON
        #[arg(long)]
        json: bool,

        /// Exit with code 1 when the score is under the profile minimum
        #[arg(long)]
        fail_below_minimum: bool,
    },

    /// Print the component type of each MPN
    Classify {
        #[arg(required = true)]
        mpns: Vec<String>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank candidate replacements for an MPN, best first
    Rank {
        mpn: String,

        #[arg(required = true)]
        candidates: Vec<String>,

        /// Show at most this many candidates
        #[arg(short, long)]
        limit: Option<usize>,

        /// Profile for every type: replacement, design-phase, cost-optimization
        #[arg(long)]
        profile: Option<String>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List the family calculators in dispatch order
    Calculators,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Generate an example .mpn-match.yaml in the current directory
    Init,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Compare {
            mpn1,
            mpn2,
            profile,
            explain,
            json,
            fail_below_minimum,
        } => {
            let engine = build_engine(cli.config.as_deref(), profile)?;
            let options = CompareOptions {
                explain,
                json,
                fail_below_minimum,
            };
            cli::run_compare(&engine, &mpn1, &mpn2, options, &mut stdout)
        }

        Commands::Classify { mpns, json } => {
            let engine = build_engine(cli.config.as_deref(), None)?;
            cli::run_classify(&engine, &mpns, json, &mut stdout)
        }

        Commands::Rank {
            mpn,
            candidates,
            limit,
            profile,
            json,
        } => {
            let engine = build_engine(cli.config.as_deref(), profile)?;
            cli::run_rank(&engine, &mpn, &candidates, limit, json, &mut stdout)
        }

        Commands::Calculators => {
            let engine = build_engine(cli.config.as_deref(), None)?;
            cli::run_calculators(&engine, &mut stdout)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "mpn-match", &mut stdout);
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = load_config(cli.config.as_deref())?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                write!(stdout, "{yaml}")?;
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let path = PathBuf::from(".mpn-match.yaml");
                if path.exists() {
                    bail!("{} already exists", path.display());
                }
                std::fs::write(&path, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Created {}", path.display());
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Schema { output } => {
                let schema = config::generate_json_schema();
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => writeln!(stdout, "{schema}")?,
                }
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}

/// Load the config file; an explicit `--config` path must exist and parse.
fn load_config(explicit: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>)> {
    match explicit {
        Some(path) => {
            let config = config::load_config_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            Ok((config, Some(path.to_path_buf())))
        }
        None => Ok(config::load_or_default(None)),
    }
}

fn build_engine(explicit: Option<&Path>, profile: Option<String>) -> Result<SimilarityEngine> {
    let (mut config, loaded_from) = load_config(explicit)?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    if let Some(profile) = profile {
        config.merge(&AppConfig::builder().profile(profile).build());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
        bail!("invalid configuration:\n{}", details.join("\n"));
    }

    SimilarityEngine::from_config(&config).context("failed to build similarity engine")
}

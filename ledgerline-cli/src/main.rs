use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ledgerline_core::{Extraction, extract, read_canonical};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::{Config, OutputFormat, default_config_path, init_config, load_config};
use state::{read_input, write_output};

#[derive(Parser, Debug)]
#[command(name = "ledgerline", version, about = "Bank statement text to canonical ledger rows")]
struct Cli {
    /// Config file (default: ~/.ledgerline/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (overrides the configured level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize statement text and emit canonical rows (or the normalized text)
    Extract {
        /// Statement text file; `-` or absent reads stdin
        input: Option<PathBuf>,

        /// Output file; `-` or absent writes stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default from config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Report whether statement text yields structured rows; fails if not
    Check {
        /// Statement text file; `-` or absent reads stdin
        input: Option<PathBuf>,
    },

    /// Read canonical ledger text and print it as JSON
    Import {
        /// Canonical ledger file; `-` reads stdin
        input: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(p) => p,
        None => default_config_path()?,
    };
    let cfg = load_config(&config_path)?;
    init_logging(&cfg, cli.verbose);
    debug!(path = %config_path.display(), "loaded config");

    match cli.command {
        Command::Extract {
            input,
            output,
            format,
            pretty,
        } => {
            let format = format.unwrap_or(cfg.output.format);
            run_extract(&cfg, input.as_deref(), output.as_deref(), format, pretty)?;
        }

        Command::Check { input } => {
            let raw = read_input(input.as_deref())?;
            match extract(&raw) {
                Extraction::Structured { header, records } => {
                    println!("structured: {} records", records.len());
                    if let Some(h) = header {
                        println!("customer: {} ({})", h.name, h.period);
                    }
                }
                Extraction::Unrecognized { .. } => {
                    bail!("unrecognized: no transaction rows found");
                }
            }
        }

        Command::Import { input, pretty } => {
            let text = read_input(Some(input.as_path()))?;
            let extraction = read_canonical(&text)
                .with_context(|| format!("parsing {}", input.display()))?;
            info!(rows = extraction.records().len(), "read canonical ledger");
            let json = render(&extraction, OutputFormat::Json, pretty || cfg.output.pretty)?;
            println!("{json}");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&config_path)?,
            ConfigCommand::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(cfg: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log.level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_extract(
    cfg: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let raw = read_input(input)?;
    let extraction = extract(&raw);

    match &extraction {
        Extraction::Structured { records, .. } => {
            info!(rows = records.len(), "extracted transactions");
        }
        Extraction::Unrecognized { .. } => {
            warn!("no transaction rows found; emitting normalized text");
        }
    }

    let mut rendered = render(&extraction, format, pretty || cfg.output.pretty)?;
    if cfg.output.trailing_newline && !rendered.is_empty() {
        rendered.push('\n');
    }
    write_output(output, &rendered)
}

fn render(extraction: &Extraction, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Canonical => Ok(extraction.render()),
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(extraction).context("serialize extraction")
        }
        OutputFormat::Json => serde_json::to_string(extraction).context("serialize extraction"),
    }
}

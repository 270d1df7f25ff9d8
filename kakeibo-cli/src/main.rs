use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kakeibo_finance::{load_and_normalize, PipelineConfig, YearView};
use kakeibo_ingest::discover_sources;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "kakeibo", version, about = "Household ledger summaries from yearly CSV exports")]
struct Cli {
    /// Log at debug level to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.kakeibo/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ledger table, category totals, and monthly trends for one year
    Show {
        /// Year to show; must be one of the configured years
        #[arg(long)]
        year: i32,

        /// Directory holding the yearly exports
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Fail on category labels with no translation
        #[arg(long)]
        strict: bool,

        /// Keep category labels as exported
        #[arg(long)]
        raw_categories: bool,

        /// Limit number of ledger rows printed (default: 20)
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Print the year view as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the export file found for each configured year
    Years {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Write the config file (default: ~/.kakeibo/config.toml) with defaults if it does not exist
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Show {
            year,
            data_dir,
            strict,
            raw_categories,
            limit,
            json,
        } => {
            if let Some(dir) = data_dir {
                cfg.data_dir = dir;
            }
            if strict {
                cfg.strict_categories = true;
            }
            if raw_categories {
                cfg.translate_categories = false;
            }
            show(&cfg, year, limit, json)?;
        }

        Command::Years { data_dir } => {
            if let Some(dir) = data_dir {
                cfg.data_dir = dir;
            }
            list_years(&cfg);
        }

        Command::InitConfig => {
            let (path, created) = config::init_config(cli.config.as_deref())?;
            if created {
                println!("Wrote {}", path.display());
            } else {
                println!("Config already exists: {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn show(cfg: &Config, year: i32, limit: usize, json: bool) -> Result<()> {
    if !cfg.years.contains(&year) {
        bail!("year {} is not one of the configured years {:?}", year, cfg.years);
    }

    let sources = discover_sources(&cfg.data_dir, &cfg.years)
        .with_context(|| format!("looking for exports in {}", cfg.data_dir.display()))?;

    let pipeline = PipelineConfig::new(sources)
        .with_columns(cfg.column_map())
        .with_categories(cfg.category_map())
        .with_policy(cfg.policy());

    let ledger = load_and_normalize(&pipeline)?;
    let view = YearView::build(&ledger, year);

    if json {
        println!("{}", serde_json::to_string_pretty(&view).context("serialize view")?);
        return Ok(());
    }

    println!("{}\n", render::title(&view));

    for surface in render::render_view(&view, limit) {
        match surface {
            Ok(text) => println!("{text}"),
            Err(e) => {
                tracing::error!(error = %e, "render failed");
                eprintln!("error: {e}\n");
            }
        }
    }

    Ok(())
}

fn list_years(cfg: &Config) {
    println!("Data directory: {}\n", cfg.data_dir.display());
    for &year in &cfg.years {
        match discover_sources(&cfg.data_dir, &[year]) {
            Ok(found) => {
                for source in found {
                    println!("{}  {}", source.year, source.path.display());
                }
            }
            Err(e) => println!("{year}  (error: {e})"),
        }
    }
}

//! # CLI Layer
//!
//! The only place in the codebase that reads files, the clock and the
//! environment, or writes to stdout.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_logging()`: tracing subscriber on stderr
//! - `init_context()`: Resolves config, today and the query
//! - `load_outline()`: Reads the parsed outline from a file or stdin

use super::query::parse_specs;
use super::render::{JsonAgenda, TerminalAgenda};
use super::setup::Cli;
use agenda::config::AgendaConfig;
use agenda::error::Result;
use agenda::model::{day_number, parse_day_number, DayNumber, Outline};
use agenda::pipeline::{self, AgendaQuery};
use agenda::predicates::PredicateSpec;
use clap::Parser;
use directories::ProjectDirs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

struct AppContext {
    config: AgendaConfig,
    today: DayNumber,
    query: AgendaQuery,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;
    let outline = load_outline(&cli.file)?;
    info!(
        headlines = outline.len(),
        today = ctx.today,
        "building agenda"
    );

    let decorator = ctx.config.decorator(ctx.today);
    let renderer = ctx.config.renderer();

    let output = if cli.json {
        pipeline::run(&outline, &ctx.query, &decorator, &renderer, &mut JsonAgenda)??
    } else {
        let use_color = !cli.no_color && richtext::stdout_supports_color();
        let mut sink = TerminalAgenda::new(use_color);
        pipeline::run(&outline, &ctx.query, &decorator, &renderer, &mut sink)?
    };

    print!("{}", output);
    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug for this crate with `-v`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "agenda=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = match config_dir(cli) {
        Some(dir) => {
            debug!(dir = %dir.display(), "loading config");
            AgendaConfig::load(&dir)?
        }
        None => AgendaConfig::default(),
    };

    let today = match &cli.today {
        Some(text) => parse_day_number(text)?,
        None => day_number(chrono::Local::now().date_naive()),
    };

    let match_specs = if cli.matches.is_empty() {
        vec![PredicateSpec::todo()]
    } else {
        parse_specs(&cli.matches, today)?
    };
    let filter_specs = parse_specs(&cli.excludes, today)?;

    Ok(AppContext {
        config,
        today,
        query: AgendaQuery::new(match_specs, filter_specs),
    })
}

fn config_dir(cli: &Cli) -> Option<PathBuf> {
    if let Some(dir) = &cli.config {
        return Some(dir.clone());
    }
    ProjectDirs::from("org", "agenda", "agenda").map(|dirs| dirs.config_dir().to_path_buf())
}

fn load_outline(path: &Path) -> Result<Outline> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

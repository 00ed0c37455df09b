use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agenda", bin_name = "agenda", version)]
#[command(about = "Filtered, styled agenda view over a parsed outline", long_about = None)]
pub struct Cli {
    /// Parsed outline as JSON ("-" reads stdin)
    pub file: PathBuf,

    /// Include headlines matching this predicate (repeatable, OR-combined)
    #[arg(short, long = "match", value_name = "SPEC")]
    pub matches: Vec<String>,

    /// Exclude headlines matching this predicate (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "SPEC")]
    pub excludes: Vec<String>,

    /// Date treated as today (YYYY-MM-DD), defaults to the local date
    #[arg(long, value_name = "DATE")]
    pub today: Option<String>,

    /// Directory holding config.json
    #[arg(long, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

//! # CLI Behavior
//!
//! This is **one possible client** of the agenda pipeline, not the application
//! itself. It is the only place that knows about files, the clock, terminal
//! output and exit codes.
//!
//! ## Input
//!
//! `agenda <FILE>` reads an outline that an external parser has already turned
//! into JSON (`-` reads stdin). The core never parses outline text itself.
//!
//! ## Queries
//!
//! `--match` and `--exclude` take small predicate expressions, see [`query`]:
//!
//! ```text
//! agenda notes.json --match todo --exclude todo=DONE
//! agenda notes.json --match 'scheduled<=today' --match 'deadline<2024-02-01'
//! ```
//!
//! With no `--match`, every headline with a todo keyword is shown.
//!
//! ## Today
//!
//! The CLI reads the local date once and passes it down; `--today YYYY-MM-DD`
//! overrides it, which keeps runs reproducible.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, dispatch, logging
//! - `query`: Predicate expression parsing
//! - `render`: Terminal and JSON finalizers
//! - `setup`: Argument parsing via clap
//! - `styles`: Theme for the style tags produced by decoration
//! - `templates`: Output templates

mod commands;
mod query;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;

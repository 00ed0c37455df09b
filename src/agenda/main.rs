//! # Agenda CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! The CLI is one possible finalize collaborator for the agenda pipeline. It
//! reads an outline already parsed to JSON, builds a query from the command line,
//! and prints one styled line per entry (or the entries as JSON).

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

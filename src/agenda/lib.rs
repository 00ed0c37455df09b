//! # Agenda Architecture
//!
//! Agenda builds a **filtered, styled view** over an outline document: pick the
//! headlines you care about, classify them, and turn each into a line of styled
//! text plus structured attributes.
//!
//! Like the rest of the toolchain this is a library that happens to have a CLI
//! client, not the other way round. Parsing outline text and putting lines on a
//! screen both live outside the core.
//!
//! ## The Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Loads the parsed outline, config and query               │
//! │  - Finalizes entries for the terminal (or JSON)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pipeline (pipeline.rs)                                     │
//! │  - filter → decorate → render → Finalize                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stages                                                     │
//! │  - filter.rs: OR match stage, NONE filter stage             │
//! │  - decorate.rs: status + keyword styles, fresh copies       │
//! │  - render.rs: styled line + attribute map                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Predicates (predicates.rs) over the Model (model.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Explicit Inputs
//!
//! From `pipeline.rs` inward, code:
//! - Takes the outline, the query, "today" and the done keywords as arguments
//! - Never reads global configuration or the clock
//! - Never mutates the outline
//! - Never writes to stdout/stderr (it logs through `tracing`)
//!
//! Two runs with the same inputs produce the same entries, and runs with
//! different settings can share one outline across threads.
//!
//! ## Errors
//!
//! A malformed predicate argument or an uncomparable timestamp aborts the whole
//! run with an [`error::AgendaError`]. There are no partial results: a dropped
//! headline would look exactly like a headline that did not match.
//!
//! ## Module Overview
//!
//! - [`model`]: Outline, headlines, timestamps, day numbers
//! - [`predicates`]: Todo and date predicates, [`predicates::PredicateSpec`]
//! - [`filter`]: The tree walk
//! - [`decorate`]: Status classification and style tags
//! - [`attributes`]: Attribute registry and maps
//! - [`render`]: Line composition
//! - [`pipeline`]: Composition root and the [`pipeline::Finalize`] seam
//! - [`config`]: Configuration file
//! - [`error`]: Error types

pub mod attributes;
pub mod config;
pub mod decorate;
pub mod error;
pub mod filter;
pub mod model;
pub mod pipeline;
pub mod predicates;
pub mod render;

//! # Pipeline
//!
//! The composition root: filter → decorate → render → finalize.
//!
//! ```text
//! Outline ──filter──▶ &HeadlineNode* ──decorate──▶ DecoratedNode* ──render──▶ DecoratedEntry*
//!                                                                               │
//!                                                                      Finalize::finalize
//! ```
//!
//! The pipeline is a thin facade. It owns no logic of its own beyond wiring the
//! stages together, and it holds no state between calls: the query, the decorator
//! and the renderer are all passed in. Running it twice on the same inputs gives
//! the same entries.
//!
//! If any predicate fails, the run fails as a whole and the finalizer is never
//! called.

use tracing::debug;

use crate::decorate::Decorator;
use crate::error::Result;
use crate::filter::filter;
use crate::model::Outline;
use crate::predicates::PredicateSpec;
use crate::render::{DecoratedEntry, EntryRenderer};

/// The two predicate lists of an agenda view.
#[derive(Debug, Clone, Default)]
pub struct AgendaQuery {
    pub match_specs: Vec<PredicateSpec>,
    pub filter_specs: Vec<PredicateSpec>,
}

impl AgendaQuery {
    pub fn new(match_specs: Vec<PredicateSpec>, filter_specs: Vec<PredicateSpec>) -> Self {
        Self {
            match_specs,
            filter_specs,
        }
    }

    pub fn matching(mut self, spec: PredicateSpec) -> Self {
        self.match_specs.push(spec);
        self
    }

    pub fn excluding(mut self, spec: PredicateSpec) -> Self {
        self.filter_specs.push(spec);
        self
    }
}

/// Receives the rendered entries of a successful run, as one batch.
pub trait Finalize {
    type Output;

    fn finalize(&mut self, entries: Vec<DecoratedEntry>) -> Self::Output;
}

/// Collects entries unchanged.
#[derive(Debug, Default)]
pub struct CollectEntries;

impl Finalize for CollectEntries {
    type Output = Vec<DecoratedEntry>;

    fn finalize(&mut self, entries: Vec<DecoratedEntry>) -> Self::Output {
        entries
    }
}

/// Runs filter, decoration and rendering.
pub fn build_entries(
    outline: &Outline,
    query: &AgendaQuery,
    decorator: &Decorator,
    renderer: &EntryRenderer,
) -> Result<Vec<DecoratedEntry>> {
    let selected = filter(outline, &query.match_specs, &query.filter_specs)?;

    let decorated: Vec<_> = selected.iter().map(|node| decorator.decorate(node)).collect();
    debug!(count = decorated.len(), "decorated headlines");

    Ok(renderer.render_all(&decorated))
}

/// Runs the whole pipeline and hands the entries to `sink`.
pub fn run<F: Finalize>(
    outline: &Outline,
    query: &AgendaQuery,
    decorator: &Decorator,
    renderer: &EntryRenderer,
    sink: &mut F,
) -> Result<F::Output> {
    let entries = build_entries(outline, query, decorator, renderer)?;
    debug!(count = entries.len(), "finalizing agenda entries");
    Ok(sink.finalize(entries))
}

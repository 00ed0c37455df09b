//! Output templates, embedded at compile time.
//!
//! Templates are minijinja based and receive pre-painted lines: layout and
//! styling of the entry text happen in Rust, templates only arrange lines and
//! style the decorations around them.

pub const AGENDA_TEMPLATE: &str = include_str!("templates/agenda.tmp");

//! # Rendering Module
//!
//! Finalizers that turn a batch of [`DecoratedEntry`] values into output text.
//!
//! Layout (category column width) is computed here because it needs
//! Unicode-aware measuring; the template only arranges lines. Entry text is
//! painted with [`AGENDA_THEME`] before it reaches the template, so the style
//! runs produced by decoration map one to one onto terminal styles.

use super::styles::AGENDA_THEME;
use super::templates::AGENDA_TEMPLATE;
use agenda::attributes::Attributes;
use agenda::error::Result;
use agenda::pipeline::Finalize;
use agenda::render::DecoratedEntry;
use richtext::render_with_color;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

#[derive(Serialize)]
struct LineData {
    category: String,
    padding: String,
    text: String,
}

#[derive(Serialize)]
struct AgendaData {
    lines: Vec<LineData>,
    empty: bool,
    show_category: bool,
}

/// Prints one styled line per entry.
pub struct TerminalAgenda {
    use_color: bool,
}

impl TerminalAgenda {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl Finalize for TerminalAgenda {
    type Output = String;

    fn finalize(&mut self, entries: Vec<DecoratedEntry>) -> String {
        render_agenda(&entries, self.use_color)
    }
}

fn category_label(attributes: &Attributes) -> String {
    attributes
        .get("category")
        .and_then(|v| v.as_text())
        .map(|c| format!("{}:", c))
        .unwrap_or_default()
}

pub fn render_agenda(entries: &[DecoratedEntry], use_color: bool) -> String {
    let labels: Vec<String> = entries
        .iter()
        .map(|e| category_label(&e.attributes))
        .collect();
    let width = labels.iter().map(|l| l.width()).max().unwrap_or(0);

    let lines = entries
        .iter()
        .zip(labels)
        .map(|(entry, category)| LineData {
            padding: " ".repeat(width.saturating_sub(category.width())),
            category,
            text: entry.text.paint(AGENDA_THEME.styles(), use_color),
        })
        .collect();

    let data = AgendaData {
        lines,
        empty: entries.is_empty(),
        show_category: width > 0,
    };

    render_with_color(AGENDA_TEMPLATE, &data, &AGENDA_THEME, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    plain: String,
    #[serde(flatten)]
    entry: &'a DecoratedEntry,
}

/// Emits the entries as a JSON array.
pub struct JsonAgenda;

impl Finalize for JsonAgenda {
    type Output = Result<String>;

    fn finalize(&mut self, entries: Vec<DecoratedEntry>) -> Result<String> {
        let out: Vec<JsonEntry<'_>> = entries
            .iter()
            .map(|entry| JsonEntry {
                plain: entry.plain_text(),
                entry,
            })
            .collect();
        let mut json = serde_json::to_string_pretty(&out)?;
        json.push('\n');
        Ok(json)
    }
}

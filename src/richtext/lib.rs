//! # Richtext - Styled Text Runs
//!
//! A small library for text that carries *named* style annotations, and for turning
//! those annotations into terminal output.
//!
//! ## The Problem
//!
//! Presentation code wants to say "this title is due today" or "this keyword is a
//! TODO" without committing to colors. The colors depend on the terminal, the theme
//! and whether output is piped. Embedding ANSI codes early makes later composition
//! (joining, measuring, serializing) painful.
//!
//! ## The Solution
//!
//! Richtext separates concerns:
//! - **[`StyledText`]** is a sequence of [`Span`]s. Each span is plain characters plus
//!   a list of style tag names. Nothing terminal-specific lives here.
//! - **[`Styles`] / [`Theme`]** map tag names to `console::Style` values.
//! - **Painting** ([`StyledText::paint`]) and **templates** ([`render_with_color`])
//!   apply a theme at the very edge, with color on or off.
//!
//! ## Quick Example
//!
//! ```rust
//! use richtext::{StyledText, Theme};
//! use console::Style;
//!
//! let theme = Theme::new().add("todo", Style::new().red());
//!
//! let line = StyledText::join(
//!     [StyledText::styled("TODO", "todo"), StyledText::plain("Buy milk")],
//!     " ",
//! );
//! assert_eq!(line.plain_text(), "TODO Buy milk");
//! assert_eq!(line.paint(theme.styles(), false), "TODO Buy milk");
//! ```
//!
//! ## Immutability
//!
//! Every operation returns a new value. [`StyledText::with_style`] in particular
//! never touches the receiver, so a source title can be decorated any number of
//! times without accumulating tags.

use console::{Style, Term};
use minijinja::{Environment, Error, Value};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A run of characters sharing the same style tags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<String>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Vec::new(),
        }
    }

    /// Returns true if the span carries the given tag.
    pub fn has_style(&self, name: &str) -> bool {
        self.styles.iter().any(|s| s == name)
    }
}

/// Text made of styled runs.
///
/// Serializes as a list of spans. Deserialization also accepts a bare string,
/// which becomes a single unstyled run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "TextRepr")]
pub struct StyledText {
    spans: Vec<Span>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Plain(String),
    Spans(Vec<Span>),
}

impl Serialize for StyledText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.spans.serialize(serializer)
    }
}

impl From<TextRepr> for StyledText {
    fn from(repr: TextRepr) -> Self {
        match repr {
            TextRepr::Plain(text) => StyledText::plain(text),
            TextRepr::Spans(spans) => StyledText::from_spans(spans),
        }
    }
}

impl StyledText {
    /// Creates an empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_spans(vec![Span::new(text)])
    }

    /// A single run carrying one tag.
    pub fn styled(text: impl Into<String>, name: &str) -> Self {
        Self::plain(text).with_style(name)
    }

    /// Builds a text from spans, dropping empty runs.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self {
            spans: spans.into_iter().filter(|s| !s.text.is_empty()).collect(),
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The characters without any annotation.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Returns a copy with `name` attached to every run.
    ///
    /// A run that already carries the tag is left as is.
    pub fn with_style(&self, name: &str) -> Self {
        let spans = self
            .spans
            .iter()
            .map(|span| {
                let mut span = span.clone();
                if !span.has_style(name) {
                    span.styles.push(name.to_string());
                }
                span
            })
            .collect();
        Self { spans }
    }

    /// True if at least one run carries the tag.
    pub fn has_style(&self, name: &str) -> bool {
        self.spans.iter().any(|s| s.has_style(name))
    }

    /// Appends another text, keeping each side's runs intact.
    pub fn concat(mut self, other: &StyledText) -> Self {
        self.spans.extend(other.spans.iter().cloned());
        self
    }

    /// Joins parts with an unstyled separator. Empty parts are skipped so no
    /// doubled separators appear.
    pub fn join<I>(parts: I, sep: &str) -> Self
    where
        I: IntoIterator<Item = StyledText>,
    {
        let mut out = StyledText::new();
        for part in parts.into_iter().filter(|p| !p.is_empty()) {
            if !out.is_empty() {
                out = out.concat(&StyledText::plain(sep));
            }
            out = out.concat(&part);
        }
        out
    }

    /// Renders the runs for a terminal.
    ///
    /// Each run gets every registered style among its tags, applied in tag
    /// order: attributes combine, and on a conflict (two colors) the later tag
    /// wins. Unknown tags are skipped. With `use_color` off the output is plain
    /// text.
    pub fn paint(&self, styles: &Styles, use_color: bool) -> String {
        if !use_color {
            return self.plain_text();
        }
        self.spans
            .iter()
            .map(|span| {
                // Innermost codes are emitted last, so wrap from the last tag outwards.
                span.styles
                    .iter()
                    .rev()
                    .filter_map(|name| styles.get(name))
                    .fold(span.text.clone(), |text, style| {
                        style.apply_to(text).to_string()
                    })
            })
            .collect()
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        StyledText::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        StyledText::plain(text)
    }
}

/// A collection of named styles.
///
/// # Example
///
/// ```rust
/// use richtext::Styles;
/// use console::Style;
///
/// let styles = Styles::new()
///     .add("error", Style::new().bold().red())
///     .add("dim", Style::new().dim());
///
/// assert!(styles.has("error"));
/// assert_eq!(styles.apply("typo", "Hello"), "Hello");
/// ```
#[derive(Clone, Default)]
pub struct Styles {
    styles: HashMap<String, Style>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style. Returns self for chaining.
    ///
    /// If a style with the same name exists, it is replaced.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Applies a named style to text. Unknown names leave the text untouched.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => text.to_string(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// A named collection of styles used when painting text and rendering templates.
#[derive(Clone, Default)]
pub struct Theme {
    styles: Styles,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_styles(styles: Styles) -> Self {
        Self { styles }
    }

    /// Adds a named style, returning an updated theme for chaining.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles = self.styles.add(name, style);
        self
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }
}

/// Returns true when stdout is a terminal that supports colors.
pub fn stdout_supports_color() -> bool {
    Term::stdout().features().colors_supported()
}

/// Renders a template with explicit color control.
///
/// The template gets a `style("name")` filter backed by the theme. With
/// `use_color` off the filter returns its input unchanged.
///
/// ```rust
/// use richtext::{render_with_color, Theme};
/// use console::Style;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Data { status: String }
///
/// let theme = Theme::new().add("ok", Style::new().green());
/// let plain = render_with_color(
///     r#"{{ status | style("ok") }}"#,
///     &Data { status: "done".into() },
///     &theme,
///     false,
/// ).unwrap();
/// assert_eq!(plain, "done");
/// ```
pub fn render_with_color<T: Serialize>(
    template: &str,
    data: &T,
    theme: &Theme,
    use_color: bool,
) -> Result<String, Error> {
    let mut env = Environment::new();
    register_style_filter(&mut env, theme, use_color);

    env.add_template_owned("_inline".to_string(), template.to_string())?;
    let tmpl = env.get_template("_inline")?;
    tmpl.render(data)
}

fn register_style_filter(env: &mut Environment<'static>, theme: &Theme, use_color: bool) {
    let styles = theme.styles.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        if use_color {
            styles.apply(&name, &text)
        } else {
            text
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forced(style: Style) -> Style {
        style.force_styling(true)
    }

    #[test]
    fn plain_text_has_no_styles() {
        let text = StyledText::plain("Buy milk");
        assert_eq!(text.spans().len(), 1);
        assert!(text.spans()[0].styles.is_empty());
        assert_eq!(text.plain_text(), "Buy milk");
    }

    #[test]
    fn with_style_leaves_source_untouched() {
        let source = StyledText::plain("Report");
        let styled = source.with_style("scheduled");

        assert!(!source.has_style("scheduled"));
        assert!(styled.has_style("scheduled"));
        assert_eq!(styled.plain_text(), "Report");
    }

    #[test]
    fn with_style_is_idempotent_per_tag() {
        let twice = StyledText::plain("x").with_style("a").with_style("a");
        assert_eq!(twice.spans()[0].styles, vec!["a".to_string()]);
    }

    #[test]
    fn with_style_covers_every_run() {
        let text = StyledText::from_spans(vec![
            Span::new("Call "),
            Span {
                text: "Bob".into(),
                styles: vec!["bold".into()],
            },
        ])
        .with_style("today");

        assert!(text.spans().iter().all(|s| s.has_style("today")));
        assert_eq!(text.spans()[1].styles, vec!["bold", "today"]);
    }

    #[test]
    fn join_skips_empty_parts() {
        let joined = StyledText::join(
            [
                StyledText::new(),
                StyledText::plain("title"),
                StyledText::new(),
            ],
            " ",
        );
        assert_eq!(joined.plain_text(), "title");
    }

    #[test]
    fn join_keeps_runs_separate() {
        let joined = StyledText::join(
            [StyledText::styled("TODO", "todo"), StyledText::plain("Buy")],
            " ",
        );
        assert_eq!(joined.plain_text(), "TODO Buy");
        assert_eq!(joined.spans().len(), 3);
        assert!(joined.spans()[0].has_style("todo"));
        assert!(!joined.spans()[1].has_style("todo"));
    }

    #[test]
    fn from_spans_drops_empty_runs() {
        let text = StyledText::from_spans(vec![Span::new(""), Span::new("a")]);
        assert_eq!(text.spans().len(), 1);
    }

    #[test]
    fn deserializes_from_bare_string() {
        let text: StyledText = serde_json::from_str(r#""Write report""#).unwrap();
        assert_eq!(text, StyledText::plain("Write report"));
    }

    #[test]
    fn deserializes_from_spans() {
        let text: StyledText =
            serde_json::from_str(r#"[{"text":"a"},{"text":"b","styles":["x"]}]"#).unwrap();
        assert_eq!(text.plain_text(), "ab");
        assert!(text.spans()[1].has_style("x"));
    }

    #[test]
    fn serializes_as_span_list() {
        let json = serde_json::to_string(&StyledText::styled("a", "x")).unwrap();
        assert_eq!(json, r#"[{"text":"a","styles":["x"]}]"#);
    }

    #[test]
    fn paint_without_color_is_plain() {
        let styles = Styles::new().add("todo", forced(Style::new().red()));
        let text = StyledText::styled("TODO", "todo");
        assert_eq!(text.paint(&styles, false), "TODO");
    }

    #[test]
    fn paint_with_color_emits_ansi() {
        let styles = Styles::new().add("bold", forced(Style::new().bold()));
        let painted = StyledText::styled("hello", "bold").paint(&styles, true);
        assert!(painted.contains("hello"));
        assert!(painted.contains("\x1b[1m"));
    }

    #[test]
    fn paint_unknown_tag_is_unstyled() {
        let painted = StyledText::styled("hello", "nope").paint(&Styles::new(), true);
        assert_eq!(painted, "hello");
    }

    #[test]
    fn paint_conflicting_colors_later_tag_wins() {
        let styles = Styles::new()
            .add("red", forced(Style::new().red()))
            .add("green", forced(Style::new().green()));
        let painted = StyledText::plain("x")
            .with_style("red")
            .with_style("green")
            .paint(&styles, true);
        let red = painted.find("\x1b[31").unwrap();
        let green = painted.find("\x1b[32").unwrap();
        assert!(green > red);
        assert!(green < painted.find('x').unwrap());
    }

    #[test]
    fn paint_combines_all_known_tags() {
        let styles = Styles::new()
            .add("red", forced(Style::new().red()))
            .add("bold", forced(Style::new().bold()));
        let painted = StyledText::styled("title", "red")
            .with_style("nope")
            .with_style("bold")
            .paint(&styles, true);
        assert!(painted.contains("\x1b[31"));
        assert!(painted.contains("\x1b[1m"));
        assert!(painted.contains("title"));
    }

    #[test]
    fn styles_can_be_replaced() {
        let styles = Styles::new()
            .add("x", Style::new().red())
            .add("x", Style::new().green());
        assert_eq!(styles.len(), 1);
        assert!(styles.has("x"));
    }

    #[test]
    fn render_template_without_color() {
        #[derive(Serialize)]
        struct Data {
            items: Vec<String>,
        }

        let theme = Theme::new().add("item", Style::new().cyan());
        let output = render_with_color(
            r#"{% for item in items %}{{ item | style("item") }}
{% endfor %}"#,
            &Data {
                items: vec!["one".into(), "two".into()],
            },
            &theme,
            false,
        )
        .unwrap();
        assert_eq!(output, "one\ntwo\n");
    }

    #[test]
    fn render_template_with_color() {
        #[derive(Serialize)]
        struct Data {
            message: String,
        }

        let theme = Theme::new().add("green", forced(Style::new().green()));
        let output = render_with_color(
            r#"{{ message | style("green") }}"#,
            &Data {
                message: "ok".into(),
            },
            &theme,
            true,
        )
        .unwrap();
        assert!(output.contains("\x1b["));
    }

    #[test]
    fn render_template_syntax_error() {
        #[derive(Serialize)]
        struct Empty {}

        let result = render_with_color("{{ unclosed", &Empty {}, &Theme::new(), false);
        assert!(result.is_err());
    }
}

//! Entry rendering.
//!
//! Joins the styled pieces of a [`DecoratedNode`] into one line of
//! [`StyledText`] and attaches the entry's [`Attributes`] beside it:
//!
//! ```text
//! TODO Buy milk :home:errand:
//! ^^^^ ^^^^^^^^ ^^^^^^^^^^^^^
//! kw   title    tags (tag style)
//! ```
//!
//! Missing pieces are dropped together with their separator, so an entry with no
//! keyword and no tags is just its title. Style runs from decoration survive the
//! join unchanged. The renderer neither filters nor reorders.

use richtext::StyledText;
use serde::Serialize;

use crate::attributes::Attributes;
use crate::decorate::DecoratedNode;

pub const DEFAULT_TAG_STYLE: &str = "agenda-tags";

/// A rendered line plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedEntry {
    pub text: StyledText,
    pub attributes: Attributes,
}

impl DecoratedEntry {
    pub fn plain_text(&self) -> String {
        self.text.plain_text()
    }
}

#[derive(Debug, Clone)]
pub struct EntryRenderer {
    tag_style: String,
}

impl Default for EntryRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_STYLE)
    }
}

impl EntryRenderer {
    pub fn new(tag_style: &str) -> Self {
        Self {
            tag_style: tag_style.to_string(),
        }
    }

    pub fn render(&self, node: &DecoratedNode) -> DecoratedEntry {
        let tags = format_tags(&node.tags).map(|t| StyledText::styled(t, &self.tag_style));

        let text = StyledText::join(
            [node.todo_styled.clone(), Some(node.title.clone()), tags]
                .into_iter()
                .flatten(),
            " ",
        );

        DecoratedEntry {
            text,
            attributes: Attributes::from_node(node),
        }
    }

    pub fn render_all(&self, nodes: &[DecoratedNode]) -> Vec<DecoratedEntry> {
        nodes.iter().map(|node| self.render(node)).collect()
    }
}

/// `["a", "b"]` becomes `:a:b:`; no tags means no tag text at all.
pub fn format_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(format!(":{}:", tags.join(":")))
    }
}

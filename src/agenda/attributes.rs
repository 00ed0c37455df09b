//! # Entry Attributes
//!
//! Every rendered entry carries an attribute map next to its text, for consumers
//! that want structured data rather than characters.
//!
//! The map is built fresh for each entry from the known fields of a
//! [`DecoratedNode`]; it is never copied from an upstream property list. Two rules
//! hold for every map:
//!
//! - keys are bare names. Outline tools often mark property keys with a leading
//!   `:` (`:scheduled`); [`normalize_key`] strips it on the way in.
//! - there is no `parent` key. Links back into the tree would make the map cyclic
//!   and drag the whole outline along with every entry.
//!
//! ## Registered Attributes
//!
//! | Name | Kind | Present when |
//! |------|------|--------------|
//! | `level` | `Int` | always |
//! | `title` | `Text` | always (plain characters) |
//! | `tags` | `List` | always (may be empty) |
//! | `todo-keyword` | `Text` | headline has a keyword |
//! | `todo-type` | `Text` | headline has a keyword (`todo` / `done`) |
//! | `priority` | `Text` | headline has a priority cookie |
//! | `scheduled` | `Timestamp` | headline is scheduled |
//! | `deadline` | `Timestamp` | headline has a deadline |
//! | `category` | `Text` | headline has a category |
//! | `status` | `Text` | decoration assigned a status |

use serde::Serialize;
use std::collections::BTreeMap;

use crate::decorate::DecoratedNode;
use crate::model::Timestamp;

/// Leading marker some sources put on attribute names.
pub const KEY_PREFIX: char = ':';

/// Name that is never allowed into an attribute map.
pub const PARENT_KEY: &str = "parent";

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Int,
    Text,
    List,
    Timestamp,
}

#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub kind: AttributeKind,
}

impl AttributeSpec {
    const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self { name, kind }
    }
}

/// Registry of entry attributes.
pub const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new("level", AttributeKind::Int),
    AttributeSpec::new("title", AttributeKind::Text),
    AttributeSpec::new("tags", AttributeKind::List),
    AttributeSpec::new("todo-keyword", AttributeKind::Text),
    AttributeSpec::new("todo-type", AttributeKind::Text),
    AttributeSpec::new("priority", AttributeKind::Text),
    AttributeSpec::new("scheduled", AttributeKind::Timestamp),
    AttributeSpec::new("deadline", AttributeKind::Timestamp),
    AttributeSpec::new("category", AttributeKind::Text),
    AttributeSpec::new("status", AttributeKind::Text),
];

/// Look up an attribute spec by name (prefix marker allowed).
pub fn get_spec(name: &str) -> Option<&'static AttributeSpec> {
    let name = normalize_key(name);
    ATTRIBUTES.iter().find(|spec| spec.name == name)
}

/// Strips the leading key marker, if any.
pub fn normalize_key(key: &str) -> &str {
    key.trim_start_matches(KEY_PREFIX)
}

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Text(String),
    List(Vec<String>),
    Timestamp(Timestamp),
}

impl AttrValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttrValue::Int(_) => AttributeKind::Int,
            AttrValue::Text(_) => AttributeKind::Text,
            AttrValue::List(_) => AttributeKind::List,
            AttrValue::Timestamp(_) => AttributeKind::Timestamp,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            AttrValue::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

/// Attribute map attached to a rendered entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    values: BTreeMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from a decorated node's fields.
    pub fn from_node(node: &DecoratedNode) -> Self {
        let mut attrs = Attributes::new();
        attrs.insert("level", AttrValue::Int(node.level as i64));
        attrs.insert("title", AttrValue::Text(node.title.plain_text()));
        attrs.insert("tags", AttrValue::List(node.tags.clone()));

        if let Some(keyword) = &node.todo_keyword {
            attrs.insert("todo-keyword", AttrValue::Text(keyword.clone()));
            let todo_type = if node.is_done { "done" } else { "todo" };
            attrs.insert("todo-type", AttrValue::Text(todo_type.into()));
        }
        if let Some(priority) = node.priority {
            attrs.insert("priority", AttrValue::Text(priority.to_string()));
        }
        if let Some(scheduled) = &node.scheduled {
            attrs.insert("scheduled", AttrValue::Timestamp(scheduled.clone()));
        }
        if let Some(deadline) = &node.deadline {
            attrs.insert("deadline", AttrValue::Timestamp(deadline.clone()));
        }
        if let Some(category) = &node.category {
            attrs.insert("category", AttrValue::Text(category.clone()));
        }
        if let Some(status) = node.status {
            attrs.insert("status", AttrValue::Text(status.as_str().into()));
        }
        attrs
    }

    /// Inserts under the normalized key. Returns false, inserting nothing, for
    /// `parent` and for keys that are empty once normalized.
    pub fn insert(&mut self, key: &str, value: AttrValue) -> bool {
        let key = normalize_key(key);
        if key.is_empty() || key == PARENT_KEY {
            return false;
        }
        self.values.insert(key.to_string(), value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(normalize_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

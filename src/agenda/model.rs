//! # Domain Model: Outline Trees
//!
//! This module defines the input shape handed over by the outline parser:
//! an [`Outline`] holding a forest of [`HeadlineNode`]s.
//!
//! ## Ownership
//!
//! The tree is a strict hierarchy. Each node owns its `children`; there is no
//! back-reference to the parent. Code that needs ancestor context (error messages,
//! for instance) carries it down the call stack while walking, see
//! [`crate::filter`]. This keeps the tree acyclic and cheap to clone or serialize.
//!
//! ## Dates and Day Numbers
//!
//! Dates are compared as *absolute day numbers*: days since 0001-01-01 in the
//! proleptic Gregorian calendar (day 1 is that date). Node timestamps, textual
//! target dates and the caller's notion of "today" all go through
//! [`day_number`], so any two of them compare directly. Time of day never takes
//! part in a comparison.
//!
//! Only `active` and `inactive` timestamps have a day number. Ranges and diary
//! sexps are carried through unchanged but cannot be compared.

use chrono::{Datelike, NaiveDate, NaiveTime};
use richtext::StyledText;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AgendaError, Result};

/// Days since 0000-12-31, so that 0001-01-01 is day 1.
pub type DayNumber = i64;

/// Converts a calendar date to its absolute day number.
pub fn day_number(date: NaiveDate) -> DayNumber {
    date.num_days_from_ce() as DayNumber
}

/// Parses a textual date into an absolute day number.
///
/// Accepts `YYYY-MM-DD`, optionally wrapped in `<...>` or `[...]` and optionally
/// followed by a weekday and/or time, which are ignored (midnight is assumed).
pub fn parse_day_number(text: &str) -> Result<DayNumber> {
    let trimmed = text
        .trim()
        .trim_start_matches(['<', '['])
        .trim_end_matches(['>', ']']);
    let date_part = trimmed.split_whitespace().next().unwrap_or_default();

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(day_number)
        .map_err(|_| {
            AgendaError::InvalidArgument(format!("expected a YYYY-MM-DD date, got {:?}", text))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampKind {
    Active,
    Inactive,
    ActiveRange,
    InactiveRange,
    Diary,
}

impl TimestampKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampKind::Active => "active",
            TimestampKind::Inactive => "inactive",
            TimestampKind::ActiveRange => "active-range",
            TimestampKind::InactiveRange => "inactive-range",
            TimestampKind::Diary => "diary",
        }
    }

    /// True for the kinds that convert to a single day number.
    pub fn is_comparable(&self) -> bool {
        matches!(self, TimestampKind::Active | TimestampKind::Inactive)
    }
}

impl fmt::Display for TimestampKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub kind: TimestampKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
}

impl Timestamp {
    pub fn new(kind: TimestampKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            time: None,
        }
    }

    pub fn active(date: NaiveDate) -> Self {
        Self::new(TimestampKind::Active, date)
    }

    pub fn inactive(date: NaiveDate) -> Self {
        Self::new(TimestampKind::Inactive, date)
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The absolute day number of this timestamp.
    ///
    /// Fails with [`AgendaError::UnsupportedDateKind`] for ranges and diary entries.
    pub fn day_number(&self) -> Result<DayNumber> {
        if self.kind.is_comparable() {
            Ok(day_number(self.date))
        } else {
            Err(AgendaError::UnsupportedDateKind(self.kind.to_string()))
        }
    }

    /// Day number when the kind supports it, `None` otherwise.
    pub fn comparable_day(&self) -> Option<DayNumber> {
        self.day_number().ok()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.kind {
            TimestampKind::Inactive | TimestampKind::InactiveRange => ('[', ']'),
            _ => ('<', '>'),
        };
        write!(f, "{}{}", open, self.date.format("%Y-%m-%d %a"))?;
        if let Some(time) = self.time {
            write!(f, " {}", time.format("%H:%M"))?;
        }
        write!(f, "{}", close)
    }
}

/// Which of a headline's planning dates a predicate looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    Scheduled,
    Deadline,
}

impl DateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateType::Scheduled => "scheduled",
            DateType::Deadline => "deadline",
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One headline of the outline, together with its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineNode {
    pub level: u32,
    pub title: StyledText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<char>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub children: Vec<HeadlineNode>,
}

impl HeadlineNode {
    pub fn new(level: u32, title: impl Into<StyledText>) -> Self {
        Self {
            level,
            title: title.into(),
            todo_keyword: None,
            priority: None,
            tags: Vec::new(),
            scheduled: None,
            deadline: None,
            category: None,
            children: Vec::new(),
        }
    }

    pub fn with_todo(mut self, keyword: &str) -> Self {
        self.todo_keyword = Some(keyword.to_string());
        self
    }

    pub fn with_priority(mut self, priority: char) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scheduled(mut self, timestamp: Timestamp) -> Self {
        self.scheduled = Some(timestamp);
        self
    }

    pub fn with_deadline(mut self, timestamp: Timestamp) -> Self {
        self.deadline = Some(timestamp);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_child(mut self, child: HeadlineNode) -> Self {
        self.children.push(child);
        self
    }

    /// The planning date of the requested type, if any.
    pub fn date(&self, date_type: DateType) -> Option<&Timestamp> {
        match date_type {
            DateType::Scheduled => self.scheduled.as_ref(),
            DateType::Deadline => self.deadline.as_ref(),
        }
    }

    /// Title characters without styling.
    pub fn raw_title(&self) -> String {
        self.title.plain_text()
    }
}

/// A parsed outline document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub headlines: Vec<HeadlineNode>,
}

impl Outline {
    pub fn new(headlines: Vec<HeadlineNode>) -> Self {
        Self { headlines }
    }

    /// Every headline in document order: depth-first, parents before children.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.headlines.iter().rev().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.walk().count()
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }
}

/// Pre-order iterator over an [`Outline`].
pub struct Walk<'a> {
    stack: Vec<&'a HeadlineNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a HeadlineNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

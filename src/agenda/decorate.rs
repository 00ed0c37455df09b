//! # Decoration
//!
//! Turns a selected [`HeadlineNode`] into a [`DecoratedNode`]: a fresh value that
//! holds only what rendering needs, with style tags attached.
//!
//! ## Status
//!
//! Headlines scheduled on an `active` or `inactive` timestamp get a status:
//!
//! | Condition                              | Status                       |
//! |----------------------------------------|------------------------------|
//! | keyword is a done keyword              | [`EntryStatus::Done`]        |
//! | scheduled day is today                 | [`EntryStatus::DueToday`]    |
//! | any other day, past or future          | [`EntryStatus::Scheduled`]   |
//!
//! The status tag is attached to the title runs only. Headlines without a usable
//! scheduled date keep their title as is.
//!
//! ## Keyword Styles
//!
//! The todo keyword is looked up in the keyword style table. A hit tags the
//! keyword copy; a miss leaves it unstyled.
//!
//! ## Inputs
//!
//! "Today" and the done keyword set are fields of [`Decorator`], set by the caller
//! for each run. Nothing is read from process-wide state, so two decorators with
//! different settings can work on the same outline at the same time.

use std::collections::{BTreeMap, BTreeSet};

use richtext::StyledText;
use serde::Serialize;

use crate::model::{DayNumber, HeadlineNode, Timestamp};

pub const DONE_STYLE: &str = "agenda-done";
pub const TODAY_STYLE: &str = "agenda-today";
pub const SCHEDULED_STYLE: &str = "agenda-scheduled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryStatus {
    Done,
    DueToday,
    Scheduled,
}

impl EntryStatus {
    pub fn style_name(&self) -> &'static str {
        match self {
            EntryStatus::Done => DONE_STYLE,
            EntryStatus::DueToday => TODAY_STYLE,
            EntryStatus::Scheduled => SCHEDULED_STYLE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Done => "done",
            EntryStatus::DueToday => "due-today",
            EntryStatus::Scheduled => "scheduled",
        }
    }
}

/// A decorated copy of a headline.
///
/// Holds no children and no link back into the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedNode {
    pub level: u32,
    pub title: StyledText,
    pub todo_keyword: Option<String>,
    pub todo_styled: Option<StyledText>,
    pub is_done: bool,
    pub priority: Option<char>,
    pub tags: Vec<String>,
    pub scheduled: Option<Timestamp>,
    pub deadline: Option<Timestamp>,
    pub category: Option<String>,
    pub status: Option<EntryStatus>,
}

/// Per-run decoration settings.
#[derive(Debug, Clone)]
pub struct Decorator {
    today: DayNumber,
    done_keywords: BTreeSet<String>,
    keyword_styles: BTreeMap<String, String>,
}

impl Decorator {
    pub fn new<I, T>(today: DayNumber, done_keywords: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            today,
            done_keywords: done_keywords.into_iter().map(Into::into).collect(),
            keyword_styles: BTreeMap::new(),
        }
    }

    /// Sets the keyword → style tag table.
    pub fn with_keyword_styles(mut self, styles: BTreeMap<String, String>) -> Self {
        self.keyword_styles = styles;
        self
    }

    pub fn today(&self) -> DayNumber {
        self.today
    }

    pub fn is_done_keyword(&self, keyword: &str) -> bool {
        self.done_keywords.contains(keyword)
    }

    /// Status of a headline, or `None` without a comparable scheduled date.
    pub fn status(&self, node: &HeadlineNode) -> Option<EntryStatus> {
        let scheduled_day = node.scheduled.as_ref()?.comparable_day()?;

        let status = if node
            .todo_keyword
            .as_deref()
            .is_some_and(|k| self.is_done_keyword(k))
        {
            EntryStatus::Done
        } else if scheduled_day == self.today {
            EntryStatus::DueToday
        } else {
            EntryStatus::Scheduled
        };
        Some(status)
    }

    /// Style tag for a keyword, if one is configured.
    pub fn keyword_style(&self, keyword: &str) -> Option<&str> {
        self.keyword_styles.get(keyword).map(String::as_str)
    }

    /// Builds the decorated copy. `node` is only read.
    pub fn decorate(&self, node: &HeadlineNode) -> DecoratedNode {
        let status = self.status(node);
        let title = match status {
            Some(status) => node.title.with_style(status.style_name()),
            None => node.title.clone(),
        };

        let todo_styled = node.todo_keyword.as_deref().map(|keyword| {
            let text = StyledText::plain(keyword);
            match self.keyword_style(keyword) {
                Some(style) => text.with_style(style),
                None => text,
            }
        });

        DecoratedNode {
            level: node.level,
            title,
            todo_keyword: node.todo_keyword.clone(),
            todo_styled,
            is_done: node
                .todo_keyword
                .as_deref()
                .is_some_and(|k| self.is_done_keyword(k)),
            priority: node.priority,
            tags: node.tags.clone(),
            scheduled: node.scheduled.clone(),
            deadline: node.deadline.clone(),
            category: node.category.clone(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{day_number, TimestampKind};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn decorator() -> Decorator {
        Decorator::new(day_number(date("2024-01-10")), ["DONE"]).with_keyword_styles(
            BTreeMap::from([
                ("TODO".to_string(), "todo".to_string()),
                ("DONE".to_string(), "done".to_string()),
            ]),
        )
    }

    fn scheduled(keyword: &str, day: &str) -> HeadlineNode {
        HeadlineNode::new(2, "Task")
            .with_todo(keyword)
            .with_scheduled(Timestamp::active(date(day)))
    }

    #[test]
    fn status_classification() {
        let d = decorator();
        assert_eq!(d.status(&scheduled("DONE", "2024-01-05")), Some(EntryStatus::Done));
        assert_eq!(
            d.status(&scheduled("TODO", "2024-01-10")),
            Some(EntryStatus::DueToday)
        );
        assert_eq!(
            d.status(&scheduled("TODO", "2024-01-20")),
            Some(EntryStatus::Scheduled)
        );
        assert_eq!(
            d.status(&scheduled("TODO", "2024-01-01")),
            Some(EntryStatus::Scheduled)
        );
    }

    #[test]
    fn done_wins_over_today() {
        assert_eq!(
            decorator().status(&scheduled("DONE", "2024-01-10")),
            Some(EntryStatus::Done)
        );
    }

    #[test]
    fn no_status_without_usable_schedule() {
        let d = decorator();
        assert_eq!(d.status(&HeadlineNode::new(1, "x").with_todo("TODO")), None);

        let diary = HeadlineNode::new(1, "x")
            .with_scheduled(Timestamp::new(TimestampKind::Diary, date("2024-01-10")));
        assert_eq!(d.status(&diary), None);
        assert_eq!(d.decorate(&diary).title, diary.title);
    }

    #[test]
    fn inactive_schedule_counts() {
        let node = HeadlineNode::new(1, "x").with_scheduled(Timestamp::inactive(date("2024-01-10")));
        assert_eq!(decorator().status(&node), Some(EntryStatus::DueToday));
    }

    #[test]
    fn status_tag_goes_on_title_only() {
        let decorated = decorator().decorate(&scheduled("TODO", "2024-01-10"));
        assert!(decorated.title.has_style(TODAY_STYLE));
        let keyword = decorated.todo_styled.unwrap();
        assert!(!keyword.has_style(TODAY_STYLE));
        assert!(keyword.has_style("todo"));
    }

    #[test]
    fn unmapped_keyword_is_unstyled_copy() {
        let decorated = decorator().decorate(&HeadlineNode::new(1, "x").with_todo("WAITING"));
        let keyword = decorated.todo_styled.unwrap();
        assert_eq!(keyword, StyledText::plain("WAITING"));
    }

    #[test]
    fn no_keyword_means_no_keyword_text() {
        let decorated = decorator().decorate(&HeadlineNode::new(1, "Notes"));
        assert!(decorated.todo_styled.is_none());
        assert!(!decorated.is_done);
    }

    #[test]
    fn decorate_is_pure() {
        let node = scheduled("TODO", "2024-01-20").with_tags(["a"]);
        let before = node.clone();
        let d = decorator();

        let first = d.decorate(&node);
        let second = d.decorate(&node);

        assert_eq!(first, second);
        assert_eq!(node, before);
        assert!(!node.title.has_style(SCHEDULED_STYLE));
    }

    #[test]
    fn decorated_copy_carries_fields() {
        let node = scheduled("DONE", "2024-01-05")
            .with_tags(["work", "q1"])
            .with_priority('A')
            .with_category("job")
            .with_child(HeadlineNode::new(3, "child"));

        let decorated = decorator().decorate(&node);
        assert_eq!(decorated.level, 2);
        assert_eq!(decorated.tags, vec!["work", "q1"]);
        assert_eq!(decorated.priority, Some('A'));
        assert_eq!(decorated.category.as_deref(), Some("job"));
        assert!(decorated.is_done);
        assert_eq!(decorated.status, Some(EntryStatus::Done));
    }

    #[test]
    fn separate_decorators_do_not_interfere() {
        let node = scheduled("TODO", "2024-01-10");
        let today = decorator();
        let tomorrow = Decorator::new(day_number(date("2024-01-11")), ["DONE"]);

        assert_eq!(today.status(&node), Some(EntryStatus::DueToday));
        assert_eq!(tomorrow.status(&node), Some(EntryStatus::Scheduled));
    }
}

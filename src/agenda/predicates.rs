//! # Predicate Library
//!
//! Stateless tests evaluated against a single [`HeadlineNode`].
//!
//! Each predicate exists in two forms:
//!
//! - a **typed** function ([`todo`], [`date`]) for Rust callers that know what
//!   they want at compile time, and
//! - an **argument-list** adapter ([`todo_predicate`], [`date_predicate`]) with the
//!   uniform [`PredicateFn`] signature. Adapters validate the shape of their
//!   [`PredicateArg`]s and report malformed input as
//!   [`AgendaError::InvalidArgument`].
//!
//! The filter engine only ever sees [`PredicateSpec`]s: either a bare predicate
//! ([`PredicateSpec::Direct`]) or one with bound arguments
//! ([`PredicateSpec::WithArgs`]) that are passed after the node.
//!
//! Missing data is never an error. A node without a todo keyword simply fails the
//! todo predicate; a node without the requested date fails the date predicate.

use std::fmt;
use std::str::FromStr;

use crate::error::{AgendaError, Result};
use crate::model::{parse_day_number, DateType, DayNumber, HeadlineNode};

/// Uniform predicate signature used by [`PredicateSpec`].
pub type PredicateFn = fn(&HeadlineNode, &[PredicateArg]) -> Result<bool>;

/// A value bound to a predicate through [`PredicateSpec::WithArgs`].
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateArg {
    Text(String),
    List(Vec<String>),
    Int(i64),
    Bool(bool),
    DateType(DateType),
    Comparator(Comparator),
}

impl fmt::Display for PredicateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateArg::Text(s) => write!(f, "{:?}", s),
            PredicateArg::List(items) => write!(f, "{:?}", items),
            PredicateArg::Int(n) => write!(f, "{}", n),
            PredicateArg::Bool(b) => write!(f, "{}", b),
            PredicateArg::DateType(t) => write!(f, ":{}", t),
            PredicateArg::Comparator(c) => write!(f, "{}", c),
        }
    }
}

impl From<&str> for PredicateArg {
    fn from(s: &str) -> Self {
        PredicateArg::Text(s.to_string())
    }
}

impl From<String> for PredicateArg {
    fn from(s: String) -> Self {
        PredicateArg::Text(s)
    }
}

impl From<Vec<String>> for PredicateArg {
    fn from(items: Vec<String>) -> Self {
        PredicateArg::List(items)
    }
}

impl From<i64> for PredicateArg {
    fn from(n: i64) -> Self {
        PredicateArg::Int(n)
    }
}

impl From<DateType> for PredicateArg {
    fn from(t: DateType) -> Self {
        PredicateArg::DateType(t)
    }
}

impl From<Comparator> for PredicateArg {
    fn from(c: Comparator) -> Self {
        PredicateArg::Comparator(c)
    }
}

/// How a predicate is applied by the filter engine.
#[derive(Debug, Clone)]
pub enum PredicateSpec {
    /// Called with the node only.
    Direct(PredicateFn),
    /// Called with the node followed by the bound arguments.
    WithArgs(PredicateFn, Vec<PredicateArg>),
}

impl PredicateSpec {
    pub fn evaluate(&self, node: &HeadlineNode) -> Result<bool> {
        match self {
            PredicateSpec::Direct(predicate) => predicate(node, &[]),
            PredicateSpec::WithArgs(predicate, args) => predicate(node, args),
        }
    }

    /// Any node carrying a todo keyword.
    pub fn todo() -> Self {
        PredicateSpec::Direct(todo_predicate)
    }

    /// Nodes whose keyword is one of `keywords`.
    pub fn todo_in<I, T>(keywords: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let list = keywords.into_iter().map(Into::into).collect::<Vec<String>>();
        PredicateSpec::WithArgs(todo_predicate, vec![PredicateArg::List(list)])
    }

    /// Nodes that have a date of the given type.
    pub fn has_date(date_type: DateType) -> Self {
        PredicateSpec::WithArgs(date_predicate, vec![date_type.into()])
    }

    /// Nodes whose date of the given type compares true against `target`.
    pub fn date(date_type: DateType, comparator: Comparator, target: DateTarget) -> Self {
        PredicateSpec::WithArgs(
            date_predicate,
            vec![date_type.into(), comparator.into(), target.into()],
        )
    }
}

/// Which todo keywords satisfy [`todo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keywords {
    One(String),
    AnyOf(Vec<String>),
}

impl Keywords {
    fn accepts(&self, keyword: &str) -> bool {
        match self {
            Keywords::One(expected) => expected == keyword,
            Keywords::AnyOf(list) => list.iter().any(|k| k == keyword),
        }
    }
}

/// True if the node has a todo keyword, restricted to `keywords` when given.
pub fn todo(node: &HeadlineNode, keywords: Option<&Keywords>) -> bool {
    match (&node.todo_keyword, keywords) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(keyword), Some(wanted)) => wanted.accepts(keyword),
    }
}

/// Argument-list form of [`todo`]: `[]`, `[Text]` or `[List]`.
pub fn todo_predicate(node: &HeadlineNode, args: &[PredicateArg]) -> Result<bool> {
    let keywords = match args {
        [] => None,
        [PredicateArg::Text(one)] => Some(Keywords::One(one.clone())),
        [PredicateArg::List(list)] => Some(Keywords::AnyOf(list.clone())),
        [other] => {
            return Err(AgendaError::InvalidArgument(format!(
                "todo keywords must be a string or a list of strings, got {}",
                other
            )))
        }
        _ => {
            return Err(AgendaError::InvalidArgument(format!(
                "todo predicate takes at most one argument, got {}",
                args.len()
            )))
        }
    };
    Ok(todo(node, keywords.as_ref()))
}

/// Comparison applied as `comparator(node_day, target_day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl Comparator {
    pub fn apply(self, left: DayNumber, right: DayNumber) -> bool {
        match self {
            Comparator::Lt => left < right,
            Comparator::Le => left <= right,
            Comparator::Eq => left == right,
            Comparator::Ne => left != right,
            Comparator::Ge => left >= right,
            Comparator::Gt => left > right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Ge => ">=",
            Comparator::Gt => ">",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparator {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<" => Ok(Comparator::Lt),
            "<=" => Ok(Comparator::Le),
            "=" | "==" => Ok(Comparator::Eq),
            "!=" | "/=" => Ok(Comparator::Ne),
            ">=" => Ok(Comparator::Ge),
            ">" => Ok(Comparator::Gt),
            other => Err(AgendaError::InvalidArgument(format!(
                "{:?} is not a comparison operator",
                other
            ))),
        }
    }
}

/// The date a node is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTarget {
    /// An absolute day number.
    Day(DayNumber),
    /// A `YYYY-MM-DD` date, see [`parse_day_number`].
    Text(String),
}

impl DateTarget {
    pub fn day_number(&self) -> Result<DayNumber> {
        match self {
            DateTarget::Day(day) => Ok(*day),
            DateTarget::Text(text) => parse_day_number(text),
        }
    }
}

impl From<DateTarget> for PredicateArg {
    fn from(target: DateTarget) -> Self {
        match target {
            DateTarget::Day(day) => PredicateArg::Int(day),
            DateTarget::Text(text) => PredicateArg::Text(text),
        }
    }
}

/// True if the node has a date of `date_type`, and, when a comparison is given,
/// that date compares true against the target.
///
/// The target is resolved first, so an unparseable target fails on every node,
/// dated or not. Comparing a range or diary timestamp fails with
/// [`AgendaError::UnsupportedDateKind`].
pub fn date(
    node: &HeadlineNode,
    date_type: DateType,
    comparison: Option<(Comparator, &DateTarget)>,
) -> Result<bool> {
    let comparison = comparison
        .map(|(comparator, target)| Ok::<_, AgendaError>((comparator, target.day_number()?)))
        .transpose()?;

    let Some(timestamp) = node.date(date_type) else {
        return Ok(false);
    };
    let Some((comparator, target_day)) = comparison else {
        return Ok(true);
    };

    let node_day = timestamp.day_number()?;
    Ok(comparator.apply(node_day, target_day))
}

/// Argument-list form of [`date`]: `[DateType]` or `[DateType, Comparator, target]`.
///
/// The date type may also be given as the text `scheduled` / `deadline`, the
/// comparator as its operator text, and the target as text or an integer day
/// number. Argument shapes are checked before the node is looked at.
pub fn date_predicate(node: &HeadlineNode, args: &[PredicateArg]) -> Result<bool> {
    let (date_type, rest) = match args.split_first() {
        Some((first, rest)) => (date_type_arg(first)?, rest),
        None => {
            return Err(AgendaError::InvalidArgument(
                "date predicate needs a date type (scheduled or deadline)".into(),
            ))
        }
    };

    match rest {
        [] => date(node, date_type, None),
        [comparator] => Err(AgendaError::InvalidArgument(format!(
            "comparator {} given without a target date",
            comparator
        ))),
        [comparator, target] => {
            let comparator = comparator_arg(comparator)?;
            let target = target_arg(target)?;
            date(node, date_type, Some((comparator, &target)))
        }
        _ => Err(AgendaError::InvalidArgument(format!(
            "date predicate takes at most three arguments, got {}",
            args.len()
        ))),
    }
}

fn date_type_arg(arg: &PredicateArg) -> Result<DateType> {
    match arg {
        PredicateArg::DateType(t) => Ok(*t),
        PredicateArg::Text(s) if s.trim_start_matches(':') == "scheduled" => {
            Ok(DateType::Scheduled)
        }
        PredicateArg::Text(s) if s.trim_start_matches(':') == "deadline" => Ok(DateType::Deadline),
        other => Err(AgendaError::InvalidArgument(format!(
            "{} is not a date type (scheduled or deadline)",
            other
        ))),
    }
}

fn comparator_arg(arg: &PredicateArg) -> Result<Comparator> {
    match arg {
        PredicateArg::Comparator(c) => Ok(*c),
        PredicateArg::Text(op) => op.parse(),
        other => Err(AgendaError::InvalidArgument(format!(
            "{} is not a comparator",
            other
        ))),
    }
}

fn target_arg(arg: &PredicateArg) -> Result<DateTarget> {
    match arg {
        PredicateArg::Text(text) => Ok(DateTarget::Text(text.clone())),
        PredicateArg::Int(day) => Ok(DateTarget::Day(*day)),
        other => Err(AgendaError::InvalidArgument(format!(
            "target date must be YYYY-MM-DD text or a day number, got {}",
            other
        ))),
    }
}

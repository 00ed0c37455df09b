//! Predicate expressions for `--match` / `--exclude`.
//!
//! | Expression | Meaning |
//! |------------|---------|
//! | `todo` | has any todo keyword |
//! | `todo=NEXT` | keyword is exactly `NEXT` |
//! | `todo=TODO\|NEXT` | keyword is one of the listed |
//! | `scheduled`, `deadline` | has that date |
//! | `scheduled<=today` | date compared with today |
//! | `deadline<2024-02-01` | date compared with a calendar date |
//! | `deadline>=738900` | date compared with an absolute day number |
//!
//! Operators: `<`, `<=`, `=`, `==`, `!=`, `>=`, `>`.

use agenda::error::{AgendaError, Result};
use agenda::model::{parse_day_number, DateType, DayNumber};
use agenda::predicates::{Comparator, DateTarget, PredicateSpec};

/// Longest operators first so `<=` is not read as `<`.
const OPERATORS: &[&str] = &["<=", ">=", "!=", "==", "<", ">", "="];

pub fn parse_specs(exprs: &[String], today: DayNumber) -> Result<Vec<PredicateSpec>> {
    exprs.iter().map(|e| parse_spec(e, today)).collect()
}

pub fn parse_spec(expr: &str, today: DayNumber) -> Result<PredicateSpec> {
    let expr = expr.trim();

    if let Some(rest) = expr.strip_prefix("todo") {
        return parse_todo(expr, rest);
    }
    for date_type in [DateType::Scheduled, DateType::Deadline] {
        if let Some(rest) = expr.strip_prefix(date_type.as_str()) {
            return parse_date(expr, date_type, rest, today);
        }
    }
    Err(AgendaError::Query(format!(
        "unknown predicate {:?} (expected todo, scheduled or deadline)",
        expr
    )))
}

fn parse_todo(expr: &str, rest: &str) -> Result<PredicateSpec> {
    if rest.is_empty() {
        return Ok(PredicateSpec::todo());
    }
    let Some(list) = rest.strip_prefix('=') else {
        return Err(AgendaError::Query(format!(
            "expected todo=KEYWORD, got {:?}",
            expr
        )));
    };

    let keywords: Vec<&str> = list.split('|').map(str::trim).collect();
    if keywords.iter().any(|k| k.is_empty()) {
        return Err(AgendaError::Query(format!("empty keyword in {:?}", expr)));
    }
    Ok(PredicateSpec::todo_in(keywords))
}

fn parse_date(expr: &str, date_type: DateType, rest: &str, today: DayNumber) -> Result<PredicateSpec> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(PredicateSpec::has_date(date_type));
    }

    let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) else {
        return Err(AgendaError::Query(format!(
            "expected a comparison after {} in {:?}",
            date_type, expr
        )));
    };
    let comparator: Comparator = op.parse()?;
    let target = parse_target(rest[op.len()..].trim(), today)?;

    Ok(PredicateSpec::date(date_type, comparator, target))
}

fn parse_target(text: &str, today: DayNumber) -> Result<DateTarget> {
    if text.is_empty() {
        return Err(AgendaError::Query("missing target date".into()));
    }
    if text == "today" {
        return Ok(DateTarget::Day(today));
    }
    if let Ok(day) = text.parse::<DayNumber>() {
        return Ok(DateTarget::Day(day));
    }
    // Validate now so a typo fails before the outline is walked.
    parse_day_number(text).map_err(|e| AgendaError::Query(e.to_string()))?;
    Ok(DateTarget::Text(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda::model::{day_number, HeadlineNode, Timestamp};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> DayNumber {
        day_number(date("2024-01-10"))
    }

    fn eval(expr: &str, node: &HeadlineNode) -> bool {
        parse_spec(expr, today()).unwrap().evaluate(node).unwrap()
    }

    #[test]
    fn todo_forms() {
        let next = HeadlineNode::new(1, "x").with_todo("NEXT");
        assert!(eval("todo", &next));
        assert!(eval("todo=NEXT", &next));
        assert!(!eval("todo=TODO", &next));
        assert!(eval("todo=TODO|NEXT", &next));
        assert!(eval("todo=TODO | NEXT", &next));
    }

    #[test]
    fn date_forms() {
        let node = HeadlineNode::new(1, "x").with_scheduled(Timestamp::active(date("2024-01-08")));
        assert!(eval("scheduled", &node));
        assert!(!eval("deadline", &node));
        assert!(eval("scheduled<=today", &node));
        assert!(eval("scheduled < 2024-01-09", &node));
        assert!(!eval("scheduled>today", &node));
        assert!(eval("scheduled!=today", &node));
        let day = day_number(date("2024-01-08"));
        assert!(eval(&format!("scheduled=={}", day), &node));
    }

    #[test]
    fn rejects_unknown_predicate() {
        assert!(matches!(
            parse_spec("priority=A", today()),
            Err(AgendaError::Query(_))
        ));
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(parse_spec("todo=", today()).is_err());
        assert!(parse_spec("todo=A||B", today()).is_err());
        assert!(parse_spec("todoX", today()).is_err());
        assert!(parse_spec("deadline~2024-01-01", today()).is_err());
        assert!(parse_spec("deadline<", today()).is_err());
        assert!(parse_spec("deadline<tomorrow", today()).is_err());
    }

    #[test]
    fn parse_specs_keeps_order() {
        let specs = parse_specs(&["todo".into(), "deadline".into()], today()).unwrap();
        assert_eq!(specs.len(), 2);
    }
}

//! Tree filtering.
//!
//! Walks an [`Outline`] depth-first, parents before children, and keeps the
//! headlines that pass two stages:
//!
//! 1. **Match**: at least one of the match specs is true. No match specs means
//!    nothing matches.
//! 2. **Filter**: none of the filter specs is true. No filter specs means nothing
//!    is excluded.
//!
//! Every headline is judged on its own; a matching parent neither pulls in nor
//! hides its children.
//!
//! A failing predicate aborts the whole pass. The error names the headline by its
//! outline path (`Parent / Child`), built from the ancestors on the call stack.

use tracing::{debug, trace};

use crate::error::Result;
use crate::model::{HeadlineNode, Outline};
use crate::predicates::PredicateSpec;

/// Returns the headlines passing both stages, in document order.
pub fn filter<'a>(
    outline: &'a Outline,
    match_specs: &[PredicateSpec],
    filter_specs: &[PredicateSpec],
) -> Result<Vec<&'a HeadlineNode>> {
    let mut selected = Vec::new();
    let mut path = Vec::new();

    for headline in &outline.headlines {
        visit(headline, match_specs, filter_specs, &mut path, &mut selected)?;
    }

    debug!(
        total = outline.len(),
        selected = selected.len(),
        match_specs = match_specs.len(),
        filter_specs = filter_specs.len(),
        "filtered outline"
    );
    Ok(selected)
}

fn visit<'a>(
    node: &'a HeadlineNode,
    match_specs: &[PredicateSpec],
    filter_specs: &[PredicateSpec],
    path: &mut Vec<String>,
    selected: &mut Vec<&'a HeadlineNode>,
) -> Result<()> {
    path.push(node.raw_title());

    let keep =
        passes(node, match_specs, filter_specs).map_err(|e| e.at_node(&path.join(" / ")))?;
    if keep {
        selected.push(node);
    } else {
        trace!(headline = %node.title, "skipped");
    }

    for child in &node.children {
        visit(child, match_specs, filter_specs, path, selected)?;
    }

    path.pop();
    Ok(())
}

/// True if the node passes both the match and the filter stage.
pub fn passes(
    node: &HeadlineNode,
    match_specs: &[PredicateSpec],
    filter_specs: &[PredicateSpec],
) -> Result<bool> {
    Ok(any_true(node, match_specs)? && !any_true(node, filter_specs)?)
}

/// Short-circuits on the first true spec.
fn any_true(node: &HeadlineNode, specs: &[PredicateSpec]) -> Result<bool> {
    for spec in specs {
        if spec.evaluate(node)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgendaError;
    use crate::model::{DateType, Timestamp};
    use crate::predicates::{PredicateArg, PredicateFn};
    use chrono::NaiveDate;

    fn always(_: &HeadlineNode, _: &[PredicateArg]) -> Result<bool> {
        Ok(true)
    }

    fn never(_: &HeadlineNode, _: &[PredicateArg]) -> Result<bool> {
        Ok(false)
    }

    fn explode(_: &HeadlineNode, _: &[PredicateArg]) -> Result<bool> {
        Err(AgendaError::InvalidArgument("boom".into()))
    }

    fn title_is(node: &HeadlineNode, args: &[PredicateArg]) -> Result<bool> {
        Ok(matches!(args, [PredicateArg::Text(t)] if *t == node.raw_title()))
    }

    fn direct(f: PredicateFn) -> PredicateSpec {
        PredicateSpec::Direct(f)
    }

    fn title(t: &str) -> PredicateSpec {
        PredicateSpec::WithArgs(title_is, vec![t.into()])
    }

    fn titles(nodes: &[&HeadlineNode]) -> Vec<String> {
        nodes.iter().map(|n| n.raw_title()).collect()
    }

    fn sample() -> Outline {
        let d = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        Outline::new(vec![
            HeadlineNode::new(1, "Work")
                .with_todo("TODO")
                .with_child(
                    HeadlineNode::new(2, "Report")
                        .with_todo("TODO")
                        .with_scheduled(Timestamp::active(d))
                        .with_child(HeadlineNode::new(3, "Draft").with_todo("DONE")),
                )
                .with_child(HeadlineNode::new(2, "Ideas")),
            HeadlineNode::new(1, "Home").with_child(HeadlineNode::new(2, "Milk").with_todo("TODO")),
        ])
    }

    #[test]
    fn always_true_reproduces_document_order() {
        let outline = sample();
        let all = filter(&outline, &[direct(always)], &[]).unwrap();
        let expected: Vec<_> = outline.walk().map(|n| n.raw_title()).collect();
        assert_eq!(titles(&all), expected);
        assert_eq!(
            titles(&all),
            vec!["Work", "Report", "Draft", "Ideas", "Home", "Milk"]
        );
    }

    #[test]
    fn empty_match_specs_select_nothing() {
        let outline = sample();
        assert!(filter(&outline, &[], &[]).unwrap().is_empty());
        assert!(filter(&outline, &[], &[direct(never)]).unwrap().is_empty());
    }

    #[test]
    fn match_stage_is_or() {
        let outline = sample();
        let got = filter(&outline, &[direct(never), title("Milk"), title("Ideas")], &[]).unwrap();
        assert_eq!(titles(&got), vec!["Ideas", "Milk"]);
    }

    #[test]
    fn filter_stage_is_none_of() {
        let outline = sample();
        let got = filter(
            &outline,
            &[PredicateSpec::todo()],
            &[direct(never), PredicateSpec::todo_in(["DONE"])],
        )
        .unwrap();
        assert_eq!(titles(&got), vec!["Work", "Report", "Milk"]);
    }

    #[test]
    fn single_true_filter_excludes() {
        let outline = sample();
        let got = filter(
            &outline,
            &[direct(always)],
            &[direct(never), direct(never), direct(always)],
        )
        .unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn ancestors_and_descendants_judged_independently() {
        let outline = sample();
        let got = filter(
            &outline,
            &[PredicateSpec::has_date(DateType::Scheduled), title("Draft")],
            &[],
        )
        .unwrap();
        assert_eq!(titles(&got), vec!["Report", "Draft"]);
    }

    #[test]
    fn each_node_appears_once() {
        let outline = sample();
        let got = filter(&outline, &[direct(always), direct(always)], &[]).unwrap();
        assert_eq!(got.len(), outline.len());
    }

    #[test]
    fn failure_aborts_with_outline_path() {
        let outline = sample();
        let err = filter(&outline, &[title("Draft"), direct(explode)], &[]).unwrap_err();

        match &err {
            AgendaError::Predicate { node, .. } => assert_eq!(node, "Work"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(err.root_cause(), AgendaError::InvalidArgument(_)));
    }

    #[test]
    fn failing_filter_spec_on_deep_node() {
        fn explode_on_draft(node: &HeadlineNode, _: &[PredicateArg]) -> Result<bool> {
            if node.raw_title() == "Draft" {
                Err(AgendaError::UnsupportedDateKind("diary".into()))
            } else {
                Ok(false)
            }
        }

        let outline = sample();
        let err = filter(&outline, &[direct(always)], &[direct(explode_on_draft)]).unwrap_err();
        match err {
            AgendaError::Predicate { node, source } => {
                assert_eq!(node, "Work / Report / Draft");
                assert!(matches!(*source, AgendaError::UnsupportedDateKind(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_date_target_fails_on_undated_outline() {
        use crate::predicates::{Comparator, DateTarget};

        let undated = Outline::new(vec![HeadlineNode::new(1, "a"), HeadlineNode::new(1, "b")]);
        let spec =
            PredicateSpec::date(DateType::Deadline, Comparator::Lt, DateTarget::Text("soon".into()));

        let err = filter(&undated, &[spec], &[]).unwrap_err();
        assert!(matches!(err.root_cause(), AgendaError::InvalidArgument(_)));
    }

    #[test]
    fn passes_combines_stages() {
        let node = HeadlineNode::new(1, "x");
        assert!(passes(&node, &[direct(always)], &[]).unwrap());
        assert!(!passes(&node, &[direct(always)], &[direct(always)]).unwrap());
        assert!(!passes(&node, &[], &[]).unwrap());
    }
}

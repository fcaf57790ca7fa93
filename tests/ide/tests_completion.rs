//! Completion tests.

use rstest::rstest;
use yantra::ide::CompletionKind;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn labels(line_text: &str, character: u32) -> Vec<String> {
    host_for(CALCULATOR)
        .completions_at(0, character, line_text)
        .into_iter()
        .map(|item| item.label.to_string())
        .collect()
}

#[rstest]
#[case("%", 1, 17)]
#[case("%l", 2, 3)]
#[case("%lexer_", 7, 2)]
#[case("%zzz", 4, 0)]
fn test_pragma_completions(#[case] line: &str, #[case] character: u32, #[case] expected: usize) {
    let host = host_for(CALCULATOR);
    let items = host.completions_at(0, character, line);
    assert_eq!(items.len(), expected, "{line:?}");
    assert!(items.iter().all(|item| item.kind == CompletionKind::Pragma));
}

#[test]
fn test_walker_completions() {
    assert_eq!(labels("@", 1), vec!["Eval", "Print"]);
    assert_eq!(labels("@P", 2), vec!["Print"]);
}

#[test]
fn test_function_completions() {
    assert_eq!(labels("@Eval::", 7), vec!["go", "value"]);
    assert_eq!(labels("@Print::", 8), vec!["go"]);
    assert_eq!(labels("@Eval::v", 8), vec!["value"]);
}

#[test]
fn test_no_completions_outside_markers() {
    assert!(labels("expr := te", 10).is_empty());
    assert!(labels("", 0).is_empty());
}

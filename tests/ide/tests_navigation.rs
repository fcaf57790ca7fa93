//! Go to definition, find references and rename.

use yantra::Range;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// GOTO DEFINITION
// =============================================================================

#[test]
fn test_goto_token_from_rule_body() {
    let host = host_for(CALCULATOR);
    // `NUMBER` in `term := NUMBER;`
    assert_eq!(host.definitions_at(35, 9), vec![Range::on_line(15, 0, 6)]);
}

#[test]
fn test_goto_rule_lists_every_body() {
    let host = host_for(CALCULATOR);
    // `expr` in `%start expr;`
    assert_eq!(
        host.definitions_at(4, 8),
        vec![Range::on_line(21, 0, 4), Range::on_line(30, 0, 4)]
    );
}

#[test]
fn test_goto_walker_from_block_name() {
    let host = host_for(CALCULATOR);
    // `Print` in `@Print`
    assert_eq!(host.definitions_at(26, 2), vec![Range::on_line(2, 14, 19)]);
}

#[test]
fn test_goto_function_from_block_name() {
    let host = host_for(CALCULATOR);
    // `value` in `@Eval::value`
    assert_eq!(host.definitions_at(22, 8), vec![Range::on_line(13, 21, 26)]);
}

#[test]
fn test_goto_nothing_under_cursor() {
    let host = host_for(CALCULATOR);
    assert!(host.definitions_at(0, 3).is_empty());
    assert!(host.definitions_at(24, 6).is_empty());
    assert!(host.definitions_at(500, 0).is_empty());
}

// =============================================================================
// REFERENCES AND RENAME
// =============================================================================

#[test]
fn test_references_from_definition() {
    let host = host_for(RENAME_SOURCE);
    let refs = host.references_at(1, 0);
    assert_eq!(
        refs,
        vec![
            Range::on_line(0, 6, 9),
            Range::on_line(1, 0, 3),
            Range::on_line(3, 7, 10),
            Range::on_line(3, 20, 23),
            Range::on_line(4, 12, 15),
        ]
    );
}

#[test]
fn test_rename_touches_exactly_the_occurrences() {
    let host = host_for(RENAME_SOURCE);
    let edits = host.rename_at(1, 1, "BAR");
    let ranges: Vec<Range> = edits.iter().map(|edit| edit.range).collect();

    assert_eq!(ranges, host.references_at(4, 13));
    assert!(edits.iter().all(|edit| &*edit.new_text == "BAR"));
    // `FOOD` and the alias `OP` are left alone.
    assert!(!ranges.contains(&Range::on_line(2, 0, 4)));
    assert!(!ranges.contains(&Range::on_line(3, 11, 13)));
}

#[test]
fn test_references_of_rule_with_several_bodies() {
    let host = host_for(TWO_EXPR_BODIES);
    let refs = host.references_at(2, 1);
    assert_eq!(
        refs,
        vec![
            Range::on_line(2, 0, 4),
            Range::on_line(3, 0, 4),
            Range::on_line(3, 8, 12),
        ]
    );
}

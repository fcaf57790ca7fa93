//! Formatter tests.

use std::path::PathBuf;

use rstest::rstest;
use walkdir::WalkDir;

use crate::helpers::analysis_helpers::*;

fn fixture_paths() -> Vec<PathBuf> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yg"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn test_fixtures_analyze_cleanly_and_format_to_fixed_point() {
    let paths = fixture_paths();
    assert!(!paths.is_empty(), "no fixtures found");

    for path in paths {
        let source = std::fs::read_to_string(&path).unwrap();
        assert_clean(&source);

        let once = format_source(&source).join("\n");
        assert!(!once.is_empty(), "{} did not format", path.display());
        let twice = format_source(&once).join("\n");
        assert_eq!(once, twice, "{} is not a fixed point", path.display());
    }
}

#[test]
fn test_canonical_fixture_is_unchanged() {
    let source = crate::helpers::source_fixtures::CALCULATOR;
    assert_eq!(format_source(source).join("\n"), source);
}

#[rstest]
#[case("ID:=\"x\";", "ID := \"x\";")]
#[case("A := \"a\";\nLONG_NAME := \"b\";", "A         := \"a\";\nLONG_NAME := \"b\";")]
#[case("A := \"a\";\nexpr   :=   A  A ;", "A := \"a\";\nexpr := A A;")]
#[case("%walkers   Eval    Print ;", "%walkers Eval Print;")]
#[case("%prologue   keep   spacing", "%prologue keep   spacing")]
#[case("   // indented comment", "// indented comment")]
#[case("%walkers Eval;\nexpr :=\n%{\n        deep();\n          deeper();\n%}", "%walkers Eval;\nexpr :=\n%{\n    deep();\n      deeper();\n%}")]
fn test_formatting(#[case] source: &str, #[case] expected: &str) {
    let once = format_source(source).join("\n");
    assert_eq!(once, expected);
    assert_eq!(format_source(&once).join("\n"), once);
}

#[test]
fn test_blank_lines_are_kept() {
    let lines = format_source("A := \"a\";\n\n\nB := \"b\";");
    assert_eq!(lines, vec!["A := \"a\";", "", "", "B := \"b\";"]);
}

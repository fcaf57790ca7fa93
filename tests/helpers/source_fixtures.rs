//! Common source fixtures for tests.

pub const CALCULATOR: &str = include_str!("../fixtures/calculator.yg");
pub const STRINGS: &str = include_str!("../fixtures/strings.yg");
pub const OBJECTS: &str = include_str!("../fixtures/objects.yg");

pub const SINGLE_TOKEN: &str = "TOKEN := \"x\";";

pub const TOKEN_DEFINED_LATER: &str = "expr := ID;\nID := \"[a-z]+\";";

pub const TOKEN_NEVER_DEFINED: &str = "expr := PLUS MISSING;\nPLUS := \"+\";";

pub const TWO_EXPR_BODIES: &str = r#"NUM := "[0-9]+";
PLUS := "+";
expr := NUM;
expr := expr PLUS NUM;"#;

pub const RENAME_SOURCE: &str = r#"%left FOO;
FOO := "+";
FOOD := "f";
sum := FOO(OP) FOOD FOO;
prod := sum FOO sum;"#;

pub const RULE_WITHOUT_BLOCK: &str = r#"A := "a";
expr := A
B := "b";"#;

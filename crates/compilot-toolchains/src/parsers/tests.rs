//! Tests for shared parser helpers.

use std::path::Path;

use rstest::rstest;

use super::*;

#[rstest]
#[case::dot_slash("./main.go", "main.go")]
#[case::repeated_dot_slash("././main.go", "main.go")]
#[case::plain("src/lib.rs", "src/lib.rs")]
#[case::absolute_inside("/work/src/Main.java", "src/Main.java")]
#[case::absolute_outside("/usr/include/stdio.h", "/usr/include/stdio.h")]
#[case::sibling_prefix("/workspace/a.c", "/workspace/a.c")]
#[case::surrounding_whitespace("  a.c ", "a.c")]
#[case::parent("../a.c", "../a.c")]
fn normalises_reported_paths(#[case] reported: &str, #[case] expected: &str) {
    assert_eq!(normalise_path(reported, Path::new("/work")), expected);
}

#[rstest]
#[case::clean(Some(0), vec![], true)]
#[case::warnings_only(Some(0), vec![RawProblem::new("a.c", "warning", 1, 1, "w")], true)]
#[case::error_with_zero_status(Some(0), vec![RawProblem::new("a.c", "error", 1, 1, "e")], false)]
#[case::nonzero_status(Some(2), vec![], false)]
#[case::killed(None, vec![], false)]
fn conclude_requires_clean_exit_and_no_errors(
    #[case] status: Option<i32>,
    #[case] problems: Vec<RawProblem>,
    #[case] ok: bool,
) {
    let output = ProcessOutput::new("out\n", "err\n", status);
    let result = conclude(&output, problems);
    assert_eq!(result.is_ok(), ok);
    assert_eq!(result.message(), "out\nerr\n");
}

#[test]
fn parser_names_are_distinct() {
    let parsers: [&dyn DiagnosticParser; 13] = [
        &CFamilyParser,
        &CobolParser,
        &DotnetParser,
        &ElixirParser,
        &GhcParser,
        &GnatParser,
        &GoParser,
        &JavacParser,
        &NasmParser,
        &NimParser,
        &PerlParser,
        &PythonParser,
        &RustcParser,
    ];
    let mut names: Vec<_> = parsers.iter().map(|parser| parser.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), parsers.len());
}

#![cfg(feature = "cli")]

use serde_json::json;
use sprig_query::cli::{
    CliError, CompileOptions, CompileResult, execute_compile, get_doc_category,
    get_docs_overview, render_ast, render_tokens,
};

fn options(query: &str) -> CompileOptions {
    CompileOptions {
        query: query.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_compile_to_json() {
    match execute_compile(&options("a == 1 or b == 2")).unwrap() {
        CompileResult::Filter(json) => {
            assert_eq!(json, json!({"$or": [{"a": {"$eq": 1}}, {"b": {"$eq": 2}}]}));
        }
        other => panic!("Expected filter, got {:?}", other),
    }
}

#[test]
fn test_render_compact_and_pretty() {
    let result = execute_compile(&options("a == 1")).unwrap();
    assert_eq!(result.render(false), r#"{"a":{"$eq":1}}"#);
    assert_eq!(result.render(true), "{\n  \"a\": {\n    \"$eq\": 1\n  }\n}");
}

#[test]
fn test_query_is_trimmed() {
    let result = execute_compile(&options("  a == 1\n")).unwrap();
    assert_eq!(result.render(false), r#"{"a":{"$eq":1}}"#);
}

#[test]
fn test_syntax_only() {
    let mut opts = options("a == 1 and b == 2");
    opts.syntax_only = true;
    let result = execute_compile(&opts).unwrap();
    assert!(matches!(result, CompileResult::SyntaxValid));
    assert_eq!(result.render(true), "Syntax is valid");
}

#[test]
fn test_syntax_error_is_labelled() {
    let err = execute_compile(&options("a ==")).unwrap_err();
    assert!(matches!(err, CliError::Compile(_)));
    assert!(err.to_string().starts_with("Syntax error: "));
}

#[test]
fn test_type_error_is_labelled() {
    let err = execute_compile(&options("a in 5")).unwrap_err();
    assert!(err.to_string().starts_with("Type error: "));
}

#[test]
fn test_syntax_only_still_reports_syntax_errors() {
    let mut opts = options("a == 1,");
    opts.syntax_only = true;
    assert!(execute_compile(&opts).is_err());
}

#[test]
fn test_render_tokens() {
    let out = render_tokens("a >= 1").unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1:1\tIdentifier\ta",
            "1:3\tOperator\t'>='",
            "1:6\tLiteral\t1",
            "1:7\tEof\tend of input",
        ]
    );
}

#[test]
fn test_render_ast() {
    assert_eq!(
        render_ast("a == 1 and not b ~ /x/i").unwrap(),
        "(and (== a 1) (not (~ b /x/i)))"
    );
}

#[test]
fn test_render_ast_reports_errors() {
    assert!(render_ast("(a == 1").is_err());
}

#[test]
fn test_docs() {
    assert!(get_docs_overview().contains("DOCUMENTATION CATEGORIES"));
    for category in ["syntax", "operators", "literals", "output"] {
        assert!(get_doc_category(category).is_ok(), "Missing category {}", category);
    }
    assert!(matches!(
        get_doc_category("methods"),
        Err(CliError::UnknownCategory(_))
    ));
}

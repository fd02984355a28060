use serde_json::{Value as Json, json};
use sprig_query::filter::{Condition, Filter};
use sprig_query::{Error, ErrorKind, LexError, ParseError, TranslateError, compile, compile_json};
use std::thread;

fn compile_to_json(query: &str) -> Json {
    compile_json(query).unwrap_or_else(|e| panic!("Failed to compile {:?}: {}", query, e))
}

fn compile_err(query: &str) -> Error {
    match compile(query) {
        Ok(filter) => panic!("Expected {:?} to fail, got {}", query, filter.to_json()),
        Err(e) => e,
    }
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_comparison_operators() {
    let test_cases = vec![
        ("<", "$lt"),
        ("<=", "$lte"),
        (">", "$gt"),
        (">=", "$gte"),
        ("!=", "$ne"),
        ("==", "$eq"),
    ];

    for (symbol, key) in test_cases {
        let query = format!("field {} 5", symbol);
        assert_eq!(compile_to_json(&query), json!({"field": {key: 5}}), "Failed for {}", query);
    }
}

#[test]
fn test_literal_types() {
    assert_eq!(compile_to_json("price > 9.99"), json!({"price": {"$gt": 9.99}}));
    assert_eq!(compile_to_json("name == 'Ada'"), json!({"name": {"$eq": "Ada"}}));
    assert_eq!(compile_to_json("name == \"Ada\""), json!({"name": {"$eq": "Ada"}}));
    assert_eq!(compile_to_json("active == true"), json!({"active": {"$eq": true}}));
    assert_eq!(compile_to_json("balance >= -10"), json!({"balance": {"$gte": -10}}));
}

// ============================================================================
// Precedence and grouping
// ============================================================================

#[test]
fn test_precedence() {
    assert_eq!(
        compile_to_json("A==5 and B==6 or C==7"),
        json!({"$or": [
            {"$and": [{"A": {"$eq": 5}}, {"B": {"$eq": 6}}]},
            {"C": {"$eq": 7}}
        ]})
    );
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(
        compile_to_json("A==5 and (B==6 or C==7)"),
        json!({"$and": [
            {"A": {"$eq": 5}},
            {"$or": [{"B": {"$eq": 6}}, {"C": {"$eq": 7}}]}
        ]})
    );
}

#[test]
fn test_negation() {
    assert_eq!(
        compile_to_json("A==5 and not B==6"),
        json!({"$and": [{"A": {"$eq": 5}}, {"$not": {"B": {"$eq": 6}}}]})
    );
}

#[test]
fn test_symbolic_operators_match_keywords() {
    assert_eq!(
        compile_to_json("a == 1 && !(b == 2 || c == 3)"),
        compile_to_json("a == 1 and not (b == 2 or c == 3)")
    );
}

#[test]
fn test_keywords_ignore_case() {
    assert_eq!(
        compile_to_json("a == 1 AND b == 2 Or c == NULL"),
        compile_to_json("a == 1 and b == 2 or c == null")
    );
}

#[test]
fn test_search_box_example() {
    assert_eq!(
        compile_to_json("age < 35 and not (role == 'admin' or role == 'root')"),
        json!({"$and": [
            {"age": {"$lt": 35}},
            {"$not": {"$or": [
                {"role": {"$eq": "admin"}},
                {"role": {"$eq": "root"}}
            ]}}
        ]})
    );
}

#[test]
fn test_multiline_query() {
    let query = "status == 'open'\n  and (priority >= 3\n       or assignee == null)";
    assert_eq!(
        compile_to_json(query),
        json!({"$and": [
            {"status": {"$eq": "open"}},
            {"$or": [{"priority": {"$gte": 3}}, {"assignee": {"$exists": false}}]}
        ]})
    );
}

// ============================================================================
// Paths, null, arrays, regex
// ============================================================================

#[test]
fn test_dotted_paths() {
    assert_eq!(compile_to_json("a.b.c==5"), json!({"a": {"b": {"c": {"$eq": 5}}}}));
}

#[test]
fn test_empty_path_segment_is_type_error() {
    for query in [".a == 1", "a. == 1", "a..b == 1"] {
        let err = compile_err(query);
        assert_eq!(err.kind(), ErrorKind::Type, "Wrong kind for {:?}", query);
        assert!(matches!(err, Error::Translate(TranslateError::InvalidPath(_))));
    }
}

#[test]
fn test_null_rewrite() {
    assert_eq!(compile_to_json("a==null"), json!({"a": {"$exists": false}}));
    assert_eq!(compile_to_json("a!=null"), json!({"a": {"$exists": true}}));
}

#[test]
fn test_array_membership() {
    assert_eq!(compile_to_json("a in [1,2,3]"), json!({"a": {"$in": [1, 2, 3]}}));
    assert_eq!(compile_to_json("a not-in [1,2,3]"), json!({"a": {"$nin": [1, 2, 3]}}));
    assert_eq!(
        compile_to_json("tags all ['rust', 'parser']"),
        json!({"tags": {"$all": ["rust", "parser"]}})
    );
}

#[test]
fn test_in_with_scalar_is_type_error() {
    let err = compile_err("a in 5");
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(matches!(err, Error::Translate(TranslateError::ExpectedArray { op: "$in", .. })));

    assert!(compile_err("a not-in 'x'").is_type());
}

#[test]
fn test_regex_from_string_is_anchored() {
    let from_string = compile("a ~ 'admin'").unwrap();
    let from_literal = compile("a ~ /^admin/").unwrap();

    assert_eq!(from_string, from_literal);
    assert_eq!(from_string.to_json(), json!({"a": {"$regex": "^admin"}}));
}

#[test]
fn test_compiled_regex_is_usable() {
    let filter = compile("a ~ /^ad/i").unwrap();
    let Filter::Field { filter: inner, .. } = &filter else {
        panic!("Expected a field filter, got {:?}", filter);
    };
    let Filter::Condition(Condition::Regex(pattern)) = inner.as_ref() else {
        panic!("Expected a regex condition, got {:?}", inner);
    };
    assert!(pattern.regex().is_match("ADMIN"));
}

#[test]
fn test_regex_flags_preserved() {
    assert_eq!(
        compile_to_json("a ~ /^admin/i"),
        json!({"a": {"$regex": "^admin", "$options": "i"}})
    );
    assert_ne!(compile("a ~ /^admin/i").unwrap(), compile("a ~ /^admin/").unwrap());
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_unterminated_string() {
    let err = compile_err("\"unterminated");
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(matches!(err, Error::Lex(LexError::UnterminatedString(_))));
}

#[test]
fn test_float_overflow_is_rejected() {
    let err = compile_err(&format!("a < 1{}.5", "0".repeat(400)));
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(matches!(err, Error::Lex(LexError::InvalidNumber { .. })));
}

#[test]
fn test_missing_operand() {
    let err = compile_err("a ==");
    assert!(err.is_syntax());
    assert!(matches!(err, Error::Parse(ParseError::IncompleteClause { .. })));
}

#[test]
fn test_stray_comma() {
    let err = compile_err("a == 1, b == 2");
    assert!(matches!(err, Error::Parse(ParseError::StrayComma(_))));
}

#[test]
fn test_error_messages_name_the_problem() {
    let test_cases = vec![
        ("a = 1", "did you mean '=='"),
        ("a == 1 and", "'and'"),
        ("(a == 1", "Unmatched '('"),
        ("a == 1 #", "'#'"),
        ("a in 5", "$in"),
    ];

    for (query, fragment) in test_cases {
        let message = compile_err(query).to_string();
        assert!(
            message.contains(fragment),
            "Error for {:?} was {:?}, expected it to contain {:?}",
            query,
            message,
            fragment
        );
    }
}

#[test]
fn test_no_partial_result() {
    // first clause is fine, second is malformed
    assert!(compile("a == 1 and b in 2").is_err());
    assert!(compile("a == 1 or (b == 2").is_err());
}

// ============================================================================
// Referenced fields
// ============================================================================

#[test]
fn test_fields() {
    let filter = compile("user.age >= 18 and (role in ['a', 'b'] or not user.age > 90)").unwrap();
    assert_eq!(filter.fields(), vec!["user.age".to_string(), "role".to_string()]);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_compiles() {
    let queries = vec![
        "a == 1 and b == 2",
        "a ~ /x/i or c in [1, 2]",
        "not (d != null)",
        "e.f.g <= 3.5",
    ];

    let handles: Vec<_> = queries
        .iter()
        .map(|query| {
            let query = query.to_string();
            thread::spawn(move || (0..50).map(|_| compile_json(&query).unwrap()).collect::<Vec<_>>())
        })
        .collect();

    for (handle, query) in handles.into_iter().zip(queries) {
        let expected = compile_json(query).unwrap();
        for result in handle.join().unwrap() {
            assert_eq!(result, expected);
        }
    }
}

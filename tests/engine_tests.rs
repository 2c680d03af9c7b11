// tests/engine_tests.rs
//
// End-to-end behaviour of the conversion engine: scenarios on realistic trees,
// the depth guard, snippets, the fallback branch and idempotence.

mod common;

use common::{int, located, node, none, root, sym};
use ruby_ast_json::ast::{Child, Literal, NodeKind};
use ruby_ast_json::diagnostics::{CollectingSink, Level, NullSink};
use ruby_ast_json::engine::{convert, ConversionContext, MAX_NESTING_DEPTH};
use ruby_ast_json::normalized::{Body, Converted, OutputNode};
use serde_json::{json, Value};

fn to_json(child: &Child, source: &str) -> Value {
    let doc = convert(child, source, 0, Some("test.rb"), &NullSink).unwrap();
    serde_json::to_value(&doc).unwrap()
}

// ---
// Scenarios
// ---

#[test]
fn test_binary_operator_lhs_rhs() {
    let source = "1 and 2";
    let tree = located(
        "and",
        vec![
            located("int", vec![Literal::Int(1).into()], source, 0, 1),
            located("int", vec![Literal::Int(2).into()], source, 6, 7),
        ],
        source,
        0,
        7,
    );
    let out = to_json(&tree, source);
    assert_eq!(out["type"], "and");
    assert_eq!(out["lhs"]["type"], "int");
    assert_eq!(out["lhs"]["value"], 1);
    assert_eq!(out["rhs"]["value"], 2);
    assert_eq!(out["rhs"]["meta_data"]["code"], "2");
}

#[test]
fn test_arithmetic_is_a_call_on_the_left_operand() {
    let source = "1 + 2";
    let tree = located(
        "send",
        vec![
            located("int", vec![Literal::Int(1).into()], source, 0, 1),
            sym("+"),
            located("int", vec![Literal::Int(2).into()], source, 4, 5),
        ],
        source,
        0,
        5,
    );
    let out = to_json(&tree, source);
    assert_eq!(out["receiver"]["value"], 1);
    assert_eq!(out["name"], "+");
    assert_eq!(out["arguments"][0]["value"], 2);
}

#[test]
fn test_call_without_receiver() {
    let source = "foo(1, 2)";
    let tree = located(
        "send",
        vec![
            none(),
            sym("foo"),
            located("int", vec![Literal::Int(1).into()], source, 4, 5),
            located("int", vec![Literal::Int(2).into()], source, 7, 8),
        ],
        source,
        0,
        9,
    );
    let out = to_json(&tree, source);
    assert_eq!(out["receiver"], Value::Null);
    assert_eq!(out["name"], "foo");
    let args = out["arguments"].as_array().unwrap();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0]["type"], "int");
    assert_eq!(args[0]["value"], 1);
    assert_eq!(args[1]["value"], 2);
    assert_eq!(out["meta_data"]["code"], "foo(1, 2)");
}

#[test]
fn test_bare_nil() {
    let source = "nil";
    let tree = located("nil", vec![], source, 0, 3);
    assert_eq!(
        to_json(&tree, source),
        json!({
            "type": "nil",
            "meta_data": {
                "start_line": 1,
                "start_column": 0,
                "end_line": 1,
                "end_column": 3,
                "offset_start": 0,
                "offset_end": 3,
                "code": "nil"
            },
            "value": "nil"
        })
    );
}

#[test]
fn test_desugared_node_without_location() {
    let source = "def foo\nend\n";
    let tree = located(
        "def",
        vec![sym("foo"), node("args", vec![]), none()],
        source,
        0,
        11,
    );
    let out = to_json(&tree, source);
    assert_eq!(out["body"], Value::Null);
    let args = &out["arguments"];
    assert_eq!(args["type"], "args");
    assert_eq!(
        args["meta_data"],
        json!({
            "start_line": -1,
            "start_column": -1,
            "end_line": -1,
            "end_column": -1,
            "offset_start": null,
            "offset_end": null,
            "code": null
        })
    );
    assert_eq!(args["children"], json!([]));
    assert_eq!(out["meta_data"]["code"], "def foo end");
}

#[test]
fn test_class_with_body() {
    let source = "class Foo < Bar\n  CONST = 1\nend\n";
    let tree = node(
        "class",
        vec![
            node("const", vec![none(), sym("Foo")]),
            node("const", vec![none(), sym("Bar")]),
            node("casgn", vec![none(), sym("CONST"), int(1)]),
        ],
    );
    let out = to_json(&tree, source);
    assert_eq!(out["name"]["name"], "Foo");
    assert_eq!(out["superclass"]["name"], "Bar");
    assert_eq!(out["body"]["type"], "casgn");
    assert_eq!(out["body"]["lhs"], "CONST");
    assert_eq!(out["body"]["rhs"]["value"], 1);
}

#[test]
fn test_block_with_pattern_matching() {
    // case [1, 2]; in [a, b] then a + b; end
    let tree = node(
        "case_match",
        vec![
            node("array", vec![int(1), int(2)]),
            node(
                "in_pattern",
                vec![
                    node(
                        "array_pattern",
                        vec![node("match_var", vec![sym("a")]), node("match_var", vec![sym("b")])],
                    ),
                    none(),
                    node(
                        "send",
                        vec![node("lvar", vec![sym("a")]), sym("+"), node("lvar", vec![sym("b")])],
                    ),
                ],
            ),
            none(),
        ],
    );
    let out = to_json(&tree, "");
    assert_eq!(out["statement"]["type"], "array");
    assert!(out.get("else_clause").is_none());
    let clause = &out["bodies"][0];
    assert_eq!(clause["type"], "in_pattern");
    assert_eq!(clause["pattern"]["children"][1]["value"], "b");
    assert_eq!(clause["guard"], Value::Null);
    assert_eq!(clause["body"]["receiver"]["value"], "a");
}

#[test]
fn test_literal_children_pass_through() {
    let tree = node(
        "send",
        vec![
            none(),
            sym("configure"),
            node(
                "hash",
                vec![node(
                    "pair",
                    vec![node("sym", vec![sym("retries")]), node("float", vec![Literal::Float(2.5).into()])],
                )],
            ),
        ],
    );
    let out = to_json(&tree, "");
    let pair = &out["arguments"][0]["children"][0];
    assert_eq!(pair["key"]["value"], "retries");
    assert_eq!(pair["value"]["value"], 2.5);
}

// ---
// Depth guard
// ---

/// `if c then 1 else (if c then 1 else (...))`, `levels` conditionals deep.
fn conditional_chain(levels: usize) -> Child {
    let mut tail = int(0);
    for _ in 0..levels {
        tail = node("if", vec![node("true", vec![]), int(1), tail]);
    }
    tail
}

#[test]
fn test_deep_chain_is_truncated_at_limit() {
    let tree = conditional_chain(150);
    let sink = CollectingSink::new();
    let doc = convert(&tree, "", 0, Some("deep.rb"), &sink).unwrap();

    let mut current = &doc;
    for depth in 0..MAX_NESTING_DEPTH {
        assert!(!current.is_nested(), "node at depth {depth} should be complete");
        assert_eq!(current.field_names(), vec!["condition", "then_branch", "else_branch"]);
        current = current.field("else_branch").and_then(Converted::as_node).unwrap();
    }
    assert!(current.is_nested());
    assert_eq!(current.kind, NodeKind::If);

    let stub = serde_json::to_value(current).unwrap();
    let keys: Vec<&str> = stub.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 3);
    assert!(keys.contains(&"type") && keys.contains(&"meta_data") && keys.contains(&"nested"));
    assert_eq!(stub["nested"], true);

    // The three children of the depth-99 conditional are the only stubs.
    let warnings = sink.messages(Level::Warn);
    assert_eq!(warnings.len(), 3);
    assert!(warnings.contains(&"Reached max JSON depth on a if node".to_string()));
    assert!(warnings.contains(&"Reached max JSON depth on a true node".to_string()));
}

#[test]
fn test_stub_keeps_meta_data() {
    let source = "x";
    let tree = located("lvar", vec![sym("x")], source, 0, 1);
    let sink = CollectingSink::new();
    let doc = convert(&tree, source, MAX_NESTING_DEPTH, None, &sink).unwrap();
    assert!(doc.is_nested());
    assert_eq!(doc.meta_data.code.as_deref(), Some("x"));
    assert_eq!(doc.meta_data.start_line, 1);
}

#[test]
fn test_shallow_tree_has_no_stubs() {
    let tree = conditional_chain(MAX_NESTING_DEPTH - 2);
    let sink = CollectingSink::new();
    convert(&tree, "", 0, None, &sink).unwrap();
    assert!(sink.is_empty());
}

// ---
// Snippets
// ---

#[test]
fn test_snippet_is_flattened_for_every_range() {
    let source = "def foo(a,\n        b)\n  a  +\tb\nend\n";
    for begin in 0..=source.len() {
        for end in begin..=source.len() {
            let tree = located("lvar", vec![sym("a")], source, begin, end);
            let doc = convert(&tree, source, 0, None, &NullSink).unwrap();
            let code = doc.meta_data.code.unwrap();

            assert!(!code.contains(['\n', '\t']), "{code:?}");
            assert!(!code.contains("  "), "{code:?}");
            assert_eq!(code.trim(), code, "{code:?}");
            let visible: String = source[begin..end]
                .chars()
                .filter(|c| !matches!(c, ' ' | '\t' | '\n'))
                .collect();
            assert_eq!(code.replace(' ', ""), visible);

            assert_eq!(doc.meta_data.offset_start, Some(begin));
            assert_eq!(doc.meta_data.offset_end, Some(end));
        }
    }
}

#[test]
fn test_snippet_examples() {
    let source = "x = \"a\u{a0}b\"\nif y\n  z\t\tw\nend\n";
    let cases: &[(usize, usize, &str)] = &[
        (0, 3, "x ="),
        (4, 10, "\"a\u{a0}b\""),
        (0, 11, "x = \"a\u{a0}b\""),
        (11, 26, "if y z w end"),
        (15, 17, ""),
    ];
    for &(begin, end, expected) in cases {
        let tree = located("str", vec![sym("s")], source, begin, end);
        let doc = convert(&tree, source, 0, None, &NullSink).unwrap();
        assert_eq!(doc.meta_data.code.as_deref(), Some(expected), "{begin}..{end}");
    }
}

// ---
// Fallback
// ---

#[test]
fn test_unknown_kind_keeps_children_and_warns_once() {
    let tree = node(
        "block",
        vec![
            node("lambda", vec![sym("raw"), int(7), none()]),
            node("args", vec![node("arg", vec![sym("x")])]),
            node("lvar", vec![sym("x")]),
        ],
    );
    let sink = CollectingSink::new();
    let doc = convert(&tree, "", 0, Some("app/lambda.rb"), &sink).unwrap();

    let out = serde_json::to_value(&doc).unwrap();
    let lambda = &out["call_name"];
    assert_eq!(lambda["type"], "lambda");
    assert_eq!(lambda["children"][0], "raw");
    assert_eq!(lambda["children"][1]["value"], 7);
    assert_eq!(lambda["children"][2], Value::Null);

    assert_eq!(
        sink.entries().len(),
        1,
        "exactly one diagnostic expected: {:?}",
        sink.entries()
    );
    let message = &sink.messages(Level::Warn)[0];
    assert!(message.contains("lambda"));
    assert!(message.contains("app/lambda.rb"));
}

// ---
// Idempotence and totality
// ---

#[test]
fn test_conversion_is_idempotent() {
    let source = "x = [1, 2]\n";
    let tree = located(
        "lvasgn",
        vec![
            sym("x"),
            located(
                "array",
                vec![
                    located("int", vec![Literal::Int(1).into()], source, 5, 6),
                    located("int", vec![Literal::Int(2).into()], source, 8, 9),
                ],
                source,
                4,
                10,
            ),
        ],
        source,
        0,
        10,
    );
    let first = convert(&tree, source, 0, None, &NullSink);
    let second = convert(&tree, source, 0, None, &NullSink);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

/// Field layout of every known kind when all four positional children exist.
fn expected_fields(kind: &str) -> Option<&'static [&'static str]> {
    let fields: &'static [&'static str] = match kind {
        "if" | "unless" => &["condition", "then_branch", "else_branch"],
        "while" | "while_post" | "until" | "until_post" => &["condition", "body"],
        "for" | "for_post" => &["variable", "collection", "body"],
        "def" => &["name", "arguments", "body"],
        "defs" => &["base", "name", "arguments", "body"],
        "class" => &["name", "superclass", "body"],
        "sclass" => &["name", "def", "body"],
        "module" => &["name", "body"],
        "block" => &["call_name", "arguments", "body"],
        "numblock" => &["call", "param_idx", "body"],
        "itblock" => &["call", "body"],
        "begin" | "kwbegin" => &["body"],
        "case" => &["case_expression", "when_clauses", "else_clause"],
        "case_match" | "rescue" => &["statement", "bodies", "else_clause"],
        "when" => &["conditions", "then_branch"],
        "in_pattern" => &["pattern", "guard", "body"],
        "match_as" => &["value", "as"],
        "resbody" => &["exec_list", "exec_var", "body"],
        "ensure" => &["statement", "body"],
        "if_guard" | "unless_guard" => &["condition"],
        "match_alt" => &["left", "right"],
        "casgn" => &["base", "lhs", "rhs"],
        "op_asgn" => &["lhs", "op", "rhs"],
        "or_asgn" | "and_asgn" | "lvasgn" | "ivasgn" | "gvasgn" | "cvasgn"
        | "match_with_lvasgn" | "and" | "or" | "match_pattern" | "match_pattern_p" | "masgn" => {
            &["lhs", "rhs"]
        }
        "nil" | "true" | "false" | "regopt" | "redo" | "pin" => &["value"],
        "kwarg" | "kwoptarg" | "pair" | "optarg" => &["key", "value"],
        "int" | "float" | "rational" | "complex" | "str" | "sym" | "arg" | "restarg"
        | "blockarg" | "shadowarg" | "self" | "ident" | "lvar" | "cvar" | "gvar" | "ivar"
        | "splat" | "kwsplat" | "block_pass" | "match_var" | "match_rest" => &["value"],
        "const" | "cbase" => &["base", "name"],
        "send" | "csend" => &["receiver", "name", "arguments"],
        "yield" | "super" | "defined?" | "xstr" => &["arguments"],
        "alias" => &["alias", "name"],
        "regexp" => &["value", "opt"],
        "erange" | "irange" | "eflipflop" | "iflipflop" => &["start", "end"],
        "preexe" | "postexe" => &["body"],
        "kwnilarg" => &["call", "body"],
        "kwrestarg" => &["name", "value"],
        "return" => &["values"],
        "break" | "next" => &["arguments"],
        "forward_args" | "forwarded_args" | "forward_arg" | "retry" | "zsuper"
        | "match_nil_pattern" => &[],
        _ => return None,
    };
    Some(fields)
}

#[test]
fn test_every_known_kind_has_its_declared_layout() {
    for name in NodeKind::KNOWN_NAMES {
        let tree = node(name, vec![int(1), int(2), int(3), int(4)]);
        let doc: OutputNode = convert(&tree, "", 0, None, &NullSink).unwrap();
        match expected_fields(name) {
            Some(fields) => assert_eq!(doc.field_names(), fields.to_vec(), "layout of {name}"),
            None => {
                assert!(matches!(doc.body, Body::Children(ref c) if c.len() == 4), "{name} should keep children")
            }
        }
    }
}

#[test]
fn test_context_and_free_function_agree() {
    let tree = conditional_chain(5);
    let sink = NullSink;
    let via_context = ConversionContext::new("", &sink)
        .with_file_path(Some("a.rb"))
        .convert(&tree, 0);
    let via_function = convert(&tree, "", 0, Some("a.rb"), &sink);
    assert_eq!(via_context, via_function);
    assert_eq!(root(tree).kind, NodeKind::If);
}

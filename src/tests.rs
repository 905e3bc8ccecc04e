use crate::grammar::DeclarationRule;
use crate::lexer::{tokenize, LexOptions, Token};
use crate::printer::format;
use pretty_assertions::assert_eq;

/// Grammar used across these tests: a small curly-brace language with
/// named and headless declarations and an `else` that chains onto `if`.
fn grammar() -> Vec<DeclarationRule> {
    vec![
        DeclarationRule::new("function"),
        DeclarationRule::new("procedure"),
        DeclarationRule::new("if"),
        DeclarationRule::new("else")
            .trailing()
            .headless()
            .continuators(&["if"]),
        DeclarationRule::new("repeat"),
    ]
}

fn pretty(code: &str) -> String {
    format(
        code,
        &grammar(),
        &[Token::OpenBrace],
        &[Token::CloseBrace],
        Token::OpenBrace,
        Token::CloseBrace,
    )
}

// ── Statements ───────────────────────────────────────────────────

#[test]
fn statements_split_at_semicolons() {
    assert_eq!(pretty("foo();bar();baz()"), "foo();\nbar();\nbaz()");
}

#[test]
fn empty_input_stays_empty() {
    assert_eq!(pretty(""), "");
}

#[test]
fn plain_lines_pass_through() {
    assert_eq!(pretty("let x = 1;\n"), "let x = 1;\n");
    assert_eq!(pretty("x\n"), "x\n");
}

// ── If and else ──────────────────────────────────────────────────

#[test]
fn if_header_is_spaced_and_body_indented() {
    let expected = "if (true) {\n  console.log('ups')\n}\n";
    assert_eq!(pretty("if (true) {\nconsole.log('ups')\n}\n"), expected);
    assert_eq!(pretty("if(true){\nconsole.log('ups')\n}\n"), expected);
    assert_eq!(pretty("if(true){console.log('ups')}"), expected);
}

#[test]
fn else_attaches_to_the_closing_brace() {
    assert_eq!(
        pretty("if(true){console.log('ups')}else{console.log('ok')}"),
        "if (true) {\n  console.log('ups')\n} else {\n  console.log('ok')\n}\n"
    );
}

#[test]
fn else_if_chains_on_one_line() {
    assert_eq!(
        pretty("if(true){console.log('ups')}else if (false) {console.log('ok')}"),
        "if (true) {\n  console.log('ups')\n} else if (false) {\n  console.log('ok')\n}\n"
    );
}

#[test]
fn chains_between_surrounding_statements() {
    assert_eq!(
        pretty("x = 4\nif(true){console.log('ups')}else if (false) {console.log('ok')}x = 5\nx = 8"),
        "x = 4\nif (true) {\n  console.log('ups')\n} else if (false) {\n  console.log('ok')\n}\nx = 5\nx = 8"
    );
}

// ── Functions ────────────────────────────────────────────────────

#[test]
fn nested_declarations_reindent_recursively() {
    let expected = "function foo() {\n  let x = 1;\n  let y = 2;\n  \n  if (true) {\n    console.log(y)\n  }\n}\n";
    assert_eq!(
        pretty("function foo(){let x = 1;let y = 2;if(true){console.log(y)}}"),
        expected
    );
    assert_eq!(
        pretty("function foo(){let x = 1; let y = 2; if(true){console.log(y)}}"),
        expected
    );
}

#[test]
fn sibling_blocks_inside_a_body_get_separated() {
    assert_eq!(
        pretty("function foo(){let x = 1;if(true){console.log(y)}if(false){console.log(z)}}"),
        "function foo() {\n  let x = 1;\n  \n  if (true) {\n    console.log(y)\n  }\n  \n  if (false) {\n    console.log(z)\n  }\n}\n"
    );
}

#[test]
fn empty_function_passes_through() {
    assert_eq!(pretty("function foo() {\n}\n"), "function foo() {\n}\n");
}

#[test]
fn blank_line_between_sibling_declarations_collapses() {
    assert_eq!(
        pretty("function foo() {\n}\n\nfunction bar() {\n}\n"),
        "function foo() {\n}\nfunction bar() {\n}\n"
    );
    assert_eq!(
        pretty("function foo() {\n}function bar() {\n}\n"),
        "function foo() {\n}\nfunction bar() {\n}\n"
    );
}

#[test]
fn headless_declaration_keeps_a_space_before_parameters() {
    assert_eq!(pretty("function(x) {\n}\n"), "function (x) {\n}\n");
    assert_eq!(pretty("function(x){return 2;}"), "function (x) {\n  return 2;\n}\n");
    assert_eq!(pretty("function(x){return 2}"), "function (x) {\n  return 2\n}\n");
    assert_eq!(pretty("function (x, y) {}\n"), "function (x, y) {\n}\n");
}

#[test]
fn leading_blank_lines_collapse() {
    assert_eq!(pretty(" function foo(x) {\n}\n"), " \nfunction foo(x) {\n}\n");
    assert_eq!(pretty("\n\nfunction foo(x) {\n}\n"), "\nfunction foo(x) {\n}\n");
    assert_eq!(pretty("\n\n  function foo(x) {\n}\n"), "\nfunction foo(x) {\n}\n");
    assert_eq!(pretty("\n \n  function foo(x) {\n}\n"), "\nfunction foo(x) {\n}\n");
    assert_eq!(pretty(" \n \n  function foo(x) {\n}\n"), "\nfunction foo(x) {\n}\n");
}

#[test]
fn space_before_a_named_parameter_list_is_dropped() {
    assert_eq!(pretty("function foo (x) {\n}\n"), "function foo(x) {\n}\n");
    assert_eq!(pretty("function foo (x, y) {\n}\n"), "function foo(x, y) {\n}\n");
    assert_eq!(pretty("function foo (  x, y ) {\n}\n"), "function foo(x, y) {\n}\n");
    assert_eq!(pretty("function foo (x, y) {}\n"), "function foo(x, y) {\n}\n");
}

// ── Procedures ───────────────────────────────────────────────────

#[test]
fn procedure_headers_normalize_like_function_headers() {
    assert_eq!(pretty("procedure Foo(x) {\n}\n"), "procedure Foo(x) {\n}\n");
    assert_eq!(pretty("procedure Foo (x) {\n}\n"), "procedure Foo(x) {\n}\n");
    assert_eq!(pretty("procedure Foo (  x, y ) {\n}\n"), "procedure Foo(x, y) {\n}\n");
    assert_eq!(pretty("procedure Foo (x, y) {}\n"), "procedure Foo(x, y) {\n}\n");
}

#[test]
fn crlf_input_is_normalized() {
    assert_eq!(
        pretty("procedure Foo(x) {\r\nPoner(Verde)\r\n}\r\n"),
        "procedure Foo(x) {\n  Poner(Verde)\n}\n"
    );
}

// ── Formatting is a fixed point ──────────────────────────────────

#[test]
fn formatting_twice_changes_nothing() {
    let sources = [
        "foo();bar();baz()",
        "if(true){console.log('ups')}else if (false) {console.log('ok')}",
        "function foo(){let x = 1;let y = 2;if(true){console.log(y)}}",
        "function foo(){let x = 1;if(true){console.log(y)}if(false){console.log(z)}}",
        "procedure PonerN(cantidad,color){\r\n  repeat(2){\r\n  Poner(cantidad,color)}\r\n}\r\n",
        "function puedeJubilarse(sexo,edad,ap){\r\n\r\n return((sexo=='M' && edad >= 65)||(sexo=='F' && edad>=60))\r\n  }",
    ];
    for source in sources {
        let once = pretty(source);
        assert_eq!(pretty(&once), once, "not a fixed point for {source:?}");
    }
}

#[test]
fn formatting_preserves_every_semantic_token() {
    let source = "function foo(){let x = 1; if(true){console.log('ups')}else{bar()}}";
    let options = LexOptions {
        squeeze: true,
        trim: true,
        ..LexOptions::default()
    };
    let before: Vec<Token> = tokenize(source, &options)
        .into_iter()
        .filter(|t| !t.is_layout())
        .collect();
    let after: Vec<Token> = tokenize(&pretty(source), &options)
        .into_iter()
        .filter(|t| !t.is_layout())
        .collect();
    assert_eq!(before, after);
}

//! Test grammars and rendering helpers.

use sprig_core::Grammar;

use crate::syntax::SyntaxGrammar;

/// `expression → math_operation | identifier` with a binary `+` rule
/// wrapped in `kind` (`PREC`, `PREC_LEFT` or `PREC_RIGHT`).
pub fn math_operation_grammar(kind: &str) -> Grammar {
    let json = r#"{
        "name": "associativity_example",
        "rules": {
            "expression": {
                "type": "CHOICE",
                "members": [
                    {"type": "SYMBOL", "name": "math_operation"},
                    {"type": "SYMBOL", "name": "identifier"}
                ]
            },
            "math_operation": {
                "type": "KIND",
                "value": 0,
                "content": {
                    "type": "SEQ",
                    "members": [
                        {"type": "SYMBOL", "name": "expression"},
                        {"type": "STRING", "value": "+"},
                        {"type": "SYMBOL", "name": "expression"}
                    ]
                }
            },
            "identifier": {"type": "PATTERN", "value": "[a-zA-Z]+"}
        }
    }"#;
    Grammar::from_json(&json.replace("KIND", kind)).unwrap()
}

/// Calls with an optional trailing block; `precedence` sets how tightly a
/// call binds relative to a bare identifier.
pub fn function_call_grammar(precedence: i32) -> Grammar {
    let json = r#"{
        "name": "associativity_example",
        "extras": [{"type": "PATTERN", "value": "\\s"}],
        "rules": {
            "expression": {
                "type": "CHOICE",
                "members": [
                    {"type": "SYMBOL", "name": "function_call"},
                    {"type": "SYMBOL", "name": "identifier"}
                ]
            },
            "function_call": {
                "type": "PREC_RIGHT",
                "value": PRECEDENCE,
                "content": {
                    "type": "CHOICE",
                    "members": [
                        {"type": "SEQ", "members": [
                            {"type": "SYMBOL", "name": "identifier"},
                            {"type": "SYMBOL", "name": "expression"}
                        ]},
                        {"type": "SEQ", "members": [
                            {"type": "SYMBOL", "name": "identifier"},
                            {"type": "SYMBOL", "name": "block"}
                        ]},
                        {"type": "SEQ", "members": [
                            {"type": "SYMBOL", "name": "identifier"},
                            {"type": "SYMBOL", "name": "expression"},
                            {"type": "SYMBOL", "name": "block"}
                        ]}
                    ]
                }
            },
            "block": {
                "type": "SEQ",
                "members": [
                    {"type": "STRING", "value": "{"},
                    {"type": "SYMBOL", "name": "expression"},
                    {"type": "STRING", "value": "}"}
                ]
            },
            "identifier": {"type": "PATTERN", "value": "[a-zA-Z]+"}
        }
    }"#;
    Grammar::from_json(&json.replace("PRECEDENCE", &precedence.to_string())).unwrap()
}

/// Sums and products over numbers and variables, with comments as extras.
pub fn arithmetic_grammar() -> Grammar {
    let json = r##"{
        "name": "arithmetic",
        "extras": [
            {"type": "PATTERN", "value": "\\s"},
            {"type": "SYMBOL", "name": "comment"}
        ],
        "rules": {
            "expression": {
                "type": "CHOICE",
                "members": [
                    {"type": "SYMBOL", "name": "sum"},
                    {"type": "SYMBOL", "name": "product"},
                    {"type": "SYMBOL", "name": "number"},
                    {"type": "SYMBOL", "name": "variable"},
                    {"type": "SEQ", "members": [
                        {"type": "STRING", "value": "("},
                        {"type": "SYMBOL", "name": "expression"},
                        {"type": "STRING", "value": ")"}
                    ]}
                ]
            },
            "sum": {
                "type": "PREC_LEFT",
                "value": 1,
                "content": {"type": "SEQ", "members": [
                    {"type": "SYMBOL", "name": "expression"},
                    {"type": "STRING", "value": "+"},
                    {"type": "SYMBOL", "name": "expression"}
                ]}
            },
            "product": {
                "type": "PREC_LEFT",
                "value": 2,
                "content": {"type": "SEQ", "members": [
                    {"type": "SYMBOL", "name": "expression"},
                    {"type": "STRING", "value": "*"},
                    {"type": "SYMBOL", "name": "expression"}
                ]}
            },
            "number": {"type": "PATTERN", "value": "\\d+"},
            "comment": {"type": "PATTERN", "value": "#.*"},
            "variable": {"type": "PATTERN", "value": "[a-zA-Z]\\w*"}
        }
    }"##;
    Grammar::from_json(json).unwrap()
}

/// All productions, one per line, as `id  lhs → rhs  [prec]`.
///
/// The precedence column is shown only for stamped productions.
pub fn render_productions(grammar: &SyntaxGrammar) -> String {
    let mut out = String::new();
    for id in grammar.production_ids() {
        let production = grammar.production(id);
        out.push_str(&format!("{}  {}", id.0, grammar.display_production(id)));
        let precedence = production.precedence;
        if precedence != Default::default() {
            out.push_str(&format!(
                "  [{} {:?}]",
                precedence.value, precedence.associativity
            ));
        }
        out.push('\n');
    }
    out
}

#![cfg(feature = "dot")]

use bytepat::{
    Automaton, AutomataSerializer, Compiler, automaton::regex_compiler,
    serializer::DotSerializer,
};
use indoc::indoc;

fn compile(expression: &str) -> Automaton {
    regex_compiler()
        .compile(expression)
        .unwrap_or_else(|err| panic!("failed to compile {expression}: {err}"))
}

#[test]
fn test_dot_sequence() {
    let dot = DotSerializer.serialize(&compile("41 42"), "sig");
    assert_eq!(
        dot,
        indoc! {r#"
            digraph "sig" {
                rankdir=LR;
                start [shape=point];
                start -> 0;
                0 [shape=circle];
                1 [shape=circle];
                2 [shape=circle];
                3 [shape=doublecircle];
                0 -> 1 [label="41"];
                1 -> 2 [style=dashed];
                2 -> 3 [label="42"];
            }
        "#}
    );
}

#[test]
fn test_dot_labels() {
    let dot = DotSerializer.serialize(&compile("[30-39 'a'] ."), "labels");
    assert!(dot.contains(r#"0 -> 1 [label="30-39 61"];"#), "{dot}");
    assert!(dot.contains(r#"2 -> 3 [label="."];"#), "{dot}");
}

#[test]
fn test_dot_title_is_escaped() {
    let dot = DotSerializer.serialize(&compile("00"), "say \"hi\"");
    assert!(dot.starts_with("digraph \"say \\\"hi\\\"\" {\n"), "{dot}");
}

use bytepat::{
    Automaton, BuildError, ByteSet, CompileError, Compiler, CompilerBackend, Direction,
    ParseError, ParserCompiler, RegexParser, ReversibleCompiler,
    ast::ParseTree,
    automaton::regex_compiler,
    compiler::join_as_alternatives,
    literal::byte_set_compiler,
};
use std::cell::RefCell;

#[track_caller]
fn compile(expression: &str) -> Automaton {
    regex_compiler()
        .compile(expression)
        .unwrap_or_else(|err| panic!("failed to compile {expression}: {err}"))
}

#[track_caller]
fn compile_reversed(expression: &str) -> Automaton {
    regex_compiler()
        .compile_in(expression, Direction::Reversed)
        .unwrap_or_else(|err| panic!("failed to compile {expression}: {err}"))
}

#[test]
fn test_compile_single_expression() {
    let automaton = compile("4d 5a [00-7f]{2} `pe`");
    assert!(automaton.matches(b"MZ\x01\x02Pe"));
    assert!(automaton.matches(b"MZ\x7f\x7fpE"));
    assert!(!automaton.matches(b"MZ\x80\x02pe"));
    assert!(!automaton.matches(b"MZ\x01pe"));
}

#[test]
fn test_join_as_alternation() {
    let automaton: Automaton = regex_compiler().compile_all(&["41", "42"]).unwrap();
    assert!(automaton.matches(b"A"));
    assert!(automaton.matches(b"B"));
    assert!(!automaton.matches(b"C"));
    assert!(!automaton.matches(b"AB"));

    let signatures = vec![
        "'PK' 03 04".to_owned(),
        "25 'PDF'".to_owned(),
        "`gif8` [37 39] 'a'".to_owned(),
    ];
    let automaton: Automaton = regex_compiler().compile(signatures.as_slice()).unwrap();
    assert_eq!(automaton.match_len(b"PK\x03\x04rest"), Some(4));
    assert_eq!(automaton.match_len(b"%PDF-1.7"), Some(4));
    assert_eq!(automaton.match_len(b"GIF89a"), Some(6));
    assert_eq!(automaton.match_len(b"GIF88a"), None);
}

#[test]
fn test_join_matches_individual_expressions() {
    let expressions = ["01 02*", "[^01] 03", "(04 | 05)+ 06?"];
    let joined: Automaton = regex_compiler().compile_all(&expressions).unwrap();
    let singles: Vec<Automaton> = expressions.iter().map(|e| compile(e)).collect();

    let inputs: [&[u8]; 9] = [
        b"\x01",
        b"\x01\x02\x02",
        b"\x02\x03",
        b"\x01\x03",
        b"\x04\x05\x04\x06",
        b"\x06",
        b"",
        b"\x04\x06\x06",
        b"\xff\x03",
    ];
    for input in inputs {
        let any_single = singles.iter().any(|a| a.matches(input));
        assert_eq!(joined.matches(input), any_single, "{}", input.escape_ascii());
    }
}

#[test]
fn test_reversed_compilation() {
    let forwards = compile("01 'ab' [10-1f] 02+");
    let reversed = compile_reversed("01 'ab' [10-1f] 02+");
    assert!(forwards.matches(b"\x01ab\x15\x02\x02"));
    assert!(reversed.matches(b"\x02\x02\x15ba\x01"));
    assert!(!reversed.matches(b"\x01ab\x15\x02\x02"));

    let reversed: Automaton = regex_compiler()
        .compile_all_in(&["41 42", "43 (44 | 45 46)"], Direction::Reversed)
        .unwrap();
    assert!(reversed.matches(b"BA"));
    assert!(reversed.matches(b"DC"));
    assert!(reversed.matches(b"FEC"));
    assert!(!reversed.matches(b"CEF"));
}

#[test]
fn test_reversal_involution() {
    let expressions = [
        "01 02 03",
        "'abc' `De` (41 | 42 43)* [00-0f]{2,3}",
        "((01 02)+ 03)? ~80 &01 .",
        "[^'a'-'z'] 'xyz'{2,*}",
    ];
    let inputs: [&[u8]; 6] = [
        b"\x01\x02\x03",
        b"abcdEAB\x00\x01",
        b"abcDeBCABC\x0f\x0f\x0f",
        b"\x01\x02\x01\x02\x03\x80\x01z",
        b"Axyzxyz",
        b"axyzxyz",
    ];
    for expression in expressions {
        let tree = RegexParser::new().parse_tree(expression);
        assert_eq!(tree.reversed().reversed(), tree);

        let forwards = compile(expression);
        let twice: Automaton = regex_compiler().compile_tree(&tree.reversed().reversed()).unwrap();
        let once: Automaton = regex_compiler().compile_tree(&tree.reversed()).unwrap();
        for input in inputs {
            assert_eq!(forwards.matches(input), twice.matches(input));
            let mut backwards = input.to_vec();
            backwards.reverse();
            assert_eq!(forwards.matches(input), once.matches(&backwards));
        }
    }
}

#[test]
fn test_batch_parse_error_names_expression() {
    let err = regex_compiler()
        .compile_all::<Automaton, _>(&["41", "zz"])
        .unwrap_err();
    assert_eq!(err.expression(), Some("zz"));
    assert!(err.to_string().contains("zz"), "{err}");
    assert!(matches!(
        err,
        CompileError::ParseFailure {
            source: ParseError::UnknownWord { .. },
            ..
        }
    ));
}

#[test]
fn test_batch_build_error_names_expression() {
    let err = regex_compiler()
        .compile_all::<Automaton, _>(&["41", "42{2000}", "43"])
        .unwrap_err();
    assert_eq!(err.expression(), Some("42{2000}"));
    assert!(matches!(err, CompileError::IllegalArgument { .. }));
}

#[test]
fn test_empty_batch_is_null_tree() {
    let expressions: [&str; 0] = [];
    assert_eq!(
        regex_compiler().compile_all::<Automaton, _>(&expressions),
        Err(CompileError::NullTree)
    );
}

#[test]
fn test_single_expression_errors() {
    let err = Compiler::<Automaton, _>::compile(&regex_compiler(), "41 (42").unwrap_err();
    assert_eq!(
        err,
        CompileError::ParseFailure {
            expression: "41 (42".to_owned(),
            source: ParseError::UnexpectedEnd { pos: 6 }
        }
    );
    assert_eq!(
        err.to_string(),
        "cannot parse expression '41 (42': unexpected end of expression at 6"
    );

    let err = Compiler::<ByteSet, _>::compile(&byte_set_compiler(), "41 42").unwrap_err();
    assert!(matches!(err, CompileError::IllegalArgument { .. }));
    assert_eq!(err.expression(), Some("41 42"));
}

#[test]
fn test_byte_set_backend() {
    let compiler = byte_set_compiler();
    let set: ByteSet = compiler.compile("[30-39] | 'x' | ~80").unwrap();
    for b in 0..=u8::MAX {
        assert_eq!(set.contains(b), b.is_ascii_digit() || b == b'x' || b >= 0x80);
    }
    let joined: ByteSet = compiler.compile_all(&["41", "`b`", "(43)"]).unwrap();
    assert_eq!(joined, [b'A', b'b', b'B', b'C'].into_iter().collect::<ByteSet>());
    let reversed: ByteSet = compiler.compile_in("[41-43]", Direction::Reversed).unwrap();
    let forwards: ByteSet = compiler.compile("[41-43]").unwrap();
    assert_eq!(reversed, forwards);
    assert!(matches!(
        Compiler::<ByteSet, _>::compile(&compiler, "41*"),
        Err(CompileError::IllegalArgument { .. })
    ));
}

/// Records how the framework calls its backend.
#[derive(Default)]
struct RecordingBackend {
    joined: RefCell<Vec<usize>>,
    compiled: RefCell<Vec<ParseTree>>,
}

impl CompilerBackend<usize, ParseTree> for RecordingBackend {
    fn do_compile(&self, ast: &ParseTree) -> Result<usize, BuildError> {
        self.compiled.borrow_mut().push(ast.clone());
        match ast.children().len() {
            n if n > 3 => Err(BuildError::OutOfBounds(format!("{n} children"))),
            n => Ok(n),
        }
    }

    fn join_expressions(&self, trees: Vec<ParseTree>) -> Result<ParseTree, BuildError> {
        self.joined.borrow_mut().push(trees.len());
        Ok(join_as_alternatives(trees))
    }
}

#[test]
fn test_custom_backend() {
    let compiler: ParserCompiler<ParseTree, _, _> =
        ParserCompiler::new(RegexParser::new(), RecordingBackend::default());

    assert_eq!(compiler.compile_expression::<usize>("41 42"), Ok(2));
    assert!(compiler.backend().joined.borrow().is_empty());

    assert_eq!(compiler.compile_all::<usize, _>(&["41", "42 43", "44"]), Ok(3));
    assert_eq!(*compiler.backend().joined.borrow(), vec![3]);
    assert_eq!(
        compiler.backend().compiled.borrow().last(),
        Some(&ParseTree::alternatives(vec![
            ParseTree::byte(0x41),
            ParseTree::sequence(vec![ParseTree::byte(0x42), ParseTree::byte(0x43)]),
            ParseTree::byte(0x44),
        ]))
    );

    assert_eq!(
        compiler.compile_expression::<usize>("01 02 03 04"),
        Err(CompileError::OutOfBounds {
            expression: "01 02 03 04".to_owned(),
            message: "4 children".to_owned()
        })
    );

    assert_eq!(compiler.compile_tree::<usize>(&ParseTree::byte(0)), Ok(0));
}

trait ParseTreeExt {
    fn parse_tree(&self, expression: &str) -> ParseTree;
}

impl ParseTreeExt for RegexParser {
    #[track_caller]
    fn parse_tree(&self, expression: &str) -> ParseTree {
        use bytepat::Parser;
        self.parse(expression)
            .unwrap_or_else(|err| panic!("cannot parse {expression}: {err}"))
    }
}

use bytepat::{
    ParseError, Result,
    lexer::{Lexer, token::Token},
};

fn lex_all(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input)?;
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token.token);
    }
    Ok(tokens)
}

#[test]
fn test_basic_tokens_lexer() -> Result<()> {
    assert_eq!(
        lex_all("4d5A ff")?,
        vec![Token::HexByte(0x4d), Token::HexByte(0x5a), Token::HexByte(0xff)]
    );
    assert_eq!(
        lex_all(".()[]^-|*+?&~")?,
        vec![
            Token::Any,
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
            Token::Caret,
            Token::Minus,
            Token::Pipe,
            Token::Star,
            Token::Plus,
            Token::Question,
            Token::Ampersand,
            Token::Tilde
        ]
    );
    Ok(())
}

#[test]
fn test_string_tokens_lexer() -> Result<()> {
    assert_eq!(
        lex_all("'PK' `gif`")?,
        vec![
            Token::String("PK".to_owned()),
            Token::CaseInsensitiveString("gif".to_owned())
        ]
    );
    assert_eq!(
        lex_all("'a b#c'")?,
        vec![Token::String("a b#c".to_owned())]
    );
    Ok(())
}

#[test]
fn test_words_and_shorthands_lexer() -> Result<()> {
    assert_eq!(
        lex_all("digit \\d\\W")?,
        vec![
            Token::Word("digit".to_owned()),
            Token::Shorthand(b'd'),
            Token::Shorthand(b'W')
        ]
    );
    // A letter starting a hex pair is a byte, not a word.
    assert_eq!(
        lex_all("face")?,
        vec![Token::HexByte(0xfa), Token::HexByte(0xce)]
    );
    Ok(())
}

#[test]
fn test_repeat_tokens_lexer() -> Result<()> {
    assert_eq!(
        lex_all("41{10,*}")?,
        vec![
            Token::HexByte(0x41),
            Token::LBrace,
            Token::Number(10),
            Token::Comma,
            Token::Star,
            Token::RBrace
        ]
    );
    assert_eq!(
        lex_all("41{ 2 , 12 } 12")?,
        vec![
            Token::HexByte(0x41),
            Token::LBrace,
            Token::Number(2),
            Token::Comma,
            Token::Number(12),
            Token::RBrace,
            Token::HexByte(0x12)
        ]
    );
    Ok(())
}

#[test]
fn test_trivia_lexer() -> Result<()> {
    assert_eq!(
        lex_all("01 # a comment\n\t02\r\n")?,
        vec![Token::HexByte(0x01), Token::HexByte(0x02)]
    );
    assert_eq!(lex_all("  # nothing here")?, vec![]);
    Ok(())
}

#[test]
fn test_positions_lexer() -> Result<()> {
    let mut lexer = Lexer::new("01  'ab'")?;
    assert_eq!(lexer.next_token()?.map(|t| t.pos), Some(0));
    assert_eq!(lexer.next_token()?.map(|t| t.pos), Some(4));
    assert_eq!(lexer.next_token()?, None);
    Ok(())
}

#[test]
fn test_lexer_throw_errors() {
    assert_eq!(
        lex_all("4"),
        Err(ParseError::InvalidHex {
            pos: 0,
            text: "4".to_owned()
        })
    );
    assert_eq!(
        lex_all("01 4z"),
        Err(ParseError::InvalidHex {
            pos: 3,
            text: "4z".to_owned()
        })
    );
    assert_eq!(lex_all("'abc"), Err(ParseError::UnterminatedString { pos: 0 }));
    assert_eq!(lex_all("``"), Err(ParseError::EmptyString { pos: 0 }));
    assert_eq!(
        lex_all("\\q"),
        Err(ParseError::InvalidEscape { pos: 0, lit: b'q' })
    );
    assert_eq!(lex_all("\\"), Err(ParseError::UnexpectedEnd { pos: 1 }));
    assert_eq!(
        lex_all("41{x}"),
        Err(ParseError::UnexpectedChar { pos: 3, lit: b'x' })
    );
    assert_eq!(
        lex_all("@"),
        Err(ParseError::UnexpectedChar { pos: 0, lit: b'@' })
    );
}

#[test]
fn test_non_ascii_string_lexer() {
    assert_eq!(
        lex_all("01 'caf\u{e9}'"),
        Err(ParseError::NonAsciiString { pos: 7 })
    );
    assert_eq!(
        lex_all("`\u{e9}`"),
        Err(ParseError::NonAsciiString { pos: 1 })
    );
}

#[test]
fn test_iterator_stops_after_error_lexer() -> Result<()> {
    let lexer = Lexer::new("41 42 @ 43")?;
    let items: Vec<Result<Token>> = lexer.map(|item| item.map(|t| t.token)).collect();
    assert_eq!(
        items,
        vec![
            Ok(Token::HexByte(0x41)),
            Err(ParseError::UnexpectedChar { pos: 6, lit: b'@' })
        ]
    );
    Ok(())
}

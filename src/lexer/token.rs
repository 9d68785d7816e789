use std::fmt;

/// A pattern token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Two hex digits, e.g. `4f`.
    HexByte(u8),
    /// A decimal number inside `{...}`.
    Number(u32),
    /// A run of letters naming a mnemonic, e.g. `digit`.
    Word(String),
    /// `\x`, just the byte after the backslash.
    Shorthand(u8),
    /// `'...'`, unquoted.
    String(String),
    /// `` `...` ``, unquoted.
    CaseInsensitiveString(String),
    /// `.`
    Any,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `^`
    Caret,
    /// `-`
    Minus,
    /// `|`
    Pipe,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `&`. All-bits mask.
    Ampersand,
    /// `~`. Any-bits mask.
    Tilde,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::HexByte(b) => write!(f, "{b:02x}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Word(w) => f.write_str(w),
            Token::Shorthand(c) => write!(f, "\\{}", c.escape_ascii()),
            Token::String(s) => write!(f, "'{s}'"),
            Token::CaseInsensitiveString(s) => write!(f, "`{s}`"),
            Token::Any => f.write_str("."),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::LBrace => f.write_str("{"),
            Token::RBrace => f.write_str("}"),
            Token::Comma => f.write_str(","),
            Token::Caret => f.write_str("^"),
            Token::Minus => f.write_str("-"),
            Token::Pipe => f.write_str("|"),
            Token::Star => f.write_str("*"),
            Token::Plus => f.write_str("+"),
            Token::Question => f.write_str("?"),
            Token::Ampersand => f.write_str("&"),
            Token::Tilde => f.write_str("~"),
        }
    }
}

/// A [`Token`] with associated position information.
#[derive(Clone, Debug, Eq)]
pub struct PosToken {
    /// The start position of the token in the pattern string.
    pub pos: usize,
    /// The token.
    pub token: Token,
}

impl core::ops::Deref for PosToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl PartialEq for PosToken {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

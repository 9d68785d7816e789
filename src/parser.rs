use super::{
    ParseError, Result,
    ast::ParseTree,
    lexer::{Lexer, PosToken, Token},
    mnemonic::{expand_mnemonic, expand_shorthand},
};

/// Turns source text into a syntax tree of type `S`.
pub trait Parser<S> {
    /// Parses `text` into a tree.
    ///
    /// # Errors
    ///
    /// If `text` is not a valid expression, a [`ParseError`] describing the
    /// problem is returned.
    fn parse(&self, text: &str) -> Result<S>;
}

/// Parses a byte pattern into a [`ParseTree`].
///
/// # Errors
///
/// If the pattern cannot be parsed, a [`ParseError`] is returned.
pub fn parse_pattern(pattern: &str) -> Result<ParseTree> {
    RegexParser::new().parse(pattern)
}

/// The byte pattern parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexParser {
    max_length: Option<usize>,
}

impl RegexParser {
    #[must_use]
    pub const fn new() -> Self {
        Self { max_length: None }
    }

    /// Rejects expressions longer than `max` bytes before parsing them.
    #[must_use]
    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

impl Parser<ParseTree> for RegexParser {
    fn parse(&self, text: &str) -> Result<ParseTree> {
        if let Some(max) = self.max_length
            && text.len() > max
        {
            return Err(ParseError::TooLong {
                len: text.len(),
                max,
            });
        }
        TreeBuilder::new(text)?.parse()
    }
}

/// Converts a pattern string into a tree.
struct TreeBuilder<'a> {
    lexer: Lexer<'a>,
}

impl<'a> TreeBuilder<'a> {
    fn new(pattern: &'a str) -> Result<Self> {
        Ok(TreeBuilder {
            lexer: Lexer::new(pattern)?,
        })
    }

    fn parse(mut self) -> Result<ParseTree> {
        if self.lexer.peek().is_none() {
            return Err(ParseError::EmptyExpression);
        }

        let tree = self.parse_alternatives()?;

        if let Some(PosToken { pos, token }) = self.lexer.peek() {
            return Err(ParseError::UnexpectedToken {
                pos: *pos,
                found: token.to_string(),
            });
        }

        Ok(tree)
    }

    fn parse_alternatives(&mut self) -> Result<ParseTree> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.lexer.consume(&Token::Pipe)? {
            alternatives.push(self.parse_sequence()?);
        }

        Ok(if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            ParseTree::alternatives(alternatives)
        })
    }

    fn parse_sequence(&mut self) -> Result<ParseTree> {
        let mut items = Vec::new();

        while let Some(PosToken { token, .. }) = self.lexer.peek()
            && !matches!(token, Token::Pipe | Token::RParen)
        {
            items.push(self.parse_item()?);
        }

        match items.len() {
            0 => Err(match self.lexer.peek() {
                Some(PosToken { pos, token }) => ParseError::UnexpectedToken {
                    pos: *pos,
                    found: token.to_string(),
                },
                None => ParseError::UnexpectedEnd {
                    pos: self.lexer.tell(),
                },
            }),
            1 => Ok(items.remove(0)),
            _ => Ok(ParseTree::sequence(items)),
        }
    }

    fn parse_item(&mut self) -> Result<ParseTree> {
        let mut item = self.parse_atom()?;

        loop {
            item = match self.lexer.peek().map(|t| &t.token) {
                Some(Token::Star) => {
                    self.lexer.next_token()?;
                    ParseTree::zero_to_many(item)
                }
                Some(Token::Plus) => {
                    self.lexer.next_token()?;
                    ParseTree::one_to_many(item)
                }
                Some(Token::Question) => {
                    self.lexer.next_token()?;
                    ParseTree::optional(item)
                }
                Some(Token::LBrace) => self.parse_repeat(item)?,
                _ => break,
            };
        }

        Ok(item)
    }

    fn parse_repeat(&mut self, item: ParseTree) -> Result<ParseTree> {
        let open = self.lexer.expect(&Token::LBrace)?;
        let min = self.expect_number()?;

        if self.lexer.consume(&Token::RBrace)? {
            return Ok(ParseTree::repeat(min, item));
        }

        self.lexer.expect(&Token::Comma)?;
        let tree = if self.lexer.consume(&Token::Star)? {
            ParseTree::repeat_min_to_many(min, item)
        } else {
            let max = self.expect_number()?;
            if min > max {
                return Err(ParseError::InvalidRepeat {
                    pos: open.pos,
                    min,
                    max,
                });
            }
            ParseTree::repeat_min_max(min, max, item)
        };
        self.lexer.expect(&Token::RBrace)?;

        Ok(tree)
    }

    fn expect_number(&mut self) -> Result<u32> {
        match self.lexer.next_token()? {
            Some(PosToken {
                token: Token::Number(n),
                ..
            }) => Ok(n),
            Some(PosToken { pos, token }) => Err(ParseError::UnexpectedToken {
                pos,
                found: token.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd {
                pos: self.lexer.tell(),
            }),
        }
    }

    fn parse_atom(&mut self) -> Result<ParseTree> {
        let Some(PosToken { pos, token }) = self.lexer.next_token()? else {
            return Err(ParseError::UnexpectedEnd {
                pos: self.lexer.tell(),
            });
        };

        match token {
            Token::HexByte(b) => Ok(ParseTree::byte(b)),
            Token::Any => Ok(ParseTree::any()),
            Token::LBracket => self.parse_set(),
            Token::LParen => {
                let inner = self.parse_alternatives()?;
                self.lexer.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Shorthand(c) => shorthand(pos, c),
            Token::Word(word) => mnemonic(pos, word),
            Token::Ampersand => Ok(ParseTree::all_bitmask(self.expect_hex_byte()?)),
            Token::Tilde => Ok(ParseTree::any_bitmask(self.expect_hex_byte()?)),
            Token::String(text) => Ok(ParseTree::string(text)),
            Token::CaseInsensitiveString(text) => Ok(ParseTree::case_insensitive_string(text)),
            token => Err(ParseError::UnexpectedToken {
                pos,
                found: token.to_string(),
            }),
        }
    }

    fn expect_hex_byte(&mut self) -> Result<u8> {
        match self.lexer.next_token()? {
            Some(PosToken {
                token: Token::HexByte(b),
                ..
            }) => Ok(b),
            Some(PosToken { pos, token }) => Err(ParseError::UnexpectedToken {
                pos,
                found: token.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd {
                pos: self.lexer.tell(),
            }),
        }
    }

    fn parse_set(&mut self) -> Result<ParseTree> {
        let negated = self.lexer.consume(&Token::Caret)?;
        let mut members = Vec::new();

        loop {
            match self.lexer.peek() {
                Some(PosToken {
                    token: Token::RBracket,
                    pos,
                }) if members.is_empty() => {
                    return Err(ParseError::UnexpectedToken {
                        pos: *pos,
                        found: Token::RBracket.to_string(),
                    });
                }
                Some(PosToken {
                    token: Token::RBracket,
                    ..
                }) => break,
                Some(_) => members.push(self.parse_set_member()?),
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        pos: self.lexer.tell(),
                    });
                }
            }
        }

        self.lexer.expect(&Token::RBracket)?;

        Ok(if negated {
            ParseTree::inverted_set(members)
        } else {
            ParseTree::set(members)
        })
    }

    fn parse_set_member(&mut self) -> Result<ParseTree> {
        let Some(PosToken { pos, token }) = self.lexer.next_token()? else {
            return Err(ParseError::UnexpectedEnd {
                pos: self.lexer.tell(),
            });
        };

        match token {
            Token::HexByte(b) => self.maybe_range(pos, b),
            Token::String(text) if text.len() == 1 => {
                self.maybe_range(pos, text.as_bytes()[0])
            }
            Token::String(text) => Ok(ParseTree::string(text)),
            Token::CaseInsensitiveString(text) => Ok(ParseTree::case_insensitive_string(text)),
            Token::Shorthand(c) => shorthand(pos, c),
            Token::Word(word) => mnemonic(pos, word),
            Token::Ampersand => Ok(ParseTree::all_bitmask(self.expect_hex_byte()?)),
            Token::Tilde => Ok(ParseTree::any_bitmask(self.expect_hex_byte()?)),
            Token::LBracket => self.parse_set(),
            token => Err(ParseError::UnexpectedToken {
                pos,
                found: token.to_string(),
            }),
        }
    }

    /// Reads the upper bound of a range if `lower` is followed by `-`.
    fn maybe_range(&mut self, pos: usize, lower: u8) -> Result<ParseTree> {
        if !self.lexer.consume(&Token::Minus)? {
            return Ok(ParseTree::byte(lower));
        }

        match self.lexer.next_token()? {
            Some(PosToken {
                token: Token::HexByte(upper),
                ..
            }) => Ok(ParseTree::byte_range(lower, upper)),
            Some(PosToken {
                token: Token::String(text),
                ..
            }) if text.len() == 1 => Ok(ParseTree::byte_range(lower, text.as_bytes()[0])),
            Some(PosToken { pos, token }) => Err(ParseError::UnexpectedToken {
                pos,
                found: token.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd { pos }),
        }
    }
}

fn shorthand(pos: usize, c: u8) -> Result<ParseTree> {
    expand_shorthand(c).ok_or(ParseError::InvalidEscape { pos, lit: c })
}

fn mnemonic(pos: usize, word: String) -> Result<ParseTree> {
    expand_mnemonic(&word).ok_or(ParseError::UnknownWord { pos, word })
}

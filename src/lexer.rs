use super::{ParseError, Result, mnemonic::expand_shorthand};

pub mod token;

pub use token::{PosToken, Token};

/// Splits a pattern string into [`Token`]s, one token of lookahead at a
/// time.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    in_braces: bool,
    peeked: Option<PosToken>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer and reads the first token.
    ///
    /// # Errors
    ///
    /// If the first byte sequence in the input is not a valid token, an
    /// error is returned.
    pub fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer {
            input,
            pos: 0,
            in_braces: false,
            peeked: None,
        };
        lexer.peeked = lexer.read_token()?;
        Ok(lexer)
    }

    /// The next token, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&PosToken> {
        self.peeked.as_ref()
    }

    /// Consumes and returns the next token.
    ///
    /// After an error the lexer is exhausted: the lookahead token is
    /// dropped and every later call returns `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<PosToken>> {
        match self.read_token() {
            Ok(next) => Ok(std::mem::replace(&mut self.peeked, next)),
            Err(err) => {
                self.peeked = None;
                self.pos = self.input.len();
                Err(err)
            }
        }
    }

    /// Consumes the next token if it is `token`.
    pub fn consume(&mut self, token: &Token) -> Result<bool> {
        if self.peek().is_some_and(|next| next.token == *token) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the next token, which must be `token`.
    pub fn expect(&mut self, token: &Token) -> Result<PosToken> {
        match self.next_token()? {
            Some(next) if next.token == *token => Ok(next),
            Some(PosToken { pos, token }) => Err(ParseError::UnexpectedToken {
                pos,
                found: token.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd { pos: self.tell() }),
        }
    }

    /// The position just past the last byte read.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.input.len().min(self.pos)
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    fn skip_trivia(&mut self) {
        while let Some(byte) = self.byte_at(self.pos) {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'#' => {
                    while let Some(b) = self.byte_at(self.pos) {
                        self.pos += 1;
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn read_token(&mut self) -> Result<Option<PosToken>> {
        self.skip_trivia();
        let start = self.pos;
        let Some(byte) = self.byte_at(start) else {
            return Ok(None);
        };

        let token = if self.in_braces {
            self.scan_in_braces(byte)?
        } else {
            self.scan_token(byte)?
        };

        Ok(Some(PosToken { pos: start, token }))
    }

    fn scan_in_braces(&mut self, byte: u8) -> Result<Token> {
        let start = self.pos;
        self.pos += 1;
        match byte {
            b'0'..=b'9' => {
                while self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
                let text = &self.input[start..self.pos];
                text.parse().map(Token::Number).map_err(|_| ParseError::InvalidNumber {
                    pos: start,
                    text: text.to_owned(),
                })
            }
            b',' => Ok(Token::Comma),
            b'*' => Ok(Token::Star),
            b'}' => {
                self.in_braces = false;
                Ok(Token::RBrace)
            }
            lit => Err(ParseError::UnexpectedChar { pos: start, lit }),
        }
    }

    fn scan_token(&mut self, byte: u8) -> Result<Token> {
        let start = self.pos;
        self.pos += 1;
        match byte {
            b'.' => Ok(Token::Any),
            b'(' => Ok(Token::LParen),
            b')' => Ok(Token::RParen),
            b'[' => Ok(Token::LBracket),
            b']' => Ok(Token::RBracket),
            b'{' => {
                self.in_braces = true;
                Ok(Token::LBrace)
            }
            b'^' => Ok(Token::Caret),
            b'-' => Ok(Token::Minus),
            b'|' => Ok(Token::Pipe),
            b'*' => Ok(Token::Star),
            b'+' => Ok(Token::Plus),
            b'?' => Ok(Token::Question),
            b'&' => Ok(Token::Ampersand),
            b'~' => Ok(Token::Tilde),
            b'\'' => self.scan_string(start, b'\'').map(Token::String),
            b'`' => self
                .scan_string(start, b'`')
                .map(Token::CaseInsensitiveString),
            b'\\' => {
                let Some(c) = self.byte_at(self.pos) else {
                    return Err(ParseError::UnexpectedEnd { pos: self.pos });
                };
                self.pos += 1;
                if expand_shorthand(c).is_some() {
                    Ok(Token::Shorthand(c))
                } else {
                    Err(ParseError::InvalidEscape { pos: start, lit: c })
                }
            }
            hi if hi.is_ascii_hexdigit()
                && self.byte_at(self.pos).is_some_and(|lo| lo.is_ascii_hexdigit()) =>
            {
                self.pos += 1;
                let text = &self.input[start..self.pos];
                u8::from_str_radix(text, 16)
                    .map(Token::HexByte)
                    .map_err(|_| ParseError::InvalidHex {
                        pos: start,
                        text: text.to_owned(),
                    })
            }
            c if c.is_ascii_alphabetic() => {
                while self
                    .byte_at(self.pos)
                    .is_some_and(|b| b.is_ascii_alphabetic())
                {
                    self.pos += 1;
                }
                Ok(Token::Word(self.input[start..self.pos].to_owned()))
            }
            c if c.is_ascii_digit() => {
                // A lone digit, or a digit followed by something other than
                // a hex digit.
                let end = self
                    .input
                    .char_indices()
                    .map(|(i, _)| i)
                    .find(|&i| i > self.pos)
                    .unwrap_or(self.input.len());
                Err(ParseError::InvalidHex {
                    pos: start,
                    text: self.input[start..end].to_owned(),
                })
            }
            lit => Err(ParseError::UnexpectedChar { pos: start, lit }),
        }
    }

    fn scan_string(&mut self, start: usize, quote: u8) -> Result<String> {
        let content_start = self.pos;
        while let Some(b) = self.byte_at(self.pos) {
            if b == quote {
                let text = &self.input[content_start..self.pos];
                self.pos += 1;
                if text.is_empty() {
                    return Err(ParseError::EmptyString { pos: start });
                }
                return Ok(text.to_owned());
            }
            if !b.is_ascii() {
                return Err(ParseError::NonAsciiString { pos: self.pos });
            }
            self.pos += 1;
        }
        Err(ParseError::UnterminatedString { pos: start })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<PosToken>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

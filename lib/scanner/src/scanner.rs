use cursor::{Cursor, Line};
use errors::{Diagnostic, Location, Reporter};
use log::{debug, trace};

pub mod token;
pub use token::{keyword, Literal, Token, TokenData, TokenReporter, TokenType};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[cfg_attr(feature = "strict", error("Unexpected character."))]
    #[cfg_attr(not(feature = "strict"), error("Unexpected character '{0}'."))]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unterminated multi-lines comment.")]
    UnterminatedComment,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
}

impl From<ScanError> for Diagnostic {
    fn from(e: ScanError) -> Self {
        Diagnostic::new(e.line, Location::Line, e.error)
    }
}

pub struct Scanner<'a, 'r> {
    start: Cursor<'a>,
    current: Cursor<'a>,
    tokens: Vec<Token<'a>>,
    reporter: &'r dyn Reporter,
}

/// Scans `source` in one go, see [`Scanner::scan_tokens`].
pub fn scan<'a>(source: &'a str, reporter: &dyn Reporter) -> Vec<Token<'a>> {
    Scanner::new(source, reporter).scan_tokens()
}

impl<'a, 'r> Scanner<'a, 'r> {
    pub fn new(source: &'a str, reporter: &'r dyn Reporter) -> Self {
        let cursor = Cursor::new(source);
        Self { start: cursor.clone(), current: cursor, tokens: Vec::new(), reporter }
    }

    /// Turns the whole source into tokens. Lexical errors go to the reporter
    /// and scanning carries on, so the result always ends with `Eof`.
    pub fn scan_tokens(mut self) -> Vec<Token<'a>> {
        while !self.current.is_at_end() {
            self.start = self.current.clone();
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.current.line()));
        debug!("Scanned {} tokens", self.tokens.len());
        self.tokens
    }

    fn scan_token(&mut self) {
        let Some(c) = self.current.next() else {
            return;
        };

        match c {
            '(' => self.add_token(LeftParen),
            ')' => self.add_token(RightParen),
            '{' => self.add_token(LeftBrace),
            '}' => self.add_token(RightBrace),
            ',' => self.add_token(Comma),
            '.' => self.add_token(Dot),
            '-' => self.add_token(Minus),
            '+' => self.add_token(Plus),
            ';' => self.add_token(Semicolon),
            '*' => self.add_token(Star),
            '?' => self.add_token(Question),
            ':' => self.add_token(Colon),

            '!' => {
                let data = if self.current.next_if_eq('=') { BangEqual } else { Bang };
                self.add_token(data)
            }
            '=' => {
                let data = if self.current.next_if_eq('=') { EqualEqual } else { Equal };
                self.add_token(data)
            }
            '<' => {
                let data = if self.current.next_if_eq('=') { LessEqual } else { Less };
                self.add_token(data)
            }
            '>' => {
                let data = if self.current.next_if_eq('=') { GreaterEqual } else { Greater };
                self.add_token(data)
            }

            '/' => {
                if self.current.next_if_eq('/') {
                    self.line_comment();
                } else if self.current.next_if_eq('*') {
                    self.block_comment();
                } else {
                    self.add_token(Slash)
                }
            }

            // The cursor counts lines itself.
            ' ' | '\r' | '\t' | '\n' => (),

            '"' => self.string(),
            d if d.is_ascii_digit() => self.number(),
            a if is_alpha(a) => self.identifier(),

            c => self.error(ScanErrorType::UnexpectedCharacter(c)),
        }
    }

    fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.current)
    }

    fn add_token(&mut self, data: TokenData<'a>) {
        let token = Token::new(data, self.lexeme(), self.current.line());
        trace!("{:?}", token);
        self.tokens.push(token);
    }

    fn error(&self, error: ScanErrorType) {
        let error = ScanError { error, line: self.current.line() };
        trace!("{:?}", error);
        self.reporter.report(error.into());
    }

    fn line_comment(&mut self) {
        while !matches!(self.current.peek(), Some('\n') | None) {
            self.current.next();
        }
    }

    fn block_comment(&mut self) {
        let mut depth = 1usize;
        while depth > 0 {
            match (self.current.peek(), self.current.peek_next()) {
                (None, _) => return self.error(ScanErrorType::UnterminatedComment),
                (Some('/'), Some('*')) => {
                    self.current.next();
                    self.current.next();
                    depth += 1;
                }
                (Some('*'), Some('/')) => {
                    self.current.next();
                    self.current.next();
                    depth -= 1;
                }
                _ => {
                    self.current.next();
                }
            }
        }
    }

    fn string(&mut self) {
        loop {
            match self.current.next() {
                Some('"') => break,
                Some(_) => (),
                None => return self.error(ScanErrorType::UnterminatedString),
            }
        }

        let lexeme = self.lexeme();
        self.add_token(Str(&lexeme[1..lexeme.len() - 1]));
    }

    fn number(&mut self) {
        self.consume_digits();

        // A trailing '.' without digits is not part of the number.
        if self.current.peek() == Some('.')
            && self.current.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.current.next();
            self.consume_digits();
        }

        match self.lexeme().parse() {
            Ok(n) => self.add_token(Number(n)),
            Err(e) => unreachable!("Digits must parse as f64: {e}"),
        }
    }

    fn consume_digits(&mut self) {
        while self.current.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current.next();
        }
    }

    fn identifier(&mut self) {
        while self.current.peek().is_some_and(|c| is_alpha(c) || c.is_ascii_digit()) {
            self.current.next();
        }

        let data = keyword(self.lexeme()).unwrap_or(Identifier);
        self.add_token(data)
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

use std::{collections::HashMap, fmt::Display};

use cursor::Line;
use errors::{Location, Reporter};
use lazy_static::lazy_static;
use strum::EnumDiscriminants;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub data: TokenData<'a>,
    pub lexeme: &'a str,
    pub line: Line,
}

impl<'a> Token<'a> {
    pub fn new(data: TokenData<'a>, lexeme: &'a str, line: Line) -> Token<'a> {
        Self { data, lexeme, line }
    }

    pub fn eof(line: Line) -> Token<'a> {
        Self::new(TokenData::Eof, "", line)
    }

    pub fn ty(&self) -> TokenType {
        TokenType::from(&self.data)
    }

    pub fn lexeme(&self) -> &'a str {
        self.lexeme
    }

    pub fn line(&self) -> Line {
        self.line
    }

    /// The decoded value of a number or string token.
    pub fn literal(&self) -> Option<Literal<'a>> {
        match self.data {
            TokenData::Number(n) => Some(Literal::Number(n)),
            TokenData::Str(s) => Some(Literal::Str(s)),
            _ => None,
        }
    }

    /// How a diagnostic pointing at this token names it.
    pub fn location(&self) -> Location {
        match self.data {
            TokenData::Eof => Location::End,
            _ => Location::Lexeme(self.lexeme.to_string()),
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Number(f64),
    Str(&'a str),
}

#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(TokenType), derive(Hash))]
pub enum TokenData<'a> {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Question,
    Colon,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    Str(&'a str),
    Number(f64),

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenData<'static>> = HashMap::from([
        ("and", TokenData::And),
        ("class", TokenData::Class),
        ("else", TokenData::Else),
        ("false", TokenData::False),
        ("for", TokenData::For),
        ("fun", TokenData::Fun),
        ("if", TokenData::If),
        ("nil", TokenData::Nil),
        ("or", TokenData::Or),
        ("print", TokenData::Print),
        ("return", TokenData::Return),
        ("super", TokenData::Super),
        ("this", TokenData::This),
        ("true", TokenData::True),
        ("var", TokenData::Var),
        ("while", TokenData::While),
    ]);
}

/// Looks up a reserved word.
pub fn keyword(identifier: &str) -> Option<TokenData<'static>> {
    KEYWORDS.get(identifier).cloned()
}

/// Reporting a syntax error at a token, for every [`Reporter`].
pub trait TokenReporter: Reporter {
    fn error_at_token(&self, token: &Token, message: &str) {
        self.error_at(token.line(), token.location(), message);
    }
}

impl<R: Reporter + ?Sized> TokenReporter for R {}

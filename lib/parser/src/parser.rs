mod expr;

use cursor::Line;
use errors::{Diagnostic, Location, Reporter};
use log::{debug, trace};
use scanner::{Token, TokenData, TokenReporter, TokenType};

pub use expr::{Expr, LiteralValue};
use TokenType::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect ':' after expression.")]
    ExpectedColon,
    #[error("Binary operation require left expression.")]
    MissingLeftOperand,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error{at}: {error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub line: Line,
    pub at: Location,
}

impl ParseError {
    fn new(error: ParseErrorType, token: &Token) -> Self {
        Self { error, line: token.line(), at: token.location() }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(e: ParseError) -> Self {
        Diagnostic::new(e.line, e.at, e.error)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Operators that are reported as missing their left operand when an
/// expression starts with them.
const BINARY_OPERATORS: [TokenType; 11] = [
    Comma,
    BangEqual,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Minus,
    Plus,
    Slash,
    Star,
];

pub struct Parser<'a, 'r> {
    tokens: Vec<Token<'a>>,
    current: usize,
    reporter: &'r dyn Reporter,
}

/// Scans and parses `source` as a single expression.
pub fn parse_source<'a>(source: &'a str, reporter: &dyn Reporter) -> Result<Expr<'a>> {
    Parser::new(scanner::scan(source, reporter), reporter).parse()
}

impl<'a, 'r> Parser<'a, 'r> {
    pub fn new(mut tokens: Vec<Token<'a>>, reporter: &'r dyn Reporter) -> Self {
        if tokens.last().map(Token::ty) != Some(Eof) {
            let line = tokens.last().map(Token::line).unwrap_or_default();
            tokens.push(Token::eof(line));
        }
        Self { tokens, current: 0, reporter }
    }

    /// Parses one expression. Errors are reported before they are returned,
    /// and no partial tree is handed out.
    pub fn parse(&mut self) -> Result<Expr<'a>> {
        let result = self.expression();
        match &result {
            Ok(expr) => debug!("Parsed {expr}"),
            Err(e) => debug!("Parse failed: {e}"),
        }
        result
    }

    /// Skips tokens until the start of the next statement.
    ///
    /// Stops right after a `;` or right before a keyword that begins a
    /// statement.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().ty() == Semicolon {
                return;
            }

            if let Class | Fun | Var | For | If | While | Print | Return = self.peek().ty() {
                return;
            }

            self.advance();
        }
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.comma()
    }

    fn comma(&mut self) -> Result<Expr<'a>> {
        self.left_associative(&[Comma], Self::equality)
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        self.left_associative(&[BangEqual, EqualEqual], Self::ternary)
    }

    fn ternary(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.comparison()?;

        while self.match_any(&[Question]) {
            let question = self.previous().clone();
            let then_branch = self.comparison()?;
            let colon = self.consume(Colon, ParseErrorType::ExpectedColon)?;
            let else_branch = self.comparison()?;
            expr = Expr::Ternary {
                condition: Box::new(expr),
                question,
                then_branch: Box::new(then_branch),
                colon,
                else_branch: Box::new(else_branch),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        self.left_associative(&[Greater, GreaterEqual, Less, LessEqual], Self::term)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        self.left_associative(&[Minus, Plus], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        self.left_associative(&[Slash, Star], Self::unary)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if self.match_any(&[Bang, Minus]) {
            let operator = self.previous().clone();
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        let value = match self.peek().data.clone() {
            TokenData::False => LiteralValue::Boolean(false),
            TokenData::True => LiteralValue::Boolean(true),
            TokenData::Nil => LiteralValue::Nil,
            TokenData::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(RightParen, ParseErrorType::ExpectedRightParen)?;
                return Ok(Expr::Grouping(Box::new(expr)));
            }
            _ => match self.peek().literal() {
                Some(literal) => literal.into(),
                None if self.check(&BINARY_OPERATORS) => return Err(self.missing_left_operand()),
                None => return Err(self.error(self.peek(), ParseErrorType::ExpectedExpression)),
            },
        };

        self.advance();
        Ok(Expr::Literal(value))
    }

    /// `operand (operator operand)*`, folded to the left.
    fn left_associative(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> Result<Expr<'a>>,
    ) -> Result<Expr<'a>> {
        let mut expr = operand(self)?;

        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// The current token is a binary operator with nothing on its left.
    /// Parse and drop its right operand so we end up behind the whole
    /// malformed operation, then fail at the operator.
    fn missing_left_operand(&mut self) -> ParseError {
        let operator = self.advance().clone();
        trace!("Missing left operand for {:?}", operator);

        let right = match operator.ty() {
            Comma => self.equality(),
            BangEqual | EqualEqual => self.ternary(),
            Greater | GreaterEqual | Less | LessEqual => self.term(),
            Minus | Plus => self.factor(),
            _ => self.unary(),
        };

        match right {
            Ok(_) => self.error(&operator, ParseErrorType::MissingLeftOperand),
            Err(e) => e,
        }
    }

    fn consume(&mut self, ty: TokenType, error: ParseErrorType) -> Result<Token<'a>> {
        if self.check(&[ty]) {
            return Ok(self.advance().clone());
        }

        Err(self.error(self.peek(), error))
    }

    fn error(&self, token: &Token<'a>, error: ParseErrorType) -> ParseError {
        self.reporter.error_at_token(token, &error.to_string());
        let error = ParseError::new(error, token);
        trace!("{:?}", error);
        error
    }
}

// Helpers
impl<'a, 'r> Parser<'a, 'r> {
    fn match_any(&mut self, types: &[TokenType]) -> bool {
        if self.check(types) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, types: &[TokenType]) -> bool {
        !self.is_at_end() && types.contains(&self.peek().ty())
    }

    fn advance(&mut self) -> &Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().ty() == Eof
    }

    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token<'a> {
        &self.tokens[self.current.saturating_sub(1)]
    }
}

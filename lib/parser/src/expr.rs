use std::fmt::{self, Display, Formatter};

use scanner::{Literal, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Ternary {
        condition: Box<Expr<'a>>,
        question: Token<'a>,
        then_branch: Box<Expr<'a>>,
        colon: Token<'a>,
        else_branch: Box<Expr<'a>>,
    },
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    // Not produced by the expression grammar yet.
    Assign { name: Token<'a>, value: Box<Expr<'a>> },
    Unary { operator: Token<'a>, right: Box<Expr<'a>> },
    Grouping(Box<Expr<'a>>),
    Literal(LiteralValue<'a>),
    // Not produced by the expression grammar yet.
    Variable(Token<'a>),
}

impl<'a> Expr<'a> {
    pub fn binary(left: Expr<'a>, operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
    }

    /// Renders the expression back into source text that scans and parses
    /// to the same tree.
    pub fn to_source(&self) -> String {
        match self {
            Expr::Ternary { condition, then_branch, else_branch, .. } => format!(
                "{} ? {} : {}",
                condition.to_source(),
                then_branch.to_source(),
                else_branch.to_source()
            ),
            Expr::Binary { left, operator, right } => match operator.ty() {
                scanner::TokenType::Comma => {
                    format!("{}, {}", left.to_source(), right.to_source())
                }
                _ => format!("{} {} {}", left.to_source(), operator, right.to_source()),
            },
            Expr::Assign { name, value } => format!("{} = {}", name, value.to_source()),
            Expr::Unary { operator, right } => format!("{}{}", operator, right.to_source()),
            Expr::Grouping(expression) => format!("({})", expression.to_source()),
            Expr::Literal(LiteralValue::Str(s)) => format!("\"{s}\""),
            // Too many digits for an f64 scan as infinity, so print such a run.
            Expr::Literal(LiteralValue::Number(n)) if n.is_infinite() => {
                format!("1{}", "0".repeat(f64::MAX_10_EXP as usize + 1))
            }
            Expr::Literal(value) => value.to_string(),
            Expr::Variable(name) => name.to_string(),
        }
    }

    /// Structural equality that ignores which lines the tokens came from.
    pub fn same_shape(&self, other: &Expr) -> bool {
        fn same_token(a: &Token, b: &Token) -> bool {
            a.data == b.data && a.lexeme == b.lexeme
        }

        match (self, other) {
            (
                Expr::Ternary { condition, question, then_branch, colon, else_branch },
                Expr::Ternary {
                    condition: other_condition,
                    question: other_question,
                    then_branch: other_then,
                    colon: other_colon,
                    else_branch: other_else,
                },
            ) => {
                condition.same_shape(other_condition)
                    && same_token(question, other_question)
                    && then_branch.same_shape(other_then)
                    && same_token(colon, other_colon)
                    && else_branch.same_shape(other_else)
            }
            (
                Expr::Binary { left, operator, right },
                Expr::Binary { left: other_left, operator: other_operator, right: other_right },
            ) => {
                left.same_shape(other_left)
                    && same_token(operator, other_operator)
                    && right.same_shape(other_right)
            }
            (
                Expr::Assign { name, value },
                Expr::Assign { name: other_name, value: other_value },
            ) => same_token(name, other_name) && value.same_shape(other_value),
            (
                Expr::Unary { operator, right },
                Expr::Unary { operator: other_operator, right: other_right },
            ) => same_token(operator, other_operator) && right.same_shape(other_right),
            (Expr::Grouping(expression), Expr::Grouping(other)) => expression.same_shape(other),
            (Expr::Literal(value), Expr::Literal(other)) => value == other,
            (Expr::Variable(name), Expr::Variable(other)) => same_token(name, other),
            _ => false,
        }
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ternary { condition, then_branch, else_branch, .. } => {
                write!(f, "(?: {} {} {})", condition, then_branch, else_branch)
            }
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", operator, left, right)
            }
            Expr::Assign { name, value } => {
                write!(f, "(= {} {})", name, value)
            }
            Expr::Unary { operator, right } => {
                write!(f, "({} {})", operator, right)
            }
            Expr::Grouping(expression) => {
                write!(f, "(group {})", expression)
            }
            Expr::Literal(value) => {
                write!(f, "{}", value)
            }
            Expr::Variable(name) => {
                write!(f, "{}", name)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    Str(&'a str),
    Boolean(bool),
    Nil,
}

impl<'a> From<Literal<'a>> for LiteralValue<'a> {
    fn from(literal: Literal<'a>) -> Self {
        match literal {
            Literal::Number(n) => LiteralValue::Number(n),
            Literal::Str(s) => LiteralValue::Str(s),
        }
    }
}

impl<'a> Display for LiteralValue<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::Str(s) => write!(f, "{s}"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}

use super::{
    Parser,
    error::{ParseError, ParseErrorKind},
};
use pp_ast::{BasicLit, Expr, Ident, LitKind};
use pp_token::{Operator, Token, TokenKind};

/// Deepest run of unary operators and parentheses an expression may nest
pub const MAX_EXPR_NESTING: usize = 128;

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_expr(Operator::LOWEST_PRECEDENCE)
    }

    /// Precedence climbing over operators binding at least as tightly as `min_precedence`
    pub fn parse_binary_expr(&mut self, min_precedence: usize) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary_expr()?;

        loop {
            let Some(op) = self.peek_expr_token().kind.binary_operator() else {
                return Ok(left);
            };

            if op.precedence() < min_precedence {
                return Ok(left);
            }

            let op_pos = self.input.next().pos;
            let right = self.parse_binary_expr(op.precedence() + 1)?;
            left = Expr::binary(left, op, op_pos, right);
        }
    }

    pub fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek_expr_token().kind {
            TokenKind::Number => {
                let token = self.input.next();

                Ok(Expr::BasicLit(BasicLit {
                    kind: LitKind::Int,
                    value: token.lexeme,
                    pos: token.pos,
                }))
            }
            TokenKind::Identifier => {
                let token = self.input.next();
                Ok(Expr::Ident(Ident::new(token.lexeme, token.pos)))
            }
            TokenKind::Minus => self.nested(|parser| {
                let op_pos = parser.input.next().pos;
                let operand = parser.parse_unary_expr()?;
                Ok(Expr::unary(Operator::Sub, op_pos, operand))
            }),
            TokenKind::OpenParen => self.nested(|parser| {
                parser.traced("Paren", |parser| {
                    let opening = parser.input.next().pos;
                    let inner = parser.parse_expr()?;
                    let closing = parser
                        .input
                        .expect(TokenKind::CloseParen, "parentheses expression")?;

                    Ok(Expr::paren(opening, inner, closing.pos))
                })
            }),
            _ => self.parse_primary_expr(),
        }
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_operand()
    }

    // No operand form is recognized here, so leave an empty placeholder
    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let pos = self.peek_expr_token().pos;
        Ok(Expr::Bad { from: pos, to: pos })
    }

    // A macro value ends with its line, other expressions may span lines
    fn peek_expr_token(&mut self) -> &Token {
        if self.in_macro_value {
            self.peek_macro_line()
        } else {
            self.input.peek_non_space()
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        if self.nesting == MAX_EXPR_NESTING {
            let token = self.input.peek().clone();

            return Err(ParseErrorKind::NestedTooDeeply {
                limit: MAX_EXPR_NESTING,
            }
            .at(self.input.source_name(), &token));
        }

        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::MAX_EXPR_NESTING;
    use crate::{error::ParseErrorKind, parse};
    use pp_ast::{BasicLit, Expr, LitKind, Node};
    use pp_token::{Operator, Pos};

    fn single_expr(text: &str) -> Expr {
        let mut nodes = parse("x.h", text).unwrap();
        assert_eq!(nodes.len(), 1, "{:?}", nodes);

        match nodes.pop() {
            Some(Node::Expr(expr)) => expr,
            other => panic!("expected expression, got {:?}", other),
        }
    }

    fn int(value: &str, pos: usize) -> Expr {
        Expr::BasicLit(BasicLit {
            kind: LitKind::Int,
            value: value.into(),
            pos: Pos(pos),
        })
    }

    #[test]
    fn division_of_literals() {
        assert_eq!(
            single_expr("1 / 1"),
            Expr::binary(int("1", 0), Operator::Quo, Pos(2), int("1", 4))
        );
    }

    #[test]
    fn negation() {
        assert_eq!(
            single_expr("-1"),
            Expr::unary(Operator::Sub, Pos(0), int("1", 1))
        );
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(single_expr("a - b - c").to_string(), "a - b - c");

        let Expr::Binary { left, right, .. } = single_expr("a - b - c") else {
            panic!("expected binary");
        };
        assert!(left.is_binary());
        assert!(right.is_ident());
    }

    #[test]
    fn tighter_operators_bind_first() {
        let Expr::Binary { op, right, .. } = single_expr("a || b && c - d / e") else {
            panic!("expected binary");
        };
        assert_eq!(op, Operator::LogicalOr);

        let Expr::Binary { op, right, .. } = *right else {
            panic!("expected binary");
        };
        assert_eq!(op, Operator::LogicalAnd);

        let Expr::Binary { op, right, .. } = *right else {
            panic!("expected binary");
        };
        assert_eq!(op, Operator::Sub);
        assert!(matches!(*right, Expr::Binary { op: Operator::Quo, .. }));
    }

    #[test]
    fn bitwise_operators() {
        let Expr::Binary { op, left, .. } = single_expr("a | b & c") else {
            panic!("expected binary");
        };
        assert_eq!(op, Operator::Or);
        assert!(left.is_ident());

        let Expr::Binary { op, .. } = single_expr("a * b") else {
            panic!("expected binary");
        };
        assert_eq!(op, Operator::Mul);
    }

    #[test]
    fn parentheses_reset_precedence() {
        let Expr::Binary { left, op, .. } = single_expr("(a - b) / c") else {
            panic!("expected binary");
        };
        assert_eq!(op, Operator::Quo);

        let Expr::Paren { inner, closing, .. } = *left else {
            panic!("expected parentheses");
        };
        assert!(inner.is_binary());
        assert_eq!(closing, Pos(6));
    }

    #[test]
    fn unclosed_parenthesis() {
        let error = parse("x.h", "(a - b").unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::Syntax {
                context: "parentheses expression",
                ..
            }
        ));
    }

    #[test]
    fn missing_operand_is_empty_placeholder() {
        let nodes = parse("x.h", "1 / ;").unwrap();

        let Node::Expr(Expr::Binary { right, .. }) = &nodes[0] else {
            panic!("expected binary");
        };
        assert_eq!(
            **right,
            Expr::Bad {
                from: Pos(4),
                to: Pos(4)
            }
        );
        assert_eq!(nodes[1].pos(), Pos(4));
    }

    #[test]
    fn hex_literals_keep_their_spelling() {
        assert_eq!(single_expr("0xFFu"), int("0xFFu", 0));
    }

    #[test]
    fn bare_expressions_continue_across_lines() {
        assert_eq!(
            single_expr("1\n/ 1"),
            Expr::binary(int("1", 0), Operator::Quo, Pos(2), int("1", 4))
        );
        assert_eq!(
            single_expr("1 /\n 1"),
            Expr::binary(int("1", 0), Operator::Quo, Pos(2), int("1", 5))
        );
    }

    #[test]
    fn nesting_within_limit() {
        let depth = MAX_EXPR_NESTING / 2;
        let text = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(single_expr(&text).end(), Pos(text.len()));

        let text = format!("{}1", "- ".repeat(MAX_EXPR_NESTING));
        assert!(single_expr(&text).is_unary());
    }

    #[test]
    fn runaway_nesting_is_an_error() {
        let text = format!("{}1", "- ".repeat(200_000));
        let error = parse("deep.h", &text).unwrap_err();

        assert_eq!(
            error.kind,
            ParseErrorKind::NestedTooDeeply {
                limit: MAX_EXPR_NESTING
            }
        );
        assert_eq!(error.pos, Pos(2 * MAX_EXPR_NESTING));

        let text = format!("{}1", "(".repeat(200_000));
        assert!(parse("deep.h", &text).unwrap_err().kind.is_nested_too_deeply());
    }
}

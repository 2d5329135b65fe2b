use crate::error::{ParseError, ParseErrorKind};
use pp_token::{Pos, Token, TokenKind};
use std::fmt::Debug;

/// Token source with a pushback depth of one
pub struct Input<I: Iterator<Item = Token>> {
    source_name: String,
    tokens: I,
    pending: Option<Token>,
    previous: Option<Token>,
    last_end: Pos,
    last_line: usize,
}

impl<I: Iterator<Item = Token>> Debug for Input<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input<Iterator<Token>>")
            .field("source_name", &self.source_name)
            .finish()
    }
}

impl<I: Iterator<Item = Token>> Input<I> {
    pub fn new(source_name: String, tokens: I) -> Self {
        Self {
            source_name,
            tokens,
            pending: None,
            previous: None,
            last_end: Pos::START,
            last_line: 1,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    // Once the source runs dry, keep answering with end-of-file
    fn pull(tokens: &mut I, last_end: &mut Pos, last_line: &mut usize) -> Token {
        match tokens.next() {
            Some(token) => {
                *last_end = token.end();
                *last_line = token.line;
                token
            }
            None => Token::new(TokenKind::EndOfFile, "", *last_end, *last_line),
        }
    }

    pub fn peek(&mut self) -> &Token {
        let Self {
            tokens,
            pending,
            last_end,
            last_line,
            ..
        } = self;

        pending.get_or_insert_with(|| Self::pull(tokens, last_end, last_line))
    }

    pub fn next(&mut self) -> Token {
        let token = match self.pending.take() {
            Some(token) => token,
            None => Self::pull(&mut self.tokens, &mut self.last_end, &mut self.last_line),
        };

        self.previous = Some(token.clone());
        token
    }

    /// Un-consumes the most recently consumed token
    pub fn backup(&mut self) {
        if self.pending.is_none() {
            self.pending = self.previous.take();
        }
    }

    pub fn peek_non_space(&mut self) -> &Token {
        while self.peek().is_whitespace() {
            self.next();
        }

        self.peek()
    }

    pub fn next_non_space(&mut self) -> Token {
        loop {
            let token = self.next();

            if !token.is_whitespace() {
                return token;
            }
        }
    }

    /// Skips whitespace that stays on the current line
    pub fn peek_same_line(&mut self) -> &Token {
        while self.peek().is_whitespace() && !self.peek().is_line_break() {
            self.next();
        }

        self.peek()
    }

    pub fn expect(&mut self, kind: TokenKind, context: &'static str) -> Result<Token, ParseError> {
        let token = self.next_non_space();

        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(&token, context))
        }
    }

    pub fn expect_one_of(
        &mut self,
        a: TokenKind,
        b: TokenKind,
        context: &'static str,
    ) -> Result<Token, ParseError> {
        let token = self.next_non_space();

        if token.kind == a || token.kind == b {
            Ok(token)
        } else {
            Err(self.unexpected(&token, context))
        }
    }

    pub fn unexpected(&self, token: &Token, context: &'static str) -> ParseError {
        ParseErrorKind::unexpected(token, context).at(self.source_name(), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use build_pp_token::Scanner;

    fn input(text: &str) -> Input<Scanner<'_>> {
        Input::new("test.h".into(), Scanner::new(text))
    }

    #[test]
    fn peek_then_next_agree() {
        let mut input = input("a b");
        assert_eq!(input.peek().lexeme, "a");
        assert_eq!(input.peek().lexeme, "a");
        assert_eq!(input.next().lexeme, "a");
        assert!(input.next().is_whitespace());
        assert_eq!(input.next().lexeme, "b");
    }

    #[test]
    fn backup_is_single_step() {
        let mut input = input("a b c");
        input.next();
        input.next();
        let b = input.next();

        input.backup();
        input.backup();
        assert_eq!(input.next(), b);
        assert!(input.next().is_whitespace());
    }

    #[test]
    fn non_space_variants_skip_whitespace() {
        let mut input = input("  \n x y");
        assert_eq!(input.peek_non_space().lexeme, "x");
        assert_eq!(input.next_non_space().lexeme, "x");
        assert_eq!(input.next_non_space().lexeme, "y");
    }

    #[test]
    fn same_line_lookahead_stops_at_line_break() {
        let mut input = input("a \n b");
        input.next();
        assert!(input.peek_same_line().is_line_break());
        assert_eq!(input.peek_non_space().lexeme, "b");
    }

    #[test]
    fn exhausted_source_keeps_reporting_end_of_file() {
        let mut input = Input::new("empty.h".into(), std::iter::empty::<Token>());
        assert!(input.next().kind.is_end_of_file());
        assert!(input.next().kind.is_end_of_file());
        assert_eq!(input.peek().pos, Pos::START);
    }

    #[test]
    fn synthetic_end_of_file_follows_last_token() {
        let tokens = vec![Token::new(TokenKind::Identifier, "abc", Pos(4), 2)];
        let mut input = Input::new("cut.h".into(), tokens.into_iter());
        input.next();

        let end = input.next();
        assert!(end.kind.is_end_of_file());
        assert_eq!(end.pos, Pos(7));
        assert_eq!(end.line, 2);
    }

    #[test]
    fn expect_reports_context() {
        let mut input = input("#include 5");
        input.next();

        let error = input
            .expect_one_of(
                TokenKind::IncludePath,
                TokenKind::IncludePathSystem,
                "include directive",
            )
            .unwrap_err();

        assert_eq!(
            error.kind,
            ParseErrorKind::Syntax {
                found: "number(\"5\")".into(),
                context: "include directive",
            }
        );
        assert_eq!(error.pos, Pos(9));
    }
}

use derive_more::IsVariant;
use pp_token::{LexErrorKind, Pos, Token, TokenKind};
use std::fmt::Display;

/// First problem that stopped the parse, along with where it happened
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub source_name: String,
    pub line: usize,
    pub pos: Pos,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum ParseErrorKind {
    Lex(LexErrorKind),
    Syntax {
        found: String,
        context: &'static str,
    },
    NestedTooDeeply {
        limit: usize,
    },
}

impl ParseErrorKind {
    /// Error for an unexpected token, which is a lex error if the token is one
    pub fn unexpected(token: &Token, context: &'static str) -> Self {
        match &token.kind {
            TokenKind::Error(error) => ParseErrorKind::Lex(error.clone()),
            _ => ParseErrorKind::Syntax {
                found: token.to_string(),
                context,
            },
        }
    }

    pub fn at(self, source_name: impl Into<String>, token: &Token) -> ParseError {
        ParseError {
            source_name: source_name.into(),
            line: token.line,
            pos: token.pos,
            kind: self,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: ", self.source_name, self.line)?;

        match &self.kind {
            ParseErrorKind::Lex(error) => write!(f, "{}", error),
            ParseErrorKind::Syntax { found, context } => {
                write!(f, "unexpected {} in {}", found, context)
            }
            ParseErrorKind::NestedTooDeeply { limit } => {
                write!(f, "expression nested deeper than {} levels", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_message() {
        let token = Token::new(TokenKind::Identifier, "BAD", Pos(9), 3);
        let error = ParseErrorKind::unexpected(&token, "include directive").at("foo.h", &token);

        assert!(error.kind.is_syntax());
        assert_eq!(error.pos, Pos(9));
        assert_eq!(
            error.to_string(),
            "foo.h:3: unexpected identifier(\"BAD\") in include directive"
        );
    }

    #[test]
    fn error_tokens_become_lex_errors() {
        let token = Token::new(
            TokenKind::Error(LexErrorKind::UnrecognizedCharacter('$')),
            "$",
            Pos(0),
            1,
        );
        let error = ParseErrorKind::unexpected(&token, "macro definition").at("a.h", &token);

        assert_eq!(
            error.kind,
            ParseErrorKind::Lex(LexErrorKind::UnrecognizedCharacter('$'))
        );
        assert_eq!(error.to_string(), "a.h:1: Unrecognized character '$'");
    }

    #[test]
    fn nesting_error_message() {
        let token = Token::new(TokenKind::OpenParen, "(", Pos(40), 2);
        let error = ParseErrorKind::NestedTooDeeply { limit: 128 }.at("deep.h", &token);

        assert!(error.kind.is_nested_too_deeply());
        assert_eq!(
            error.to_string(),
            "deep.h:2: expression nested deeper than 128 levels"
        );
    }
}

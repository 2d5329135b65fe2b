mod kind;
mod lex_error;
mod operator;
mod pos;

pub use kind::TokenKind;
pub use lex_error::LexErrorKind;
pub use operator::Operator;
pub use pos::Pos;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Pos,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, pos: Pos, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            pos,
            line,
        }
    }

    /// Exclusive end offset of the lexeme
    pub fn end(&self) -> Pos {
        self.pos + self.lexeme.len()
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// Whitespace that crosses a line boundary
    pub fn is_line_break(&self) -> bool {
        self.kind.is_whitespace() && self.lexeme.contains('\n')
    }

    /// Tokens after which a scanner produces nothing more
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile | TokenKind::Error(_))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::EndOfFile => write!(f, "end-of-file"),
            TokenKind::Error(error) => write!(f, "{}", error),
            kind if self.lexeme.chars().count() > 30 => {
                let truncated = self.lexeme.chars().take(30).collect::<String>();
                write!(f, "{}({:?}...)", kind, truncated)
            }
            kind => write!(f, "{}({:?})", kind, self.lexeme),
        }
    }
}

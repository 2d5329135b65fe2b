use crate::{LexErrorKind, Operator};
use derive_more::IsVariant;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum TokenKind {
    Error(LexErrorKind),
    EndOfFile,
    Comment,
    Whitespace,
    Define,
    Include,
    IfDef,
    IfNotDef,
    Else,
    EndIf,
    Extern,
    IncludePath,
    IncludePathSystem,
    Number,
    Identifier,
    String,
    BitOr,
    LogicalOr,
    BitAnd,
    LogicalAnd,
    Minus,
    Decrement,
    Slash,
    Assign,
    Semicolon,
    Star,
    Comma,
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
}

impl TokenKind {
    /// Binary operator this token stands for, if it is wired into the expression grammar
    pub fn binary_operator(&self) -> Option<Operator> {
        match self {
            TokenKind::Minus => Some(Operator::Sub),
            TokenKind::Slash => Some(Operator::Quo),
            TokenKind::Star => Some(Operator::Mul),
            TokenKind::BitOr => Some(Operator::Or),
            TokenKind::BitAnd => Some(Operator::And),
            TokenKind::LogicalOr => Some(Operator::LogicalOr),
            TokenKind::LogicalAnd => Some(Operator::LogicalAnd),
            _ => None,
        }
    }

    pub fn precedence(&self) -> usize {
        self.binary_operator()
            .map(Operator::precedence)
            .unwrap_or(0)
    }

    pub fn begins_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::Identifier | TokenKind::Minus | TokenKind::OpenParen
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Error(_) => "error",
            TokenKind::EndOfFile => "end-of-file",
            TokenKind::Comment => "comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Define => "#define",
            TokenKind::Include => "#include",
            TokenKind::IfDef => "#ifdef",
            TokenKind::IfNotDef => "#ifndef",
            TokenKind::Else => "#else",
            TokenKind::EndIf => "#endif",
            TokenKind::Extern => "extern",
            TokenKind::IncludePath => "include path",
            TokenKind::IncludePathSystem => "system include path",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::BitOr => "'|'",
            TokenKind::LogicalOr => "'||'",
            TokenKind::BitAnd => "'&'",
            TokenKind::LogicalAnd => "'&&'",
            TokenKind::Minus => "'-'",
            TokenKind::Decrement => "'--'",
            TokenKind::Slash => "'/'",
            TokenKind::Assign => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::Star => "'*'",
            TokenKind::Comma => "','",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenCurly => "'{'",
            TokenKind::CloseCurly => "'}'",
        };

        f.write_str(name)
    }
}

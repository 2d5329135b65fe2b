use derive_more::IsVariant;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum LexErrorKind {
    UnrecognizedCharacter(char),
    UnterminatedComment,
    UnterminatedStringLiteral,
    UnterminatedIncludePath { closing: char },
}

impl Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexErrorKind::UnrecognizedCharacter(c) => write!(f, "Unrecognized character {:?}", c),
            LexErrorKind::UnterminatedComment => write!(f, "Unterminated multi-line comment"),
            LexErrorKind::UnterminatedStringLiteral => write!(f, "Unterminated string literal"),
            LexErrorKind::UnterminatedIncludePath { closing } => {
                write!(f, "Unterminated include path, expected closing '{}'", closing)
            }
        }
    }
}

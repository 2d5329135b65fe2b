use crate::BasicLit;
use derive_more::IsVariant;
use pp_token::Pos;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum Decl {
    Extern {
        key_pos: Pos,
        decl: Option<Box<Decl>>,
    },
    /// `"C" {` following an `extern`, up to and including the brace
    CLinkage {
        value: BasicLit,
        body_pos: Pos,
    },
    /// Skipped declaration, such as a `typedef` line
    Bad {
        from: Pos,
        to: Pos,
    },
}

impl Decl {
    pub fn pos(&self) -> Pos {
        match self {
            Decl::Extern { key_pos, .. } => *key_pos,
            Decl::CLinkage { value, .. } => value.pos,
            Decl::Bad { from, .. } => *from,
        }
    }

    pub fn end(&self) -> Pos {
        match self {
            Decl::Extern { key_pos, decl } => decl
                .as_deref()
                .map(Decl::end)
                .unwrap_or(*key_pos + "extern".len()),
            Decl::CLinkage { body_pos, .. } => *body_pos + 1,
            Decl::Bad { to, .. } => *to,
        }
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decl::Extern { decl: Some(decl), .. } => write!(f, "extern {}", decl),
            Decl::Extern { decl: None, .. } => f.write_str("extern"),
            Decl::CLinkage { value, .. } => write!(f, "{} {{", value),
            Decl::Bad { .. } => f.write_str("<bad declaration>"),
        }
    }
}

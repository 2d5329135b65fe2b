mod comment;
mod decl;
mod dir;
mod expr;

pub use comment::Comment;
pub use decl::Decl;
pub use dir::{ArgList, Dir, IfDefCond};
pub use expr::{BasicLit, Expr, Ident, LitKind};
use derive_more::{From, IsVariant};
use pp_token::Pos;
use std::fmt::Display;

/// Top-level item produced by the parser
#[derive(Clone, Debug, PartialEq, Eq, From, IsVariant)]
pub enum Node {
    Expr(Expr),
    Dir(Dir),
    Decl(Decl),
    Comment(Comment),
}

impl Node {
    pub fn pos(&self) -> Pos {
        match self {
            Node::Expr(expr) => expr.pos(),
            Node::Dir(dir) => dir.pos(),
            Node::Decl(decl) => decl.pos(),
            Node::Comment(comment) => comment.pos,
        }
    }

    /// Exclusive end position, never before `pos()`
    pub fn end(&self) -> Pos {
        match self {
            Node::Expr(expr) => expr.end(),
            Node::Dir(dir) => dir.end(),
            Node::Decl(decl) => decl.end(),
            Node::Comment(comment) => comment.end(),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Expr(expr) => expr.fmt(f),
            Node::Dir(dir) => dir.fmt(f),
            Node::Decl(decl) => decl.fmt(f),
            Node::Comment(comment) => comment.fmt(f),
        }
    }
}

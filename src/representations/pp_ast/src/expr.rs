use derive_more::IsVariant;
use pp_token::{Operator, Pos};
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub pos: Pos,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    pub fn end(&self) -> Pos {
        self.pos + self.name.len()
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum LitKind {
    Int,
    String,
}

/// Literal kept exactly as written, quotes and suffixes included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub pos: Pos,
}

impl BasicLit {
    pub fn end(&self) -> Pos {
        self.pos + self.value.len()
    }
}

impl Display for BasicLit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    Unary {
        op: Operator,
        op_pos: Pos,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: Operator,
        op_pos: Pos,
        right: Box<Expr>,
    },
    Paren {
        opening: Pos,
        inner: Box<Expr>,
        closing: Pos,
    },
    /// Placeholder where no operand could be recognized
    Bad { from: Pos, to: Pos },
}

impl Expr {
    pub fn unary(op: Operator, op_pos: Pos, operand: Expr) -> Self {
        Self::Unary {
            op,
            op_pos,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, op: Operator, op_pos: Pos, right: Expr) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            op_pos,
            right: Box::new(right),
        }
    }

    pub fn paren(opening: Pos, inner: Expr, closing: Pos) -> Self {
        Self::Paren {
            opening,
            inner: Box::new(inner),
            closing,
        }
    }

    pub fn pos(&self) -> Pos {
        match self {
            Expr::Ident(ident) => ident.pos,
            Expr::BasicLit(lit) => lit.pos,
            Expr::Unary { op_pos, .. } => *op_pos,
            Expr::Binary { left, .. } => left.pos(),
            Expr::Paren { opening, .. } => *opening,
            Expr::Bad { from, .. } => *from,
        }
    }

    pub fn end(&self) -> Pos {
        match self {
            Expr::Ident(ident) => ident.end(),
            Expr::BasicLit(lit) => lit.end(),
            Expr::Unary { operand, .. } => operand.end(),
            Expr::Binary { right, .. } => right.end(),
            Expr::Paren { closing, .. } => *closing + 1,
            Expr::Bad { to, .. } => *to,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ident(ident) => ident.fmt(f),
            Expr::BasicLit(lit) => lit.fmt(f),
            Expr::Unary { op, operand, .. } => write!(f, "{}{}", op, operand),
            Expr::Binary {
                left, op, right, ..
            } => write!(f, "{} {} {}", left, op, right),
            Expr::Paren { inner, .. } => write!(f, "({})", inner),
            Expr::Bad { .. } => f.write_str("<bad expression>"),
        }
    }
}

use crate::{Expr, Ident};
use derive_more::IsVariant;
use itertools::Itertools;
use pp_token::Pos;
use std::fmt::Display;

/// Parenthesized macro parameter names, in source order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgList {
    pub opening: Pos,
    pub list: Vec<Ident>,
    pub closing: Pos,
}

impl ArgList {
    pub fn end(&self) -> Pos {
        self.closing + 1
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|ident| ident.name.as_str())
    }
}

impl Display for ArgList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.list.iter().join(", "))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum IfDefCond {
    Defined,
    NotDefined,
}

#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum Dir {
    Macro {
        dir_pos: Pos,
        name: Ident,
        args: Option<ArgList>,
        value: Option<Expr>,
    },
    Include {
        dir_pos: Pos,
        path_pos: Pos,
        path: String,
    },
    IfDef {
        dir_pos: Pos,
        cond: IfDefCond,
        name: Ident,
    },
    EndIf {
        pos: Pos,
    },
    Else {
        pos: Pos,
    },
    Bad {
        from: Pos,
        to: Pos,
    },
}

impl Dir {
    pub fn pos(&self) -> Pos {
        match self {
            Dir::Macro { dir_pos, .. } | Dir::Include { dir_pos, .. } | Dir::IfDef { dir_pos, .. } => {
                *dir_pos
            }
            Dir::EndIf { pos } | Dir::Else { pos } => *pos,
            Dir::Bad { from, .. } => *from,
        }
    }

    pub fn end(&self) -> Pos {
        match self {
            Dir::Macro {
                name, args, value, ..
            } => match (value, args) {
                (Some(value), _) => value.end(),
                (None, Some(args)) => args.end(),
                (None, None) => name.end(),
            },
            Dir::Include { path_pos, path, .. } => *path_pos + path.len(),
            Dir::IfDef { name, .. } => name.end(),
            Dir::EndIf { pos } => *pos + "#endif".len(),
            Dir::Else { pos } => *pos + "#else".len(),
            Dir::Bad { to, .. } => *to,
        }
    }

    /// Whether an include names a `<system>` header rather than a `"local"` one
    pub fn is_system_include(&self) -> bool {
        matches!(self, Dir::Include { path, .. } if path.starts_with('<'))
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dir::Macro {
                name, args, value, ..
            } => {
                write!(f, "#define {}", name)?;

                if let Some(args) = args {
                    write!(f, "{}", args)?;
                }

                if let Some(value) = value {
                    write!(f, " {}", value)?;
                }

                Ok(())
            }
            Dir::Include { path, .. } => write!(f, "#include {}", path),
            Dir::IfDef { cond, name, .. } => match cond {
                IfDefCond::Defined => write!(f, "#ifdef {}", name),
                IfDefCond::NotDefined => write!(f, "#ifndef {}", name),
            },
            Dir::EndIf { .. } => f.write_str("#endif"),
            Dir::Else { .. } => f.write_str("#else"),
            Dir::Bad { .. } => f.write_str("<bad directive>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicLit, LitKind};

    #[test]
    fn macro_end_prefers_value_then_args() {
        // #define MAX(a, b) 64
        let name = Ident::new("MAX", Pos(8));
        let args = ArgList {
            opening: Pos(11),
            list: vec![Ident::new("a", Pos(12)), Ident::new("b", Pos(15))],
            closing: Pos(16),
        };
        let value = Expr::BasicLit(BasicLit {
            kind: LitKind::Int,
            value: "64".into(),
            pos: Pos(18),
        });

        let full = Dir::Macro {
            dir_pos: Pos(0),
            name: name.clone(),
            args: Some(args.clone()),
            value: Some(value),
        };
        assert_eq!(full.end(), Pos(20));
        assert_eq!(full.to_string(), "#define MAX(a, b) 64");

        let no_value = Dir::Macro {
            dir_pos: Pos(0),
            name: name.clone(),
            args: Some(args),
            value: None,
        };
        assert_eq!(no_value.end(), Pos(17));

        let bare = Dir::Macro {
            dir_pos: Pos(0),
            name,
            args: None,
            value: None,
        };
        assert_eq!(bare.end(), Pos(11));
    }

    #[test]
    fn include_keeps_delimiters() {
        let include = Dir::Include {
            dir_pos: Pos(0),
            path_pos: Pos(9),
            path: "<stddef.h>".into(),
        };

        assert!(include.is_system_include());
        assert_eq!(include.end(), Pos(19));
        assert_eq!(include.to_string(), "#include <stddef.h>");
    }

    #[test]
    fn markers_span_their_keyword() {
        assert_eq!(Dir::EndIf { pos: Pos(4) }.end(), Pos(10));
        assert_eq!(Dir::Else { pos: Pos(4) }.end(), Pos(9));
    }
}

use pp_token::Pos;
use std::fmt::Display;

/// Comment text, including its delimiters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub pos: Pos,
    pub text: String,
}

impl Comment {
    pub fn end(&self) -> Pos {
        self.pos + self.text.len()
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

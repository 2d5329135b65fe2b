use pp_token::{Pos, Token, TokenKind};

pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    start: usize,
    width: usize,
    line: usize,
    start_line: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            width: 0,
            line: 1,
            start_line: 1,
        }
    }

    pub fn advance(&mut self) -> Option<char> {
        let Some(c) = self.input[self.pos..].chars().next() else {
            self.width = 0;
            return None;
        };

        self.width = c.len_utf8();
        self.pos += self.width;

        if c == '\n' {
            self.line += 1;
        }

        Some(c)
    }

    // Only the most recently advanced character can be pushed back
    pub fn backup(&mut self) {
        self.pos -= self.width;

        if self.width == 1 && self.input.as_bytes()[self.pos] == b'\n' {
            self.line -= 1;
        }

        self.width = 0;
    }

    pub fn peek(&mut self) -> Option<char> {
        let c = self.advance();
        self.backup();
        c
    }

    pub fn accept(&mut self, valid: &str) -> bool {
        self.accept_if(|c| valid.contains(c))
    }

    pub fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    pub fn accept_if(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        match self.advance() {
            Some(c) if predicate(c) => true,
            Some(_) => {
                self.backup();
                false
            }
            None => false,
        }
    }

    pub fn accept_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.accept_if(&predicate) {}
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Character directly after `prefix`, assuming the input starts with it
    pub fn after(&self, prefix: &str) -> Option<char> {
        self.input[self.pos + prefix.len()..].chars().next()
    }

    /// Consumes a literal prefix, which must not contain line breaks
    pub fn skip(&mut self, prefix: &str) {
        debug_assert!(self.starts_with(prefix) && !prefix.contains('\n'));
        self.pos += prefix.len();
        self.width = 0;
    }

    pub fn pending(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    /// Cuts the pending text into a token
    pub fn take(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(kind, self.pending(), Pos(self.start), self.start_line);
        self.discard();
        token
    }

    pub fn discard(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
    }
}

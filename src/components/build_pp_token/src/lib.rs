mod cursor;
mod state;
mod worker;

use cursor::Cursor;
use pp_token::{LexErrorKind, Token, TokenKind};
use state::State;
pub use worker::{ScannerWorker, spawn_scanner};

const WHITESPACE: &str = " \t\n\r";
const INLINE_SPACE: &str = " \t";
const NUMBER_BODY: &str = "x0123456789abcdefABCDEF";
const INCLUDE_PATH: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-/\\.";

// Longest spellings first where one directive could shadow another
const DIRECTIVES: [(&str, TokenKind); 6] = [
    ("#ifndef", TokenKind::IfNotDef),
    ("#ifdef", TokenKind::IfDef),
    ("#define", TokenKind::Define),
    ("#include", TokenKind::Include),
    ("#else", TokenKind::Else),
    ("#endif", TokenKind::EndIf),
];

enum FeedResult<T> {
    Has(T),
    Waiting,
}

/// Lazily splits header text into tokens.
///
/// Every character of the input ends up in exactly one token, except for
/// line continuations (a backslash followed by a line break) which are dropped.
/// The sequence ends after an `EndOfFile` token, or right after the first
/// `Error` token.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    state: State,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            state: State::LineStart,
        }
    }

    fn feed(&mut self) -> FeedResult<Token> {
        match self.state {
            State::LineStart => self.feed_line_start(),
            State::BlockComment => self.feed_block_comment(),
            State::LineComment => self.feed_line_comment(),
            State::Include => self.feed_include(),
            State::IncludeOperand => self.feed_include_operand(),
            State::IncludePath { closing } => self.feed_include_path(closing),
            State::Extern => self.feed_extern(),
            State::Number => self.feed_number(),
            State::Identifier => self.feed_identifier(),
            State::String => self.feed_string(),
            State::Done => FeedResult::Waiting,
        }
    }

    fn emit(&mut self, kind: TokenKind, next: State) -> FeedResult<Token> {
        self.state = next;
        FeedResult::Has(self.cursor.take(kind))
    }

    fn fail(&mut self, error: LexErrorKind) -> FeedResult<Token> {
        self.emit(TokenKind::Error(error), State::Done)
    }

    fn feed_line_start(&mut self) -> FeedResult<Token> {
        use FeedResult::*;

        if self.cursor.starts_with("/*") {
            self.cursor.skip("/*");
            self.state = State::BlockComment;
            return Waiting;
        }

        if self.cursor.starts_with("//") {
            self.cursor.skip("//");
            self.state = State::LineComment;
            return Waiting;
        }

        if self.cursor.accept(WHITESPACE) {
            self.cursor.accept_run(WHITESPACE);
            return self.emit(TokenKind::Whitespace, State::LineStart);
        }

        for (spelling, kind) in DIRECTIVES {
            if self.cursor.starts_with(spelling) {
                self.cursor.skip(spelling);

                let next = if kind.is_include() {
                    State::Include
                } else {
                    State::LineStart
                };

                return self.emit(kind, next);
            }
        }

        if self.at_extern_keyword() {
            self.cursor.skip("extern");
            return self.emit(TokenKind::Extern, State::Extern);
        }

        let Some(c) = self.cursor.advance() else {
            return self.emit(TokenKind::EndOfFile, State::Done);
        };

        match c {
            '0'..='9' => {
                self.state = State::Number;
                Waiting
            }
            '{' => self.emit(TokenKind::OpenCurly, State::LineStart),
            '}' => self.emit(TokenKind::CloseCurly, State::LineStart),
            '(' => self.emit(TokenKind::OpenParen, State::LineStart),
            ')' => self.emit(TokenKind::CloseParen, State::LineStart),
            '\\' => {
                // Line continuation
                self.cursor.accept("\r");
                self.cursor.accept("\n");
                self.cursor.discard();
                Waiting
            }
            '|' => {
                if self.cursor.accept("|") {
                    self.emit(TokenKind::LogicalOr, State::LineStart)
                } else {
                    self.emit(TokenKind::BitOr, State::LineStart)
                }
            }
            '&' => {
                if self.cursor.accept("&") {
                    self.emit(TokenKind::LogicalAnd, State::LineStart)
                } else {
                    self.emit(TokenKind::BitAnd, State::LineStart)
                }
            }
            '-' => {
                if self.cursor.accept("-") {
                    self.emit(TokenKind::Decrement, State::LineStart)
                } else {
                    self.emit(TokenKind::Minus, State::LineStart)
                }
            }
            ';' => self.emit(TokenKind::Semicolon, State::LineStart),
            '*' => self.emit(TokenKind::Star, State::LineStart),
            ',' => self.emit(TokenKind::Comma, State::LineStart),
            '=' => self.emit(TokenKind::Assign, State::LineStart),
            '/' => self.emit(TokenKind::Slash, State::LineStart),
            '"' => {
                self.state = State::String;
                Waiting
            }
            c if is_identifier_start(c) => {
                self.state = State::Identifier;
                Waiting
            }
            c => self.fail(LexErrorKind::UnrecognizedCharacter(c)),
        }
    }

    fn at_extern_keyword(&self) -> bool {
        self.cursor.starts_with("extern")
            && !self
                .cursor
                .after("extern")
                .is_some_and(is_identifier_continue)
    }

    fn feed_block_comment(&mut self) -> FeedResult<Token> {
        loop {
            match self.cursor.advance() {
                Some('*') if self.cursor.accept("/") => {
                    return self.emit(TokenKind::Comment, State::LineStart);
                }
                Some(_) => (),
                None => return self.fail(LexErrorKind::UnterminatedComment),
            }
        }
    }

    fn feed_line_comment(&mut self) -> FeedResult<Token> {
        while self.cursor.peek().is_some_and(|c| c != '\n') {
            self.cursor.advance();
        }

        self.emit(TokenKind::Comment, State::LineStart)
    }

    fn feed_include(&mut self) -> FeedResult<Token> {
        self.cursor.accept_run(INLINE_SPACE);

        if self.cursor.pending().is_empty() {
            self.state = State::IncludeOperand;
            FeedResult::Waiting
        } else {
            self.emit(TokenKind::Whitespace, State::IncludeOperand)
        }
    }

    fn feed_include_operand(&mut self) -> FeedResult<Token> {
        self.state = if self.cursor.accept("\"") {
            State::IncludePath { closing: '"' }
        } else if self.cursor.accept("<") {
            State::IncludePath { closing: '>' }
        } else {
            // Not a path, let the parser complain about whatever comes next
            State::LineStart
        };

        FeedResult::Waiting
    }

    fn feed_include_path(&mut self, closing: char) -> FeedResult<Token> {
        self.cursor.accept_run(INCLUDE_PATH);

        if !self.cursor.accept_if(|c| c == closing) {
            return self.fail(LexErrorKind::UnterminatedIncludePath { closing });
        }

        let kind = if closing == '>' {
            TokenKind::IncludePathSystem
        } else {
            TokenKind::IncludePath
        };

        self.emit(kind, State::LineStart)
    }

    fn feed_extern(&mut self) -> FeedResult<Token> {
        self.cursor.accept_run(INLINE_SPACE);

        if self.cursor.pending().is_empty() {
            self.state = State::LineStart;
            FeedResult::Waiting
        } else {
            self.emit(TokenKind::Whitespace, State::LineStart)
        }
    }

    fn feed_number(&mut self) -> FeedResult<Token> {
        self.cursor.accept_run(NUMBER_BODY);
        self.cursor.accept("u");
        self.emit(TokenKind::Number, State::LineStart)
    }

    fn feed_identifier(&mut self) -> FeedResult<Token> {
        self.cursor.accept_while(is_identifier_continue);
        self.emit(TokenKind::Identifier, State::LineStart)
    }

    fn feed_string(&mut self) -> FeedResult<Token> {
        loop {
            match self.cursor.advance() {
                Some('"') => return self.emit(TokenKind::String, State::LineStart),
                Some('\\') => {
                    if self.cursor.advance().is_none() {
                        return self.fail(LexErrorKind::UnterminatedStringLiteral);
                    }
                }
                Some(_) => (),
                None => return self.fail(LexErrorKind::UnterminatedStringLiteral),
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.state.is_done() {
            if let FeedResult::Has(token) = self.feed() {
                log::trace!("Scanned {}", token);
                return Some(token);
            }
        }

        None
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans all of `input` into a vector, including the terminal token
pub fn scan(input: &str) -> Vec<Token> {
    Scanner::new(input).collect()
}

pub mod error;
mod input;
mod options;
mod parse_directive;
mod parse_expr;
mod parse_extern;
mod parse_top_level;
mod pipeline;

use self::error::ParseError;
pub use self::input::Input;
use build_pp_token::Scanner;
pub use options::ParserOptions;
pub use pipeline::Pipeline;
use pp_ast::{Comment, Node};
use pp_token::Token;
use std::collections::VecDeque;

/// Parses all of `text`, giving up on the first error
pub fn parse(source_name: impl Into<String>, text: &str) -> Result<Vec<Node>, ParseError> {
    let (nodes, error) = Parser::new(source_name, text).nodes();

    match error {
        Some(error) => Err(error),
        None => Ok(nodes),
    }
}

/// Pull-based parser producing top-level nodes in source order.
///
/// Parsing stops at the first lexical or syntax error. Nodes yielded before
/// that point stay valid, and the error is available from [`Parser::err`]
/// once iteration has ended.
pub struct Parser<I: Iterator<Item = Token>> {
    pub input: Input<I>,
    pub options: ParserOptions,
    error: Option<ParseError>,
    finished: bool,
    depth: usize,
    nesting: usize,
    in_macro_value: bool,
    comments: VecDeque<Comment>,
}

impl<'a> Parser<Scanner<'a>> {
    pub fn new(source_name: impl Into<String>, text: &'a str) -> Self {
        Self::with_options(source_name, text, ParserOptions::default())
    }

    pub fn with_options(
        source_name: impl Into<String>,
        text: &'a str,
        options: ParserOptions,
    ) -> Self {
        Self::from_tokens(source_name, Scanner::new(text), options)
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn from_tokens(source_name: impl Into<String>, tokens: I, options: ParserOptions) -> Self {
        Self {
            input: Input::new(source_name.into(), tokens),
            options,
            error: None,
            finished: false,
            depth: 0,
            nesting: 0,
            in_macro_value: false,
            comments: VecDeque::new(),
        }
    }

    /// Error that ended the parse, if any
    pub fn err(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn take_err(&mut self) -> Option<ParseError> {
        self.error.take()
    }

    pub fn nodes(mut self) -> (Vec<Node>, Option<ParseError>) {
        let nodes = self.by_ref().collect();
        (nodes, self.error)
    }

    // Runs a sub-parser, logging its boundaries when tracing is on
    fn traced<T>(
        &mut self,
        label: &'static str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if !self.options.trace {
            return parse(self);
        }

        log::trace!("{:indent$}{} (", "", label, indent = self.depth * 2);
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        log::trace!("{:indent$})", "", indent = self.depth * 2);
        result
    }
}

impl<I: Iterator<Item = Token>> Iterator for Parser<I> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.parse_top_level() {
            Ok(Some(node)) => Some(node),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                log::debug!("Parsing stopped: {}", error);
                self.finished = true;
                self.error = Some(error);
                None
            }
        }
    }
}

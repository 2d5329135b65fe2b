use super::{Parser, error::ParseError};
use pp_ast::{ArgList, Comment, Dir, Ident, IfDefCond};
use pp_token::{Token, TokenKind};

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn parse_macro(&mut self) -> Result<Dir, ParseError> {
        self.traced("Macro", |parser| {
            let context = "macro definition";
            let keyword = parser.input.expect(TokenKind::Define, context)?;
            let name = parser.input.expect(TokenKind::Identifier, context)?;

            // Only a parenthesis touching the name opens an argument list
            let args = if parser.input.peek().kind.is_open_paren() {
                Some(parser.parse_arg_list()?)
            } else {
                None
            };

            let value = if parser.at_macro_value() {
                parser.in_macro_value = true;
                let value = parser.parse_expr();
                parser.in_macro_value = false;
                Some(value?)
            } else {
                None
            };

            let dir = Dir::Macro {
                dir_pos: keyword.pos,
                name: Ident::new(name.lexeme, name.pos),
                args,
                value,
            };

            // Comments inside the directive were only whitespace
            let end = dir.end();
            parser.comments.retain(|comment| comment.pos >= end);
            Ok(dir)
        })
    }

    fn parse_arg_list(&mut self) -> Result<ArgList, ParseError> {
        self.traced("ArgList", |parser| {
            let context = "macro argument list";
            let opening = parser.input.expect(TokenKind::OpenParen, context)?;
            let mut list = Vec::new();

            if parser.input.peek_non_space().kind.is_close_paren() {
                return Ok(ArgList {
                    opening: opening.pos,
                    list,
                    closing: parser.input.next().pos,
                });
            }

            loop {
                let name = parser.input.expect(TokenKind::Identifier, context)?;
                list.push(Ident::new(name.lexeme, name.pos));

                let separator =
                    parser
                        .input
                        .expect_one_of(TokenKind::Comma, TokenKind::CloseParen, context)?;

                if separator.kind.is_close_paren() {
                    return Ok(ArgList {
                        opening: opening.pos,
                        list,
                        closing: separator.pos,
                    });
                }
            }
        })
    }

    // Whether the rest of the macro line holds a value
    fn at_macro_value(&mut self) -> bool {
        let token = self.peek_macro_line();
        !(token.is_line_break() || token.is_terminal())
    }

    /// Skips whitespace and comments without leaving the macro line.
    ///
    /// Skipped comments are queued and surface as nodes once the macro is done.
    pub(crate) fn peek_macro_line(&mut self) -> &Token {
        while self.input.peek_same_line().kind.is_comment() {
            let token = self.input.next();

            self.comments.push_back(Comment {
                pos: token.pos,
                text: token.lexeme,
            });
        }

        self.input.peek()
    }

    pub fn parse_include(&mut self) -> Result<Dir, ParseError> {
        self.traced("Include", |parser| {
            let context = "include directive";
            let keyword = parser.input.expect(TokenKind::Include, context)?;
            let path = parser.input.expect_one_of(
                TokenKind::IncludePath,
                TokenKind::IncludePathSystem,
                context,
            )?;

            Ok(Dir::Include {
                dir_pos: keyword.pos,
                path_pos: path.pos,
                path: path.lexeme,
            })
        })
    }

    pub fn parse_conditional(&mut self) -> Result<Dir, ParseError> {
        self.traced("IfDef", |parser| {
            let context = "conditional directive";
            let keyword =
                parser
                    .input
                    .expect_one_of(TokenKind::IfDef, TokenKind::IfNotDef, context)?;
            let name = parser.input.expect(TokenKind::Identifier, context)?;

            let cond = match keyword.kind {
                TokenKind::IfDef => IfDefCond::Defined,
                _ => IfDefCond::NotDefined,
            };

            Ok(Dir::IfDef {
                dir_pos: keyword.pos,
                cond,
                name: Ident::new(name.lexeme, name.pos),
            })
        })
    }
}

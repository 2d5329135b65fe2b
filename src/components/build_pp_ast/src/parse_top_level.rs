use super::{Parser, error::ParseError};
use pp_ast::{Comment, Decl, Dir, Expr, Node};
use pp_token::{Token, TokenKind};

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parses the next top-level node, or `None` at end of input
    pub fn parse_top_level(&mut self) -> Result<Option<Node>, ParseError> {
        if let Some(comment) = self.comments.pop_front() {
            return Ok(Some(comment.into()));
        }

        loop {
            let kind = self.input.peek().kind.clone();

            let node: Node = match kind {
                TokenKind::EndOfFile => return Ok(None),
                TokenKind::Error(_) => {
                    let token = self.input.next();
                    return Err(self.input.unexpected(&token, "top level"));
                }
                TokenKind::Whitespace => {
                    self.input.next();
                    continue;
                }
                TokenKind::Comment => {
                    let token = self.input.next();
                    Comment {
                        pos: token.pos,
                        text: token.lexeme,
                    }
                    .into()
                }
                TokenKind::EndIf => Dir::EndIf {
                    pos: self.input.next().pos,
                }
                .into(),
                TokenKind::Else => Dir::Else {
                    pos: self.input.next().pos,
                }
                .into(),
                TokenKind::Define => self.parse_macro()?.into(),
                TokenKind::Include => self.parse_include()?.into(),
                TokenKind::IfDef | TokenKind::IfNotDef => self.parse_conditional()?.into(),
                TokenKind::Extern => self.parse_extern()?.into(),
                TokenKind::Identifier
                    if self.options.skip_typedefs && self.input.peek().lexeme == "typedef" =>
                {
                    self.skip_typedef().into()
                }
                kind if kind.begins_operand() => self.parse_expr()?.into(),
                _ => {
                    // Nothing can start here, so give the token back as a placeholder
                    let token = self.input.next();

                    Expr::Bad {
                        from: token.pos,
                        to: token.end(),
                    }
                    .into()
                }
            };

            return Ok(Some(node));
        }
    }

    /// Consumes a `typedef` up to the end of its line
    fn skip_typedef(&mut self) -> Decl {
        let keyword = self.input.next();
        let mut to = keyword.end();

        loop {
            let token = self.input.peek();

            if token.is_line_break() || token.is_terminal() {
                break;
            }

            to = self.input.next().end();
        }

        Decl::Bad {
            from: keyword.pos,
            to,
        }
    }
}

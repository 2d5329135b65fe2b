use super::{Parser, error::ParseError};
use pp_ast::{BasicLit, Decl, LitKind};
use pp_token::{Token, TokenKind};

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn parse_extern(&mut self) -> Result<Decl, ParseError> {
        self.traced("Extern", |parser| {
            let context = "external declaration";
            let keyword = parser.input.expect(TokenKind::Extern, context)?;
            let linkage = parser.input.next_non_space();

            if !linkage.kind.is_string() || linkage.lexeme != "\"C\"" {
                parser.input.backup();

                return Ok(Decl::Extern {
                    key_pos: keyword.pos,
                    decl: None,
                });
            }

            let body = parser.input.expect(TokenKind::OpenCurly, context)?;

            Ok(Decl::Extern {
                key_pos: keyword.pos,
                decl: Some(Box::new(Decl::CLinkage {
                    value: BasicLit {
                        kind: LitKind::String,
                        value: linkage.lexeme,
                        pos: linkage.pos,
                    },
                    body_pos: body.pos,
                })),
            })
        })
    }
}

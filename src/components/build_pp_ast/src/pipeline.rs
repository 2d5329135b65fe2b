use crate::{Parser, ParserOptions, error::ParseError};
use build_pp_token::spawn_scanner;
use cancellation::{CancellationToken, Delivery, deliver};
use crossbeam_channel::Receiver;
use pp_ast::Node;
use std::thread::JoinHandle;

/// Scanner and parser running on their own threads, connected by bounded channels.
///
/// Iterating yields the same nodes as the lazy [`Parser`] would for the same
/// text. Dropping the pipeline cancels both workers and waits for them.
pub struct Pipeline {
    nodes: Option<Receiver<Result<Node, ParseError>>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    error: Option<ParseError>,
    finished: bool,
}

impl Pipeline {
    pub fn spawn(
        source_name: impl Into<String>,
        text: impl Into<String>,
        options: ParserOptions,
    ) -> Self {
        let source_name = source_name.into();
        let text = text.into();
        let cancel = CancellationToken::new();
        let (sender, receiver) = crossbeam_channel::bounded(options.channel_capacity);

        let handle = {
            let cancel = cancel.clone();

            std::thread::spawn(move || {
                log::debug!("Parser worker started for {}", source_name);

                let tokens = spawn_scanner(text, options.channel_capacity, cancel.clone());
                let mut parser = Parser::from_tokens(source_name, tokens, options);

                for node in parser.by_ref() {
                    if deliver(&sender, Ok(node), &cancel) != Delivery::Delivered {
                        log::debug!("Parser worker stopped early");
                        return;
                    }
                }

                if let Some(error) = parser.take_err() {
                    deliver(&sender, Err(error), &cancel);
                }

                log::debug!("Parser worker finished");
            })
        };

        Self {
            nodes: Some(receiver),
            cancel,
            handle: Some(handle),
            error: None,
            finished: false,
        }
    }

    /// Asks both workers to stop, after which iteration yields nothing more
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn err(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }
}

impl Iterator for Pipeline {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.cancel.is_cancelled() {
            return None;
        }

        match self.nodes.as_ref()?.recv() {
            Ok(Ok(node)) => Some(node),
            Ok(Err(error)) => {
                self.finished = true;
                self.error = Some(error);
                None
            }
            Err(_) => {
                self.finished = true;
                None
            }
        }
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.nodes.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::debug!("Parser worker panicked");
            }
        }
    }
}

use crate::Scanner;
use cancellation::{CancellationToken, Delivery, deliver};
use crossbeam_channel::Receiver;
use pp_token::Token;
use std::thread::JoinHandle;

/// Scanner running on its own thread, handing tokens over a bounded channel
pub struct ScannerWorker {
    tokens: Option<Receiver<Token>>,
    handle: Option<JoinHandle<()>>,
}

pub fn spawn_scanner(
    text: impl Into<String>,
    capacity: usize,
    cancel: CancellationToken,
) -> ScannerWorker {
    let text = text.into();
    let (sender, receiver) = crossbeam_channel::bounded(capacity);

    let handle = std::thread::spawn(move || {
        let mut count = 0usize;

        for token in Scanner::new(&text) {
            match deliver(&sender, token, &cancel) {
                Delivery::Delivered => count += 1,
                Delivery::Disconnected => {
                    log::debug!("Scanner worker stopped, token consumer went away");
                    return;
                }
                Delivery::Cancelled => {
                    log::debug!("Scanner worker cancelled after {} tokens", count);
                    return;
                }
            }
        }

        log::debug!("Scanner worker finished with {} tokens", count);
    });

    ScannerWorker {
        tokens: Some(receiver),
        handle: Some(handle),
    }
}

impl Iterator for ScannerWorker {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.as_ref()?.recv().ok()
    }
}

impl Drop for ScannerWorker {
    fn drop(&mut self) {
        // Disconnect first so a worker blocked on a full channel can exit
        self.tokens.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::debug!("Scanner worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;

    #[test]
    fn worker_matches_lazy_scanner() {
        let text = "#define A(x, y) x - y\n#include <a.h>\n";
        let worker = spawn_scanner(text, 2, CancellationToken::new());
        assert_eq!(worker.collect::<Vec<_>>(), scan(text));
    }

    #[test]
    fn dropping_worker_early_does_not_hang() {
        let text = "a ".repeat(10_000);
        let mut worker = spawn_scanner(text, 1, CancellationToken::new());
        assert!(worker.next().is_some());
        drop(worker);
    }

    #[test]
    fn cancelled_worker_stops_producing() {
        let cancel = CancellationToken::new();
        let worker = spawn_scanner("a ".repeat(10_000), 1, cancel.clone());
        cancel.cancel();

        // At most what was already buffered or in flight
        assert!(worker.count() < 4);
    }
}

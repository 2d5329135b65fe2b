use crossbeam_channel::{Receiver, Sender, select};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag that tells pipeline workers to stop early.
///
/// Besides the flag, every clone holds the receiving end of a channel that
/// disconnects when the token fires. Workers blocked on a full channel can
/// `select!` on [`CancellationToken::signal`] to wake up immediately.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    shared: Arc<Shared>,
    signal: Receiver<()>,
}

#[derive(Debug)]
struct Shared {
    cancelled: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (trigger, signal) = crossbeam_channel::bounded(0);

        Self {
            shared: Arc::new(Shared {
                cancelled: false.into(),
                trigger: Mutex::new(Some(trigger)),
            }),
            signal,
        }
    }

    pub fn cancel(&self) {
        if !self.shared.cancelled.swap(true, Ordering::SeqCst) {
            log::info!("Cancellation requested");
        }

        // Dropping the only sender disconnects every clone of `signal`
        self.shared
            .trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// Becomes ready (disconnected) once the token is cancelled
    pub fn signal(&self) -> &Receiver<()> {
        &self.signal
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Disconnected,
    Cancelled,
}

/// Sends `item`, blocking while the channel is full, unless the token fires
/// or the receiving side goes away first.
pub fn deliver<T>(sender: &Sender<T>, item: T, token: &CancellationToken) -> Delivery {
    if token.is_cancelled() {
        return Delivery::Cancelled;
    }

    select! {
        send(sender, item) -> result => match result {
            Ok(()) => Delivery::Delivered,
            Err(_) => Delivery::Disconnected,
        },
        recv(token.signal()) -> _ => Delivery::Cancelled,
    }
}

//! Marshals poll outcomes onto the thread that owns consumer-visible state.
//!
//! Trigger sources run on background threads (the timer, the notifier's
//! callback thread); the sink may only be mutated on the designated
//! consumer thread. The bridge is the sending half of an unbounded FIFO
//! channel — fire-and-forget, no backpressure — and the queue is the
//! receiving half the consumer drains between renders. FIFO matters:
//! outcomes encode a strictly increasing offset sequence.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::reader::PollOutcome;
use crate::sink::{LineSink, SinkChange};

/// Producer half. Cheap to clone into trigger callbacks.
#[derive(Clone)]
pub struct DeliveryBridge {
    tx: Sender<PollOutcome>,
}

/// Consumer half. Lives on the designated thread, next to the sink.
pub struct DeliveryQueue {
    rx: Receiver<PollOutcome>,
}

impl DeliveryBridge {
    pub fn channel() -> (DeliveryBridge, DeliveryQueue) {
        let (tx, rx) = mpsc::channel();
        (DeliveryBridge { tx }, DeliveryQueue { rx })
    }

    /// Schedule an outcome for the consumer and return without waiting.
    /// If the consumer is gone (shutdown), the outcome is safe to drop.
    pub fn deliver(&self, outcome: PollOutcome) {
        let _ = self.tx.send(outcome);
    }
}

impl DeliveryQueue {
    /// Apply every pending outcome to `sink` in arrival order, without
    /// blocking, and summarize what the consumer needs to react to:
    /// `Cleared(n)` if any clear happened (n = lines now present after the
    /// last clear), else `Appended(n)` for n newly appended lines, else
    /// `None`.
    pub fn drain_into(&self, sink: &mut LineSink) -> SinkChange {
        let mut cleared = false;
        let mut appended = 0usize;
        loop {
            match self.rx.try_recv() {
                Ok(outcome) => match sink.apply(outcome) {
                    SinkChange::None => {}
                    SinkChange::Appended(n) => appended += n,
                    SinkChange::Cleared(n) => {
                        cleared = true;
                        appended = n;
                    }
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if cleared {
            SinkChange::Cleared(appended)
        } else if appended > 0 {
            SinkChange::Appended(appended)
        } else {
            SinkChange::None
        }
    }
}

use std::str::FromStr;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::phase::Cue;

/// What to do when the cue channel is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Wait for the consumer; the sequencer stalls with it.
    #[default]
    Block,
    /// Drop the cue and log it.
    Drop,
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(OverflowPolicy::Block),
            "drop" => Ok(OverflowPolicy::Drop),
            other => Err(format!("unknown cue overflow policy '{other}'")),
        }
    }
}

/// Producer side of the phase-cue channel. Owned by the sequencer.
#[derive(Debug)]
pub struct CueBroker {
    tx: mpsc::Sender<Cue>,
    policy: OverflowPolicy,
}

/// Consumer side of the phase-cue channel. Single consumer, in order.
#[derive(Debug)]
pub struct CueStream {
    rx: mpsc::Receiver<Cue>,
}

impl CueBroker {
    pub fn channel(capacity: usize, policy: OverflowPolicy) -> (Self, CueStream) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, policy }, CueStream { rx })
    }

    pub async fn publish(&self, cue: Cue) {
        debug!(?cue, "Publishing cue");
        match self.policy {
            OverflowPolicy::Block => {
                if self.tx.send(cue).await.is_err() {
                    warn!(?cue, "Cue consumer is gone; cue discarded");
                }
            }
            OverflowPolicy::Drop => match self.tx.try_send(cue) {
                Ok(()) => {}
                Err(TrySendError::Full(cue)) => warn!(?cue, "Cue channel full; cue dropped"),
                Err(TrySendError::Closed(cue)) => {
                    warn!(?cue, "Cue consumer is gone; cue discarded")
                }
            },
        }
    }
}

impl CueStream {
    /// Next cue, or `None` once the broker is dropped.
    pub async fn next(&mut self) -> Option<Cue> {
        self.rx.recv().await
    }

    /// Next cue if one is already queued.
    pub fn try_next(&mut self) -> Option<Cue> {
        self.rx.try_recv().ok()
    }
}

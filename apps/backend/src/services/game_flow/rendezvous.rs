//! Single-slot handoff between action submitters and the sequencer.
//!
//! The sequencer arms a slot with a fresh `oneshot` sender tagged by the
//! epoch of the phase it is about to publish. Submitters race to take the
//! sender out; the mutex guarantees at most one of them gets it.

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::domain::resolution::WitchDecision;
use crate::domain::roles::SeatId;

#[derive(Debug)]
pub struct DecisionSlot<T> {
    armed: Mutex<Option<(u64, oneshot::Sender<T>)>>,
}

impl<T> Default for DecisionSlot<T> {
    fn default() -> Self {
        Self {
            armed: Mutex::new(None),
        }
    }
}

impl<T> DecisionSlot<T> {
    /// Arms the slot for `epoch`, replacing any stale sender.
    pub fn arm(&self, epoch: u64) -> oneshot::Receiver<T> {
        let (tx, rx) = oneshot::channel();
        *self.armed.lock() = Some((epoch, tx));
        rx
    }

    /// Hands `value` to the waiting sequencer. Gives the value back when the
    /// slot is empty, armed for another epoch, or the receiver is gone.
    pub fn offer(&self, epoch: u64, value: T) -> Result<(), T> {
        let sender = {
            let mut armed = self.armed.lock();
            match armed.take() {
                Some((armed_epoch, tx)) if armed_epoch == epoch => tx,
                other => {
                    *armed = other;
                    return Err(value);
                }
            }
        };
        sender.send(value)
    }

    /// Whether a sender is still waiting for `epoch`.
    pub fn is_armed_for(&self, epoch: u64) -> bool {
        matches!(&*self.armed.lock(), Some((armed_epoch, _)) if *armed_epoch == epoch)
    }

    /// Empties the slot. `true` if a sender was still waiting, meaning no
    /// submission won it.
    pub fn disarm(&self) -> bool {
        self.armed.lock().take().is_some()
    }
}

/// One slot per decision-bearing phase.
#[derive(Debug, Default)]
pub struct DecisionSlots {
    /// Shared by every werewolf variant.
    pub kill: DecisionSlot<SeatId>,
    pub guard: DecisionSlot<Option<SeatId>>,
    pub witch: DecisionSlot<WitchDecision>,
    pub seer: DecisionSlot<SeatId>,
    pub banish: DecisionSlot<SeatId>,
}

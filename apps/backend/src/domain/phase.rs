//! Game phases, the atomic phase cell, and presentation cues.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    /// Initialized (or not) but the loop has not been started.
    NotStarted = 0,
    /// Loop started, first night not yet entered.
    Started = 1,
    /// Werewolves choose a kill candidate.
    WerewolfTurn = 2,
    /// Guard chooses a seat to protect.
    GuardTurn = 3,
    /// Witch saves, poisons or passes.
    WitchTurn = 4,
    /// Seer inspects one seat.
    SeerTurn = 5,
    /// Village discussion ending in one banishment.
    Day = 6,
    /// A side has been eliminated.
    GameOver = 7,
}

impl Phase {
    pub const fn is_night(self) -> bool {
        matches!(
            self,
            Phase::WerewolfTurn | Phase::GuardTurn | Phase::WitchTurn | Phase::SeerTurn
        )
    }

    const fn from_u8(raw: u8) -> Phase {
        match raw {
            1 => Phase::Started,
            2 => Phase::WerewolfTurn,
            3 => Phase::GuardTurn,
            4 => Phase::WitchTurn,
            5 => Phase::SeerTurn,
            6 => Phase::Day,
            7 => Phase::GameOver,
            _ => Phase::NotStarted,
        }
    }
}

/// A phase together with the epoch at which the sequencer entered it.
///
/// Each entry into a phase gets a fresh epoch, so two visits of
/// `WerewolfTurn` in different rounds are distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStamp {
    pub phase: Phase,
    pub epoch: u64,
}

impl PhaseStamp {
    const fn pack(self) -> u64 {
        (self.epoch << 8) | self.phase as u64
    }

    const fn unpack(raw: u64) -> Self {
        Self {
            phase: Phase::from_u8((raw & 0xff) as u8),
            epoch: raw >> 8,
        }
    }
}

/// Single-writer, multi-reader phase cell.
///
/// Only the sequencer calls [`PhaseCell::publish`]; everyone else loads.
#[derive(Debug)]
pub struct PhaseCell {
    raw: AtomicU64,
}

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseCell {
    pub fn new() -> Self {
        let initial = PhaseStamp {
            phase: Phase::NotStarted,
            epoch: 0,
        };
        Self {
            raw: AtomicU64::new(initial.pack()),
        }
    }

    pub fn load(&self) -> PhaseStamp {
        PhaseStamp::unpack(self.raw.load(Ordering::Acquire))
    }

    pub fn phase(&self) -> Phase {
        self.load().phase
    }

    /// Stamp for the next phase entry, not yet visible to readers.
    pub fn next(&self, phase: Phase) -> PhaseStamp {
        PhaseStamp {
            phase,
            epoch: self.load().epoch + 1,
        }
    }

    pub fn publish(&self, stamp: PhaseStamp) {
        self.raw.store(stamp.pack(), Ordering::Release);
    }
}

/// Presentation cue pushed to the phase-change sink.
///
/// Cues are a superset of phase changes: they also mark the moments the
/// moderator closes a sub-phase ("werewolves, close your eyes").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cue", content = "phase", rename_all = "snake_case")]
pub enum Cue {
    NightFalls,
    Enter(Phase),
    SubphaseEnded(Phase),
    GameOver,
    NightEnds,
}

//! Game flow service - owns the seat table and the phase sequencer.
//!
//! One sequencer task drives the night/day loop and is the only writer of
//! the phase. Request handlers call into the same service to register,
//! submit actions and query results; phase-defining actions reach the
//! sequencer through the single-slot handoffs in [`rendezvous`].
//!
//! Lock order: `gate` → `seats` → `night` → slot mutexes. The sequencer
//! never holds a lock across an `.await`.

mod player_actions;
mod queries;
pub mod rendezvous;
mod seats;
mod sequencer;

use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::domain::game_config::GameConfig;
use crate::domain::phase::PhaseCell;
use crate::domain::roles::SeatId;
use crate::domain::seat::Seat;
use crate::domain::win::WinLatch;
use crate::realtime::broker::CueBroker;
use rendezvous::DecisionSlots;

pub use player_actions::ActionOutcome;
pub use queries::{GameStatus, LastNightSummary};
pub use seats::Registration;

/// Timing knobs for the sequencer.
#[derive(Debug, Clone, Copy)]
pub struct FlowSettings {
    /// Pause before each announcement, and in place of a skipped turn.
    pub pacing: Duration,
    /// When set, a turn with no decision after this long falls back to
    /// its default.
    pub decision_timeout: Option<Duration>,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            pacing: Duration::from_secs(2),
            decision_timeout: None,
        }
    }
}

#[derive(Debug, Default)]
struct Gate {
    config: Option<GameConfig>,
    started: bool,
}

/// Per-night bookkeeping written by the sequencer.
#[derive(Debug, Default)]
struct NightLedger {
    round: u32,
    kill_candidate: Option<SeatId>,
    /// Seats that died during the most recent night.
    last_night: Vec<SeatId>,
}

pub struct GameFlowService {
    settings: FlowSettings,
    gate: Mutex<Gate>,
    seats: RwLock<Vec<Seat>>,
    phase: PhaseCell,
    slots: DecisionSlots,
    night: Mutex<NightLedger>,
    verdict: WinLatch,
    cues: CueBroker,
}

impl GameFlowService {
    pub fn new(settings: FlowSettings, cues: CueBroker) -> Self {
        Self {
            settings,
            gate: Mutex::new(Gate::default()),
            seats: RwLock::new(Vec::new()),
            phase: PhaseCell::new(),
            slots: DecisionSlots::default(),
            night: Mutex::new(NightLedger::default()),
            verdict: WinLatch::new(),
            cues,
        }
    }

    pub fn settings(&self) -> FlowSettings {
        self.settings
    }

    fn is_initialized(&self) -> bool {
        self.gate.lock().config.is_some()
    }
}

//! Night conflict resolution.

use crate::domain::roles::SeatId;
use crate::domain::seat::DeathCause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WitchDecision {
    /// Saves the current kill candidate.
    Save,
    Poison(SeatId),
    #[default]
    Abstain,
}

/// Decisions collected during one night.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NightOutcome {
    pub kill: Option<SeatId>,
    pub guarded: Option<SeatId>,
    pub witch: WitchDecision,
    pub seer_query: Option<SeatId>,
}

impl NightOutcome {
    /// Whether the kill candidate dies this round.
    ///
    /// Guard and save each block the kill on their own, but when both land
    /// on the candidate they cancel out and the candidate dies.
    pub fn kill_lands(&self) -> bool {
        let Some(killed) = self.kill else {
            return false;
        };
        let saved = self.witch == WitchDecision::Save;
        let protected = self.guarded == Some(killed);
        saved == protected
    }

    /// Deaths to apply, in order, each seat at most once.
    pub fn deaths(&self) -> Vec<(SeatId, DeathCause)> {
        let poisoned = match self.witch {
            WitchDecision::Poison(target) => Some(target),
            _ => None,
        };

        let mut deaths = Vec::with_capacity(2);
        if self.kill_lands() {
            if let Some(killed) = self.kill {
                if poisoned != Some(killed) {
                    deaths.push((killed, DeathCause::Ordinary));
                }
            }
        }
        if let Some(target) = poisoned {
            deaths.push((target, DeathCause::Poisoned));
        }
        deaths
    }
}

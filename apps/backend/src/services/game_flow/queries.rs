use serde::Serialize;

use super::seats::not_initialized;
use super::GameFlowService;
use crate::domain::phase::Phase;
use crate::domain::roles::{RoleKind, SeatId};
use crate::domain::win::Winner;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ForbiddenKind};

/// Public view of the game. Never includes roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub phase: Phase,
    pub round: u32,
    pub alive_seats: Vec<SeatId>,
    pub ended: bool,
    pub winner: Option<Winner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastNightSummary {
    pub round: u32,
    pub died: Vec<SeatId>,
    pub message: String,
}

impl GameFlowService {
    pub fn phase(&self) -> Phase {
        self.phase.phase()
    }

    /// Latched: once true, stays true.
    pub fn is_game_ended(&self) -> bool {
        self.verdict.is_ended()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.verdict.winner()
    }

    pub fn status(&self) -> GameStatus {
        let alive_seats = self
            .seats
            .read()
            .iter()
            .filter(|s| s.is_alive())
            .map(|s| s.id())
            .collect();
        GameStatus {
            phase: self.phase(),
            round: self.night.lock().round,
            alive_seats,
            ended: self.is_game_ended(),
            winner: self.winner(),
        }
    }

    /// Who died during the most recent night. Only answered during the day.
    pub fn last_night_summary(&self) -> Result<LastNightSummary, AppError> {
        if !self.is_initialized() {
            return Err(not_initialized().into());
        }
        if self.phase() != Phase::Day {
            return Err(DomainError::forbidden(
                ForbiddenKind::WrongPhase,
                "Last night's info is only available during the day",
            )
            .into());
        }

        let night = self.night.lock();
        let message = if night.last_night.is_empty() {
            "Last night was peaceful, nobody died".to_string()
        } else {
            let seats: Vec<String> = night.last_night.iter().map(|s| s.to_string()).collect();
            format!("Seats who died last night: {}", seats.join(", "))
        };
        Ok(LastNightSummary {
            round: night.round,
            died: night.last_night.clone(),
            message,
        })
    }

    /// Moderator view of the seat assignment, indexed by seat.
    pub fn seat_roles(&self) -> Vec<RoleKind> {
        self.seats.read().iter().map(|s| s.role()).collect()
    }
}

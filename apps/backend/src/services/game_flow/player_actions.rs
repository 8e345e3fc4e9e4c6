use serde::Serialize;
use tracing::{debug, info, warn};

use super::seats::{invalid_seat, not_initialized};
use super::GameFlowService;
use crate::domain::capability::{available_actions, plan, Intent, PlanContext, Rejection};
use crate::domain::phase::Phase;
use crate::domain::resolution::WitchDecision;
use crate::domain::roles::{ActionCode, Alignment, RoleKind, SeatId};
use crate::domain::seat::DeathCause;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};

/// Result of an action submission, successful or refused by the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub successful: bool,
    pub action_codes: Vec<ActionCode>,
    pub action_names: Vec<&'static str>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl ActionOutcome {
    fn accepted(message: impl Into<String>) -> Self {
        Self {
            successful: true,
            action_codes: Vec::new(),
            action_names: Vec::new(),
            message: message.into(),
            rejection: None,
        }
    }

    fn offer(can_act: bool, actions: Vec<ActionCode>, message: String) -> Self {
        Self {
            successful: can_act,
            action_names: actions.iter().map(|a| a.name()).collect(),
            action_codes: actions,
            message,
            rejection: None,
        }
    }

    fn rejected(rejection: Rejection) -> Self {
        Self {
            successful: false,
            action_codes: Vec::new(),
            action_names: Vec::new(),
            message: rejection.message().to_string(),
            rejection: Some(rejection),
        }
    }
}

impl GameFlowService {
    /// Authenticates the seat and carries out `code` on its behalf.
    ///
    /// Transport-level problems (unknown seat, wrong secret, target out of
    /// range) are errors. Everything the role itself refuses comes back as
    /// an unsuccessful [`ActionOutcome`].
    pub fn handle_action(
        &self,
        seat: SeatId,
        secret: &str,
        code: ActionCode,
        target: Option<SeatId>,
    ) -> Result<ActionOutcome, AppError> {
        if !self.is_initialized() {
            return Err(not_initialized().into());
        }

        let mut seats = self.seats.write();
        let seat_count = seats.len();
        let actor = seats
            .get(seat)
            .ok_or_else(|| invalid_seat(seat, seat_count))?;
        if !actor.verify_secret(secret) {
            warn!(seat, "Action rejected: wrong secret");
            return Err(DomainError::unauthorized(format!("Wrong secret for seat {seat}")).into());
        }
        let stamp = self.phase.load();
        let ctx = PlanContext {
            phase: stamp.phase,
            kill_candidate: self.night.lock().kill_candidate,
        };

        if code == ActionCode::GetActions {
            let offer = available_actions(actor, &ctx);
            let mut message = String::new();
            if actor.role() == RoleKind::Witch && offer.actions.contains(&ActionCode::Save) {
                if let Some(candidate) = ctx.kill_candidate {
                    message = format!("Seat {candidate} will die tonight");
                }
            }
            return Ok(ActionOutcome::offer(offer.can_act, offer.actions, message));
        }

        if let Some(target) = target.filter(|t| *t >= seat_count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                format!("target {target} is out of range 0..{seat_count}"),
            )
            .into());
        }

        let intent = match plan(actor, code, target, &seats, &ctx) {
            Ok(intent) => intent,
            Err(rejection) => {
                debug!(seat, ?code, ?rejection, "Action refused");
                return Ok(ActionOutcome::rejected(rejection));
            }
        };

        let epoch = stamp.epoch;
        let handed_over = match intent {
            Intent::Fire(victim) => {
                seats[victim].die(DeathCause::Ordinary);
                seats[seat].abilities.fired = true;
                info!(seat, victim, "Hunter fired");
                if let Some(winner) = self.verdict.check(&seats) {
                    info!(?winner, "Game decided by the hunter");
                    self.slots.banish.disarm();
                }
                return Ok(ActionOutcome::accepted(format!(
                    "Fire succeeded! Seat {victim} is dead"
                )));
            }
            Intent::Kill(victim) => self
                .slots
                .kill
                .offer(epoch, victim)
                .map(|()| format!("Kill submitted on seat {victim}"))
                .map_err(drop),
            Intent::Protect(guarded) => self
                .slots
                .guard
                .offer(epoch, guarded)
                .map(|()| match guarded {
                    Some(id) => format!("Guard succeeded! Seat {id} is protected"),
                    None => "Didn't use any skill!".to_string(),
                })
                .map_err(drop),
            Intent::Witch(decision) => {
                let offered = self.slots.witch.offer(epoch, decision);
                if offered.is_ok() {
                    let ledger = &mut seats[seat].abilities;
                    match decision {
                        WitchDecision::Save => ledger.save_used = true,
                        WitchDecision::Poison(_) => ledger.poison_used = true,
                        WitchDecision::Abstain => {}
                    }
                }
                offered
                    .map(|()| match decision {
                        WitchDecision::Save => "Successfully used the save potion!".to_string(),
                        WitchDecision::Poison(id) => format!("Successfully poisoned seat {id}!"),
                        WitchDecision::Abstain => "Didn't use any skill!".to_string(),
                    })
                    .map_err(drop)
            }
            Intent::Reveal { target, alignment } => {
                self.slots.seer.offer(epoch, target).map(|()| {
                    let name = seats[target].name().unwrap_or("unnamed");
                    let verdict = match alignment {
                        Alignment::Werewolves => "a werewolf",
                        Alignment::Village => "not a werewolf",
                    };
                    format!("Seat {target} ({name}) is {verdict}")
                })
                .map_err(drop)
            }
        };

        match handed_over {
            Ok(message) => {
                info!(seat, ?code, phase = ?stamp.phase, "Decision handed to sequencer");
                Ok(ActionOutcome::accepted(message))
            }
            Err(_) => {
                debug!(seat, ?code, "Decision slot already taken");
                Ok(ActionOutcome::rejected(Rejection::NotYourTurn))
            }
        }
    }

    /// Day-only: banishes a living seat and ends the day.
    pub fn banish(&self, target: SeatId) -> Result<(), AppError> {
        if !self.is_initialized() {
            return Err(not_initialized().into());
        }

        let stamp = self.phase.load();
        if stamp.phase != Phase::Day {
            return Err(DomainError::forbidden(
                ForbiddenKind::WrongPhase,
                "Players can only be banished during the day",
            )
            .into());
        }

        let mut seats = self.seats.write();
        let seat_count = seats.len();
        let victim = seats
            .get_mut(target)
            .ok_or_else(|| invalid_seat(target, seat_count))?;
        if !victim.is_alive() {
            return Err(DomainError::conflict(
                ConflictKind::TargetAlreadyDead,
                format!("Seat {target} is already dead"),
            )
            .into());
        }

        self.slots.banish.offer(stamp.epoch, target).map_err(|_| {
            DomainError::validation(ValidationKind::PhaseMismatch, "The day has already ended")
        })?;
        victim.die(DeathCause::Ordinary);

        info!(seat = target, "Seat banished");
        Ok(())
    }
}

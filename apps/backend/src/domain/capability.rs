//! What a seat may do right now, and validation of what it asks to do.
//!
//! Everything here is pure: callers pass the seat table and the current
//! phase, and get back either an [`Intent`] to carry out or a [`Rejection`].
//! Nothing is mutated, so a rejected action never leaves a trace.

use serde::Serialize;

use crate::domain::phase::Phase;
use crate::domain::resolution::WitchDecision;
use crate::domain::roles::{ActionCode, Alignment, RoleKind, SeatId};
use crate::domain::seat::Seat;
use crate::errors::ErrorCode;

/// Role-level refusal. Returned to the caller inside an unsuccessful
/// outcome rather than as a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    NotYourTurn,
    ActionNotPermitted,
    ActorDead,
    AbilityAlreadyUsed,
    AbilityBlocked,
    InvalidTarget,
    TargetAlreadyDead,
}

impl Rejection {
    pub const fn message(self) -> &'static str {
        match self {
            Rejection::NotYourTurn => "Not your turn!",
            Rejection::ActionNotPermitted => "You're not able to use this skill!",
            Rejection::ActorDead => "Dead players cannot act!",
            Rejection::AbilityAlreadyUsed => "That ability is already used!",
            Rejection::AbilityBlocked => "You're poisoned!",
            Rejection::InvalidTarget => "Invalid target!",
            Rejection::TargetAlreadyDead => "Target is already dead!",
        }
    }

    pub const fn code(self) -> ErrorCode {
        match self {
            Rejection::NotYourTurn => ErrorCode::NotYourTurn,
            Rejection::ActionNotPermitted => ErrorCode::ActionNotPermitted,
            Rejection::ActorDead => ErrorCode::ActorDead,
            Rejection::AbilityAlreadyUsed => ErrorCode::AbilityAlreadyUsed,
            Rejection::AbilityBlocked => ErrorCode::AbilityBlocked,
            Rejection::InvalidTarget => ErrorCode::InvalidTarget,
            Rejection::TargetAlreadyDead => ErrorCode::TargetAlreadyDead,
        }
    }
}

/// Read-only view of the game the planner needs besides the seats.
#[derive(Debug, Clone, Copy)]
pub struct PlanContext {
    pub phase: Phase,
    /// Werewolves' pick for the current night, once made.
    pub kill_candidate: Option<SeatId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableActions {
    pub can_act: bool,
    pub actions: Vec<ActionCode>,
}

impl AvailableActions {
    fn none() -> Self {
        Self {
            can_act: false,
            actions: Vec::new(),
        }
    }
}

/// A validated action, ready to be handed to the sequencer or applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Kill(SeatId),
    /// `None` is the guard abstaining.
    Protect(Option<SeatId>),
    Witch(WitchDecision),
    Reveal {
        target: SeatId,
        alignment: Alignment,
    },
    Fire(SeatId),
}

impl Intent {
    /// Whether this intent is the decision the current phase waits for.
    pub const fn is_phase_defining(&self) -> bool {
        !matches!(self, Intent::Fire(_))
    }
}

pub fn available_actions(seat: &Seat, ctx: &PlanContext) -> AvailableActions {
    let role = seat.role();
    if role.active_phase() != Some(ctx.phase) {
        return AvailableActions::none();
    }

    let ledger = seat.abilities;
    let actions: Vec<ActionCode> = match role {
        RoleKind::Witch => {
            if !seat.is_alive() {
                return AvailableActions::none();
            }
            let mut offer = Vec::with_capacity(3);
            if !ledger.save_used && ctx.kill_candidate.is_some() {
                offer.push(ActionCode::Save);
            }
            if !ledger.poison_used {
                offer.push(ActionCode::Poison);
            }
            if offer.is_empty() {
                return AvailableActions::none();
            }
            offer.push(ActionCode::Abstain);
            offer
        }
        RoleKind::Hunter => {
            if ledger.fired || seat.is_poisoned() {
                return AvailableActions::none();
            }
            vec![ActionCode::Fire]
        }
        _ => {
            if !seat.is_alive() {
                return AvailableActions::none();
            }
            role.skills().to_vec()
        }
    };

    AvailableActions {
        can_act: true,
        actions,
    }
}

fn live_target(seats: &[Seat], target: Option<SeatId>) -> Result<SeatId, Rejection> {
    let id = target.ok_or(Rejection::InvalidTarget)?;
    let seat = seats.get(id).ok_or(Rejection::InvalidTarget)?;
    if !seat.is_alive() {
        return Err(Rejection::TargetAlreadyDead);
    }
    Ok(id)
}

/// Validates `code` for `actor` without mutating anything.
pub fn plan(
    actor: &Seat,
    code: ActionCode,
    target: Option<SeatId>,
    seats: &[Seat],
    ctx: &PlanContext,
) -> Result<Intent, Rejection> {
    let role = actor.role();
    let Some(active) = role.active_phase() else {
        return Err(Rejection::ActionNotPermitted);
    };
    if active != ctx.phase {
        return Err(Rejection::NotYourTurn);
    }
    if !role.skills().contains(&code) {
        return Err(Rejection::ActionNotPermitted);
    }

    // A hunter shot down by an ordinary death may still fire.
    if role == RoleKind::Hunter {
        if actor.is_poisoned() {
            return Err(Rejection::AbilityBlocked);
        }
        if actor.abilities.fired {
            return Err(Rejection::AbilityAlreadyUsed);
        }
        if target == Some(actor.id()) {
            return Err(Rejection::InvalidTarget);
        }
        return live_target(seats, target).map(Intent::Fire);
    }

    if !actor.is_alive() {
        return Err(Rejection::ActorDead);
    }

    match code {
        ActionCode::Kill => live_target(seats, target).map(Intent::Kill),
        ActionCode::Protect => live_target(seats, target).map(|id| Intent::Protect(Some(id))),
        ActionCode::Abstain if role == RoleKind::Guard => Ok(Intent::Protect(None)),
        ActionCode::Abstain => Ok(Intent::Witch(WitchDecision::Abstain)),
        ActionCode::Save => {
            if actor.abilities.save_used {
                return Err(Rejection::AbilityAlreadyUsed);
            }
            if ctx.kill_candidate.is_none() {
                return Err(Rejection::InvalidTarget);
            }
            Ok(Intent::Witch(WitchDecision::Save))
        }
        ActionCode::Poison => {
            if actor.abilities.poison_used {
                return Err(Rejection::AbilityAlreadyUsed);
            }
            live_target(seats, target).map(|id| Intent::Witch(WitchDecision::Poison(id)))
        }
        ActionCode::Reveal => {
            let id = target.ok_or(Rejection::InvalidTarget)?;
            let seat = seats.get(id).ok_or(Rejection::InvalidTarget)?;
            Ok(Intent::Reveal {
                target: id,
                alignment: seat.role().alignment(),
            })
        }
        ActionCode::GetActions | ActionCode::Fire => Err(Rejection::ActionNotPermitted),
    }
}

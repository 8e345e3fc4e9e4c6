//! Role variants, factions and action codes.
//!
//! Roles are a closed set. Every per-role question (when does it act, what
//! can it do, which side is it on) is answered by a `match` here so adding a
//! role is a compile error everywhere it matters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::phase::Phase;

/// Seat index, `0..seat_count`.
pub type SeatId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Ordinary member without abilities.
    Villager,
    /// Kills one seat per night.
    Werewolf,
    /// Second werewolf variant sharing the werewolves' night slot.
    WhiteWolf,
    /// Protects one seat per night.
    Guard,
    /// One save potion and one poison per game.
    Witch,
    /// Learns one seat's alignment per night.
    Seer,
    /// Fires once during the day.
    Hunter,
    /// Special role with no abilities.
    Idiot,
}

/// Which side a seat plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Werewolves,
    Village,
}

/// Elimination groups used by the win evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Werewolves,
    Villagers,
    /// Village-aligned seats holding a special role.
    Specials,
}

impl RoleKind {
    pub const ALL: [RoleKind; 8] = [
        RoleKind::Villager,
        RoleKind::Werewolf,
        RoleKind::WhiteWolf,
        RoleKind::Guard,
        RoleKind::Witch,
        RoleKind::Seer,
        RoleKind::Hunter,
        RoleKind::Idiot,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            RoleKind::Villager => "Villager",
            RoleKind::Werewolf => "Werewolf",
            RoleKind::WhiteWolf => "WhiteWolf",
            RoleKind::Guard => "Guard",
            RoleKind::Witch => "Witch",
            RoleKind::Seer => "Seer",
            RoleKind::Hunter => "Hunter",
            RoleKind::Idiot => "Idiot",
        }
    }

    pub const fn alignment(self) -> Alignment {
        match self {
            RoleKind::Werewolf | RoleKind::WhiteWolf => Alignment::Werewolves,
            _ => Alignment::Village,
        }
    }

    pub const fn faction(self) -> Faction {
        match self {
            RoleKind::Werewolf | RoleKind::WhiteWolf => Faction::Werewolves,
            RoleKind::Villager => Faction::Villagers,
            RoleKind::Guard
            | RoleKind::Witch
            | RoleKind::Seer
            | RoleKind::Hunter
            | RoleKind::Idiot => Faction::Specials,
        }
    }

    /// The phase in which this role may act, if any.
    pub const fn active_phase(self) -> Option<Phase> {
        match self {
            RoleKind::Werewolf | RoleKind::WhiteWolf => Some(Phase::WerewolfTurn),
            RoleKind::Guard => Some(Phase::GuardTurn),
            RoleKind::Witch => Some(Phase::WitchTurn),
            RoleKind::Seer => Some(Phase::SeerTurn),
            RoleKind::Hunter => Some(Phase::Day),
            RoleKind::Villager | RoleKind::Idiot => None,
        }
    }

    /// Every action this role can ever take, ignoring exhaustion.
    pub const fn skills(self) -> &'static [ActionCode] {
        match self {
            RoleKind::Werewolf | RoleKind::WhiteWolf => &[ActionCode::Kill],
            RoleKind::Guard => &[ActionCode::Protect, ActionCode::Abstain],
            RoleKind::Witch => &[ActionCode::Save, ActionCode::Poison, ActionCode::Abstain],
            RoleKind::Seer => &[ActionCode::Reveal],
            RoleKind::Hunter => &[ActionCode::Fire],
            RoleKind::Villager | RoleKind::Idiot => &[],
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Action codes as they travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ActionCode {
    /// Pseudo-action: list what the caller may do right now.
    GetActions = 0,
    Kill = 1,
    Save = 2,
    Poison = 3,
    Reveal = 4,
    Fire = 5,
    Protect = 6,
    Abstain = 7,
}

impl ActionCode {
    pub const fn name(self) -> &'static str {
        match self {
            ActionCode::GetActions => "GetActions",
            ActionCode::Kill => "Kill",
            ActionCode::Save => "Save",
            ActionCode::Poison => "Poison",
            ActionCode::Reveal => "Reveal",
            ActionCode::Fire => "Fire",
            ActionCode::Protect => "Protect",
            ActionCode::Abstain => "Abstain",
        }
    }
}

impl From<ActionCode> for u8 {
    fn from(code: ActionCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for ActionCode {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => ActionCode::GetActions,
            1 => ActionCode::Kill,
            2 => ActionCode::Save,
            3 => ActionCode::Poison,
            4 => ActionCode::Reveal,
            5 => ActionCode::Fire,
            6 => ActionCode::Protect,
            7 => ActionCode::Abstain,
            other => return Err(format!("unknown action code {other}")),
        })
    }
}

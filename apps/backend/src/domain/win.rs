//! Game-end evaluation.

use std::sync::OnceLock;

use serde::Serialize;

use crate::domain::roles::Faction;
use crate::domain::seat::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Villagers,
    Werewolves,
}

fn wiped_out(seats: &[Seat], faction: Faction) -> Option<bool> {
    let mut members = seats.iter().filter(|s| s.role().faction() == faction).peekable();
    members.peek()?;
    Some(members.all(|s| !s.is_alive()))
}

/// Pure verdict over the current seats.
///
/// Werewolves lose when all of them are dead. They win when every
/// villager is dead, or when every special role is dead in a game that had
/// any.
pub fn evaluate(seats: &[Seat]) -> Option<Winner> {
    if wiped_out(seats, Faction::Werewolves)? {
        return Some(Winner::Villagers);
    }
    if wiped_out(seats, Faction::Villagers) == Some(true) {
        return Some(Winner::Werewolves);
    }
    if wiped_out(seats, Faction::Specials) == Some(true) {
        return Some(Winner::Werewolves);
    }
    None
}

/// Verdict that, once reached, never changes.
#[derive(Debug, Default)]
pub struct WinLatch {
    verdict: OnceLock<Winner>,
}

impl WinLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.verdict.get().copied()
    }

    pub fn is_ended(&self) -> bool {
        self.verdict.get().is_some()
    }

    /// Returns the latched winner, evaluating `seats` only if none yet.
    pub fn check(&self, seats: &[Seat]) -> Option<Winner> {
        if let Some(winner) = self.verdict.get() {
            return Some(*winner);
        }
        let winner = evaluate(seats)?;
        Some(*self.verdict.get_or_init(|| winner))
    }
}

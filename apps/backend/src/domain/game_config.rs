//! Role counts submitted at initialization.

use serde::{Deserialize, Serialize};

use crate::domain::roles::RoleKind;
use crate::errors::domain::{DomainError, ValidationKind};

/// Largest table a single game will seat.
pub const MAX_SEATS: u64 = 64;

/// Per-role seat counts. Field names follow the `/init` JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub villager_count: u32,
    pub werewolf_count: u32,
    pub white_wolf_count: u32,
    pub guard_count: u32,
    pub witch_count: u32,
    pub seer_count: u32,
    pub hunter_count: u32,
    pub idiot_count: u32,
    /// Fixes the seat permutation; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn count(&self, role: RoleKind) -> u32 {
        match role {
            RoleKind::Villager => self.villager_count,
            RoleKind::Werewolf => self.werewolf_count,
            RoleKind::WhiteWolf => self.white_wolf_count,
            RoleKind::Guard => self.guard_count,
            RoleKind::Witch => self.witch_count,
            RoleKind::Seer => self.seer_count,
            RoleKind::Hunter => self.hunter_count,
            RoleKind::Idiot => self.idiot_count,
        }
    }

    pub fn has_role(&self, role: RoleKind) -> bool {
        self.count(role) > 0
    }

    /// Checks every count and reports all offending fields at once.
    pub fn validate(&self) -> Result<(), DomainError> {
        let too_many = format!("total seat count must be at most {MAX_SEATS}");
        let mut offending: Vec<&str> = Vec::new();

        if self.villager_count < 1 {
            offending.push("villagerCount must be at least 1");
        }
        if self.werewolf_count < 1 {
            offending.push("werewolfCount must be at least 1");
        }
        let unique = [
            (self.white_wolf_count, "whiteWolfCount must be 0 or 1"),
            (self.guard_count, "guardCount must be 0 or 1"),
            (self.witch_count, "witchCount must be 0 or 1"),
            (self.seer_count, "seerCount must be 0 or 1"),
            (self.hunter_count, "hunterCount must be 0 or 1"),
            (self.idiot_count, "idiotCount must be 0 or 1"),
        ];
        offending.extend(
            unique
                .iter()
                .filter(|(count, _)| *count > 1)
                .map(|(_, msg)| *msg),
        );

        let total: u64 = RoleKind::ALL
            .iter()
            .map(|role| u64::from(self.count(*role)))
            .sum();
        if total > MAX_SEATS {
            offending.push(&too_many);
        }

        if offending.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                offending.join(" && "),
            ))
        }
    }

    pub fn total_seats(&self) -> usize {
        RoleKind::ALL
            .iter()
            .map(|role| self.count(*role) as usize)
            .sum()
    }

    /// Unshuffled role multiset, one entry per seat.
    pub fn roster(&self) -> Vec<RoleKind> {
        let mut roles = Vec::with_capacity(self.total_seats());
        for role in RoleKind::ALL {
            roles.extend(std::iter::repeat(role).take(self.count(role) as usize));
        }
        roles
    }
}

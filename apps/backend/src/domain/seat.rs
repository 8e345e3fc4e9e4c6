//! A single seat at the table: role, identity, life and ability ledger.

use serde::Serialize;

use crate::domain::roles::{RoleKind, SeatId};
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Ordinary,
    Poisoned,
}

/// Limited-use abilities, each spent at most once per game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityLedger {
    pub save_used: bool,
    pub poison_used: bool,
    pub fired: bool,
}

#[derive(Debug, Clone)]
pub struct Seat {
    id: SeatId,
    role: RoleKind,
    name: Option<String>,
    secret: Option<blake3::Hash>,
    death: Option<DeathCause>,
    pub abilities: AbilityLedger,
}

impl Seat {
    pub fn new(id: SeatId, role: RoleKind) -> Self {
        Self {
            id,
            role,
            name: None,
            secret: None,
            death: None,
            abilities: AbilityLedger::default(),
        }
    }

    pub fn id(&self) -> SeatId {
        self.id
    }

    pub fn role(&self) -> RoleKind {
        self.role
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_registered(&self) -> bool {
        self.name.is_some()
    }

    /// Binds name and secret. Both are write-once.
    pub fn register(&mut self, name: &str, secret: &str) -> Result<(), DomainError> {
        if let Some(existing) = &self.name {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyRegistered,
                format!("seat {} is already registered to {existing}", self.id),
            ));
        }
        self.name = Some(name.to_string());
        self.secret = Some(blake3::hash(secret.as_bytes()));
        Ok(())
    }

    /// `blake3::Hash` equality is constant-time.
    pub fn verify_secret(&self, secret: &str) -> bool {
        self.secret
            .is_some_and(|stored| stored == blake3::hash(secret.as_bytes()))
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn death(&self) -> Option<DeathCause> {
        self.death
    }

    pub fn is_poisoned(&self) -> bool {
        self.death == Some(DeathCause::Poisoned)
    }

    /// Marks the seat dead. A second death keeps the first cause and
    /// returns `false`.
    pub fn die(&mut self, cause: DeathCause) -> bool {
        if self.death.is_some() {
            return false;
        }
        self.death = Some(cause);
        true
    }

    /// Whether the holder could still submit a decision in its night phase.
    pub fn can_still_decide(&self) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.role {
            RoleKind::Witch => !(self.abilities.save_used && self.abilities.poison_used),
            _ => true,
        }
    }
}

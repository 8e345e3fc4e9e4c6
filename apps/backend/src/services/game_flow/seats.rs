use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, info_span, warn, Instrument};

use super::GameFlowService;
use crate::domain::game_config::GameConfig;
use crate::domain::roles::{RoleKind, SeatId};
use crate::domain::seat::Seat;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};

/// Returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub seat: SeatId,
    pub name: String,
    pub role: RoleKind,
}

pub(super) fn not_initialized() -> DomainError {
    DomainError::forbidden(ForbiddenKind::NotInitialized, "Game has not been initialized")
}

pub(super) fn invalid_seat(seat: SeatId, seat_count: usize) -> DomainError {
    DomainError::validation(
        ValidationKind::InvalidSeat,
        format!("seat {seat} is out of range 0..{seat_count}"),
    )
}

/// Deals `roster` onto seats with a uniform random permutation.
fn deal_seats(mut roster: Vec<RoleKind>, seed: Option<u64>) -> Vec<Seat> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    roster.shuffle(&mut rng);
    roster
        .into_iter()
        .enumerate()
        .map(|(id, role)| Seat::new(id, role))
        .collect()
}

impl GameFlowService {
    /// One-shot setup. Returns the number of seats.
    pub fn initialize(&self, config: GameConfig) -> Result<usize, AppError> {
        config.validate()?;

        let mut gate = self.gate.lock();
        if gate.config.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyInitialized,
                "Game is already initialized",
            )
            .into());
        }

        let seats = deal_seats(config.roster(), config.seed);
        let seat_count = seats.len();
        *self.seats.write() = seats;
        gate.config = Some(config);

        info!(seat_count, "Game initialized");
        Ok(seat_count)
    }

    /// Binds a display name and secret to a seat.
    pub fn register(
        &self,
        seat: SeatId,
        name: &str,
        secret: &str,
    ) -> Result<Registration, AppError> {
        if !self.is_initialized() {
            return Err(not_initialized().into());
        }

        let mut seats = self.seats.write();
        let seat_count = seats.len();
        let entry = seats
            .get_mut(seat)
            .ok_or_else(|| invalid_seat(seat, seat_count))?;
        entry.register(name, secret).inspect_err(|_| {
            warn!(seat, "Seat registration rejected: already registered");
        })?;

        info!(seat, name, "Seat registered");
        Ok(Registration {
            seat,
            name: name.to_string(),
            role: entry.role(),
        })
    }

    /// Starts the sequencer once every seat is registered.
    pub fn start(self: &Arc<Self>) -> Result<(), AppError> {
        let mut gate = self.gate.lock();
        if gate.config.is_none() {
            return Err(not_initialized().into());
        }
        if gate.started {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyStarted,
                "Game has already started",
            )
            .into());
        }

        {
            let seats = self.seats.read();
            if let Some(missing) = seats.iter().find(|s| !s.is_registered()) {
                return Err(DomainError::forbidden(
                    ForbiddenKind::NotAllRegistered,
                    format!("Not all seats are registered (seat {} is empty)", missing.id()),
                )
                .into());
            }
            for seat in seats.iter() {
                info!(seat = seat.id(), name = seat.name(), "Player seated");
            }
        }

        gate.started = true;

        let service = Arc::clone(self);
        tokio::spawn(async move { service.run().await }.instrument(info_span!("sequencer")));

        info!("Game started");
        Ok(())
    }

    pub(super) fn has_configured(&self, role: RoleKind) -> bool {
        self.gate
            .lock()
            .config
            .as_ref()
            .is_some_and(|cfg| cfg.has_role(role))
    }
}

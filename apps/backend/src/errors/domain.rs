//! Domain-level error type used across the game flow services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Input/user validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidConfig,
    InvalidSeat,
    InvalidTarget,
    /// The phase moved on before the decision could be handed over
    PhaseMismatch,
}

/// Semantic conflicts with the current game state
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    AlreadyInitialized,
    AlreadyRegistered,
    GameAlreadyStarted,
    TargetAlreadyDead,
}

/// Requests that are well-formed but not allowed right now
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForbiddenKind {
    NotInitialized,
    NotAllRegistered,
    /// Day-only query or command issued outside the day
    WrongPhase,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Not allowed in the current lifecycle state
    Forbidden(ForbiddenKind, String),
    /// Seat secret mismatch
    Unauthorized(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::Forbidden(kind, d) => write!(f, "forbidden {kind:?}: {d}"),
            DomainError::Unauthorized(d) => write!(f, "unauthorized: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized(detail.into())
    }

    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidConfig => ErrorCode::InvalidConfig,
                ValidationKind::InvalidSeat => ErrorCode::InvalidSeat,
                ValidationKind::InvalidTarget => ErrorCode::InvalidTarget,
                ValidationKind::PhaseMismatch => ErrorCode::NotYourTurn,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::AlreadyInitialized => ErrorCode::AlreadyInitialized,
                ConflictKind::AlreadyRegistered => ErrorCode::AlreadyRegistered,
                ConflictKind::GameAlreadyStarted => ErrorCode::GameAlreadyStarted,
                ConflictKind::TargetAlreadyDead => ErrorCode::TargetAlreadyDead,
            },
            DomainError::Forbidden(kind, _) => match kind {
                ForbiddenKind::NotInitialized => ErrorCode::NotInitialized,
                ForbiddenKind::NotAllRegistered => ErrorCode::NotAllRegistered,
                ForbiddenKind::WrongPhase => ErrorCode::WrongPhase,
            },
            DomainError::Unauthorized(_) => ErrorCode::WrongSecret,
        }
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::Forbidden(_, d)
            | DomainError::Unauthorized(d) => d,
        }
    }
}

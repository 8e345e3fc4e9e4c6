//! Error codes for the Werewolf moderator API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and in rejected action outcomes.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the moderator API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Game lifecycle
    /// Role counts do not form a playable game
    InvalidConfig,
    /// The game has already been initialized
    AlreadyInitialized,
    /// The game has not been initialized yet
    NotInitialized,
    /// The seat already bound a name and secret
    AlreadyRegistered,
    /// The game loop is already running
    GameAlreadyStarted,
    /// At least one seat has not registered
    NotAllRegistered,

    // Request Validation
    /// Seat id outside the seat table
    InvalidSeat,
    /// Target seat is out of range or not allowed for this action
    InvalidTarget,
    /// Unknown action code
    InvalidActionCode,
    /// General bad request error
    BadRequest,

    // Authentication
    /// Secret does not match the one bound at registration
    WrongSecret,

    // Turn and ability rules
    /// The current phase does not accept this decision
    NotYourTurn,
    /// The role has no such ability
    ActionNotPermitted,
    /// The acting seat is dead
    ActorDead,
    /// A one-shot ability was already spent
    AbilityAlreadyUsed,
    /// The ability is blocked (e.g. a poisoned hunter)
    AbilityBlocked,
    /// The target is already dead
    TargetAlreadyDead,
    /// Query only answered during the day
    WrongPhase,

    // Realtime
    /// No cue arrived within the long-poll window
    LongPollTimeout,
    /// The cue feed has been closed
    CueFeedClosed,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::NotAllRegistered => "NOT_ALL_REGISTERED",

            Self::InvalidSeat => "INVALID_SEAT",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::InvalidActionCode => "INVALID_ACTION_CODE",
            Self::BadRequest => "BAD_REQUEST",

            Self::WrongSecret => "WRONG_SECRET",

            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::ActionNotPermitted => "ACTION_NOT_PERMITTED",
            Self::ActorDead => "ACTOR_DEAD",
            Self::AbilityAlreadyUsed => "ABILITY_ALREADY_USED",
            Self::AbilityBlocked => "ABILITY_BLOCKED",
            Self::TargetAlreadyDead => "TARGET_ALREADY_DEAD",
            Self::WrongPhase => "WRONG_PHASE",

            Self::LongPollTimeout => "LONG_POLL_TIMEOUT",
            Self::CueFeedClosed => "CUE_FEED_CLOSED",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

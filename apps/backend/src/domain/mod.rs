//! Domain layer: pure game rules and the types they operate on.

pub mod capability;
pub mod game_config;
pub mod phase;
pub mod resolution;
pub mod roles;
pub mod seat;
pub mod win;

// Re-exports for ergonomics
pub use capability::{AvailableActions, Intent, PlanContext, Rejection};
pub use game_config::GameConfig;
pub use phase::{Cue, Phase, PhaseCell, PhaseStamp};
pub use resolution::{NightOutcome, WitchDecision};
pub use roles::{ActionCode, Alignment, Faction, RoleKind, SeatId};
pub use seat::{DeathCause, Seat};
pub use win::{WinLatch, Winner};

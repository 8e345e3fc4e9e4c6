pub mod game_flow;

pub use game_flow::{ActionOutcome, FlowSettings, GameFlowService, GameStatus, LastNightSummary};

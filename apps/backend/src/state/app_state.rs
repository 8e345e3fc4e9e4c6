use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::server::ServerConfig;
use crate::realtime::broker::{CueBroker, CueStream};
use crate::services::game_flow::GameFlowService;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// The single game this process moderates.
    pub game: Arc<GameFlowService>,
    /// Cue feed for `/client` long-polls; only present in server mode.
    pub cue_feed: Option<Arc<Mutex<CueStream>>>,
    /// How long a `/client` request waits for a cue.
    pub long_poll: Duration,
}

impl AppState {
    pub fn new(game: Arc<GameFlowService>, long_poll: Duration) -> Self {
        Self {
            game,
            cue_feed: None,
            long_poll,
        }
    }

    /// Builds the game service and its cue channel from process settings.
    pub fn from_config(config: &ServerConfig) -> (Self, CueStream) {
        let (broker, stream) = CueBroker::channel(config.cue_capacity, config.cue_overflow);
        let game = Arc::new(GameFlowService::new(config.flow_settings(), broker));
        (Self::new(game, config.long_poll), stream)
    }

    /// Exposes `stream` through the `/client` endpoint.
    pub fn with_cue_feed(mut self, stream: CueStream) -> Self {
        self.cue_feed = Some(Arc::new(Mutex::new(stream)));
        self
    }
}

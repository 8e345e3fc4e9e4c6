use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use werewolf_backend::domain::game_config::GameConfig;
use werewolf_backend::domain::phase::{Cue, Phase};
use werewolf_backend::domain::roles::{ActionCode, RoleKind, SeatId};
use werewolf_backend::realtime::broker::{CueBroker, CueStream, OverflowPolicy};
use werewolf_backend::services::game_flow::{ActionOutcome, FlowSettings, GameFlowService};

const WAIT_LIMIT: Duration = Duration::from_secs(5);
const CUE_CAPACITY: usize = 1024;

/// 4 villagers, 1 werewolf, 1 seer, 1 witch.
pub fn classic_config() -> GameConfig {
    GameConfig {
        villager_count: 4,
        werewolf_count: 1,
        seer_count: 1,
        witch_count: 1,
        seed: Some(7),
        ..GameConfig::default()
    }
}

/// Waits until the sequencer sits in `phase` during `round`.
pub async fn wait_for_phase(game: &GameFlowService, phase: Phase, round: u32) {
    let deadline = Instant::now() + WAIT_LIMIT;
    loop {
        let status = game.status();
        if status.phase == phase && status.round == round {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {phase:?} in round {round}, last saw {status:?}"
        );
        sleep(Duration::from_millis(1)).await;
    }
}

pub fn secret_for(seat: SeatId) -> String {
    format!("secret-{seat}")
}

/// A game service wired to an undrained cue channel, with no pacing.
pub struct TestGame {
    pub game: Arc<GameFlowService>,
    pub cues: CueStream,
}

impl TestGame {
    pub fn new() -> Self {
        Self::with_settings(FlowSettings {
            pacing: Duration::ZERO,
            decision_timeout: None,
        })
    }

    pub fn with_settings(settings: FlowSettings) -> Self {
        let (broker, cues) = CueBroker::channel(CUE_CAPACITY, OverflowPolicy::Block);
        Self {
            game: Arc::new(GameFlowService::new(settings, broker)),
            cues,
        }
    }

    /// Initializes, registers every seat and starts the loop.
    pub fn started(config: GameConfig) -> Self {
        let this = Self::new();
        this.initialize_and_register(config);
        this.game.start().expect("start should succeed");
        this
    }

    pub fn initialize_and_register(&self, config: GameConfig) {
        let seats = self.game.initialize(config).expect("config should be valid");
        for seat in 0..seats {
            self.game
                .register(seat, &format!("player-{seat}"), &secret_for(seat))
                .expect("registration should succeed");
        }
    }

    pub fn seats_of(&self, role: RoleKind) -> Vec<SeatId> {
        self.game
            .seat_roles()
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == role)
            .map(|(seat, _)| seat)
            .collect()
    }

    pub fn seat_of(&self, role: RoleKind) -> SeatId {
        self.seats_of(role)[0]
    }

    pub fn act(&self, seat: SeatId, code: ActionCode, target: Option<SeatId>) -> ActionOutcome {
        self.game
            .handle_action(seat, &secret_for(seat), code, target)
            .expect("gateway should accept the request")
    }

    pub async fn wait_for(&self, phase: Phase, round: u32) {
        wait_for_phase(&self.game, phase, round).await;
    }

    pub async fn wait_for_game_over(&self) {
        let deadline = Instant::now() + WAIT_LIMIT;
        while self.game.phase() != Phase::GameOver {
            assert!(Instant::now() < deadline, "timed out waiting for game over");
            sleep(Duration::from_millis(1)).await;
        }
    }

    /// Every cue queued so far.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        let mut drained = Vec::new();
        while let Some(cue) = self.cues.try_next() {
            drained.push(cue);
        }
        drained
    }
}

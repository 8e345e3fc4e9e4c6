//! In-process stand-in for the moderator's voice: drains cues and narrates
//! them through the log.

use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::phase::{Cue, Phase};
use crate::realtime::broker::CueStream;

/// Line the moderator would say for `cue`.
pub fn narration(cue: Cue) -> &'static str {
    match cue {
        Cue::NightFalls => "Night falls. Everybody, close your eyes.",
        Cue::Enter(Phase::WerewolfTurn) => "Werewolves, open your eyes and choose a victim.",
        Cue::Enter(Phase::GuardTurn) => "Guard, open your eyes and choose who to protect.",
        Cue::Enter(Phase::WitchTurn) => "Witch, open your eyes. Will you use a potion?",
        Cue::Enter(Phase::SeerTurn) => "Seer, open your eyes and choose who to inspect.",
        Cue::Enter(Phase::Day) => "Day breaks. Everybody, open your eyes.",
        Cue::Enter(_) => "",
        Cue::SubphaseEnded(Phase::WerewolfTurn) => "Werewolves, close your eyes.",
        Cue::SubphaseEnded(Phase::GuardTurn) => "Guard, close your eyes.",
        Cue::SubphaseEnded(Phase::WitchTurn) => "Witch, close your eyes.",
        Cue::SubphaseEnded(Phase::SeerTurn) => "Seer, close your eyes.",
        Cue::SubphaseEnded(_) => "",
        Cue::NightEnds => "The night is over.",
        Cue::GameOver => "Game over!",
    }
}

pub fn announce(cue: Cue) {
    let line = narration(cue);
    if !line.is_empty() {
        info!(?cue, "{line}");
    }
}

/// Narrates every cue until the broker goes away or the game ends.
pub fn spawn(mut stream: CueStream) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(cue) = stream.next().await {
            announce(cue);
            if cue == Cue::GameOver {
                break;
            }
        }
    })
}

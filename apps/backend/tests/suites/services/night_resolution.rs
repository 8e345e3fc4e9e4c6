use werewolf_backend::domain::game_config::GameConfig;
use werewolf_backend::domain::phase::Phase;
use werewolf_backend::domain::roles::{ActionCode, RoleKind, SeatId};
use werewolf_backend::services::game_flow::LastNightSummary;

use crate::support::game_setup::TestGame;

fn guarded_config() -> GameConfig {
    GameConfig {
        villager_count: 3,
        werewolf_count: 1,
        guard_count: 1,
        witch_count: 1,
        seed: Some(3),
        ..GameConfig::default()
    }
}

/// The night as each role plays it. The werewolf always goes for the
/// first villager.
struct Night {
    guard: (ActionCode, Option<Pick>),
    witch: (ActionCode, Option<Pick>),
}

#[derive(Clone, Copy)]
enum Pick {
    Victim,
    Bystander,
}

struct Played {
    summary: LastNightSummary,
    victim: SeatId,
    bystander: SeatId,
}

async fn play_first_night(night: Night) -> Played {
    let t = TestGame::started(guarded_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    let guard = t.seat_of(RoleKind::Guard);
    let witch = t.seat_of(RoleKind::Witch);
    let villagers = t.seats_of(RoleKind::Villager);
    let (victim, bystander) = (villagers[0], villagers[1]);
    let resolve = |pick: Option<Pick>| {
        pick.map(|p| match p {
            Pick::Victim => victim,
            Pick::Bystander => bystander,
        })
    };

    t.wait_for(Phase::WerewolfTurn, 1).await;
    assert!(t.act(wolf, ActionCode::Kill, Some(victim)).successful);

    t.wait_for(Phase::GuardTurn, 1).await;
    let (code, pick) = night.guard;
    assert!(t.act(guard, code, resolve(pick)).successful);

    t.wait_for(Phase::WitchTurn, 1).await;
    let (code, pick) = night.witch;
    assert!(t.act(witch, code, resolve(pick)).successful);

    t.wait_for(Phase::Day, 1).await;
    Played {
        summary: t.game.last_night_summary().unwrap(),
        victim,
        bystander,
    }
}

#[tokio::test]
async fn unprotected_kill_lands() {
    let played = play_first_night(Night {
        guard: (ActionCode::Abstain, None),
        witch: (ActionCode::Abstain, None),
    })
    .await;
    assert_eq!(played.summary.died, vec![played.victim]);
}

#[tokio::test]
async fn guard_alone_stops_the_kill() {
    let played = play_first_night(Night {
        guard: (ActionCode::Protect, Some(Pick::Victim)),
        witch: (ActionCode::Abstain, None),
    })
    .await;
    assert!(played.summary.died.is_empty());
}

#[tokio::test]
async fn save_alone_stops_the_kill() {
    let played = play_first_night(Night {
        guard: (ActionCode::Protect, Some(Pick::Bystander)),
        witch: (ActionCode::Save, None),
    })
    .await;
    assert!(played.summary.died.is_empty());
}

#[tokio::test]
async fn guard_and_save_on_the_same_seat_cancel_out() {
    let played = play_first_night(Night {
        guard: (ActionCode::Protect, Some(Pick::Victim)),
        witch: (ActionCode::Save, None),
    })
    .await;
    assert_eq!(played.summary.died, vec![played.victim]);
}

#[tokio::test]
async fn poison_ignores_the_guard() {
    let played = play_first_night(Night {
        guard: (ActionCode::Protect, Some(Pick::Bystander)),
        witch: (ActionCode::Poison, Some(Pick::Bystander)),
    })
    .await;
    let mut died = played.summary.died.clone();
    died.sort();
    let mut expected = vec![played.victim, played.bystander];
    expected.sort();
    assert_eq!(died, expected);
}

#[tokio::test]
async fn poisoning_the_kill_target_counts_one_death() {
    let played = play_first_night(Night {
        guard: (ActionCode::Abstain, None),
        witch: (ActionCode::Poison, Some(Pick::Victim)),
    })
    .await;
    assert_eq!(played.summary.died, vec![played.victim]);
}

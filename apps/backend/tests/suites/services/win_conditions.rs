use werewolf_backend::domain::capability::Rejection;
use werewolf_backend::domain::game_config::GameConfig;
use werewolf_backend::domain::phase::{Cue, Phase};
use werewolf_backend::domain::roles::{ActionCode, RoleKind};
use werewolf_backend::domain::win::Winner;
use werewolf_backend::errors::ErrorCode;

use crate::support::game_setup::TestGame;

fn config(villagers: u32, extra: impl FnOnce(&mut GameConfig)) -> GameConfig {
    let mut config = GameConfig {
        villager_count: villagers,
        werewolf_count: 1,
        seed: Some(21),
        ..GameConfig::default()
    };
    extra(&mut config);
    config
}

#[tokio::test]
async fn werewolves_win_when_the_last_villager_dies_at_night() {
    let mut t = TestGame::started(config(1, |_| {}));
    let wolf = t.seat_of(RoleKind::Werewolf);
    let villager = t.seat_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(villager));
    t.wait_for_game_over().await;

    let status = t.game.status();
    assert!(status.ended);
    assert_eq!(status.winner, Some(Winner::Werewolves));
    assert_eq!(t.drain_cues().last(), Some(&Cue::GameOver));

    let err = t.game.last_night_summary().unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongPhase);
    let late = t.act(wolf, ActionCode::Kill, Some(wolf));
    assert_eq!(late.rejection, Some(Rejection::NotYourTurn));
}

#[tokio::test]
async fn villagers_win_by_banishing_the_last_werewolf() {
    let t = TestGame::started(config(2, |_| {}));
    let wolf = t.seat_of(RoleKind::Werewolf);
    let villager = t.seat_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(villager));
    t.wait_for(Phase::Day, 1).await;
    t.game.banish(wolf).unwrap();
    t.wait_for_game_over().await;

    assert_eq!(t.game.winner(), Some(Winner::Villagers));
    assert!(t.game.is_game_ended());
}

#[tokio::test]
async fn losing_every_special_role_hands_the_game_to_the_werewolves() {
    let t = TestGame::started(config(3, |c| c.seer_count = 1));
    let wolf = t.seat_of(RoleKind::Werewolf);
    let seer = t.seat_of(RoleKind::Seer);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(seer));
    t.wait_for(Phase::SeerTurn, 1).await;
    t.act(seer, ActionCode::Reveal, Some(wolf));
    t.wait_for_game_over().await;

    assert_eq!(t.game.winner(), Some(Winner::Werewolves));
    assert_eq!(t.game.status().alive_seats.len(), 4);
}

#[tokio::test]
async fn hunter_shot_can_end_the_day_and_the_game() {
    let mut t = TestGame::started(config(3, |c| c.hunter_count = 1));
    let wolf = t.seat_of(RoleKind::Werewolf);
    let hunter = t.seat_of(RoleKind::Hunter);
    let villager = t.seat_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(villager));
    t.wait_for(Phase::Day, 1).await;

    let fired = t.act(hunter, ActionCode::Fire, Some(wolf));
    assert!(fired.successful, "{fired:?}");
    assert_eq!(fired.message, format!("Fire succeeded! Seat {wolf} is dead"));
    t.wait_for_game_over().await;

    assert_eq!(t.game.winner(), Some(Winner::Villagers));
    assert_eq!(t.drain_cues().last(), Some(&Cue::GameOver));
    let err = t.game.banish(villager).unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongPhase);
}

#[tokio::test]
async fn hunter_killed_at_night_still_fires_by_day() {
    let t = TestGame::started(config(3, |c| {
        c.hunter_count = 1;
        c.idiot_count = 1;
    }));
    let wolf = t.seat_of(RoleKind::Werewolf);
    let hunter = t.seat_of(RoleKind::Hunter);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(hunter));
    t.wait_for(Phase::Day, 1).await;
    assert_eq!(t.game.last_night_summary().unwrap().died, vec![hunter]);

    assert!(t.act(hunter, ActionCode::Fire, Some(wolf)).successful);
    t.wait_for_game_over().await;
    assert_eq!(t.game.winner(), Some(Winner::Villagers));
}

#[tokio::test]
async fn hunter_fires_once_and_never_at_itself() {
    let t = TestGame::started(config(3, |c| c.hunter_count = 1));
    let wolf = t.seat_of(RoleKind::Werewolf);
    let hunter = t.seat_of(RoleKind::Hunter);
    let villagers = t.seats_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(villagers[0]));
    t.wait_for(Phase::Day, 1).await;

    let own = t.act(hunter, ActionCode::Fire, Some(hunter));
    assert_eq!(own.rejection, Some(Rejection::InvalidTarget));

    assert!(t.act(hunter, ActionCode::Fire, Some(villagers[1])).successful);
    let again = t.act(hunter, ActionCode::Fire, Some(villagers[2]));
    assert_eq!(again.rejection, Some(Rejection::AbilityAlreadyUsed));
    assert_eq!(t.game.phase(), Phase::Day);
}

#[tokio::test]
async fn poisoned_hunter_cannot_fire() {
    let t = TestGame::started(config(3, |c| {
        c.hunter_count = 1;
        c.witch_count = 1;
    }));
    let wolf = t.seat_of(RoleKind::Werewolf);
    let witch = t.seat_of(RoleKind::Witch);
    let hunter = t.seat_of(RoleKind::Hunter);
    let villager = t.seat_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(villager));
    t.wait_for(Phase::WitchTurn, 1).await;
    assert!(t.act(witch, ActionCode::Poison, Some(hunter)).successful);
    t.wait_for(Phase::Day, 1).await;

    let blocked = t.act(hunter, ActionCode::Fire, Some(wolf));
    assert_eq!(blocked.rejection, Some(Rejection::AbilityBlocked));
    assert_eq!(blocked.message, "You're poisoned!");
    assert!(t.game.status().alive_seats.contains(&wolf));
}

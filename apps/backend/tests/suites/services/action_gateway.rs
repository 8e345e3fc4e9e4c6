use std::sync::Arc;

use werewolf_backend::domain::capability::Rejection;
use werewolf_backend::domain::game_config::GameConfig;
use werewolf_backend::domain::phase::Phase;
use werewolf_backend::domain::roles::{ActionCode, RoleKind};
use werewolf_backend::errors::ErrorCode;

use crate::support::game_setup::{classic_config, secret_for, TestGame};

#[tokio::test]
async fn actions_before_initialize_are_refused() {
    let t = TestGame::new();
    let err = t
        .game
        .handle_action(0, "pw", ActionCode::GetActions, None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInitialized);
}

#[tokio::test]
async fn transport_problems_are_errors() {
    let t = TestGame::new();
    t.initialize_and_register(classic_config());

    let err = t
        .game
        .handle_action(9, "pw", ActionCode::GetActions, None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidSeat);

    let err = t
        .game
        .handle_action(0, "wrong", ActionCode::GetActions, None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongSecret);

    let err = t
        .game
        .handle_action(0, &secret_for(0), ActionCode::Kill, Some(42))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidTarget);
}

#[tokio::test]
async fn acting_before_the_game_starts_is_not_your_turn() {
    let t = TestGame::new();
    t.initialize_and_register(classic_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    let victim = t.seat_of(RoleKind::Villager);

    let outcome = t.act(wolf, ActionCode::Kill, Some(victim));
    assert!(!outcome.successful);
    assert_eq!(outcome.rejection, Some(Rejection::NotYourTurn));
    assert_eq!(outcome.message, "Not your turn!");
}

#[tokio::test]
async fn villagers_have_no_skills() {
    let t = TestGame::started(classic_config());
    let villager = t.seat_of(RoleKind::Villager);
    t.wait_for(Phase::WerewolfTurn, 1).await;

    let offer = t.act(villager, ActionCode::GetActions, None);
    assert!(!offer.successful);
    assert!(offer.action_codes.is_empty());

    let outcome = t.act(villager, ActionCode::Kill, Some(0));
    assert_eq!(outcome.rejection, Some(Rejection::ActionNotPermitted));
    assert_eq!(outcome.message, "You're not able to use this skill!");
}

#[tokio::test]
async fn werewolf_sees_its_skill_on_its_turn_only() {
    let t = TestGame::started(classic_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    let seer = t.seat_of(RoleKind::Seer);
    t.wait_for(Phase::WerewolfTurn, 1).await;

    let offer = t.act(wolf, ActionCode::GetActions, None);
    assert!(offer.successful);
    assert_eq!(offer.action_codes, vec![ActionCode::Kill]);
    assert_eq!(offer.action_names, vec!["Kill"]);

    let early = t.act(seer, ActionCode::Reveal, Some(wolf));
    assert_eq!(early.rejection, Some(Rejection::NotYourTurn));
}

#[tokio::test]
async fn kill_on_a_dead_seat_is_refused_without_consuming_the_turn() {
    let t = TestGame::started(classic_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    let witch = t.seat_of(RoleKind::Witch);
    let seer = t.seat_of(RoleKind::Seer);
    let villagers = t.seats_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(villagers[0]));
    t.wait_for(Phase::WitchTurn, 1).await;
    t.act(witch, ActionCode::Abstain, None);
    t.wait_for(Phase::SeerTurn, 1).await;
    t.act(seer, ActionCode::Reveal, Some(wolf));
    t.wait_for(Phase::Day, 1).await;
    t.game.banish(villagers[1]).unwrap();

    t.wait_for(Phase::WerewolfTurn, 2).await;
    let outcome = t.act(wolf, ActionCode::Kill, Some(villagers[0]));
    assert_eq!(outcome.rejection, Some(Rejection::TargetAlreadyDead));
    assert_eq!(outcome.message, "Target is already dead!");

    // The turn is still open for a valid choice.
    assert!(t.act(wolf, ActionCode::Kill, Some(villagers[2])).successful);
}

#[tokio::test]
async fn concurrent_kills_have_exactly_one_winner() {
    let t = TestGame::started(GameConfig {
        villager_count: 4,
        werewolf_count: 2,
        seer_count: 1,
        seed: Some(5),
        ..GameConfig::default()
    });
    let wolves = t.seats_of(RoleKind::Werewolf);
    let villagers = t.seats_of(RoleKind::Villager);
    t.wait_for(Phase::WerewolfTurn, 1).await;

    let handles: Vec<_> = wolves
        .iter()
        .zip(&villagers)
        .map(|(&wolf, &victim)| {
            let game = Arc::clone(&t.game);
            tokio::spawn(async move {
                game.handle_action(wolf, &secret_for(wolf), ActionCode::Kill, Some(victim))
                    .unwrap()
            })
        })
        .collect();

    let mut winners = 0;
    let mut refused = 0;
    for handle in handles {
        let outcome = handle.await.unwrap();
        if outcome.successful {
            winners += 1;
        } else {
            assert_eq!(outcome.rejection, Some(Rejection::NotYourTurn));
            refused += 1;
        }
    }
    assert_eq!((winners, refused), (1, 1));
}

#[tokio::test]
async fn second_kill_after_the_first_is_not_your_turn() {
    let t = TestGame::started(classic_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    let villagers = t.seats_of(RoleKind::Villager);
    t.wait_for(Phase::WerewolfTurn, 1).await;

    assert!(t.act(wolf, ActionCode::Kill, Some(villagers[0])).successful);
    // Whether or not the sequencer has moved on yet, the slot is spent.
    let again = t.act(wolf, ActionCode::Kill, Some(villagers[1]));
    assert_eq!(again.rejection, Some(Rejection::NotYourTurn));
}

#[tokio::test]
async fn witch_without_a_kill_candidate_cannot_save() {
    let t = TestGame::started(classic_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    let witch = t.seat_of(RoleKind::Witch);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    let outcome = t.act(witch, ActionCode::Save, None);
    assert_eq!(outcome.rejection, Some(Rejection::NotYourTurn));

    t.act(wolf, ActionCode::Kill, Some(t.seat_of(RoleKind::Seer)));
    t.wait_for(Phase::WitchTurn, 1).await;
    assert!(t.act(witch, ActionCode::Save, None).successful);
}

#[tokio::test]
async fn banish_outside_the_day_changes_nothing() {
    let t = TestGame::started(classic_config());
    t.wait_for(Phase::WerewolfTurn, 1).await;
    let before = t.game.status();

    let err = t.game.banish(0).unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongPhase);
    assert_eq!(t.game.status().alive_seats, before.alive_seats);

    let err = t.game.last_night_summary().unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongPhase);
}

#[tokio::test]
async fn banishing_a_dead_seat_keeps_the_day_open() {
    let t = TestGame::started(classic_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    let witch = t.seat_of(RoleKind::Witch);
    let seer = t.seat_of(RoleKind::Seer);
    let villagers = t.seats_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    t.act(wolf, ActionCode::Kill, Some(villagers[0]));
    t.wait_for(Phase::WitchTurn, 1).await;
    t.act(witch, ActionCode::Abstain, None);
    t.wait_for(Phase::SeerTurn, 1).await;
    t.act(seer, ActionCode::Reveal, Some(wolf));
    t.wait_for(Phase::Day, 1).await;

    let err = t.game.banish(villagers[0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::TargetAlreadyDead);
    let err = t.game.banish(99).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidSeat);
    assert_eq!(t.game.phase(), Phase::Day);

    t.game.banish(villagers[1]).unwrap();
    t.wait_for(Phase::WerewolfTurn, 2).await;
}

#[tokio::test]
async fn every_night_decision_reaches_the_sequencer_through_the_gateway() {
    let t = TestGame::started(GameConfig {
        villager_count: 3,
        werewolf_count: 1,
        guard_count: 1,
        witch_count: 1,
        seer_count: 1,
        seed: Some(13),
        ..GameConfig::default()
    });
    let wolf = t.seat_of(RoleKind::Werewolf);
    let guard = t.seat_of(RoleKind::Guard);
    let witch = t.seat_of(RoleKind::Witch);
    let seer = t.seat_of(RoleKind::Seer);
    let villagers = t.seats_of(RoleKind::Villager);

    t.wait_for(Phase::WerewolfTurn, 1).await;
    let kill = t.act(wolf, ActionCode::Kill, Some(villagers[0]));
    assert_eq!(kill.message, format!("Kill submitted on seat {}", villagers[0]));

    t.wait_for(Phase::GuardTurn, 1).await;
    let protect = t.act(guard, ActionCode::Protect, Some(villagers[1]));
    assert!(protect.successful);
    assert_eq!(
        protect.message,
        format!("Guard succeeded! Seat {} is protected", villagers[1])
    );
    let again = t.act(guard, ActionCode::Abstain, None);
    assert_eq!(again.rejection, Some(Rejection::NotYourTurn));

    t.wait_for(Phase::WitchTurn, 1).await;
    let poison = t.act(witch, ActionCode::Poison, Some(villagers[2]));
    assert!(poison.successful);
    assert_eq!(
        poison.message,
        format!("Successfully poisoned seat {}!", villagers[2])
    );
    let again = t.act(witch, ActionCode::Save, None);
    assert_eq!(again.rejection, Some(Rejection::NotYourTurn));

    t.wait_for(Phase::SeerTurn, 1).await;
    let reveal = t.act(seer, ActionCode::Reveal, Some(wolf));
    assert!(reveal.successful);
    assert_eq!(
        reveal.message,
        format!("Seat {wolf} (player-{wolf}) is a werewolf")
    );
    let again = t.act(seer, ActionCode::Reveal, Some(villagers[1]));
    assert_eq!(again.rejection, Some(Rejection::NotYourTurn));

    t.wait_for(Phase::Day, 1).await;
    let mut died = t.game.last_night_summary().unwrap().died;
    died.sort();
    let mut expected = vec![villagers[0], villagers[2]];
    expected.sort();
    assert_eq!(died, expected);
}

#[tokio::test]
async fn listing_actions_ignores_a_stray_target() {
    let t = TestGame::started(classic_config());
    let wolf = t.seat_of(RoleKind::Werewolf);
    t.wait_for(Phase::WerewolfTurn, 1).await;

    let offer = t.act(wolf, ActionCode::GetActions, Some(999));
    assert!(offer.successful);
    assert_eq!(offer.action_codes, vec![ActionCode::Kill]);

    let err = t
        .game
        .handle_action(wolf, &secret_for(wolf), ActionCode::Kill, Some(999))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidTarget);
}

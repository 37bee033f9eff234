mod common;

use common::{actor, current, group_for, group_with_enemy, load, memory_state, play_round, started};
use contaminados::domain::state::{Faction, GameStatus, RoundResult, RoundStatus};

#[tokio::test]
async fn citizens_win_three_clean_rounds() {
    let state = memory_state();
    let (game_id, players) = started(&state, 5).await;

    for _ in 0..3 {
        let game = load(&state, game_id).await;
        play_round(&state, game_id, group_for(&game), true).await;
    }

    let game = load(&state, game_id).await;
    assert_eq!(game.status, GameStatus::Ended);
    assert_eq!(game.winner, Some(Faction::Citizens));
    assert!(game.current_round.is_none());
    assert_eq!(game.round_history.len(), 3);
    assert!(game
        .round_history
        .iter()
        .all(|r| r.status == RoundStatus::Ended && r.result == RoundResult::Citizens));

    let view = state
        .games()
        .get_game(game_id, &actor(&players[1]))
        .await
        .unwrap()
        .0;
    assert_eq!(view.score.citizens, 3);
    assert_eq!(view.winner, Some(Faction::Citizens));
}

#[tokio::test]
async fn enemies_win_by_sabotage() {
    let state = memory_state();
    let (game_id, _) = started(&state, 6).await;

    for round in 1..=3 {
        let game = load(&state, game_id).await;
        play_round(&state, game_id, group_with_enemy(&game), false).await;

        let game = load(&state, game_id).await;
        assert_eq!(game.round_history.len(), round);
        assert_eq!(game.round_history[round - 1].result, RoundResult::Enemies);
    }

    let game = load(&state, game_id).await;
    assert_eq!(game.status, GameStatus::Ended);
    assert_eq!(game.winner, Some(Faction::Enemies));
}

#[tokio::test]
async fn rounds_alternate_until_a_faction_has_three() {
    let state = memory_state();
    let (game_id, _) = started(&state, 7).await;

    // citizens, enemies, citizens, enemies, citizens
    for round in 0..5 {
        let game = load(&state, game_id).await;
        assert_eq!(game.status, GameStatus::Rounds);
        if round % 2 == 0 {
            play_round(&state, game_id, group_for(&game), true).await;
        } else {
            play_round(&state, game_id, group_with_enemy(&game), false).await;
        }
    }

    let game = load(&state, game_id).await;
    assert_eq!(game.round_history.len(), 5);
    assert_eq!(game.winner, Some(Faction::Citizens));
    let numbers: Vec<u8> = game.round_history.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn new_round_gets_a_new_leader() {
    let state = memory_state();
    let (game_id, _) = started(&state, 5).await;

    let game = load(&state, game_id).await;
    let (first_round, first_leader) = current(&game);
    play_round(&state, game_id, group_for(&game), true).await;

    let game = load(&state, game_id).await;
    let (second_round, second_leader) = current(&game);
    assert_ne!(first_round, second_round);
    assert_ne!(first_leader, second_leader);
    assert_eq!(game.current_round.as_ref().unwrap().number, 2);
}

#[tokio::test]
async fn start_assigns_roles_by_table() {
    let state = memory_state();
    for (count, enemies) in [(5, 2), (6, 2), (7, 3), (8, 3), (9, 3), (10, 4)] {
        let (game_id, players) = started(&state, count).await;
        let game = load(&state, game_id).await;
        assert_eq!(game.enemies.len(), enemies, "{count} players");
        assert!(game.enemies.iter().all(|e| players.contains(e)));

        let round = game.current_round.as_ref().unwrap();
        assert_eq!(round.number, 1);
        assert_eq!(round.status, RoundStatus::WaitingOnLeader);
        assert!(players.contains(&round.leader));
    }
}

#[tokio::test]
async fn enemies_are_only_visible_to_enemies() {
    let state = memory_state();
    let (game_id, players) = started(&state, 5).await;
    let game = load(&state, game_id).await;

    for player in &players {
        let (view, _) = state.games().get_game(game_id, &actor(player)).await.unwrap();
        if game.is_enemy(player) {
            assert_eq!(view.enemies, game.enemies);
        } else {
            assert!(view.enemies.is_empty());
        }
    }
}

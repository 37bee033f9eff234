#![allow(dead_code)]

// tests/common/mod.rs
use contaminados::domain::rules::group_size_for_round;
use contaminados::domain::state::Game;
use contaminados::{Actor, AppState};
use contaminados_test_support::unique_helpers::{unique_name, unique_players};
use uuid::Uuid;

// Logging is auto-installed for every test binary that pulls in `common`.
#[ctor::ctor]
fn init_logging() {
    contaminados_test_support::logging::init();
}

/// Initialize the production routes behind `RequestTrace` over `$state`.
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(contaminados::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(contaminados::routes::configure),
        )
        .await
    };
}

pub const SEED: u64 = 0xC0FFEE;

pub fn memory_state() -> AppState {
    AppState::in_memory(SEED)
}

pub fn actor(player: &str) -> Actor {
    Actor::new(player, None).expect("valid player name")
}

pub fn actor_with(player: &str, password: &str) -> Actor {
    Actor::new(player, Some(password)).expect("valid player name")
}

/// Lobby with `count` players; the first name is the owner.
pub async fn lobby(state: &AppState, count: usize) -> (Uuid, Vec<String>) {
    let players = unique_players(count);
    let view = state
        .games()
        .create_game(&unique_name("night"), &players[0], None)
        .await
        .expect("create game");
    for player in &players[1..] {
        state
            .game_flow()
            .join_game(view.id, &actor(player), None)
            .await
            .expect("join game");
    }
    (view.id, players)
}

/// Started game with `count` players.
pub async fn started(state: &AppState, count: usize) -> (Uuid, Vec<String>) {
    let (game_id, players) = lobby(state, count).await;
    state
        .game_flow()
        .start_game(game_id, &actor(&players[0]))
        .await
        .expect("start game");
    (game_id, players)
}

pub async fn load(state: &AppState, game_id: Uuid) -> Game {
    state
        .store()
        .load(game_id)
        .await
        .expect("load game")
        .expect("game exists")
}

/// Active round id and leader.
pub fn current(game: &Game) -> (Uuid, String) {
    let round = game.current_round.as_ref().expect("active round");
    (round.id, round.leader.clone())
}

/// Correctly sized group: leader first, then seat order.
pub fn group_for(game: &Game) -> Vec<String> {
    let (_, leader) = current(game);
    let size = group_size_for_round(game.round_history.len(), game.players.len())
        .expect("supported player count");
    let mut group = vec![leader.clone()];
    group.extend(
        game.players
            .iter()
            .filter(|p| **p != leader)
            .cloned(),
    );
    group.truncate(size);
    group
}

/// Group with at least one enemy in it.
pub fn group_with_enemy(game: &Game) -> Vec<String> {
    let mut group = group_for(game);
    if !group.iter().any(|p| game.is_enemy(p)) {
        let enemy = game.enemies[0].clone();
        let last = group.len() - 1;
        group[last] = enemy;
    }
    group
}

/// Propose `group`, have everyone vote `approve`.
pub async fn propose_and_vote(
    state: &AppState,
    game_id: Uuid,
    group: Vec<String>,
    approve: bool,
) {
    let game = load(state, game_id).await;
    let (round_id, leader) = current(&game);
    let flow = state.game_flow();
    flow.propose_group(game_id, round_id, &actor(&leader), group)
        .await
        .expect("propose group");
    for player in &game.players {
        flow.submit_vote(game_id, round_id, &actor(player), approve)
            .await
            .expect("vote");
    }
}

/// Play one approved round; enemies in the group act `enemy_action`.
pub async fn play_round(state: &AppState, game_id: Uuid, group: Vec<String>, enemy_action: bool) {
    propose_and_vote(state, game_id, group.clone(), true).await;
    let game = load(state, game_id).await;
    let (round_id, _) = current(&game);
    for member in &group {
        let action = if game.is_enemy(member) { enemy_action } else { true };
        state
            .game_flow()
            .submit_action(game_id, round_id, &actor(member), action)
            .await
            .expect("action");
    }
}

//! Property tests driving whole games through the round machine.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::outcome::{score, winner};
use crate::domain::roles::assign_enemies;
use crate::domain::round_machine::{propose_group, submit_action};
use crate::domain::rules::{enemy_count, WINS_TO_END};
use crate::domain::state::{check_invariants, GameStatus, RoundStatus};
use crate::domain::test_gens::{ballots, player_count, round_script};
use crate::domain::test_state_helpers::{
    current, group_for_round, lobby_with, now, started_with, vote_all,
};
use crate::domain::voting::{tally, VoteOutcome};

proptest! {
    #[test]
    fn enemies_match_table(n in player_count(), seed in any::<u64>()) {
        let game = lobby_with(n);
        let enemies = assign_enemies(&game.players, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(Some(enemies.len()), enemy_count(n));
        prop_assert!(enemies.iter().all(|e| game.players.contains(e)));
    }

    #[test]
    fn tally_is_strict_majority(n in player_count(), votes in ballots(10)) {
        let votes: std::collections::BTreeMap<String, bool> = votes
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, v)| (format!("p{i}"), v))
            .collect();
        let yes = votes.values().filter(|v| **v).count();
        let expected = if yes * 2 > n { VoteOutcome::Approved } else { VoteOutcome::Rejected };
        prop_assert_eq!(tally(&votes, n), expected);
    }

    #[test]
    fn scripted_games_keep_invariants(
        n in player_count(),
        seed in any::<u64>(),
        scripts in prop::collection::vec(round_script(), 5),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = started_with(n, &mut rng);

        for script in scripts {
            if game.status == GameStatus::Ended {
                break;
            }
            let frozen = game.round_history.clone();
            let (id, leader) = current(&game);

            for _ in 0..script.rejections {
                let group = group_for_round(&game);
                propose_group(&mut game, id, &leader, group, now()).unwrap();
                vote_all(&mut game, &vec![false; n], &mut rng);
            }
            if script.rejections < 3 {
                let group = group_for_round(&game);
                propose_group(&mut game, id, &leader, group.clone(), now()).unwrap();
                vote_all(&mut game, &vec![true; n], &mut rng);
                prop_assert_eq!(
                    game.current_round.as_ref().unwrap().status,
                    RoundStatus::WaitingOnGroup
                );
                for (member, action) in group.iter().zip(script.actions.iter().cycle()) {
                    submit_action(&mut game, id, member, *action, &mut rng, now()).unwrap();
                }
            }

            // History is append-only.
            prop_assert_eq!(&game.round_history[..frozen.len()], &frozen[..]);
            prop_assert_eq!(game.round_history.len(), frozen.len() + 1);
            check_invariants(&game).unwrap();
        }

        let s = score(&game.round_history);
        let decided = s.citizens >= WINS_TO_END || s.enemies >= WINS_TO_END;
        prop_assert_eq!(game.status == GameStatus::Ended, decided);
        prop_assert_eq!(game.winner, winner(&game.round_history));
        if decided {
            prop_assert!(game.current_round.is_none());
        }
    }
}

//! Round state machine: proposals, ballots, actions and round turnover.
//!
//! Every function here is pure over `&mut Game`. Callers apply it to a
//! loaded copy and commit the result through the store's conditional
//! update, so a transition never observes a half-written round.

use std::collections::BTreeSet;

use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::actions;
use crate::domain::game_transition::GameTransition;
use crate::domain::leader::next_leader;
use crate::domain::outcome;
use crate::domain::rules::group_size_for_round;
use crate::domain::state::{Game, GameStatus, Round, RoundResult, RoundStatus, VotePhase};
use crate::domain::voting::{self, Escalation, VoteOutcome};
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, PreconditionKind,
    ValidationKind,
};

fn require_member(game: &Game, actor: &str) -> Result<(), DomainError> {
    if game.is_player(actor) {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::NotAMember,
            format!("{actor} is not part of this game"),
        ))
    }
}

/// The active round, if `round_id` names it.
///
/// A finished round is a phase error; an unknown id is not found.
fn active_round_mut(game: &mut Game, round_id: Uuid) -> Result<&mut Round, DomainError> {
    let is_current = game
        .current_round
        .as_ref()
        .is_some_and(|r| r.id == round_id);
    if !is_current {
        if game.round_history.iter().any(|r| r.id == round_id) {
            return Err(DomainError::wrong_phase("Round already ended"));
        }
        return Err(DomainError::not_found(
            NotFoundKind::Round,
            format!("Round {round_id} not found"),
        ));
    }
    if game.status != GameStatus::Rounds {
        return Err(DomainError::wrong_phase("Game is not in rounds"));
    }
    game.current_round
        .as_mut()
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Round, "no active round"))
}

fn require_status(round: &Round, expected: RoundStatus) -> Result<(), DomainError> {
    if round.status == expected {
        Ok(())
    } else {
        Err(DomainError::wrong_phase(format!(
            "Round is {}, expected {}",
            round.status.as_str(),
            expected.as_str()
        )))
    }
}

/// The leader puts `group` to the vote.
pub fn propose_group(
    game: &mut Game,
    round_id: Uuid,
    actor: &str,
    group: Vec<String>,
    now: OffsetDateTime,
) -> Result<Vec<GameTransition>, DomainError> {
    if group.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyGroup,
            "Group cannot be empty",
        ));
    }
    require_member(game, actor)?;

    let players = game.players.clone();
    let required = group_size_for_round(game.round_history.len(), players.len());
    let round = active_round_mut(game, round_id)?;

    if round.leader != actor {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotLeader,
            "Only the round leader can propose a group",
        ));
    }
    require_status(round, RoundStatus::WaitingOnLeader)?;

    let mut seen = BTreeSet::new();
    for member in &group {
        if !players.contains(member) {
            return Err(DomainError::validation(
                ValidationKind::InvalidGroup,
                format!("{member} is not part of this game"),
            ));
        }
        if !seen.insert(member.as_str()) {
            return Err(DomainError::validation(
                ValidationKind::InvalidGroup,
                format!("{member} appears twice in the group"),
            ));
        }
    }
    let required = required.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("no group size for {} players", players.len()),
        )
    })?;
    if group.len() != required {
        return Err(DomainError::precondition(
            PreconditionKind::GroupSize,
            format!("Group must have {required} players, got {}", group.len()),
        ));
    }

    round.group = group.clone();
    round.votes.clear();
    round.status = RoundStatus::Voting;
    round.updated_at = now;
    Ok(vec![GameTransition::GroupProposed { round_id, group }])
}

/// Record `actor`'s ballot; the last ballot decides the attempt.
pub fn cast_vote<R: Rng + ?Sized>(
    game: &mut Game,
    round_id: Uuid,
    actor: &str,
    vote: bool,
    rng: &mut R,
    now: OffsetDateTime,
) -> Result<Vec<GameTransition>, DomainError> {
    require_member(game, actor)?;
    let electorate = game.players.len();
    let round = active_round_mut(game, round_id)?;
    require_status(round, RoundStatus::Voting)?;

    if round.votes.contains_key(actor) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyVoted,
            format!("{actor} already voted in {}", round.phase.as_str()),
        ));
    }
    round.votes.insert(actor.to_string(), vote);
    round.updated_at = now;

    let mut transitions = vec![GameTransition::VoteRecorded {
        round_id,
        player: actor.to_string(),
    }];

    match voting::tally(&round.votes, electorate) {
        VoteOutcome::Pending { .. } => {}
        VoteOutcome::Approved => {
            round.status = RoundStatus::WaitingOnGroup;
            round.votes.clear();
            round.rejection_count = 0;
            round.phase = VotePhase::Vote1;
            transitions.push(GameTransition::GroupApproved { round_id });
        }
        VoteOutcome::Rejected => match voting::escalate(round.rejection_count) {
            Escalation::Retry { phase, rejections } => {
                round.status = RoundStatus::WaitingOnLeader;
                round.phase = phase;
                round.rejection_count = rejections;
                round.group.clear();
                round.votes.clear();
                transitions.push(GameTransition::GroupRejected {
                    round_id,
                    rejections,
                });
            }
            Escalation::Forfeit => {
                round.group.clear();
                round.votes.clear();
                round.rejection_count = 0;
                round.phase = VotePhase::Vote1;
                round.result = RoundResult::Enemies;
                transitions.push(GameTransition::RoundForfeited { round_id });
                transitions.extend(close_round(game, rng, now)?);
            }
        },
    }
    Ok(transitions)
}

/// Record a group member's action; the last one resolves the round.
pub fn submit_action<R: Rng + ?Sized>(
    game: &mut Game,
    round_id: Uuid,
    actor: &str,
    action: bool,
    rng: &mut R,
    now: OffsetDateTime,
) -> Result<Vec<GameTransition>, DomainError> {
    require_member(game, actor)?;
    let round = active_round_mut(game, round_id)?;

    if !round.group.iter().any(|m| m == actor) {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotInGroup,
            format!("{actor} is not in the group"),
        ));
    }
    require_status(round, RoundStatus::WaitingOnGroup)?;
    if round.actions.contains_key(actor) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyActed,
            format!("{actor} already acted this round"),
        ));
    }
    round.actions.insert(actor.to_string(), action);
    round.updated_at = now;

    let mut transitions = vec![GameTransition::ActionRecorded {
        round_id,
        player: actor.to_string(),
    }];

    if let Some(result) = actions::resolve(round.actions.values().copied(), round.group.len()) {
        round.result = result;
        transitions.extend(close_round(game, rng, now)?);
    }
    Ok(transitions)
}

/// Freeze the active round into history and either open the next one or
/// end the game.
fn close_round<R: Rng + ?Sized>(
    game: &mut Game,
    rng: &mut R,
    now: OffsetDateTime,
) -> Result<Vec<GameTransition>, DomainError> {
    let mut round = game
        .current_round
        .take()
        .ok_or_else(|| DomainError::infra(InfraErrorKind::DataCorruption, "no round to close"))?;
    round.status = RoundStatus::Ended;
    round.phase = VotePhase::Vote1;
    round.updated_at = now;

    let transitions = vec![GameTransition::RoundResolved {
        round_id: round.id,
        result: round.result,
    }];
    let previous_leader = round.leader.clone();
    game.round_history.push(round);
    game.updated_at = now;

    if let Some(winner) = outcome::winner(&game.round_history) {
        game.status = GameStatus::Ended;
        game.winner = Some(winner);
        return Ok(transitions);
    }

    let leader = next_leader(&game.players, &previous_leader, rng).ok_or_else(|| {
        DomainError::infra(InfraErrorKind::DataCorruption, "game has no players")
    })?;
    let number = u8::try_from(game.round_history.len() + 1).map_err(|_| {
        DomainError::infra(InfraErrorKind::DataCorruption, "round number overflow")
    })?;
    game.current_round = Some(Round::open(number, leader, now));
    Ok(transitions)
}

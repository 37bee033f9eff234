use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 10;
/// Round wins a faction needs to take the game.
pub const WINS_TO_END: usize = 3;
/// Best-of-five: someone reaches three wins by round five at the latest.
pub const MAX_ROUNDS: usize = 5;
/// Consecutive rejected proposals that forfeit the round to the enemies.
pub const MAX_REJECTIONS: u8 = 3;

/// Accepted length for names, owners, players and passwords (after trimming).
pub const NAME_LEN: RangeInclusive<usize> = 3..=20;

// Group sizes, indexed by [round_index - 1][player_count - MIN_PLAYERS].
//                          5  6  7  8  9  10
const GROUP_SIZES: [[u8; 6]; MAX_ROUNDS] = [
    [2, 2, 2, 3, 3, 3],
    [3, 3, 3, 4, 4, 4],
    [2, 4, 3, 4, 4, 4],
    [3, 3, 4, 5, 5, 5],
    [3, 4, 4, 5, 5, 5],
];

/// Number of enemies for a table of `player_count`.
pub fn enemy_count(player_count: usize) -> Option<usize> {
    match player_count {
        5 | 6 => Some(2),
        7..=9 => Some(3),
        10 => Some(4),
        _ => None,
    }
}

/// Required group size for the round after `completed_rounds` finished rounds.
///
/// The round index is capped at 5. Returns `None` outside the 5..=10 player range.
pub fn group_size_for_round(completed_rounds: usize, player_count: usize) -> Option<usize> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return None;
    }
    let round_index = (completed_rounds + 1).min(MAX_ROUNDS);
    let row = GROUP_SIZES.get(round_index - 1)?;
    row.get(player_count - MIN_PLAYERS).map(|&size| size as usize)
}

/// Whether `raw` (already trimmed) has an acceptable length.
pub fn valid_name_len(raw: &str) -> bool {
    NAME_LEN.contains(&raw.chars().count())
}

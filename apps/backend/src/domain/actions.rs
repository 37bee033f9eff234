//! Group action resolution.

use crate::domain::state::RoundResult;

/// Outcome of the submitted actions, or `None` while some are missing.
///
/// A single sabotage hands the round to the enemies. Otherwise the citizens
/// need at least two collaborations; a one-member group that collaborates
/// leaves the round without a winner.
pub fn resolve<I>(actions: I, group_size: usize) -> Option<RoundResult>
where
    I: IntoIterator<Item = bool>,
{
    let (submitted, collaborations) = actions
        .into_iter()
        .fold((0usize, 0usize), |(n, yes), a| (n + 1, yes + usize::from(a)));

    if submitted < group_size {
        return None;
    }
    Some(if collaborations < submitted {
        RoundResult::Enemies
    } else if collaborations >= 2 {
        RoundResult::Citizens
    } else {
        RoundResult::None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_every_member() {
        assert_eq!(resolve([true, true], 3), None);
        assert_eq!(resolve([false], 3), None);
        assert_eq!(resolve([false, true], 3), None);
    }

    #[test]
    fn any_sabotage_loses() {
        assert_eq!(resolve([true, false, true], 3), Some(RoundResult::Enemies));
        assert_eq!(resolve([false, false], 2), Some(RoundResult::Enemies));
    }

    #[test]
    fn two_collaborations_win() {
        assert_eq!(resolve([true, true], 2), Some(RoundResult::Citizens));
        assert_eq!(resolve([true; 5], 5), Some(RoundResult::Citizens));
    }

    #[test]
    fn lone_collaboration_has_no_winner() {
        assert_eq!(resolve([true], 1), Some(RoundResult::None));
    }
}

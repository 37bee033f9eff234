//! Game winner evaluation over finished rounds.

use serde::Serialize;

use crate::domain::rules::WINS_TO_END;
use crate::domain::state::{Faction, Round, RoundResult};

/// Round wins per faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub citizens: usize,
    pub enemies: usize,
}

pub fn score<'a>(rounds: impl IntoIterator<Item = &'a Round>) -> Score {
    rounds
        .into_iter()
        .fold(Score::default(), |mut s, r| {
            match r.result {
                RoundResult::Citizens => s.citizens += 1,
                RoundResult::Enemies => s.enemies += 1,
                RoundResult::None => {}
            }
            s
        })
}

/// The faction that reached three round wins, if any.
pub fn winner(history: &[Round]) -> Option<Faction> {
    let s = score(history);
    if s.citizens >= WINS_TO_END {
        Some(Faction::Citizens)
    } else if s.enemies >= WINS_TO_END {
        Some(Faction::Enemies)
    } else {
        None
    }
}

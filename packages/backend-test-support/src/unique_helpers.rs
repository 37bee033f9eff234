//! Test helpers for generating unique test data
//!
//! Game and player names must stay within 3..=20 characters, so these use a
//! short slice of a v4 uuid rather than the full value.

use uuid::Uuid;

/// A unique name in the format `{prefix}-{8 hex chars}`.
///
/// Keep `prefix` at 11 characters or fewer to stay within name limits.
///
/// ```
/// use contaminados_test_support::unique_helpers::unique_name;
///
/// let a = unique_name("game");
/// let b = unique_name("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// assert!(a.len() <= 20);
/// ```
pub fn unique_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &id[..8])
}

/// `count` distinct player names sharing one unique suffix.
pub fn unique_players(count: usize) -> Vec<String> {
    let id = Uuid::new_v4().simple().to_string();
    (0..count).map(|i| format!("p{i}-{}", &id[..8])).collect()
}

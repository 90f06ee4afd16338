use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::model::{sort_ranked, LeaderboardEntry, NewScore, PuzzleType};

pub const DEFAULT_TOP_SCORES_LIMIT: usize = 10;

/// Ranks are only reported within this many top entries.
pub const USER_RANK_WINDOW: usize = 1000;

/// Returns up to `limit` entries in leaderboard order, optionally restricted to one puzzle type.
pub fn get_top_scores(
    catalog: &Catalog,
    puzzle_type: Option<PuzzleType>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut scores: Vec<LeaderboardEntry> = catalog
        .leaderboard
        .iter()
        .filter(|s| puzzle_type.is_none_or(|t| s.puzzle_type == t))
        .cloned()
        .collect();
    sort_ranked(&mut scores);
    scores.truncate(limit);
    scores
}

pub fn add_score(
    catalog: &mut Catalog,
    new_score: NewScore,
    id: String,
    now: DateTime<Utc>,
) -> LeaderboardEntry {
    let entry = new_score.into_entry(id, now);
    catalog.leaderboard.push(entry.clone());
    entry
}

/// Returns the 1-based rank of the player's best entry, or None if the player has no entry in the
/// top `USER_RANK_WINDOW`.
pub fn get_user_rank(
    catalog: &Catalog,
    player_name: &str,
    puzzle_type: Option<PuzzleType>,
) -> Option<usize> {
    get_top_scores(catalog, puzzle_type, USER_RANK_WINDOW)
        .iter()
        .position(|s| s.player_name == player_name)
        .map(|index| index + 1)
}

/// Returns every entry submitted by a player, in submission order.
pub fn get_scores_by_player(catalog: &Catalog, player_name: &str) -> Vec<LeaderboardEntry> {
    catalog
        .leaderboard
        .iter()
        .filter(|s| s.player_name == player_name)
        .cloned()
        .collect()
}

pub fn clear_scores(catalog: &mut Catalog) -> Vec<LeaderboardEntry> {
    catalog.leaderboard.clear();
    Vec::new()
}

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{
    compute_score, ChallengeScore, Completion, CompletionSummary, NewScore, LOCAL_PLAYER,
};
use crate::services::{daily, leaderboard, progress, puzzles};

/// Records a finished play of `puzzle_id` by the local player.
///
/// The completion goes into the progress history, a matching entry is added to the leaderboard,
/// and when the puzzle is the one set for today's challenge the score is also submitted there.
pub fn complete_puzzle<R: Rng>(
    catalog: &mut Catalog,
    puzzle_id: &str,
    elapsed_secs: u32,
    score_id: String,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<CompletionSummary, CatalogError> {
    let puzzle = puzzles::get_puzzle(catalog, puzzle_id)?;
    let score = compute_score(puzzle.difficulty, elapsed_secs);

    let progress = progress::record_completion(
        catalog,
        Completion {
            puzzle_id: puzzle.id.clone(),
            title: puzzle.title.clone(),
            puzzle_type: puzzle.puzzle_type,
            difficulty: puzzle.difficulty,
            completion_time: elapsed_secs,
            score,
            completed_at: now,
        },
    );

    leaderboard::add_score(
        catalog,
        NewScore {
            player_name: LOCAL_PLAYER.to_string(),
            puzzle_type: puzzle.puzzle_type,
            score,
            time: elapsed_secs,
        },
        score_id,
        now,
    );

    let today = now.date_naive();
    let daily_challenge = daily::todays_challenge(catalog, today, rng).puzzle_id == puzzle.id;
    if daily_challenge {
        daily::submit_daily_score(
            catalog,
            today,
            rng,
            ChallengeScore {
                player_name: LOCAL_PLAYER.to_string(),
                score,
                time: elapsed_secs,
            },
        );
    }

    Ok(CompletionSummary {
        score,
        rank: leaderboard::get_user_rank(catalog, LOCAL_PLAYER, Some(puzzle.puzzle_type)),
        daily_challenge,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PuzzleType;
    use crate::services::tests::with_catalog;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_complete_puzzle_records_everywhere() {
        with_catalog(|catalog| {
            let mut rng = StdRng::seed_from_u64(11);
            let scores_before = catalog.leaderboard.len();

            // puzzle-6 is the fixture challenge for 2026-10-18.
            let summary =
                complete_puzzle(catalog, "puzzle-6", 100, "score-x".into(), at(18, 9), &mut rng)
                    .unwrap();

            let puzzle = puzzles::get_puzzle(catalog, "puzzle-6").unwrap();
            assert_eq!(summary.score, compute_score(puzzle.difficulty, 100));
            assert!(summary.daily_challenge);
            assert_eq!(summary.progress.puzzles_completed, 4);
            assert_eq!(summary.progress.current_streak, 3);
            assert_eq!(catalog.leaderboard.len(), scores_before + 1);
            assert!(summary.rank.is_some());

            let challenge = daily::get_challenge(catalog, at(18, 0).date_naive()).unwrap();
            assert_eq!(challenge.participants, 402);
            assert!(challenge
                .top_scores
                .iter()
                .any(|s| s.player_name == LOCAL_PLAYER && s.score == summary.score));
        });
    }

    #[test]
    fn test_complete_puzzle_outside_daily_challenge() {
        with_catalog(|catalog| {
            let mut rng = StdRng::seed_from_u64(11);
            let summary =
                complete_puzzle(catalog, "puzzle-9", 290, "score-y".into(), at(18, 9), &mut rng)
                    .unwrap();
            assert!(!summary.daily_challenge);

            let challenge = daily::get_challenge(catalog, at(18, 0).date_naive()).unwrap();
            assert_eq!(challenge.participants, 401);

            let entry = catalog.leaderboard.last().unwrap();
            assert_eq!(entry.id, "score-y");
            assert_eq!(entry.player_name, LOCAL_PLAYER);
            assert_eq!(entry.puzzle_type, PuzzleType::Sudoku);
            assert_eq!(entry.time, 290);
        });
    }

    #[test]
    fn test_complete_unknown_puzzle_changes_nothing() {
        with_catalog(|catalog| {
            let before = catalog.clone();
            let mut rng = StdRng::seed_from_u64(11);
            let err =
                complete_puzzle(catalog, "puzzle-404", 30, "s".into(), at(19, 9), &mut rng)
                    .unwrap_err();
            assert!(err.is_not_found());
            assert_eq!(*catalog, before);
        });
    }
}

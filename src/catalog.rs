use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::model::{DailyChallenge, LeaderboardEntry, Puzzle, UserProgress};

const PUZZLES_FILE: &str = "puzzles.json";
const LEADERBOARD_FILE: &str = "leaderboard.json";
const DAILY_CHALLENGES_FILE: &str = "dailyChallenges.json";
const USER_PROGRESS_FILE: &str = "userProgress.json";

const PUZZLES_JSON: &str = include_str!("../fixtures/puzzles.json");
const LEADERBOARD_JSON: &str = include_str!("../fixtures/leaderboard.json");
const DAILY_CHALLENGES_JSON: &str = include_str!("../fixtures/dailyChallenges.json");
const USER_PROGRESS_JSON: &str = include_str!("../fixtures/userProgress.json");

/// All of the app's data, held in memory. Each field plays the part of a database table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub puzzles: Vec<Puzzle>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub daily_challenges: Vec<DailyChallenge>,
    pub progress: UserProgress,
}

impl Catalog {
    /// Builds a catalog from the fixtures compiled into the binary.
    pub fn from_fixtures() -> Result<Catalog, CatalogError> {
        Catalog {
            puzzles: parse_fixture(PUZZLES_FILE, PUZZLES_JSON)?,
            leaderboard: parse_fixture(LEADERBOARD_FILE, LEADERBOARD_JSON)?,
            daily_challenges: parse_fixture(DAILY_CHALLENGES_FILE, DAILY_CHALLENGES_JSON)?,
            progress: parse_fixture(USER_PROGRESS_FILE, USER_PROGRESS_JSON)?,
        }
        .validated()
    }

    /// Builds a catalog from the four fixture files found in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Catalog, CatalogError> {
        Catalog {
            puzzles: read_fixture(dir, PUZZLES_FILE)?,
            leaderboard: read_fixture(dir, LEADERBOARD_FILE)?,
            daily_challenges: read_fixture(dir, DAILY_CHALLENGES_FILE)?,
            progress: read_fixture(dir, USER_PROGRESS_FILE)?,
        }
        .validated()
    }

    // Daily challenges must arrive with at most `MAX_TOP_SCORES` entries in rank order, since
    // winners are judged by the first entry.
    fn validated(self) -> Result<Catalog, CatalogError> {
        if let Some((id, reason)) = self
            .daily_challenges
            .iter()
            .find_map(|c| c.top_scores_problem().map(|reason| (c.id.clone(), reason)))
        {
            return Err(CatalogError::InvalidChallenge { id, reason });
        }
        Ok(self)
    }
}

fn parse_fixture<T: DeserializeOwned>(name: &'static str, json: &str) -> Result<T, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Fixture { name, source })
}

fn read_fixture<T: DeserializeOwned>(dir: &Path, name: &'static str) -> Result<T, CatalogError> {
    let json =
        fs::read_to_string(dir.join(name)).map_err(|source| CatalogError::FixtureIo { name, source })?;
    parse_fixture(name, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChallengeScore, PuzzleType};
    use std::path::PathBuf;

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    #[test]
    fn test_from_fixtures() {
        let catalog = Catalog::from_fixtures().expect("Embedded fixtures must parse");
        assert_eq!(catalog.puzzles.len(), 12);
        assert!(!catalog.leaderboard.is_empty());
        assert_eq!(catalog.daily_challenges.len(), 3);
        assert_eq!(
            catalog.progress.puzzles_completed as usize,
            catalog.progress.completed_puzzles.len()
        );

        // Every type has at least one puzzle.
        for t in PuzzleType::ALL {
            assert!(catalog.puzzles.iter().any(|p| p.puzzle_type == t), "{}", t);
        }

        // Every challenge points at a puzzle that exists and respects the top score cap.
        for challenge in &catalog.daily_challenges {
            assert!(catalog.puzzles.iter().any(|p| p.id == challenge.puzzle_id));
            assert!(challenge.top_scores.len() <= crate::model::MAX_TOP_SCORES);
        }
    }

    #[test]
    fn test_load_dir_matches_embedded() {
        let from_dir = Catalog::load_dir(&fixtures_dir()).expect("Fixture dir must load");
        let embedded = Catalog::from_fixtures().unwrap();
        assert_eq!(from_dir, embedded);
    }

    #[test]
    fn test_load_dir_missing() {
        let err = Catalog::load_dir(Path::new("/nonexistent/puzzle-hub")).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::FixtureIo {
                name: PUZZLES_FILE,
                ..
            }
        ));
    }

    // Copies the fixtures into a scratch directory, replacing the daily challenges.
    fn fixture_dir_with_challenges(name: &str, challenges: &[DailyChallenge]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("puzzle-hub-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for file in [PUZZLES_FILE, LEADERBOARD_FILE, USER_PROGRESS_FILE] {
            fs::copy(fixtures_dir().join(file), dir.join(file)).unwrap();
        }
        fs::write(
            dir.join(DAILY_CHALLENGES_FILE),
            serde_json::to_string(challenges).unwrap(),
        )
        .unwrap();
        dir
    }

    fn challenge_with_scores(scores: impl IntoIterator<Item = u32>) -> DailyChallenge {
        DailyChallenge {
            id: "challenge-2026-10-19".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            puzzle_id: "puzzle-1".to_string(),
            participants: 50,
            top_scores: scores
                .into_iter()
                .map(|score| ChallengeScore {
                    player_name: format!("p{}", score),
                    score,
                    time: 60,
                })
                .collect(),
        }
    }

    #[test]
    fn test_load_dir_rejects_oversized_top_scores() {
        let dir = fixture_dir_with_challenges("oversized", &[challenge_with_scores((0..12).rev())]);
        let err = Catalog::load_dir(&dir).unwrap_err();
        fs::remove_dir_all(&dir).ok();
        assert!(matches!(
            err,
            CatalogError::InvalidChallenge { ref id, .. } if id == "challenge-2026-10-19"
        ));
    }

    #[test]
    fn test_load_dir_rejects_unsorted_top_scores() {
        let dir = fixture_dir_with_challenges("unsorted", &[challenge_with_scores(0..3)]);
        let err = Catalog::load_dir(&dir).unwrap_err();
        fs::remove_dir_all(&dir).ok();
        assert!(err.to_string().contains("not in rank order"));
    }

    #[test]
    fn test_load_dir_accepts_full_sorted_top_scores() {
        let challenge = challenge_with_scores((0..10).rev());
        let dir = fixture_dir_with_challenges("full", std::slice::from_ref(&challenge));
        let catalog = Catalog::load_dir(&dir);
        fs::remove_dir_all(&dir).ok();
        assert_eq!(catalog.unwrap().daily_challenges, vec![challenge]);
    }

    #[test]
    fn test_malformed_fixture() {
        let err = parse_fixture::<Vec<Puzzle>>(PUZZLES_FILE, r#"[{"id": 1}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Fixture { name: PUZZLES_FILE, .. }));
        assert!(err.to_string().starts_with("Malformed fixture puzzles.json"));
    }
}

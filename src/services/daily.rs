use chrono::NaiveDate;
use rand::Rng;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{ChallengeScore, DailyChallenge};

/// Puzzle used for a fabricated challenge when the catalog has no puzzles to pick from.
pub const DEFAULT_CHALLENGE_PUZZLE_ID: &str = "puzzle-1";

/// Returns the challenge for `today`, creating and storing one if none exists yet.
pub fn todays_challenge<R: Rng>(
    catalog: &mut Catalog,
    today: NaiveDate,
    rng: &mut R,
) -> DailyChallenge {
    challenge_for_day(catalog, today, rng).clone()
}

/// Submits a score to today's challenge. The challenge is created first if needed.
pub fn submit_daily_score<R: Rng>(
    catalog: &mut Catalog,
    today: NaiveDate,
    rng: &mut R,
    score: ChallengeScore,
) -> DailyChallenge {
    let challenge = challenge_for_day(catalog, today, rng);
    challenge.submit_score(score);
    challenge.clone()
}

pub fn get_challenge_history(catalog: &Catalog) -> Vec<DailyChallenge> {
    catalog.daily_challenges.clone()
}

pub fn get_challenge(catalog: &Catalog, date: NaiveDate) -> Result<DailyChallenge, CatalogError> {
    catalog
        .daily_challenges
        .iter()
        .find(|c| c.date == date)
        .cloned()
        .ok_or(CatalogError::ChallengeNotFound(date))
}

/// Counts the challenges in which `player` holds first place.
pub fn daily_wins(catalog: &Catalog, player: &str) -> u32 {
    catalog
        .daily_challenges
        .iter()
        .filter(|c| c.is_won_by(player))
        .count() as u32
}

fn challenge_for_day<'a, R: Rng>(
    catalog: &'a mut Catalog,
    day: NaiveDate,
    rng: &mut R,
) -> &'a mut DailyChallenge {
    if let Some(index) = catalog.daily_challenges.iter().position(|c| c.date == day) {
        return &mut catalog.daily_challenges[index];
    }

    let puzzle_id = catalog
        .puzzles
        .first()
        .map(|p| p.id.clone())
        .unwrap_or_else(|| DEFAULT_CHALLENGE_PUZZLE_ID.to_string());
    catalog.daily_challenges.push(DailyChallenge {
        id: format!("challenge-{}", day),
        date: day,
        puzzle_id,
        participants: rng.random_range(100..600),
        top_scores: Vec::new(),
    });
    let index = catalog.daily_challenges.len() - 1;
    &mut catalog.daily_challenges[index]
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Name under which the person at the keyboard shows up on leaderboards.
pub const LOCAL_PLAYER: &str = "You";

/// Daily challenges keep at most this many top scores.
pub const MAX_TOP_SCORES: usize = 10;

/// Completions faster than this count towards the Speed Demon achievement.
pub const FAST_SOLVE_SECS: u32 = 120;

/// Finishing within this window earns one bonus point per second left.
pub const TIME_BONUS_WINDOW_SECS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleType {
    Jigsaw,
    Logic,
    Crossword,
    Sudoku,
    Trivia,
}

impl PuzzleType {
    pub const ALL: [PuzzleType; 5] = [
        PuzzleType::Jigsaw,
        PuzzleType::Logic,
        PuzzleType::Crossword,
        PuzzleType::Sudoku,
        PuzzleType::Trivia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleType::Jigsaw => "jigsaw",
            PuzzleType::Logic => "logic",
            PuzzleType::Crossword => "crossword",
            PuzzleType::Sudoku => "sudoku",
            PuzzleType::Trivia => "trivia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PuzzleType::Jigsaw => "Jigsaw",
            PuzzleType::Logic => "Logic",
            PuzzleType::Crossword => "Crossword",
            PuzzleType::Sudoku => "Sudoku",
            PuzzleType::Trivia => "Trivia",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PuzzleType::Jigsaw => "🧩",
            PuzzleType::Logic => "🧠",
            PuzzleType::Crossword => "📝",
            PuzzleType::Sudoku => "🔢",
            PuzzleType::Trivia => "❓",
        }
    }
}

impl fmt::Display for PuzzleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PuzzleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown puzzle type: {}", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Points awarded for finishing a puzzle of this difficulty, before the time bonus.
    pub fn base_score(&self) -> u32 {
        match self {
            Difficulty::Easy => 100,
            Difficulty::Medium => 200,
            Difficulty::Hard => 300,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown difficulty: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub puzzle_type: PuzzleType,
    pub difficulty: Difficulty,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Puzzle {
    /// Overwrites every field present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: PuzzleUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(puzzle_type) = update.puzzle_type {
            self.puzzle_type = puzzle_type;
        }
        if let Some(difficulty) = update.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(thumbnail) = update.thumbnail {
            self.thumbnail = thumbnail;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPuzzle {
    pub title: String,
    #[serde(rename = "type")]
    pub puzzle_type: PuzzleType,
    pub difficulty: Difficulty,
    pub thumbnail: String,
}

impl NewPuzzle {
    pub fn into_puzzle(self, id: String, created_at: DateTime<Utc>) -> Puzzle {
        Puzzle {
            id,
            title: self.title,
            puzzle_type: self.puzzle_type,
            difficulty: self.difficulty,
            thumbnail: self.thumbnail,
            created_at: Some(created_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub puzzle_type: Option<PuzzleType>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Anything that can be placed on a leaderboard.
pub trait Ranked {
    fn score(&self) -> u32;
    /// Completion time in seconds.
    fn time(&self) -> u32;
}

/// Leaderboard order: higher score first, faster time breaks ties.
pub fn rank_order<T: Ranked>(a: &T, b: &T) -> Ordering {
    b.score().cmp(&a.score()).then(a.time().cmp(&b.time()))
}

/// Stable sort into leaderboard order.
pub fn sort_ranked<T: Ranked>(entries: &mut [T]) {
    entries.sort_by(|a, b| rank_order(a, b));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub player_name: String,
    pub puzzle_type: PuzzleType,
    pub score: u32,
    pub time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Ranked for LeaderboardEntry {
    fn score(&self) -> u32 {
        self.score
    }

    fn time(&self) -> u32 {
        self.time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScore {
    pub player_name: String,
    pub puzzle_type: PuzzleType,
    pub score: u32,
    pub time: u32,
}

impl NewScore {
    pub fn into_entry(self, id: String, submitted_at: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            id,
            player_name: self.player_name,
            puzzle_type: self.puzzle_type,
            score: self.score,
            time: self.time,
            submitted_at: Some(submitted_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeScore {
    pub player_name: String,
    pub score: u32,
    pub time: u32,
}

impl Ranked for ChallengeScore {
    fn score(&self) -> u32 {
        self.score
    }

    fn time(&self) -> u32 {
        self.time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    pub id: String,
    pub date: NaiveDate,
    pub puzzle_id: String,
    pub participants: u32,
    #[serde(default)]
    pub top_scores: Vec<ChallengeScore>,
}

impl DailyChallenge {
    /// Adds a score to the challenge, keeping only the best `MAX_TOP_SCORES` and counting the
    /// submitter as a participant.
    pub fn submit_score(&mut self, score: ChallengeScore) {
        self.top_scores.push(score);
        sort_ranked(&mut self.top_scores);
        self.top_scores.truncate(MAX_TOP_SCORES);
        self.participants += 1;
    }

    /// Describes what is wrong with a stored top score list, if anything. Lists built through
    /// `submit_score` are always well formed; ones read from fixtures may not be.
    pub fn top_scores_problem(&self) -> Option<&'static str> {
        if self.top_scores.len() > MAX_TOP_SCORES {
            Some("more than 10 top scores")
        } else if self
            .top_scores
            .windows(2)
            .any(|w| rank_order(&w[0], &w[1]) == Ordering::Greater)
        {
            Some("top scores are not in rank order")
        } else {
            None
        }
    }

    /// Returns true if the first place belongs to `player`.
    pub fn is_won_by(&self, player: &str) -> bool {
        self.top_scores
            .first()
            .is_some_and(|top| top.player_name == player)
    }
}

/// A single finished puzzle in the player's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub puzzle_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub puzzle_type: PuzzleType,
    pub difficulty: Difficulty,
    pub completion_time: u32,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub puzzles_completed: u32,
    pub total_time: u64,
    pub current_streak: u32,
    #[serde(default)]
    pub last_played: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_puzzles: Vec<Completion>,
}

impl UserProgress {
    /// Adds a completion to the history and updates the counters and the streak. The streak is
    /// judged against the calendar day of the previous `last_played`.
    pub fn record(&mut self, completion: Completion) {
        let completed_on = completion.completed_at.date_naive();
        let previous = self.last_played.map(|t| t.date_naive());
        self.current_streak = next_streak(self.current_streak, previous, completed_on);

        self.puzzles_completed += 1;
        self.total_time += u64::from(completion.completion_time);
        self.last_played = Some(completion.completed_at);
        self.completed_puzzles.push(completion);
    }

    pub fn reset(&mut self) {
        *self = UserProgress::default();
    }

    /// The last `n` completions, newest first.
    pub fn recent(&self, n: usize) -> Vec<Completion> {
        self.completed_puzzles.iter().rev().take(n).cloned().collect()
    }

    pub fn fast_solves(&self) -> u32 {
        self.completed_puzzles
            .iter()
            .filter(|c| c.completion_time < FAST_SOLVE_SECS)
            .count() as u32
    }
}

/// Streak after a completion on `completed_on`, given the day of the previous completion.
pub fn next_streak(current: u32, last_played: Option<NaiveDate>, completed_on: NaiveDate) -> u32 {
    match last_played {
        None => 1,
        Some(last) if last == completed_on => current,
        Some(last) if last.succ_opt() == Some(completed_on) => current.saturating_add(1),
        Some(_) => 1,
    }
}

/// What the play screen shows after a finished puzzle has been recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub score: u32,
    /// The player's rank on the leaderboard for this puzzle type after the score was added.
    pub rank: Option<usize>,
    /// Whether the puzzle was today's daily challenge.
    pub daily_challenge: bool,
    pub progress: UserProgress,
}

/// Score for finishing a puzzle: the difficulty's base score plus a bonus for every second
/// under five minutes.
pub fn compute_score(difficulty: Difficulty, elapsed_secs: u32) -> u32 {
    difficulty.base_score() + TIME_BONUS_WINDOW_SECS.saturating_sub(elapsed_secs)
}

pub fn filter_puzzles(
    puzzles: &[Puzzle],
    puzzle_type: Option<PuzzleType>,
    difficulty: Option<Difficulty>,
) -> Vec<Puzzle> {
    puzzles
        .iter()
        .filter(|p| puzzle_type.is_none_or(|t| p.puzzle_type == t))
        .filter(|p| difficulty.is_none_or(|d| p.difficulty == d))
        .cloned()
        .collect()
}

pub fn count_by_type(puzzles: &[Puzzle], puzzle_type: PuzzleType) -> usize {
    puzzles
        .iter()
        .filter(|p| p.puzzle_type == puzzle_type)
        .count()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AchievementMetric {
    PuzzlesCompleted,
    Streak,
    FastSolves,
    DailyWins,
}

#[derive(Clone, Copy, Debug)]
pub struct Achievement {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub threshold: u32,
    pub metric: AchievementMetric,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        icon: "🎯",
        title: "First Solve",
        description: "Complete your first puzzle",
        threshold: 1,
        metric: AchievementMetric::PuzzlesCompleted,
    },
    Achievement {
        icon: "🔥",
        title: "Hot Streak",
        description: "5 day solving streak",
        threshold: 5,
        metric: AchievementMetric::Streak,
    },
    Achievement {
        icon: "🏅",
        title: "Puzzle Master",
        description: "Complete 50 puzzles",
        threshold: 50,
        metric: AchievementMetric::PuzzlesCompleted,
    },
    Achievement {
        icon: "⚡",
        title: "Speed Demon",
        description: "Complete puzzle under 2 minutes",
        threshold: 1,
        metric: AchievementMetric::FastSolves,
    },
    Achievement {
        icon: "⭐",
        title: "Daily Champion",
        description: "Win daily challenge",
        threshold: 1,
        metric: AchievementMetric::DailyWins,
    },
    Achievement {
        icon: "👑",
        title: "Century Club",
        description: "Complete 100 puzzles",
        threshold: 100,
        metric: AchievementMetric::PuzzlesCompleted,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub threshold: u32,
    pub progress: u32,
    pub earned: bool,
}

/// Progress towards an achievement, capped at its threshold.
pub fn achievement_progress(
    achievement: &Achievement,
    progress: &UserProgress,
    daily_wins: u32,
) -> u32 {
    let value = match achievement.metric {
        AchievementMetric::PuzzlesCompleted => progress.puzzles_completed,
        AchievementMetric::Streak => progress.current_streak,
        AchievementMetric::FastSolves => progress.fast_solves(),
        AchievementMetric::DailyWins => daily_wins,
    };
    value.min(achievement.threshold)
}

pub fn evaluate_achievements(progress: &UserProgress, daily_wins: u32) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|a| {
            let value = achievement_progress(a, progress, daily_wins);
            AchievementStatus {
                icon: a.icon.to_string(),
                title: a.title.to_string(),
                description: a.description.to_string(),
                threshold: a.threshold,
                progress: value,
                earned: value >= a.threshold,
            }
        })
        .collect()
}

/// Formats seconds as a stopwatch reading, e.g. `4:07`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Formats seconds as a coarse duration, e.g. `2h 5m` or `42m`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(player: &str, score: u32, time: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            id: format!("entry-{}", player),
            player_name: player.to_string(),
            puzzle_type: PuzzleType::Logic,
            score,
            time,
            submitted_at: None,
        }
    }

    fn challenge_score(player: &str, score: u32, time: u32) -> ChallengeScore {
        ChallengeScore {
            player_name: player.to_string(),
            score,
            time,
        }
    }

    fn completion_at(year: i32, month: u32, day: u32, hour: u32, secs: u32) -> Completion {
        Completion {
            puzzle_id: "puzzle-1".to_string(),
            title: "Mountain Sunrise".to_string(),
            puzzle_type: PuzzleType::Jigsaw,
            difficulty: Difficulty::Easy,
            completion_time: secs,
            score: compute_score(Difficulty::Easy, secs),
            completed_at: Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap(),
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_sort_ranked_breaks_ties_by_time() {
        let mut entries = vec![entry("A", 100, 60), entry("B", 100, 50), entry("C", 150, 40)];
        sort_ranked(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_sort_ranked_is_stable_for_full_ties() {
        let mut entries = vec![
            entry("first", 200, 90),
            entry("second", 200, 90),
            entry("third", 200, 90),
        ];
        sort_ranked(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_submit_score_keeps_top_ten() {
        let mut challenge = DailyChallenge {
            id: "challenge-2026-10-19".to_string(),
            date: date(2026, 10, 19),
            puzzle_id: "puzzle-1".to_string(),
            participants: 0,
            top_scores: vec![],
        };
        for i in 0..10 {
            challenge.submit_score(challenge_score(&format!("p{}", i), 100 + i * 10, 60));
        }
        assert_eq!(challenge.top_scores.len(), 10);

        // The 11th score beats everyone, so the lowest (100) drops off.
        challenge.submit_score(challenge_score("late", 500, 30));
        assert_eq!(challenge.top_scores.len(), 10);
        assert_eq!(challenge.top_scores[0].player_name, "late");
        assert!(challenge.top_scores.iter().all(|s| s.score > 100));
        assert_eq!(challenge.participants, 11);

        // A 12th score that is worse than everything is not kept, but still participates.
        challenge.submit_score(challenge_score("slow", 1, 999));
        assert_eq!(challenge.top_scores.len(), 10);
        assert!(!challenge.top_scores.iter().any(|s| s.player_name == "slow"));
        assert_eq!(challenge.participants, 12);
    }

    #[test]
    fn test_is_won_by() {
        let mut challenge = DailyChallenge {
            id: "c".to_string(),
            date: date(2026, 10, 19),
            puzzle_id: "puzzle-1".to_string(),
            participants: 3,
            top_scores: vec![],
        };
        assert!(!challenge.is_won_by(LOCAL_PLAYER));
        challenge.submit_score(challenge_score(LOCAL_PLAYER, 300, 100));
        challenge.submit_score(challenge_score("Ada", 250, 80));
        assert!(challenge.is_won_by(LOCAL_PLAYER));
        assert!(!challenge.is_won_by("Ada"));
    }

    #[test]
    fn test_next_streak() {
        // First ever completion.
        assert_eq!(next_streak(0, None, date(2026, 10, 19)), 1);
        // Same day.
        assert_eq!(next_streak(3, Some(date(2026, 10, 19)), date(2026, 10, 19)), 3);
        // Next day, across a month boundary.
        assert_eq!(next_streak(3, Some(date(2026, 10, 31)), date(2026, 11, 1)), 4);
        // Gap of two days.
        assert_eq!(next_streak(7, Some(date(2026, 10, 17)), date(2026, 10, 19)), 1);
        // Back-dated completion.
        assert_eq!(next_streak(7, Some(date(2026, 10, 19)), date(2026, 10, 18)), 1);
    }

    #[test]
    fn test_record_same_day_keeps_streak() {
        let mut progress = UserProgress::default();
        progress.record(completion_at(2026, 10, 19, 9, 200));
        assert_eq!(progress.current_streak, 1);

        progress.record(completion_at(2026, 10, 19, 21, 100));
        assert_eq!(progress.current_streak, 1);
        assert_eq!(progress.puzzles_completed, 2);
        assert_eq!(progress.total_time, 300);
        assert_eq!(
            progress.last_played,
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 21, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_record_next_day_increments_streak() {
        let mut progress = UserProgress {
            current_streak: 4,
            last_played: Some(Utc.with_ymd_and_hms(2026, 10, 18, 23, 0, 0).unwrap()),
            ..Default::default()
        };
        progress.record(completion_at(2026, 10, 19, 1, 90));
        assert_eq!(progress.current_streak, 5);
    }

    #[test]
    fn test_record_after_gap_resets_streak() {
        let mut progress = UserProgress {
            current_streak: 4,
            last_played: Some(Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()),
            ..Default::default()
        };
        progress.record(completion_at(2026, 10, 19, 12, 90));
        assert_eq!(progress.current_streak, 1);
        assert_eq!(progress.completed_puzzles.len(), 1);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut progress = UserProgress::default();
        for day in 1..=7 {
            progress.record(completion_at(2026, 10, day, 12, 60 * day));
        }
        let recent = progress.recent(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].completion_time, 420);
        assert_eq!(recent[4].completion_time, 180);
        assert_eq!(progress.current_streak, 7);
    }

    #[test]
    fn test_reset() {
        let mut progress = UserProgress::default();
        progress.record(completion_at(2026, 10, 19, 12, 60));
        progress.reset();
        assert_eq!(progress, UserProgress::default());
        assert_eq!(progress.last_played, None);
    }

    #[test]
    fn test_compute_score() {
        assert_eq!(compute_score(Difficulty::Easy, 0), 400);
        assert_eq!(compute_score(Difficulty::Medium, 100), 400);
        assert_eq!(compute_score(Difficulty::Hard, 300), 300);
        // No negative bonus for slow solves.
        assert_eq!(compute_score(Difficulty::Hard, 4000), 300);
    }

    #[test]
    fn test_filter_puzzles() {
        let puzzles = vec![
            Puzzle {
                id: "1".to_string(),
                title: "a".to_string(),
                puzzle_type: PuzzleType::Sudoku,
                difficulty: Difficulty::Hard,
                thumbnail: String::new(),
                created_at: None,
            },
            Puzzle {
                id: "2".to_string(),
                title: "b".to_string(),
                puzzle_type: PuzzleType::Sudoku,
                difficulty: Difficulty::Easy,
                thumbnail: String::new(),
                created_at: None,
            },
            Puzzle {
                id: "3".to_string(),
                title: "c".to_string(),
                puzzle_type: PuzzleType::Trivia,
                difficulty: Difficulty::Easy,
                thumbnail: String::new(),
                created_at: None,
            },
        ];

        assert_eq!(filter_puzzles(&puzzles, None, None).len(), 3);
        assert_eq!(filter_puzzles(&puzzles, Some(PuzzleType::Sudoku), None).len(), 2);
        assert_eq!(filter_puzzles(&puzzles, None, Some(Difficulty::Easy)).len(), 2);
        let both = filter_puzzles(&puzzles, Some(PuzzleType::Sudoku), Some(Difficulty::Easy));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, "2");
        assert!(filter_puzzles(&puzzles, Some(PuzzleType::Jigsaw), None).is_empty());
        assert_eq!(count_by_type(&puzzles, PuzzleType::Trivia), 1);
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut puzzle = Puzzle {
            id: "p".to_string(),
            title: "Old".to_string(),
            puzzle_type: PuzzleType::Logic,
            difficulty: Difficulty::Easy,
            thumbnail: "/old.png".to_string(),
            created_at: None,
        };
        puzzle.apply(PuzzleUpdate {
            title: Some("New".to_string()),
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        });
        assert_eq!(puzzle.title, "New");
        assert_eq!(puzzle.difficulty, Difficulty::Hard);
        assert_eq!(puzzle.puzzle_type, PuzzleType::Logic);
        assert_eq!(puzzle.thumbnail, "/old.png");
    }

    #[test]
    fn test_achievements() {
        let mut progress = UserProgress::default();
        let statuses = evaluate_achievements(&progress, 0);
        assert_eq!(statuses.len(), ACHIEVEMENTS.len());
        assert!(statuses.iter().all(|s| !s.earned && s.progress == 0));

        progress.record(completion_at(2026, 10, 19, 12, 95));
        progress.current_streak = 9;
        let statuses = evaluate_achievements(&progress, 2);
        let earned: Vec<&str> = statuses
            .iter()
            .filter(|s| s.earned)
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(
            earned,
            vec!["First Solve", "Hot Streak", "Speed Demon", "Daily Champion"]
        );

        // Progress is capped at the threshold.
        let hot_streak = statuses.iter().find(|s| s.title == "Hot Streak").unwrap();
        assert_eq!(hot_streak.progress, 5);
        let master = statuses.iter().find(|s| s.title == "Puzzle Master").unwrap();
        assert_eq!(master.progress, 1);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(247), "4:07");
        assert_eq!(format_clock(3600), "60:00");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(2520), "42m");
        assert_eq!(format_duration(7500), "2h 5m");
    }

    #[test]
    fn test_wire_names() {
        let json = r#"{"id":"puzzle-9","title":"Grid","type":"crossword","difficulty":"Medium","thumbnail":"/t.png"}"#;
        let puzzle: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.puzzle_type, PuzzleType::Crossword);
        assert_eq!(puzzle.difficulty, Difficulty::Medium);
        assert_eq!(puzzle.created_at, None);

        assert_eq!("SUDOKU".parse::<PuzzleType>(), Ok(PuzzleType::Sudoku));
        assert!("chess".parse::<PuzzleType>().is_err());
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
    }
}

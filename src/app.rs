use chrono::NaiveDate;
use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::server_fn::error::NoCustomError;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::{use_location, use_params_map},
    path,
};
use std::time::Duration;

use crate::components::{
    use_toaster, Button, ButtonVariant, Card, DifficultyBadge, EmptyState, ErrorState,
    LeaderboardRow, LoadingState, PuzzleGridSection, PuzzleTypeCard, ToastContainer, Toaster,
    TypeTabs,
};
use crate::model::{
    count_by_type, filter_puzzles, format_clock, format_duration, AchievementStatus,
    ChallengeScore, Completion, CompletionSummary, DailyChallenge, Difficulty, LeaderboardEntry,
    NewPuzzle, NewScore, Puzzle, PuzzleType, PuzzleUpdate, UserProgress, LOCAL_PLAYER,
};
use crate::services::leaderboard::DEFAULT_TOP_SCORES_LIMIT;

#[cfg(feature = "ssr")]
use crate::{
    catalog::Catalog,
    config::ServiceConfig,
    error::CatalogError,
    model::evaluate_achievements,
    services::{daily, leaderboard, play, progress, puzzles},
};
#[cfg(feature = "ssr")]
use chrono::Utc;
#[cfg(feature = "ssr")]
use std::sync::{Arc, RwLock};
#[cfg(feature = "ssr")]
use uuid::Uuid;

#[cfg(feature = "ssr")]
pub type SharedCatalog = Arc<RwLock<Catalog>>;

// Artificial latency of each operation in milliseconds, before `ServiceConfig` scaling.
#[cfg(feature = "ssr")]
mod latency {
    pub const GET_PUZZLES: u64 = 300;
    pub const GET_PUZZLE: u64 = 200;
    pub const GET_PUZZLES_BY_TYPE: u64 = 250;
    pub const GET_PUZZLES_BY_DIFFICULTY: u64 = 250;
    pub const CREATE_PUZZLE: u64 = 400;
    pub const UPDATE_PUZZLE: u64 = 350;
    pub const DELETE_PUZZLE: u64 = 300;

    pub const GET_TOP_SCORES: u64 = 300;
    pub const ADD_SCORE: u64 = 400;
    pub const GET_USER_RANK: u64 = 250;
    pub const GET_SCORES_BY_PLAYER: u64 = 300;
    pub const CLEAR_SCORES: u64 = 350;

    pub const GET_TODAYS_CHALLENGE: u64 = 300;
    pub const SUBMIT_DAILY_SCORE: u64 = 400;
    pub const GET_CHALLENGE_HISTORY: u64 = 350;
    pub const GET_CHALLENGE: u64 = 250;

    pub const GET_USER_PROGRESS: u64 = 300;
    pub const RECORD_COMPLETION: u64 = 400;
    pub const UPDATE_STREAK: u64 = 200;
    pub const RESET_PROGRESS: u64 = 350;
}

/// Waits out the configured latency, then runs `f` against a read lock of the catalog on the
/// blocking pool.
#[cfg(feature = "ssr")]
async fn read_catalog<T, F>(base_ms: u64, f: F) -> Result<T, ServerFnError<NoCustomError>>
where
    T: Send + 'static,
    F: FnOnce(&Catalog) -> Result<T, CatalogError> + Send + 'static,
{
    let catalog: SharedCatalog = expect_context();
    let config: ServiceConfig = expect_context();
    tokio::time::sleep(config.delay(base_ms)).await;

    let result = tokio::task::spawn_blocking(move || {
        let catalog = catalog
            .read()
            .map_err(|e| ServerFnError::<NoCustomError>::ServerError(e.to_string()))?;
        f(&catalog).map_err(|e| ServerFnError::ServerError(e.to_string()))
    })
    .await;
    match result {
        Ok(value) => value,
        Err(e) => Err(ServerFnError::ServerError(e.to_string())),
    }
}

/// Like `read_catalog`, but holds the write lock.
#[cfg(feature = "ssr")]
async fn write_catalog<T, F>(base_ms: u64, f: F) -> Result<T, ServerFnError<NoCustomError>>
where
    T: Send + 'static,
    F: FnOnce(&mut Catalog) -> Result<T, CatalogError> + Send + 'static,
{
    let catalog: SharedCatalog = expect_context();
    let config: ServiceConfig = expect_context();
    tokio::time::sleep(config.delay(base_ms)).await;

    let result = tokio::task::spawn_blocking(move || {
        let mut catalog = catalog
            .write()
            .map_err(|e| ServerFnError::<NoCustomError>::ServerError(e.to_string()))?;
        f(&mut catalog).map_err(|e| ServerFnError::ServerError(e.to_string()))
    })
    .await;
    match result {
        Ok(value) => value,
        Err(e) => Err(ServerFnError::ServerError(e.to_string())),
    }
}

#[server(GetPuzzles)]
pub async fn get_puzzles() -> Result<Vec<Puzzle>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_PUZZLES, |c| Ok(puzzles::get_all_puzzles(c))).await
}

#[server(GetPuzzle)]
pub async fn get_puzzle(id: String) -> Result<Puzzle, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_PUZZLE, move |c| puzzles::get_puzzle(c, &id)).await
}

#[server(GetPuzzlesByType)]
pub async fn get_puzzles_by_type(
    puzzle_type: PuzzleType,
) -> Result<Vec<Puzzle>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_PUZZLES_BY_TYPE, move |c| {
        Ok(puzzles::get_puzzles_by_type(c, puzzle_type))
    })
    .await
}

#[server(GetPuzzlesByDifficulty)]
pub async fn get_puzzles_by_difficulty(
    difficulty: Difficulty,
) -> Result<Vec<Puzzle>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_PUZZLES_BY_DIFFICULTY, move |c| {
        Ok(puzzles::get_puzzles_by_difficulty(c, difficulty))
    })
    .await
}

#[server(CreatePuzzle)]
pub async fn create_puzzle(new_puzzle: NewPuzzle) -> Result<Puzzle, ServerFnError<NoCustomError>> {
    let id = format!("puzzle-{}", Uuid::new_v4());
    write_catalog(latency::CREATE_PUZZLE, move |c| {
        let puzzle = puzzles::create_puzzle(c, new_puzzle, id, Utc::now());
        log!("Created puzzle {} ({})", puzzle.id, puzzle.title);
        Ok(puzzle)
    })
    .await
}

#[server(UpdatePuzzle)]
pub async fn update_puzzle(
    id: String,
    #[server(default)] update: PuzzleUpdate,
) -> Result<Puzzle, ServerFnError<NoCustomError>> {
    write_catalog(latency::UPDATE_PUZZLE, move |c| {
        puzzles::update_puzzle(c, &id, update)
    })
    .await
}

#[server(DeletePuzzle)]
pub async fn delete_puzzle(id: String) -> Result<Puzzle, ServerFnError<NoCustomError>> {
    write_catalog(latency::DELETE_PUZZLE, move |c| {
        let puzzle = puzzles::delete_puzzle(c, &id)?;
        log!("Deleted puzzle {}", puzzle.id);
        Ok(puzzle)
    })
    .await
}

#[server(GetTopScores)]
pub async fn get_top_scores(
    puzzle_type: Option<PuzzleType>,
    limit: usize,
) -> Result<Vec<LeaderboardEntry>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_TOP_SCORES, move |c| {
        Ok(leaderboard::get_top_scores(c, puzzle_type, limit))
    })
    .await
}

#[server(AddScore)]
pub async fn add_score(
    new_score: NewScore,
) -> Result<LeaderboardEntry, ServerFnError<NoCustomError>> {
    let id = format!("score-{}", Uuid::new_v4());
    write_catalog(latency::ADD_SCORE, move |c| {
        Ok(leaderboard::add_score(c, new_score, id, Utc::now()))
    })
    .await
}

#[server(GetUserRank)]
pub async fn get_user_rank(
    player_name: String,
    puzzle_type: Option<PuzzleType>,
) -> Result<Option<usize>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_USER_RANK, move |c| {
        Ok(leaderboard::get_user_rank(c, &player_name, puzzle_type))
    })
    .await
}

#[server(GetScoresByPlayer)]
pub async fn get_scores_by_player(
    player_name: String,
) -> Result<Vec<LeaderboardEntry>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_SCORES_BY_PLAYER, move |c| {
        Ok(leaderboard::get_scores_by_player(c, &player_name))
    })
    .await
}

#[server(ClearScores)]
pub async fn clear_scores() -> Result<Vec<LeaderboardEntry>, ServerFnError<NoCustomError>> {
    write_catalog(latency::CLEAR_SCORES, |c| {
        log!("Clearing the leaderboard");
        Ok(leaderboard::clear_scores(c))
    })
    .await
}

#[server(GetTodaysChallenge)]
pub async fn get_todays_challenge() -> Result<DailyChallenge, ServerFnError<NoCustomError>> {
    write_catalog(latency::GET_TODAYS_CHALLENGE, |c| {
        let today = Utc::now().date_naive();
        Ok(daily::todays_challenge(c, today, &mut rand::rng()))
    })
    .await
}

#[server(SubmitDailyScore)]
pub async fn submit_daily_score(
    score: ChallengeScore,
) -> Result<DailyChallenge, ServerFnError<NoCustomError>> {
    write_catalog(latency::SUBMIT_DAILY_SCORE, move |c| {
        let today = Utc::now().date_naive();
        Ok(daily::submit_daily_score(c, today, &mut rand::rng(), score))
    })
    .await
}

#[server(GetChallengeHistory)]
pub async fn get_challenge_history() -> Result<Vec<DailyChallenge>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_CHALLENGE_HISTORY, |c| {
        Ok(daily::get_challenge_history(c))
    })
    .await
}

#[server(GetChallenge)]
pub async fn get_challenge(
    date: NaiveDate,
) -> Result<DailyChallenge, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_CHALLENGE, move |c| daily::get_challenge(c, date)).await
}

#[server(GetUserProgress)]
pub async fn get_user_progress() -> Result<UserProgress, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_USER_PROGRESS, |c| {
        Ok(progress::get_user_progress(c))
    })
    .await
}

#[server(RecordCompletion)]
pub async fn record_completion(
    completion: Completion,
) -> Result<UserProgress, ServerFnError<NoCustomError>> {
    write_catalog(latency::RECORD_COMPLETION, move |c| {
        Ok(progress::record_completion(c, completion))
    })
    .await
}

#[server(UpdateStreak)]
pub async fn update_streak(streak: u32) -> Result<UserProgress, ServerFnError<NoCustomError>> {
    write_catalog(latency::UPDATE_STREAK, move |c| {
        Ok(progress::update_streak(c, streak))
    })
    .await
}

#[server(ResetProgress)]
pub async fn reset_progress() -> Result<UserProgress, ServerFnError<NoCustomError>> {
    write_catalog(latency::RESET_PROGRESS, |c| {
        log!("Resetting user progress");
        Ok(progress::reset_progress(c))
    })
    .await
}

/// Records a finished play for the local player: progress, leaderboard and, when it is today's
/// puzzle, the daily challenge.
#[server(CompletePuzzle)]
pub async fn complete_puzzle(
    puzzle_id: String,
    elapsed_secs: u32,
) -> Result<CompletionSummary, ServerFnError<NoCustomError>> {
    let score_id = format!("score-{}", Uuid::new_v4());
    write_catalog(latency::RECORD_COMPLETION, move |c| {
        let summary = play::complete_puzzle(
            c,
            &puzzle_id,
            elapsed_secs,
            score_id,
            Utc::now(),
            &mut rand::rng(),
        )?;
        log!(
            "Completed {} in {}s for {} points",
            puzzle_id,
            elapsed_secs,
            summary.score
        );
        Ok(summary)
    })
    .await
}

#[server(GetAchievements)]
pub async fn get_achievements() -> Result<Vec<AchievementStatus>, ServerFnError<NoCustomError>> {
    read_catalog(latency::GET_USER_PROGRESS, |c| {
        let wins = daily::daily_wins(c, LOCAL_PLAYER);
        Ok(evaluate_achievements(&c.progress, wins))
    })
    .await
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_context(Toaster::new());

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/puzzle-hub.css" />

        <Title text="PuzzleHub" />

        <Router>
            <Navigation />
            <main>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/puzzles") view=PuzzlesPage />
                    <Route path=path!("/daily") view=DailyChallengePage />
                    <Route path=path!("/progress") view=ProgressPage />
                    <Route path=path!("/leaderboard") view=LeaderboardPage />
                    <Route path=path!("/play/:puzzle_id") view=PlayPage />
                </Routes>
            </main>
            <ToastContainer />
        </Router>
    }
}

const NAV_LINKS: [(&str, &str, &str); 5] = [
    ("/", "Home", "🏠"),
    ("/puzzles", "Puzzles", "🧩"),
    ("/daily", "Daily", "📅"),
    ("/progress", "Progress", "📈"),
    ("/leaderboard", "Leaderboard", "🏆"),
];

/// Top navigation bar. Hidden while a puzzle is being played.
#[component]
fn Navigation() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <Show when=move || !pathname.get().starts_with("/play/")>
            <nav class="navbar">
                <a class="brand" href="/">
                    <span class="brand-icon">"🧩"</span>
                    "PuzzleHub"
                </a>
                <div class="nav-links">
                    {NAV_LINKS
                        .into_iter()
                        .map(|(href, label, icon)| {
                            view! {
                                <a
                                    href=href
                                    class=move || {
                                        if pathname.get() == href { "nav-link active" } else { "nav-link" }
                                    }
                                >
                                    <span class="nav-icon">{icon}</span>
                                    <span class="nav-label">{label}</span>
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </nav>
        </Show>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let toaster = use_toaster();
    let puzzle_list = Resource::new(|| (), |_| get_puzzles());
    let selected_type = RwSignal::new(None::<PuzzleType>);

    Effect::new(move || {
        if let Some(Err(e)) = puzzle_list.get() {
            error!("Failed to load puzzles: {}", e);
            toaster.error("Failed to load puzzles");
        }
    });

    view! {
        <div class="page">
            <section class="hero">
                <h1>"Challenge Your Mind"</h1>
                <p class="muted">
                    "Jigsaws, logic grids, crosswords, sudoku and trivia. Pick a puzzle and start solving."
                </p>
            </section>
            <Suspense fallback=|| view! { <LoadingState message="Loading puzzles..." /> }>
                {move || {
                    puzzle_list
                        .with(|res| match res {
                            Some(Ok(all)) => {
                                let current = selected_type.get();
                                let title = current
                                    .map(|t| format!("{} Puzzles", t.label()))
                                    .unwrap_or_else(|| "All Puzzles".to_string());
                                view! {
                                    <section class="type-grid">
                                        {PuzzleType::ALL
                                            .into_iter()
                                            .map(|t| {
                                                view! {
                                                    <PuzzleTypeCard
                                                        puzzle_type=t
                                                        count=count_by_type(all, t)
                                                        selected=selected_type
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </section>
                                    <TypeTabs selected=selected_type />
                                    <PuzzleGridSection
                                        title
                                        puzzles=filter_puzzles(all, current, None)
                                    />
                                }
                                    .into_any()
                            }
                            Some(Err(e)) => {
                                view! {
                                    <ErrorState
                                        message=e.to_string()
                                        on_retry=Callback::new(move |_| puzzle_list.refetch())
                                    />
                                }
                                    .into_any()
                            }
                            None => view! { <LoadingState /> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn PuzzlesPage() -> impl IntoView {
    let toaster = use_toaster();
    let puzzle_list = Resource::new(|| (), |_| get_puzzles());
    let selected_type = RwSignal::new(None::<PuzzleType>);
    let selected_difficulty = RwSignal::new(None::<Difficulty>);

    Effect::new(move || {
        if let Some(Err(e)) = puzzle_list.get() {
            error!("Failed to load puzzles: {}", e);
            toaster.error("Failed to load puzzles");
        }
    });

    let difficulty_class = move |value: Option<Difficulty>| {
        move || {
            if selected_difficulty.get() == value {
                "tab tab-active"
            } else {
                "tab"
            }
        }
    };

    view! {
        <div class="page">
            <h1>"Browse Puzzles"</h1>
            <Card class="filters">
                <div class="filter-group">
                    <span class="filter-label">"Type"</span>
                    <TypeTabs selected=selected_type />
                </div>
                <div class="filter-group">
                    <span class="filter-label">"Difficulty"</span>
                    <div class="tabs">
                        <button
                            class=difficulty_class(None)
                            on:click=move |_| selected_difficulty.set(None)
                        >
                            "Any"
                        </button>
                        {Difficulty::ALL
                            .into_iter()
                            .map(|d| {
                                view! {
                                    <button
                                        class=difficulty_class(Some(d))
                                        on:click=move |_| selected_difficulty.set(Some(d))
                                    >
                                        {d.as_str()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </Card>
            <Suspense fallback=|| view! { <LoadingState message="Loading puzzles..." /> }>
                {move || {
                    puzzle_list
                        .with(|res| match res {
                            Some(Ok(all)) => {
                                let filtered = filter_puzzles(
                                    all,
                                    selected_type.get(),
                                    selected_difficulty.get(),
                                );
                                if filtered.is_empty() {
                                    view! {
                                        <EmptyState
                                            icon="🧩"
                                            title="No puzzles match"
                                            message="Try a different type or difficulty."
                                        />
                                        <Button
                                            variant=ButtonVariant::Outline
                                            on_click=Callback::new(move |_| {
                                                selected_type.set(None);
                                                selected_difficulty.set(None);
                                            })
                                        >
                                            "Clear Filters"
                                        </Button>
                                    }
                                        .into_any()
                                } else {
                                    view! {
                                        <PuzzleGridSection
                                            title=format!("Showing {} puzzles", filtered.len())
                                            puzzles=filtered
                                        />
                                    }
                                        .into_any()
                                }
                            }
                            Some(Err(e)) => {
                                view! {
                                    <ErrorState
                                        message=e.to_string()
                                        on_retry=Callback::new(move |_| puzzle_list.refetch())
                                    />
                                }
                                    .into_any()
                            }
                            None => view! { <LoadingState /> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

/// Number of scores shown in the daily challenge preview.
const DAILY_TOP_PREVIEW: usize = 5;

#[component]
fn DailyChallengePage() -> impl IntoView {
    let toaster = use_toaster();
    let challenge = Resource::new(
        || (),
        |_| async move {
            let challenge = get_todays_challenge().await?;
            let puzzle = get_puzzle(challenge.puzzle_id.clone()).await?;
            Ok::<_, ServerFnError<NoCustomError>>((challenge, puzzle))
        },
    );

    Effect::new(move || {
        if let Some(Err(e)) = challenge.get() {
            error!("Failed to load daily challenge: {}", e);
            toaster.error("Failed to load daily challenge");
        }
    });

    view! {
        <div class="page">
            <Suspense fallback=|| view! { <LoadingState message="Loading today's challenge..." /> }>
                {move || {
                    challenge
                        .with(|res| match res {
                            Some(Ok((challenge, puzzle))) => {
                                let puzzle = puzzle.clone();
                                let date = challenge.date.format("%A, %B %-d, %Y").to_string();
                                let participants = challenge.participants;
                                let top_scores = challenge.top_scores.clone();
                                let top_score_count = top_scores.len();
                                view! {
                                    <section class="hero">
                                        <span class="pill">"📅 Daily Challenge"</span>
                                        <h1>{date}</h1>
                                        <p class="muted">
                                            "One puzzle, every player. Beat the clock and climb today's board."
                                        </p>
                                    </section>
                                    <div class="daily-layout">
                                        <Card class="daily-preview">
                                            <img src=puzzle.thumbnail.clone() alt=puzzle.title.clone() />
                                            <div class="daily-preview-body">
                                                <div class="daily-title">
                                                    <h2>{puzzle.title.clone()}</h2>
                                                    <DifficultyBadge difficulty=puzzle.difficulty />
                                                </div>
                                                <p class="muted">
                                                    {format!("{} Puzzle", puzzle.puzzle_type.label())}
                                                </p>
                                                <div class="stat-row">
                                                    <div>
                                                        <div class="stat-value">{participants}</div>
                                                        <div class="muted">"Participants"</div>
                                                    </div>
                                                    <div>
                                                        <div class="stat-value">{top_score_count}</div>
                                                        <div class="muted">"Top Scores"</div>
                                                    </div>
                                                </div>
                                                <a class="btn btn-primary" href=format!("/play/{}", puzzle.id)>
                                                    "Start Challenge"
                                                </a>
                                            </div>
                                        </Card>
                                        <Card class="daily-scores">
                                            <h2>"Today's Top Scores"</h2>
                                            <TopScores scores=top_scores />
                                        </Card>
                                    </div>
                                }
                                    .into_any()
                            }
                            Some(Err(e)) => {
                                view! {
                                    <ErrorState
                                        message=e.to_string()
                                        on_retry=Callback::new(move |_| challenge.refetch())
                                    />
                                }
                                    .into_any()
                            }
                            None => view! { <LoadingState /> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn TopScores(scores: Vec<ChallengeScore>) -> impl IntoView {
    if scores.is_empty() {
        return view! {
            <EmptyState icon="🏁" message="No scores yet. Be the first to finish!" />
        }
            .into_any();
    }

    view! {
        <ol class="top-scores">
            {scores
                .into_iter()
                .take(DAILY_TOP_PREVIEW)
                .enumerate()
                .map(|(i, s)| {
                    let highlighted = s.player_name == LOCAL_PLAYER;
                    view! {
                        <li class=if highlighted { "top-score highlighted" } else { "top-score" }>
                            <span class="rank">{i + 1}</span>
                            <span class="player-name">{s.player_name}</span>
                            <span class="score">{s.score}</span>
                            <span class="muted">{format_clock(s.time)}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
        .into_any()
}

/// Number of completions listed under recent activity.
const RECENT_ACTIVITY: usize = 5;

#[component]
fn ProgressPage() -> impl IntoView {
    let toaster = use_toaster();
    let progress = Resource::new(|| (), |_| get_user_progress());
    let achievements = Resource::new(|| (), |_| get_achievements());

    Effect::new(move || {
        if let Some(Err(e)) = progress.get() {
            error!("Failed to load progress: {}", e);
            toaster.error("Failed to load progress");
        }
    });

    let reset = Callback::new(move |_: ()| {
        if !leptos::leptos_dom::helpers::window()
            .confirm_with_message("Reset all progress? This cannot be undone.")
            .unwrap_or(false)
        {
            return;
        }
        spawn_local(async move {
            match reset_progress().await {
                Ok(_) => {
                    progress.refetch();
                    achievements.refetch();
                    toaster.success("Progress reset");
                }
                Err(e) => {
                    error!("Failed to reset progress: {}", e);
                    toaster.error("Failed to reset progress");
                }
            }
        });
    });

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Your Progress"</h1>
                <Button variant=ButtonVariant::Outline on_click=reset>
                    "Reset Progress"
                </Button>
            </div>
            <Suspense fallback=|| view! { <LoadingState message="Loading progress..." /> }>
                {move || {
                    progress
                        .with(|res| match res {
                            Some(Ok(progress)) => {
                                view! {
                                    <StatCards progress=progress.clone() />
                                    <RecentActivity progress=progress.clone() />
                                }
                                    .into_any()
                            }
                            Some(Err(e)) => {
                                view! {
                                    <ErrorState
                                        message=e.to_string()
                                        on_retry=Callback::new(move |_| progress.refetch())
                                    />
                                }
                                    .into_any()
                            }
                            None => view! { <LoadingState /> }.into_any(),
                        })
                }}
            </Suspense>
            <Suspense>
                {move || {
                    achievements
                        .with(|res| match res {
                            Some(Ok(list)) => {
                                view! { <AchievementGrid achievements=list.clone() /> }.into_any()
                            }
                            _ => ().into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn StatCards(progress: UserProgress) -> impl IntoView {
    let average = if progress.puzzles_completed > 0 {
        let secs = progress.total_time / u64::from(progress.puzzles_completed);
        format_clock(u32::try_from(secs).unwrap_or(u32::MAX))
    } else {
        format_clock(0)
    };
    let stats = [
        ("🧩", "Puzzles Completed", progress.puzzles_completed.to_string()),
        ("⏱", "Total Time", format_duration(progress.total_time)),
        ("🔥", "Current Streak", format!("{} days", progress.current_streak)),
        ("📊", "Average Time", average),
    ];

    view! {
        <section class="stat-grid">
            {stats
                .into_iter()
                .map(|(icon, label, value)| {
                    view! {
                        <Card class="stat-card">
                            <div class="stat-icon">{icon}</div>
                            <div class="stat-value">{value}</div>
                            <div class="muted">{label}</div>
                        </Card>
                    }
                })
                .collect_view()}
        </section>
    }
}

#[component]
fn AchievementGrid(achievements: Vec<AchievementStatus>) -> impl IntoView {
    view! {
        <section>
            <h2>"Achievements"</h2>
            <div class="achievement-grid">
                {achievements
                    .into_iter()
                    .map(|a| {
                        view! {
                            <Card class=if a.earned { "achievement earned" } else { "achievement" }>
                                <div class="achievement-icon">{a.icon}</div>
                                <h3>{a.title}</h3>
                                <p class="muted">{a.description}</p>
                                <progress max=a.threshold value=a.progress></progress>
                                <span class="muted">
                                    {format!("{} / {}", a.progress, a.threshold)}
                                </span>
                            </Card>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn RecentActivity(progress: UserProgress) -> impl IntoView {
    let recent = progress.recent(RECENT_ACTIVITY);
    let last_played = progress
        .last_played
        .map(|t| t.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Never".to_string());

    view! {
        <section>
            <div class="section-header">
                <h2>"Recent Activity"</h2>
                <span class="muted">{format!("Last played: {}", last_played)}</span>
            </div>
            {if recent.is_empty() {
                view! {
                    <EmptyState
                        icon="📭"
                        title="No puzzles completed yet"
                        message="Finish a puzzle and it will show up here."
                    />
                }
                    .into_any()
            } else {
                view! {
                    <Card class="activity-list">
                        {recent
                            .into_iter()
                            .map(|c| {
                                view! {
                                    <div class="activity-row">
                                        <div>
                                            <div class="player-name">{c.title}</div>
                                            <div class="muted">
                                                {format!(
                                                    "{} · {}",
                                                    c.puzzle_type.label(),
                                                    c.completed_at.format("%b %-d, %Y"),
                                                )}
                                            </div>
                                        </div>
                                        <DifficultyBadge difficulty=c.difficulty />
                                        <div class="leaderboard-score">
                                            <div class="score">{c.score}</div>
                                            <div class="muted">{format_clock(c.completion_time)}</div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </Card>
                }
                    .into_any()
            }}
        </section>
    }
}

#[component]
fn LeaderboardPage() -> impl IntoView {
    let toaster = use_toaster();
    let selected_type = RwSignal::new(None::<PuzzleType>);
    let scores = Resource::new(
        move || selected_type.get(),
        |puzzle_type| get_top_scores(puzzle_type, DEFAULT_TOP_SCORES_LIMIT),
    );
    let rank = Resource::new(
        move || selected_type.get(),
        |puzzle_type| get_user_rank(LOCAL_PLAYER.to_string(), puzzle_type),
    );

    Effect::new(move || {
        if let Some(Err(e)) = scores.get() {
            error!("Failed to load leaderboard: {}", e);
            toaster.error("Failed to load leaderboard");
        }
    });

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Leaderboard"</h1>
                <Suspense>
                    {move || {
                        rank.with(|res| match res {
                            Some(Ok(Some(rank))) => {
                                view! { <span class="pill">{format!("Your rank: #{}", rank)}</span> }
                                    .into_any()
                            }
                            Some(Ok(None)) => {
                                view! { <span class="pill">"Not ranked yet"</span> }.into_any()
                            }
                            _ => ().into_any(),
                        })
                    }}
                </Suspense>
            </div>
            <TypeTabs selected=selected_type />
            <Transition fallback=|| view! { <LoadingState message="Loading scores..." /> }>
                {move || {
                    scores
                        .with(|res| match res {
                            Some(Ok(entries)) if entries.is_empty() => {
                                view! {
                                    <EmptyState
                                        icon="🏆"
                                        title="No scores yet"
                                        message="Complete a puzzle to claim the top spot."
                                    />
                                }
                                    .into_any()
                            }
                            Some(Ok(entries)) => {
                                let entries = entries.clone();
                                view! {
                                    <Card class="leaderboard">
                                        {entries
                                            .into_iter()
                                            .enumerate()
                                            .map(|(i, entry)| {
                                                let highlighted = entry.player_name == LOCAL_PLAYER;
                                                view! { <LeaderboardRow entry rank=i + 1 highlighted /> }
                                            })
                                            .collect_view()}
                                    </Card>
                                }
                                    .into_any()
                            }
                            Some(Err(e)) => {
                                view! {
                                    <ErrorState
                                        message=e.to_string()
                                        on_retry=Callback::new(move |_| scores.refetch())
                                    />
                                }
                                    .into_any()
                            }
                            None => view! { <LoadingState /> }.into_any(),
                        })
                }}
            </Transition>
        </div>
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum GameState {
    Playing,
    Paused,
    Completed,
}

/// Per-visit state of the play screen.
#[derive(Copy, Clone)]
struct PlaySession {
    game_state: RwSignal<GameState>,
    elapsed: RwSignal<u32>,
    show_modal: RwSignal<bool>,
    summary: RwSignal<Option<CompletionSummary>>,
}

impl PlaySession {
    fn new() -> Self {
        PlaySession {
            game_state: RwSignal::new(GameState::Playing),
            elapsed: RwSignal::new(0),
            show_modal: RwSignal::new(false),
            summary: RwSignal::new(None),
        }
    }

    /// Starts the clock from zero and clears any result from a previous attempt.
    fn reset(&self) {
        self.elapsed.set(0);
        self.game_state.set(GameState::Playing);
        self.show_modal.set(false);
        self.summary.set(None);
    }
}

#[component]
fn PlayPage() -> impl IntoView {
    let toaster = use_toaster();
    let params = use_params_map();
    let puzzle_id = move || params.read().get("puzzle_id").unwrap_or_default();
    let puzzle = Resource::new(puzzle_id, get_puzzle);

    let current = RwSignal::new(None::<Puzzle>);
    let session = PlaySession::new();
    let PlaySession {
        game_state,
        elapsed,
        show_modal,
        summary,
    } = session;

    // A new puzzle id starts a fresh attempt.
    Effect::new(move || match puzzle.get() {
        Some(Ok(p)) => {
            session.reset();
            current.set(Some(p));
        }
        Some(Err(e)) => {
            error!("Failed to load puzzle: {}", e);
            current.set(None);
            toaster.error("Failed to load puzzle");
        }
        None => {}
    });

    // The clock only runs while a loaded puzzle is being played.
    Effect::new(move || {
        let tick = move || {
            let loaded = current.with_untracked(Option::is_some);
            if loaded && game_state.get_untracked() == GameState::Playing {
                elapsed.update(|secs| *secs += 1);
            }
        };
        if let Ok(handle) = set_interval_with_handle(tick, Duration::from_secs(1)) {
            on_cleanup(move || handle.clear());
        }
    });

    let toggle_pause = Callback::new(move |_: ()| {
        game_state.update(|state| {
            *state = match *state {
                GameState::Playing => GameState::Paused,
                GameState::Paused => GameState::Playing,
                GameState::Completed => GameState::Completed,
            }
        });
    });

    let restart = Callback::new(move |_: ()| {
        session.reset();
        toaster.info("Puzzle restarted");
    });

    let complete = Callback::new(move |_: ()| {
        let Some(p) = current.get_untracked() else {
            return;
        };
        if game_state.get_untracked() == GameState::Completed {
            return;
        }
        let secs = elapsed.get_untracked();
        game_state.set(GameState::Completed);
        show_modal.set(true);

        spawn_local(async move {
            match complete_puzzle(p.id.clone(), secs).await {
                Ok(result) => {
                    log!("Recorded {} for {} points", result.score, p.title);
                    if result.daily_challenge {
                        toaster.success("Daily challenge score submitted!");
                    } else {
                        toaster.success("Puzzle completed! Progress saved.");
                    }
                    summary.set(Some(result));
                }
                Err(e) => {
                    error!("Failed to record completion of {}: {}", p.id, e);
                    toaster.error("Puzzle completed, but saving progress failed");
                }
            }
        });
    });

    view! {
        <div class="play-page">
            <Suspense fallback=|| view! { <LoadingState message="Loading puzzle..." /> }>
                {move || {
                    puzzle
                        .with(|res| match res {
                            Some(Ok(p)) => {
                                let icon = p.puzzle_type.icon();
                                let label = p.puzzle_type.label();
                                view! {
                                    <header class="play-header">
                                        <a class="btn btn-outline" href="/puzzles">
                                            "← Exit"
                                        </a>
                                        <div class="play-title">
                                            <h1>{p.title.clone()}</h1>
                                            <DifficultyBadge difficulty=p.difficulty />
                                        </div>
                                        <div class="play-controls">
                                            <span class="timer">
                                                {move || format_clock(elapsed.get())}
                                            </span>
                                            <Button
                                                variant=ButtonVariant::Secondary
                                                disabled=Signal::derive(move || {
                                                    game_state.get() == GameState::Completed
                                                })
                                                on_click=toggle_pause
                                            >
                                                {move || {
                                                    if game_state.get() == GameState::Paused {
                                                        "Resume"
                                                    } else {
                                                        "Pause"
                                                    }
                                                }}
                                            </Button>
                                            <Button variant=ButtonVariant::Outline on_click=restart>
                                                "Restart"
                                            </Button>
                                        </div>
                                    </header>
                                    <Card class="play-area">
                                        <Show
                                            when=move || game_state.get() != GameState::Paused
                                            fallback=|| {
                                                view! {
                                                    <div class="paused">
                                                        <h2>"Paused"</h2>
                                                        <p class="muted">"The clock is stopped."</p>
                                                    </div>
                                                }
                                            }
                                        >
                                            <div class="placeholder">
                                                <div class="placeholder-icon">{icon}</div>
                                                <h2>{format!("{} puzzle board", label)}</h2>
                                                <p class="muted">
                                                    "Interactive puzzle mechanics are coming soon."
                                                </p>
                                                <Button
                                                    disabled=Signal::derive(move || {
                                                        game_state.get() != GameState::Playing
                                                    })
                                                    on_click=complete
                                                >
                                                    "Complete Puzzle (Demo)"
                                                </Button>
                                            </div>
                                        </Show>
                                    </Card>
                                }
                                    .into_any()
                            }
                            Some(Err(_)) => {
                                view! {
                                    <EmptyState
                                        icon="🧩"
                                        title="Puzzle not found"
                                        message="This puzzle does not exist or has been removed."
                                    />
                                    <a class="btn btn-primary" href="/puzzles">
                                        "Back to Puzzles"
                                    </a>
                                }
                                    .into_any()
                            }
                            None => view! { <LoadingState /> }.into_any(),
                        })
                }}
            </Suspense>
            <Show when=move || show_modal.get()>
                <CompletionModal elapsed=elapsed.get_untracked() summary restart />
            </Show>
        </div>
    }
}

#[component]
fn CompletionModal(
    elapsed: u32,
    summary: RwSignal<Option<CompletionSummary>>,
    restart: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <Card class="modal">
                <div class="modal-icon">"🎉"</div>
                <h2>"Puzzle Complete!"</h2>
                <div class="stat-row">
                    <div>
                        <div class="stat-value">{format_clock(elapsed)}</div>
                        <div class="muted">"Time"</div>
                    </div>
                    <div>
                        <div class="stat-value">
                            {move || {
                                summary
                                    .get()
                                    .map(|s| s.score.to_string())
                                    .unwrap_or_else(|| "…".to_string())
                            }}
                        </div>
                        <div class="muted">"Score"</div>
                    </div>
                    <div>
                        <div class="stat-value">
                            {move || {
                                summary
                                    .get()
                                    .and_then(|s| s.rank)
                                    .map(|rank| format!("#{}", rank))
                                    .unwrap_or_else(|| "-".to_string())
                            }}
                        </div>
                        <div class="muted">"Rank"</div>
                    </div>
                </div>
                <div class="modal-actions">
                    <Button variant=ButtonVariant::Secondary on_click=restart>
                        "Play Again"
                    </Button>
                    <a class="btn btn-primary" href="/puzzles">
                        "More Puzzles"
                    </a>
                </div>
            </Card>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <EmptyState
                icon="🧭"
                title="Page not found"
                message="The page you are looking for does not exist."
            />
            <a class="btn btn-primary" href="/puzzles">
                "Browse Puzzles"
            </a>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_session_reset_clears_previous_result() {
        let owner = Owner::new();
        owner.set();

        let session = PlaySession::new();
        session.elapsed.set(95);
        session.game_state.set(GameState::Completed);
        session.show_modal.set(true);
        session.summary.set(Some(CompletionSummary {
            score: 305,
            rank: Some(2),
            daily_challenge: false,
            progress: UserProgress::default(),
        }));

        session.reset();
        assert_eq!(session.elapsed.get_untracked(), 0);
        assert_eq!(session.game_state.get_untracked(), GameState::Playing);
        assert!(!session.show_modal.get_untracked());
        assert_eq!(session.summary.get_untracked(), None);
    }
}

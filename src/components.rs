use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::model::{format_clock, Difficulty, LeaderboardEntry, Puzzle, PuzzleType};

/// How long a toast stays on screen.
pub const TOAST_TIMEOUT_MS: u32 = 3000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Info => "toast toast-info",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Handle for raising toast notifications. Provided once by `App` and shared through context.
#[derive(Copy, Clone)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Toaster {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Shows a toast and schedules its removal. Only call this from the browser (event handlers,
    /// effects, or tasks they spawn).
    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            toasts.update(|toasts| toasts.retain(|t| t.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Toaster::new()
    }
}

pub fn use_toaster() -> Toaster {
    expect_context::<Toaster>()
}

#[component]
pub fn ToastContainer() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast-container">
            {move || {
                toaster
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.class() on:click=move |_| toaster.dismiss(id)>
                                {toast.message}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(into, optional)] disabled: Signal<bool>,
    on_click: Callback<()>,
    children: Children,
) -> impl IntoView {
    let class = match variant {
        ButtonVariant::Primary => "btn btn-primary",
        ButtonVariant::Secondary => "btn btn-secondary",
        ButtonVariant::Outline => "btn btn-outline",
    };
    view! {
        <button class=class disabled=move || disabled.get() on:click=move |_| on_click.run(())>
            {children()}
        </button>
    }
}

#[component]
pub fn Card(#[prop(into, optional)] class: String, children: Children) -> impl IntoView {
    view! { <div class=format!("card {}", class)>{children()}</div> }
}

#[component]
pub fn DifficultyBadge(difficulty: Difficulty) -> impl IntoView {
    let class = match difficulty {
        Difficulty::Easy => "badge badge-easy",
        Difficulty::Medium => "badge badge-medium",
        Difficulty::Hard => "badge badge-hard",
    };
    view! { <span class=class>{difficulty.as_str()}</span> }
}

/// Catalog tile for a single puzzle. Clicking it opens the play screen.
#[component]
pub fn PuzzleCard(puzzle: Puzzle) -> impl IntoView {
    view! {
        <a class="puzzle-card" href=format!("/play/{}", puzzle.id)>
            <Card>
                <div class="puzzle-thumb">
                    <img src=puzzle.thumbnail.clone() alt=puzzle.title.clone() />
                    <div class="puzzle-thumb-badge">
                        <DifficultyBadge difficulty=puzzle.difficulty />
                    </div>
                    <div class="puzzle-thumb-play">"▶"</div>
                </div>
                <div class="puzzle-card-body">
                    <h3>{puzzle.title.clone()}</h3>
                    <p class="muted">{format!("{} Puzzle", puzzle.puzzle_type.label())}</p>
                </div>
            </Card>
        </a>
    }
}

#[component]
pub fn PuzzleTypeCard(
    puzzle_type: PuzzleType,
    count: usize,
    selected: RwSignal<Option<PuzzleType>>,
) -> impl IntoView {
    view! {
        <div
            class=move || {
                if selected.get() == Some(puzzle_type) {
                    "type-card type-card-active"
                } else {
                    "type-card"
                }
            }
            on:click=move |_| selected.set(Some(puzzle_type))
        >
            <div class=format!("type-icon type-icon-{}", puzzle_type.as_str())>
                {puzzle_type.icon()}
            </div>
            <h3>{puzzle_type.label()}</h3>
            <p class="muted">{format!("{} puzzles available", count)}</p>
        </div>
    }
}

/// Row of tabs selecting a puzzle type, with an "All Puzzles" tab for `None`.
#[component]
pub fn TypeTabs(selected: RwSignal<Option<PuzzleType>>) -> impl IntoView {
    let tab_class = move |value: Option<PuzzleType>| {
        move || {
            if selected.get() == value {
                "tab tab-active"
            } else {
                "tab"
            }
        }
    };

    view! {
        <div class="tabs">
            <button class=tab_class(None) on:click=move |_| selected.set(None)>
                "All Puzzles"
            </button>
            {PuzzleType::ALL
                .into_iter()
                .map(|t| {
                    view! {
                        <button class=tab_class(Some(t)) on:click=move |_| selected.set(Some(t))>
                            {t.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn PuzzleGridSection(#[prop(into)] title: String, puzzles: Vec<Puzzle>) -> impl IntoView {
    let count = puzzles.len();
    view! {
        <section>
            <div class="section-header">
                <h2>{title}</h2>
                <span class="muted">{format!("{} available", count)}</span>
            </div>
            {if puzzles.is_empty() {
                view! { <EmptyState icon="🔍" message="No puzzles found for this type" /> }
                    .into_any()
            } else {
                view! {
                    <div class="puzzle-grid">
                        {puzzles
                            .into_iter()
                            .map(|puzzle| view! { <PuzzleCard puzzle /> })
                            .collect_view()}
                    </div>
                }
                    .into_any()
            }}
        </section>
    }
}

/// A ranked row on a leaderboard. Ranks 1-3 get medal colours.
#[component]
pub fn LeaderboardRow(entry: LeaderboardEntry, rank: usize, highlighted: bool) -> impl IntoView {
    let medal = match rank {
        1 => "rank rank-gold",
        2 => "rank rank-silver",
        3 => "rank rank-bronze",
        _ => "rank",
    };
    view! {
        <div class=if highlighted { "leaderboard-row highlighted" } else { "leaderboard-row" }>
            <div class="leaderboard-player">
                <div class=medal>{rank}</div>
                <div>
                    <div class="player-name">{entry.player_name.clone()}</div>
                    <div class="muted">{format!("{} Expert", entry.puzzle_type.label())}</div>
                </div>
            </div>
            <div class="leaderboard-score">
                <div class="score">{entry.score}</div>
                <div class="muted">{format_clock(entry.time)}</div>
            </div>
        </div>
    }
}

#[component]
pub fn LoadingState(#[prop(into, default = "Loading...".to_string())] message: String) -> impl IntoView {
    view! {
        <div class="loading-state">
            <div class="spinner"></div>
            <p class="muted">{message}</p>
        </div>
    }
}

#[component]
pub fn ErrorState(#[prop(into)] message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="state-panel">
            <div class="state-icon error-icon">"⚠"</div>
            <h3>"Something went wrong"</h3>
            <p class="muted">{message}</p>
            <Button on_click=on_retry>"Try Again"</Button>
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)] icon: String,
    #[prop(into, optional)] title: Option<String>,
    #[prop(into)] message: String,
) -> impl IntoView {
    view! {
        <div class="state-panel">
            <div class="state-icon">{icon}</div>
            {title.map(|title| view! { <h3>{title}</h3> })}
            <p class="muted">{message}</p>
        </div>
    }
}

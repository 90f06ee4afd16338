#[cfg(feature = "ssr")]
use puzzle_hub::config::{ServiceConfig, FIXTURES_DIR_VAR};
#[cfg(feature = "ssr")]
use puzzle_hub::services::daily;
#[cfg(feature = "ssr")]
use puzzle_hub::services::puzzles::get_puzzle;

#[cfg(feature = "ssr")]
fn main() {
    let config = ServiceConfig::from_env().expect("Invalid service configuration");
    match &config.fixtures_dir {
        Some(dir) => println!("Checking fixtures in {}", dir.display()),
        None => println!("Checking embedded fixtures (set {} to override)", FIXTURES_DIR_VAR),
    }

    // Loading also rejects daily challenges whose top scores exceed the cap or are out of order.
    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("puzzles:          {}", catalog.puzzles.len());
    println!("leaderboard:      {}", catalog.leaderboard.len());
    println!("daily challenges: {}", catalog.daily_challenges.len());
    println!(
        "progress:         {} completed, streak {}",
        catalog.progress.puzzles_completed, catalog.progress.current_streak
    );

    // Every challenge must point at a puzzle that exists.
    let dangling: Vec<_> = daily::get_challenge_history(&catalog)
        .into_iter()
        .filter(|c| get_puzzle(&catalog, &c.puzzle_id).is_err())
        .collect();
    for challenge in &dangling {
        eprintln!(
            "challenge {} refers to unknown puzzle {}",
            challenge.id, challenge.puzzle_id
        );
    }
    if !dangling.is_empty() {
        std::process::exit(1);
    }
    println!("All fixtures OK.");
}

#[cfg(not(feature = "ssr"))]
fn main() {
    println!("This binary requires the 'ssr' feature to be enabled.");
}

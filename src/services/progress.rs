use crate::catalog::Catalog;
use crate::model::{Completion, UserProgress};

pub fn get_user_progress(catalog: &Catalog) -> UserProgress {
    catalog.progress.clone()
}

/// Adds a completion to the history, updating the totals and the daily streak.
pub fn record_completion(catalog: &mut Catalog, completion: Completion) -> UserProgress {
    catalog.progress.record(completion);
    catalog.progress.clone()
}

/// Overrides the current streak.
pub fn update_streak(catalog: &mut Catalog, streak: u32) -> UserProgress {
    catalog.progress.current_streak = streak;
    catalog.progress.clone()
}

pub fn reset_progress(catalog: &mut Catalog) -> UserProgress {
    catalog.progress.reset();
    catalog.progress.clone()
}

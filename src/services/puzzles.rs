use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{Difficulty, NewPuzzle, Puzzle, PuzzleType, PuzzleUpdate};

/// Returns every puzzle in catalog order.
pub fn get_all_puzzles(catalog: &Catalog) -> Vec<Puzzle> {
    catalog.puzzles.clone()
}

/// Looks up a single puzzle. Unknown ids are an error, never a placeholder puzzle.
pub fn get_puzzle(catalog: &Catalog, id: &str) -> Result<Puzzle, CatalogError> {
    catalog
        .puzzles
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| CatalogError::PuzzleNotFound(id.to_string()))
}

pub fn get_puzzles_by_type(catalog: &Catalog, puzzle_type: PuzzleType) -> Vec<Puzzle> {
    catalog
        .puzzles
        .iter()
        .filter(|p| p.puzzle_type == puzzle_type)
        .cloned()
        .collect()
}

pub fn get_puzzles_by_difficulty(catalog: &Catalog, difficulty: Difficulty) -> Vec<Puzzle> {
    catalog
        .puzzles
        .iter()
        .filter(|p| p.difficulty == difficulty)
        .cloned()
        .collect()
}

/// Adds a puzzle to the end of the catalog under the given id.
pub fn create_puzzle(
    catalog: &mut Catalog,
    new_puzzle: NewPuzzle,
    id: String,
    now: DateTime<Utc>,
) -> Puzzle {
    let puzzle = new_puzzle.into_puzzle(id, now);
    catalog.puzzles.push(puzzle.clone());
    puzzle
}

/// Merges the present fields of `update` into an existing puzzle and returns the result.
pub fn update_puzzle(
    catalog: &mut Catalog,
    id: &str,
    update: PuzzleUpdate,
) -> Result<Puzzle, CatalogError> {
    let puzzle = catalog
        .puzzles
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| CatalogError::PuzzleNotFound(id.to_string()))?;
    puzzle.apply(update);
    Ok(puzzle.clone())
}

/// Removes a puzzle and returns it.
pub fn delete_puzzle(catalog: &mut Catalog, id: &str) -> Result<Puzzle, CatalogError> {
    let index = catalog
        .puzzles
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| CatalogError::PuzzleNotFound(id.to_string()))?;
    Ok(catalog.puzzles.remove(index))
}

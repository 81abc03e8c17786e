//! Name-based lookup.
//!
//! Candidate computation is pure; only the multi-match case consults a
//! [`Chooser`], and its raw answer is validated here.

use crate::domain::error::StoreError;
use crate::domain::model::{Candidate, Position, Store};
use crate::domain::traits::Chooser;

/// Every position whose bookmark name equals `name`, in scan order
/// (category ascending, then bookmark ascending).
pub fn find_candidates(store: &Store, name: &str) -> Vec<Position> {
    store
        .categories
        .iter()
        .enumerate()
        .flat_map(|(cat_idx, category)| {
            category
                .bookmarks
                .iter()
                .enumerate()
                .filter(move |(_, bookmark)| bookmark.name == name)
                .map(move |(bm_idx, _)| Position::new(cat_idx, bm_idx))
        })
        .collect()
}

pub fn describe_candidates<'a>(
    store: &'a Store,
    positions: &[Position],
) -> Result<Vec<Candidate<'a>>, StoreError> {
    positions
        .iter()
        .map(|&position| -> Result<Candidate<'a>, StoreError> {
            Ok(Candidate {
                position,
                category: &store.category(position.category)?.label,
                bookmark: store.bookmark(position)?,
            })
        })
        .collect()
}

/// Interpret `input` as a zero-based index into `positions`.
pub fn pick_candidate(positions: &[Position], input: &str) -> Result<Position, StoreError> {
    let invalid = || StoreError::AmbiguousSelection {
        input: input.to_string(),
        candidates: positions.len(),
    };
    let index: usize = input.trim().parse().map_err(|_| invalid())?;
    positions.get(index).copied().ok_or_else(invalid)
}

pub fn find_by_name(
    store: &Store,
    name: &str,
    chooser: &mut dyn Chooser,
) -> Result<Position, StoreError> {
    let positions = find_candidates(store, name);
    match positions.as_slice() {
        [] => Err(StoreError::NotFound {
            name: name.to_string(),
        }),
        [only] => Ok(*only),
        _ => {
            let candidates = describe_candidates(store, &positions)?;
            let answer = chooser.choose(name, &candidates)?;
            tracing::debug!(%name, %answer, candidates = positions.len(), "disambiguation answer");
            pick_candidate(&positions, &answer)
        }
    }
}

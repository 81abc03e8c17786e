use crate::domain::error::StoreError;
use crate::domain::model::{Bookmark, Category, Position, Store};
use crate::domain::traits::BrowserLauncher;

/// Parse a typed-in index. Anything that is not a non-negative integer is a bounds error.
pub fn parse_index(what: &'static str, input: &str, len: usize) -> Result<usize, StoreError> {
    input.trim().parse().map_err(|_| StoreError::Bounds {
        what,
        input: input.to_string(),
        len,
    })
}

pub fn select_bookmark(
    store: &Store,
    pos: Position,
) -> Result<(&Category, &Bookmark), StoreError> {
    Ok((store.category(pos.category)?, store.bookmark(pos)?))
}

/// Resolve both typed-in indices against the store, then open the bookmark's URL.
pub fn open_bookmark<'a>(
    store: &'a Store,
    category_input: &str,
    bookmark_input: &str,
    launcher: &dyn BrowserLauncher,
) -> Result<(&'a Category, &'a Bookmark), StoreError> {
    let category = parse_index("category", category_input, store.categories.len())?;
    let bookmarks = store.category(category)?.bookmarks.len();
    let bookmark = parse_index("bookmark", bookmark_input, bookmarks)?;

    let selected = select_bookmark(store, Position::new(category, bookmark))?;
    launcher.launch(&selected.1.url)?;
    Ok(selected)
}

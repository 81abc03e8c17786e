use crate::domain::error::StoreError;
use crate::domain::model::{Bookmark, Category, Position, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Appended { category: usize },
    CreatedCategory { category: usize },
}

impl AddOutcome {
    pub fn category(self) -> usize {
        match self {
            AddOutcome::Appended { category } | AddOutcome::CreatedCategory { category } => {
                category
            }
        }
    }
}

/// Field replacements for an edit. `None` and empty strings both keep the current value,
/// so a field cannot be cleared through an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl BookmarkUpdate {
    pub fn from_answers(name: String, url: String, description: String) -> Self {
        let keep_if_empty = |s: String| Some(s).filter(|s| !s.is_empty());
        Self {
            name: keep_if_empty(name),
            url: keep_if_empty(url),
            description: keep_if_empty(description),
        }
    }

    pub fn is_noop(&self) -> bool {
        [&self.name, &self.url, &self.description]
            .iter()
            .all(|f| f.as_deref().map_or(true, str::is_empty))
    }
}

pub fn add_bookmark(store: &mut Store, label: &str, bookmark: Bookmark) -> AddOutcome {
    match store.category_index(label) {
        Some(category) => {
            store.categories[category].bookmarks.push(bookmark);
            AddOutcome::Appended { category }
        }
        None => {
            store
                .categories
                .push(Category::with_bookmark(label, bookmark));
            AddOutcome::CreatedCategory {
                category: store.categories.len() - 1,
            }
        }
    }
}

pub fn edit_bookmark<'a>(
    store: &'a mut Store,
    pos: Position,
    update: BookmarkUpdate,
) -> Result<&'a Bookmark, StoreError> {
    let bookmark = store.bookmark_mut(pos)?;
    apply(&mut bookmark.name, update.name);
    apply(&mut bookmark.url, update.url);
    apply(&mut bookmark.description, update.description);
    Ok(bookmark)
}

fn apply(field: &mut String, update: Option<String>) {
    if let Some(value) = update.filter(|v| !v.is_empty()) {
        *field = value;
    }
}

/// Remove the bookmark at `pos`; later bookmarks shift left and the category stays,
/// even when it ends up empty.
pub fn delete_bookmark(store: &mut Store, pos: Position) -> Result<Bookmark, StoreError> {
    store.bookmark(pos)?;
    Ok(store.categories[pos.category].bookmarks.remove(pos.bookmark))
}

use crate::domain::model::Store;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub categories: usize,
    pub empty_categories: usize,
    pub bookmarks: usize,
}

impl StoreStats {
    pub fn of(store: &Store) -> Self {
        Self {
            categories: store.categories.len(),
            empty_categories: store.categories.iter().filter(|c| c.is_empty()).count(),
            bookmarks: store.bookmark_count(),
        }
    }
}

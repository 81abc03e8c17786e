use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    StoreLoaded {
        categories: usize,
        bookmarks: usize,
    },

    CategoryCreated {
        category: String,
    },

    BookmarkAdded {
        category: String,
        name: String,
        url: String,
    },

    BookmarkEdited {
        category: String,
        name: String,
    },

    BookmarkDeleted {
        category: String,
        name: String,
    },

    StorePersisted {
        bytes: usize,
    },
}

use crate::domain::error::StoreError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl Bookmark {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Url: {}, Description: {}",
            self.name, self.url, self.description
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "type")]
    pub label: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub bookmarks: Vec<Bookmark>,
}

impl Category {
    pub fn with_bookmark(label: impl Into<String>, bookmark: Bookmark) -> Self {
        Self {
            label: label.into(),
            bookmarks: vec![bookmark],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Category: '{}' has {} bookmarks.",
            self.label,
            self.bookmarks.len()
        )
    }
}

// Older documents may carry `"bookmarks": null` for a category.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Bookmark>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Bookmark>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The whole bookmark collection, persisted as a top-level JSON array of categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    pub categories: Vec<Category>,
}

impl Store {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn bookmark_count(&self) -> usize {
        self.categories.iter().map(|c| c.bookmarks.len()).sum()
    }

    pub fn category_index(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.label == label)
    }

    pub fn category(&self, index: usize) -> Result<&Category, StoreError> {
        let len = self.categories.len();
        self.categories
            .get(index)
            .ok_or_else(|| StoreError::out_of_range("category", index, len))
    }

    pub fn bookmark(&self, pos: Position) -> Result<&Bookmark, StoreError> {
        let category = self.category(pos.category)?;
        let len = category.bookmarks.len();
        category
            .bookmarks
            .get(pos.bookmark)
            .ok_or_else(|| StoreError::out_of_range("bookmark", pos.bookmark, len))
    }

    pub fn bookmark_mut(&mut self, pos: Position) -> Result<&mut Bookmark, StoreError> {
        let len = self.categories.len();
        let category = self
            .categories
            .get_mut(pos.category)
            .ok_or_else(|| StoreError::out_of_range("category", pos.category, len))?;
        let len = category.bookmarks.len();
        category
            .bookmarks
            .get_mut(pos.bookmark)
            .ok_or_else(|| StoreError::out_of_range("bookmark", pos.bookmark, len))
    }
}

/// Location of one bookmark inside a loaded [`Store`].
///
/// Positions shift after every structural mutation, so they are only valid
/// against the store they were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub category: usize,
    pub bookmark: usize,
}

impl Position {
    pub fn new(category: usize, bookmark: usize) -> Self {
        Self { category, bookmark }
    }
}

/// A same-named bookmark offered to the user during disambiguation.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub position: Position,
    pub category: &'a str,
    pub bookmark: &'a Bookmark,
}

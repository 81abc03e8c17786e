use crate::domain::error::StoreError;
use crate::domain::model::{Bookmark, Position, Store};
use crate::infrastructure::serde_json_adapter::{render_store, StoreFile};
use crate::usecase::event::AppEvent;
use crate::usecase::mutate::{self, AddOutcome, BookmarkUpdate};
use std::path::Path;
use tokio::sync::mpsc;

/// Owns the loaded store and its backing file for one invocation.
///
/// Every mutating call changes the in-memory store and then persists the whole
/// collection. When the persist fails the store is kept and the error carries a
/// serialized copy of it.
pub struct Session {
    store: Store,
    file: StoreFile,
    sink: Option<mpsc::Sender<AppEvent>>,
}

impl Session {
    pub async fn open(
        mut file: StoreFile,
        sink: Option<mpsc::Sender<AppEvent>>,
    ) -> Result<Self, StoreError> {
        let store = file.load().await?;
        Ok(Self::from_parts(store, file, sink).await)
    }

    pub async fn from_parts(
        store: Store,
        file: StoreFile,
        sink: Option<mpsc::Sender<AppEvent>>,
    ) -> Self {
        tracing::debug!(
            path = %file.path().display(),
            categories = store.categories.len(),
            "store loaded"
        );
        emit(
            &sink,
            AppEvent::StoreLoaded {
                categories: store.categories.len(),
                bookmarks: store.bookmark_count(),
            },
        )
        .await;
        Self { store, file, sink }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn add(
        &mut self,
        label: &str,
        bookmark: Bookmark,
    ) -> Result<AddOutcome, StoreError> {
        let added = AppEvent::BookmarkAdded {
            category: label.to_string(),
            name: bookmark.name.clone(),
            url: bookmark.url.clone(),
        };

        let outcome = mutate::add_bookmark(&mut self.store, label, bookmark);
        if let AddOutcome::CreatedCategory { .. } = outcome {
            emit(
                &self.sink,
                AppEvent::CategoryCreated {
                    category: label.to_string(),
                },
            )
            .await;
        }
        emit(&self.sink, added).await;

        self.persist().await?;
        Ok(outcome)
    }

    pub async fn edit(
        &mut self,
        pos: Position,
        update: BookmarkUpdate,
    ) -> Result<Bookmark, StoreError> {
        if update.is_noop() {
            tracing::debug!(?pos, "edit changes nothing; skipping persist");
            return Ok(self.store.bookmark(pos)?.clone());
        }

        let edited = mutate::edit_bookmark(&mut self.store, pos, update)?.clone();
        let category = self.store.category(pos.category)?.label.clone();
        emit(
            &self.sink,
            AppEvent::BookmarkEdited {
                category,
                name: edited.name.clone(),
            },
        )
        .await;

        self.persist().await?;
        Ok(edited)
    }

    /// Returns the owning category label and the removed bookmark.
    pub async fn delete(&mut self, pos: Position) -> Result<(String, Bookmark), StoreError> {
        let removed = mutate::delete_bookmark(&mut self.store, pos)?;
        let category = self.store.category(pos.category)?.label.clone();
        emit(
            &self.sink,
            AppEvent::BookmarkDeleted {
                category: category.clone(),
                name: removed.name.clone(),
            },
        )
        .await;

        self.persist().await?;
        Ok((category, removed))
    }

    async fn persist(&mut self) -> Result<(), StoreError> {
        match self.file.persist(&self.store).await {
            Ok(bytes) => {
                tracing::debug!(path = %self.file.path().display(), bytes, "store persisted");
                emit(&self.sink, AppEvent::StorePersisted { bytes }).await;
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %self.file.path().display(), error = ?err, "persist failed");
                Err(err.with_dump(render_store(&self.store).ok()))
            }
        }
    }
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}

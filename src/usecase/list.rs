use crate::domain::model::Store;
use std::fmt::Write;

/// Render every non-empty category followed by its bookmarks.
///
/// Indices are raw positions in the store, so they can be fed straight back
/// into a positional selection.
pub fn render_listing(store: &Store) -> String {
    let mut out = String::new();
    for (cat_idx, category) in store.categories.iter().enumerate() {
        if category.is_empty() {
            continue;
        }

        // Writing into a String cannot fail.
        let _ = writeln!(out, "{cat_idx} {category}");
        for (bm_idx, bookmark) in category.bookmarks.iter().enumerate() {
            let _ = writeln!(out, "--> {bm_idx} {bookmark}");
        }
        out.push('\n');
    }
    out
}

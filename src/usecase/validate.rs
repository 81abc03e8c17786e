use crate::domain::error::StoreError;
use crate::domain::model::Store;
use crate::infrastructure::schema_validator::validate_store_document;
use serde_json::Value;
use std::collections::BTreeMap;

/// Check raw document bytes: JSON syntax, schema, then store invariants.
pub fn validate_document(bytes: &[u8]) -> Result<Store, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Store::default());
    }

    let document: Value = serde_json::from_slice(bytes).map_err(StoreError::Parse)?;
    validate_store_document(&document)?;
    let store: Store = serde_json::from_value(document).map_err(StoreError::Parse)?;
    validate_store(&store)?;
    Ok(store)
}

pub fn validate_store(store: &Store) -> Result<(), StoreError> {
    let document = serde_json::to_value(store).map_err(StoreError::Encode)?;
    validate_store_document(&document)?;

    // Category labels are the grouping key and must not repeat.
    let mut owner: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, category) in store.categories.iter().enumerate() {
        if let Some(&first) = owner.get(category.label.as_str()) {
            return Err(StoreError::DuplicateCategory {
                label: category.label.clone(),
                first,
                second: idx,
            });
        }
        owner.insert(&category.label, idx);
    }

    Ok(())
}

use crate::domain::error::StoreError;
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::Value;

static STORE_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/store_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid store schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile store schema")
});

/// Validate a whole bookmarks document against the bundled store schema
pub fn validate_store_document(document: &Value) -> Result<(), StoreError> {
    match STORE_SCHEMA.validate(document) {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_list: Vec<String> = errors
                .map(|e| format!("{} (at {})", e, e.instance_path))
                .collect();
            Err(StoreError::Schema(error_list.join("\n")))
        }
    }
}

// Infrastructure layer: adapters, file I/O, serde, eventing, terminal and OS glue
pub mod browser;
pub mod config_dir;
pub mod event_ndjson;
pub mod schema_validator;
pub mod serde_json_adapter;
pub mod terminal_prompt;
pub mod url_normalizer;

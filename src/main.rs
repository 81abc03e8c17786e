//! Binary entrypoint.
//!
//! The crate is split into Clean Architecture layers:
//! - domain: the bookmark collection, errors and ports
//! - usecase: resolution, mutations, the persisting session and events
//! - infrastructure: serde + async file IO, schema, terminal and OS adapters
//! - interface: CLI wiring

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    bookmark_manager::interface::cli::run().await
}

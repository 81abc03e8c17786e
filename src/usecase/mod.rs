//! Usecase layer: resolution, mutations and the session that persists them.

pub mod event;
pub mod list;
pub mod mutate;
pub mod resolve;
pub mod select;
pub mod session;
pub mod stats;
pub mod validate;

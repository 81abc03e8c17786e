//! Domain layer: the bookmark collection, its errors and the ports the usecases rely on.

pub mod error;
pub mod model;
pub mod traits;

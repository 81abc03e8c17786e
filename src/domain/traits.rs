use crate::domain::error::StoreError;
use crate::domain::model::Candidate;

pub trait UrlNormalizer {
    fn normalize(&self, raw: &str) -> String;
}

/// Picks one bookmark out of several sharing a name.
///
/// Implementations return the raw answer; the resolver parses and validates it.
pub trait Chooser {
    fn choose(&mut self, name: &str, candidates: &[Candidate<'_>]) -> Result<String, StoreError>;
}

pub trait BrowserLauncher {
    fn launch(&self, url: &str) -> Result<(), StoreError>;
}

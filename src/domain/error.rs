use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed bookmarks document")]
    Parse(#[source] serde_json::Error),

    #[error("encoding bookmarks document")]
    Encode(#[source] serde_json::Error),

    /// The document on disk no longer matches memory. `dump` holds the
    /// serialized in-memory collection so it can be recovered by hand.
    #[error("unable to write all bytes to {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
        dump: Option<String>,
    },

    #[error("no bookmark with the name '{name}' was found")]
    NotFound { name: String },

    #[error("invalid selection '{input}': pick a number between 0 and {}", .candidates.saturating_sub(1))]
    AmbiguousSelection { input: String, candidates: usize },

    #[error("{what} index '{input}' is out of range (have {len})")]
    Bounds {
        what: &'static str,
        input: String,
        len: usize,
    },

    #[error("opening a browser is not supported on {os}")]
    UnsupportedPlatform { os: String },

    #[error("bookmarks document failed schema validation:\n{0}")]
    Schema(String),

    #[error("category type must be unique: '{label}' (at {first} and {second})")]
    DuplicateCategory {
        label: String,
        first: usize,
        second: usize,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        StoreError::Bounds {
            what,
            input: index.to_string(),
            len,
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    /// Attaches the recovery dump to a write failure; other errors pass through.
    pub fn with_dump(self, contents: Option<String>) -> Self {
        match self {
            StoreError::Write { path, source, .. } => StoreError::Write {
                path,
                source,
                dump: contents,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_dump_only_touches_write_errors() {
        let err = StoreError::Write {
            path: "main.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            dump: None,
        }
        .with_dump(Some("[]".to_string()));
        assert!(matches!(err, StoreError::Write { dump: Some(ref d), .. } if d == "[]"));

        let err = StoreError::NotFound {
            name: "x".to_string(),
        }
        .with_dump(Some("[]".to_string()));
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn wrapped_errors_are_reported_once() {
        let parse = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let detail = parse.to_string();
        let err = anyhow::Error::new(StoreError::Parse(parse)).context("loading main.json");

        let chain = format!("{err:#}");
        assert_eq!(chain.matches(detail.as_str()).count(), 1, "{chain}");
        assert!(chain.starts_with("loading main.json: malformed bookmarks document: "));

        let closed = std::io::Error::new(std::io::ErrorKind::Other, "closed");
        let err = StoreError::io("reading answer", closed);
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain, "reading answer: closed");
    }

    #[test]
    fn selection_message_names_last_valid_index() {
        let err = StoreError::AmbiguousSelection {
            input: "7".to_string(),
            candidates: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid selection '7': pick a number between 0 and 2"
        );
    }
}

use crate::domain::traits::UrlNormalizer;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";
const WWW_DOT: &str = "www.";

/// Rewrites user input into `https://www.<rest>`.
///
/// This is a prefix heuristic, not a URL parser: a `www.` anywhere in the
/// string (even in the path) counts as already present.
pub struct HttpsWwwNormalizer;

impl UrlNormalizer for HttpsWwwNormalizer {
    fn normalize(&self, raw: &str) -> String {
        let url = match raw.strip_prefix(HTTP_PREFIX) {
            Some(rest) => format!("{HTTPS_PREFIX}{rest}"),
            None => raw.to_string(),
        };

        let has_https = url.starts_with(HTTPS_PREFIX);
        let has_www = url.contains(WWW_DOT);

        match (has_https, has_www) {
            (false, false) => format!("{HTTPS_PREFIX}{WWW_DOT}{url}"),
            (false, true) => format!("{HTTPS_PREFIX}{url}"),
            (true, false) => format!("{HTTPS_PREFIX}{WWW_DOT}{}", &url[HTTPS_PREFIX.len()..]),
            (true, true) => url,
        }
    }
}

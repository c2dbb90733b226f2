//! URL joining helpers.
//!
//! Inputs are never validated as URLs; they are only joined and
//! slash-collapsed.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// A slash run preceded by anything but ':' collapses to one slash, which
// leaves the `//` after a scheme intact.
static REPEATED_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^:]/)/+").expect("static regex is valid"));

/// Collapse runs of `/` into a single `/`, except directly after `scheme:`.
pub fn remove_double_slashes(url: &str) -> String {
    REPEATED_SLASHES.replace_all(url, "$1").into_owned()
}

/// Join `base` and `path` with a `/` and collapse the duplicate slashes.
///
/// ```
/// use typed_rest::compose_url;
///
/// assert_eq!(compose_url("http://x.com/", "//a//b"), "http://x.com/a/b");
/// ```
pub fn compose_url(base: &str, path: &str) -> String {
    remove_double_slashes(&format!("{base}/{path}"))
}

/// Prefix `http://` when `url` does not already start with `http`.
pub fn ensure_scheme(url: &str) -> Cow<'_, str> {
    if url.starts_with("http") {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("http://{url}"))
    }
}

//! Body and query-string encoding.
//!
//! Keys and values are percent-encoded independently with the same rules as
//! JavaScript's `encodeURIComponent`: ASCII alphanumerics and `- _ . ! ~ * ' ( )`
//! pass through, everything else (space included) becomes `%XX`.
//!
//! Input is never decoded first, so already-encoded text is encoded again
//! (`%20` becomes `%2520`). Callers must pass raw values.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped by [`encode_component`].
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// URI prefix stripped from local upload paths.
const FILE_SCHEME: &str = "file://";

/// Percent-encode a single key or value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Encode pairs as `key=value` joined by `&`, preserving order.
///
/// An empty slice yields an empty string.
pub fn form_body<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_component(key.as_ref()),
                encode_component(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Strip a leading `file://` from a local path reference.
pub fn strip_file_scheme(path: &str) -> &str {
    path.strip_prefix(FILE_SCHEME).unwrap_or(path)
}

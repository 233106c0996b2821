//! Percent-encoding helpers.
//!
//! Two flavours are needed: component encoding for values spliced into
//! hand-written URL templates (calendar links, QR requests), and
//! `application/x-www-form-urlencoded` serialization for query strings
//! built from key/value pairs (UTM parameters).

use url::form_urlencoded;

/// Percent-encode a single URL component.
///
/// Everything outside the RFC 3986 unreserved set (`A-Z a-z 0-9 - _ . ~`)
/// is escaped, including spaces (`%20`), `&`, `=`, `/` and `#`, so the
/// result can be dropped into any query value without re-encoding the
/// surrounding URL.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Serialize key/value pairs as a form-encoded query string (no leading `?`).
///
/// Spaces become `+`. Returns an empty string for no pairs.
pub fn form_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

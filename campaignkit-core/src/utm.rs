//! UTM tagging of landing-page URLs.

use url::Url;

use crate::encode::form_query;
use crate::error::ValidationError;

/// Common `utm_source` values offered by the form.
pub const SUGGESTED_SOURCES: &[&str] = &[
    "google",
    "facebook",
    "twitter",
    "linkedin",
    "instagram",
    "youtube",
    "email",
    "newsletter",
    "direct",
    "referral",
    "other",
];

/// Common `utm_medium` values offered by the form.
pub const SUGGESTED_MEDIUMS: &[&str] = &[
    "cpc",
    "organic",
    "social",
    "email",
    "display",
    "affiliate",
    "referral",
    "video",
    "banner",
    "other",
];

/// Tracking parameters. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub term: Option<String>,
    pub content: Option<String>,
}

impl UtmParams {
    /// Set parameters as `(utm_key, value)` in source, medium, campaign,
    /// term, content order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", &self.source),
            ("utm_medium", &self.medium),
            ("utm_campaign", &self.campaign),
            ("utm_term", &self.term),
            ("utm_content", &self.content),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }
}

/// Append UTM parameters to `base_url`, keeping its existing query and fragment.
/// With no parameters set the query is omitted entirely.
pub fn build_utm_url(base_url: &str, params: &UtmParams) -> Result<String, ValidationError> {
    if base_url.is_empty() {
        return Err(ValidationError::MissingBaseUrl);
    }

    let url = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %e, base_url, "rejected base URL");
            return Err(ValidationError::InvalidUrl);
        }
    };

    let origin = url.origin();
    if !origin.is_tuple() {
        tracing::debug!(base_url, "base URL has no origin");
        return Err(ValidationError::InvalidUrl);
    }

    let path = if url.path() == "/" && !has_explicit_path(base_url) {
        ""
    } else {
        url.path()
    };

    let utm_query = form_query(params.pairs());
    let existing_query = url.query().filter(|q| !q.is_empty());

    // Without UTM parameters the whole query is dropped, existing pairs included.
    let query = match (existing_query, utm_query.is_empty()) {
        (_, true) => String::new(),
        (Some(existing), false) => format!("?{}&{}", existing, utm_query),
        (None, false) => format!("?{}", utm_query),
    };

    let fragment = url
        .fragment()
        .filter(|f| !f.is_empty())
        .map(|f| format!("#{}", f))
        .unwrap_or_default();

    let result = format!("{}{}{}{}", origin.ascii_serialization(), path, query, fragment);
    tracing::debug!(%result, "built UTM URL");

    Ok(result)
}

/// Whether the user typed a path after the authority (`https://a.com/` vs `https://a.com`).
fn has_explicit_path(raw: &str) -> bool {
    let raw = raw.trim();
    let before_fragment = raw.split('#').next().unwrap_or(raw);
    let before_query = before_fragment.split('?').next().unwrap_or(before_fragment);
    let after_scheme = before_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(before_query);

    after_scheme.contains(['/', '\\'])
}

//! Log Redaction
//!
//! Subscriber URLs may carry basic-auth credentials or tokens in the query
//! string; free text may carry bearer tokens. Both are scrubbed before logging.

use std::sync::LazyLock;

use regex::Regex;

static USERINFO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<scheme>[a-zA-Z][a-zA-Z0-9+.\-]*://)[^/@?#\s]*@").unwrap());
static QUERY_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<key>[?&][^=&#]+)=[^&#]*").unwrap());
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});

/// Masks userinfo and query-string values of a URL, keeping scheme, host and path.
pub fn redact_url(url: &str) -> String {
    let without_userinfo = USERINFO_RE.replace_all(url, "${scheme}***@");
    QUERY_VALUE_RE
        .replace_all(&without_userinfo, "${key}=***")
        .into_owned()
}

/// Redacts API keys and bearer tokens in free text.
pub fn redact_sensitive_data(input: &str) -> String {
    API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]").into_owned()
}

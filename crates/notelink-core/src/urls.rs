//! URL helpers shared across the pipeline and host renderers.

use url::Url;

use crate::defaults;

/// Extract a display domain from a URL.
///
/// Returns the hostname with a single leading `www.` stripped. Unparseable
/// input is returned unchanged so callers always have something to show.
pub fn domain_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Favicon URL for a link, via Google's favicon service.
///
/// Empty string when the URL cannot be parsed.
pub fn favicon_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("https://www.google.com/s2/favicons?domain={}&sz=32", host),
            None => String::new(),
        },
        Err(_) => String::new(),
    }
}

/// Whether `text` is an http(s) URL a link note can be made from.
pub fn is_valid_url(text: &str) -> bool {
    match Url::parse(text.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Shorten a title for display: at most 50 characters, ellipsis included.
pub fn short_title(title: &str) -> String {
    ellipsize(title, defaults::SHORT_TITLE_MAX_LEN)
}

/// Shorten a description for display: at most 100 characters plus ellipsis.
pub fn short_description(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.chars().count() <= defaults::SHORT_DESCRIPTION_MAX_LEN {
        trimmed.to_string()
    } else {
        let cut: String = trimmed
            .chars()
            .take(defaults::SHORT_DESCRIPTION_MAX_LEN)
            .collect();
        format!("{}...", cut)
    }
}

// Ellipsis counts toward the limit: 50 chars max means 47 + "...".
fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_of_strips_www() {
        assert_eq!(domain_of("https://www.example.com/x"), "example.com");
        assert_eq!(domain_of("https://example.com/x"), "example.com");
    }

    #[test]
    fn domain_of_returns_input_on_parse_failure() {
        assert_eq!(domain_of("not a url"), "not a url");
        assert_eq!(domain_of(""), "");
    }

    #[test]
    fn domain_of_keeps_subdomains() {
        assert_eq!(domain_of("https://blog.example.com"), "blog.example.com");
    }

    #[test]
    fn favicon_url_uses_hostname() {
        assert_eq!(
            favicon_url("https://www.example.com/page"),
            "https://www.google.com/s2/favicons?domain=www.example.com&sz=32"
        );
        assert_eq!(favicon_url("nope"), "");
    }

    #[test]
    fn is_valid_url_requires_http_scheme() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("  http://example.com  "));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("just text"));
    }

    #[test]
    fn short_title_boundary() {
        let exactly_50 = "a".repeat(50);
        assert_eq!(short_title(&exactly_50), exactly_50);

        let longer = "a".repeat(51);
        let shortened = short_title(&longer);
        assert_eq!(shortened.chars().count(), 50);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn short_description_appends_ellipsis_past_limit() {
        let long = "d".repeat(150);
        let short = short_description(&long);
        assert_eq!(short.chars().count(), 103);
        assert!(short.ends_with("..."));
        assert_eq!(short_description("brief"), "brief");
    }
}

// src/crawl/domain.rs
// =============================================================================
// Decides whether a discovered link belongs to the same site as the page that
// linked to it.
//
// Only the host (and an explicit port, if any) is compared. Scheme,
// userinfo, path, query and fragment are ignored, so "https://foo.com" and
// "http://user@foo.com/x?y" are on the same domain.
//
// If either URL fails to parse the answer is false: an unparsable link is
// never followed.
// =============================================================================

use tracing::debug;
use url::Url;

pub fn same_domain(base_url: &str, candidate_url: &str) -> bool {
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            debug!(url = base_url, error = %e, "base URL does not parse");
            return false;
        }
    };
    let candidate = match Url::parse(candidate_url) {
        Ok(url) => url,
        Err(e) => {
            debug!(url = candidate_url, error = %e, "candidate URL does not parse");
            return false;
        }
    };

    // URLs without a host (mailto:, data:, ...) never match
    match (base.host_str(), candidate.host_str()) {
        (Some(a), Some(b)) => a == b && base.port() == candidate.port(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_domain_cases() {
        let cases = [
            ("same domain", "http://foo.com", "http://foo.com", true),
            ("different path", "http://foo.com", "http://foo.com/bar", true),
            ("query and fragment", "http://foo.com", "http://foo.com/bar?x=1#y", true),
            ("different domain", "http://foo.com", "http://bar.com", false),
            ("different tld", "http://foo.com", "http://foo.org", false),
            ("different scheme", "https://foo.com", "http://foo.com", true),
            ("with userinfo", "http://foo.com", "http://user@foo.com", true),
            ("with fragment", "http://foo.com", "http://foo.com/#content", true),
            ("subdomain", "http://foo.com", "http://www.foo.com", false),
            ("different port", "http://foo.com:8080", "http://foo.com", false),
            ("same port", "http://127.0.0.1:8080/a", "http://127.0.0.1:8080/b", true),
        ];

        for (name, base, candidate, expected) in cases {
            assert_eq!(same_domain(base, candidate), expected, "case: {}", name);
        }
    }

    #[test]
    fn test_unparsable_urls_are_not_same_domain() {
        assert!(!same_domain("http://foo.com", "/relative/path"));
        assert!(!same_domain("not a url", "http://foo.com"));
        assert!(!same_domain("http://foo.com", "http://[::1"));
    }

    #[test]
    fn test_hostless_urls_are_not_same_domain() {
        assert!(!same_domain("http://foo.com", "mailto:someone@foo.com"));
    }
}

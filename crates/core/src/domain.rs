// crates/core/src/domain.rs
//! Canonical domain extraction from raw history URLs.

use url::Url;

/// Normalize a URL into its canonical domain: the lowercase host with the
/// scheme and a leading `www.` removed.
///
/// Returns an empty string when no host can be derived (malformed input,
/// `mailto:`, `about:blank`, ...). Pure and idempotent: applying the
/// function to its own output yields the same value, so callers may pass
/// either full URLs or already-extracted domains.
pub fn extract_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // Scheme-less inputs (including our own output, e.g. "x.com") are not
    // absolute URLs; re-parse against an assumed scheme to stay idempotent.
    let parsed = Url::parse(trimmed).or_else(|_| Url::parse(&format!("https://{trimmed}")));

    let host = match parsed {
        Ok(u) => match u.host_str() {
            Some(h) => h.to_ascii_lowercase(),
            None => return String::new(),
        },
        Err(_) => return String::new(),
    };

    // Strip every leading "www." so the function is a fixpoint on its own
    // output ("www.www.x.com" would otherwise need two passes).
    let mut rest = host.as_str();
    while let Some(stripped) = rest.strip_prefix("www.") {
        rest = stripped;
    }
    rest.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_and_www_insensitive() {
        assert_eq!(extract_domain("https://www.x.com/a"), "x.com");
        assert_eq!(extract_domain("http://x.com"), "x.com");
        assert_eq!(
            extract_domain("https://www.x.com/a"),
            extract_domain("http://x.com")
        );
    }

    #[test]
    fn test_lowercases_host() {
        assert_eq!(extract_domain("HTTPS://WWW.YouTube.COM/watch?v=1"), "youtube.com");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "https://www.youtube.com/watch?v=abc",
            "github.com",
            "sub.domain.example.org",
            "",
        ] {
            let once = extract_domain(input);
            assert_eq!(extract_domain(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_no_host_yields_empty() {
        assert_eq!(extract_domain(""), "");
        assert_eq!(extract_domain("   "), "");
        assert_eq!(extract_domain("mailto:someone@example.com"), "");
        assert_eq!(extract_domain("about:blank"), "");
    }

    #[test]
    fn test_query_fragment_and_path_stripped() {
        assert_eq!(
            extract_domain("https://news.ycombinator.com/item?id=1#c2"),
            "news.ycombinator.com"
        );
    }

    #[test]
    fn test_port_is_not_part_of_domain() {
        assert_eq!(extract_domain("http://localhost:5000/api"), "localhost");
    }

    #[test]
    fn test_www_stripped_only_as_prefix() {
        assert_eq!(extract_domain("https://www.www.odd.com"), "odd.com");
        assert_eq!(extract_domain("https://notwww.example.com"), "notwww.example.com");
    }
}

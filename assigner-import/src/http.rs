//! Shared blocking HTTP plumbing for the Canvas and GitLab clients.

use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) fn build_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(TIMEOUT)
        .timeout_read(TIMEOUT)
        .timeout_write(TIMEOUT)
        .user_agent(concat!("assigner/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// `canvas.example.edu` → `https://canvas.example.edu`; explicit schemes are kept.
pub(crate) fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    }
}

pub(crate) fn describe(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, response) => {
            format!("HTTP {code} {}", response.status_text())
        }
        ureq::Error::Transport(transport) => transport.to_string(),
    }
}

/// Scheme and authority of an absolute URL, lowercased.
fn origin(url: &str) -> Option<(String, String)> {
    let (scheme, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    Some((scheme.to_ascii_lowercase(), authority.to_ascii_lowercase()))
}

pub(crate) fn same_origin(a: &str, b: &str) -> bool {
    matches!((origin(a), origin(b)), (Some(x), Some(y)) if x == y)
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
pub(crate) fn next_link(header: Option<&str>) -> Option<String> {
    header?.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|p| {
            let p = p.trim();
            p == "rel=\"next\"" || p == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_owned)
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("canvas.example.edu", "https://canvas.example.edu")]
    #[case("canvas.example.edu/", "https://canvas.example.edu")]
    #[case("http://127.0.0.1:8080", "http://127.0.0.1:8080")]
    #[case("https://gitlab.example.edu/", "https://gitlab.example.edu")]
    fn base_url_adds_scheme(#[case] host: &str, #[case] expected: &str) {
        assert_eq!(base_url(host), expected);
    }

    #[rstest]
    #[case("https://c.example/api/v1/x?page=2", "https://c.example", true)]
    #[case("HTTPS://C.Example/api", "https://c.example", true)]
    #[case("http://127.0.0.1:8080/a", "http://127.0.0.1:8080", true)]
    #[case("http://127.0.0.1:9090/a", "http://127.0.0.1:8080", false)]
    #[case("http://c.example/api", "https://c.example", false)]
    #[case("https://c.example.evil.test/api", "https://c.example", false)]
    #[case("/api/v1/x?page=2", "https://c.example", false)]
    fn origin_comparison(#[case] link: &str, #[case] base: &str, #[case] expected: bool) {
        assert_eq!(same_origin(link, base), expected);
    }

    #[test]
    fn next_link_picks_next_relation() {
        let header = "<https://c.example/api/v1/x?page=1>; rel=\"current\", \
                      <https://c.example/api/v1/x?page=2>; rel=\"next\", \
                      <https://c.example/api/v1/x?page=9>; rel=\"last\"";
        assert_eq!(
            next_link(Some(header)).as_deref(),
            Some("https://c.example/api/v1/x?page=2")
        );
    }

    #[test]
    fn next_link_absent_on_last_page() {
        let header = "<https://c.example/api/v1/x?page=9>; rel=\"last\"";
        assert_eq!(next_link(Some(header)), None);
        assert_eq!(next_link(None), None);
    }
}

//! Parse raw HTTP response header lines into [`Headers`].

use super::Headers;

/// Collect headers from raw lines as delivered by libcurl's header callback.
///
/// libcurl also reports interim responses (`100 Continue`, proxy `CONNECT`);
/// each `HTTP/` status line starts a new block, so only the last response's
/// headers are kept.
pub(crate) fn parse_header_lines(lines: &[String]) -> Headers {
    let mut headers = Headers::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers = Headers::new();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            headers.insert(name, value);
        }
    }

    headers
}

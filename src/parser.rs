//! Snippet header parsing.
//!
//! A snippet's first line, once stripped of leading whitespace and a
//! comment marker, is its title; the second line under the same rule is its
//! description. Scanning is strictly sequential over at most two lines and
//! stops at the first line that carries no marker, so a description is only
//! recognised when the title was.
//!
//! Lines end at `\n`, `\r\n`, or a lone `\r`.

/// Title and description extracted from a snippet's leading comment lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetHeader {
    pub title: String,
    pub description: String,
}

/// Extract the header from `text` using `markers`, first match wins.
///
/// Never fails: when no line matches the title is empty, and it is up to
/// the caller to reject that.
pub fn parse_snippet(text: &str, markers: &[String]) -> SnippetHeader {
    let mut header = SnippetHeader::default();

    for (i, line) in split_lines(text).take(2).enumerate() {
        let Some(content) = strip_marker(line, markers) else {
            break;
        };
        if i == 0 {
            header.title = content.to_string();
        } else {
            header.description = content.to_string();
        }
    }

    header
}

/// Like [`str::lines`], but a lone `\r` also ends a line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, tail) = match rest.find(['\n', '\r']) {
            Some(end) if rest[end..].starts_with("\r\n") => (&rest[..end], &rest[end + 2..]),
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => (rest, ""),
        };
        rest = tail;
        Some(line)
    })
}

fn strip_marker<'a>(line: &'a str, markers: &[String]) -> Option<&'a str> {
    let stripped = line.trim_start();
    markers
        .iter()
        .find_map(|m| stripped.strip_prefix(m.as_str()))
        .map(str::trim_start)
}

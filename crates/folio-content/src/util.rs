//! Shared utility functions for markdown parsing.

use pulldown_cmark::HeadingLevel;

/// Resolve a markdown link URL against the directory of the current page.
///
/// Relative `.md` links become absolute page URLs under `prefix`:
/// - `./sibling.md` → `{prefix}/base/sibling`
/// - `../parent.md` → `{prefix}/parent`
/// - `sub/index.md#part` → `{prefix}/base/sub#part`
/// - `../index.md` at the root → `{prefix}`
///
/// External links, fragment-only links, and non-markdown links are returned unchanged.
///
/// # Examples
///
/// ```
/// use folio_content::resolve_link;
///
/// assert_eq!(resolve_link("./providers.md", "", "/Axis/docs"), "/Axis/docs/providers");
/// assert_eq!(resolve_link("https://example.com", "", "/docs"), "https://example.com");
/// ```
#[allow(clippy::case_sensitive_file_extension_comparisons)]
#[must_use]
pub fn resolve_link(url: &str, base_dir: &str, prefix: &str) -> String {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('#')
    {
        return url.to_owned();
    }

    if !url.ends_with(".md") && !url.contains(".md#") {
        return url.to_owned();
    }

    let (path_part, fragment) = match url.find('#') {
        Some(hash_pos) => (&url[..hash_pos], Some(&url[hash_pos..])),
        None => (url, None),
    };

    let resolved = if path_part.starts_with('/') {
        path_part.trim_start_matches('/').to_owned()
    } else {
        resolve_relative_path(path_part, base_dir)
    };

    let clean = resolved.strip_suffix(".md").unwrap_or(&resolved);
    let clean = if clean == "index" {
        ""
    } else {
        clean.strip_suffix("/index").unwrap_or(clean)
    };

    let prefix = prefix.trim_end_matches('/');
    let with_prefix = match (prefix, clean) {
        ("", "") => "/".to_owned(),
        (prefix, "") => prefix.to_owned(),
        (prefix, clean) => format!("{prefix}/{clean}"),
    };
    match fragment {
        Some(frag) => format!("{with_prefix}{frag}"),
        None => with_prefix,
    }
}

/// Resolve a relative path against a base directory.
///
/// `..` never climbs above the root.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}

/// Split a fence info string into the language and an optional `title="..."`.
pub(crate) fn parse_fence_info(info: &str) -> (Option<String>, Option<String>) {
    let mut parts = info.split_whitespace();
    let language = parts
        .next()
        .filter(|lang| !lang.contains('='))
        .map(str::to_owned);

    let title = info.find("title=").map(|pos| {
        let rest = &info[pos + "title=".len()..];
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => rest[1..]
                .split(quote)
                .next()
                .unwrap_or_default()
                .to_owned(),
            _ => rest.split_whitespace().next().unwrap_or_default().to_owned(),
        }
    });

    (language, title)
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

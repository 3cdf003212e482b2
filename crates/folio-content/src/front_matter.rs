//! Front matter extraction from markdown sources.

/// Split a leading front matter block from a markdown source.
///
/// The block must start on the first line with `---` and end with a line
/// containing only `---`. Returns the raw block contents (without fences)
/// and the remaining body. Sources without a complete block are returned
/// unchanged as the body.
///
/// # Examples
///
/// ```
/// use folio_content::split_front_matter;
///
/// let (front, body) = split_front_matter("---\nsidebar_position: 1\n---\n# Intro\n");
/// assert_eq!(front, Some("sidebar_position: 1\n"));
/// assert_eq!(body, "# Intro\n");
/// ```
#[must_use]
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let source_no_bom = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = strip_fence_line(source_no_bom) else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    (None, source)
}

/// Strip an opening `---` line, returning what follows it.
fn strip_fence_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

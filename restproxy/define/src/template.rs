//! Placeholder extraction from path templates.
//!
//! Templates use `{name}` placeholders, optionally with a regex constraint
//! after a colon (`{id: [0-9]+}`). The constraint is never interpreted here;
//! it only matters that the whole `{...}` token gets replaced.

/// A placeholder occurrence in a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The bound name (`id` in `{id: [0-9]+}`).
    pub name: &'a str,
    /// The full token as written in the template, braces included.
    pub token: &'a str,
}

/// Extracts placeholders in left-to-right occurrence order.
///
/// A name that occurs twice yields two entries, one per occurrence.
///
/// ## Examples
///
/// ```
/// use restproxy_define::extract_placeholders;
///
/// let names: Vec<_> = extract_placeholders("/orgs/{org}/repos/{repo}")
///     .iter()
///     .map(|p| p.name)
///     .collect();
/// assert_eq!(names, vec!["org", "repo"]);
///
/// let placeholders = extract_placeholders("/items/{id: [0-9]{3}}");
/// assert_eq!(placeholders[0].name, "id");
/// assert_eq!(placeholders[0].token, "{id: [0-9]{3}}");
/// ```
pub fn extract_placeholders(path: &str) -> Vec<Placeholder<'_>> {
    let mut placeholders = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, c) in path.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = idx;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let token = &path[start..=idx];
                    let inner = &token[1..token.len() - 1];
                    let name = inner.split(':').next().unwrap_or_default().trim();
                    if !name.is_empty() {
                        placeholders.push(Placeholder { name, token });
                    }
                }
            }
            _ => {}
        }
    }

    placeholders
}

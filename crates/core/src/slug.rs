/// Builds the public URL slug for a studio from its name and, when given,
/// its location.
///
/// Characters other than ASCII letters, digits, `_`, `-` and whitespace are
/// removed; runs of whitespace, `_` and `-` collapse into a single `-`.
pub fn generate_slug(name: &str, location: Option<&str>) -> String {
    let base = match location {
        Some(location) => format!("{}-{}", name, location),
        None => name.to_string(),
    };

    let mut slug = String::with_capacity(base.len());
    let mut pending_dash = false;
    for c in base.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }
    slug
}

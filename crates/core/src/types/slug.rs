const FALLBACK_SLUG: &str = "search";

/// Reduce a free-form query to a filename-safe slug: lowercase alphanumeric
/// runs joined by single dashes, `search` when nothing survives.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("lofi  hip hop!!"), "lofi-hip-hop");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  rust 2024  "), "rust-2024");
    }

    #[test]
    fn lowercases_input() {
        assert_eq!(slugify("Rust Talks"), "rust-talks");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(slugify(""), "search");
        assert_eq!(slugify("!!!"), "search");
    }
}

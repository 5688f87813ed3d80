/// Normalize user input into a URL-safe slug: lowercase, and every character
/// outside `[a-z0-9-]` replaced with `-`.
pub fn sanitize_slug(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_slug("Python Courses"), "python-courses");
        assert_eq!(sanitize_slug("web_dev/2025"), "web-dev-2025");
        assert_eq!(sanitize_slug("Курсы"), "-----");
    }

    #[test]
    fn validity() {
        assert!(is_valid_slug("new-page-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Upper"));
        assert!(!is_valid_slug("with space"));
    }
}

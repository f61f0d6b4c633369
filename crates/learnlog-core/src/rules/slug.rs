//! URL slugs for journal entries

/// Slug used when a title has no ASCII alphanumerics at all
pub const FALLBACK_SLUG: &str = "entry";

/// Derive a slug from a title
///
/// Lowercases ASCII alphanumerics and collapses every run of other
/// characters into a single `-`, with no leading or trailing dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
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

/// The `n`th candidate for a base slug: `base`, `base-2`, `base-3`, ...
pub fn candidate(base: &str, n: u32) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, n)
    }
}

/// First candidate for `base` that `taken` reports as free
pub fn first_free<F>(base: &str, mut taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let mut n = 1;
    loop {
        let slug = candidate(base, n);
        if !taken(&slug) {
            return slug;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Day 1"), "day-1");
        assert_eq!(slugify("  Learning Rust: traits & generics!  "), "learning-rust-traits-generics");
    }

    #[test]
    fn test_slugify_without_alphanumerics() {
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
        assert_eq!(slugify("日本語"), FALLBACK_SLUG);
    }

    #[test]
    fn test_first_free_appends_suffix() {
        let taken = ["day-1", "day-1-2"];
        let slug = first_free("day-1", |s| taken.contains(&s));
        assert_eq!(slug, "day-1-3");
    }

    #[test]
    fn test_first_free_keeps_base_when_unused() {
        assert_eq!(first_free("notes", |_| false), "notes");
    }
}

//! Utility functions for label and class token derivation.

use deunicode::deunicode;

/// Turns an attribute name into a human-readable label.
///
/// Words are split on underscores, dots, hyphens, and whitespace, and each
/// word is capitalized.
///
/// # Example
///
/// ```rust
/// use tabulon::titleize;
///
/// assert_eq!(titleize("first_name"), "First Name");
/// assert_eq!(titleize("author.name"), "Author Name");
/// ```
pub fn titleize(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '.' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives a CSS-safe class token from arbitrary text.
///
/// The input is transliterated to ASCII, lowercased, and runs of
/// non-alphanumeric characters collapse to a single underscore.
///
/// # Example
///
/// ```rust
/// use tabulon::css_token;
///
/// assert_eq!(css_token("Full Name"), "full_name");
/// assert_eq!(css_token("créé"), "cree");
/// ```
pub fn css_token(input: &str) -> String {
    let ascii = deunicode(input);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titleize_single_word() {
        assert_eq!(titleize("age"), "Age");
    }

    #[test]
    fn titleize_snake_case() {
        assert_eq!(titleize("created_at"), "Created At");
    }

    #[test]
    fn titleize_collapses_separators() {
        assert_eq!(titleize("a__b"), "A B");
        assert_eq!(titleize("_leading"), "Leading");
    }

    #[test]
    fn titleize_empty() {
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn css_token_lowercases() {
        assert_eq!(css_token("Age"), "age");
    }

    #[test]
    fn css_token_keeps_underscores() {
        assert_eq!(css_token("first_name"), "first_name");
    }

    #[test]
    fn css_token_collapses_runs() {
        assert_eq!(css_token("Full -- Name"), "full_name");
    }

    #[test]
    fn css_token_strips_leading_separators() {
        assert_eq!(css_token("  Name"), "name");
    }

    #[test]
    fn css_token_transliterates() {
        assert_eq!(css_token("prénom"), "prenom");
    }
}

//! String transforms: slugs, masking, case conversion, truncation and random
//! tokens.
//!
//! Lengths are counted in characters (Unicode scalar values), never bytes,
//! so every transform returns valid UTF-8.

use std::sync::LazyLock;

use regex::Regex;

mod case;
mod mask;
mod random;
mod slug;

pub use case::{camel_to_snake, snake_to_camel};
pub use mask::{mask, mask_email, MaskSpec};
pub use random::{generate_otp, random_string, DEFAULT_ALPHABET};
pub use slug::slug;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());

static HTML_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").unwrap());

/// Keep the first `length` characters and append `suffix`; inputs that fit are
/// returned unchanged. The suffix does not count toward `length`.
pub fn truncate(value: &str, length: usize, suffix: &str) -> String {
    if value.chars().count() <= length {
        return value.to_string();
    }
    let mut out: String = value.chars().take(length).collect();
    out.push_str(suffix);
    out
}

/// Keep the first `limit` space-separated words and append `end`.
pub fn limit_words(value: &str, limit: usize, end: &str) -> String {
    let words: Vec<&str> = value.split(' ').collect();
    if words.len() <= limit {
        return value.to_string();
    }
    format!("{}{}", words[..limit].join(" "), end)
}

/// Uppercased first letter of each space-separated word.
pub fn initials(name: &str) -> String {
    name.trim()
        .split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn is_json(value: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(value).is_ok()
}

pub fn extract_urls(value: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(value)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn remove_urls(value: &str) -> String {
    URL_PATTERN.replace_all(value, "").into_owned()
}

/// Remove HTML tags and comments, keeping text content.
pub fn strip_html(value: &str) -> String {
    HTML_TAG_PATTERN.replace_all(value, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_appends_suffix() {
        assert_eq!(truncate("Hello World", 5, "..."), "Hello...");
        assert_eq!(truncate("Hello World", 5, "...").len(), 8);
    }

    #[test]
    fn truncate_leaves_short_input() {
        assert_eq!(truncate("Hello", 5, "..."), "Hello");
        assert_eq!(truncate("", 0, "..."), "");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("héllo wörld", 4, "…"), "héll…");
    }

    #[test]
    fn limit_words_cuts_at_word_boundary() {
        assert_eq!(limit_words("one two three four", 2, "..."), "one two...");
        assert_eq!(limit_words("one two", 2, "..."), "one two");
    }

    #[test]
    fn initials_from_name() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("  ada   lovelace "), "AL");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn is_json_checks_syntax() {
        assert!(is_json(r#"{"name":"John"}"#));
        assert!(is_json("[1, 2]"));
        assert!(!is_json("Invalid JSON"));
        assert!(!is_json(""));
    }

    #[test]
    fn urls_are_extracted_and_removed() {
        let text = "See https://example.com/a and http://foo.test now";
        assert_eq!(
            extract_urls(text),
            vec!["https://example.com/a", "http://foo.test"]
        );
        assert_eq!(remove_urls(text), "See  and  now");
    }

    #[test]
    fn strip_html_removes_tags_and_comments() {
        assert_eq!(
            strip_html("<p>Hello <b>World</b><!-- note --></p>"),
            "Hello World"
        );
    }
}

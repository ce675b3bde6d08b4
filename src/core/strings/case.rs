use std::sync::LazyLock;

use regex::Regex;

static LOWER_UPPER_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

/// `camelCase` to `snake_case`. An underscore is inserted only between a
/// lowercase and an uppercase letter, so acronym runs stay joined
/// (`parseHTTPResponse` becomes `parse_httpresponse`).
pub fn camel_to_snake(value: &str) -> String {
    LOWER_UPPER_BOUNDARY
        .replace_all(value, "${1}_${2}")
        .to_ascii_lowercase()
}

/// `snake_case` to `SnakeCase`: the first letter and every letter after an
/// underscore are uppercased, underscores are removed.
pub fn snake_to_camel(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut capitalize_next = true;

    for ch in value.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            out.push(ch);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_to_snake_inserts_boundaries() {
        assert_eq!(camel_to_snake("camelCase"), "camel_case");
        assert_eq!(camel_to_snake("someLongName"), "some_long_name");
        assert_eq!(camel_to_snake("PascalCase"), "pascal_case");
    }

    #[test]
    fn camel_to_snake_keeps_acronyms_together() {
        assert_eq!(camel_to_snake("parseHTTPResponse"), "parse_httpresponse");
    }

    #[test]
    fn snake_to_camel_uppercases_words() {
        assert_eq!(snake_to_camel("snake_case"), "SnakeCase");
        assert_eq!(snake_to_camel("a__b"), "AB");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn round_trip_is_lossy() {
        assert_eq!(snake_to_camel(&camel_to_snake("userID")), "UserId");
    }
}

/// URL-friendly slug.
///
/// ASCII letters are lowercased; every run of characters outside `[a-z0-9]`
/// (the separator included) becomes a single separator. Leading and trailing
/// separators are dropped. A separator made of letters or digits is also
/// trimmed from both ends (any of its characters) and collapsed where it
/// repeats.
pub fn slug(value: &str, separator: &str) -> String {
    let mut out = String::new();
    let mut pending_separator = false;

    for ch in value.chars() {
        let normalized = ch.to_ascii_lowercase();
        match normalized {
            'a'..='z' | '0'..='9' => {
                if pending_separator && !out.is_empty() {
                    out.push_str(separator);
                }
                pending_separator = false;
                out.push(normalized);
            }
            _ => pending_separator = true,
        }
    }

    if separator.is_empty() {
        return out;
    }

    let mut out = out
        .trim_matches(|c: char| separator.contains(c))
        .to_string();
    let doubled = separator.repeat(2);
    while out.contains(&doubled) {
        out = out.replace(&doubled, separator);
    }
    out
}

use serde::{Deserialize, Serialize};

/// Visible windows and placeholder for [`mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSpec {
    /// Characters kept unmasked at the front.
    #[serde(default)]
    pub start: usize,
    /// Characters kept unmasked at the end.
    #[serde(default = "default_visible_length")]
    pub visible_length: usize,
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
}

fn default_visible_length() -> usize {
    4
}

fn default_mask_char() -> char {
    '*'
}

impl Default for MaskSpec {
    fn default() -> Self {
        Self {
            start: 0,
            visible_length: default_visible_length(),
            mask_char: default_mask_char(),
        }
    }
}

impl MaskSpec {
    pub fn new(start: usize, visible_length: usize, mask_char: char) -> Self {
        Self {
            start,
            visible_length,
            mask_char,
        }
    }
}

/// Replace everything between the leading and trailing visible windows with
/// `mask_char`. Output has exactly as many characters as the input.
pub fn mask(value: &str, spec: &MaskSpec) -> String {
    let chars: Vec<char> = value.chars().collect();
    let length = chars.len();

    if length <= spec.visible_length {
        return std::iter::repeat(spec.mask_char).take(length).collect();
    }

    let start = spec.start.min(length);
    let visible = spec.visible_length.min(length - start);

    let mut out = String::with_capacity(value.len());
    out.extend(&chars[..start]);
    out.extend(std::iter::repeat(spec.mask_char).take(length - start - visible));
    out.extend(&chars[length - visible..]);
    out
}

/// Mask an email address: the local part keeps its last two characters, the
/// domain is fully masked. Input without `@` is masked as a bare local part.
pub fn mask_email(email: &str) -> String {
    let local_spec = MaskSpec::new(0, 2, '*');
    let domain_spec = MaskSpec::new(0, 0, '*');

    match email.split_once('@') {
        Some((local, domain)) => format!(
            "{}@{}",
            mask(local, &local_spec),
            mask(domain, &domain_spec)
        ),
        None => mask(email, &local_spec),
    }
}

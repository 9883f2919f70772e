//! Phone and name normalization

/// Keep only the ASCII digits of `raw`
pub fn phone_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a phone number as `XXX-XXX-XXXX`.
///
/// Anything that does not reduce to exactly ten digits comes back as its
/// bare digit string.
pub fn format_phone(raw: &str) -> String {
    let digits = phone_digits(raw);
    if digits.len() != 10 {
        return digits;
    }
    format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Lower-case `text`, then capitalize the first letter of every space-separated word
pub fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
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

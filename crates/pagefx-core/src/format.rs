//! Number formatting for counter text.

/// Text rendered for a value that is not a number.
pub const NAN_TEXT: &str = "NaN";

/// Group the digits of `value` in threes, inserting `sep` between groups.
///
/// # Example
/// ```
/// use pagefx_core::format::group_thousands;
///
/// assert_eq!(group_thousands(1_234_567, ','), "1,234,567");
/// assert_eq!(group_thousands(999, ','), "999");
/// assert_eq!(group_thousands(-1_000, ','), "-1,000");
/// ```
#[must_use]
pub fn group_thousands(value: i64, sep: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Render a counter value followed by its suffix.
///
/// `None` stands for a target that failed to parse and renders as `NaN`.
#[must_use]
pub fn format_counter(value: Option<i64>, is_large: bool, sep: char, suffix: &str) -> String {
    let numeral = match value {
        None => NAN_TEXT.to_string(),
        Some(v) if is_large => group_thousands(v, sep),
        Some(v) => v.to_string(),
    };
    let mut text = numeral;
    text.push_str(suffix);
    text
}

use listcell_types::DigitSeparators;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static THOUSAND_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)(\d{3})").unwrap());

/// Format an invariant-culture digit string (`1234567.5`) with locale separators.
///
/// Groups are inserted right to left by repeatedly splitting the leading
/// digit run, so `1234567` becomes `1,234,567` with `,` as thousand separator.
/// Returns `None` for empty input.
pub fn format_digit(digit: &str, separators: &DigitSeparators) -> Option<String> {
    if digit.is_empty() {
        return None;
    }

    let mut parts = digit.splitn(2, '.');
    let mut int_part = parts.next().unwrap_or_default().to_string();
    let dec_part = parts.next();

    // an empty separator or a digit inside it would be regrouped forever
    let groupable = !separators.thousand.is_empty()
        && !separators.thousand.chars().any(|c| c.is_ascii_digit());
    while groupable && THOUSAND_GROUP.is_match(&int_part) {
        int_part = THOUSAND_GROUP
            .replacen(&int_part, 1, |caps: &Captures| {
                format!("{}{}{}", &caps[1], separators.thousand, &caps[2])
            })
            .into_owned();
    }

    match dec_part {
        Some(dec) if !dec.is_empty() => Some(format!("{}{}{}", int_part, separators.decimal, dec)),
        _ => Some(int_part),
    }
}

/// Convert a locale digit string back to invariant culture (`1.234,5` → `1234.5`)
pub fn deformat_digit(digit: &str, separators: &DigitSeparators) -> String {
    let thousand = Regex::new(&escape_separator(&separators.thousand));
    let decimal = Regex::new(&escape_separator(&separators.decimal));

    let mut result = digit.trim().to_string();
    if let Ok(re) = thousand
        && !separators.thousand.is_empty()
    {
        result = re.replace_all(&result, "").into_owned();
    }
    if let Ok(re) = decimal
        && !separators.decimal.is_empty()
    {
        result = re.replace_all(&result, ".").into_owned();
    }
    result
}

/// Regex fragment for a separator: whitespace matches any whitespace
pub fn escape_separator(separator: &str) -> String {
    let mut chars = separator.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_whitespace()
    {
        return r"\s".to_string();
    }
    regex::escape(separator)
}

/// Regex that accepts plain (`1234,5`) or grouped (`1.234,5`) locale digits
pub fn digit_test_regex(separators: &DigitSeparators) -> Regex {
    let dec = escape_separator(&separators.decimal);
    let thou = escape_separator(&separators.thousand);
    let pattern = format!(
        r"(?mi)(^\d+({dec}\d+)?$)|(^\d{{1,3}}({thou}\d{{3}})+({dec}\d+)?$)",
        dec = dec,
        thou = thou
    );
    Regex::new(&pattern).unwrap()
}

/// Empty input counts as a correct digit
pub fn is_correct_locale_digit(digit: &str, separators: &DigitSeparators) -> bool {
    digit.is_empty() || digit_test_regex(separators).is_match(digit.trim())
}

/// True when the string is a complete finite number (`"12"`, `"-1.5"`)
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && !trimmed.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
        && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Encode text for safe display.
///
/// Replaces `< > & ' " \` with HTML entities in a single pass; every other
/// character is left untouched.
pub fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\\' => out.push_str("&#92;"),
            _ => out.push(c),
        }
    }
    out
}

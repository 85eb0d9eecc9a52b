use regex::Regex;
use std::sync::LazyLock;

const TAG_BODY: &str = r#"(?:[^"'>]|"[^"]*"|'[^']*')*"#;

static TAG_OR_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        concat!(
            "(?i)<(?:",
            // comment body
            r"!--(?:(?:-*[^->])*--+|-?)",
            // raw text elements whose content is dropped
            r"|script\b{tb}>[\s\S]*?</script\s*",
            r"|style\b{tb}>[\s\S]*?</style\s*",
            // regular tag name
            r"|/?[a-z]{tb}",
            ")>"
        ),
        tb = TAG_BODY
    );
    Regex::new(&pattern).unwrap()
});

/// Extract text from an HTML string without building a DOM.
///
/// Tags, comments and the content of `script`/`style` elements are removed
/// in a single pass. Markup produced by the removal itself (e.g.
/// `<<b>b>`) is not stripped again.
pub fn text_from_html(html: &str) -> String {
    TAG_OR_COMMENT.replace_all(html, "").into_owned()
}

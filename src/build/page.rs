//! Fixed HTML page skeleton around a rendered body fragment.

/// Wrap a body fragment in the page skeleton.
///
/// Always emits the head with a UTF-8 charset, a responsive viewport
/// meta tag and a stylesheet link. The script tag appears only when
/// `js_path` is set and non-empty; the footer block only when `footer`
/// is set. Pure and deterministic: identical inputs produce identical
/// page text.
pub fn assemble(
    fragment: &str,
    css_path: &str,
    js_path: Option<&str>,
    footer: Option<&str>,
) -> String {
    let mut page = String::new();
    page.push_str("<html lang=\"en\">\n<head>\n");
    page.push_str("    <meta charset=\"UTF-8\">\n");
    page.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page.push_str(&format!(
        "    <link rel=\"stylesheet\" type=\"text/css\" href=\"{css_path}\">\n"
    ));
    page.push_str("</head>\n<body>\n");
    page.push_str(fragment);
    if !fragment.ends_with('\n') {
        page.push('\n');
    }
    if let Some(js) = js_path.filter(|p| !p.is_empty()) {
        page.push_str(&format!("<script src=\"{js}\"></script>\n"));
    }
    if let Some(text) = footer {
        page.push_str(&format!("<footer>{text}</footer>\n"));
    }
    page.push_str("</body>\n</html>\n");
    page
}

//! Rendering of directive-extended markup to an HTML body fragment.
//!
//! Documents are lightweight markup extended with block-level
//! directives in the `.. name:: args` form, followed by an indented
//! block of `:key: value` option lines and content lines. Directive
//! blocks are dispatched to the registry; the text between them is
//! delegated to pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

use super::directives::{DirectiveOptions, DirectiveRegistry};

#[derive(thiserror::Error, Debug)]
pub enum MarkupError {
    #[error("unknown directive `{name}` on line {line}")]
    UnknownDirective { name: String, line: usize },

    #[error("invalid value `{value}` for option `:{option}:` on line {line}")]
    InvalidOption {
        option: String,
        value: String,
        line: usize,
    },
}

/// Render a document's raw text to an HTML fragment.
///
/// Directive blocks are replaced by their handler's output; a directive
/// whose name has no registered handler aborts the document.
pub fn render_fragment(text: &str, registry: &DirectiveRegistry) -> Result<String, MarkupError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut fragment = String::new();
    let mut plain: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let Some((name, args)) = parse_marker(line) else {
            plain.push(line);
            i += 1;
            continue;
        };

        let marker_line = i + 1;
        let handler = registry
            .get(name)
            .ok_or_else(|| MarkupError::UnknownDirective {
                name: name.to_string(),
                line: marker_line,
            })?;

        flush_plain(&mut fragment, &mut plain);

        // The block is every following line indented deeper than the
        // marker; blank lines do not end it.
        let indent = indent_width(line);
        let mut block: Vec<&str> = Vec::new();
        i += 1;
        while i < lines.len() {
            let candidate = lines[i];
            if !candidate.trim().is_empty() && indent_width(candidate) <= indent {
                break;
            }
            block.push(candidate);
            i += 1;
        }

        let (options, content) = parse_block(&block, marker_line)?;
        let rendered = handler.render(args, &options, &content)?;
        if !rendered.is_empty() {
            fragment.push_str(&rendered);
            fragment.push('\n');
        }
    }

    flush_plain(&mut fragment, &mut plain);
    Ok(fragment)
}

/// Parse a `.. name:: args` directive marker.
///
/// Returns `None` for ordinary text, including `..` comment lines
/// without the `::` marker.
fn parse_marker(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix(".. ")?;
    let (name, args) = rest.split_once("::")?;
    let name = name.trim();
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some((name, args.trim()))
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Split a directive block into its option fields and content lines.
///
/// Options (`:key: value`) come first; the first non-option line or a
/// blank separator ends them. Unrecognized option keys are accepted and
/// ignored; a non-integer `:maxdepth:` is an error.
fn parse_block(
    block: &[&str],
    marker_line: usize,
) -> Result<(DirectiveOptions, Vec<String>), MarkupError> {
    let mut options = DirectiveOptions::default();
    let mut content = Vec::new();
    let mut in_options = true;
    let mut seen_any = false;

    for (offset, raw) in block.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            if seen_any {
                in_options = false;
            }
            continue;
        }
        seen_any = true;

        if in_options {
            if let Some((key, value)) = parse_option(line) {
                match key {
                    "maxdepth" => {
                        options.max_depth =
                            Some(value.parse().map_err(|_| MarkupError::InvalidOption {
                                option: key.to_string(),
                                value: value.to_string(),
                                line: marker_line + offset + 1,
                            })?);
                    }
                    "caption" => options.caption = Some(value.to_string()),
                    _ => {}
                }
                continue;
            }
            in_options = false;
        }

        content.push(line.to_string());
    }

    Ok((options, content))
}

fn parse_option(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(':')?;
    let (key, value) = rest.split_once(':')?;
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

/// Render the accumulated plain-text lines through pulldown-cmark and
/// append the result to the fragment.
fn flush_plain(fragment: &mut String, plain: &mut Vec<&str>) {
    if plain.iter().all(|l| l.trim().is_empty()) {
        plain.clear();
        return;
    }
    let text = plain.join("\n");
    plain.clear();

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(&text, options);
    html::push_html(fragment, parser);
}

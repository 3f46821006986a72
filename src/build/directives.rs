//! Custom block-level directives extending the markup grammar.
//!
//! A directive is a named block construct (`.. name::` plus an indented
//! block) whose lines are handed to a registered handler. The registry
//! is built once per run, before any document is parsed, and is
//! read-only for the rest of the batch.

use std::collections::HashMap;

use super::markup::MarkupError;

/// Options parsed from a directive block's `:key: value` field lines.
#[derive(Debug, Clone, Default)]
pub struct DirectiveOptions {
    /// `:maxdepth:` — accepted for compatibility, unused in rendering.
    pub max_depth: Option<u32>,
    /// `:caption:` — accepted for compatibility, unused in rendering.
    pub caption: Option<String>,
}

/// A handler that turns a directive block into HTML.
pub trait DirectiveHandler {
    /// Render the block. `args` is the text after the `::` marker,
    /// `content` the dedented, non-empty block lines in input order.
    fn render(
        &self,
        args: &str,
        options: &DirectiveOptions,
        content: &[String],
    ) -> Result<String, MarkupError>;
}

/// Registry mapping directive names to handlers.
pub struct DirectiveRegistry {
    handlers: HashMap<String, Box<dyn DirectiveHandler>>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the stock directives:
    /// `highlight` is suppressed, `toctree` renders a navigation list
    /// whose links are prefixed with `link_prefix`.
    pub fn with_defaults(link_prefix: &str) -> Self {
        let mut registry = Self::new();
        registry.register("highlight", IgnoreDirective);
        registry.register("toctree", TocTreeDirective::new(link_prefix));
        registry
    }

    /// Associate a directive name with a handler.
    ///
    /// The last registration for a given name wins.
    pub fn register(&mut self, name: impl Into<String>, handler: impl DirectiveHandler + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Look up the handler for a directive name.
    pub fn get(&self, name: &str) -> Option<&dyn DirectiveHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }
}

/// Swallows its block and emits nothing.
///
/// Registered for constructs the output format has no equivalent for,
/// such as `highlight` hints.
pub struct IgnoreDirective;

impl DirectiveHandler for IgnoreDirective {
    fn render(
        &self,
        _args: &str,
        _options: &DirectiveOptions,
        _content: &[String],
    ) -> Result<String, MarkupError> {
        Ok(String::new())
    }
}

/// Renders a navigation link list from a block of bare page names.
///
/// Each content line becomes one list item linking to
/// `<prefix><entry>.html`. An empty block produces an empty container.
pub struct TocTreeDirective {
    link_prefix: String,
}

impl TocTreeDirective {
    pub fn new(link_prefix: &str) -> Self {
        let mut prefix = link_prefix.to_string();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self {
            link_prefix: prefix,
        }
    }
}

impl DirectiveHandler for TocTreeDirective {
    fn render(
        &self,
        _args: &str,
        _options: &DirectiveOptions,
        content: &[String],
    ) -> Result<String, MarkupError> {
        let mut html = String::from("<div class=\"rpc_nav\">\n<ul>\n");
        for entry in content {
            html.push_str(&format!(
                "<li class=\"rpc_item\"><a href=\"{prefix}{entry}.html\">{entry}</a></li>\n",
                prefix = self.link_prefix,
                entry = entry,
            ));
        }
        html.push_str("</ul>\n</div>");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_toctree_one_item_per_entry_in_order() {
        let toctree = TocTreeDirective::new("/rpc/");
        let html = toctree
            .render("", &DirectiveOptions::default(), &lines(&["intro", "setup", "api"]))
            .unwrap();

        assert_eq!(html.matches("<li class=\"rpc_item\">").count(), 3);

        let intro = html.find("href=\"/rpc/intro.html\"").unwrap();
        let setup = html.find("href=\"/rpc/setup.html\"").unwrap();
        let api = html.find("href=\"/rpc/api.html\"").unwrap();
        assert!(intro < setup && setup < api);
    }

    #[test]
    fn test_toctree_default_prefix() {
        let toctree = TocTreeDirective::new("./");
        let html = toctree
            .render("", &DirectiveOptions::default(), &lines(&["intro"]))
            .unwrap();
        assert!(html.contains("href=\"./intro.html\""));
    }

    #[test]
    fn test_toctree_prefix_gains_trailing_slash() {
        let toctree = TocTreeDirective::new("/rpc");
        let html = toctree
            .render("", &DirectiveOptions::default(), &lines(&["intro"]))
            .unwrap();
        assert!(html.contains("href=\"/rpc/intro.html\""));
    }

    #[test]
    fn test_toctree_empty_block_is_empty_container() {
        let toctree = TocTreeDirective::new("./");
        let html = toctree.render("", &DirectiveOptions::default(), &[]).unwrap();
        assert!(html.contains("rpc_nav"));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn test_ignore_emits_nothing() {
        let html = IgnoreDirective
            .render("rust", &DirectiveOptions::default(), &lines(&["some", "content"]))
            .unwrap();
        assert!(html.is_empty());
    }

    #[test]
    fn test_registry_defaults() {
        let registry = DirectiveRegistry::with_defaults("./");
        assert!(registry.get("highlight").is_some());
        assert!(registry.get("toctree").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_registry_last_registration_wins() {
        let mut registry = DirectiveRegistry::with_defaults("./");
        registry.register("toctree", IgnoreDirective);

        let html = registry
            .get("toctree")
            .unwrap()
            .render("", &DirectiveOptions::default(), &lines(&["intro"]))
            .unwrap();
        assert!(html.is_empty());
    }
}

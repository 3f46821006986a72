//! Per-document render pipeline.
//!
//! One pipeline is built per batch run: the directive registry is
//! populated and the substitution rules are compiled exactly once,
//! before the first document is parsed. Rendering a document applies
//! the substitutions to its raw text, then hands the result to the
//! markup renderer.

use super::directives::DirectiveRegistry;
use super::markup::{self, MarkupError};
use super::substitute::{PatternError, Rule, Substitutions};

pub struct RenderPipeline {
    registry: DirectiveRegistry,
    substitutions: Substitutions,
}

impl RenderPipeline {
    /// Build the pipeline for a batch run.
    ///
    /// Fails upfront on a malformed substitution pattern, before any
    /// document has been read or written.
    pub fn new(
        rules: &[Rule],
        case_insensitive: bool,
        link_prefix: &str,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            registry: DirectiveRegistry::with_defaults(link_prefix),
            substitutions: Substitutions::compile(rules, case_insensitive)?,
        })
    }

    /// Render one document's raw text to an HTML body fragment.
    pub fn render(&self, raw: &str) -> Result<String, MarkupError> {
        let substituted = self.substitutions.apply(raw);
        markup::render_fragment(&substituted, &self.registry)
    }
}

//! Text substitution applied to raw document text before parsing.
//!
//! Rules are ordered find/replace pairs whose patterns are regular
//! expressions. They run in list order, each rule operating on the
//! cumulative result of the previous ones, so a later rule can match
//! text introduced by an earlier rule's replacement.

use regex::{Regex, RegexBuilder};

/// An ordered find/replace pair. The pattern is a regular expression.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
}

#[derive(thiserror::Error, Debug)]
#[error("invalid substitution pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// A compiled set of substitution rules.
///
/// Compilation validates every pattern upfront, so a malformed pattern
/// fails the whole set before any text has been touched.
#[derive(Debug)]
pub struct Substitutions {
    compiled: Vec<(Regex, String)>,
}

impl Substitutions {
    /// Compile the rule list.
    ///
    /// Case-insensitive matching applies to all rules uniformly, not
    /// per-rule. Fails on the first pattern that does not compile.
    pub fn compile(rules: &[Rule], case_insensitive: bool) -> Result<Self, PatternError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let regex = RegexBuilder::new(&rule.pattern)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| PatternError {
                    pattern: rule.pattern.clone(),
                    source: e,
                })?;
            compiled.push((regex, rule.replacement.clone()));
        }
        Ok(Self { compiled })
    }

    /// Apply the rules in list order. Unmatched patterns are a no-op.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (regex, replacement) in &self.compiled {
            result = regex.replace_all(&result, replacement.as_str()).into_owned();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, replacement: &str) -> Rule {
        Rule {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_rules_apply_in_order() {
        // Rule 2 sees rule 1's output: "a" -> "b" -> "c".
        let subs = Substitutions::compile(&[rule("a", "b"), rule("b", "c")], false).unwrap();
        assert_eq!(subs.apply("a"), "c");
    }

    #[test]
    fn test_no_match_is_noop() {
        let subs = Substitutions::compile(&[rule("missing", "x")], false).unwrap();
        assert_eq!(subs.apply("nothing to see here"), "nothing to see here");
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let subs = Substitutions::compile(&[rule("Foo", "X")], false).unwrap();
        assert_eq!(subs.apply("foo FOO Foo"), "foo FOO X");
    }

    #[test]
    fn test_case_insensitive_matches_all_variants() {
        let subs = Substitutions::compile(&[rule("Foo", "X")], true).unwrap();
        assert_eq!(subs.apply("foo FOO Foo"), "X X X");
    }

    #[test]
    fn test_patterns_are_regular_expressions() {
        let subs = Substitutions::compile(&[rule("colou?r", "hue")], false).unwrap();
        assert_eq!(subs.apply("color colour"), "hue hue");
    }

    #[test]
    fn test_malformed_pattern_fails_compilation() {
        let err = Substitutions::compile(&[rule("[unclosed", "x")], false).unwrap_err();
        assert_eq!(err.pattern, "[unclosed");
    }

    #[test]
    fn test_empty_rule_list() {
        let subs = Substitutions::compile(&[], false).unwrap();
        assert_eq!(subs.apply("untouched"), "untouched");
    }
}

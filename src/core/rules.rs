//! Ordered substitution rules for rebasing page references.
//!
//! A rule is a regex pattern plus a literal replacement. Rules apply in
//! declaration order, each as a global substitution over the whole page, and
//! later rules see the output of earlier ones. The built-in table redirects
//! favicon, index, and image references to the site root two levels up.

use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::error::{Error, Result};

/// Built-in substitution table, in application order.
///
/// The fully delimited rules (favicon, index) consume both quotes and emit
/// double quotes. The `images/` prefix rules rewrite only through the opening
/// quote, so a single-quoted reference keeps its original closing quote.
/// Matching anchors at the quote: absolute URLs and nested paths never match.
const BUILTIN_RULES: &[(&str, &str)] = &[
    // Favicon references
    (r#"href=["']\./favicon\.svg["']"#, r#"href="../../favicon.svg""#),
    (r#"href=["']favicon\.svg["']"#, r#"href="../../favicon.svg""#),
    (r#"href=["']\./favicon\.ico["']"#, r#"href="../../favicon.ico""#),
    (r#"href=["']favicon\.ico["']"#, r#"href="../../favicon.ico""#),
    // Landing page references
    (r#"href=["']\./index\.html["']"#, r#"href="../../index.html""#),
    (r#"href=["']index\.html["']"#, r#"href="../../index.html""#),
    // Image paths without a leading ./
    (r#"src=["']images/"#, r#"src="../../images/"#),
    (r#"data-src=["']images/"#, r#"data-src="../../images/"#),
    (r#"href=["']images/"#, r#"href="../../images/"#),
    // Image paths with a leading ./
    (r#"src=["']\./images/"#, r#"src="../../images/"#),
    (r#"data-src=["']\./images/"#, r#"data-src="../../images/"#),
    (r#"href=["']\./images/"#, r#"href="../../images/"#),
];

/// One pattern/replacement pair, before compilation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRule {
    pub pattern: String,
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// The built-in table as declarative pairs.
pub fn builtin_rules() -> Vec<RewriteRule> {
    BUILTIN_RULES
        .iter()
        .map(|(pattern, replacement)| RewriteRule::new(*pattern, *replacement))
        .collect()
}

#[derive(Debug)]
struct CompiledRule {
    rule: RewriteRule,
    regex: Regex,
}

/// An ordered rule list compiled and ready to apply to page text.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile a rule list, preserving order. Fails on the first invalid
    /// pattern.
    pub fn compile(rules: Vec<RewriteRule>) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let regex = Regex::new(&rule.pattern)
                .map_err(|e| Error::rule_invalid_pattern(&rule.pattern, e.to_string()))?;
            compiled.push(CompiledRule { rule, regex });
        }
        Ok(Self { rules: compiled })
    }

    /// The built-in table, compiled.
    pub fn builtin() -> Result<Self> {
        Self::compile(builtin_rules())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate the declarative pairs in application order.
    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Apply every rule in order as a global substitution.
    ///
    /// Replacements are literal text, never capture templates. Returns the
    /// rewritten text and the total number of matches replaced.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut out = text.to_string();
        let mut replaced = 0;

        for compiled in &self.rules {
            let hits = compiled.regex.find_iter(&out).count();
            if hits == 0 {
                continue;
            }
            out = compiled
                .regex
                .replace_all(&out, NoExpand(&compiled.rule.replacement))
                .into_owned();
            replaced += hits;
        }

        (out, replaced)
    }
}

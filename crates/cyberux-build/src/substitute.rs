//! Textual substitution used by the HTML and path rewriting stages.
//!
//! Both operations are plain substring replacement. They sit behind
//! [`Substituter`] so a parser-backed implementation can be dropped in without
//! touching the pipeline.

use std::sync::LazyLock;

use regex::Regex;

/// Result of replacing a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Document after replacement
    pub text: String,

    /// Number of occurrences replaced
    pub count: usize,
}

/// A literal prefix replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Rewrite rules for the merged page and stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteRules {
    pub html: Vec<RewriteRule>,
    pub css: Vec<RewriteRule>,
}

impl RewriteRules {
    /// Rules moving asset URLs from `source` (e.g. `core/assets`) to `dest` (e.g. `build/assets`).
    ///
    /// HTML rewrites image `src`/`href` attributes; CSS rewrites single-quoted
    /// `url('...')` references to images and fonts.
    pub fn for_prefixes(source: &str, dest: &str) -> Self {
        let html = ["src", "href"]
            .iter()
            .map(|attr| {
                RewriteRule::new(
                    format!("{}=\"{}/images/", attr, source),
                    format!("{}=\"{}/images/", attr, dest),
                )
            })
            .collect();

        let css = ["images", "fonts"]
            .iter()
            .map(|kind| {
                RewriteRule::new(
                    format!("url('{}/{}/", source, kind),
                    format!("url('{}/{}/", dest, kind),
                )
            })
            .collect();

        Self { html, css }
    }
}

/// Placeholder substitution and asset path rewriting.
pub trait Substituter: Send + Sync {
    /// Replace every occurrence of `placeholder` in `document` with `content`.
    fn replace_placeholder(&self, document: &str, placeholder: &str, content: &str) -> Substitution;

    /// Apply every rule to `text`, in order.
    fn rewrite_asset_paths(&self, text: &str, rules: &[RewriteRule]) -> String;

    /// Names of all `<!-- NAME -->` markers in `document`, in order of appearance.
    fn placeholder_names(&self, document: &str) -> Vec<String>;
}

/// Exact, case-sensitive substring substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralSubstituter;

impl Substituter for LiteralSubstituter {
    fn replace_placeholder(&self, document: &str, placeholder: &str, content: &str) -> Substitution {
        let count = document.matches(placeholder).count();
        let text = if count == 0 {
            document.to_string()
        } else {
            document.replace(placeholder, content)
        };

        Substitution { text, count }
    }

    fn rewrite_asset_paths(&self, text: &str, rules: &[RewriteRule]) -> String {
        rules
            .iter()
            .fold(text.to_string(), |acc, rule| acc.replace(&rule.from, &rule.to))
    }

    fn placeholder_names(&self, document: &str) -> Vec<String> {
        static RE: LazyLock<Regex> = LazyLock::new(|| {
            // Uppercase marker comments with exactly one space on each side.
            Regex::new(r"<!-- ([A-Z0-9][A-Z0-9_-]*) -->").expect("Invalid placeholder regex")
        });

        RE.captures_iter(document)
            .map(|c| c[1].to_string())
            .collect()
    }
}

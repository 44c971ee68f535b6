//! Assembler for the CyberUXcellence Awards site.
//!
//! Merges a page template, an ordered set of core stylesheets and scripts, and a
//! directory of component folders into one `index.html`, `styles.css` and
//! `scripts.js`, then copies static assets and points asset URLs at the copies.

pub mod assets;
pub mod builder;
pub mod bundle;
pub mod component;
pub mod config;
pub mod files;
pub mod html;
pub mod substitute;

pub use assets::AssetReport;
pub use builder::{BuildError, BuildResult, SiteBuilder};
pub use bundle::{Bundle, BundleKind};
pub use component::{discover_components, Component, Discovery};
pub use config::{url_path, BuildConfig};
pub use html::{HtmlFragment, HtmlReport};
pub use substitute::{LiteralSubstituter, RewriteRule, RewriteRules, Substituter};

//! HTML stage: inserts component markup into the page template.

use serde::Serialize;

use crate::builder::BuildError;
use crate::component::{placeholder, Component};
use crate::config::BuildConfig;
use crate::files::{read_optional, read_required, write_output};
use crate::substitute::Substituter;

/// Markup contributed by one component.
#[derive(Debug, Clone)]
pub struct HtmlFragment {
    /// Component directory name
    pub component: String,

    /// Marker name (`HEADER` for `<!-- HEADER -->`)
    pub placeholder_name: String,

    /// Raw file contents
    pub html: String,
}

/// What the HTML stage inserted and what it could not place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlReport {
    /// Components whose markup was inserted
    pub inserted: Vec<String>,

    /// Components with markup but no placeholder in the template
    pub orphaned_components: Vec<String>,

    /// Placeholders still present in the merged page
    pub unmatched_placeholders: Vec<String>,
}

impl HtmlReport {
    pub fn has_orphans(&self) -> bool {
        !self.orphaned_components.is_empty() || !self.unmatched_placeholders.is_empty()
    }
}

/// Substitute each fragment into `template`, in fragment order.
pub fn merge_html(
    template: &str,
    fragments: &[HtmlFragment],
    substituter: &dyn Substituter,
) -> (String, HtmlReport) {
    let mut report = HtmlReport::default();
    let mut merged = template.to_string();

    for fragment in fragments {
        let marker = placeholder(&fragment.placeholder_name);
        let result = substituter.replace_placeholder(&merged, &marker, &fragment.html);

        if result.count > 0 {
            report.inserted.push(fragment.component.clone());
        } else {
            report.orphaned_components.push(fragment.component.clone());
        }

        merged = result.text;
    }

    // Markers can arrive through component markup, so scan the merged page.
    for name in substituter.placeholder_names(&merged) {
        if !report.unmatched_placeholders.contains(&name) {
            report.unmatched_placeholders.push(name);
        }
    }

    (merged, report)
}

/// Read component markup. Components without an HTML file contribute nothing.
pub fn collect_fragments(components: &[Component]) -> Result<Vec<HtmlFragment>, BuildError> {
    let mut fragments = Vec::new();

    for component in components {
        let Some(path) = &component.html else {
            continue;
        };

        if let Some(html) = read_optional(path)? {
            fragments.push(HtmlFragment {
                component: component.name.clone(),
                placeholder_name: component.placeholder_name(),
                html,
            });
        }
    }

    Ok(fragments)
}

/// Build `index.html` from the template and component markup.
pub fn build_html(
    config: &BuildConfig,
    components: &[Component],
    substituter: &dyn Substituter,
) -> Result<HtmlReport, BuildError> {
    if !config.template.is_file() {
        return Err(BuildError::TemplateNotFound(config.template.clone()));
    }

    let template = read_required(&config.template)?;
    let fragments = collect_fragments(components)?;
    let (merged, report) = merge_html(&template, &fragments, substituter);

    for name in &report.orphaned_components {
        if config.strict {
            tracing::warn!("Component {} has no placeholder in the template", name);
        } else {
            tracing::debug!("Component {} has no placeholder in the template", name);
        }
    }
    for name in &report.unmatched_placeholders {
        if config.strict {
            tracing::warn!("Placeholder {} was left unfilled", placeholder(name));
        } else {
            tracing::debug!("Placeholder {} was left unfilled", placeholder(name));
        }
    }

    if config.strict && report.has_orphans() {
        return Err(BuildError::Strict(format!(
            "{} orphaned component(s), {} unmatched placeholder(s)",
            report.orphaned_components.len(),
            report.unmatched_placeholders.len()
        )));
    }

    let output = config.html_output();
    write_output(&output, &merged)?;

    tracing::info!(
        "Wrote {} ({} components inserted)",
        output.display(),
        report.inserted.len()
    );

    Ok(report)
}

//! Error summary rendering.

use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul, A, H1, P};
use tracing::debug;

use crate::anchor::AnchorPath;
use crate::collector::{ErrorCollector, ErrorEntry};
use crate::config::FormTheme;
use crate::error::Result;
use crate::i18n::Translator;
use crate::model::Entity;

/// Renders the summary box listing every error of an entity graph.
#[derive(Debug, Clone, Copy)]
pub struct ErrorSummaryRenderer<'a> {
    collector: ErrorCollector<'a>,
    theme: &'a FormTheme,
}

impl<'a> ErrorSummaryRenderer<'a> {
    /// Creates a renderer with the default theme.
    pub fn new(translator: &'a dyn Translator) -> Self {
        Self {
            collector: ErrorCollector::new(translator),
            theme: FormTheme::default_ref(),
        }
    }

    /// Uses a custom theme.
    #[must_use]
    pub fn with_theme(mut self, theme: &'a FormTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Renders the summary, or `None` when nothing in the graph has errors.
    pub fn render(
        &self,
        entity: Option<&dyn Entity>,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<String>> {
        let entries = self.collector.collect(entity)?;
        Ok(self.render_entries(&entries, title, description))
    }

    /// Renders the summary with ids under `path`, as a form named by an
    /// object name other than the entity's param key lays them out.
    pub fn render_at(
        &self,
        entity: &dyn Entity,
        path: &AnchorPath,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<String>> {
        let entries = self.collector.collect_at(entity, path)?;
        Ok(self.render_entries(&entries, title, description))
    }

    /// Renders already collected entries, or `None` when there are none.
    pub fn render_entries(
        &self,
        entries: &[ErrorEntry],
        title: &str,
        description: Option<&str>,
    ) -> Option<String> {
        if entries.is_empty() {
            debug!("no errors, error summary suppressed");
            return None;
        }

        let theme = self.theme;
        let html = Element::<Div>::new()
            .class(&theme.error_summary)
            .attr("role", &theme.error_summary_role)
            .attr("aria-labelledby", &theme.error_summary_heading_id)
            .attr("tabindex", "-1")
            .child::<H1, _>(|h| {
                h.id(&theme.error_summary_heading_id)
                    .class(&theme.error_summary_heading)
                    .text(title)
            })
            .when(description.is_some(), |d| {
                d.child::<P, _>(|p| p.text(description.unwrap_or_default()))
            })
            .child::<Ul, _>(|ul| {
                ul.class(&theme.error_summary_list)
                    .children(entries, |entry, li: Element<Li>| {
                        li.child::<A, _>(|a| {
                            a.attr("href", format!("#{}", entry.anchor_id))
                                .text(&entry.message)
                        })
                    })
            })
            .render();

        debug!(errors = entries.len(), "error summary rendered");
        Some(html)
    }
}

/// Renders an error summary for `entity` with the default theme.
pub fn error_summary(
    entity: Option<&dyn Entity>,
    translator: &dyn Translator,
    title: &str,
    description: Option<&str>,
) -> Result<Option<String>> {
    ErrorSummaryRenderer::new(translator).render(entity, title, description)
}

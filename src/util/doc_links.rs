//! Recognition of document links inside rendered summaries.
//!
//! A document link is an href of the form `/documents/<id>`, optionally
//! prefixed by one of the site's recognized origins. The trailing `<id>`
//! names the class (`document-<id>`) carried by every element elsewhere on
//! the page that belongs to the same document.

#[cfg(test)]
#[path = "doc_links_test.rs"]
mod doc_links_test;

use crate::config::SummaryConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLinkPattern {
    origins: Vec<String>,
    path_prefix: String,
    class_prefix: String,
}

impl DocLinkPattern {
    pub fn new(origins: Vec<String>, path_prefix: impl Into<String>, class_prefix: impl Into<String>) -> Self {
        Self { origins, path_prefix: path_prefix.into(), class_prefix: class_prefix.into() }
    }

    #[must_use]
    pub fn from_config(config: &SummaryConfig) -> Self {
        Self::new(
            config.document_origins.clone(),
            config.document_path_prefix.clone(),
            config.document_class_prefix.clone(),
        )
    }

    /// Extract the document id from `href`, or `None` if it is not a
    /// document link.
    #[must_use]
    pub fn document_id<'a>(&self, href: &'a str) -> Option<&'a str> {
        let path = self
            .origins
            .iter()
            .find_map(|origin| href.strip_prefix(origin.as_str()))
            .filter(|rest| rest.starts_with(self.path_prefix.as_str()))
            .unwrap_or(href);
        let id = path.strip_prefix(self.path_prefix.as_str())?;
        (!id.is_empty()).then_some(id)
    }

    /// Class name tagging elements that belong to document `id`.
    #[must_use]
    pub fn document_class(&self, id: &str) -> String {
        format!("{}{id}", self.class_prefix)
    }

    /// Class to highlight for `href`, if it is a document link.
    #[must_use]
    pub fn highlight_target(&self, href: &str) -> Option<String> {
        self.document_id(href).map(|id| self.document_class(id))
    }
}

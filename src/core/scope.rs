//! Isolated rendering scope owned by one pipeline host.
//!
//! The scope is a markup buffer whose content is fully owned and replaced by
//! the pipeline. Widgets' own render and post-render hooks read it back to
//! locate rendered elements (a drawing surface, typically).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenderScope {
    content: String,
}

impl RenderScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire scope content. No incremental patching.
    pub fn replace_content(&mut self, markup: impl Into<String>) {
        self.content = markup.into();
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the first element with the given tag name, opening tag through
    /// matching close (or the self-closing tag itself).
    ///
    /// A lightweight scan, not an HTML parser: enough for hooks to locate a
    /// drawing surface in markup the pipeline itself produced.
    #[must_use]
    pub fn find_element(&self, tag: &str) -> Option<&str> {
        let open = format!("<{tag}");
        let start = self.content.find(&open)?;
        let after_open = &self.content[start..];

        let open_end = after_open.find('>')?;
        if after_open[..open_end].ends_with('/') {
            return Some(&after_open[..=open_end]);
        }

        let close = format!("</{tag}>");
        let close_at = after_open.find(&close)?;
        Some(&after_open[..close_at + close.len()])
    }

    /// Inner text of the first element with the given tag name, if any.
    #[must_use]
    pub fn element_text(&self, tag: &str) -> Option<&str> {
        let element = self.find_element(tag)?;
        let open_end = element.find('>')?;
        if element[..open_end].ends_with('/') {
            return Some("");
        }
        let close = format!("</{tag}>");
        let close_at = element.rfind(&close)?;
        Some(&element[open_end + 1..close_at])
    }
}

//! Reference resolver / link formatter.
//!
//! Maps a type-name expression — possibly a pipe-separated union such as
//! `Bag|Traversable` — to zero or more Markdown hyperlinks, using the
//! completed model as its lookup table. Union members absent from the model
//! are dropped silently: a reference to an unknown type degrades to absence,
//! never to a broken link.
//!
//! The formatter is a plain value constructed with the model and the
//! link-template pattern as explicit captured state; the rendering layer
//! receives it as a collaborator, not through ambient globals.

use crate::model::Model;

/// Default link template; `%c` is replaced with the short type name.
pub const DEFAULT_LINK_TEMPLATE: &str = "%c.md";

/// Default extension the `.md` link targets are rewritten to.
pub const DEFAULT_LINK_EXTENSION: &str = "html";

/// Formats cross-type Markdown links against a completed [`Model`].
#[derive(Debug)]
pub struct LinkFormatter<'a> {
    model: &'a Model,
    link_template: String,
    target_extension: String,
}

impl<'a> LinkFormatter<'a> {
    pub fn new(model: &'a Model) -> Self {
        LinkFormatter {
            model,
            link_template: DEFAULT_LINK_TEMPLATE.to_string(),
            target_extension: DEFAULT_LINK_EXTENSION.to_string(),
        }
    }

    /// Override the link template (`%c` placeholder for the short name).
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.link_template = template.into();
        self
    }

    /// Override the extension that replaces `.md` in link targets.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.target_extension = extension.into();
        self
    }

    /// Format links for every known member of a type-name union.
    ///
    /// Each candidate is trimmed of separator noise, looked up in the model,
    /// and — when known — rendered as `[label](target)` where the target is
    /// the short name substituted into the template, extension-rewritten and
    /// lower-cased. Labels are never lower-cased. Unknown candidates
    /// disappear; an empty union yields an empty string.
    pub fn class_link(&self, expression: &str, label: Option<&str>) -> String {
        let mut links = Vec::new();

        for candidate in expression.split('|') {
            let candidate = candidate.trim_matches(|c| c == '\\' || c == ' ');
            if !self.model.contains(candidate) {
                continue;
            }

            let short_name = candidate.rsplit('\\').next().unwrap_or(candidate);
            let target = self
                .link_template
                .replace("%c", short_name)
                .replace(".md", &format!(".{}", self.target_extension))
                .to_lowercase();

            let label = label.unwrap_or(candidate);
            links.push(format!("[{}]({})", label, target));
        }

        links.join("|")
    }
}

// ============================================================================
// Tests
// ============================================================================

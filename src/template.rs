//! Template rendering for alert text
//!
//! Wraps a strict-mode Handlebars registry behind one `Renderer` type.
//! All human-facing alert text (title, alias, tags, description) is
//! produced here, along with the post-processing passes applied to it.

use handlebars::{Handlebars, Template};
use serde_json::Value;

use crate::error::TemplateError;

/// Template engine for alert text
///
/// Strict mode is on: referencing a field the context does not expose
/// is an error, not an empty substitution.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        Self { registry }
    }

    /// Render a template string against an event context
    pub fn render(&self, template: &str, context: &Value) -> Result<String, TemplateError> {
        // Compile separately first so syntax problems are reported as such
        Template::compile(template).map_err(|e| TemplateError::Syntax(e.to_string()))?;
        self.registry
            .render_template(template, context)
            .map_err(|e| TemplateError::Render(e.to_string()))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Hard byte-length cut with no ellipsis.
///
/// When the limit would split a multi-byte character the cut backs off
/// to the preceding character boundary.
pub fn trim(mut value: String, limit: usize) -> String {
    if value.len() > limit {
        let mut cut = limit;
        while cut > 0 && !value.is_char_boundary(cut) {
            cut -= 1;
        }
        value.truncate(cut);
    }
    value
}

/// Replace `-`, `/` and `\` with spaces, then capitalize the first
/// letter of every word. Spacing is otherwise preserved.
pub fn title_prettify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        let c = match c {
            '-' | '/' | '\\' => ' ',
            other => other,
        };
        if c == ' ' {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

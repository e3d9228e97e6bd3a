//! Alert identity and description rendering
//!
//! Derives the title, alias and tags of an alert from the configured
//! templates, plus the description body.

use log::warn;

use crate::config::Settings;
use crate::event::Event;
use crate::template::{self, Renderer};

/// Rendered identity of an alert
///
/// The alias is the durable lookup identity: never trimmed, never
/// prettified. The title is cosmetic and size-limited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedIdentity {
    pub title: String,
    pub alias: String,
    pub tags: Vec<String>,
}

impl RenderedIdentity {
    /// True for the identity produced by a failed render; callers skip
    /// alerting instead of acting on it
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.alias.is_empty() && self.tags.is_empty()
    }
}

/// Derive the alert identity from the configured templates.
///
/// Any render failure is logged and yields an empty identity.
pub fn derive_identity(
    event: &Event,
    settings: &Settings,
    renderer: &Renderer,
) -> RenderedIdentity {
    let context = event.template_context();

    let alias = match renderer.render(&settings.alias_template, &context) {
        Ok(alias) => alias,
        Err(e) => {
            warn!("alias template failed: {e}");
            return RenderedIdentity::default();
        }
    };

    let title = match renderer.render(&settings.message_template, &context) {
        Ok(title) => title,
        Err(e) => {
            warn!("message template failed: {e}");
            return RenderedIdentity::default();
        }
    };
    let title = template::trim(title, settings.message_limit);
    let title = if settings.title_prettify {
        template::title_prettify(&title)
    } else {
        title
    };

    let mut tags = Vec::with_capacity(settings.tags_templates.len());
    for tag_template in &settings.tags_templates {
        match renderer.render(tag_template, &context) {
            Ok(tag) => {
                if !tag.is_empty() {
                    tags.push(tag);
                }
            }
            Err(e) => {
                warn!("tag template {tag_template:?} failed: {e}");
                return RenderedIdentity::default();
            }
        }
    }

    RenderedIdentity { title, alias, tags }
}

/// Render the alert description, trimmed to the configured limit.
///
/// A render failure is logged and yields an empty description.
pub fn derive_description(event: &Event, settings: &Settings, renderer: &Renderer) -> String {
    let context = event.template_context();
    match renderer.render(&settings.description_template, &context) {
        Ok(description) => template::trim(description, settings.description_limit),
        Err(e) => {
            warn!("description template failed: {e}");
            String::new()
        }
    }
}

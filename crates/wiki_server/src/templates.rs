//! Handlebars page templates and their typed contexts.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every context value is escaped by Handlebars except `EntryPage::html`,
//! which is already-rendered markdown.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../templates/header.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
];

const PAGES: [(&str, &str); 6] = [
    ("index", include_str!("../templates/index.hbs")),
    ("entry", include_str!("../templates/entry.hbs")),
    ("search", include_str!("../templates/search.hbs")),
    ("new", include_str!("../templates/new.hbs")),
    ("edit", include_str!("../templates/edit.hbs")),
    ("message", include_str!("../templates/message.hbs")),
];

/// Link to one entry page.
#[derive(Debug, Clone, Serialize)]
pub struct EntryLink {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub page_title: String,
    pub entries: Vec<EntryLink>,
}

#[derive(Debug, Serialize)]
pub struct EntryPage {
    pub page_title: String,
    pub title: String,
    pub html: String,
    pub edit_href: String,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub page_title: String,
    pub query: String,
    pub entries: Vec<EntryLink>,
}

/// Create and edit forms share one context shape.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub page_title: String,
    pub action: String,
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessagePage {
    pub page_title: String,
    pub message: String,
}

pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, RenderError> {
        self.registry.render(name, context)
    }
}

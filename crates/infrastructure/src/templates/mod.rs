//! Template engine for the landing page
//!
//! The landing template is embedded at compile time. A `templates_dir`
//! containing an `index.html` replaces it at startup.

use std::path::Path;
use std::sync::Arc;

use domain::ProficiencyLevel;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info};

/// Name under which the landing page is registered
pub const LANDING_TEMPLATE: &str = "index.html";

const EMBEDDED_LANDING: &str = include_str!("landing.html");

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// A level offered on the landing page
#[derive(Debug, Clone, Serialize)]
pub struct LevelOption {
    /// CEFR code
    pub code: &'static str,
    /// Human-readable label
    pub label: &'static str,
}

/// Data rendered into the landing page
#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    /// Page title
    pub title: String,
    /// Selectable levels, beginner first
    pub levels: Vec<LevelOption>,
    /// Level preselected in the picker
    pub default_level: &'static str,
    /// Word limit the client sends with each message
    pub max_words: usize,
    /// Longest message the text box accepts
    pub max_message_chars: usize,
}

impl LandingPage {
    /// Landing page listing every proficiency level
    pub fn new(max_words: usize, max_message_chars: usize) -> Self {
        Self {
            title: "Hablamos".to_string(),
            levels: ProficiencyLevel::all()
                .iter()
                .map(|level| LevelOption {
                    code: level.code(),
                    label: level.label(),
                })
                .collect(),
            default_level: ProficiencyLevel::default().code(),
            max_words,
            max_message_chars,
        }
    }
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.tera.get_template_names().count())
            .finish()
    }
}

impl TemplateEngine {
    /// Create the engine with the embedded landing page
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_templates_dir(None)
    }

    /// Create the engine, preferring `<dir>/index.html` when it exists
    pub fn with_templates_dir(dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html", ".htm"]);

        let custom = dir
            .map(|d| d.join(LANDING_TEMPLATE))
            .filter(|path| path.is_file());

        match custom {
            Some(path) => {
                tera.add_template_file(&path, Some(LANDING_TEMPLATE))
                    .map_err(|e| TemplateError::Compile(e.to_string()))?;
                info!(path = %path.display(), "Loaded custom landing template");
            },
            None => {
                tera.add_raw_template(LANDING_TEMPLATE, EMBEDDED_LANDING)
                    .map_err(|e| TemplateError::Compile(e.to_string()))?;
                debug!("Using embedded landing template");
            },
        }

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render the landing page
    pub fn render_landing(&self, page: &LandingPage) -> Result<String, TemplateError> {
        let context =
            Context::from_serialize(page).map_err(|e| TemplateError::Render(e.to_string()))?;
        self.tera
            .render(LANDING_TEMPLATE, &context)
            .map_err(TemplateError::from)
    }
}

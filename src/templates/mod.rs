//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary; the stylesheet is written next to
//! the generated pages unless the site provides its own.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::helpers::html_escape;

/// Stylesheet shipped with the built-in templates
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Output path of the stylesheet, relative to the public dir
pub const STYLESHEET_PATH: &str = "css/style.css";

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        // Autoescape stays on for `.html`, with an escaper that leaves `/`
        // alone; rendered markdown is printed with `safe`
        let mut tera = Tera::default();
        tera.set_escape_fn(html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("about.html", include_str!("site/about.html")),
            (
                "partials/head.html",
                include_str!("site/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Links in the site header
#[derive(Debug, Clone, Serialize)]
pub struct NavData {
    pub home: String,
    pub about: String,
}

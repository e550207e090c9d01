//! Theme engine with embedded Tera templates.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

use crate::config::AssetConfig;
use crate::menu::NavLink;
use crate::routes::helpers::html_escape;

/// Templates compiled into the binary, as (name, source).
const TEMPLATES: &[(&str, &str)] = &[
    (
        "layout/master.html",
        include_str!("../../templates/layout/master.html"),
    ),
    (
        "layout/navigation.html",
        include_str!("../../templates/layout/navigation.html"),
    ),
    ("shame/css.html", include_str!("../../templates/shame/css.html")),
    ("shame/js.html", include_str!("../../templates/shame/js.html")),
    (
        "admin/dashboard.html",
        include_str!("../../templates/admin/dashboard.html"),
    ),
    (
        "admin/resource.html",
        include_str!("../../templates/admin/resource.html"),
    ),
];

/// The layout every admin page extends.
pub const MASTER_TEMPLATE: &str = "layout/master.html";

/// What the page shell wraps around a content fragment.
#[derive(Debug, Clone, Copy)]
pub struct PageShell<'a> {
    /// Page title, appended to "Caravel Admin - ".
    pub title: &'a str,
    /// Sidebar links.
    pub nav: &'a [NavLink],
    /// Already-rendered HTML for the container area.
    pub content: &'a str,
}

/// Theme engine for rendering the admin shell.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Stylesheets and scripts injected into every page.
    assets: AssetConfig,
}

impl ThemeEngine {
    /// Create a theme engine from the embedded templates.
    pub fn new(assets: AssetConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Escaping is explicit through the `esc` filter.
        tera.autoescape_on(vec![]);
        Self::register_filters(&mut tera);

        tera.add_raw_templates(TEMPLATES.iter().copied())
            .context("failed to initialize Tera templates")?;

        debug!(count = tera.get_template_names().count(), "loaded templates");

        Ok(Self { tera, assets })
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera) {
        // HTML-escape text and attribute values
        tera.register_filter(
            "esc",
            |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let text = match value {
                    tera::Value::String(s) => s.clone(),
                    tera::Value::Null => String::new(),
                    other => other.to_string(),
                };
                Ok(tera::Value::String(html_escape(&text)))
            },
        );
    }

    /// Add or replace a template at runtime (host applications use this to
    /// supply their own pages extending `layout/master.html`).
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, source)
            .with_context(|| format!("failed to add template: {name}"))
    }

    /// Render only the navigation list.
    pub fn render_navigation(&self, nav: &[NavLink]) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("nav", nav);

        self.tera
            .render("layout/navigation.html", &context)
            .context("failed to render navigation")
    }

    /// Wrap a content fragment in the full page shell.
    pub fn render_shell(&self, page: &PageShell<'_>) -> Result<String> {
        self.render_page(MASTER_TEMPLATE, page, tera::Context::new())
    }

    /// Render a page template that extends the master layout.
    ///
    /// `context` carries page-specific values; the shell values (title,
    /// navigation, content, assets) are inserted on top of it.
    pub fn render_page(
        &self,
        template: &str,
        page: &PageShell<'_>,
        mut context: tera::Context,
    ) -> Result<String> {
        context.insert("title", page.title);
        context.insert("nav", page.nav);
        context.insert("content", page.content);
        context.insert("assets", &self.assets);

        self.tera
            .render(template, &context)
            .with_context(|| format!("failed to render page template: {template}"))
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .field("stylesheets", &self.assets.stylesheets.len())
            .field("scripts", &self.assets.scripts.len())
            .finish()
    }
}

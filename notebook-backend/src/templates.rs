//! Server-side pages rendered with minijinja.
//!
//! Built-in templates are compiled into the binary. A `homepage.html` or
//! `browse.html` file in the templates directory replaces the built-in one.

use minijinja::{context, Environment};
use std::path::Path;

use crate::error::Result;
use crate::notes::display_date;
use crate::search::ResultEntry;

pub const HOMEPAGE: &str = "homepage.html";
pub const BROWSE: &str = "browse.html";

const DEFAULT_HOMEPAGE: &str = include_str!("../static/templates/homepage.html");
const DEFAULT_BROWSE: &str = include_str!("../static/templates/browse.html");

#[derive(Debug, Clone)]
pub struct Templates {
    homepage: String,
    browse: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            homepage: DEFAULT_HOMEPAGE.to_string(),
            browse: DEFAULT_BROWSE.to_string(),
        }
    }
}

impl Templates {
    /// Load templates, preferring files found in `dir`
    pub fn load(dir: &Path) -> std::io::Result<Self> {
        Ok(Self {
            homepage: load_one(dir, HOMEPAGE, DEFAULT_HOMEPAGE)?,
            browse: load_one(dir, BROWSE, DEFAULT_BROWSE)?,
        })
    }

    pub fn render_home(&self) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(HOMEPAGE, &self.homepage)?;
        let tmpl = env.get_template(HOMEPAGE)?;
        Ok(tmpl.render(context! {})?)
    }

    pub fn render_browse(&self, entry: &ResultEntry) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(BROWSE, &self.browse)?;
        let tmpl = env.get_template(BROWSE)?;

        let prev_id = entry.index.checked_sub(1);
        let next_id = Some(entry.index + 1).filter(|next| *next < entry.total);

        Ok(tmpl.render(context! {
            date => display_date(&entry.name),
            data => entry.content.as_str(),
            item_id => entry.index,
            total => entry.total,
            prev_id => prev_id,
            next_id => next_id,
        })?)
    }
}

fn load_one(dir: &Path, name: &str, default: &str) -> std::io::Result<String> {
    let path = dir.join(name);
    if path.is_file() {
        log::info!("Using template override {}", path.display());
        std::fs::read_to_string(&path)
    } else {
        Ok(default.to_string())
    }
}

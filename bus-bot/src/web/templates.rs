//! Askama templates for the web frontend.

use askama::Template;

/// Chat page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub origin: String,
    pub destination: String,
}

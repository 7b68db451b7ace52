//! Two-phase page composition: a named content template rendered against its
//! data, then wrapped into the shared layout.

pub mod funcs;

use minijinja::{context, path_loader, Environment, Value};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// The shared outer layout every page renders into.
const LAYOUT: &str = "base.html";

/// Template load or render failure. Recoverable by design: the handler layer
/// decides whether to emit a best-effort body or a clean error.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders operational pages from `views_dir`. The environment carries the
/// fixed function set (`date_format`, `timestamp_format`, `intplus`,
/// `begin_end_format`) in both render phases.
pub struct PageComposer {
    env: Environment<'static>,
}

impl PageComposer {
    pub fn new(views_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(views_dir));
        env.add_function("date_format", funcs::date_format);
        env.add_function("timestamp_format", funcs::timestamp_format);
        env.add_function("intplus", funcs::intplus);
        env.add_function("begin_end_format", funcs::begin_end_format);
        Self { env }
    }

    /// Render the `name` template bound to `data`, then wrap the output into
    /// the layout. The same `data` is visible to both phases (the layout
    /// renders shared chrome from it); the phase-1 markup is injected as
    /// `content`, pre-escaped — the layout must not escape it again.
    pub fn render<S: Serialize>(&self, name: &str, data: S) -> Result<Vec<u8>, RenderError> {
        let data = Value::from_serialize(&data);
        let content = self
            .env
            .get_template(name)?
            .render(context! { data => data.clone() })?;
        let page = self.env.get_template(LAYOUT)?.render(context! {
            content => Value::from_safe_string(content),
            data => data,
        })?;
        Ok(page.into_bytes())
    }
}

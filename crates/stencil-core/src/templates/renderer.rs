//! MiniJinja-based renderer for template contents and paths.
//!
//! Content rendering runs with **strict undefined behavior**: any variable a
//! template references must be present in the [`ParameterSet`], otherwise
//! rendering fails with a [`RenderError`] naming the variable and the template
//! path. Trailing newlines are kept, so generated files end exactly like their
//! sources.
//!
//! Delimiters default to `{% %}`, `{{ }}` and `{# #}`. A template whose target
//! language already uses those (Erlang terms, for example) attaches a
//! [`DelimiterConfig`] and text using the default delimiters passes through
//! untouched.
//!
//! Path rendering is a separate, much simpler operation: every occurrence of
//! the literal `appname` token is replaced with the `appname` parameter.

use std::path::{Path, PathBuf};

use minijinja::syntax::SyntaxConfig;
use minijinja::{path_loader, Environment, ErrorKind, Template, UndefinedBehavior};

use crate::error::{RenderError, Result, StencilError};
use crate::params::{ParameterSet, APPNAME};
use crate::templates::DelimiterConfig;

/// Renders template text against a parameter set.
///
/// When a root directory is set, `{% include %}` and `{% extends %}` resolve
/// template names (forward-slash paths) relative to it.
#[derive(Clone)]
pub struct TemplateRenderer {
    syntax: SyntaxConfig,
    root: Option<PathBuf>,
}

impl TemplateRenderer {
    /// Renderer with the default delimiters.
    pub fn new() -> Self {
        Self {
            syntax: SyntaxConfig::default(),
            root: None,
        }
    }

    /// Renderer using the given delimiter overrides.
    pub fn with_delimiters(delimiters: &DelimiterConfig) -> Result<Self> {
        let (block_start, block_end) = delimiters.block();
        let (variable_start, variable_end) = delimiters.variable();
        let (comment_start, comment_end) = delimiters.comment();

        let syntax = SyntaxConfig::builder()
            .block_delimiters(block_start, block_end)
            .variable_delimiters(variable_start, variable_end)
            .comment_delimiters(comment_start, comment_end)
            .build()
            .map_err(|e| StencilError::InvalidDelimiters(e.to_string()))?;

        Ok(Self { syntax, root: None })
    }

    /// Renderer for an optional delimiter configuration.
    pub fn for_delimiters(delimiters: Option<&DelimiterConfig>) -> Result<Self> {
        match delimiters {
            Some(d) => Self::with_delimiters(d),
            None => Ok(Self::new()),
        }
    }

    /// Resolve includes relative to `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Render `text`, reporting errors against `name`.
    ///
    /// `name` should be the template's path relative to its root, with `/`
    /// separators.
    pub fn render(
        &self,
        name: &str,
        text: &str,
        params: &ParameterSet,
    ) -> std::result::Result<String, RenderError> {
        let env = self.environment();
        let template = env
            .template_from_named_str(name, text)
            .map_err(|e| render_error(name, &e, None))?;
        render_template(name, &template, params)
    }

    fn environment<'s>(&self) -> Environment<'s> {
        let mut env = Environment::new();
        env.set_syntax(self.syntax.clone());
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        if let Some(root) = &self.root {
            env.set_loader(path_loader(root.clone()));
        }
        env
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_template(
    name: &str,
    template: &Template<'_, '_>,
    params: &ParameterSet,
) -> std::result::Result<String, RenderError> {
    template.render(params).map_err(|e| {
        let variable = if matches!(e.kind(), ErrorKind::UndefinedError) {
            template
                .undeclared_variables(false)
                .into_iter()
                .filter(|var| !params.contains_key(var))
                .min()
        } else {
            None
        };
        render_error(name, &e, variable)
    })
}

fn render_error(name: &str, err: &minijinja::Error, variable: Option<String>) -> RenderError {
    RenderError {
        path: name.to_string(),
        variable,
        message: err.to_string(),
    }
}

/// Substitute the `appname` parameter into a path.
///
/// Every occurrence of the token is replaced, including inside longer
/// segments (`appname_test.py` becomes `hello_test.py`). Without an `appname`
/// parameter the path is returned unchanged.
pub fn render_path(path: &str, params: &ParameterSet) -> String {
    match params.get(APPNAME) {
        Some(appname) => path.replace(APPNAME, appname),
        None => path.to_string(),
    }
}

/// Render a relative path with `/` separators regardless of the host.
pub fn to_template_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ParameterSet {
        ParameterSet::new()
            .with("appname", "hello")
            .with("realm", "realm1")
    }

    #[test]
    fn test_render_substitutes_variables() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("config.json", r#"{"realm": "{{ realm }}"}"#, &params())
            .unwrap();
        assert_eq!(out, r#"{"realm": "realm1"}"#);
    }

    #[test]
    fn test_render_keeps_trailing_newline() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("README", "app: {{ appname }}\n", &params())
            .unwrap();
        assert_eq!(out, "app: hello\n");
    }

    #[test]
    fn test_render_undefined_variable_is_error() {
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render("web/index.html", "<h1>{{ title }}</h1>", &params())
            .unwrap_err();
        assert_eq!(err.path, "web/index.html");
        assert_eq!(err.variable.as_deref(), Some("title"));
    }

    #[test]
    fn test_render_syntax_error_has_no_variable() {
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render("broken.txt", "{% if %}", &params())
            .unwrap_err();
        assert_eq!(err.path, "broken.txt");
        assert!(err.variable.is_none());
    }

    #[test]
    fn test_custom_delimiters() {
        let delimiters = DelimiterConfig::erlang();
        let renderer = TemplateRenderer::with_delimiters(&delimiters).unwrap();
        let source = "{ok, {{realm}}}. @= realm =@\n";
        let out = renderer.render("src/app.erl", source, &params()).unwrap();
        assert_eq!(out, "{ok, {{realm}}}. realm1\n");
    }

    #[test]
    fn test_custom_delimiters_comment() {
        let renderer = TemplateRenderer::with_delimiters(&DelimiterConfig::erlang()).unwrap();
        let out = renderer
            .render("rel/sys.config", "@# note #@[{realm, <<\"@= realm =@\">>}].", &params())
            .unwrap();
        assert_eq!(out, "[{realm, <<\"realm1\">>}].");
    }

    #[test]
    fn test_render_path_replaces_every_occurrence() {
        assert_eq!(
            render_path("appname/appname_test.py", &params()),
            "hello/hello_test.py"
        );
        assert_eq!(render_path("web/index.html", &params()), "web/index.html");
    }

    #[test]
    fn test_render_path_without_appname() {
        let params = ParameterSet::new().with("realm", "realm1");
        assert_eq!(render_path("appname/main.py", &params), "appname/main.py");
    }

    #[test]
    fn test_template_name_uses_forward_slashes() {
        let path: PathBuf = ["web", "js", "app.js"].iter().collect();
        assert_eq!(to_template_name(&path), "web/js/app.js");
    }

    #[test]
    fn test_include_resolves_against_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("partials")).unwrap();
        std::fs::write(dir.path().join("partials/realm.txt"), "realm={{ realm }}").unwrap();

        let renderer = TemplateRenderer::new().with_root(dir.path());
        let out = renderer
            .render("main.txt", "{% include 'partials/realm.txt' %}\n", &params())
            .unwrap();
        assert_eq!(out, "realm=realm1\n");
    }
}

//! Template engine for scaffolding files.

use crate::error::{CodegenError, Result};
use crate::escape;
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;

pub const README: &str = "readme";
pub const PUBSPEC: &str = "pubspec";

const README_TEMPLATE: &str = r#"# {{single_line title}}

Generated by uiforge for the `{{target}}` target ({{framework}}).

## Files

{{#each files}}
- `{{this}}`
{{/each}}

## Running

{{#if commands}}
Tooling is optional; the sources are complete as generated.

{{#each commands}}
    {{this}}
{{/each}}
{{else}}
Open `index.html` in a browser. No build step is required.
{{/if}}
"#;

const PUBSPEC_TEMPLATE: &str = r#"name: {{package}}
description: {{yaml_str description}}
publish_to: "none"
version: 0.1.0

environment:
  sdk: ">=3.0.0 <4.0.0"

dependencies:
  flutter:
    sdk: flutter

dev_dependencies:
  flutter_lints: ^3.0.0

flutter:
  uses-material-design: true
"#;

/// Template engine using Handlebars.
///
/// HTML escaping is disabled and strict mode is on: every value reaching a
/// template is either a plain identifier or goes through an escaping helper
/// for the file's own syntax.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with helpers but no templates.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Create an engine with the scaffolding templates registered.
    pub fn with_builtin_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(README, README_TEMPLATE)?;
        engine.register_template(PUBSPEC, PUBSPEC_TEMPLATE)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        register_string_helper(handlebars, "yaml_str", escape::yaml_string);
        register_string_helper(handlebars, "single_line", escape::single_line);
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Register a helper that maps its first string parameter through `convert`.
fn register_string_helper(handlebars: &mut Handlebars, name: &str, convert: fn(&str) -> String) {
    handlebars.register_helper(
        name,
        Box::new(
            move |h: &Helper,
                  _r: &Handlebars,
                  _ctx: &Context,
                  _rc: &mut RenderContext,
                  out: &mut dyn Output|
                  -> HelperResult {
                let param = h
                    .param(0)
                    .and_then(|v| v.value().as_str())
                    .unwrap_or("");
                out.write(&convert(param))?;
                Ok(())
            },
        ),
    );
}

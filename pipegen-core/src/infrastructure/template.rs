// pipegen-core/src/infrastructure/template.rs
//
// Minijinja adapter. Connector configs are JSON that may itself contain
// Helm-style {{ }} placeholders, so the compiler's own templates use the
// [[ ]] / [% %] / [# #] delimiter set instead.

use crate::application::ports::TemplateEngine;
use crate::error::PipegenError;
use crate::infrastructure::error::InfrastructureError;
use minijinja::Environment;
use minijinja::syntax::SyntaxConfig;

pub struct ConnectorRenderer {
    env: Environment<'static>,
}

impl ConnectorRenderer {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();
        let syntax = SyntaxConfig::builder()
            .block_delimiters("[%", "%]")
            .variable_delimiters("[[", "]]")
            .comment_delimiters("[#", "#]")
            .build()?;
        env.set_syntax(syntax);
        Ok(Self { env })
    }
}

impl TemplateEngine for ConnectorRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, PipegenError> {
        self.env
            .render_str(template, context)
            .map_err(|e| PipegenError::Infrastructure(InfrastructureError::Template(e)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn test_render_with_bracket_delimiters() -> Result<()> {
        let renderer = ConnectorRenderer::new()?;
        let out = renderer.render(
            r#"{"name": "[[ env ]]_[[ org ]]_[[ name ]]"}"#,
            &json!({"env": "local", "org": "manabie", "name": "bob_source"}),
        )?;
        assert_eq!(out, r#"{"name": "local_manabie_bob_source"}"#);
        Ok(())
    }

    #[test]
    fn test_helm_braces_pass_through_untouched() -> Result<()> {
        let renderer = ConnectorRenderer::new()?;
        let out = renderer.render(
            r#""password": "{{ .Values.password }}", "db": "[[ database ]]""#,
            &json!({"database": "eureka"}),
        )?;
        assert_eq!(
            out,
            r#""password": "{{ .Values.password }}", "db": "eureka""#
        );
        Ok(())
    }

    #[test]
    fn test_blocks_and_joins() -> Result<()> {
        let renderer = ConnectorRenderer::new()?;
        let out = renderer.render(
            r#"[% if enabled %]on[% else %]off[% endif %]:[[ cols | join(",") ]]"#,
            &json!({"enabled": false, "cols": ["b", "a"]}),
        )?;
        assert_eq!(out, "off:b,a");
        Ok(())
    }

    #[test]
    fn test_render_error_propagates() {
        let renderer = ConnectorRenderer::new().unwrap();
        let err = renderer.render("[% if %]", &serde_json::Value::Null);
        assert!(matches!(
            err,
            Err(PipegenError::Infrastructure(InfrastructureError::Template(_)))
        ));
    }
}

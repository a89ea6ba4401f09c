use minijinja::{Environment, UndefinedBehavior};
use regex::Regex;

use crate::error::GenError;
use crate::fields::FieldSet;

/// The body of every `{{ ... }}` expression, whitespace control included.
const PLACEHOLDER_PATTERN: &str = r"(?s)\{\{-?(?P<expr>.*?)-?\}\}";

/// TemplateEngine fills `{{FIELD_NAME}}` placeholders from a [`FieldSet`].
///
/// Every placeholder must resolve: a template referring to a field the set
/// does not define is an error, never left verbatim in the output.
pub struct TemplateEngine {
    env: Environment<'static>,
    placeholder: Regex,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        env.add_filter("camelcase", crate::filters::filter_camelcase);
        env.add_filter("pascalcase", crate::filters::filter_pascalcase);
        env.add_filter("snakecase", crate::filters::filter_snakecase);
        env.add_filter("kebabcase", crate::filters::filter_kebabcase);
        env.add_filter("screamingsnakecase", crate::filters::filter_screamingsnakecase);

        let placeholder = Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid");
        Self { env, placeholder }
    }

    /// Placeholders in `template_str` that `fields` cannot resolve, in order
    /// of first appearance. Only the part before a `|` filter must name a
    /// field; anything else (`{{1}}`, `{{ "x" }}`) counts as unresolved.
    pub fn unresolved(&self, template_str: &str, fields: &FieldSet) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for cap in self.placeholder.captures_iter(template_str) {
            let name = cap["expr"].split('|').next().unwrap_or_default().trim();
            if !fields.contains(name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }
        missing
    }

    /// Renders `template_str`; `template_name` only labels errors.
    pub fn render(
        &self,
        template_name: &str,
        template_str: &str,
        fields: &FieldSet,
    ) -> Result<String, GenError> {
        let missing = self.unresolved(template_str, fields);
        if !missing.is_empty() {
            let placeholders: Vec<_> = missing.iter().map(|m| format!("{{{{{}}}}}", m)).collect();
            return Err(GenError::template(
                template_name,
                format!("unresolved placeholder(s) {}", placeholders.join(", ")),
            ));
        }

        let template = self
            .env
            .template_from_str(template_str)
            .map_err(|e| GenError::template(template_name, e.to_string()))?;

        template.render(fields).map_err(|e| {
            let message = match e.line() {
                Some(line) => {
                    let error_line = template_str.lines().nth(line - 1).unwrap_or("");
                    format!("{}\n{}", e, error_line)
                }
                None => e.to_string(),
            };
            GenError::template(template_name, message)
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;

    #[test]
    fn test_render_fields() {
        let engine = TemplateEngine::new();
        let fields = FieldSet::new()
            .with(Field::ClassName, "Widget")
            .with(Field::HeaderDef, "WIDGET_H");
        let result = engine
            .render("t", "#ifndef {{HEADER_DEF}}\nclass {{CLASS_NAME}} {{ CLASS_NAME }}\n", &fields)
            .unwrap();
        assert_eq!(result, "#ifndef WIDGET_H\nclass Widget Widget\n");
    }

    #[test]
    fn test_values_are_not_reinterpreted() {
        let engine = TemplateEngine::new();
        let fields = FieldSet::new()
            .with(Field::ClassName, "{{YEAR}}")
            .with(Field::Includes, "#include <a>\n");
        let result = engine.render("t", "{{INCLUDES}}{{CLASS_NAME}}", &fields).unwrap();
        assert_eq!(result, "#include <a>\n{{YEAR}}");
    }

    #[test]
    fn test_unresolved_placeholder_fails() {
        let engine = TemplateEngine::new();
        let fields = FieldSet::new().with(Field::ClassName, "Widget");
        let err = engine
            .render("class_header", "{{CLASS_NAME}} {{UNDEFINED_FIELD}}", &fields)
            .unwrap_err();
        match err {
            GenError::Template { template, message } => {
                assert_eq!(template, "class_header");
                assert!(message.contains("{{UNDEFINED_FIELD}}"), "{}", message);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unresolved_lists_each_name_once() {
        let engine = TemplateEngine::new();
        let missing = engine.unresolved("{{A}} {{ B | snakecase }} {{A}}", &FieldSet::new());
        assert_eq!(missing, vec!["A", "B"]);
    }

    #[test]
    fn test_non_field_expressions_fail() {
        let engine = TemplateEngine::new();
        let fields = FieldSet::new().with(Field::ClassName, "Widget");
        let err = engine
            .render("class_cpp", "Foo f{{1}};\n{{CLASS_NAME}}\n", &fields)
            .unwrap_err();
        assert!(
            matches!(&err, GenError::Template { message, .. } if message.contains("{{1}}")),
            "{}",
            err
        );

        let missing = engine.unresolved("{{- CLASS_NAME -}} {{ 'x' }} {{}}", &fields);
        assert_eq!(missing, vec!["'x'", ""]);
    }

    #[test]
    fn test_filters() {
        let engine = TemplateEngine::new();
        let fields = FieldSet::new().with(Field::ClassName, "ImageLoader");
        let result = engine
            .render("t", "{{ CLASS_NAME | screamingsnakecase }}_H", &fields)
            .unwrap();
        assert_eq!(result, "IMAGE_LOADER_H");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let engine = TemplateEngine::new();
        let text = "int main()\n{\n    return 0;\n}\n";
        assert_eq!(engine.render("t", text, &FieldSet::new()).unwrap(), text);
    }
}

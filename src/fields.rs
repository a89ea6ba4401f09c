use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder names understood by the built-in templates. A template
/// refers to a field as `{{FIELD_NAME}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    TemplateType,
    Copyright,
    Year,
    ClassName,
    FileName,
    InterfaceName,
    InterfaceDef,
    HeaderDef,
    FunctionDeclarations,
    FunctionDefinitions,
    ForwardDeclares,
    Includes,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::TemplateType => "TEMPLATE_TYPE",
            Field::Copyright => "COPYRIGHT",
            Field::Year => "YEAR",
            Field::ClassName => "CLASS_NAME",
            Field::FileName => "FILE_NAME",
            Field::InterfaceName => "INTERFACE_NAME",
            Field::InterfaceDef => "INTERFACE_DEF",
            Field::HeaderDef => "HEADER_DEF",
            Field::FunctionDeclarations => "FUNCTION_DECLARATIONS",
            Field::FunctionDefinitions => "FUNCTION_DEFINITIONS",
            Field::ForwardDeclares => "FORWARD_DECLARES",
            Field::Includes => "INCLUDES",
        }
    }
}

/// Resolved placeholder values for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldSet {
    values: BTreeMap<String, String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field.name().to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set() {
        let mut fields = FieldSet::new().with(Field::ClassName, "Widget");
        fields.set(Field::Year, "2026");
        fields.set(Field::ClassName, "Gadget");

        assert_eq!(fields.get("CLASS_NAME"), Some("Gadget"));
        assert_eq!(fields.get("YEAR"), Some("2026"));
        assert!(!fields.contains("INCLUDES"));
    }
}

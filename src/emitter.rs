use crate::interface::{Function, Interface};

/// Renders override declarations and empty definitions for a concrete
/// class implementing an interface.
pub struct ConcreteClass<'a> {
    interface: &'a Interface,
    class_name: String,
}

impl<'a> ConcreteClass<'a> {
    pub fn new(interface: &'a Interface, class_name: impl Into<String>) -> Self {
        Self {
            interface,
            class_name: class_name.into(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// One indented `... override;` line per method, in interface order.
    pub fn declarations(&self) -> String {
        self.interface
            .functions()
            .iter()
            .map(|f| {
                format!(
                    "    {} {}({}){} override;\n",
                    f.return_type,
                    f.name,
                    f.arguments_string(),
                    const_suffix(f)
                )
            })
            .collect()
    }

    /// Empty-bodied definitions separated by a blank line.
    pub fn definitions(&self) -> String {
        self.interface
            .functions()
            .iter()
            .map(|f| {
                format!(
                    "{} {}::{}({}){}\n{{\n}}\n",
                    f.return_type,
                    self.class_name,
                    f.name,
                    f.arguments_string(),
                    const_suffix(f)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `WIDGET_H` for `Widget`.
    pub fn header_define(&self) -> String {
        header_define(&self.class_name)
    }
}

fn const_suffix(function: &Function) -> &'static str {
    if function.is_const {
        " const"
    } else {
        ""
    }
}

pub fn header_define(name: &str) -> String {
    format!("{}_H", name.to_uppercase())
}

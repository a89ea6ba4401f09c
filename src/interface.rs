use log::{debug, warn};
use std::{fs, path::Path};

use crate::error::{GenError, ParseError};
use crate::parser::{is_pure_virtual_declaration, parse_declaration};

/// One parameter of a pure-virtual method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgument {
    /// The type as written, qualifiers included (`const Canvas &`).
    pub declared_type: String,
    pub name: String,
    /// The declared type with `const`, `*`, `&` and whitespace removed.
    pub bare_type: String,
}

impl FunctionArgument {
    /// `{declared_type} {name}` as it appears in a parameter list.
    pub fn full(&self) -> String {
        format!("{} {}", self.declared_type, self.name)
    }
}

/// A pure-virtual method of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub return_type: String,
    pub name: String,
    pub arguments: Vec<FunctionArgument>,
    /// Declared as a `const` member function.
    pub is_const: bool,
}

impl Function {
    /// The parameter list joined with `, `, in declaration order.
    pub fn arguments_string(&self) -> String {
        self.arguments
            .iter()
            .map(FunctionArgument::full)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Bare dependency types, one per argument.
    pub fn dependencies(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.bare_type.as_str()).collect()
    }
}

/// A parsed interface header: its class name and its pure-virtual methods
/// in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    name: String,
    functions: Vec<Function>,
}

impl Interface {
    /// Reads and parses the interface header at `path`.
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let source = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Ok(Self::parse(&source)?)
    }

    /// Parses interface source text.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let lines = code_lines(source);
        let name = parse_class_name(&lines)?;
        debug!("Found interface class '{}'", name);

        let functions = lines
            .iter()
            .filter(|line| is_pure_virtual_declaration(line))
            .map(|line| parse_declaration(line))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Parsed {} pure-virtual declarations", functions.len());

        Ok(Self { name, functions })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }
}

/// Source lines with comments blanked out. `/* */` comments may span lines.
fn code_lines(source: &str) -> Vec<String> {
    let mut in_block = false;
    source
        .lines()
        .map(|line| {
            let mut code = String::new();
            let mut rest = line;
            loop {
                if in_block {
                    match rest.find("*/") {
                        Some(end) => {
                            rest = &rest[end + 2..];
                            in_block = false;
                        }
                        None => break,
                    }
                    continue;
                }
                match (rest.find("//"), rest.find("/*")) {
                    (Some(line_comment), block) if block.map_or(true, |b| line_comment < b) => {
                        code.push_str(&rest[..line_comment]);
                        break;
                    }
                    (_, Some(block)) => {
                        code.push_str(&rest[..block]);
                        code.push(' ');
                        rest = &rest[block + 2..];
                        in_block = true;
                    }
                    _ => {
                        code.push_str(rest);
                        break;
                    }
                }
            }
            code
        })
        .collect()
}

/// Finds the first `class <Name>` line that is not a forward declaration.
fn parse_class_name(lines: &[String]) -> Result<String, ParseError> {
    for code in lines {
        let line = code.as_str();
        let mut words = code.split_whitespace();
        if words.by_ref().find(|w| *w == "class").is_none() {
            continue;
        }
        if code.trim_end().ends_with(';') && !code.contains('{') {
            warn!("Skipping forward declaration: {}", line.trim());
            continue;
        }

        let name: String = words
            .next()
            .unwrap_or_default()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if name.is_empty() {
            return Err(ParseError::new(line, "expected a class name after 'class'"));
        }
        return Ok(name);
    }

    Err(ParseError::new(
        "",
        "no 'class' declaration found in the interface source",
    ))
}

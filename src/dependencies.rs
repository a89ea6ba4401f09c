use log::debug;
use std::{collections::BTreeSet, collections::HashSet, fs, path::Path};

use crate::error::GenError;
use crate::interface::Interface;

/// Names of framework classes that are included as `<Name>` rather than
/// forward declared (e.g. the Qt class list).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkTypes {
    names: HashSet<String>,
}

impl FrameworkTypes {
    /// Reads a newline-delimited list. Blank lines and `#` comments are skipped.
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let types: Self = content.lines().collect();
        debug!("Loaded {} framework types from {:?}", types.names.len(), path);
        Ok(types)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<'a> FromIterator<&'a str> for FrameworkTypes {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let names = iter
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { names }
    }
}

/// How a dependency type is brought into a generated header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// `#include <Name>`
    Framework,
    /// `#include "Name.h"` plus `class Name;`
    Project,
    /// Primitives, lowercase and namespaced types.
    Excluded,
}

pub fn classify(bare_type: &str, framework: &FrameworkTypes) -> Dependency {
    if framework.contains(bare_type) {
        Dependency::Framework
    } else if bare_type.chars().next().is_some_and(char::is_uppercase) && !bare_type.contains("::")
    {
        Dependency::Project
    } else {
        Dependency::Excluded
    }
}

/// Include and forward-declaration blocks for an interface's argument types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyBlocks {
    pub includes: String,
    pub forward_declares: String,
}

/// The deduplicated bare argument types of every method, sorted.
pub fn collect_dependencies(interface: &Interface) -> BTreeSet<String> {
    interface
        .functions()
        .iter()
        .flat_map(|f| f.dependencies())
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn resolve(interface: &Interface, framework: &FrameworkTypes) -> DependencyBlocks {
    let mut blocks = DependencyBlocks::default();

    for dependency in collect_dependencies(interface) {
        match classify(&dependency, framework) {
            Dependency::Framework => {
                blocks.includes.push_str(&format!("#include <{}>\n", dependency));
            }
            Dependency::Project => {
                blocks.includes.push_str(&format!("#include \"{}.h\"\n", dependency));
                blocks.forward_declares.push_str(&format!("class {};\n", dependency));
            }
            Dependency::Excluded => debug!("Not including '{}'", dependency),
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn interface(declarations: &[&str]) -> Interface {
        let source = format!("class IThing\n{{\n{}\n}};\n", declarations.join("\n"));
        Interface::parse(&source).unwrap()
    }

    #[test]
    fn test_classify() {
        let framework: FrameworkTypes = ["QString", "QWidget"].into_iter().collect();
        assert_eq!(classify("QString", &framework), Dependency::Framework);
        assert_eq!(classify("Canvas", &framework), Dependency::Project);
        assert_eq!(classify("int", &framework), Dependency::Excluded);
        assert_eq!(classify("std::string", &framework), Dependency::Excluded);
        assert_eq!(classify("Ns::Thing", &framework), Dependency::Excluded);
    }

    #[test]
    fn test_resolve_sorted_and_deduplicated() {
        let interface = interface(&[
            "    virtual void draw(Zebra *z, const Canvas &c) = 0;",
            "    virtual void paint(Canvas &c, QString name, int n) = 0;",
            "    virtual void apple(const Apple &a) = 0;",
        ]);
        let framework: FrameworkTypes = ["QString"].into_iter().collect();

        let blocks = resolve(&interface, &framework);
        assert_eq!(
            blocks.includes,
            "#include \"Apple.h\"\n#include \"Canvas.h\"\n#include <QString>\n#include \"Zebra.h\"\n"
        );
        assert_eq!(blocks.forward_declares, "class Apple;\nclass Canvas;\nclass Zebra;\n");
    }

    #[test]
    fn test_order_independent_of_argument_order() {
        let a = interface(&["    virtual void f(Beta b, Alpha a) = 0;"]);
        let b = interface(&["    virtual void f(Alpha a, Beta b) = 0;"]);
        let framework = FrameworkTypes::default();
        assert_eq!(resolve(&a, &framework), resolve(&b, &framework));
    }

    #[test]
    fn test_no_dependencies() {
        let interface = interface(&["    virtual int count() const = 0;"]);
        let blocks = resolve(&interface, &FrameworkTypes::default());
        assert!(blocks.includes.is_empty());
        assert!(blocks.forward_declares.is_empty());
    }

    #[test]
    fn test_load_framework_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("qt-includes.txt");
        fs::write(&path, "QString\n\n# widgets\n  QWidget  \n").unwrap();

        let types = FrameworkTypes::load(&path).unwrap();
        assert!(types.contains("QString"));
        assert!(types.contains("QWidget"));
        assert!(!types.contains("# widgets"));
        assert!(FrameworkTypes::load(&dir.path().join("missing.txt")).is_err());
    }
}

use log::debug;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::GenError;

/// Identifies one template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    Interface,
    ClassHeader,
    ClassCpp,
    Copyright,
}

impl TemplateId {
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateId::Interface => "interface.txt",
            TemplateId::ClassHeader => "class_header.txt",
            TemplateId::ClassCpp => "class_cpp.txt",
            TemplateId::Copyright => "copyright.txt",
        }
    }

    fn builtin(&self) -> &'static str {
        match self {
            TemplateId::Interface => include_str!("../templates/interface.txt"),
            TemplateId::ClassHeader => include_str!("../templates/class_header.txt"),
            TemplateId::ClassCpp => include_str!("../templates/class_cpp.txt"),
            TemplateId::Copyright => include_str!("../templates/copyright.txt"),
        }
    }
}

/// Where template bodies come from: the copies compiled into the binary,
/// or a directory holding files named after [`TemplateId::file_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateLoader {
    #[default]
    Builtin,
    Directory(PathBuf),
}

impl TemplateLoader {
    pub fn from_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => TemplateLoader::Directory(dir.to_path_buf()),
            None => TemplateLoader::Builtin,
        }
    }

    pub fn load(&self, id: TemplateId) -> Result<String, GenError> {
        match self {
            TemplateLoader::Builtin => Ok(id.builtin().to_string()),
            TemplateLoader::Directory(dir) => {
                let path = dir.join(id.file_name());
                debug!("Loading template {:?}", path);
                fs::read_to_string(&path).map_err(|e| GenError::io(path, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_templates() {
        let loader = TemplateLoader::Builtin;
        let header = loader.load(TemplateId::ClassHeader).unwrap();
        assert!(header.contains("{{FUNCTION_DECLARATIONS}}"));
        assert!(loader.load(TemplateId::Copyright).unwrap().contains("{{YEAR}}"));
    }

    #[test]
    fn test_directory_templates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("interface.txt"), "class {{INTERFACE_NAME}};").unwrap();

        let loader = TemplateLoader::from_dir(Some(dir.path()));
        assert_eq!(
            loader.load(TemplateId::Interface).unwrap(),
            "class {{INTERFACE_NAME}};"
        );

        let err = loader.load(TemplateId::ClassCpp).unwrap_err();
        match err {
            GenError::Io { path, .. } => assert!(path.ends_with("class_cpp.txt")),
            other => panic!("unexpected error: {}", other),
        }
    }
}

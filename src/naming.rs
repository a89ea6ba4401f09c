use serde::Deserialize;
use std::{fmt, path::Path, str::FromStr};

use crate::error::GenError;

/// Selects which artifact(s) a generation request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateType {
    Interface,
    Class,
    Test,
    Mock,
    SpyMock,
    Stub,
    Fake,
}

impl TemplateType {
    pub const ALL: [TemplateType; 7] = [
        TemplateType::Interface,
        TemplateType::Class,
        TemplateType::Test,
        TemplateType::Mock,
        TemplateType::SpyMock,
        TemplateType::Stub,
        TemplateType::Fake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Interface => "INTERFACE",
            TemplateType::Class => "CLASS",
            TemplateType::Test => "TEST",
            TemplateType::Mock => "MOCK",
            TemplateType::SpyMock => "SPYMOCK",
            TemplateType::Stub => "STUB",
            TemplateType::Fake => "FAKE",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == upper)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|t| t.as_str()).collect();
                GenError::Usage(format!(
                    "unknown template type '{}', expected one of {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Class-name prefix per template type.
///
/// The interface prefix is kept apart from the others: it is prepended
/// when creating an interface and stripped once when deriving any other
/// class from an existing interface file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NamingScheme {
    pub interface: String,
    pub class: String,
    pub test: String,
    pub mock: String,
    pub spymock: String,
    pub stub: String,
    pub fake: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            interface: "I".to_string(),
            class: String::new(),
            test: "Test".to_string(),
            mock: "Mock".to_string(),
            spymock: "SpyMock".to_string(),
            stub: "Stub".to_string(),
            fake: "Fake".to_string(),
        }
    }
}

impl NamingScheme {
    pub fn prefix(&self, tag: TemplateType) -> &str {
        match tag {
            TemplateType::Interface => &self.interface,
            TemplateType::Class => &self.class,
            TemplateType::Test => &self.test,
            TemplateType::Mock => &self.mock,
            TemplateType::SpyMock => &self.spymock,
            TemplateType::Stub => &self.stub,
            TemplateType::Fake => &self.fake,
        }
    }

    /// Name of the class emitted for `tag`. For [`TemplateType::Interface`]
    /// `path` is the new interface's target file; otherwise it is the
    /// existing interface the class is derived from.
    pub fn class_name(&self, tag: TemplateType, path: &Path) -> Result<String, GenError> {
        match tag {
            TemplateType::Interface => self.interface_name(path),
            other => Ok(format!("{}{}", self.prefix(other), self.derived_base(path)?)),
        }
    }

    /// `IWidget` for a target of `Widget.h`. A stem that already carries
    /// the prefix (followed by an uppercase letter) is not prefixed twice.
    pub fn interface_name(&self, target: &Path) -> Result<String, GenError> {
        let stem = base_name(target)?;
        let already_prefixed = !self.interface.is_empty()
            && stem
                .strip_prefix(self.interface.as_str())
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_uppercase);

        if already_prefixed {
            Ok(stem.to_string())
        } else {
            Ok(format!("{}{}", self.interface, stem))
        }
    }

    /// `Widget` for an existing interface at `IWidget.h`: the basename with
    /// the first occurrence of the interface prefix removed.
    pub fn derived_base(&self, existing: &Path) -> Result<String, GenError> {
        let stem = base_name(existing)?;
        if !stem.contains(self.interface.as_str()) {
            return Err(GenError::NamingConvention(format!(
                "interface file '{}' does not carry the interface prefix '{}'",
                stem, self.interface
            )));
        }

        let base = stem.replacen(self.interface.as_str(), "", 1);
        if base.is_empty() {
            return Err(GenError::NamingConvention(format!(
                "interface file '{}' has no name after removing the prefix '{}'",
                stem, self.interface
            )));
        }
        Ok(base)
    }
}

/// File name of `path` up to its first `.`.
pub fn base_name(path: &Path) -> Result<&str, GenError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| GenError::Usage(format!("{:?} does not name a file", path)))?;

    match file_name.split('.').next() {
        Some(stem) if !stem.is_empty() => Ok(stem),
        _ => Err(GenError::NamingConvention(format!(
            "cannot derive a class name from {:?}",
            path
        ))),
    }
}

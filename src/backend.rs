use log::{debug, error, warn};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::{Extensions, GeneratorConfig, MockConfig};
use crate::dependencies::{self, FrameworkTypes};
use crate::emitter::{header_define, ConcreteClass};
use crate::engine::TemplateEngine;
use crate::error::GenError;
use crate::fields::{Field, FieldSet};
use crate::interface::Interface;
use crate::naming::{base_name, NamingScheme, TemplateType};
use crate::templates::{TemplateId, TemplateLoader};

/// One rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

/// What a backend is asked to produce.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub tag: TemplateType,
    /// Target file for a new interface, or the existing interface header.
    pub path: &'a Path,
    pub year: &'a str,
}

impl Request<'_> {
    /// Fields every template may use regardless of tag.
    fn base_fields(&self) -> FieldSet {
        FieldSet::new()
            .with(Field::TemplateType, self.tag.as_str())
            .with(Field::Year, self.year)
    }
}

/// Produces the artifacts for one template type.
pub trait Backend {
    fn generate(&self, request: &Request<'_>) -> Result<Vec<Artifact>, GenError>;
}

/// Template bodies plus the engine that fills them.
pub struct Templates {
    engine: TemplateEngine,
    loader: TemplateLoader,
}

impl Templates {
    pub fn new(engine: TemplateEngine, loader: TemplateLoader) -> Self {
        Self { engine, loader }
    }

    /// Renders template `id` as `file_name`. FILE_NAME and COPYRIGHT are
    /// filled in here; the copyright text is itself rendered with `fields`.
    pub fn render(
        &self,
        id: TemplateId,
        file_name: &str,
        fields: &FieldSet,
    ) -> Result<Artifact, GenError> {
        let mut fields = fields.clone().with(Field::FileName, file_name);

        let copyright = self.loader.load(TemplateId::Copyright)?;
        let copyright = self
            .engine
            .render(TemplateId::Copyright.file_name(), &copyright, &fields)?;
        fields.set(Field::Copyright, copyright);

        let body = self.loader.load(id)?;
        let contents = self.engine.render(id.file_name(), &body, &fields)?;
        Ok(Artifact {
            file_name: file_name.to_string(),
            contents,
        })
    }
}

/// Writes a new, empty interface header.
pub struct InterfaceBackend<'a> {
    pub naming: &'a NamingScheme,
    pub extensions: &'a Extensions,
    pub templates: &'a Templates,
}

impl Backend for InterfaceBackend<'_> {
    fn generate(&self, request: &Request<'_>) -> Result<Vec<Artifact>, GenError> {
        let name = self.naming.interface_name(request.path)?;
        let define = header_define(&name);
        let fields = request
            .base_fields()
            .with(Field::ClassName, name.as_str())
            .with(Field::InterfaceName, name.as_str())
            .with(Field::InterfaceDef, define.as_str())
            .with(Field::HeaderDef, define.as_str());

        let file_name = format!("{}{}", name, self.extensions.header);
        Ok(vec![self.templates.render(TemplateId::Interface, &file_name, &fields)?])
    }
}

/// Writes the header and implementation of a concrete class implementing
/// an existing interface.
pub struct ClassBackend<'a> {
    pub naming: &'a NamingScheme,
    pub extensions: &'a Extensions,
    pub templates: &'a Templates,
    pub framework: &'a FrameworkTypes,
}

impl Backend for ClassBackend<'_> {
    fn generate(&self, request: &Request<'_>) -> Result<Vec<Artifact>, GenError> {
        let class_name = self.naming.class_name(request.tag, request.path)?;
        let interface_name = base_name(request.path)?;

        let interface = Interface::load(request.path)?;
        if interface.name() != interface_name {
            warn!(
                "Interface file {:?} declares class '{}'",
                request.path,
                interface.name()
            );
        }

        let class = ConcreteClass::new(&interface, class_name.as_str());
        let blocks = dependencies::resolve(&interface, self.framework);
        let fields = request
            .base_fields()
            .with(Field::ClassName, class_name.as_str())
            .with(Field::InterfaceName, interface_name)
            .with(Field::InterfaceDef, header_define(interface_name))
            .with(Field::HeaderDef, class.header_define())
            .with(Field::FunctionDeclarations, class.declarations())
            .with(Field::FunctionDefinitions, class.definitions())
            .with(Field::ForwardDeclares, blocks.forward_declares)
            .with(Field::Includes, blocks.includes);

        let cpp = format!("{}{}", class_name, self.extensions.source);
        let header = format!("{}{}", class_name, self.extensions.header);
        Ok(vec![
            self.templates.render(TemplateId::ClassCpp, &cpp, &fields)?,
            self.templates.render(TemplateId::ClassHeader, &header, &fields)?,
        ])
    }
}

/// Delegates mock generation to an external command. The interface path is
/// appended to the configured arguments and stdout becomes the mock header.
pub struct MockBackend<'a> {
    pub naming: &'a NamingScheme,
    pub extensions: &'a Extensions,
    pub mock: Option<&'a MockConfig>,
}

impl Backend for MockBackend<'_> {
    fn generate(&self, request: &Request<'_>) -> Result<Vec<Artifact>, GenError> {
        let mock = self.mock.ok_or_else(|| {
            GenError::Usage("MOCK generation needs a `mock.command` in the config".to_string())
        })?;
        let class_name = self.naming.class_name(request.tag, request.path)?;

        let mut cmd = Command::new(&mock.command);
        cmd.args(&mock.args)
            .arg(request.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Running mock generator {} on {:?}", mock.command, request.path);
        let output = cmd.output().map_err(|e| {
            error!("Failed to spawn mock generator: {}", e);
            GenError::io(&mock.command, e)
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenError::Backend(format!(
                "'{}' exited with {}: {}",
                mock.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(vec![Artifact {
            file_name: format!("{}{}", class_name, self.extensions.header),
            contents: String::from_utf8_lossy(&output.stdout).into_owned(),
        }])
    }
}

/// Picks the backend for `tag`.
pub fn backend_for<'a>(
    tag: TemplateType,
    config: &'a GeneratorConfig,
    templates: &'a Templates,
    framework: &'a FrameworkTypes,
) -> Result<Box<dyn Backend + 'a>, GenError> {
    let naming = &config.naming;
    let extensions = &config.extensions;
    match tag {
        TemplateType::Interface => Ok(Box::new(InterfaceBackend {
            naming,
            extensions,
            templates,
        })),
        TemplateType::Class => Ok(Box::new(ClassBackend {
            naming,
            extensions,
            templates,
            framework,
        })),
        TemplateType::Mock => Ok(Box::new(MockBackend {
            naming,
            extensions,
            mock: config.mock.as_ref(),
        })),
        other => Err(GenError::Usage(format!("no generator for template type {}", other))),
    }
}

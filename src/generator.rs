use log::{error, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::backend::{backend_for, Artifact, Request, Templates};
use crate::config::GeneratorConfig;
use crate::dependencies::FrameworkTypes;
use crate::engine::TemplateEngine;
use crate::error::GenError;
use crate::naming::TemplateType;
use crate::templates::TemplateLoader;

/// Runs one generation request: renders every artifact for a template type
/// and writes them to the output directory.
pub struct FileGenerator {
    config: GeneratorConfig,
    templates: Templates,
    framework: FrameworkTypes,
    output_dir: PathBuf,
    year: String,
    dry_run: bool,
}

impl FileGenerator {
    /// Builds a generator from `config`, loading the framework type list if
    /// one is configured.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenError> {
        let framework = match &config.framework_types {
            Some(path) => FrameworkTypes::load(path)?,
            None => FrameworkTypes::default(),
        };
        let templates = Templates::new(
            TemplateEngine::new(),
            TemplateLoader::from_dir(config.templates.as_deref()),
        );

        Ok(Self {
            config,
            templates,
            framework,
            output_dir: PathBuf::from("."),
            year: chrono::Local::now().format("%Y").to_string(),
            dry_run: false,
        })
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Renders all artifacts for `tag` without touching the filesystem
    /// beyond reading inputs.
    pub fn render(&self, tag: TemplateType, path: &Path) -> Result<Vec<Artifact>, GenError> {
        let backend = backend_for(tag, &self.config, &self.templates, &self.framework)?;
        let request = Request {
            tag,
            path,
            year: &self.year,
        };
        backend.generate(&request)
    }

    /// Renders and writes every artifact, returning the paths written (or
    /// that would be written, in dry-run mode). Nothing is written unless
    /// all artifacts rendered successfully.
    pub fn generate(&self, tag: TemplateType, path: &Path) -> Result<Vec<PathBuf>, GenError> {
        let artifacts = self.render(tag, path)?;

        if !self.dry_run {
            Self::ensure_dir_exists(&self.output_dir)?;
        }

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let output_path = self.output_dir.join(&artifact.file_name);
            if self.dry_run {
                info!("[DRY RUN] Would write: {:?}", output_path);
            } else {
                fs::write(&output_path, &artifact.contents).map_err(|e| {
                    error!("Failed to write generated file: {:?}", output_path);
                    GenError::io(&output_path, e)
                })?;
                info!("{:?}", output_path);
            }
            written.push(output_path);
        }
        Ok(written)
    }

    /// Ensures that the specified directory exists, creating it if necessary.
    fn ensure_dir_exists(path: &Path) -> Result<(), GenError> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| GenError::io(path, e))?;
        }
        Ok(())
    }
}

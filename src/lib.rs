//! Generates C++ scaffolding from hand-written interface headers whose
//! methods are all declared pure virtual.
//!
//! An interface is parsed into an [`Interface`] model, which backends turn
//! into rendered [`Artifact`]s: a fresh interface header, or the header and
//! implementation of a concrete class with one empty override per method.

pub mod backend;
pub mod config;
pub mod dependencies;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod fields;
pub mod filters;
pub mod generator;
pub mod interface;
pub mod lexer;
pub mod naming;
pub mod parser;
pub mod templates;

pub use backend::{Artifact, Backend};
pub use config::GeneratorConfig;
pub use engine::TemplateEngine;
pub use error::{GenError, ParseError};
pub use fields::{Field, FieldSet};
pub use generator::FileGenerator;
pub use interface::{Function, FunctionArgument, Interface};
pub use naming::{NamingScheme, TemplateType};

//! # swiftgen Codegen
//!
//! Swift source generation from UML models.
//!
//! This crate provides:
//! - Type mapping and visibility bucketing
//! - Property, method, class, protocol and enum rendering
//! - File assembly and package-to-directory traversal
//! - Generation options, preference registry and output sinks

pub mod emitter;
pub mod error;
pub mod generator;
pub mod options;
pub mod preferences;
pub mod sink;
pub mod swift;
pub mod writer;

pub use emitter::FileEmitter;
pub use error::CodegenError;
pub use generator::{GenerationReport, Generator, generate};
pub use options::{GenOptions, GenerationContext, ProjectInfo};
pub use sink::{FsSink, MemorySink, OutputSink};

use std::path::Path;
use swiftgen_model::ModelRepository;

/// Generates Swift sources from an XML model string.
///
/// The whole model is generated from its root package, so the output tree
/// starts with a directory named after the model.
///
/// # Arguments
/// * `xml` - XML model content
/// * `output` - Existing directory receiving the generated tree
/// * `options` - Generation options
///
/// # Returns
/// The directories and files generated.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(
    xml: &str,
    output: &Path,
    options: &GenOptions,
) -> Result<GenerationReport, CodegenError> {
    let model = swiftgen_model::parse_model(xml)?;
    let root = model.root();
    let project = ProjectInfo::named(model.name_of(root));
    generate(&model, root, output, options, project)
}

/// Generates Swift sources from an XML model file.
///
/// # Arguments
/// * `path` - Path to the XML model file
/// * `output` - Existing directory receiving the generated tree
/// * `options` - Generation options
///
/// # Returns
/// The directories and files generated.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(
    path: &Path,
    output: &Path,
    options: &GenOptions,
) -> Result<GenerationReport, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, output, options)
}

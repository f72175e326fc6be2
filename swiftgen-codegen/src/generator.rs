//! Model traversal and file output.

use crate::emitter::FileEmitter;
use crate::error::CodegenError;
use crate::options::{GenOptions, GenerationContext, ProjectInfo};
use crate::sink::{FsSink, OutputSink};
use std::io;
use std::path::{Path, PathBuf};
use swiftgen_model::{ElementId, ElementKind, ModelRepository};

/// Directories and files touched by a generation run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Package directories ensured, including ones that already existed.
    pub directories: Vec<PathBuf>,
    /// Files written.
    pub files: Vec<PathBuf>,
}

/// Walks a model and writes one `.swift` file per class, interface and
/// enumeration, mirroring packages as directories.
pub struct Generator<'a, R: ModelRepository + ?Sized, S: OutputSink + ?Sized> {
    model: &'a R,
    ctx: &'a GenerationContext,
    sink: &'a S,
    emitter: FileEmitter<'a, R>,
    report: GenerationReport,
}

impl<'a, R: ModelRepository + ?Sized, S: OutputSink + ?Sized> Generator<'a, R, S> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(model: &'a R, ctx: &'a GenerationContext, sink: &'a S) -> Self {
        Self {
            model,
            ctx,
            sink,
            emitter: FileEmitter::new(model, ctx),
            report: GenerationReport::default(),
        }
    }

    /// Generates `elem` into the directory `path`.
    ///
    /// Packages become directories and their owned elements are generated
    /// in order. Classes are written only when implementation generation
    /// is enabled. Other element kinds produce nothing.
    ///
    /// # Errors
    /// Returns the first directory or file failure. Output written before
    /// the failure is left in place.
    pub fn generate(&mut self, elem: ElementId, path: &Path) -> Result<(), CodegenError> {
        let model = self.model;
        let Some(element) = model.element(elem) else {
            return Ok(());
        };
        let file = || path.join(format!("{}.swift", element.name));

        match element.kind() {
            ElementKind::Package => {
                let dir = path.join(&element.name);
                self.ensure_dir(&dir)?;
                for &child in element.owned_elements() {
                    self.generate(child, &dir)?;
                }
                Ok(())
            }
            ElementKind::Class if self.ctx.options.gen_impl => {
                let contents = self.emitter.class_file(elem);
                self.write(&file(), &contents)
            }
            ElementKind::Class => {
                tracing::debug!("skipping class {} (implementation disabled)", element.name);
                Ok(())
            }
            ElementKind::Interface => {
                let contents = self.emitter.interface_file(elem);
                self.write(&file(), &contents)
            }
            ElementKind::Enumeration => {
                let contents = self.emitter.enumeration_file(elem);
                self.write(&file(), &contents)
            }
            _ => Ok(()),
        }
    }

    /// Returns what has been generated so far.
    #[must_use]
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Consumes the generator and returns its report.
    #[must_use]
    pub fn into_report(self) -> GenerationReport {
        self.report
    }

    fn ensure_dir(&mut self, dir: &Path) -> Result<(), CodegenError> {
        match self.sink.create_dir(dir) {
            Ok(()) => tracing::debug!("created directory {}", dir.display()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!("directory {} already exists", dir.display());
            }
            Err(e) => {
                tracing::warn!("failed to create directory {}: {}", dir.display(), e);
                return Err(CodegenError::directory(dir, e));
            }
        }
        self.report.directories.push(dir.to_path_buf());
        Ok(())
    }

    fn write(&mut self, file: &Path, contents: &str) -> Result<(), CodegenError> {
        if let Err(e) = self.sink.write_file(file, contents) {
            tracing::warn!("failed to write {}: {}", file.display(), e);
            return Err(CodegenError::write(file, e));
        }
        tracing::debug!("wrote {} ({} bytes)", file.display(), contents.len());
        self.report.files.push(file.to_path_buf());
        Ok(())
    }
}

/// Generates `elem` and everything it owns into `output` on the local
/// filesystem.
///
/// # Arguments
/// * `model` - Model to read from
/// * `elem` - Element to generate, usually a package
/// * `output` - Existing directory receiving the generated tree
/// * `options` - Generation options
/// * `project` - Project identity for file headers
///
/// # Errors
/// Returns `CodegenError` on the first directory or file failure.
pub fn generate<R: ModelRepository + ?Sized>(
    model: &R,
    elem: ElementId,
    output: &Path,
    options: &GenOptions,
    project: ProjectInfo,
) -> Result<GenerationReport, CodegenError> {
    let ctx = GenerationContext::new(project, options.clone());
    tracing::info!(
        "generating {} into {}",
        model.qualified_name(elem),
        output.display()
    );

    let mut generator = Generator::new(model, &ctx, &FsSink);
    generator.generate(elem, output)?;
    let report = generator.into_report();

    tracing::info!(
        "generated {} files in {} directories",
        report.files.len(),
        report.directories.len()
    );
    Ok(report)
}

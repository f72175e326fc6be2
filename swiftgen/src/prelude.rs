//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use swiftgen::prelude::*;
//! ```

// Model types
pub use swiftgen_model::{
    AssociationEnd, AttributeDef, ClassifierDef, Direction, ElementId, ElementKind,
    EnumerationDef, Model, ModelRepository, OperationDef, Parameter, ParseError, TypeRef,
    Visibility, load_model, parse_model,
};

// Generation types
pub use swiftgen_codegen::preferences::{MemoryPreferences, PreferenceStore, PreferenceValue};
pub use swiftgen_codegen::{
    CodegenError, FsSink, GenOptions, GenerationContext, GenerationReport, Generator,
    MemorySink, OutputSink, ProjectInfo, generate, generate_from_file, generate_from_xml,
};

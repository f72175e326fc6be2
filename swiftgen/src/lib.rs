//! # swiftgen
//!
//! Swift source skeletons from UML class models.
//!
//! swiftgen walks a UML model and writes one `.swift` file per class,
//! interface and enumeration, mirroring packages as directories.
//!
//! ## Features
//!
//! - **Classes** - `public class` bodies with properties and stub methods
//!   returning type-appropriate defaults
//! - **Interfaces** - `protocol` declarations with property requirements and
//!   method signatures
//! - **Enumerations** - `enum` declarations with one `case` per literal
//! - **Pluggable models** - generate from anything implementing
//!   [`ModelRepository`], or from the bundled XML model format
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use swiftgen::prelude::*;
//!
//! let model = load_model(Path::new("shop.xml"))?;
//! let report = generate(
//!     &model,
//!     model.root(),
//!     Path::new("Sources"),
//!     &GenOptions::default(),
//!     ProjectInfo::named("Shop"),
//! )?;
//! println!("wrote {} files", report.files.len());
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Model elements, the query trait and the XML loader
//! - [`codegen`] - Swift rendering, options and generation driver

pub mod prelude;

/// Model elements, queries and loading.
pub mod model {
    pub use swiftgen_model::*;
}

/// Swift code generation.
pub mod codegen {
    pub use swiftgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use swiftgen_codegen::{
    CodegenError, GenOptions, GenerationContext, GenerationReport, Generator, ProjectInfo,
    generate, generate_from_file, generate_from_xml,
};
pub use swiftgen_model::{Model, ModelRepository, ParseError, load_model, parse_model};

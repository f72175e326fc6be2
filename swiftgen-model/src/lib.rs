//! # swiftgen Model
//!
//! Read-only UML model consumed by the Swift generator.
//!
//! This crate provides:
//! - Typed model elements (packages, classifiers, attributes, operations, relationships)
//! - The `ModelRepository` query contract generators are written against
//! - An in-memory `Model` arena with a builder API
//! - An XML model loader

pub mod error;
pub mod model;
pub mod parser;
pub mod repository;
pub mod types;

pub use error::ParseError;
pub use model::Model;
pub use parser::{load_model, parse_model};
pub use repository::ModelRepository;
pub use types::{
    AssociationDef, AssociationEnd, AttributeDef, ClassifierDef, Direction, Element, ElementData,
    ElementId, ElementKind, EnumerationDef, OperationDef, PackageDef, Parameter, RelationshipDef,
    TypeRef, Visibility,
};

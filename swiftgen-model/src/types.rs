//! Model element definitions.
//!
//! This module contains the data structures representing UML model elements
//! including packages, classifiers, attributes, operations and relationships.

use std::fmt;

/// Index of an element inside a [`crate::Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag of a model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Package (namespace, mapped to a directory).
    Package,
    /// Class.
    Class,
    /// Interface (mapped to a protocol).
    Interface,
    /// Enumeration.
    Enumeration,
    /// Attribute owned by a classifier.
    Attribute,
    /// Operation owned by a classifier.
    Operation,
    /// Operation parameter.
    Parameter,
    /// One end of an association.
    AssociationEnd,
    /// Generalization (inheritance) relationship.
    Generalization,
    /// Interface realization relationship.
    InterfaceRealization,
    /// Association relationship.
    Association,
}

/// Modeled visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Public visibility.
    Public,
    /// Protected visibility.
    Protected,
    /// Private visibility.
    Private,
    /// Package visibility (treated as unset).
    #[default]
    Package,
}

impl Visibility {
    /// Parses a visibility from its model name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            "package" | "" => Some(Self::Package),
            _ => None,
        }
    }
}

/// Direction of an operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Input parameter.
    #[default]
    In,
    /// Output parameter.
    Out,
    /// Input/output parameter.
    InOut,
    /// Return value.
    Return,
}

impl Direction {
    /// Parses a parameter direction from its model name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "inout" => Some(Self::InOut),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}

/// Type of an attribute or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeRef {
    /// Reference to another model element.
    Element(ElementId),
    /// Literal type name (primitive or external type).
    Named(String),
    /// No type set.
    #[default]
    None,
}

impl TypeRef {
    /// Creates a literal type reference, mapping an empty name to `None`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self::None
        } else {
            Self::Named(name)
        }
    }
}

/// A model element stored in the arena.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Owning element (non-owning back link).
    pub parent: Option<ElementId>,
    /// Kind-specific payload.
    pub data: ElementData,
}

impl Element {
    /// Returns the kind tag of this element.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match &self.data {
            ElementData::Package(_) => ElementKind::Package,
            ElementData::Class(_) => ElementKind::Class,
            ElementData::Interface(_) => ElementKind::Interface,
            ElementData::Enumeration(_) => ElementKind::Enumeration,
            ElementData::Attribute(_) => ElementKind::Attribute,
            ElementData::Operation(_) => ElementKind::Operation,
            ElementData::Generalization(_) => ElementKind::Generalization,
            ElementData::InterfaceRealization(_) => ElementKind::InterfaceRealization,
            ElementData::Association(_) => ElementKind::Association,
        }
    }

    /// Returns the classifier payload of a class or interface.
    #[must_use]
    pub const fn as_classifier(&self) -> Option<&ClassifierDef> {
        match &self.data {
            ElementData::Class(c) | ElementData::Interface(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the elements owned by this element, in model order.
    #[must_use]
    pub fn owned_elements(&self) -> &[ElementId] {
        match &self.data {
            ElementData::Package(p) => &p.owned_elements,
            ElementData::Class(c) | ElementData::Interface(c) => &c.owned_elements,
            _ => &[],
        }
    }

    /// Returns the modeled visibility of this element.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        match &self.data {
            ElementData::Class(c) | ElementData::Interface(c) => c.visibility,
            ElementData::Enumeration(e) => e.visibility,
            ElementData::Attribute(a) => a.visibility,
            ElementData::Operation(o) => o.visibility,
            _ => Visibility::Package,
        }
    }

    /// Returns true if this is a class.
    #[must_use]
    pub const fn is_class(&self) -> bool {
        matches!(self.data, ElementData::Class(_))
    }

    /// Returns true if this is an interface.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.data, ElementData::Interface(_))
    }

    /// Returns true if this is a relationship.
    #[must_use]
    pub const fn is_relationship(&self) -> bool {
        matches!(
            self.data,
            ElementData::Generalization(_)
                | ElementData::InterfaceRealization(_)
                | ElementData::Association(_)
        )
    }
}

/// Kind-specific element payload.
#[derive(Debug, Clone)]
pub enum ElementData {
    /// Package payload.
    Package(PackageDef),
    /// Class payload.
    Class(ClassifierDef),
    /// Interface payload.
    Interface(ClassifierDef),
    /// Enumeration payload.
    Enumeration(EnumerationDef),
    /// Attribute payload.
    Attribute(AttributeDef),
    /// Operation payload.
    Operation(OperationDef),
    /// Generalization payload.
    Generalization(RelationshipDef),
    /// Interface realization payload.
    InterfaceRealization(RelationshipDef),
    /// Association payload.
    Association(AssociationDef),
}

/// Package definition.
#[derive(Debug, Clone, Default)]
pub struct PackageDef {
    /// Owned elements in model order.
    pub owned_elements: Vec<ElementId>,
}

/// Class or interface definition.
#[derive(Debug, Clone, Default)]
pub struct ClassifierDef {
    /// Owned elements (nested types and relationships) in model order.
    pub owned_elements: Vec<ElementId>,
    /// Owned attributes in declaration order.
    pub attributes: Vec<ElementId>,
    /// Owned operations in declaration order.
    pub operations: Vec<ElementId>,
    /// Whether the classifier is abstract.
    pub is_abstract: bool,
    /// Whether the classifier is final (leaf).
    pub is_final: bool,
    /// Visibility when nested in another classifier.
    pub visibility: Visibility,
}

impl ClassifierDef {
    /// Creates a new empty classifier definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Enumeration definition.
#[derive(Debug, Clone, Default)]
pub struct EnumerationDef {
    /// Literal names in declaration order.
    pub literals: Vec<String>,
    /// Visibility when nested in a classifier.
    pub visibility: Visibility,
}

impl EnumerationDef {
    /// Creates an enumeration definition from its literals.
    #[must_use]
    pub fn new<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            literals: literals.into_iter().map(Into::into).collect(),
            visibility: Visibility::Package,
        }
    }
}

/// Attribute definition.
#[derive(Debug, Clone)]
pub struct AttributeDef {
    /// Attribute type.
    pub type_ref: TypeRef,
    /// Multiplicity string (e.g. "1", "0..*").
    pub multiplicity: String,
    /// Whether the attribute is static.
    pub is_static: bool,
    /// Whether the attribute is read-only.
    pub is_read_only: bool,
    /// Whether the collection is ordered.
    pub is_ordered: bool,
    /// Modeled visibility.
    pub visibility: Visibility,
}

impl AttributeDef {
    /// Creates a new attribute definition with the given type.
    #[must_use]
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            multiplicity: String::new(),
            is_static: false,
            is_read_only: false,
            is_ordered: false,
            visibility: Visibility::Package,
        }
    }
}

/// Operation definition.
#[derive(Debug, Clone, Default)]
pub struct OperationDef {
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Whether the operation is static.
    pub is_static: bool,
    /// Whether the operation is abstract.
    pub is_abstract: bool,
    /// Modeled visibility.
    pub visibility: Visibility,
}

impl OperationDef {
    /// Creates a new operation definition without parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Returns the input parameters in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.direction == Direction::In)
    }

    /// Returns the first return parameter, if any.
    #[must_use]
    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.direction == Direction::Return)
    }
}

/// Operation parameter.
#[derive(Debug, Clone, Default)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Parameter type.
    pub type_ref: TypeRef,
    /// Multiplicity string.
    pub multiplicity: String,
    /// Parameter direction.
    pub direction: Direction,
}

impl Parameter {
    /// Creates an input parameter.
    #[must_use]
    pub fn input(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            ..Self::default()
        }
    }

    /// Creates a return parameter.
    #[must_use]
    pub fn returns(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            direction: Direction::Return,
            ..Self::default()
        }
    }
}

/// Generalization or interface realization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipDef {
    /// Specific element (subclass or implementor).
    pub source: ElementId,
    /// General element (superclass or interface).
    pub target: ElementId,
}

/// Association between two elements.
#[derive(Debug, Clone)]
pub struct AssociationDef {
    /// First end.
    pub end1: AssociationEnd,
    /// Second end.
    pub end2: AssociationEnd,
}

impl AssociationDef {
    /// Returns the end navigable from `elem`, if it carries a role name.
    ///
    /// The far end is returned when `elem` is referenced by the near end, the
    /// far end is navigable and named.
    #[must_use]
    pub fn navigable_end_from(&self, elem: ElementId) -> Option<&AssociationEnd> {
        if self.end1.reference == elem && self.end2.navigable && !self.end2.name.is_empty() {
            Some(&self.end2)
        } else if self.end2.reference == elem && self.end1.navigable && !self.end1.name.is_empty()
        {
            Some(&self.end1)
        } else {
            None
        }
    }
}

/// One end of an association.
#[derive(Debug, Clone)]
pub struct AssociationEnd {
    /// Role name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Element at this end.
    pub reference: ElementId,
    /// Whether this end is navigable.
    pub navigable: bool,
    /// Multiplicity string.
    pub multiplicity: String,
    /// Modeled visibility.
    pub visibility: Visibility,
}

impl AssociationEnd {
    /// Creates an unnamed, non-navigable end referencing `reference`.
    #[must_use]
    pub fn new(reference: ElementId) -> Self {
        Self {
            name: String::new(),
            documentation: String::new(),
            reference,
            navigable: false,
            multiplicity: String::new(),
            visibility: Visibility::Package,
        }
    }

    /// Creates a named, navigable end referencing `reference`.
    #[must_use]
    pub fn navigable(reference: ElementId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            navigable: true,
            ..Self::new(reference)
        }
    }
}

//! In-memory model arena.
//!
//! [`Model`] owns every element in a flat vector and hands out [`ElementId`]
//! indices. Ownership is expressed through owned-element lists on packages
//! and classifiers, with a non-owning parent link on every element.

use crate::repository::ModelRepository;
use crate::types::{
    AssociationDef, AssociationEnd, AttributeDef, ClassifierDef, Element, ElementData, ElementId,
    EnumerationDef, OperationDef, PackageDef, RelationshipDef,
};

/// In-memory UML model.
#[derive(Debug, Clone)]
pub struct Model {
    elements: Vec<Element>,
    root: ElementId,
}

impl Model {
    /// Creates a new model whose root package is named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let root = Element {
            name: name.into(),
            documentation: String::new(),
            parent: None,
            data: ElementData::Package(PackageDef::default()),
        };
        Self {
            elements: vec![root],
            root: ElementId(0),
        }
    }

    /// Returns the number of elements, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the model holds only its root package.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    /// Iterates over all elements with their ids, in model order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i as u32), e))
    }

    /// Returns a mutable reference to an element.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    /// Finds the first class, interface or enumeration named `name`.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<ElementId> {
        self.iter()
            .find(|(_, e)| {
                e.name == name
                    && matches!(
                        e.data,
                        ElementData::Class(_)
                            | ElementData::Interface(_)
                            | ElementData::Enumeration(_)
                    )
            })
            .map(|(id, _)| id)
    }

    /// Adds a package under `owner`.
    pub fn add_package(&mut self, owner: ElementId, name: impl Into<String>) -> ElementId {
        let id = self.push(owner, name, ElementData::Package(PackageDef::default()));
        self.own(owner, id);
        id
    }

    /// Adds a class under `owner`.
    pub fn add_class(
        &mut self,
        owner: ElementId,
        name: impl Into<String>,
        def: ClassifierDef,
    ) -> ElementId {
        let id = self.push(owner, name, ElementData::Class(def));
        self.own(owner, id);
        id
    }

    /// Adds an interface under `owner`.
    pub fn add_interface(
        &mut self,
        owner: ElementId,
        name: impl Into<String>,
        def: ClassifierDef,
    ) -> ElementId {
        let id = self.push(owner, name, ElementData::Interface(def));
        self.own(owner, id);
        id
    }

    /// Adds an enumeration under `owner`.
    pub fn add_enumeration(
        &mut self,
        owner: ElementId,
        name: impl Into<String>,
        def: EnumerationDef,
    ) -> ElementId {
        let id = self.push(owner, name, ElementData::Enumeration(def));
        self.own(owner, id);
        id
    }

    /// Adds an attribute to the classifier `owner`.
    pub fn add_attribute(
        &mut self,
        owner: ElementId,
        name: impl Into<String>,
        def: AttributeDef,
    ) -> ElementId {
        let id = self.push(owner, name, ElementData::Attribute(def));
        if let Some(c) = self.classifier_mut(owner) {
            c.attributes.push(id);
        }
        id
    }

    /// Adds an operation to the classifier `owner`.
    pub fn add_operation(
        &mut self,
        owner: ElementId,
        name: impl Into<String>,
        def: OperationDef,
    ) -> ElementId {
        let id = self.push(owner, name, ElementData::Operation(def));
        if let Some(c) = self.classifier_mut(owner) {
            c.operations.push(id);
        }
        id
    }

    /// Adds a generalization from `source` to `target`, owned by `source`.
    pub fn add_generalization(&mut self, source: ElementId, target: ElementId) -> ElementId {
        let data = ElementData::Generalization(RelationshipDef { source, target });
        let id = self.push(source, "", data);
        self.own(source, id);
        id
    }

    /// Adds an interface realization from `source` to `target`, owned by `source`.
    pub fn add_realization(&mut self, source: ElementId, target: ElementId) -> ElementId {
        let data = ElementData::InterfaceRealization(RelationshipDef { source, target });
        let id = self.push(source, "", data);
        self.own(source, id);
        id
    }

    /// Adds an association, owned by the element referenced by `end1`.
    pub fn add_association(&mut self, end1: AssociationEnd, end2: AssociationEnd) -> ElementId {
        let owner = end1.reference;
        let id = self.push(owner, "", ElementData::Association(AssociationDef { end1, end2 }));
        self.own(owner, id);
        id
    }

    fn push(&mut self, parent: ElementId, name: impl Into<String>, data: ElementData) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element {
            name: name.into(),
            documentation: String::new(),
            parent: Some(parent),
            data,
        });
        id
    }

    fn own(&mut self, owner: ElementId, child: ElementId) {
        match self.elements.get_mut(owner.index()).map(|e| &mut e.data) {
            Some(ElementData::Package(p)) => p.owned_elements.push(child),
            Some(ElementData::Class(c) | ElementData::Interface(c)) => {
                c.owned_elements.push(child)
            }
            _ => {}
        }
    }

    fn classifier_mut(&mut self, id: ElementId) -> Option<&mut ClassifierDef> {
        match self.elements.get_mut(id.index()).map(|e| &mut e.data) {
            Some(ElementData::Class(c) | ElementData::Interface(c)) => Some(c),
            _ => None,
        }
    }
}

impl ModelRepository for Model {
    fn root(&self) -> ElementId {
        self.root
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    fn relationships_of(&self, id: ElementId) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, e)| match &e.data {
                ElementData::Generalization(r) | ElementData::InterfaceRealization(r) => {
                    r.source == id || r.target == id
                }
                ElementData::Association(a) => a.end1.reference == id || a.end2.reference == id,
                _ => false,
            })
            .map(|(rid, _)| rid)
            .collect()
    }
}

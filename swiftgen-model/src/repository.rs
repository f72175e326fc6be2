//! Read-only query contract over a model.
//!
//! Generators only ever talk to a model through [`ModelRepository`], so any
//! host able to answer these queries (an in-memory [`crate::Model`], a live
//! modeling tool, a deserialized snapshot) can drive code generation.

use crate::types::{Element, ElementData, ElementId, RelationshipDef};
use std::path::PathBuf;

/// Read-only access to model elements and their relationships.
pub trait ModelRepository {
    /// Returns the root element of the model.
    fn root(&self) -> ElementId;

    /// Looks up an element by id.
    fn element(&self, id: ElementId) -> Option<&Element>;

    /// Returns every relationship touching `id`, in model order.
    ///
    /// A relationship touches an element when the element is its source or
    /// target, or is referenced by one of its association ends.
    fn relationships_of(&self, id: ElementId) -> Vec<ElementId>;

    /// Returns the generalizations and realizations whose source is `id`,
    /// in declaration order.
    fn super_classes(&self, id: ElementId) -> Vec<RelationshipDef> {
        self.relationships_of(id)
            .into_iter()
            .filter_map(|rel| match self.element(rel).map(|e| &e.data) {
                Some(ElementData::Generalization(r) | ElementData::InterfaceRealization(r))
                    if r.source == id =>
                {
                    Some(*r)
                }
                _ => None,
            })
            .collect()
    }

    /// Returns the name of `id`, or an empty string for unknown ids.
    fn name_of(&self, id: ElementId) -> &str {
        self.element(id).map_or("", |e| e.name.as_str())
    }

    /// Returns the `::`-joined name chain of `id`, excluding the root.
    fn qualified_name(&self, id: ElementId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == self.root() {
                break;
            }
            let Some(elem) = self.element(cur) else {
                break;
            };
            parts.push(elem.name.as_str());
            current = elem.parent;
        }
        parts.reverse();
        parts.join("::")
    }

    /// Returns the directory path of the packages enclosing `id`.
    fn path_of(&self, id: ElementId) -> PathBuf {
        let mut parts = Vec::new();
        let mut current = self.element(id).and_then(|e| e.parent);
        while let Some(cur) = current {
            if cur == self.root() {
                break;
            }
            let Some(elem) = self.element(cur) else {
                break;
            };
            if matches!(elem.data, ElementData::Package(_)) {
                parts.push(elem.name.as_str());
            }
            current = elem.parent;
        }
        parts.iter().rev().collect()
    }
}

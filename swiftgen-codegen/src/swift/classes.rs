//! Class and protocol rendering.

use crate::options::GenerationContext;
use crate::swift::enums::EnumRenderer;
use crate::swift::members::{MemberRenderer, MethodStyle};
use crate::swift::visibility::{Member, classify_elements, classify_members};
use crate::writer::{CodeWriter, doc_block};
use swiftgen_model::{
    ClassifierDef, Element, ElementData, ElementId, ElementKind, ModelRepository, OperationDef,
};

/// Renderer for class and interface declarations.
pub struct ClassRenderer<'a, R: ModelRepository + ?Sized> {
    model: &'a R,
    ctx: &'a GenerationContext,
    members: MemberRenderer<'a, R>,
    enums: EnumRenderer<'a, R>,
}

impl<'a, R: ModelRepository + ?Sized> ClassRenderer<'a, R> {
    /// Creates a new class renderer.
    #[must_use]
    pub fn new(model: &'a R, ctx: &'a GenerationContext) -> Self {
        Self {
            model,
            ctx,
            members: MemberRenderer::new(model, ctx),
            enums: EnumRenderer::new(model, ctx),
        }
    }

    /// Writes the declaration header of a class or interface.
    ///
    /// The header holds the documentation block, the declaration line and
    /// the properties and nested types, bucketed public, protected, private.
    /// Interfaces also list their operation signatures. When `pre_pass` is
    /// set the header opens an implementation body: the closing brace is
    /// omitted and the protocol shortcut for realizing classes is not used.
    pub fn write_header(&self, writer: &mut CodeWriter, id: ElementId, pre_pass: bool) {
        let model: &'a R = self.model;
        let Some(elem) = model.element(id) else {
            return;
        };
        let Some(def) = elem.as_classifier() else {
            return;
        };

        writer.write_line(&doc_block(&self.class_doc(elem), ""));
        writer.write_line(&self.declaration(id, elem, def, pre_pass));

        let is_protocol = elem.is_interface();
        let buckets = classify_members(self.model, self.header_members(id, def));
        if buckets.public.is_empty() {
            writer.blank_line();
        }
        for member in buckets.iter() {
            self.write_member(writer, member, is_protocol);
        }

        if !pre_pass {
            writer.write_line("}\n");
        }
    }

    /// Writes the implementation body of a class.
    ///
    /// Nested classes come first, followed by the header, stub bodies for
    /// the class's operations, overrides of the first superclass's abstract
    /// operations and stubs for a realized interface.
    pub fn write_body(&self, writer: &mut CodeWriter, id: ElementId) {
        let Some(elem) = self.model.element(id) else {
            return;
        };
        let Some(def) = elem.as_classifier() else {
            return;
        };

        let nested = def
            .owned_elements
            .iter()
            .copied()
            .filter(|n| self.model.element(*n).is_some_and(Element::is_class));
        for nested in classify_elements(self.model, nested).iter() {
            self.write_body(writer, *nested);
        }

        self.write_header(writer, id, true);
        let own_ops = classify_elements(self.model, def.operations.iter().copied());
        self.write_stubs(writer, own_ops.iter());

        if let Some(first) = self.model.super_classes(id).first() {
            let abstract_ops: Vec<ElementId> = self
                .operations_of(first.target)
                .into_iter()
                .filter(|op| self.operation(*op).is_some_and(|o| o.is_abstract))
                .collect();
            if !abstract_ops.is_empty() {
                writer.write_line(&format!(
                    "\n// MARK: - Extends from {}",
                    self.model.name_of(first.target)
                ));
                self.write_stubs(writer, abstract_ops.iter());
            }
        }

        if let Some(interface) = self.realized_interface(def) {
            writer.write_line(&format!(
                "\n// MARK: - Implementation for {}",
                self.model.name_of(interface)
            ));
            let ops = classify_elements(self.model, self.operations_of(interface));
            self.write_stubs(writer, ops.iter());
        }

        writer.write_line("\n}\n");
    }

    fn write_member(&self, writer: &mut CodeWriter, member: &Member<'_>, is_protocol: bool) {
        match member {
            Member::Attribute(id) => {
                if let Some(line) = self.members.attribute(*id, is_protocol) {
                    writer.write_line(&line);
                }
            }
            Member::AssociationEnd(end) => {
                if let Some(line) = self.members.association_end(end, is_protocol) {
                    writer.write_line(&line);
                }
            }
            Member::Operation(id) if is_protocol => {
                if let Some(line) = self.members.operation(*id, MethodStyle::Signature) {
                    writer.write_line(&line);
                }
            }
            Member::Operation(_) => {}
            Member::Nested(id) => match self.model.element(*id).map(Element::kind) {
                Some(ElementKind::Class) => self.write_header(writer, *id, false),
                Some(ElementKind::Enumeration) => self.enums.write(writer, *id),
                _ => {}
            },
        }
    }

    fn write_stubs<'i>(&self, writer: &mut CodeWriter, ops: impl Iterator<Item = &'i ElementId>) {
        for op in ops {
            if let Some(stub) = self.members.operation(*op, MethodStyle::Stub) {
                writer.write_line(&stub);
            }
        }
    }

    /// Collects attributes, navigable association ends, operations and
    /// nested classes or enumerations, in that order.
    fn header_members(&self, id: ElementId, def: &'a ClassifierDef) -> Vec<Member<'a>> {
        let model: &'a R = self.model;
        let mut members: Vec<Member<'a>> =
            def.attributes.iter().copied().map(Member::Attribute).collect();

        for rel in model.relationships_of(id) {
            if let Some(ElementData::Association(assoc)) = model.element(rel).map(|e| &e.data) {
                members.extend(assoc.navigable_end_from(id).map(Member::AssociationEnd));
            }
        }

        members.extend(def.operations.iter().copied().map(Member::Operation));
        members.extend(
            def.owned_elements
                .iter()
                .copied()
                .filter(|n| {
                    matches!(
                        model.element(*n).map(Element::kind),
                        Some(ElementKind::Class | ElementKind::Enumeration)
                    )
                })
                .map(Member::Nested),
        );
        members
    }

    fn class_doc(&self, elem: &Element) -> String {
        let brief = if elem.documentation.is_empty() {
            format!("{} class", elem.name)
        } else {
            elem.documentation.clone()
        };
        format!(
            "@brief  {brief}\n\n@author: {} \n\n@version: {}\n",
            self.ctx.class_author(),
            self.ctx.version_stamp()
        )
    }

    fn declaration(
        &self,
        id: ElementId,
        elem: &Element,
        def: &ClassifierDef,
        pre_pass: bool,
    ) -> String {
        if elem.is_interface() {
            return format!("protocol {} {{", elem.name);
        }

        let supers = self.model.super_classes(id);
        if !pre_pass && self.realized_interface(def).is_some() {
            let protocols = supers
                .first()
                .map(|s| format!(", {}", self.model.name_of(s.target)))
                .unwrap_or_default();
            return format!("public class {}: AnyObject{protocols} {{", elem.name);
        }

        let final_modifier = if def.is_final { " final" } else { "" };
        // Only the first two supertypes are listed.
        let inheritance = match supers.as_slice() {
            [] => String::new(),
            [first] => format!(": {}", self.model.name_of(first.target)),
            [first, second, ..] => format!(
                ": {}, {}",
                self.model.name_of(first.target),
                self.model.name_of(second.target)
            ),
        };
        format!("public class {}{final_modifier}{inheritance} {{", elem.name)
    }

    /// Returns the target of the realization owned first by the class.
    fn realized_interface(&self, def: &ClassifierDef) -> Option<ElementId> {
        let first = self.model.element(*def.owned_elements.first()?)?;
        match &first.data {
            ElementData::InterfaceRealization(rel) => Some(rel.target),
            _ => None,
        }
    }

    fn operations_of(&self, classifier: ElementId) -> Vec<ElementId> {
        self.model
            .element(classifier)
            .and_then(Element::as_classifier)
            .map(|c| c.operations.clone())
            .unwrap_or_default()
    }

    fn operation(&self, id: ElementId) -> Option<&OperationDef> {
        match &self.model.element(id)?.data {
            ElementData::Operation(op) => Some(op),
            _ => None,
        }
    }
}

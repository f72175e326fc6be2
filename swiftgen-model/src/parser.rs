//! XML model loader.
//!
//! This module reads a compact XML serialization of a UML model into a
//! [`Model`]. Type names and relationship targets are resolved by element
//! name once the whole document has been read, so forward references are
//! allowed.

use crate::error::ParseError;
use crate::model::Model;
use crate::repository::ModelRepository;
use crate::types::{
    AssociationEnd, AttributeDef, ClassifierDef, Direction, ElementData, ElementId,
    EnumerationDef, OperationDef, Parameter, TypeRef, Visibility,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

/// Parses a model from an XML string.
///
/// # Arguments
/// * `xml` - XML model content
///
/// # Returns
/// Parsed model or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a required attribute is
/// missing or invalid, or a reference cannot be resolved.
pub fn parse_model(xml: &str) -> Result<Model, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut loader: Option<Loader> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"model" => {
                let mut ld = Loader::new(&Attrs::read(e)?);
                let root = ld.model.root();
                ld.parse_owned(&mut reader, root)?;
                loader = Some(ld);
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"model" => {
                loader = Some(Loader::new(&Attrs::read(e)?));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let loader = loader.ok_or_else(|| ParseError::structure("No model element found"))?;
    let model = loader.resolve()?;
    tracing::debug!("loaded model '{}' with {} elements", model.name_of(model.root()), model.len());
    Ok(model)
}

/// Loads a model from an XML file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn load_model(path: &Path) -> Result<Model, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_model(&xml)
}

/// Attribute values of one XML start tag.
struct Attrs {
    element: String,
    values: Vec<(String, String)>,
}

impl Attrs {
    fn read(e: &BytesStart<'_>) -> Result<Self, ParseError> {
        let element = std::str::from_utf8(e.name().as_ref())?.to_string();
        let mut values = Vec::new();
        for attr in e.attributes().flatten() {
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = std::str::from_utf8(&attr.value)?;
            values.push((key.to_string(), value.to_string()));
        }
        Ok(Self { element, values })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn required(&self, key: &str) -> Result<String, ParseError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ParseError::missing_attr(&self.element, key))
    }

    fn flag(&self, key: &str) -> Result<bool, ParseError> {
        match self.get(key) {
            None => Ok(false),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(ParseError::invalid_attr(&self.element, key, other)),
        }
    }

    fn visibility(&self) -> Result<Visibility, ParseError> {
        match self.get("visibility") {
            None => Ok(Visibility::Package),
            Some(v) => Visibility::parse(v)
                .ok_or_else(|| ParseError::invalid_attr(&self.element, "visibility", v)),
        }
    }

    fn direction(&self) -> Result<Direction, ParseError> {
        match self.get("direction") {
            None => Ok(Direction::In),
            Some(v) => Direction::parse(v)
                .ok_or_else(|| ParseError::invalid_attr(&self.element, "direction", v)),
        }
    }
}

/// A relationship whose target is patched after the document is read.
struct PendingTarget {
    relationship: ElementId,
    target: String,
}

/// An association end whose reference is patched after the document is read.
struct PendingEnd {
    association: ElementId,
    second: bool,
    reference: String,
}

/// Builds a model while reading events, deferring name resolution.
struct Loader {
    model: Model,
    targets: Vec<PendingTarget>,
    ends: Vec<PendingEnd>,
}

impl Loader {
    fn new(attrs: &Attrs) -> Self {
        let mut model = Model::new(attrs.text("name"));
        let root = model.root();
        if let Some(elem) = model.element_mut(root) {
            elem.documentation = attrs.text("doc");
        }
        Self {
            model,
            targets: Vec::new(),
            ends: Vec::new(),
        }
    }

    /// Parses the children of `owner` up to its end tag.
    fn parse_owned(&mut self, reader: &mut Reader<&[u8]>, owner: ElementId) -> Result<(), ParseError> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let attrs = Attrs::read(e)?;
                    self.parse_child(reader, owner, &attrs, true)?;
                }
                Ok(Event::Empty(ref e)) => {
                    let attrs = Attrs::read(e)?;
                    self.parse_child(reader, owner, &attrs, false)?;
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Parses one child element of `owner`.
    fn parse_child(
        &mut self,
        reader: &mut Reader<&[u8]>,
        owner: ElementId,
        attrs: &Attrs,
        has_children: bool,
    ) -> Result<(), ParseError> {
        match attrs.element.as_str() {
            "package" => {
                let id = self.model.add_package(owner, attrs.required("name")?);
                self.document(id, attrs);
                if has_children {
                    self.parse_owned(reader, id)?;
                }
            }
            "class" | "interface" => {
                let mut def = ClassifierDef::new();
                def.is_abstract = attrs.flag("abstract")?;
                def.is_final = attrs.flag("final")? || attrs.flag("leaf")?;
                def.visibility = attrs.visibility()?;
                let name = attrs.required("name")?;
                let id = if attrs.element == "class" {
                    self.model.add_class(owner, name, def)
                } else {
                    self.model.add_interface(owner, name, def)
                };
                self.document(id, attrs);
                if has_children {
                    self.parse_owned(reader, id)?;
                }
            }
            "enumeration" => {
                let mut def = EnumerationDef::default();
                def.visibility = attrs.visibility()?;
                if has_children {
                    def.literals = parse_literals(reader)?;
                }
                let id = self.model.add_enumeration(owner, attrs.required("name")?, def);
                self.document(id, attrs);
            }
            "attribute" => {
                let mut def = AttributeDef::new(TypeRef::named(attrs.text("type")));
                def.multiplicity = attrs.text("multiplicity");
                def.is_static = attrs.flag("static")?;
                def.is_read_only = attrs.flag("readOnly")?;
                def.is_ordered = attrs.flag("ordered")?;
                def.visibility = attrs.visibility()?;
                let id = self.model.add_attribute(owner, attrs.text("name"), def);
                self.document(id, attrs);
                if has_children {
                    skip_to_end(reader)?;
                }
            }
            "operation" => {
                let mut def = OperationDef::new();
                def.is_static = attrs.flag("static")?;
                def.is_abstract = attrs.flag("abstract")?;
                def.visibility = attrs.visibility()?;
                if has_children {
                    def.parameters = parse_parameters(reader)?;
                }
                let id = self.model.add_operation(owner, attrs.text("name"), def);
                self.document(id, attrs);
            }
            "generalization" | "realization" => {
                let target = attrs.required("target")?;
                // Target is patched in `resolve`.
                let id = if attrs.element == "generalization" {
                    self.model.add_generalization(owner, owner)
                } else {
                    self.model.add_realization(owner, owner)
                };
                self.targets.push(PendingTarget {
                    relationship: id,
                    target,
                });
                if has_children {
                    skip_to_end(reader)?;
                }
            }
            "association" => {
                let raw_ends = if has_children {
                    parse_ends(reader)?
                } else {
                    Vec::new()
                };
                let [first, second] = <[RawEnd; 2]>::try_from(raw_ends).map_err(|ends| {
                    ParseError::structure(format!(
                        "association must have exactly two ends, found {}",
                        ends.len()
                    ))
                })?;
                let end1 = first.to_end(owner);
                let end2 = second.to_end(owner);
                let id = self.model.add_association(end1, end2);
                self.ends.push(PendingEnd {
                    association: id,
                    second: false,
                    reference: first.reference,
                });
                self.ends.push(PendingEnd {
                    association: id,
                    second: true,
                    reference: second.reference,
                });
            }
            _ => {
                if has_children {
                    skip_to_end(reader)?;
                }
            }
        }
        Ok(())
    }

    fn document(&mut self, id: ElementId, attrs: &Attrs) {
        if let Some(elem) = self.model.element_mut(id) {
            elem.documentation = attrs.text("doc");
        }
    }

    /// Resolves deferred references and returns the finished model.
    fn resolve(mut self) -> Result<Model, ParseError> {
        let mut types: HashMap<String, ElementId> = HashMap::new();
        for (id, elem) in self.model.iter() {
            if matches!(
                elem.data,
                ElementData::Class(_) | ElementData::Interface(_) | ElementData::Enumeration(_)
            ) {
                types.entry(elem.name.clone()).or_insert(id);
            }
        }

        for pending in &self.targets {
            let target = *types.get(&pending.target).ok_or_else(|| {
                ParseError::unresolved(&pending.target, "relationship target")
            })?;
            if let Some(elem) = self.model.element_mut(pending.relationship) {
                if let ElementData::Generalization(r) | ElementData::InterfaceRealization(r) =
                    &mut elem.data
                {
                    r.target = target;
                }
            }
        }

        for pending in &self.ends {
            let reference = *types.get(&pending.reference).ok_or_else(|| {
                ParseError::unresolved(&pending.reference, "association end")
            })?;
            if let Some(elem) = self.model.element_mut(pending.association) {
                if let ElementData::Association(a) = &mut elem.data {
                    if pending.second {
                        a.end2.reference = reference;
                    } else {
                        a.end1.reference = reference;
                    }
                }
            }
        }

        let ids: Vec<ElementId> = self.model.iter().map(|(id, _)| id).collect();
        for id in ids {
            let Some(elem) = self.model.element_mut(id) else {
                continue;
            };
            match &mut elem.data {
                ElementData::Attribute(a) => resolve_type(&mut a.type_ref, &types),
                ElementData::Operation(o) => {
                    for param in &mut o.parameters {
                        resolve_type(&mut param.type_ref, &types);
                    }
                }
                _ => {}
            }
        }

        Ok(self.model)
    }
}

/// Turns a literal type name into an element reference when it names a type.
fn resolve_type(type_ref: &mut TypeRef, types: &HashMap<String, ElementId>) {
    if let TypeRef::Named(name) = type_ref {
        if let Some(&id) = types.get(name.as_str()) {
            *type_ref = TypeRef::Element(id);
        }
    }
}

/// Association end as read from the document, before resolution.
struct RawEnd {
    reference: String,
    name: String,
    documentation: String,
    navigable: bool,
    multiplicity: String,
    visibility: Visibility,
}

impl RawEnd {
    fn to_end(&self, placeholder: ElementId) -> AssociationEnd {
        let mut end = AssociationEnd::new(placeholder);
        end.name = self.name.clone();
        end.documentation = self.documentation.clone();
        end.navigable = self.navigable;
        end.multiplicity = self.multiplicity.clone();
        end.visibility = self.visibility;
        end
    }
}

/// Parses the `end` children of an association.
fn parse_ends(reader: &mut Reader<&[u8]>) -> Result<Vec<RawEnd>, ParseError> {
    let mut ends = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let attrs = Attrs::read(e)?;
                if attrs.element == "end" {
                    ends.push(RawEnd {
                        reference: attrs.required("reference")?,
                        name: attrs.text("name"),
                        documentation: attrs.text("doc"),
                        navigable: attrs.flag("navigable")?,
                        multiplicity: attrs.text("multiplicity"),
                        visibility: attrs.visibility()?,
                    });
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"association" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(ends)
}

/// Parses the `parameter` children of an operation.
fn parse_parameters(reader: &mut Reader<&[u8]>) -> Result<Vec<Parameter>, ParseError> {
    let mut params = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let attrs = Attrs::read(e)?;
                if attrs.element == "parameter" {
                    params.push(Parameter {
                        name: attrs.text("name"),
                        documentation: attrs.text("doc"),
                        type_ref: TypeRef::named(attrs.text("type")),
                        multiplicity: attrs.text("multiplicity"),
                        direction: attrs.direction()?,
                    });
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"operation" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(params)
}

/// Parses the `literal` children of an enumeration.
fn parse_literals(reader: &mut Reader<&[u8]>) -> Result<Vec<String>, ParseError> {
    let mut literals = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let attrs = Attrs::read(e)?;
                if attrs.element == "literal" {
                    literals.push(attrs.required("name")?);
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"enumeration" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(literals)
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementKind;
    use std::io::Write;

    const SIMPLE_MODEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model name="Demo" doc="Demo project">
    <package name="app">
        <interface name="Store">
            <operation name="save" visibility="public">
                <parameter name="key" type="String" direction="in"/>
                <parameter type="boolean" direction="return"/>
            </operation>
        </interface>
        <class name="Account" final="true" doc="A user account">
            <realization target="Store"/>
            <attribute name="id" type="Integer" multiplicity="1" visibility="private"/>
            <attribute name="owner" type="Account" visibility="public"/>
            <association>
                <end reference="Account"/>
                <end reference="Order" name="orders" navigable="true" multiplicity="0..*"/>
            </association>
            <enumeration name="State">
                <literal name="Open"/>
                <literal name="Closed"/>
            </enumeration>
        </class>
        <class name="Order"/>
    </package>
</model>"#;

    fn child(model: &Model, owner: ElementId, name: &str) -> ElementId {
        model
            .element(owner)
            .unwrap()
            .owned_elements()
            .iter()
            .copied()
            .find(|&id| model.name_of(id) == name)
            .unwrap_or_else(|| panic!("no child named {name}"))
    }

    #[test]
    fn test_parse_simple_model() {
        let model = parse_model(SIMPLE_MODEL).expect("Failed to parse model");
        let root = model.element(model.root()).unwrap();

        assert_eq!(root.name, "Demo");
        assert_eq!(root.documentation, "Demo project");
        assert_eq!(root.owned_elements().len(), 1);
    }

    #[test]
    fn test_parse_classifiers() {
        let model = parse_model(SIMPLE_MODEL).expect("Failed to parse model");
        let app = child(&model, model.root(), "app");
        let account = child(&model, app, "Account");
        let store = child(&model, app, "Store");

        let elem = model.element(account).unwrap();
        assert_eq!(elem.kind(), ElementKind::Class);
        assert_eq!(elem.documentation, "A user account");
        assert!(elem.as_classifier().unwrap().is_final);
        assert_eq!(model.element(store).unwrap().kind(), ElementKind::Interface);
    }

    #[test]
    fn test_realization_resolved_and_first() {
        let model = parse_model(SIMPLE_MODEL).expect("Failed to parse model");
        let app = child(&model, model.root(), "app");
        let account = child(&model, app, "Account");
        let store = child(&model, app, "Store");

        let first = model.element(account).unwrap().owned_elements()[0];
        assert_eq!(
            model.element(first).unwrap().kind(),
            ElementKind::InterfaceRealization
        );
        let supers = model.super_classes(account);
        assert_eq!(supers.len(), 1);
        assert_eq!(supers[0].target, store);
    }

    #[test]
    fn test_attribute_types_resolved() {
        let model = parse_model(SIMPLE_MODEL).expect("Failed to parse model");
        let app = child(&model, model.root(), "app");
        let account = child(&model, app, "Account");
        let attrs = &model.element(account).unwrap().as_classifier().unwrap().attributes;

        let ElementData::Attribute(id_attr) = &model.element(attrs[0]).unwrap().data else {
            panic!("expected attribute");
        };
        assert_eq!(id_attr.type_ref, TypeRef::named("Integer"));
        assert_eq!(id_attr.visibility, Visibility::Private);

        let ElementData::Attribute(owner) = &model.element(attrs[1]).unwrap().data else {
            panic!("expected attribute");
        };
        assert_eq!(owner.type_ref, TypeRef::Element(account));
    }

    #[test]
    fn test_association_ends_resolved() {
        let model = parse_model(SIMPLE_MODEL).expect("Failed to parse model");
        let app = child(&model, model.root(), "app");
        let account = child(&model, app, "Account");
        let order = child(&model, app, "Order");

        let rels = model.relationships_of(order);
        assert_eq!(rels.len(), 1);
        let ElementData::Association(assoc) = &model.element(rels[0]).unwrap().data else {
            panic!("expected association");
        };
        let end = assoc.navigable_end_from(account).expect("navigable end");
        assert_eq!(end.name, "orders");
        assert_eq!(end.reference, order);
        assert_eq!(end.multiplicity, "0..*");
    }

    #[test]
    fn test_operation_parameters() {
        let model = parse_model(SIMPLE_MODEL).expect("Failed to parse model");
        let app = child(&model, model.root(), "app");
        let store = child(&model, app, "Store");
        let ops = &model.element(store).unwrap().as_classifier().unwrap().operations;

        let ElementData::Operation(op) = &model.element(ops[0]).unwrap().data else {
            panic!("expected operation");
        };
        assert_eq!(op.visibility, Visibility::Public);
        assert_eq!(op.parameters.len(), 2);
        assert_eq!(op.inputs().count(), 1);
        assert_eq!(
            op.return_parameter().map(|p| &p.type_ref),
            Some(&TypeRef::named("boolean"))
        );
    }

    #[test]
    fn test_enumeration_literal_order() {
        let model = parse_model(SIMPLE_MODEL).expect("Failed to parse model");
        let app = child(&model, model.root(), "app");
        let account = child(&model, app, "Account");
        let state = child(&model, account, "State");

        let ElementData::Enumeration(e) = &model.element(state).unwrap().data else {
            panic!("expected enumeration");
        };
        assert_eq!(e.literals, vec!["Open", "Closed"]);
    }

    #[test]
    fn test_unresolved_target() {
        let xml = r#"<model name="M"><class name="A"><generalization target="Nope"/></class></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::UnresolvedReference { ref name, .. } if name == "Nope"));
    }

    #[test]
    fn test_invalid_flag() {
        let xml = r#"<model name="M"><class name="A" abstract="maybe"/></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_missing_class_name() {
        let xml = r#"<model name="M"><class abstract="true"/></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_association_needs_two_ends() {
        let xml = r#"<model name="M"><class name="A"><association><end reference="A"/></association></class></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_no_model_element() {
        let err = parse_model("<other/>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_unknown_elements_skipped() {
        let xml = r#"<model name="M"><diagram><node id="1"/></diagram><class name="A"/></model>"#;
        let model = parse_model(xml).expect("Failed to parse model");
        assert_eq!(model.element(model.root()).unwrap().owned_elements().len(), 1);
    }

    #[test]
    fn test_load_model_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SIMPLE_MODEL.as_bytes()).expect("write");
        let model = load_model(file.path()).expect("Failed to load model");
        assert_eq!(model.name_of(model.root()), "Demo");
    }
}

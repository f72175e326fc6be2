//! Property and method rendering.

use crate::options::GenerationContext;
use crate::swift::types::{TypeMapper, VOID, default_return};
use crate::swift::visibility::access_keyword;
use crate::writer::doc_block;
use swiftgen_model::{
    AssociationEnd, ElementData, ElementId, ModelRepository, OperationDef, TypeRef,
};

/// How an operation is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodStyle {
    /// Declaration only, used inside protocols.
    Signature,
    /// Declaration with a stub body returning a default value.
    Stub,
}

/// Renders single members as Swift source fragments.
pub struct MemberRenderer<'a, R: ModelRepository + ?Sized> {
    model: &'a R,
    ctx: &'a GenerationContext,
    types: TypeMapper<'a, R>,
}

impl<'a, R: ModelRepository + ?Sized> MemberRenderer<'a, R> {
    /// Creates a new member renderer.
    #[must_use]
    pub fn new(model: &'a R, ctx: &'a GenerationContext) -> Self {
        Self {
            model,
            ctx,
            types: TypeMapper::new(model),
        }
    }

    /// Renders an attribute as a property.
    ///
    /// Returns `None` for unnamed attributes and non-attribute elements.
    #[must_use]
    pub fn attribute(&self, id: ElementId, in_protocol: bool) -> Option<String> {
        let elem = self.model.element(id)?;
        let ElementData::Attribute(attr) = &elem.data else {
            return None;
        };
        if elem.name.is_empty() {
            return None;
        }

        // Only properties typed by a modeled class carry an access keyword.
        let access = match &attr.type_ref {
            TypeRef::Element(ty) if self.model.element(*ty).is_some_and(|t| t.is_class()) => {
                access_keyword(attr.visibility)
            }
            _ => None,
        };

        Some(self.property(&Property {
            name: &elem.name,
            documentation: &elem.documentation,
            type_name: self.types.attribute(attr),
            access,
            is_static: attr.is_static,
            in_protocol,
        }))
    }

    /// Renders a navigable association end as a property.
    ///
    /// Returns `None` for unnamed ends.
    #[must_use]
    pub fn association_end(&self, end: &AssociationEnd, in_protocol: bool) -> Option<String> {
        if end.name.is_empty() {
            return None;
        }
        Some(self.property(&Property {
            name: &end.name,
            documentation: &end.documentation,
            type_name: self.types.association_end(end),
            access: None,
            is_static: false,
            in_protocol,
        }))
    }

    /// Renders an operation.
    ///
    /// The result starts with a newline and, when present, the documentation
    /// block. Returns `None` for unnamed operations.
    #[must_use]
    pub fn operation(&self, id: ElementId, style: MethodStyle) -> Option<String> {
        let elem = self.model.element(id)?;
        let ElementData::Operation(op) = &elem.data else {
            return None;
        };
        if elem.name.is_empty() {
            return None;
        }

        let indent = self.ctx.indent();
        let return_type = op.return_parameter().map(|p| self.types.parameter(p));
        let docs = self.operation_docs(&elem.name, &elem.documentation, op, return_type.as_deref());

        let params = op
            .inputs()
            .map(|p| format!("{}: {}", p.name, self.types.parameter(p)))
            .collect::<Vec<_>>()
            .join(", ");
        let modifier = if op.is_static { "static " } else { "" };

        let mut method = format!("{indent}{modifier}func {}({})", elem.name, params.trim());
        if style == MethodStyle::Stub {
            if let Some(ty) = return_type.as_deref().filter(|t| *t != VOID) {
                method.push_str(&format!(" -> {ty}"));
            }
            method.push_str(" {\n");
            if op.is_abstract && self.ctx.options.gen_strict_abstract {
                method.push_str(&format!("\n{indent}// AbstractMethodNotImplemented"));
            }
            if let Some(value) = return_type.as_deref().and_then(default_return) {
                method.push_str(&format!("\n{indent}{indent}return {value}"));
            }
            method.push_str(&format!("\n{indent}}}"));
        }

        Some(format!("\n{}{}", doc_block(&docs, &indent), method))
    }

    fn operation_docs(
        &self,
        name: &str,
        documentation: &str,
        op: &OperationDef,
        return_type: Option<&str>,
    ) -> String {
        let brief = if documentation.is_empty() {
            name
        } else {
            documentation
        };
        let mut docs = format!("@brief {brief}");
        for param in op.inputs() {
            docs.push_str(&format!("\n@param {} {}", param.name, param.documentation));
        }
        if let (Some(ret), Some(ty)) = (op.return_parameter(), return_type) {
            let text = if ret.documentation.is_empty() {
                ty
            } else {
                ret.documentation.as_str()
            };
            docs.push_str(&format!("\n@return {text}"));
        }
        docs
    }

    fn property(&self, prop: &Property<'_>) -> String {
        let indent = self.ctx.indent();
        let mut out = String::new();
        if !prop.documentation.is_empty() {
            out.push_str(&doc_block(&format!("{}\n", prop.documentation), &indent));
        }

        out.push_str(&indent);
        if let Some(access) = prop.access {
            out.push_str(access);
            out.push(' ');
        }
        if prop.is_static {
            out.push_str("static ");
        }

        // Untyped properties stay optional in protocols too.
        let ty = match (prop.type_name.as_str(), prop.in_protocol) {
            (VOID, true) => "String?",
            (VOID, false) => "String",
            ("Dictionary" | "dictionary", _) => "Dictionary<String, Any>",
            ("Array" | "array", _) => "Array<Any>",
            (other, _) => other,
        };
        let suffix = if prop.in_protocol { " {get}" } else { "?" };
        out.push_str(&format!("var {}: {ty}{suffix}", prop.name));
        out
    }
}

struct Property<'p> {
    name: &'p str,
    documentation: &'p str,
    type_name: String,
    access: Option<&'static str>,
    is_static: bool,
    in_protocol: bool,
}

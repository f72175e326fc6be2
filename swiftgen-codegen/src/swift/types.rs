//! Model type to Swift type mapping.

use swiftgen_model::{AssociationEnd, AttributeDef, ModelRepository, Parameter, TypeRef};

/// Placeholder used when a member has no type.
pub const VOID: &str = "void";

/// Multiplicities rendered as a sequence type.
const SEQUENCE_MULTIPLICITIES: [&str; 3] = ["0..*", "1..*", "*"];

/// Maps attribute, parameter and association-end types to Swift syntax.
pub struct TypeMapper<'a, R: ModelRepository + ?Sized> {
    model: &'a R,
}

impl<'a, R: ModelRepository + ?Sized> TypeMapper<'a, R> {
    /// Creates a new type mapper.
    #[must_use]
    pub fn new(model: &'a R) -> Self {
        Self { model }
    }

    /// Resolves the type of an attribute.
    #[must_use]
    pub fn attribute(&self, attr: &AttributeDef) -> String {
        // Ordered and unordered collections map to the same sequence type.
        apply_multiplicity(self.base_name(&attr.type_ref), &attr.multiplicity)
    }

    /// Resolves the type of an operation parameter.
    #[must_use]
    pub fn parameter(&self, param: &Parameter) -> String {
        apply_multiplicity(self.base_name(&param.type_ref), &param.multiplicity)
    }

    /// Resolves the type of an association end (the referenced element).
    #[must_use]
    pub fn association_end(&self, end: &AssociationEnd) -> String {
        let name = self.model.name_of(end.reference);
        let base = if name.is_empty() { VOID } else { name };
        apply_multiplicity(base, &end.multiplicity)
    }

    fn base_name<'t>(&'t self, type_ref: &'t TypeRef) -> &'t str {
        match type_ref {
            TypeRef::Element(id) => {
                let name = self.model.name_of(*id);
                if name.is_empty() { VOID } else { name }
            }
            TypeRef::Named(name) if !name.is_empty() => name,
            _ => VOID,
        }
    }
}

/// Wraps `base` according to `multiplicity`, then renames the result.
///
/// `0..*`, `1..*` and `*` (surrounding whitespace ignored) produce
/// `Vector<T>`. Any other multiplicity made only of digits, except `1`,
/// produces `T[]`. Everything else leaves the type unchanged.
#[must_use]
pub fn apply_multiplicity(base: &str, multiplicity: &str) -> String {
    let wrapped = if SEQUENCE_MULTIPLICITIES.contains(&multiplicity.trim()) {
        format!("Vector<{base}>")
    } else if multiplicity != "1"
        && !multiplicity.is_empty()
        && multiplicity.bytes().all(|b| b.is_ascii_digit())
    {
        format!("{base}[]")
    } else {
        base.to_string()
    };
    rename_type(&wrapped).to_string()
}

/// Maps source primitive and legacy names to Swift names.
#[must_use]
pub fn rename_type(name: &str) -> &str {
    match name {
        "String" | "string" => "String",
        "Integer" | "int" => "Int",
        "long" => "Int64",
        "short" => "Int8",
        "boolean" | "bool" => "Bool",
        "float" => "Float",
        "byte" => "Byte",
        "Object" | "id" => "AnyObject",
        other => other,
    }
}

/// Returns the literal a stub body returns for `type_name`.
///
/// `None` means the stub has no return statement.
#[must_use]
pub fn default_return(type_name: &str) -> Option<String> {
    let literal = match type_name {
        VOID => return None,
        "Bool" | "bool" | "boolean" | "BOOL" => "false",
        "Int" | "Int8" | "Int16" | "Int32" | "Int64" | "UInt" | "UInt8" | "UInt16" | "UInt32"
        | "UInt64" | "NSInteger" | "int" | "long" | "short" | "byte" | "Byte" => "0",
        "Float" | "Double" | "CGFloat" | "float" | "double" => "0.0",
        "char" | "Character" => "'0'",
        "String" | "string" | "NSString *" => "\"\"",
        other => return Some(format!("{other}.init()")),
    };
    Some(literal.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftgen_model::{ClassifierDef, Model};

    #[test]
    fn test_rename_table() {
        assert_eq!(rename_type("Integer"), "Int");
        assert_eq!(rename_type("boolean"), "Bool");
        assert_eq!(rename_type("bool"), "Bool");
        assert_eq!(rename_type("string"), "String");
        assert_eq!(rename_type("long"), "Int64");
        assert_eq!(rename_type("short"), "Int8");
        assert_eq!(rename_type("byte"), "Byte");
        assert_eq!(rename_type("float"), "Float");
        assert_eq!(rename_type("Object"), "AnyObject");
        assert_eq!(rename_type("id"), "AnyObject");
        assert_eq!(rename_type("MyType"), "MyType");
    }

    #[test]
    fn test_sequence_multiplicity() {
        assert_eq!(apply_multiplicity("Foo", "0..*"), "Vector<Foo>");
        assert_eq!(apply_multiplicity("Foo", "1..*"), "Vector<Foo>");
        assert_eq!(apply_multiplicity("Foo", " * "), "Vector<Foo>");
    }

    #[test]
    fn test_rename_applies_to_wrapped_type() {
        assert_eq!(apply_multiplicity("Integer", "0..*"), "Vector<Integer>");
        assert_eq!(apply_multiplicity("Integer", "4"), "Integer[]");
        assert_eq!(apply_multiplicity("Integer", "1"), "Int");
        assert_eq!(apply_multiplicity("boolean", ""), "Bool");
    }

    #[test]
    fn test_scalar_and_fixed_multiplicity() {
        assert_eq!(apply_multiplicity("Foo", "1"), "Foo");
        assert_eq!(apply_multiplicity("Foo", ""), "Foo");
        assert_eq!(apply_multiplicity("Foo", "4"), "Foo[]");
        assert_eq!(apply_multiplicity("Foo", "0..1"), "Foo");
        assert_eq!(apply_multiplicity("Foo", "many"), "Foo");
        assert_eq!(apply_multiplicity("Foo", " 4 "), "Foo");
    }

    #[test]
    fn test_default_return_literals() {
        assert_eq!(default_return("Bool").as_deref(), Some("false"));
        assert_eq!(default_return("boolean").as_deref(), Some("false"));
        assert_eq!(default_return("Int").as_deref(), Some("0"));
        assert_eq!(default_return("Int64").as_deref(), Some("0"));
        assert_eq!(default_return("Double").as_deref(), Some("0.0"));
        assert_eq!(default_return("char").as_deref(), Some("'0'"));
        assert_eq!(default_return("String").as_deref(), Some("\"\""));
        assert_eq!(default_return("void"), None);
        assert_eq!(default_return("Account").as_deref(), Some("Account.init()"));
        assert_eq!(
            default_return("Vector<Int>").as_deref(),
            Some("Vector<Int>.init()")
        );
    }

    #[test]
    fn test_mapper_resolves_references() {
        let mut model = Model::new("M");
        let root = model.root();
        let account = model.add_class(root, "Account", ClassifierDef::new());
        let mapper = TypeMapper::new(&model);

        let mut attr = AttributeDef::new(TypeRef::Element(account));
        attr.multiplicity = "0..*".to_string();
        assert_eq!(mapper.attribute(&attr), "Vector<Account>");

        let attr = AttributeDef::new(TypeRef::None);
        assert_eq!(mapper.attribute(&attr), "void");

        let param = Parameter::input("flag", TypeRef::named("boolean"));
        assert_eq!(mapper.parameter(&param), "Bool");

        let mut end = AssociationEnd::navigable(account, "accounts");
        end.multiplicity = "1..*".to_string();
        assert_eq!(mapper.association_end(&end), "Vector<Account>");
    }
}

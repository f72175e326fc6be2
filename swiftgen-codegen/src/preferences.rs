//! Preference registry for generation options.
//!
//! Hosts that keep settings in a key/value preference store register the
//! keys below and build a [`GenOptions`] from whatever the user has set.
//! Unset keys, and keys holding a value of the wrong kind, fall back to the
//! registered default.

use crate::options::GenOptions;
use std::collections::HashMap;

/// Value held by a preference.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceValue {
    /// Checkbox value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
}

impl PreferenceValue {
    /// Returns the boolean value, if this is a checkbox value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(_) => None,
        }
    }

    /// Returns the value as a non-negative count, if numeric.
    #[must_use]
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Number(n) if n.is_finite() && *n >= 0.0 => Some(*n as usize),
            _ => None,
        }
    }
}

/// Preference editor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    /// Section heading, holds no value.
    Section,
    /// Boolean checkbox.
    Check,
    /// Numeric field.
    Number,
}

/// A registered preference.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    /// Store key.
    pub key: &'static str,
    /// Display label.
    pub text: &'static str,
    /// Help text.
    pub description: &'static str,
    /// Editor kind.
    pub kind: PreferenceKind,
    /// Default value (`None` for sections).
    pub default: Option<PreferenceValue>,
}

/// Identifier under which the preferences are registered.
pub const PREFERENCE_ID: &str = "swift";

/// Key of the tab indentation preference.
pub const USE_TAB: &str = "swift.gen.useTab";
/// Key of the indentation width preference.
pub const INDENT_SPACES: &str = "swift.gen.indentSpaces";
/// Key of the documentation comment preference.
pub const JAVA_DOC: &str = "swift.gen.javaDoc";
/// Key of the default header preference.
pub const INCLUDE_HEADER: &str = "Cpp.gen.includeHeader";
/// Key of the vector preference.
pub const USE_VECTOR: &str = "Cpp.gen.useVector";
/// Key of the implementation file preference.
pub const GEN_IMPL: &str = "Cpp.gen.genImpl";
/// Key of the strict abstract preference.
pub const GEN_STRICT_ABSTRACT: &str = "Cpp.gen.genStrictAbstract";

/// Returns the generation preferences in display order.
#[must_use]
pub fn registry() -> Vec<Preference> {
    let check = |key, text, description, default| Preference {
        key,
        text,
        description,
        kind: PreferenceKind::Check,
        default: Some(PreferenceValue::Bool(default)),
    };

    vec![
        Preference {
            key: "swift.gen",
            text: "Swift Code Generation",
            description: "",
            kind: PreferenceKind::Section,
            default: None,
        },
        check(JAVA_DOC, "JavaDoc", "Generate JavaDoc comments.", true),
        check(
            USE_TAB,
            "Use Tab",
            "Use Tab for indentation instead of spaces.",
            false,
        ),
        Preference {
            key: INDENT_SPACES,
            text: "Indent Spaces",
            description: "Number of spaces for indentation.",
            kind: PreferenceKind::Number,
            default: Some(PreferenceValue::Number(4.0)),
        },
        check(
            INCLUDE_HEADER,
            "Include default header",
            "Include default header.",
            true,
        ),
        check(
            USE_VECTOR,
            "Use vector instead of *",
            "Use vector<> instead of pointer.",
            true,
        ),
        check(
            GEN_IMPL,
            "Generate implementation file",
            "Generate implementation file",
            true,
        ),
        check(
            GEN_STRICT_ABSTRACT,
            "Generate strict Abstract",
            "Generate strict Abstract",
            false,
        ),
    ]
}

/// Key/value preference storage.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<PreferenceValue>;
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, PreferenceValue>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value.
    pub fn set(&mut self, key: impl Into<String>, value: PreferenceValue) {
        self.values.insert(key.into(), value);
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values.get(key).cloned()
    }
}

impl GenOptions {
    /// Builds an option set from a preference store.
    #[must_use]
    pub fn from_preferences(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            store
                .get(key)
                .and_then(|v| v.as_bool())
                .unwrap_or(default)
        };

        Self {
            use_tab: flag(USE_TAB, defaults.use_tab),
            indent_spaces: store
                .get(INDENT_SPACES)
                .and_then(|v| v.as_count())
                .unwrap_or(defaults.indent_spaces),
            gen_impl: flag(GEN_IMPL, defaults.gen_impl),
            gen_strict_abstract: flag(GEN_STRICT_ABSTRACT, defaults.gen_strict_abstract),
            include_header: flag(INCLUDE_HEADER, defaults.include_header),
            use_vector: flag(USE_VECTOR, defaults.use_vector),
            java_doc: flag(JAVA_DOC, defaults.java_doc),
        }
    }
}

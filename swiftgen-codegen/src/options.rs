//! Generation options and per-run context.

use crate::error::CodegenError;
use crate::writer::doc_block;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Option set controlling Swift generation.
///
/// Keys use the host's camelCase preference names when (de)serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenOptions {
    /// Indent with a tab instead of spaces.
    pub use_tab: bool,
    /// Spaces per indentation level when not using tabs.
    pub indent_spaces: usize,
    /// Write class implementation files.
    pub gen_impl: bool,
    /// Mark abstract stub bodies as not implemented.
    pub gen_strict_abstract: bool,
    /// Reserved, no effect on output.
    pub include_header: bool,
    /// Reserved, no effect on output.
    pub use_vector: bool,
    /// Reserved, no effect on output.
    pub java_doc: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            use_tab: false,
            indent_spaces: 4,
            gen_impl: true,
            gen_strict_abstract: false,
            include_header: true,
            use_vector: true,
            java_doc: true,
        }
    }
}

impl GenOptions {
    /// Parses an option set from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `CodegenError::Options` if the JSON is malformed or a value
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, CodegenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns one level of indentation.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.use_tab {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_spaces)
        }
    }
}

/// Project identity printed in file headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    /// Project name.
    pub name: String,
    /// Project author.
    pub author: String,
    /// Project version.
    pub version: String,
}

impl ProjectInfo {
    /// Creates project info with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Immutable configuration shared by every step of one generation run.
#[derive(Debug)]
pub struct GenerationContext {
    /// Project identity.
    pub project: ProjectInfo,
    /// Generation options.
    pub options: GenOptions,
    /// Time stamped into class documentation blocks.
    pub timestamp: NaiveDateTime,
    copyright: OnceLock<String>,
}

impl GenerationContext {
    /// Creates a context stamped with the current local time.
    #[must_use]
    pub fn new(project: ProjectInfo, options: GenOptions) -> Self {
        Self::with_timestamp(project, options, Local::now().naive_local())
    }

    /// Creates a context with a fixed timestamp.
    #[must_use]
    pub fn with_timestamp(
        project: ProjectInfo,
        options: GenOptions,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            project,
            options,
            timestamp,
            copyright: OnceLock::new(),
        }
    }

    /// Returns the indentation unit.
    #[must_use]
    pub fn indent(&self) -> String {
        self.options.indent_unit()
    }

    /// Returns the project documentation block placed at the top of
    /// implementation files, or an empty string when no project field is set.
    pub fn copyright(&self) -> &str {
        self.copyright.get_or_init(|| {
            let mut doc = String::new();
            if !self.project.name.is_empty() {
                doc.push_str(&format!("\nProject {}", self.project.name));
            }
            if !self.project.author.is_empty() {
                doc.push_str(&format!("\n@author {}", self.project.author));
            }
            if !self.project.version.is_empty() {
                doc.push_str(&format!("\n@version {}", self.project.version));
            }
            doc_block(&doc, "")
        })
    }

    /// Returns the author named in class documentation blocks.
    #[must_use]
    pub fn class_author(&self) -> &str {
        if self.project.author.is_empty() {
            "uml"
        } else {
            &self.project.author
        }
    }

    /// Returns the timestamp formatted for class documentation blocks.
    #[must_use]
    pub fn version_stamp(&self) -> String {
        self.timestamp
            .format("%Y年%-m月%-d日 %-H:%-M:%-S")
            .to_string()
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new(ProjectInfo::default(), GenOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 11, 1)
            .and_then(|d| d.and_hms_opt(15, 51, 5))
            .expect("valid date")
    }

    #[test]
    fn test_default_options() {
        let options = GenOptions::default();
        assert!(!options.use_tab);
        assert_eq!(options.indent_spaces, 4);
        assert!(options.gen_impl);
        assert!(!options.gen_strict_abstract);
        assert_eq!(options.indent_unit(), "    ");
    }

    #[test]
    fn test_tab_indent() {
        let options = GenOptions {
            use_tab: true,
            ..GenOptions::default()
        };
        assert_eq!(options.indent_unit(), "\t");
    }

    #[test]
    fn test_from_json_partial() {
        let options = GenOptions::from_json(r#"{"indentSpaces": 2, "genStrictAbstract": true}"#)
            .expect("valid json");
        assert_eq!(options.indent_spaces, 2);
        assert!(options.gen_strict_abstract);
        assert!(options.gen_impl);
    }

    #[test]
    fn test_from_json_wrong_type() {
        let err = GenOptions::from_json(r#"{"useTab": "yes"}"#).unwrap_err();
        assert!(matches!(err, CodegenError::Options(_)));
    }

    #[test]
    fn test_copyright_block() {
        let project = ProjectInfo {
            name: "arch".to_string(),
            author: String::new(),
            version: "1.0".to_string(),
        };
        let ctx = GenerationContext::with_timestamp(project, GenOptions::default(), fixed_time());
        assert_eq!(ctx.copyright(), "/**\n * Project arch\n * @version 1.0\n */\n");
    }

    #[test]
    fn test_copyright_empty_project() {
        let ctx = GenerationContext::with_timestamp(
            ProjectInfo::default(),
            GenOptions::default(),
            fixed_time(),
        );
        assert_eq!(ctx.copyright(), "");
    }

    #[test]
    fn test_version_stamp_unpadded() {
        let ctx = GenerationContext::with_timestamp(
            ProjectInfo::named("arch"),
            GenOptions::default(),
            fixed_time(),
        );
        assert_eq!(ctx.version_stamp(), "2017年11月1日 15:51:5");
        assert_eq!(ctx.class_author(), "uml");
    }
}

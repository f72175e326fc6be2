//! Whole-file assembly.
//!
//! Interfaces and enumerations use the declaration skeleton: two leading
//! blank lines followed by the declaration. Classes use the implementation
//! skeleton: the project block, `import Foundation` and the class body.

use crate::options::GenerationContext;
use crate::swift::{ClassRenderer, EnumRenderer};
use crate::writer::CodeWriter;
use swiftgen_model::{ElementId, ModelRepository};

/// Assembles complete `.swift` file contents.
pub struct FileEmitter<'a, R: ModelRepository + ?Sized> {
    ctx: &'a GenerationContext,
    classes: ClassRenderer<'a, R>,
    enums: EnumRenderer<'a, R>,
}

impl<'a, R: ModelRepository + ?Sized> FileEmitter<'a, R> {
    /// Creates a new file emitter.
    #[must_use]
    pub fn new(model: &'a R, ctx: &'a GenerationContext) -> Self {
        Self {
            ctx,
            classes: ClassRenderer::new(model, ctx),
            enums: EnumRenderer::new(model, ctx),
        }
    }

    /// Returns the implementation file of a class.
    #[must_use]
    pub fn class_file(&self, id: ElementId) -> String {
        let mut writer = CodeWriter::new(self.ctx.indent());
        writer.write_line(self.ctx.copyright());
        writer.blank_line();
        writer.write_line("import Foundation\n");
        writer.blank_line();
        self.classes.write_body(&mut writer, id);
        writer.finish()
    }

    /// Returns the protocol file of an interface.
    #[must_use]
    pub fn interface_file(&self, id: ElementId) -> String {
        self.declaration_file(|writer| self.classes.write_header(writer, id, false))
    }

    /// Returns the enumeration file.
    #[must_use]
    pub fn enumeration_file(&self, id: ElementId) -> String {
        self.declaration_file(|writer| self.enums.write(writer, id))
    }

    fn declaration_file(&self, write: impl FnOnce(&mut CodeWriter)) -> String {
        let mut writer = CodeWriter::new(self.ctx.indent());
        writer.blank_line();
        writer.blank_line();
        write(&mut writer);
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{GenOptions, ProjectInfo};
    use chrono::NaiveDate;
    use swiftgen_model::{
        ClassifierDef, EnumerationDef, Model, OperationDef, Parameter, TypeRef, Visibility,
    };

    fn ctx(project: ProjectInfo) -> GenerationContext {
        let time = NaiveDate::from_ymd_opt(2017, 11, 1)
            .and_then(|d| d.and_hms_opt(15, 51, 35))
            .expect("valid date");
        GenerationContext::with_timestamp(project, GenOptions::default(), time)
    }

    #[test]
    fn test_class_file_layout() {
        let mut model = Model::new("M");
        let root = model.root();
        let id = model.add_class(root, "AccountStorage", ClassifierDef::new());
        let mut op = OperationDef::new();
        op.is_static = true;
        op.visibility = Visibility::Public;
        op.add_parameter(Parameter::returns(TypeRef::Element(id)));
        model.add_operation(id, "sharedInstance", op);

        let ctx = ctx(ProjectInfo::named("arch"));
        let out = FileEmitter::new(&model, &ctx).class_file(id);

        let expected = concat!(
            "/**\n * Project arch\n */\n",
            "\n\nimport Foundation\n\n\n",
            "/**\n",
            " * @brief  AccountStorage class\n",
            " * \n",
            " * @author: uml \n",
            " * \n",
            " * @version: 2017年11月1日 15:51:35\n",
            " */\n",
            "\n",
            "public class AccountStorage {\n",
            "\n",
            "    /**\n",
            "     * @brief sharedInstance\n",
            "     * @return AccountStorage\n",
            "     */\n",
            "    static func sharedInstance() -> AccountStorage {\n",
            "\n",
            "        return AccountStorage.init()\n",
            "    }\n",
            "\n",
            "}\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_class_file_without_project() {
        let mut model = Model::new("M");
        let root = model.root();
        let id = model.add_class(root, "A", ClassifierDef::new());

        let ctx = ctx(ProjectInfo::default());
        let out = FileEmitter::new(&model, &ctx).class_file(id);
        assert!(out.starts_with("\n\nimport Foundation\n\n\n/**\n"));
    }

    #[test]
    fn test_interface_file_layout() {
        let mut model = Model::new("M");
        let root = model.root();
        let id = model.add_interface(root, "LoginViewDelegate", ClassifierDef::new());
        let mut op = OperationDef::new();
        op.visibility = Visibility::Public;
        for name in ["control", "action", "event"] {
            op.add_parameter(Parameter::input(name, TypeRef::named("id")));
        }
        model.add_operation(id, "bindTarget", op);

        let ctx = ctx(ProjectInfo::default());
        let out = FileEmitter::new(&model, &ctx).interface_file(id);

        let expected = concat!(
            "\n\n",
            "/**\n",
            " * @brief  LoginViewDelegate class\n",
            " * \n",
            " * @author: uml \n",
            " * \n",
            " * @version: 2017年11月1日 15:51:35\n",
            " */\n",
            "\n",
            "protocol LoginViewDelegate {\n",
            "\n",
            "    /**\n",
            "     * @brief bindTarget\n",
            "     * @param control \n",
            "     * @param action \n",
            "     * @param event\n",
            "     */\n",
            "    func bindTarget(control: AnyObject, action: AnyObject, event: AnyObject)\n",
            "}\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_enumeration_file() {
        let mut model = Model::new("M");
        let root = model.root();
        let id = model.add_enumeration(root, "State", EnumerationDef::new(["Open", "Closed"]));

        let ctx = ctx(ProjectInfo::default());
        let out = FileEmitter::new(&model, &ctx).enumeration_file(id);
        assert_eq!(out, "\n\nenum State {\n    case Open\n    case Closed\n}");
    }
}

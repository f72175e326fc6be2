//! Enumeration rendering.

use crate::options::GenerationContext;
use crate::writer::CodeWriter;
use swiftgen_model::{ElementData, ElementId, ModelRepository};

/// Renderer for enumeration declarations.
pub struct EnumRenderer<'a, R: ModelRepository + ?Sized> {
    model: &'a R,
    ctx: &'a GenerationContext,
}

impl<'a, R: ModelRepository + ?Sized> EnumRenderer<'a, R> {
    /// Creates a new enumeration renderer.
    #[must_use]
    pub fn new(model: &'a R, ctx: &'a GenerationContext) -> Self {
        Self { model, ctx }
    }

    /// Writes `enum Name {`, one `case` per literal in declaration order,
    /// and the closing brace.
    pub fn write(&self, writer: &mut CodeWriter, id: ElementId) {
        let Some(elem) = self.model.element(id) else {
            return;
        };
        let ElementData::Enumeration(def) = &elem.data else {
            return;
        };

        let indent = self.ctx.indent();
        writer.write_line(&format!("enum {} {{", elem.name));
        for literal in &def.literals {
            writer.write_line(&format!("{indent}case {literal}"));
        }
        writer.write_line("}");
    }
}

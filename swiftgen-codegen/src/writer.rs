//! Line-oriented text assembly.

/// Accumulates generated lines and joins them with `\n`.
///
/// Lines are stored verbatim; a line may itself contain newlines, which is
/// how pre-rendered blocks (documentation, method stubs) are appended.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    indent_unit: String,
    level: usize,
}

impl CodeWriter {
    /// Creates an empty writer using `indent_unit` for each level.
    #[must_use]
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            indent_unit: indent_unit.into(),
            level: 0,
        }
    }

    /// Appends a line prefixed with the current indentation.
    pub fn write_line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", self.indent_unit.repeat(self.level), line));
        }
    }

    /// Appends an empty line.
    pub fn blank_line(&mut self) {
        self.lines.push(String::new());
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation level.
    pub fn outdent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Renders `text` as a `/** ... */` documentation block.
///
/// Every line of the trimmed text becomes a ` * ` line and every emitted line
/// is prefixed with `indent`. The block ends with a newline. Empty text
/// yields an empty string.
#[must_use]
pub fn doc_block(text: &str, indent: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = format!("{indent}/**\n");
    for line in text.trim().split('\n') {
        out.push_str(&format!("{indent} * {line}\n"));
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

//! Indentation-aware Python source buffer.

/// Accumulates Python source, one line at a time, at the current indent.
#[derive(Debug, Default)]
pub struct PythonWriter {
    output: String,
    indent: usize,
}

impl PythonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indent. Empty lines carry no indent.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str("    ");
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Write each line of a multi-line block at the current indent.
    pub fn lines(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write `header`, then `body` one level deeper.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.indent();
        body(self);
        self.dedent();
    }

    pub fn depth(&self) -> usize {
        self.indent
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }
}

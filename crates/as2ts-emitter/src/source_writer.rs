//! Indentation-aware output buffer.

const INDENT: &str = "    ";

/// Accumulates generated text. Indentation is written lazily, the first
/// time non-empty text lands on a fresh line, so blank lines stay blank.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    line_start: bool,
}

impl Default for SourceWriter {
    fn default() -> Self {
        SourceWriter::new()
    }
}

impl SourceWriter {
    pub fn new() -> Self {
        SourceWriter {
            output: String::new(),
            indent_level: 0,
            line_start: true,
        }
    }

    /// Write text. Embedded newlines start new, indented lines.
    pub fn write(&mut self, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.write_segment(first);
        }
        for line in lines {
            self.write_line();
            self.write_segment(line);
        }
    }

    fn write_segment(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }
        self.flush_indent();
        self.output.push_str(segment);
    }

    fn flush_indent(&mut self) {
        if self.line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
            self.line_start = false;
        }
    }

    /// Append text exactly as given, e.g. text previously taken with
    /// [`SourceWriter::split_off`] that already carries its indentation.
    pub fn write_raw(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.output.push_str(text);
        self.line_start = text.ends_with('\n');
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.line_start = true;
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    /// A position to [`SourceWriter::split_off`] at. Pending indentation is
    /// written first, so the text taken back starts at the content and can
    /// be inspected or rewritten without leading whitespace.
    pub fn mark(&mut self) -> usize {
        self.flush_indent();
        self.output.len()
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Drop everything written after `len`, e.g. a separator that turned
    /// out to precede nothing.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.output.len() {
            return;
        }
        self.output.truncate(len);
        self.line_start = self.output.is_empty() || self.output.ends_with('\n');
    }

    /// Remove and return everything written after `len`.
    pub fn split_off(&mut self, len: usize) -> String {
        if len >= self.output.len() {
            return String::new();
        }
        let tail = self.output.split_off(len);
        self.line_start = self.output.is_empty() || self.output.ends_with('\n');
        tail
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

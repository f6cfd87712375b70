use colored::Colorize;

use as2ts_common::{Diagnostic, DiagnosticCategory};

/// Renders diagnostics as `file(line:col) - error AS9001: message`.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = if diagnostic.file.is_empty() {
            "<unknown>".to_string()
        } else {
            format!("{}({}:{})", diagnostic.file, diagnostic.line, diagnostic.column)
        };
        let location = if self.color {
            location.cyan().to_string()
        } else {
            location
        };
        format!(
            "{} - {} {}: {}",
            location,
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        )
    }

    /// `Found 2 errors and 1 warning.`
    pub fn summary(&self, diagnostics: &[Diagnostic]) -> String {
        let count = |category: DiagnosticCategory| {
            diagnostics
                .iter()
                .filter(|diagnostic| diagnostic.category == category)
                .count()
        };
        let plural = |n: usize, word: &str| {
            if n == 1 {
                format!("{n} {word}")
            } else {
                format!("{n} {word}s")
            }
        };
        let errors = count(DiagnosticCategory::Error);
        let warnings = count(DiagnosticCategory::Warning);
        format!(
            "Found {} and {}.",
            plural(errors, "error"),
            plural(warnings, "warning")
        )
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("AS{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

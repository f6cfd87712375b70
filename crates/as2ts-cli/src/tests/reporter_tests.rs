use as2ts_common::{Diagnostic, DiagnosticKind};

use super::reporter::Reporter;

fn unsupported(file: &str) -> Diagnostic {
    Diagnostic::new(DiagnosticKind::UnsupportedConstruct, file, 3, 4, &["X"])
}

fn priority_warning() -> Diagnostic {
    Diagnostic::new(DiagnosticKind::UnknownOperatorPriority, "pkg/B.as", 1, 0, &["<=>"])
}

#[test]
fn formats_without_color() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_diagnostic(&unsupported("pkg/A.as")),
        "pkg/A.as(3:4) - error AS9001: Not support X yet!"
    );
}

#[test]
fn unknown_file_is_marked() {
    let reporter = Reporter::new(false);
    let text = reporter.format_diagnostic(&unsupported(""));
    assert!(text.starts_with("<unknown> - error AS9001"), "{text}");
}

#[test]
fn renders_one_line_per_diagnostic() {
    let reporter = Reporter::new(false);
    let text = reporter.render(&[unsupported("pkg/A.as"), priority_warning()]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("pkg/B.as(1:0) - warning AS9003"), "{}", lines[1]);
    assert_eq!(reporter.render(&[]), "");
}

#[test]
fn summary_pluralizes() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.summary(&[]), "Found 0 errors and 0 warnings.");
    assert_eq!(
        reporter.summary(&[unsupported("a.as"), priority_warning()]),
        "Found 1 error and 1 warning."
    );
    assert_eq!(
        reporter.summary(&[unsupported("a.as"), unsupported("b.as")]),
        "Found 2 errors and 0 warnings."
    );
}

#[test]
fn colored_output_keeps_the_message() {
    colored::control::set_override(true);
    let text = Reporter::new(true).format_diagnostic(&unsupported("pkg/A.as"));
    assert!(text.contains("Not support X yet!"));
    assert!(text.contains("\u{1b}["));
}

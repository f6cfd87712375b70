use crate::source_writer::SourceWriter;

#[test]
fn test_indentation_is_written_lazily() {
    let mut writer = SourceWriter::new();
    writer.write("{");
    writer.increase_indent();
    writer.write_line();
    writer.write("a;");
    writer.decrease_indent();
    writer.write_line();
    writer.write("}");
    assert_eq!(writer.as_str(), "{\n    a;\n}");
}

#[test]
fn test_blank_lines_stay_blank() {
    let mut writer = SourceWriter::new();
    writer.increase_indent();
    writer.write_line();
    writer.write_line();
    writer.write("x");
    assert_eq!(writer.as_str(), "\n\n    x");
}

#[test]
fn test_embedded_newlines_are_indented() {
    let mut writer = SourceWriter::new();
    writer.increase_indent();
    writer.write("a\nb");
    assert_eq!(writer.as_str(), "    a\n    b");
}

#[test]
fn test_truncate_restores_line_start() {
    let mut writer = SourceWriter::new();
    writer.write("a");
    let mark = writer.len();
    writer.increase_indent();
    writer.write_line();
    writer.truncate(mark);
    writer.write("b");
    assert_eq!(writer.as_str(), "ab");

    writer.write_line();
    let mark = writer.len();
    writer.write("c");
    writer.truncate(mark);
    writer.write("d");
    assert_eq!(writer.as_str(), "ab\n    d");
}

#[test]
fn test_split_off_and_write_raw_round_trip() {
    let mut writer = SourceWriter::new();
    writer.write("let x: ");
    let mark = writer.len();
    writer.write("Array");
    let tail = writer.split_off(mark);
    assert_eq!(tail, "Array");
    assert_eq!(writer.as_str(), "let x: ");
    writer.write_raw("any[]");
    assert_eq!(writer.into_string(), "let x: any[]");
}

#[test]
fn test_mark_flushes_pending_indent() {
    let mut writer = SourceWriter::new();
    writer.increase_indent();
    writer.write("{");
    writer.write_line();
    let mark = writer.mark();
    writer.write("Bar");
    assert_eq!(writer.split_off(mark), "Bar");
    writer.write_raw("new Bar()");
    assert_eq!(writer.into_string(), "    {\n    new Bar()");
}

#[test]
fn test_decrease_indent_saturates() {
    let mut writer = SourceWriter::default();
    writer.decrease_indent();
    assert_eq!(writer.indent_level(), 0);
    assert!(writer.is_empty());
}

use crate::span::{Position, Span};

/// Renders a diagnostic with the offending source line and a caret underline.
///
/// The output has the shape:
///
/// ```text
/// SyntaxError: Expected ')', found ';'
/// File demo.ss, line 2:
///
///     var x = (1 + 2; 3
///                   ^
/// ```
///
/// Spans that stretch over several lines underline only their first
/// character; everything a reader needs is on that line anyway.
pub(crate) fn render(kind: &str,
                     message: &str,
                     span: Span,
                     file_name: &str,
                     source: &str)
                     -> String {
    let line_text = source_line(source, span.start);
    let padding = " ".repeat(span.start.column.saturating_sub(1));
    let width = if span.start.line == span.end.line && span.end.column > span.start.column {
        span.end.column - span.start.column
    } else {
        1
    };

    format!("{kind}: {message}\nFile {file_name}, line {}:\n\n    {line_text}\n    {padding}{}\n",
            span.start.line,
            "^".repeat(width))
}

/// Extracts the full source line containing `position`.
fn source_line(source: &str, position: Position) -> &str {
    let offset = position.offset.min(source.len());
    let start = source[..offset].rfind('\n').map_or(0, |index| index + 1);
    let end = source[offset..].find('\n').map_or(source.len(), |index| offset + index);

    &source[start..end]
}

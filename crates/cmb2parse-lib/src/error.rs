//! Error types and source-located rendering.

use std::fmt::Write as _;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::compile::CompileError;
use crate::meta::description::DescriptionError;

/// 1-based line/column of a byte offset.
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|p| p + 1)
        .unwrap_or(0);
    (line, offset - line_start + 1)
}

fn caret_excerpt(title: &str, source: &str, path: &str, offset: usize) -> String {
    let start = offset.min(source.len());
    let end = (start + 1).min(source.len()).max(start);
    let range = if start == end && start > 0 {
        start - 1..start
    } else {
        start..end
    };
    let renderer = Renderer::plain();
    let report = Level::ERROR.primary_title(title).element(
        Snippet::source(source)
            .line_start(1)
            .path(path)
            .annotation(
                AnnotationKind::Primary
                    .span(range)
                    .label("parsing stopped here"),
            ),
    );
    format!("{}", renderer.render(&[report]))
}

/// The grammar source itself failed to parse.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to parse grammar")]
pub struct MetaError {
    /// Diagnostics accumulated by the parse context.
    pub log: Vec<String>,
    /// Byte offset the parse stopped at.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl MetaError {
    pub(crate) fn at(log: Vec<String>, offset: usize, source: &str) -> Self {
        let (line, column) = line_col(source, offset);
        Self {
            log,
            offset,
            line,
            column,
        }
    }

    /// Full diagnostic block: accumulated log, location and caret excerpt.
    pub fn render(&self, source: &str, path: &str) -> String {
        render_located(&self.log, self.offset, self.line, self.column, source, path, "failed to parse grammar")
    }
}

/// An input did not parse under the compiled grammar.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to parse input")]
pub struct ParseError {
    pub log: Vec<String>,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub(crate) fn at(log: Vec<String>, offset: usize, source: &str) -> Self {
        let (line, column) = line_col(source, offset);
        Self {
            log,
            offset,
            line,
            column,
        }
    }

    pub fn render(&self, source: &str, path: &str) -> String {
        render_located(&self.log, self.offset, self.line, self.column, source, path, "failed to parse input")
    }
}

fn render_located(
    log: &[String],
    offset: usize,
    line: usize,
    column: usize,
    source: &str,
    path: &str,
    title: &str,
) -> String {
    let mut out = String::new();
    for message in log {
        let _ = writeln!(out, "{message}");
    }
    let _ = writeln!(out, "{path}:{line}:{column}");
    out.push_str(&caret_excerpt(title, source, path, offset));
    out.push('\n');
    out
}

/// Any failure on the way from grammar source to compiled grammar.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error(transparent)]
    Meta(#[from] MetaError),
    #[error(transparent)]
    Description(#[from] DescriptionError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_is_one_based() {
        assert_eq!(line_col("abc", 0), (1, 1));
        assert_eq!(line_col("abc", 2), (1, 3));
        assert_eq!(line_col("a\nbc", 2), (2, 1));
        assert_eq!(line_col("a\nbc", 4), (2, 3));
        assert_eq!(line_col("", 9), (1, 1));
    }
}

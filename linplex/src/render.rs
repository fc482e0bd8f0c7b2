//! Plain-text and HTML output
//!
//! Everything here reads cells through the core's public accessors; the
//! core crate itself has no notion of presentation.

use crate::core::{Literal, Matrix, NdArray};
use log::debug;
use std::fmt::Write;

/// CSS fragments used by [`styled_html_table`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    /// Style of the `<table>` element
    pub table: String,
    /// Style of every `<td>`
    pub td: String,
    /// Style of rows 0, 2, 4, ...
    pub even_row: String,
    /// Style of rows 1, 3, 5, ...
    pub odd_row: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            table: "border-collapse: collapse;".to_string(),
            td: "border: 1px solid black; padding: 5px;".to_string(),
            even_row: "background-color: #f2f2f2;".to_string(),
            odd_row: "background-color: #ffffff;".to_string(),
        }
    }
}

impl TableStyle {
    /// Key names accepted by [`TableStyle::with_overrides`]
    pub const KEYS: [&'static str; 4] = ["table", "td", "even-row", "odd-row"];

    /// Start from the defaults and replace the entries named in `overrides`.
    ///
    /// Keys other than [`KEYS`](Self::KEYS) are ignored.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut style = Self::default();
        for (key, value) in overrides {
            match key.as_ref() {
                "table" => style.table = value.into(),
                "td" => style.td = value.into(),
                "even-row" => style.even_row = value.into(),
                "odd-row" => style.odd_row = value.into(),
                other => debug!("table style: ignoring unknown key {other:?}"),
            }
        }
        style
    }

    fn row(&self, index: usize) -> &str {
        if index % 2 == 0 {
            &self.even_row
        } else {
            &self.odd_row
        }
    }
}

/// Every cell on its own line, indented two spaces per nesting level.
///
/// A cell of a rank-`r` array sits at depth `r`, so the cells of a matrix
/// are indented by four spaces.
pub fn text_dump(array: &NdArray) -> String {
    let mut out = String::new();
    dump_node(&array.to_nested(), 0, &mut out);
    out
}

fn dump_node(node: &Literal, depth: usize, out: &mut String) {
    match node {
        Literal::List(items) => {
            for item in items {
                dump_node(item, depth + 1, out);
            }
        }
        leaf => {
            if let Some(value) = leaf.to_scalar() {
                let _ = writeln!(out, "{}{value}", "  ".repeat(depth));
            }
        }
    }
}

/// Bare `<table>` with one `<tr>` per row
pub fn html_table(matrix: &Matrix) -> String {
    let mut html = String::from("<table>");
    for i in 0..matrix.rows() {
        html.push_str("<tr>");
        for j in 0..matrix.cols() {
            let _ = write!(html, "<td>{}</td>", matrix[(i, j)]);
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Inline-styled `<table>` with alternating row backgrounds
pub fn styled_html_table(matrix: &Matrix, style: &TableStyle) -> String {
    let mut html = format!("<table style='{}'>", style.table);
    for i in 0..matrix.rows() {
        let _ = write!(html, "<tr style='{}'>", style.row(i));
        for j in 0..matrix.cols() {
            let _ = write!(html, "<td style='{}'>{}</td>", style.td, matrix[(i, j)]);
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Scalar, Shape};
    use std::collections::HashMap;

    #[test]
    fn test_text_dump_indents_by_depth() {
        let mut array = NdArray::zeros(Shape::new(vec![2]).unwrap());
        array.set(&[1], Scalar::complex(1.0, -2.0)).unwrap();
        assert_eq!(text_dump(&array), "  0\n  1-2i\n");

        let matrix = Matrix::from_rows([[1, 2], [3, 4]]).unwrap();
        assert_eq!(text_dump(matrix.storage()), "    1\n    2\n    3\n    4\n");
    }

    #[test]
    fn test_html_table() {
        let matrix = Matrix::from_rows([[1, 2], [3, 4]]).unwrap();
        assert_eq!(
            html_table(&matrix),
            "<table><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></table>"
        );
    }

    #[test]
    fn test_styled_rows_alternate() {
        let matrix = Matrix::from_rows([[1], [2]]).unwrap();
        let html = styled_html_table(&matrix, &TableStyle::default());
        assert!(html.starts_with("<table style='border-collapse: collapse;'>"));
        assert!(html.contains("<tr style='background-color: #f2f2f2;'><td style='border: 1px solid black; padding: 5px;'>1</td></tr>"));
        assert!(html.contains("<tr style='background-color: #ffffff;'><td style='border: 1px solid black; padding: 5px;'>2</td></tr>"));
    }

    #[test]
    fn test_overrides_only_known_keys() {
        let overrides = HashMap::from([("td", "padding: 1px;"), ("caption", "color: red;")]);
        let style = TableStyle::with_overrides(overrides);
        assert_eq!(style.td, "padding: 1px;");
        assert_eq!(style.table, TableStyle::default().table);
    }
}

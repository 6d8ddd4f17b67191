//! Table rendering utilities for CLI outputs.
//! Cells may contain ANSI color sequences; padding is computed on the
//! visible width so colored columns stay aligned.

use unicode_width::UnicodeWidthStr;

fn visible_width(s: &str) -> usize {
    // strip ESC [ ... letter sequences before measuring
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    UnicodeWidthStr::width(out.as_str())
}

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn pad(cell: &str, width: usize) -> String {
        let pad = width.saturating_sub(visible_width(cell));
        format!("{}{}", cell, " ".repeat(pad))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header widths stretch to fit the widest cell in each column
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|r| visible_width(&r[i]))
                    .chain(std::iter::once(col.width))
                    .chain(std::iter::once(visible_width(&col.header)))
                    .max()
                    .unwrap_or(col.width)
            })
            .collect();

        for (i, col) in self.columns.iter().enumerate() {
            out.push_str(&Self::pad(&col.header, widths[i]));
            out.push(' ');
        }
        out.push('\n');

        for (i, _) in self.columns.iter().enumerate() {
            out.push_str(&"-".repeat(widths[i]));
            out.push(' ');
        }
        out.push('\n');

        for row in &self.rows {
            for (i, _) in self.columns.iter().enumerate() {
                out.push_str(&Self::pad(&row[i], widths[i]));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

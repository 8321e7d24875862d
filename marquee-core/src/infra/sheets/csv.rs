//! Minimal CSV reader for the Google Sheets `gviz` export.
//!
//! The export is one record per line with `"`-quoted cells and `""` escapes.
//! Blank lines are skipped.

use std::collections::HashMap;

/// Splits one CSV line into cells, honouring quotes and `""` escapes.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(ch),
        }
    }
    cells.push(cell);
    cells
}

fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Parses a CSV document into header-keyed rows.
///
/// Headers are trimmed and lowercased. Missing trailing cells read as "".
/// A document with fewer than two non-blank lines has no rows.
pub fn parse_rows(text: &str) -> Vec<HashMap<String, String>> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((header_line, body)) = lines.split_first() else {
        return Vec::new();
    };
    if body.is_empty() {
        return Vec::new();
    }

    let headers: Vec<String> = parse_line(header_line)
        .iter()
        .map(|h| clean_cell(h).to_lowercase())
        .collect();

    body.iter()
        .map(|line| {
            let values = parse_line(line);
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values
                        .get(i)
                        .map(|v| clean_cell(v))
                        .unwrap_or_default();
                    (header.clone(), value)
                })
                .collect()
        })
        .collect()
}

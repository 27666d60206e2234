//! Bordered verse boxes
//!
//! ```text
//! ╔════════════════════════════════════════╗
//! ║               John 3:16                ║
//! ║░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░║
//! ║ For God so loved the world, that he    ║
//! ║ gave his only begotten Son             ║
//! ╚════════════════════════════════════════╝
//! ```

use std::fmt;

use comfy_table::{Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width};

/// Inner width of every box (text plus one column of padding per side), in terminal columns.
pub const BOX_WIDTH: u16 = 40;

/// Border characters in `comfy_table::TableComponent` order; spaces are omitted parts.
///
/// `║` sides, `═` top and bottom, `░` divider below the header.
pub const VERSE_BOX_PRESET: &str = "║║══║░ ║       ╔╗╚╝";

const SIDE: char = '║';
const RESET: &str = "\x1b[0m";

/// A verse rendered as header (reference) and body (text) inside a border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseBox {
    header: String,
    body: String,
}

impl VerseBox {
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(VERSE_BOX_PRESET)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(BOX_WIDTH + 2)
            .set_header(vec![
                Cell::new(&self.header).set_alignment(CellAlignment::Center)
            ])
            .add_row(vec![Cell::new(&self.body)]);
        if let Some(column) = table.column_mut(0) {
            column.set_constraint(ColumnConstraint::Absolute(Width::Fixed(BOX_WIDTH)));
        }
        table
    }
}

impl fmt::Display for VerseBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&balance_styles(&self.table().to_string()))
    }
}

/// Keep escape sequences inside the borders.
///
/// A style still open at the end of a row is reset before the right border and
/// reopened after the left border of the next row. Every row ends with a newline.
fn balance_styles(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len() + 16);
    let mut carried: Option<&str> = None;

    for line in rendered.lines() {
        let inner = line
            .strip_prefix(SIDE)
            .and_then(|rest| rest.strip_suffix(SIDE));
        match inner {
            Some(inner) => {
                out.push(SIDE);
                if let Some(style) = carried {
                    out.push_str(style);
                }
                out.push_str(inner);
                carried = open_style(inner, carried);
                if carried.is_some() {
                    out.push_str(RESET);
                }
                out.push(SIDE);
            }
            None => {
                carried = None;
                out.push_str(line);
            }
        }
        out.push('\n');
    }
    out
}

/// Last style left active in `text`, starting from `active`.
fn open_style<'a>(text: &'a str, mut active: Option<&'a str>) -> Option<&'a str> {
    let mut rest = text;
    while let Some(start) = rest.find("\x1b[") {
        let Some(len) = rest[start..].find('m') else {
            break;
        };
        let seq = &rest[start..=start + len];
        let params = &seq[2..seq.len() - 1];
        active = if params.is_empty() || params == "0" {
            None
        } else {
            Some(seq)
        };
        rest = &rest[start + len + 1..];
    }
    active
}

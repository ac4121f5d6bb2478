//! Plain text renderer implementation.

use crate::model::{Block, Document, Paragraph, Table};

use super::options::{BlockOrder, RenderOptions};

/// Line emitted before a table's rows.
pub const TABLE_START: &str = "[TABLE]";

/// Line emitted after a table's rows.
pub const TABLE_END: &str = "[/TABLE]";

/// Separator between the cells of a table row.
pub const CELL_DELIMITER: &str = " | ";

/// Convert a Document to plain text.
///
/// Paragraphs are trimmed and dropped when blank. Table rows are dropped when
/// every trimmed cell is empty, but the table markers are always written.
pub fn to_text(doc: &Document, options: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    match options.block_order {
        BlockOrder::Grouped => {
            for para in doc.paragraphs() {
                push_paragraph(&mut lines, para);
            }
            for table in doc.tables() {
                push_table(&mut lines, table);
            }
        }
        BlockOrder::Document => {
            for block in doc.blocks() {
                match block {
                    Block::Paragraph(para) => push_paragraph(&mut lines, para),
                    Block::Table(table) => push_table(&mut lines, table),
                }
            }
        }
    }

    lines.join("\n")
}

fn push_paragraph(lines: &mut Vec<String>, para: &Paragraph) {
    let text = para.plain_text().trim();
    if !text.is_empty() {
        lines.push(text.to_string());
    }
}

fn push_table(lines: &mut Vec<String>, table: &Table) {
    lines.push(TABLE_START.to_string());

    for row in table.grid_rows() {
        let cells: Vec<&str> = row.iter().map(|cell| cell.trim()).collect();
        if cells.iter().any(|cell| !cell.is_empty()) {
            lines.push(cells.join(CELL_DELIMITER));
        }
    }

    lines.push(TABLE_END.to_string());
}

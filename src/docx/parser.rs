//! DOCX parser implementation.

use crate::container::OoxmlContainer;
use crate::detect::ensure_word_document;
use crate::error::{Error, Result};
use crate::model::{Block, Cell, Document, Paragraph, Row, Table, VerticalMerge};
use quick_xml::events::{BytesStart, Event};

/// Parser for DOCX (Word) documents.
pub struct DocxParser {
    container: OoxmlContainer,
    main_part: String,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    fn from_container(container: OoxmlContainer) -> Result<Self> {
        let main_part = container.main_document_part()?;
        ensure_word_document(&container, &main_part)?;
        Ok(Self {
            container,
            main_part,
        })
    }

    /// Parse the main document part into a Document model.
    pub fn parse(&self) -> Result<Document> {
        let xml = self.container.read_xml(&self.main_part)?;
        let doc = parse_document_xml(&xml)?;
        log::debug!(
            "Parsed {}: {} paragraphs, {} tables",
            self.main_part,
            doc.paragraphs().count(),
            doc.tables().count()
        );
        Ok(doc)
    }

    /// Name of the main document part inside the package.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }
}

/// Element kinds the body walk cares about. Anything else is `Ignored`,
/// and so is everything beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Document,
    Body,
    Paragraph,
    Hyperlink,
    Run,
    Text,
    Table,
    Row,
    Cell,
    CellProps,
    Ignored,
}

#[derive(Default)]
struct BodyBuilder {
    doc: Document,
    stack: Vec<Frame>,
    saw_body: bool,
    paragraph: Option<String>,
    table: Option<Table>,
    row: Option<Row>,
    cell: Option<Cell>,
}

impl BodyBuilder {
    fn in_text(&self) -> bool {
        self.stack.last() == Some(&Frame::Text)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(p) = self.paragraph.as_mut() {
            p.push_str(text);
        }
    }

    fn open(&mut self, e: &BytesStart) {
        let parent = self.stack.last().copied();
        let local = e.local_name();

        let frame = match (parent, local.as_ref()) {
            (None, b"document") => Frame::Document,
            (Some(Frame::Document), b"body") => {
                self.saw_body = true;
                Frame::Body
            }
            (Some(Frame::Body), b"p") | (Some(Frame::Cell), b"p") => {
                self.paragraph = Some(String::new());
                Frame::Paragraph
            }
            (Some(Frame::Body), b"tbl") => {
                self.table = Some(Table::new());
                Frame::Table
            }
            (Some(Frame::Table), b"tr") => {
                self.row = Some(Row::new());
                Frame::Row
            }
            (Some(Frame::Row), b"tc") => {
                self.cell = Some(Cell::new());
                Frame::Cell
            }
            (Some(Frame::Cell), b"tcPr") => Frame::CellProps,
            (Some(Frame::CellProps), b"gridSpan") => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.grid_span = attr_value(e, b"val")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(1);
                }
                Frame::Ignored
            }
            (Some(Frame::CellProps), b"vMerge") => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.v_merge = match attr_value(e, b"val").as_deref() {
                        Some("restart") => VerticalMerge::Restart,
                        _ => VerticalMerge::Continue,
                    };
                }
                Frame::Ignored
            }
            (Some(Frame::Paragraph), b"hyperlink") => Frame::Hyperlink,
            (Some(Frame::Paragraph), b"r") | (Some(Frame::Hyperlink), b"r") => Frame::Run,
            (Some(Frame::Run), b"t") => Frame::Text,
            (Some(Frame::Run), b"tab") | (Some(Frame::Run), b"ptab") => {
                self.push_text("\t");
                Frame::Ignored
            }
            (Some(Frame::Run), b"br") => {
                // Page and column breaks carry no text
                match attr_value(e, b"type").as_deref() {
                    None | Some("textWrapping") => self.push_text("\n"),
                    _ => {}
                }
                Frame::Ignored
            }
            (Some(Frame::Run), b"cr") => {
                self.push_text("\n");
                Frame::Ignored
            }
            (Some(Frame::Run), b"noBreakHyphen") => {
                self.push_text("-");
                Frame::Ignored
            }
            _ => Frame::Ignored,
        };

        self.stack.push(frame);
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Paragraph => {
                let para = Paragraph::with_text(self.paragraph.take().unwrap_or_default());
                match self.stack.last() {
                    Some(Frame::Body) => self.doc.add_block(Block::Paragraph(para)),
                    Some(Frame::Cell) => {
                        if let Some(cell) = self.cell.as_mut() {
                            cell.content.push(para);
                        }
                    }
                    _ => {}
                }
            }
            Frame::Cell => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.cells.push(cell);
                }
            }
            Frame::Row => {
                if let (Some(row), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.rows.push(row);
                }
            }
            Frame::Table => {
                if let Some(table) = self.table.take() {
                    self.doc.add_block(Block::Table(table));
                }
            }
            _ => {}
        }
    }
}

/// Parse `word/document.xml` content into a Document.
///
/// Only direct children of `w:body` become blocks. Content controls,
/// tables nested inside cells and text outside runs are skipped.
pub(crate) fn parse_document_xml(xml: &str) -> Result<Document> {
    let mut reader = quick_xml::Reader::from_str(xml);
    // Whitespace inside w:t is significant
    reader.config_mut().trim_text(false);

    let mut builder = BodyBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => builder.open(e),
            Ok(Event::Empty(ref e)) => {
                builder.open(e);
                builder.close();
            }
            Ok(Event::Text(ref e)) if builder.in_text() => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::XmlParse(err.to_string()))?;
                builder.push_text(&text);
            }
            Ok(Event::CData(ref e)) if builder.in_text() => {
                let text = String::from_utf8_lossy(e).into_owned();
                builder.push_text(&text);
            }
            Ok(Event::End(_)) => builder.close(),
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !builder.stack.is_empty() {
        return Err(Error::XmlParse("unexpected end of document part".to_string()));
    }
    if !builder.saw_body {
        return Err(Error::XmlParse("document part has no body".to_string()));
    }

    Ok(builder.doc)
}

/// Value of the attribute whose local name is `key` (namespace prefix ignored).
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

//! ZIP container abstraction for OOXML packages.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;

/// Relationship type suffix of the package's main document part.
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// One entry of the archive's central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position in the central directory
    pub index: usize,
    /// Full entry name (e.g., "word/media/image1.png")
    pub name: String,
    /// Whether the entry is a directory marker
    pub is_dir: bool,
    /// Last path component of the entry name, with `/` and `\` both treated
    /// as separators. `None` when the name would leave the directory it is
    /// extracted into.
    pub file_name: Option<String>,
}

/// A relationship entry from a .rels part.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or absolute)
    pub target: String,
}

/// OOXML container over a ZIP archive held in memory.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open a container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxtract::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("document.docx")?;
    /// # Ok::<(), docxtract::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let mut reader = BufReader::new(File::open(path)?);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// List every entry in central-directory order.
    pub fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        let mut archive = self.archive.borrow_mut();
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive.by_index(index)?;
            let file_name = file.enclosed_name().as_deref().and_then(enclosed_file_name);
            entries.push(ArchiveEntry {
                index,
                name: file.name().to_string(),
                is_dir: file.is_dir(),
                file_name,
            });
        }
        Ok(entries)
    }

    /// List entries whose name starts with `prefix`, in archive order.
    pub fn entries_with_prefix(&self, prefix: &str) -> Result<Vec<ArchiveEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.name.starts_with(prefix))
            .collect())
    }

    /// Check if an entry exists in the archive.
    pub fn exists(&self, name: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == name)
    }

    /// Stream the raw (decompressed) bytes of an entry into `writer`.
    pub fn copy_entry<W: Write>(&self, index: usize, writer: &mut W) -> Result<u64> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive.by_index(index)?;
        let copied = std::io::copy(&mut file, writer)?;
        Ok(copied)
    }

    /// Read an XML part as a string, decoding UTF-8 or UTF-16 content.
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(name)
            .map_err(|_| Error::MissingComponent(name.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)
    }

    /// Read package-level relationships (`_rels/.rels`).
    ///
    /// A missing or empty relationships part yields an empty list.
    pub fn read_package_relationships(&self) -> Result<Vec<Relationship>> {
        let content = match self.read_xml("_rels/.rels") {
            Ok(c) => c,
            Err(Error::MissingComponent(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        parse_relationships(&content)
    }

    /// Resolve the main document part through the officeDocument relationship.
    ///
    /// Falls back to `word/document.xml` when the package carries no such
    /// relationship.
    pub fn main_document_part(&self) -> Result<String> {
        let rels = self.read_package_relationships()?;
        let part = rels
            .iter()
            .find(|r| r.rel_type.ends_with(OFFICE_DOCUMENT_REL))
            .map(|r| r.target.trim_start_matches('/').to_string())
            .unwrap_or_else(|| "word/document.xml".to_string());
        log::debug!("Main document part: {}", part);
        Ok(part)
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("entries", &self.archive.borrow().len())
            .finish()
    }
}

fn enclosed_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    // Windows separators are plain characters on other hosts
    let name = name.rsplit('\\').next().unwrap_or(name);
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    if xml.trim().is_empty() {
        return Ok(rels);
    }

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(ref e)) | Ok(quick_xml::events::Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        _ => {}
                    }
                }
                if !rel.id.is_empty() {
                    rels.push(rel);
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Decode XML bytes handling UTF-8 (with or without BOM) and UTF-16 LE/BE.
///
/// Decoded UTF-16 content has its XML declaration rewritten to UTF-8 so the
/// XML reader does not try to re-decode the already converted text.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    let invalid = |e: std::string::FromUtf8Error| {
        Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    };

    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).map_err(invalid),
        [0xFF, 0xFE, rest @ ..] => Ok(utf8_declaration(&decode_utf16(rest, u16::from_le_bytes)?)),
        [0xFE, 0xFF, rest @ ..] => Ok(utf8_declaration(&decode_utf16(rest, u16::from_be_bytes)?)),
        // No BOM: ASCII markup in UTF-16 leaves a zero in every other byte
        [lo, 0, _, 0, ..] if *lo != 0 => {
            Ok(utf8_declaration(&decode_utf16(bytes, u16::from_le_bytes)?))
        }
        [0, hi, 0, _, ..] if *hi != 0 => {
            Ok(utf8_declaration(&decode_utf16(bytes, u16::from_be_bytes)?))
        }
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn utf8_declaration(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    let Some(end) = content.find("?>") else {
        return content.to_string();
    };

    let decl = content[..end + 2]
        .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='UTF-16'", "encoding='UTF-8'")
        .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='utf-16'", "encoding='UTF-8'");
    format!("{}{}", decl, &content[end + 2..])
}

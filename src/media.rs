//! Embedded media extraction.
//!
//! Word stores pictures and other embedded media under `word/media/`. The
//! extractor copies every entry below that prefix verbatim into an output
//! directory, named after the entry's base filename.
//!
//! Entry names that are absolute or climb out through `..` are skipped.
//! Two entries with the same base filename (from different subfolders) write
//! to the same output path; the later one wins and a warning is logged.

use crate::container::OoxmlContainer;
use crate::error::Result;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Archive prefix reserved for embedded media.
pub const MEDIA_PREFIX: &str = "word/media/";

/// A media entry copied out of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    /// Full archive entry name (e.g., "word/media/image1.png")
    pub name: String,
    /// Path the bytes were written to
    pub path: PathBuf,
    /// Number of bytes written
    pub size: u64,
}

impl MediaEntry {
    /// Base filename of the written file.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Extractor for the media entries of a DOCX package.
#[derive(Debug)]
pub struct MediaExtractor {
    container: OoxmlContainer,
}

impl MediaExtractor {
    /// Open a DOCX file for media extraction.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            container: OoxmlContainer::open(path)?,
        })
    }

    /// Create an extractor from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            container: OoxmlContainer::from_bytes(data)?,
        })
    }

    /// Names of the media entries, in archive order. Nothing is written.
    pub fn entries(&self) -> Result<Vec<String>> {
        Ok(self
            .container
            .entries_with_prefix(MEDIA_PREFIX)?
            .into_iter()
            .filter(|e| !e.is_dir && e.file_name.is_some())
            .map(|e| e.name)
            .collect())
    }

    /// Copy every media entry into `output_dir`.
    pub fn extract_to(&self, output_dir: impl AsRef<Path>) -> Result<Vec<MediaEntry>> {
        self.extract_with(output_dir, |_| Ok(()))
    }

    /// Copy every media entry into `output_dir`, calling `on_entry` after each
    /// file is written. An error from `on_entry` stops the extraction.
    ///
    /// The directory is created if absent. Entries already written stay on
    /// disk when a later entry fails.
    pub fn extract_with<F>(
        &self,
        output_dir: impl AsRef<Path>,
        mut on_entry: F,
    ) -> Result<Vec<MediaEntry>>
    where
        F: FnMut(&MediaEntry) -> Result<()>,
    {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let mut extracted = Vec::new();
        let mut seen = HashSet::new();

        for entry in self.container.entries_with_prefix(MEDIA_PREFIX)? {
            if entry.is_dir {
                continue;
            }
            let Some(file_name) = entry.file_name.as_deref() else {
                log::warn!("Skipping unsafe media entry name: {}", entry.name);
                continue;
            };

            if !seen.insert(file_name.to_string()) {
                log::warn!(
                    "{} overwrites an earlier media entry named {}",
                    entry.name,
                    file_name
                );
            }

            let path = output_dir.join(file_name);
            let mut writer = BufWriter::new(File::create(&path)?);
            let size = self.container.copy_entry(entry.index, &mut writer)?;
            writer.flush()?;
            log::debug!("Copied {} ({} bytes) to {}", entry.name, size, path.display());

            let media = MediaEntry {
                name: entry.name,
                path,
                size,
            };
            on_entry(&media)?;
            extracted.push(media);
        }

        log::info!(
            "Extracted {} media entries to {}",
            extracted.len(),
            output_dir.display()
        );
        Ok(extracted)
    }
}

/// Extract every embedded media file of `input` into `output_dir`.
///
/// Returns the written paths in archive order.
///
/// # Example
///
/// ```no_run
/// let images = docxtract::extract_media("report.docx", "extracted_images")?;
/// println!("{} images", images.len());
/// # Ok::<(), docxtract::Error>(())
/// ```
pub fn extract_media(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let entries = MediaExtractor::open(input)?.extract_to(output_dir)?;
    Ok(entries.into_iter().map(|e| e.path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;

    fn archive(files: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, data) in files {
                if name.ends_with('/') {
                    zip.add_directory(*name, options).unwrap();
                } else {
                    zip.start_file(*name, options).unwrap();
                    zip.write_all(data.as_bytes()).unwrap();
                }
            }
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_only_media_prefix_extracted() {
        let data = archive(&[
            ("word/document.xml", "<w:document/>"),
            ("word/media/img1.png", "png-bytes"),
            ("word/theme/theme1.xml", "<a:theme/>"),
        ]);
        let dir = tempfile::tempdir().unwrap();

        let extracted = MediaExtractor::from_bytes(data)
            .unwrap()
            .extract_to(dir.path())
            .unwrap();

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].file_name(), "img1.png");
        assert_eq!(extracted[0].path, dir.path().join("img1.png"));
        assert_eq!(extracted[0].size, 9);
        assert_eq!(fs::read(dir.path().join("img1.png")).unwrap(), b"png-bytes");
        assert!(!dir.path().join("theme1.xml").exists());
    }

    #[test]
    fn test_archive_order_and_directories() {
        let data = archive(&[
            ("word/media/", ""),
            ("word/media/image2.jpeg", "2"),
            ("word/media/image1.png", "1"),
        ]);
        let extractor = MediaExtractor::from_bytes(data).unwrap();

        assert_eq!(
            extractor.entries().unwrap(),
            vec!["word/media/image2.jpeg", "word/media/image1.png"]
        );
    }

    #[test]
    fn test_basename_collision_overwrites() {
        let data = archive(&[
            ("word/media/a/pic.png", "first"),
            ("word/media/b/pic.png", "second"),
        ]);
        let dir = tempfile::tempdir().unwrap();

        let extracted = MediaExtractor::from_bytes(data)
            .unwrap()
            .extract_to(dir.path())
            .unwrap();

        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].path, extracted[1].path);
        assert_eq!(fs::read_to_string(dir.path().join("pic.png")).unwrap(), "second");
    }

    #[test]
    fn test_creates_nested_output_dir_and_reports_entries() {
        let data = archive(&[("word/media/image1.emf", "emf")]);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("images");

        let mut seen = Vec::new();
        MediaExtractor::from_bytes(data)
            .unwrap()
            .extract_with(&out, |entry| {
                seen.push(entry.file_name().to_string());
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec!["image1.emf"]);
        assert!(out.join("image1.emf").is_file());
    }

    #[test]
    fn test_no_media_still_creates_dir() {
        let data = archive(&[("word/document.xml", "<w:document/>")]);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("extracted_images");

        let extracted = MediaExtractor::from_bytes(data)
            .unwrap()
            .extract_to(&out)
            .unwrap();

        assert!(extracted.is_empty());
        assert!(out.is_dir());
    }

    #[test]
    fn test_backslash_names_stay_in_output_dir() {
        let data = archive(&[
            ("word/media/..\\..\\evil.png", "evil"),
            ("word/media/..", "dots"),
            ("word/media/image1.png", "png"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("images");

        let extractor = MediaExtractor::from_bytes(data).unwrap();
        assert_eq!(
            extractor.entries().unwrap(),
            vec!["word/media/..\\..\\evil.png", "word/media/image1.png"]
        );

        let extracted = extractor.extract_to(&out).unwrap();
        let paths: Vec<_> = extracted.iter().map(|e| e.path.clone()).collect();
        assert_eq!(paths, vec![out.join("evil.png"), out.join("image1.png")]);
        assert_eq!(extracted[0].file_name(), "evil.png");
        assert_eq!(fs::read_to_string(out.join("evil.png")).unwrap(), "evil");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }
}

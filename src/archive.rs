//! Lazy traversal of a gzip-compressed tar corpus archive.
//!
//! Entries are materialized one at a time into scoped temp files, so the
//! archive stream is consumed exactly once and disk usage stays bounded to a
//! single entry regardless of corpus size.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to open corpus archive {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read archive entry {name}: {source}")]
    Entry { name: String, source: io::Error },
}

/// A `.tar.gz` corpus container.
pub struct CorpusArchive {
    path: PathBuf,
    inner: tar::Archive<GzDecoder<File>>,
}

impl std::fmt::Debug for CorpusArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusArchive")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl CorpusArchive {
    /// Open the archive for a single traversal.
    ///
    /// An unreadable container is fatal to the whole run.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: tar::Archive::new(GzDecoder::new(file)),
        })
    }

    /// Iterate the archive's file entries. Finite, single-pass.
    pub fn entries(&mut self) -> Result<Entries<'_>, ArchiveError> {
        let raw = self.inner.entries().map_err(|source| ArchiveError::Open {
            path: self.path.clone(),
            source,
        })?;
        Ok(Entries { raw })
    }
}

pub struct Entries<'a> {
    raw: tar::Entries<'a, GzDecoder<File>>,
}

impl Iterator for Entries<'_> {
    type Item = Result<CorpusEntry, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.raw.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(ArchiveError::Entry {
                        name: "<stream>".to_string(),
                        source,
                    }));
                }
            };
            // directories and links are traversal structure, not corpus text
            if !entry.header().entry_type().is_file() {
                continue;
            }
            return Some(CorpusEntry::materialize(entry));
        }
    }
}

/// One text file extracted from the archive into a scoped temp file.
///
/// The temp file is removed when the entry is dropped.
pub struct CorpusEntry {
    name: String,
    file: NamedTempFile,
}

impl CorpusEntry {
    fn materialize(mut entry: tar::Entry<'_, GzDecoder<File>>) -> Result<Self, ArchiveError> {
        let name = match entry.path() {
            Ok(path) => path.display().to_string(),
            Err(_) => "<invalid path>".to_string(),
        };
        let mut file = NamedTempFile::new().map_err(|source| ArchiveError::Entry {
            name: name.clone(),
            source,
        })?;
        io::copy(&mut entry, file.as_file_mut()).map_err(|source| ArchiveError::Entry {
            name: name.clone(),
            source,
        })?;
        Ok(Self { name, file })
    }

    /// Path of the entry inside the archive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the materialized entry back as UTF-8 text.
    ///
    /// Validation covers the whole entry up front, so a skipped entry
    /// contributes nothing to the accumulated counts.
    pub fn text(&self) -> Result<String, ArchiveError> {
        std::fs::read_to_string(self.file.path()).map_err(|source| ArchiveError::Entry {
            name: self.name.clone(),
            source,
        })
    }
}

//! Local media files referenced by content nodes.
//!
//! A `FileInfo` is identified by its resolved local path. Size, checksum and
//! the device-visible URL are descriptive only and never take part in equality
//! or hashing, so the same file picked twice collapses to a single upload.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::SdkResult;
use crate::payload::Payload;

/// Resolve a path to the form used for FileInfo identity.
///
/// Existing files are canonicalized. For paths that do not exist yet the
/// path is made absolute and cleaned lexically, then its deepest existing
/// ancestor is canonicalized, so a symlinked directory resolves the same way
/// before and after the file is created.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    resolve_existing_ancestor(&cleaned).unwrap_or(cleaned)
}

fn resolve_existing_ancestor(path: &Path) -> Option<PathBuf> {
    let mut missing = Vec::new();
    let mut ancestor = path;
    while let (Some(parent), Some(name)) = (ancestor.parent(), ancestor.file_name()) {
        missing.push(name);
        ancestor = parent;
        if let Ok(canonical) = std::fs::canonicalize(ancestor) {
            return Some(
                missing
                    .iter()
                    .rev()
                    .fold(canonical, |resolved, name| resolved.join(name)),
            );
        }
    }
    None
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    path: PathBuf,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub size: u64,
    /// Lowercase hex SHA-256 of the file content.
    pub checksum: String,
}

impl FileInfo {
    /// Describe a file without touching the filesystem beyond path resolution.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = normalize_path(path.as_ref());
        let name = file_name(&path);
        Self {
            path,
            name,
            url: None,
            size: 0,
            checksum: String::new(),
        }
    }

    /// Describe an existing file, reading it to fill size and checksum.
    pub fn from_path(path: impl AsRef<Path>) -> SdkResult<Self> {
        let mut info = Self::new(path);
        info.refresh()?;
        Ok(info)
    }

    /// Re-read size and checksum from disk.
    pub fn refresh(&mut self) -> SdkResult<()> {
        let mut file = File::open(&self.path)?;
        let mut hasher = Sha256::new();
        let size = io::copy(&mut file, &mut hasher)?;
        self.size = size;
        self.checksum = format!("{:x}", hasher.finalize());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point at another file. Size, checksum and URL are cleared since they
    /// described the previous file.
    pub fn set_path(&mut self, path: impl AsRef<Path>) {
        self.path = normalize_path(path.as_ref());
        self.name = file_name(&self.path);
        self.url = None;
        self.size = 0;
        self.checksum.clear();
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    pub fn is_uploaded(&self) -> bool {
        self.url.is_some()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl PartialEq for FileInfo {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileInfo {}

impl Hash for FileInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileInfoRepr {
    path: PathBuf,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    checksum: String,
}

impl From<FileInfoRepr> for FileInfo {
    fn from(repr: FileInfoRepr) -> Self {
        let path = normalize_path(&repr.path);
        let name = repr
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| file_name(&path));
        Self {
            path,
            name,
            url: repr.url,
            size: repr.size,
            checksum: repr.checksum,
        }
    }
}

impl<'de> Deserialize<'de> for FileInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        FileInfoRepr::deserialize(deserializer).map(FileInfo::from)
    }
}

impl Payload for FileInfo {}

//! File ingestion
//!
//! Normalizes a file-picker selection or a drag-and-drop payload into a
//! single immutable [`FileHandle`] carrying bytes, name, MIME type, size and
//! last-modified time.

use crate::types::FileKind;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// In-memory file selected by the user. Cheap to clone; the bytes are shared.
#[derive(Debug, Clone)]
pub struct FileHandle {
    id: Uuid,
    bytes: Arc<[u8]>,
    name: String,
    mime_type: String,
    last_modified: DateTime<Local>,
}

impl FileHandle {
    pub fn new(
        bytes: Vec<u8>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        last_modified: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            bytes: Arc::from(bytes),
            name: name.into(),
            mime_type: mime_type.into(),
            last_modified,
        }
    }

    /// File-picker adapter: read a file from disk, guessing its MIME type
    /// from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let metadata = std::fs::metadata(path)?;
        let last_modified = metadata
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Path has no file name: {}", path.display()))?
            .to_string();
        let mime_type = guess_mime_type(&name);

        Ok(Self::new(bytes, name, mime_type, last_modified))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn last_modified(&self) -> DateTime<Local> {
        self.last_modified
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime_type)
    }
}

/// Guess MIME type from filename extension.
pub fn guess_mime_type(filename: &str) -> String {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Files delivered by one drag-and-drop gesture
#[derive(Debug, Clone, Default)]
pub struct DropPayload {
    pub files: Vec<FileHandle>,
}

impl DropPayload {
    pub fn new(files: Vec<FileHandle>) -> Self {
        Self { files }
    }

    /// Only the first dropped file is ever used
    pub fn first(&self) -> Option<&FileHandle> {
        self.files.first()
    }
}

/// Hover feedback for a drop target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    is_dragging: bool,
}

impl DragState {
    pub fn drag_enter(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.is_dragging = false;
    }

    pub fn drag_over(&mut self) {}

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }
}

/// A drop target that accepts one kind of file
#[derive(Debug, Clone)]
pub struct DropZone {
    accepts: FileKind,
    drag: DragState,
}

impl DropZone {
    pub fn new(accepts: FileKind) -> Self {
        Self {
            accepts,
            drag: DragState::default(),
        }
    }

    pub fn accepts(&self) -> FileKind {
        self.accepts
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragState {
        &mut self.drag
    }

    /// Ends the drag and returns the first file if this zone accepts it
    pub fn drop_payload(&mut self, payload: &DropPayload) -> Option<FileHandle> {
        self.drag.drag_leave();
        let file = payload.first()?;
        if file.kind() == self.accepts {
            Some(file.clone())
        } else {
            debug!(
                "🚫 Ignoring drop of '{}' ({}) on {:?} zone",
                file.name(),
                file.mime_type(),
                self.accepts
            );
            None
        }
    }
}

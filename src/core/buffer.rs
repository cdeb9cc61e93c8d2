//! Buffer: Pure data structure holding recipe text and file metadata
//! No cursor or autocomplete state (those belong to the editing session)
//!
//! Uses a ropey Rope so edits at arbitrary byte offsets stay O(log n).

use ropey::Rope;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

/// Errors raised by buffer file operations
#[derive(Error, Debug)]
pub enum BufferError {
    #[error("File does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Path is a directory, not a file: {0}")]
    IsDirectory(PathBuf),

    #[error("No filename set for buffer")]
    NoFilename,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to persist {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl BufferError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        BufferError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Buffer: text plus the file it came from
#[derive(Debug, Default)]
pub struct Buffer {
    /// Text content stored in a Rope (O(log n) operations)
    rope: Rope,
    /// Filename (if loaded from or saved to a file)
    pub filename: Option<PathBuf>,
    /// Dirty flag (true if buffer has unsaved changes)
    pub modified: bool,
    /// Version counter, bumped on every edit
    pub version: u64,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from a string
    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(content.as_ref()),
            ..Self::default()
        }
    }

    /// Load a buffer from a file. Invalid UTF-8 is replaced lossily.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BufferError::NotFound(path.to_path_buf()));
        }
        if path.is_dir() {
            return Err(BufferError::IsDirectory(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|e| BufferError::io(path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        info!(path = %path.display(), bytes = bytes.len(), "loaded recipe");

        Ok(Self {
            rope: Rope::from_str(&content),
            filename: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    /// Open `path` if it exists, otherwise start an empty buffer bound to it
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }
        Ok(Self {
            filename: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    // ==================== Content Access ====================

    /// Get total length in bytes
    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Get entire content as string
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Get number of lines in buffer
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get byte offset for start of a line
    pub fn line_to_byte(&self, line_idx: usize) -> Option<usize> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line_to_byte(line_idx))
    }

    /// Get which line a byte offset is on
    pub fn byte_to_line(&self, byte_offset: usize) -> usize {
        if byte_offset >= self.rope.len_bytes() {
            return self.rope.len_lines().saturating_sub(1);
        }
        self.rope.byte_to_line(byte_offset)
    }

    /// Get content of a specific line (without line terminator)
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(strip_line_break(&line).to_string())
    }

    // ==================== Editing Operations ====================

    /// Insert text at byte position
    pub fn insert(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = pos.min(self.rope.len_bytes());
        let char_idx = self.rope.byte_to_char(pos);
        self.rope.insert(char_idx, text);
        self.mark_modified();
    }

    /// Delete `len` bytes starting at byte position
    pub fn delete(&mut self, pos: usize, len: usize) {
        if len == 0 || pos >= self.rope.len_bytes() {
            return;
        }
        let actual_len = len.min(self.rope.len_bytes() - pos);
        let start_char = self.rope.byte_to_char(pos);
        let end_char = self.rope.byte_to_char(pos + actual_len);
        self.rope.remove(start_char..end_char);
        self.mark_modified();
    }

    // ==================== File Operations ====================

    /// Save buffer to its file through a temp file and atomic rename
    pub fn save(&mut self) -> Result<(), BufferError> {
        let path = self.filename.clone().ok_or(BufferError::NoFilename)?;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| BufferError::io(&path, e))?;

        // Write content chunk by chunk to avoid large allocations
        for chunk in self.rope.chunks() {
            temp_file
                .write_all(chunk.as_bytes())
                .map_err(|e| BufferError::io(&path, e))?;
        }
        temp_file.flush().map_err(|e| BufferError::io(&path, e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| BufferError::io(&path, e))?;

        temp_file.persist(&path)?;
        self.modified = false;
        info!(path = %path.display(), "saved recipe");

        Ok(())
    }

    /// Short name for status lines
    pub fn display_name(&self) -> String {
        self.filename
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "*scratch*".to_string())
    }

    fn mark_modified(&mut self) {
        self.modified = true;
        self.version += 1;
    }
}

/// Line separators ropey breaks lines on
const LINE_BREAKS: [char; 7] = [
    '\n', '\u{0B}', '\u{0C}', '\r', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Drop the single line terminator ending `line`, if any
fn strip_line_break(line: &str) -> &str {
    if let Some(rest) = line.strip_suffix("\r\n") {
        return rest;
    }
    line.strip_suffix(LINE_BREAKS).unwrap_or(line)
}

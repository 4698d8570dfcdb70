//! Character sources - where the scanned text comes from
//!
//! A source is read to exhaustion on every fill and its characters appended to
//! the scan buffer in order. Three kinds are supported:
//! - a literal string (repeatable, idempotent)
//! - a named file (repeatable; re-opened each fill, so it reflects the file's
//!   current contents)
//! - a piped reader (NOT repeatable; once drained, later fills append nothing)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::buffer::ScanBuffer;
use crate::error::Result;

/// Selects where characters come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// A literal in-memory string
    Literal,
    /// A named file on disk
    File,
    /// A caller-supplied piped reader
    Pipe,
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceMode::Literal => "literal",
            SourceMode::File => "file",
            SourceMode::Pipe => "pipe",
        };
        write!(f, "{name}")
    }
}

/// A source descriptor plus the machinery to drain it into a buffer
pub(crate) enum CharSource {
    /// Literal text, copied on every fill
    Literal(String),
    /// File path, re-opened and fully read on every fill
    Path(PathBuf),
    /// Piped reader, drained to end-of-stream; yields nothing once exhausted
    Pipe(Box<dyn AsyncRead + Send + Unpin>),
}

impl CharSource {
    pub(crate) fn mode(&self) -> SourceMode {
        match self {
            CharSource::Literal(_) => SourceMode::Literal,
            CharSource::Path(_) => SourceMode::File,
            CharSource::Pipe(_) => SourceMode::Pipe,
        }
    }

    /// Read the entire source and append every character to `buf` in order.
    ///
    /// Any I/O failure (unreadable file, broken pipe, invalid UTF-8) aborts the
    /// fill and surfaces as [`crate::CheckError::Io`]; it is never folded into
    /// a validation verdict. The file handle is scoped to this call and closed
    /// even when the read fails.
    pub(crate) async fn fill(&mut self, buf: &mut ScanBuffer) -> Result<()> {
        match self {
            CharSource::Literal(text) => buf.push_str(text),
            CharSource::Path(path) => {
                let contents = tokio::fs::read_to_string(&path).await?;
                buf.push_str(&contents);
            }
            CharSource::Pipe(reader) => {
                let mut contents = String::new();
                reader.read_to_string(&mut contents).await?;
                buf.push_str(&contents);
            }
        }
        tracing::debug!(mode = %self.mode(), chars = buf.len(), "source ingested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_literal_fill_is_repeatable() {
        let mut source = CharSource::Literal("({[]})".to_string());
        assert_eq!(source.mode(), SourceMode::Literal);

        let mut buf = ScanBuffer::new();
        source.fill(&mut buf).await.unwrap();
        assert_eq!(buf.len(), 6);

        buf.clear();
        source.fill(&mut buf).await.unwrap();
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.as_slice()[0], '(');
    }

    #[tokio::test]
    async fn test_file_fill_reads_current_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(())").unwrap();
        file.flush().unwrap();

        let mut source = CharSource::Path(file.path().to_path_buf());
        assert_eq!(source.mode(), SourceMode::File);

        let mut buf = ScanBuffer::new();
        source.fill(&mut buf).await.unwrap();
        assert_eq!(buf.len(), 4);

        // append to the file; the next fill sees the new contents
        write!(file, "[]").unwrap();
        file.flush().unwrap();

        buf.clear();
        source.fill(&mut buf).await.unwrap();
        assert_eq!(buf.len(), 6);
    }

    #[tokio::test]
    async fn test_file_fill_missing_file_is_io_fault() {
        let mut source = CharSource::Path(PathBuf::from("/nonexistent/streamcheck-test"));
        let mut buf = ScanBuffer::new();
        let err = source.fill(&mut buf).await.unwrap_err();
        assert!(matches!(err, crate::CheckError::Io(_)));
    }

    #[tokio::test]
    async fn test_pipe_fill_drains_reader_once() {
        let reader: &[u8] = b"{[()]}";
        let mut source = CharSource::Pipe(Box::new(reader));
        assert_eq!(source.mode(), SourceMode::Pipe);

        let mut buf = ScanBuffer::new();
        source.fill(&mut buf).await.unwrap();
        assert_eq!(buf.len(), 6);

        // the reader is exhausted; a second fill appends nothing
        buf.clear();
        source.fill(&mut buf).await.unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_source_mode_display() {
        assert_eq!(SourceMode::Literal.to_string(), "literal");
        assert_eq!(SourceMode::File.to_string(), "file");
        assert_eq!(SourceMode::Pipe.to_string(), "pipe");
    }

    #[test]
    fn test_source_mode_serde_roundtrip() {
        let json = serde_json::to_string(&SourceMode::Pipe).unwrap();
        assert_eq!(json, "\"pipe\"");
        let mode: SourceMode = serde_json::from_str(&json).unwrap();
        assert_eq!(mode, SourceMode::Pipe);
    }
}

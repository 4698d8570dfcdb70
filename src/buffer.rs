//! Scan buffer - the shared character sequence for one checker instance
//!
//! Ingestion appends to the buffer, policies iterate it, and the engine clears
//! it after aggregating results. Outside a run the buffer is always empty.

/// Ordered, in-memory character sequence ingested for one validation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanBuffer {
    chars: Vec<char>,
}

impl ScanBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single character, preserving order
    pub fn push(&mut self, c: char) {
        self.chars.push(c);
    }

    /// Append every character of `text` in order
    pub fn push_str(&mut self, text: &str) {
        self.chars.extend(text.chars());
    }

    /// Number of buffered characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check whether the buffer holds no characters
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// View the buffered characters in ingestion order
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Iterate the buffered characters in ingestion order
    pub fn iter(&self) -> std::slice::Iter<'_, char> {
        self.chars.iter()
    }

    /// Discard all buffered characters
    pub fn clear(&mut self) {
        self.chars.clear();
    }
}

//! Submitted command lines and the browse cursor.

/// Result of moving the history cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    /// History is empty; nothing to do.
    Unchanged,
    /// The cursor landed on an entry.
    Entry(&'a str),
    /// The cursor moved past the newest entry: back to fresh input.
    Fresh,
}

/// Ordered log of submitted lines.
///
/// The cursor lives in `[0, len]`; `len` means "not browsing".
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted line and stop browsing. Duplicates are kept.
    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.cursor = self.entries.len();
    }

    /// Step towards older entries, stopping at the oldest.
    pub fn back(&mut self) -> Recall<'_> {
        if self.entries.is_empty() {
            return Recall::Unchanged;
        }
        self.cursor = self.cursor.saturating_sub(1);
        Recall::Entry(&self.entries[self.cursor])
    }

    /// Step towards newer entries; stepping past the newest returns to
    /// fresh input.
    pub fn forward(&mut self) -> Recall<'_> {
        if self.entries.is_empty() {
            return Recall::Unchanged;
        }
        self.cursor = (self.cursor + 1).min(self.entries.len());
        if self.cursor == self.entries.len() {
            Recall::Fresh
        } else {
            Recall::Entry(&self.entries[self.cursor])
        }
    }

    /// Forget everything (session reset only).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Append-only transcript of rendered output blocks.

use serde::Serialize;

/// Identifier of a block, unique for the lifetime of a transcript (ids are
/// never reused, even across `clear`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BlockId(u64);

/// Style class attached to a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Echo of a submitted command line.
    UserInput,
    Plain,
    Info,
    Success,
    Warning,
    Error,
    /// A multi-line content section.
    Section,
    /// Transient loading indicator.
    Loading,
}

/// One rendered block of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputBlock {
    pub id: BlockId,
    pub style: Style,
    pub text: String,
}

/// The session's output surface.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    blocks: Vec<OutputBlock>,
    next_id: u64,
    /// Bumped on every `clear` so front ends can wipe their screen.
    epoch: u64,
    /// Index of the block the view is scrolled to.
    scroll: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block and return its id.
    pub fn push(&mut self, style: Style, text: impl Into<String>) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push(OutputBlock {
            id,
            style,
            text: text.into(),
        });
        id
    }

    /// Remove a block by id. Returns `false` if it is no longer present
    /// (for example because the transcript was cleared in the meantime).
    pub fn remove(&mut self, id: BlockId) -> bool {
        match self.blocks.iter().position(|b| b.id == id) {
            Some(pos) => {
                self.blocks.remove(pos);
                self.scroll = self.scroll.min(self.blocks.len());
                true
            },
            None => false,
        }
    }

    /// Drop every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.scroll = 0;
        self.epoch += 1;
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.blocks.len();
    }

    /// Blocks appended after `last_seen` (all blocks when `None`).
    pub fn since(&self, last_seen: Option<BlockId>) -> impl Iterator<Item = &OutputBlock> {
        self.blocks
            .iter()
            .filter(move |b| last_seen.is_none_or(|seen| b.id > seen))
    }

    pub fn get(&self, id: BlockId) -> Option<&OutputBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn blocks(&self) -> &[OutputBlock] {
        &self.blocks
    }

    pub fn last(&self) -> Option<&OutputBlock> {
        self.blocks.last()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_scrolled_to_end(&self) -> bool {
        self.scroll == self.blocks.len()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut t = Transcript::new();
        let a = t.push(Style::Info, "a");
        let b = t.push(Style::Plain, "b");
        assert!(b > a);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(a).unwrap().text, "a");
    }

    #[test]
    fn remove_only_the_requested_block() {
        let mut t = Transcript::new();
        let a = t.push(Style::Loading, "loading a");
        let b = t.push(Style::Loading, "loading b");
        assert!(t.remove(a));
        assert!(t.get(a).is_none());
        assert_eq!(t.get(b).unwrap().text, "loading b");
        assert!(!t.remove(a));
    }

    #[test]
    fn ids_survive_clear() {
        let mut t = Transcript::new();
        let before = t.push(Style::Plain, "x");
        t.clear();
        let after = t.push(Style::Plain, "y");
        assert!(after > before);
        assert!(!t.remove(before));
        assert_eq!(t.epoch(), 1);
    }

    #[test]
    fn since_filters_by_id() {
        let mut t = Transcript::new();
        let a = t.push(Style::Plain, "a");
        t.push(Style::Plain, "b");
        t.push(Style::Plain, "c");
        let texts: Vec<&str> = t.since(Some(a)).map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["b", "c"]);
        assert_eq!(t.since(None).count(), 3);
    }

    #[test]
    fn scroll_follows_end() {
        let mut t = Transcript::new();
        t.push(Style::Plain, "a");
        assert!(!t.is_scrolled_to_end());
        t.scroll_to_end();
        assert!(t.is_scrolled_to_end());
    }

    #[test]
    fn block_serializes_with_kebab_style() {
        let mut t = Transcript::new();
        t.push(Style::UserInput, "help");
        let json = serde_json::to_string(&t.blocks()[0]).unwrap();
        assert_eq!(json, r#"{"id":0,"style":"user-input","text":"help"}"#);
    }
}

//! Autocomplete suggestion state.

use crate::registry::CommandRegistry;

/// One row of the suggestion overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
    pub description: String,
}

/// Prefix matches for the current input plus a highlight cursor.
///
/// Rebuilt from scratch on every text change; the highlight is unset after a
/// rebuild and always indexes into `items` when set.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSet {
    items: Vec<Suggestion>,
    highlight: Option<usize>,
}

impl SuggestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the matches for `input`. Blank input yields no suggestions.
    pub fn recompute(&mut self, registry: &CommandRegistry, input: &str) {
        self.highlight = None;
        self.items.clear();
        if input.trim().is_empty() {
            return;
        }
        self.items = registry
            .prefix_match(input)
            .into_iter()
            .map(|entry| Suggestion {
                name: entry.name().to_string(),
                description: entry.description().to_string(),
            })
            .collect();
    }

    /// Move the highlight one step and return the newly highlighted name.
    ///
    /// From an unset highlight, forward lands on the first row and backward
    /// on the last. Both directions wrap.
    pub fn step(&mut self, forward: bool) -> Option<&str> {
        let count = self.items.len();
        if count == 0 {
            return None;
        }
        let next = match (self.highlight, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.highlight = Some(next);
        Some(&self.items[next].name)
    }

    /// Hide the overlay.
    pub fn dismiss(&mut self) {
        self.items.clear();
        self.highlight = None;
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlight
    }

    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::register_builtins;

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg).unwrap();
        reg
    }

    fn names(set: &SuggestionSet) -> Vec<&str> {
        set.items().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn blank_input_hides() {
        let mut set = SuggestionSet::new();
        set.recompute(&registry(), "   ");
        assert!(!set.is_visible());
        assert_eq!(set.highlighted(), None);
    }

    #[test]
    fn recompute_collects_prefix_matches() {
        let mut set = SuggestionSet::new();
        set.recompute(&registry(), "S");
        assert_eq!(names(&set), ["skills", "sudo", "status"]);
        assert_eq!(set.get(0).unwrap().description, "Technical skills");
    }

    #[test]
    fn trailing_space_matches_nothing() {
        let mut set = SuggestionSet::new();
        set.recompute(&registry(), "cat ");
        assert!(set.is_empty());
    }

    #[test]
    fn step_from_unset() {
        let reg = registry();
        let mut set = SuggestionSet::new();
        set.recompute(&reg, "s");
        assert_eq!(set.step(false), Some("status"));
        set.recompute(&reg, "s");
        assert_eq!(set.step(true), Some("skills"));
    }

    #[test]
    fn step_wraps_both_ways() {
        let mut set = SuggestionSet::new();
        set.recompute(&registry(), "s");
        assert_eq!(set.step(true), Some("skills"));
        assert_eq!(set.step(true), Some("sudo"));
        assert_eq!(set.step(true), Some("status"));
        assert_eq!(set.step(true), Some("skills"));
        assert_eq!(set.step(false), Some("status"));
        assert_eq!(set.highlighted(), Some(2));
    }

    #[test]
    fn recompute_resets_highlight() {
        let reg = registry();
        let mut set = SuggestionSet::new();
        set.recompute(&reg, "s");
        set.step(true);
        set.recompute(&reg, "st");
        assert_eq!(set.highlighted(), None);
        assert_eq!(names(&set), ["status"]);
    }

    #[test]
    fn step_on_empty_is_none() {
        let mut set = SuggestionSet::new();
        assert_eq!(set.step(true), None);
        assert_eq!(set.highlighted(), None);
    }

    #[test]
    fn dismiss_clears_everything() {
        let mut set = SuggestionSet::new();
        set.recompute(&registry(), "s");
        set.step(true);
        set.dismiss();
        assert!(!set.is_visible());
        assert_eq!(set.highlighted(), None);
    }
}

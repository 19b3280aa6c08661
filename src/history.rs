use crate::prefs::{EditorPrefs, PrefKey};
use anyhow::Result;
use std::collections::VecDeque;

/// Ordered stack of screenshot path references, most recent at the front.
///
/// Pushing an already-present reference promotes it instead of duplicating
/// it. Mutations persist through the preference store immediately while
/// `auto_save` is on; bulk operations turn it off, mutate freely, and persist
/// once at the end.
pub struct ScreenshotHistory {
    entries: VecDeque<String>,
    auto_save: bool,
}

impl ScreenshotHistory {
    pub fn new() -> Self {
        Self { entries: VecDeque::new(), auto_save: true }
    }

    /// Construct and populate from the persisted representation.
    pub fn load(prefs: &EditorPrefs) -> Self {
        let mut history = Self::new();
        history.reload(prefs);
        history
    }

    /// Replace the in-memory sequence with the persisted one.
    pub fn reload(&mut self, prefs: &EditorPrefs) {
        self.entries.clear();
        let count = prefs.get_i64(&PrefKey::HistoryCount).unwrap_or(0).max(0) as usize;
        for index in 0..count {
            if let Some(item) = prefs.get_string(&PrefKey::HistoryItem(index)) {
                self.entries.push_back(item.to_string());
            }
        }
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    pub fn set_auto_save(&mut self, enabled: bool) {
        self.auto_save = enabled;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent reference without removing it.
    pub fn current(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Most-recent-first enumeration; restartable, call it per render pass.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn push(&mut self, reference: impl Into<String>, prefs: &mut EditorPrefs) {
        let reference = reference.into();
        if reference.is_empty() {
            return;
        }
        if let Some(pos) = self.entries.iter().position(|entry| entry == &reference) {
            self.entries.remove(pos);
        }
        self.entries.push_front(reference);
        self.persist_if_auto(prefs);
    }

    pub fn pop(&mut self, prefs: &mut EditorPrefs) -> Option<String> {
        let popped = self.entries.pop_front();
        if popped.is_some() {
            self.persist_if_auto(prefs);
        }
        popped
    }

    /// Remove a specific reference wherever it sits in the stack.
    pub fn remove(&mut self, reference: &str, prefs: &mut EditorPrefs) -> bool {
        let Some(pos) = self.entries.iter().position(|entry| entry == reference) else {
            return false;
        };
        self.entries.remove(pos);
        self.persist_if_auto(prefs);
        true
    }

    /// Drop every entry. Never persists by itself; callers decide when the
    /// empty state hits disk.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write count + item keys, pruning stale item keys from any longer
    /// previous sequence, then flush the store. Idempotent.
    pub fn save(&self, prefs: &mut EditorPrefs) -> Result<()> {
        let previous = prefs.get_i64(&PrefKey::HistoryCount).unwrap_or(0).max(0) as usize;
        prefs.set_i64(&PrefKey::HistoryCount, self.entries.len() as i64);
        for (index, entry) in self.entries.iter().enumerate() {
            prefs.set_string(&PrefKey::HistoryItem(index), entry.clone());
        }
        for index in self.entries.len()..previous {
            prefs.remove(&PrefKey::HistoryItem(index));
        }
        prefs.save()
    }

    fn persist_if_auto(&self, prefs: &mut EditorPrefs) {
        if !self.auto_save {
            return;
        }
        if let Err(err) = self.save(prefs) {
            eprintln!("[screenshot] failed to persist history: {err:?}");
        }
    }
}

impl Default for ScreenshotHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn prefs_in(dir: &tempfile::TempDir) -> EditorPrefs {
        EditorPrefs::load_or_default(dir.path().join("prefs.json"))
    }

    #[test]
    fn stack_discipline() {
        let dir = tempdir().expect("tempdir");
        let mut prefs = prefs_in(&dir);
        let mut history = ScreenshotHistory::new();

        history.push("a", &mut prefs);
        history.push("b", &mut prefs);
        assert_eq!(history.current(), Some("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(&mut prefs).as_deref(), Some("b"));
        assert_eq!(history.current(), Some("a"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn empty_pop_is_none() {
        let dir = tempdir().expect("tempdir");
        let mut prefs = prefs_in(&dir);
        let mut history = ScreenshotHistory::new();
        assert_eq!(history.pop(&mut prefs), None);
        assert_eq!(history.current(), None);
    }

    #[test]
    fn push_promotes_duplicates() {
        let dir = tempdir().expect("tempdir");
        let mut prefs = prefs_in(&dir);
        let mut history = ScreenshotHistory::new();

        history.push("a", &mut prefs);
        history.push("b", &mut prefs);
        history.push("a", &mut prefs);
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn auto_save_off_defers_to_a_single_write() {
        let dir = tempdir().expect("tempdir");
        let mut prefs = prefs_in(&dir);
        let mut history = ScreenshotHistory::new();

        history.set_auto_save(false);
        history.push("a", &mut prefs);
        history.push("b", &mut prefs);
        history.push("c", &mut prefs);
        assert_eq!(history.pop(&mut prefs).as_deref(), Some("c"));
        assert_eq!(prefs.save_count(), 0);

        history.save(&mut prefs).expect("save");
        assert_eq!(prefs.save_count(), 1);

        let reloaded = ScreenshotHistory::load(&prefs);
        assert_eq!(reloaded.iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn save_prunes_stale_item_keys() {
        let dir = tempdir().expect("tempdir");
        let mut prefs = prefs_in(&dir);
        let mut history = ScreenshotHistory::new();

        history.push("a", &mut prefs);
        history.push("b", &mut prefs);
        history.push("c", &mut prefs);
        history.clear();
        history.push("only", &mut prefs);

        assert_eq!(prefs.get_i64(&PrefKey::HistoryCount), Some(1));
        assert!(prefs.get_string(&PrefKey::HistoryItem(1)).is_none());
        assert!(prefs.get_string(&PrefKey::HistoryItem(2)).is_none());
    }

    #[test]
    fn round_trip_preserves_order() {
        let dir = tempdir().expect("tempdir");
        let mut prefs = prefs_in(&dir);
        let mut history = ScreenshotHistory::new();

        for path in ["one.png", "two.png", "three.png"] {
            history.push(path, &mut prefs);
        }
        let reloaded = ScreenshotHistory::load(&prefs);
        assert_eq!(reloaded.iter().collect::<Vec<_>>(), history.iter().collect::<Vec<_>>());
    }
}

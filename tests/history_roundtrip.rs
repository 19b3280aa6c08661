use scene_panel::{EditorPrefs, PrefKey, ScreenshotHistory};
use tempfile::tempdir;

#[test]
fn history_round_trips_across_store_reopen() {
    let dir = tempdir().expect("tempdir");
    let prefs_path = dir.path().join("prefs.json");

    let mut prefs = EditorPrefs::load_or_default(&prefs_path);
    let mut history = ScreenshotHistory::new();
    history.push("Screenshots/screenshot_000.png", &mut prefs);
    history.push("Screenshots/screenshot_001.png", &mut prefs);
    history.push("Screenshots/screenshot_002.png", &mut prefs);
    let before: Vec<_> = history.iter().map(str::to_string).collect();

    // A fresh store over the same file, as the next editor session sees it.
    let reopened = EditorPrefs::load_or_default(&prefs_path);
    let restored = ScreenshotHistory::load(&reopened);
    let after: Vec<_> = restored.iter().map(str::to_string).collect();

    assert_eq!(after, before);
    assert_eq!(restored.current(), Some("Screenshots/screenshot_002.png"));
    assert_eq!(restored.len(), 3);
}

#[test]
fn persisted_keys_follow_count_item_schema() {
    let dir = tempdir().expect("tempdir");
    let mut prefs = EditorPrefs::load_or_default(dir.path().join("prefs.json"));

    let mut history = ScreenshotHistory::new();
    history.push("a.png", &mut prefs);
    history.push("b.png", &mut prefs);

    assert_eq!(prefs.get_i64(&PrefKey::HistoryCount), Some(2));
    assert_eq!(prefs.get_string(&PrefKey::HistoryItem(0)), Some("b.png"));
    assert_eq!(prefs.get_string(&PrefKey::HistoryItem(1)), Some("a.png"));
}

#[test]
fn redundant_save_is_idempotent() {
    let dir = tempdir().expect("tempdir");
    let mut prefs = EditorPrefs::load_or_default(dir.path().join("prefs.json"));

    let mut history = ScreenshotHistory::new();
    history.push("a.png", &mut prefs);
    history.save(&mut prefs).expect("first save");
    history.save(&mut prefs).expect("second save");

    let restored = ScreenshotHistory::load(&prefs);
    assert_eq!(restored.iter().collect::<Vec<_>>(), vec!["a.png"]);
}

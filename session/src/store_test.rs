use super::*;

fn temp_token_path(tag: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("bodegix-store-test-{}-{tag}", std::process::id()))
        .join("token")
}

#[test]
fn memory_store_starts_empty() {
    assert_eq!(MemoryStore::new().read(), None);
}

#[test]
fn memory_store_save_read_clear() {
    let store = MemoryStore::new();
    store.save("abc");
    assert_eq!(store.read().as_deref(), Some("abc"));
    store.save("def");
    assert_eq!(store.read().as_deref(), Some("def"));
    store.clear();
    assert_eq!(store.read(), None);
}

#[test]
fn memory_store_with_token_is_prepopulated() {
    assert_eq!(MemoryStore::with_token("t").read().as_deref(), Some("t"));
}

#[test]
fn file_store_missing_file_reads_as_no_token() {
    let store = FileStore::new(temp_token_path("missing"));
    assert_eq!(store.read(), None);
    // Clearing an absent file is a no-op.
    store.clear();
}

#[test]
fn file_store_persists_across_instances() {
    let path = temp_token_path("persist");
    FileStore::new(&path).save("h.p.s");
    assert_eq!(FileStore::new(&path).read().as_deref(), Some("h.p.s"));

    FileStore::new(&path).clear();
    assert_eq!(FileStore::new(&path).read(), None);
    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn file_store_ignores_surrounding_whitespace() {
    let path = temp_token_path("whitespace");
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "  tok\n").expect("write");
    assert_eq!(FileStore::new(&path).read().as_deref(), Some("tok"));

    std::fs::write(&path, "\n").expect("write");
    assert_eq!(FileStore::new(&path).read(), None);
    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}

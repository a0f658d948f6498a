use super::*;

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert_eq!(store.get("theme"), None);
}

#[test]
fn memory_store_overwrites_values() {
    let store = MemoryStore::with("theme", "light");
    store.set("theme", "dark");
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}

#[test]
fn memory_store_keys_are_independent() {
    let store = MemoryStore::with("theme", "dark");
    assert_eq!(store.get("other"), None);
}

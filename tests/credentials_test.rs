mod common;

use melody_syncer::youtube::{CredentialPool, Rotation};

use common::{KEYS, pool};

#[test]
fn test_next_after_advances_one_slot() {
    let pool = pool();
    assert_eq!(pool.next_after("key-1"), Rotation::Next("key-2".to_string()));
    assert_eq!(pool.next_after("key-3"), Rotation::Next("key-4".to_string()));
    assert_eq!(pool.next_after("key-4"), Rotation::Next("key-5".to_string()));
}

#[test]
fn test_last_key_is_exhausted() {
    assert_eq!(pool().next_after("key-5"), Rotation::Exhausted);
}

#[test]
fn test_unknown_key_is_exhausted() {
    assert_eq!(pool().next_after("user-supplied"), Rotation::Exhausted);
}

#[test]
fn test_shorter_pool_ends_at_its_last_key() {
    let pool = CredentialPool::new(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(pool.next_after("a"), Rotation::Next("b".to_string()));
    assert_eq!(pool.next_after("b"), Rotation::Exhausted);
}

#[test]
fn test_pool_keeps_at_most_five_keys() {
    let mut keys: Vec<String> = KEYS.iter().map(|k| k.to_string()).collect();
    keys.push("key-6".to_string());

    let pool = CredentialPool::new(keys);
    assert_eq!(pool.len(), 5);
    assert_eq!(pool.position("key-6"), None);
    assert_eq!(pool.next_after("key-5"), Rotation::Exhausted);
}

#[test]
fn test_starting_key_prefers_caller() {
    let pool = pool();
    assert_eq!(pool.starting_key(Some("mine")).as_deref(), Some("mine"));
    assert_eq!(pool.starting_key(Some("default")).as_deref(), Some("key-1"));
    assert_eq!(pool.starting_key(Some("")).as_deref(), Some("key-1"));
    assert_eq!(pool.starting_key(None).as_deref(), Some("key-1"));
}

#[test]
fn test_empty_pool_has_no_starting_key() {
    let pool = CredentialPool::new(Vec::new());
    assert!(pool.is_empty());
    assert_eq!(pool.starting_key(None), None);
    assert_eq!(pool.starting_key(Some("mine")).as_deref(), Some("mine"));
}

#[test]
fn test_repeated_keys_are_collapsed() {
    let pool = CredentialPool::new(
        ["a", "a", "b"].iter().map(|k| k.to_string()).collect(),
    );

    assert_eq!(pool.len(), 2);
    assert_eq!(pool.next_after("a"), Rotation::Next("b".to_string()));
    assert_eq!(pool.next_after("b"), Rotation::Exhausted);
}

#[test]
fn test_repeated_keys_do_not_count_against_the_limit() {
    let keys = ["a", "a", "b", "c", "c", "d", "e", "f"];
    let pool = CredentialPool::new(keys.iter().map(|k| k.to_string()).collect());

    assert_eq!(pool.len(), 5);
    assert_eq!(pool.position("e"), Some(4));
    assert_eq!(pool.position("f"), None);
}

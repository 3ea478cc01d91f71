//! First-seen-wins deduplication.

use std::collections::HashSet;
use std::hash::Hash;

/// Collapse `items` to one entry per key, keeping the first occurrence.
///
/// Pure and order-preserving: the output is the input with later duplicates
/// removed, so deduplicating twice is a no-op.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let items = vec![(1, "first"), (2, "two"), (1, "second"), (3, "three")];
        let deduped = dedup_by_key(items, |&(id, _)| id);
        assert_eq!(deduped, vec![(1, "first"), (2, "two"), (3, "three")]);
    }

    #[test]
    fn test_idempotent() {
        let items = vec![(1, "a"), (2, "b"), (1, "dup")];
        let once = dedup_by_key(items, |&(id, _)| id);
        let twice = dedup_by_key(once.clone(), |&(id, _)| id);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<(i64, &str)> = vec![];
        assert!(dedup_by_key(items, |&(id, _)| id).is_empty());
    }

    #[test]
    fn test_all_duplicates() {
        let items = vec![(9, "a"), (9, "b"), (9, "c")];
        let deduped = dedup_by_key(items, |&(id, _)| id);
        assert_eq!(deduped, vec![(9, "a")]);
    }
}

//! Small generic helpers over slices.
//!
//! These mirror the handful of list operations the hero logic relies on:
//! stable sort by key, distinct by key, empty-safe max, and permutations.

use std::collections::HashSet;
use std::hash::Hash;

/// Return a new vector sorted by the given key. Equal keys keep their
/// original relative order.
pub fn sort_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut sorted: Vec<T> = items.into_iter().collect();
    sorted.sort_by_key(|item| key(item));
    sorted
}

/// Keep the first item for each distinct key, preserving order.
pub fn distinct_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Largest key value in the collection, or `None` if it is empty.
pub fn max_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Option<K>
where
    K: Ord,
    F: FnMut(T) -> K,
{
    items.into_iter().map(key).max()
}

/// Every ordering of the given values. Repeated values produce repeated
/// permutations; callers dedupe with [`distinct_by`] when that matters.
pub fn permutations<T: Clone>(values: &[T]) -> Vec<Vec<T>> {
    if values.len() <= 1 {
        return vec![values.to_vec()];
    }

    let mut result = Vec::new();
    for (index, head) in values.iter().enumerate() {
        let mut rest = values.to_vec();
        rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_stable() {
        let items = vec![("b", 1), ("a", 2), ("b", 0), ("a", 1)];
        let sorted = sort_by_key(items, |(name, _)| *name);
        assert_eq!(sorted, vec![("a", 2), ("a", 1), ("b", 1), ("b", 0)]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = sort_by_key(vec!["delta", "alpha", "charlie"], |s| *s);
        let twice = sort_by_key(once.clone(), |s| *s);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_distinct_keeps_first() {
        let items = vec![(1, 'a'), (2, 'b'), (1, 'c')];
        let distinct = distinct_by(items, |(k, _)| *k);
        assert_eq!(distinct, vec![(1, 'a'), (2, 'b')]);
    }

    #[test]
    fn test_max_of_empty_is_none() {
        let empty: Vec<i32> = vec![];
        assert_eq!(max_by_key(empty, |v| v), None);
        assert_eq!(max_by_key(vec![3, -1, 7], |v| v), Some(7));
    }

    #[test]
    fn test_permutations() {
        let perms = permutations(&[1, 2, 3]);
        assert_eq!(perms.len(), 6);
        assert_eq!(perms[0], vec![1, 2, 3]);
        assert_eq!(perms[5], vec![3, 2, 1]);

        let repeated = permutations(&[2, -1, -1]);
        assert_eq!(repeated.len(), 6);
        let distinct = distinct_by(repeated, |p| p.clone());
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_permutations_of_empty() {
        let empty: Vec<Vec<i32>> = permutations(&[]);
        assert_eq!(empty, vec![Vec::<i32>::new()]);
    }
}

//! Binary search helpers over arrays sorted by a key.

use core::ops::Range;

/// Position of the element whose key equals `key`, if any.
pub fn find_by_key<T, K: Ord>(items: &[T], key: &K, key_of: impl Fn(&T) -> K) -> Option<usize> {
    items.binary_search_by(|item| key_of(item).cmp(key)).ok()
}

/// Range of positions holding `key` in an array sorted by key.
///
/// Any matching position is located by binary search, then the run of equal keys is widened
/// one element at a time in both directions. An absent key yields an empty range.
pub fn equal_range_by_key<T, K: Ord>(items: &[T], key: &K, key_of: impl Fn(&T) -> K) -> Range<usize> {
    let hit = match items.binary_search_by(|item| key_of(item).cmp(key)) {
        Ok(hit) => hit,
        Err(insert_at) => return insert_at..insert_at,
    };

    let mut start = hit;
    while start > 0 && key_of(&items[start - 1]) == *key {
        start -= 1;
    }

    let mut end = hit + 1;
    while end < items.len() && key_of(&items[end]) == *key {
        end += 1;
    }

    start..end
}

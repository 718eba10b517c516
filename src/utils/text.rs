//! Text helpers shared by extractors and the normalizer.

use std::collections::HashSet;

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase the first letter of every whitespace-separated word and
/// lowercase the rest (`"women's health"` -> `"Women's Health"`).
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove repeated entries, keeping the first occurrence of each.
/// Comparison is exact (case-sensitive).
pub fn dedup_preserving(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Append `item` unless it is already present.
pub fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Append every item of `extra` not already present, in order.
pub fn extend_unique(list: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        push_unique(list, item);
    }
}

/// Character count, not byte length.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Dr \n Jane\t Smith "), "Dr Jane Smith");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("women's health"), "Women's Health");
        assert_eq!(title_case("ENGLISH"), "English");
        assert_eq!(title_case(" mandarin  chinese "), "Mandarin Chinese");
    }

    #[test]
    fn test_dedup_preserving_order() {
        let items = vec!["b", "a", "b", "A", "a"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(dedup_preserving(items), vec!["b", "a", "A"]);
    }

    #[test]
    fn test_extend_unique() {
        let mut list = vec!["English".to_string()];
        extend_unique(
            &mut list,
            vec!["Greek".to_string(), "English".to_string(), "Greek".to_string()],
        );
        assert_eq!(list, vec!["English", "Greek"]);
    }
}

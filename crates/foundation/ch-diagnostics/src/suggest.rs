//! "Did you mean" suggestions for unresolved names

use std::mem;

/// Largest edit distance still offered as a suggestion
const MAX_DISTANCE: usize = 3;

/// Most suggestions attached to one error
const MAX_SUGGESTIONS: usize = 3;

/// Picks the names closest to `name`, nearest first
///
/// Ties keep the order in which candidates were given, so the result is
/// deterministic for a deterministic candidate list.
pub fn suggest<'name>(
    name: &str,
    candidates: impl IntoIterator<Item = &'name str>,
) -> Vec<String> {
    let mut scored: Vec<(&str, usize)> = Vec::new();
    for candidate in candidates {
        if candidate == name || scored.iter().any(|(seen, _)| *seen == candidate) {
            continue;
        }
        let distance = levenshtein_distance(name, candidate);
        if distance <= MAX_DISTANCE {
            scored.push((candidate, distance));
        }
    }

    scored.sort_by_key(|(_, distance)| *distance);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(candidate, _)| candidate.to_string())
        .collect()
}

/// Compute Levenshtein distance between two strings, by characters
pub fn levenshtein_distance(source: &str, target: &str) -> usize {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    let mut previous: Vec<usize> = (0..=target.len()).collect();
    let mut current = vec![0; target.len() + 1];

    for (idx, source_char) in source.iter().enumerate() {
        current[0] = idx + 1;
        for (jdx, target_char) in target.iter().enumerate() {
            let cost = usize::from(source_char != target_char);
            current[jdx + 1] = (previous[jdx + 1] + 1)
                .min(current[jdx] + 1)
                .min(previous[jdx] + cost);
        }
        mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn test_suggest_orders_by_distance() {
        let found = suggest("scroe", ["health", "score", "scores", "speed"]);
        assert_eq!(found, vec!["score".to_string(), "scores".to_string()]);
    }

    #[test]
    fn test_suggest_skips_far_names() {
        assert!(suggest("x", ["velocity", "position"]).is_empty());
    }
}

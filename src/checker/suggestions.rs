use crate::checker::dictionary::Dictionary;

/// Generate spelling suggestions for a lowercase `word`, closest first.
pub fn generate(word: &str, dictionary: &Dictionary, max_suggestions: usize) -> Vec<String> {
    if max_suggestions == 0 || word.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<(usize, String)> = Vec::new();

    // 1. Single edits that land in the dictionary (cheap, catches most typos)
    for edit in single_edits(word) {
        if dictionary.contains(&edit) {
            add_candidate(&mut candidates, word, edit, 1);
        }
    }

    // 2. Words sharing a prefix, within a small edit distance
    for prefix_len in [3, 2] {
        if candidates.len() >= max_suggestions {
            break;
        }
        let Some(prefix) = char_prefix(word, prefix_len) else {
            continue;
        };
        let max_distance = if prefix_len == 3 { 2 } else { 3 };
        for candidate in dictionary.words_with_prefix(prefix) {
            let distance = edit_distance(word, &candidate);
            if distance <= max_distance {
                add_candidate(&mut candidates, word, candidate, distance);
            }
        }
    }

    // stable: edits keep their generation order among equals
    candidates.sort_by_key(|(distance, _)| *distance);
    candidates
        .into_iter()
        .take(max_suggestions)
        .map(|(_, candidate)| candidate)
        .collect()
}

fn add_candidate(candidates: &mut Vec<(usize, String)>, word: &str, candidate: String, distance: usize) {
    if candidate != word && !candidates.iter().any(|(_, c)| *c == candidate) {
        candidates.push((distance, candidate));
    }
}

/// The first `n` characters of `word`, if it has that many.
fn char_prefix(word: &str, n: usize) -> Option<&str> {
    match word.char_indices().nth(n) {
        Some((end, _)) => Some(&word[..end]),
        None if word.chars().count() == n => Some(word),
        None => None,
    }
}

/// Calculate Levenshtein distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1) // deletion
                .min(current[j] + 1) // insertion
                .min(previous[j] + cost); // substitution
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Deletions, adjacent transpositions and common letter confusions.
fn single_edits(word: &str) -> Vec<String> {
    const CONFUSIONS: [(char, char); 11] = [
        ('a', 'e'),
        ('e', 'i'),
        ('i', 'o'),
        ('o', 'u'),
        ('b', 'v'),
        ('c', 'k'),
        ('f', 'v'),
        ('g', 'j'),
        ('m', 'n'),
        ('s', 'z'),
        ('t', 'd'),
    ];

    let chars: Vec<char> = word.chars().collect();
    let mut edits = Vec::new();

    for i in 0..chars.len().saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        edits.push(swapped.into_iter().collect());
    }

    for i in 0..chars.len() {
        let mut deleted = chars.clone();
        deleted.remove(i);
        edits.push(deleted.into_iter().collect());
    }

    for (i, &ch) in chars.iter().enumerate() {
        for &(from, to) in &CONFUSIONS {
            let replacement = if ch == from {
                to
            } else if ch == to {
                from
            } else {
                continue;
            };
            let mut replaced = chars.clone();
            replaced[i] = replacement;
            edits.push(replaced.into_iter().collect());
        }
    }

    edits
}

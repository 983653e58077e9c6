//! "Bunu mu demek istediniz?" suggestions for unknown names.
//!
//! A candidate is only offered when it is plausibly a typo of the name:
//! the name has at least three characters, both start with the same
//! character, and the edit distance is small relative to the length.

/// Names shorter than this get no suggestion.
const MIN_NAME_LEN: usize = 3;

/// Levenshtein distance over characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    // Two rows instead of the full matrix.
    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Whether `candidate` is close enough to `name` to be suggested, and at
/// what distance.
fn typo_distance(name: &str, candidate: &str) -> Option<usize> {
    if name == candidate || name.chars().next() != candidate.chars().next() {
        return None;
    }
    let max_len = name.chars().count().max(candidate.chars().count());
    let distance = edit_distance(name, candidate);
    let close = if max_len <= 4 {
        distance <= 1
    } else {
        // distance / max_len <= 0.34
        distance <= 2 && distance * 100 <= max_len * 34
    };
    close.then_some(distance)
}

/// The closest plausible candidate for `name`. Ties keep the first seen.
pub fn suggest_similar<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    if name.chars().count() < MIN_NAME_LEN {
        return None;
    }
    let mut best: Option<(usize, &str)> = None;
    for candidate in candidates {
        let Some(distance) = typo_distance(name, candidate) else {
            continue;
        };
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests;

//! Score-to-label selection.

/// Selects the label for a score vector: the index of the maximum score.
///
/// Exact ties resolve to the lowest index (a first-occurrence maximum
/// scan), so an all-equal vector yields 0. Never panics; an empty vector
/// yields 0.
pub fn select_label(scores: &[f32]) -> usize {
    let mut best = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = index;
        }
    }
    best
}

/// Number of leading characters `entry` and `predictor` have in common.
///
/// Counts Unicode scalar values, not bytes, and never looks past the end of
/// the shorter string.
pub fn shared_prefix_length(entry: &str, predictor: &str) -> usize {
    entry
        .chars()
        .zip(predictor.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Byte offset just past the first `n` characters of `s`.
///
/// Returns `None` when `s` has fewer than `n` characters.
pub(crate) fn char_offset(s: &str, n: usize) -> Option<usize> {
    s.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .nth(n)
}

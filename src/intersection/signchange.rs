//! Sign-change scan over the difference of two sampled sequences.
//!
//! Zero is a sign of its own: a step from a positive or negative difference
//! to an exact zero counts as a change, and so does the step away from it.

/// -1, 0 or +1.
#[inline]
pub fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Ascending indices `i` where `sign(f[i] - g[i]) != sign(f[i+1] - g[i+1])`.
pub fn sign_change_indices(f: &[f64], g: &[f64]) -> Vec<usize> {
    let signs: Vec<i8> = f
        .iter()
        .zip(g)
        .map(|(&fi, &gi)| sign(fi - gi))
        .collect();

    signs
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] != pair[1])
        .map(|(i, _)| i)
        .collect()
}

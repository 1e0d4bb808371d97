use super::PerceptualHash;

/// Hamming distance between two perceptual hashes.
///
/// Returns `None` when the hashes have different widths. That happens when the two sides
/// were produced by different hash algorithm versions, and the resulting number would be
/// meaningless, so the pair is treated as incomparable rather than as an error.
pub fn distance(a: &PerceptualHash, b: &PerceptualHash) -> Option<u32> {
    if a.as_bytes().len() != b.as_bytes().len() {
        return None;
    }

    Some(raw_distance(a.as_bytes(), b.as_bytes()))
}

fn raw_distance(x: &[u8], y: &[u8]) -> u32 {
    x.iter().zip(y.iter()).fold(0, |acc, (x, y)| {
        let difference = x ^ y;
        let set_bits = difference.count_ones();
        acc + set_bits
    })
}

/// Whether a candidate's reported duration agrees with the query's.
///
/// A missing candidate duration never counts against the candidate.
pub fn duration_matches(query_duration: f64, candidate_duration: Option<f64>, tolerance: f64) -> bool {
    match candidate_duration {
        None => true,
        Some(candidate_duration) => (query_duration - candidate_duration).abs() <= tolerance,
    }
}

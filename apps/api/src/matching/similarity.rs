/// Cosine similarity over the common prefix of two vectors.
///
/// A zero norm on either side yields a denominator of 1, so the result is
/// always finite. Accumulates in `f64`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (f64::from(x), f64::from(y)))
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    let denom = norm_a.sqrt() * norm_b.sqrt();
    let denom = if denom == 0.0 { 1.0 } else { denom };
    dot / denom
}

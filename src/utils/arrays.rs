//! Element-wise vector arithmetic and label counting
//!
//! All binary operations require operands of equal length and panic
//! otherwise, instead of silently truncating to the shorter input.

use std::collections::HashMap;
use std::hash::Hash;

/// Element-wise sum: `a[i] + b[i]`
pub fn sum(a: &[f64], b: &[f64]) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// Element-wise difference: `a[i] - b[i]`
pub fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// Multiply every element by `k`
pub fn scale(a: &[f64], k: f64) -> Vec<f64> {
    a.iter().map(|x| x * k).collect()
}

/// Euclidean (L2) norm
pub fn norm(a: &[f64]) -> f64 {
    a.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// Euclidean distance between `p` and `q`, i.e. `norm(sum(p, scale(q, -1)))`
///
/// Computed in a single pass without intermediate allocations.
pub fn euclidean_distance(p: &[f64], q: &[f64]) -> f64 {
    assert_eq!(p.len(), q.len(), "Vectors must have same length");
    p.iter()
        .zip(q)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Count occurrences of each distinct label
///
/// Labels are reported in order of first appearance, so callers scanning the
/// result for a maximum break ties in favour of the earliest label.
pub fn value_counts<L, I>(labels: I) -> Vec<(L, usize)>
where
    L: Eq + Hash + Clone,
    I: IntoIterator<Item = L>,
{
    let mut positions: HashMap<L, usize> = HashMap::new();
    let mut counts: Vec<(L, usize)> = Vec::new();

    for label in labels {
        match positions.get(&label) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }

    counts
}

/// Pair every value with its original position
pub fn zip_with_index<T, I>(values: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| (value, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sum_and_subtract() {
        assert_eq!(sum(&[1.0, 2.0], &[3.0, -4.0]), vec![4.0, -2.0]);
        assert_eq!(subtract(&[1.0, 2.0], &[3.0, -4.0]), vec![-2.0, 6.0]);
        assert!(sum(&[], &[]).is_empty());
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(&[1.0, -2.0, 0.5], -1.0), vec![-1.0, 2.0, -0.5]);
        assert_eq!(scale(&[3.0], 0.0), vec![0.0]);
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[3.0, 4.0]), 5.0);
        assert_eq!(norm(&[]), 0.0);
        assert_relative_eq!(norm(&[1.0, 1.0, 1.0, 1.0]), 2.0);
    }

    #[test]
    fn test_euclidean_distance_matches_composition() {
        let p = [1.5, -2.0, 7.25];
        let q = [0.5, 3.0, -1.0];
        let composed = norm(&sum(&p, &scale(&q, -1.0)));
        assert_relative_eq!(euclidean_distance(&p, &q), composed, epsilon = 1e-12);
        assert_eq!(euclidean_distance(&p, &p), 0.0);
    }

    #[test]
    #[should_panic(expected = "Vectors must have same length")]
    fn test_sum_length_mismatch() {
        sum(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    #[should_panic(expected = "Vectors must have same length")]
    fn test_distance_length_mismatch() {
        euclidean_distance(&[1.0], &[1.0, 2.0]);
    }

    #[test]
    fn test_value_counts_first_seen_order() {
        let counts = value_counts(vec!["b", "a", "a", "c", "b"]);
        assert_eq!(counts, vec![("b", 2), ("a", 2), ("c", 1)]);

        let empty: Vec<(u8, usize)> = value_counts(Vec::<u8>::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_zip_with_index() {
        assert_eq!(
            zip_with_index(vec![0.3, 0.1, 0.2]),
            vec![(0.3, 0), (0.1, 1), (0.2, 2)]
        );
    }
}

//! Longest strictly-increasing subsequence.

/// The values of a longest strictly-increasing subsequence of `seq`.
///
/// Patience sorting with binary search, O(n log n). `tails[len - 1]` holds the
/// index of the smallest tail value of any run of length `len`, and
/// `prev[i]` the index preceding `i` in its run. When several subsequences
/// share the maximum length, the one ending in the smallest values is
/// returned.
///
/// ```
/// use weft::reconcile::lis;
///
/// assert_eq!(lis(&[0, 8, 4, 12, 2, 10, 6, 14]), vec![0, 2, 6, 14]);
/// assert_eq!(lis::<i32>(&[]), Vec::<i32>::new());
/// ```
pub fn lis<T: Ord + Copy>(seq: &[T]) -> Vec<T> {
    let mut tails: Vec<usize> = Vec::with_capacity(seq.len());
    let mut prev: Vec<Option<usize>> = vec![None; seq.len()];

    for (i, &value) in seq.iter().enumerate() {
        // Fast path: extends the current longest run.
        if tails.last().map_or(true, |&last| seq[last] < value) {
            prev[i] = tails.last().copied();
            tails.push(i);
            continue;
        }
        let len = tails.partition_point(|&t| seq[t] < value);
        prev[i] = len.checked_sub(1).map(|l| tails[l]);
        tails[len] = i;
    }

    let mut out = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        out.push(seq[i]);
        cursor = prev[i];
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_subsequence(sub: &[i32], seq: &[i32]) -> bool {
        let mut it = seq.iter();
        sub.iter().all(|x| it.any(|y| y == x))
    }

    /// Quadratic reference for the length only.
    fn longest_len(seq: &[i32]) -> usize {
        let mut best = vec![1usize; seq.len()];
        for i in 0..seq.len() {
            for j in 0..i {
                if seq[j] < seq[i] {
                    best[i] = best[i].max(best[j] + 1);
                }
            }
        }
        best.into_iter().max().unwrap_or(0)
    }

    #[test]
    fn empty() {
        assert!(lis::<i32>(&[]).is_empty());
    }

    #[test]
    fn decreasing_has_length_one() {
        assert_eq!(lis(&[3, 2, 1]).len(), 1);
    }

    #[test]
    fn sorted_is_itself() {
        assert_eq!(lis(&[1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn duplicates_are_not_increasing() {
        assert_eq!(lis(&[2, 2, 2]), vec![2]);
        assert_eq!(lis(&[1, 3, 3, 4]), vec![1, 3, 4]);
    }

    #[test]
    fn classic_sequence() {
        let seq = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];
        let out = lis(&seq);
        assert_eq!(out.len(), 6);
        assert!(out.windows(2).all(|w| w[0] < w[1]));
        assert!(is_subsequence(&out, &seq));
    }

    #[test]
    fn rotated_indices() {
        // positions of old keys [1,2,3] inside new [2,3,1]
        assert_eq!(lis(&[2usize, 0, 1]), vec![0, 1]);
    }

    proptest! {
        #[test]
        fn lis_is_a_longest_increasing_subsequence(seq in prop::collection::vec(-50i32..50, 0..64)) {
            let out = lis(&seq);
            prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(is_subsequence(&out, &seq));
            prop_assert_eq!(out.len(), longest_len(&seq));
        }
    }
}

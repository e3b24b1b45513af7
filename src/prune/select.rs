//! Group selector: which 2 of 4 values survive strip pruning
//!
//! Every pair `(a, b)` with `a < b` is scored by the magnitude sum
//! `|v[a]| + |v[b]|`, widened to the `f32` compute type first. Pairs are
//! visited in the fixed order
//!
//! ```text
//! (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
//! ```
//!
//! and a pair replaces the current choice only when its score is strictly
//! greater, so on exact ties the earliest pair wins. Results are
//! bit-reproducible for a given input.

use crate::dtype::Element;

/// Number of elements in one pruning group
pub const GROUP_SIZE: usize = 4;

/// Number of elements kept per group
pub const KEEP_PER_GROUP: usize = 2;

/// Magnitude sum of a pair, in the compute type
#[inline]
fn norm1<T: Element>(a: T, b: T) -> f32 {
    a.to_compute().abs() + b.to_compute().abs()
}

/// Indices of the pair to keep out of a group of 4
///
/// The running maximum starts at `-1.0` with the choice `(0, 0)`. When no
/// score beats it (every score is NaN) only index 0 survives.
#[inline]
pub fn select_pair<T: Element>(values: &[T; GROUP_SIZE]) -> (usize, usize) {
    let mut max_norm1 = -1.0f32;
    let mut keep = (0, 0);

    for a in 0..GROUP_SIZE {
        for b in a + 1..GROUP_SIZE {
            let score = norm1(values[a], values[b]);
            if score > max_norm1 {
                keep = (a, b);
                max_norm1 = score;
            }
        }
    }

    keep
}

/// Apply the selector to one group and return the pruned group
///
/// Convenience for host-side reference computation; the kernels apply the
/// same policy in place over strided memory.
pub fn prune_group<T: Element>(values: [T; GROUP_SIZE]) -> [T; GROUP_SIZE] {
    let (a, b) = select_pair(&values);
    let mut out = [T::zero(); GROUP_SIZE];
    out[a] = values[a];
    out[b] = values[b];
    out
}

/// Whether a group passes the prune-check rule (at most 2 strictly positive)
///
/// Negative values are not counted.
#[inline]
pub fn group_passes<T: Element>(values: &[T; GROUP_SIZE]) -> bool {
    values.iter().filter(|v| v.is_positive()).count() <= KEEP_PER_GROUP
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::{bf16, f16};

    fn f16x4(v: [f32; 4]) -> [f16; 4] {
        v.map(f16::from_f32)
    }

    #[test]
    fn test_reference_scenario() {
        let values = f16x4([1.0, -5.0, 2.0, 0.1]);
        assert_eq!(select_pair(&values), (1, 2));
        assert_eq!(prune_group(values), f16x4([0.0, -5.0, 2.0, 0.0]));
    }

    #[test]
    fn test_equal_magnitudes_keep_first_pair() {
        assert_eq!(select_pair(&f16x4([3.0, -3.0, 3.0, -3.0])), (0, 1));
        assert_eq!(select_pair(&[7i8, 7, 7, 7]), (0, 1));
    }

    #[test]
    fn test_tie_between_later_pairs_prefers_lower_index() {
        // (1,3) and (2,3) both score 9; (1,3) is visited first
        assert_eq!(select_pair(&[0i8, 4, 4, 5]), (1, 3));
        // (0,2) ties (1,2) at 6
        assert_eq!(select_pair(&[1i8, 1, 5, 0]), (0, 2));
    }

    #[test]
    fn test_all_zero_group_keeps_first_pair() {
        assert_eq!(select_pair(&[0i8; 4]), (0, 1));
    }

    #[test]
    fn test_i8_minimum_magnitude() {
        // |-128| must not overflow in the compute type
        assert_eq!(select_pair(&[1i8, -128, 2, -127]), (1, 3));
    }

    #[test]
    fn test_bf16_scoring() {
        let values = [-0.5, 0.25, 8.0, -8.0].map(bf16::from_f32);
        assert_eq!(select_pair(&values), (2, 3));
    }

    #[test]
    fn test_all_nan_keeps_index_zero_only() {
        let values = [f16::NAN; 4];
        assert_eq!(select_pair(&values), (0, 0));
        let pruned = prune_group(values);
        assert!(pruned[0].is_nan());
        assert!(pruned[1..].iter().all(|v| *v == f16::ZERO));
    }

    #[test]
    fn test_group_passes_counts_only_positive_values() {
        assert!(group_passes(&f16x4([1.0, 2.0, 0.0, 0.0])));
        assert!(!group_passes(&f16x4([1.0, 2.0, 3.0, 0.0])));
        // Negative entries are not counted
        assert!(group_passes(&f16x4([-3.0, -4.0, -5.0, 0.0])));
        assert!(group_passes(&[-3i8, 4, -5, 6]));
    }
}

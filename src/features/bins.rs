use log::debug;

use crate::util::linspace;

/// Number of thresholds per dimension used by [`BinDiscretizer::cart_pole`]
pub const CART_POLE_THRESHOLDS: usize = 8;

/// Index of the bin containing `value`
///
/// The bin is the number of edges that `value` reaches or exceeds, so it lies in `[0, edges.len()]`.
/// Values below every edge fall in bin `0` and values above every edge in the last bin. NaN
/// compares false with everything and lands in bin `0`.
///
/// `edges` must be sorted in ascending order.
pub fn to_bin(value: f64, edges: &[f64]) -> usize {
    edges.partition_point(|&edge| value >= edge)
}

/// Concatenates single-digit bin indices into one integer, most significant digit first
///
/// `build_state(&[1, 2, 3, 4]) == 1234`
pub fn build_state(bins: &[usize]) -> usize {
    bins.iter().fold(0, |acc, &b| {
        debug_assert!(b < 10, "Bin index {} is not a decimal digit", b);
        acc * 10 + b
    })
}

/// Maps a continuous `D`-dimensional observation to a discrete state index
///
/// Each dimension is split by a fixed set of evenly spaced edges and the resulting bin indices are
/// concatenated as decimal digits by [`build_state`]. The mapping is total: every observation,
/// including out of range and non-finite values, produces an index below [`capacity`](Self::capacity).
#[derive(Debug, Clone, PartialEq)]
pub struct BinDiscretizer<const D: usize> {
    edges: [Vec<f64>; D],
}

impl<const D: usize> BinDiscretizer<D> {
    /// Build a discretizer with `thresholds` evenly spaced edges spanning each `(low, high)` range
    ///
    /// **Panics** if `thresholds` is not in `[1, 9]` or a range is empty
    pub fn new(ranges: [(f64, f64); D], thresholds: usize) -> Self {
        assert!(
            (1..=9).contains(&thresholds),
            "Invalid value for `thresholds`. Bin indices must be single decimal digits."
        );
        assert!(
            ranges.iter().all(|(low, high)| low < high),
            "Every range must satisfy `low < high`."
        );

        let edges = ranges.map(|(low, high)| linspace(low, high, thresholds));
        debug!(
            "Discretizer with {} bins over {} dimensions",
            thresholds + 1,
            D
        );
        Self { edges }
    }

    /// The edges of a single dimension
    pub fn edges(&self, dim: usize) -> &[f64] {
        &self.edges[dim]
    }

    /// Number of bins per dimension
    pub fn num_bins(&self) -> usize {
        self.edges[0].len() + 1
    }

    /// Number of indices the decimal encoding can address, `10^D`
    pub fn capacity(&self) -> usize {
        10usize.pow(D as u32)
    }

    /// Largest index [`transform`](Self::transform) can produce
    pub fn max_index(&self) -> usize {
        build_state(&self.edges.each_ref().map(|e| e.len()))
    }

    /// Discretize an observation
    pub fn transform(&self, observation: &[f64; D]) -> usize {
        let mut bins = [0; D];
        for (bin, (&value, edges)) in bins.iter_mut().zip(observation.iter().zip(&self.edges)) {
            *bin = to_bin(value, edges);
        }
        build_state(&bins)
    }
}

impl BinDiscretizer<4> {
    /// Discretizer for the cart-pole task
    ///
    /// The ranges cover the values observed in practice rather than the theoretical bounds of the
    /// observation space: cart position, cart velocity, pole angle and pole angular velocity.
    pub fn cart_pole() -> Self {
        Self::new(
            [(-2.4, 2.4), (-2.0, 2.0), (-0.4, 0.4), (-3.5, 3.5)],
            CART_POLE_THRESHOLDS,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn to_bin_total_and_deterministic() {
        let d = BinDiscretizer::cart_pole();
        let edges = d.edges(0);
        let mut rng = StdRng::seed_from_u64(3);
        let specials = [
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::MAX,
            f64::MIN,
            0.0,
            -0.0,
        ];

        for v in specials
            .into_iter()
            .chain((0..1000).map(|_| rng.gen_range(-1e3..1e3)))
        {
            let bin = to_bin(v, edges);
            assert!(bin <= 8, "Bin {} for {} out of range", bin, v);
            assert_eq!(bin, to_bin(v, edges), "Same value, same bin");
        }
    }

    #[test]
    fn to_bin_edges() {
        let edges = [0.0, 1.0, 2.0];
        assert_eq!(to_bin(-5.0, &edges), 0, "Below all edges");
        assert_eq!(to_bin(0.0, &edges), 1, "Equal to an edge goes up");
        assert_eq!(to_bin(1.5, &edges), 2, "Between edges");
        assert_eq!(to_bin(5.0, &edges), 3, "Above all edges");
        assert_eq!(to_bin(f64::NAN, &edges), 0, "NaN maps to the first bin");
    }

    #[test]
    fn build_state_concatenates_digits() {
        assert_eq!(build_state(&[1, 2, 3, 4]), 1234);
        assert_eq!(build_state(&[0, 0, 0, 7]), 7);
        assert_eq!(build_state(&[8, 8, 8, 8]), 8888);
    }

    #[test]
    fn build_state_injective() {
        let mut seen = HashSet::new();
        for a in 0..9 {
            for b in 0..9 {
                for c in 0..9 {
                    for d in 0..9 {
                        let s = build_state(&[a, b, c, d]);
                        assert!(s < 10_000, "State {} exceeds 10^4", s);
                        assert!(seen.insert(s), "Duplicate state {}", s);
                    }
                }
            }
        }
        assert_eq!(seen.len(), 9usize.pow(4));
    }

    #[test]
    fn cart_pole_discretizer() {
        let d = BinDiscretizer::cart_pole();
        assert_eq!(d.num_bins(), 9);
        assert_eq!(d.capacity(), 10_000);
        assert_eq!(d.max_index(), 8888);
        assert!(d.max_index() < d.capacity());

        assert_eq!(d.transform(&[-10.0, -10.0, -10.0, -10.0]), 0);
        assert_eq!(d.transform(&[10.0, 10.0, 10.0, 10.0]), 8888);
        // center of each range sits between the 4th and 5th edges
        assert_eq!(d.transform(&[0.0, 0.0, 0.0, 0.0]), 4444);
        assert_eq!(d.transform(&[2.4, -3.0, 0.0, 3.6]), 8048);
    }

    #[test]
    #[should_panic(expected = "single decimal digits")]
    fn too_many_thresholds() {
        BinDiscretizer::new([(0.0, 1.0)], 10);
    }
}
